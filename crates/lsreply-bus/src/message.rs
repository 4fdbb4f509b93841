use bytes::Bytes;
use serde_json::Value;

/// Payload member that marks a request as a subscription request.
pub const SUBSCRIBE_KEY: &str = "subscribe";

/// A single request received on the bus.
///
/// Messages are owned by the bus; the reply helpers only ever borrow them.
#[derive(Debug, Clone)]
pub struct Message {
    token: u64,
    category: String,
    method: String,
    payload: Bytes,
}

impl Message {
    /// Create an inbound message.
    pub fn new(
        token: u64,
        category: impl Into<String>,
        method: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            token,
            category: category.into(),
            method: method.into(),
            payload: payload.into(),
        }
    }

    /// Bus-assigned token identifying this request.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Service path (category) the request was addressed to.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Method name the request was addressed to.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Raw payload bytes.
    pub fn payload(&self) -> &[u8] {
        self.payload.as_ref()
    }

    /// Payload as text, if it is valid UTF-8.
    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }

    /// Whether the sender asked for subscription semantics.
    ///
    /// True only when the payload is a JSON object with `"subscribe": true`.
    pub fn is_subscription(&self) -> bool {
        match serde_json::from_slice::<Value>(&self.payload) {
            Ok(Value::Object(map)) => matches!(map.get(SUBSCRIBE_KEY), Some(Value::Bool(true))),
            _ => false,
        }
    }
}
