use lsreply_bus::Message;
use lsreply_schema::{Schema, SchemaError};
use serde_json::Value;
use tracing::debug;

/// Parse an inbound payload under the permissive schema.
///
/// Returns `None` when the payload is not well-formed JSON or is the JSON
/// literal `null`. The caller decides how to report that, usually with
/// [`reply_error_bad_json`](crate::reply::reply_error_bad_json).
pub fn parse_and_validate(payload: &str) -> Option<Value> {
    let schema = match Schema::permissive() {
        Ok(schema) => schema,
        Err(err) => {
            debug!(error = %err, "permissive schema unavailable");
            return None;
        }
    };

    match parse_with_schema(payload, &schema) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(err) => {
            debug!(error = %err, "rejected inbound payload");
            None
        }
    }
}

/// Parse an inbound payload under `schema`, keeping the diagnostic.
pub fn parse_with_schema(payload: &str, schema: &Schema) -> Result<Value, SchemaError> {
    schema.parse(payload)
}

/// Parse the payload carried by `message`.
///
/// A payload that is not valid UTF-8 is treated like malformed JSON.
pub fn parse_message(message: &Message) -> Option<Value> {
    match message.payload_str() {
        Some(payload) => parse_and_validate(payload),
        None => {
            debug!(token = message.token(), "payload is not valid UTF-8");
            None
        }
    }
}
