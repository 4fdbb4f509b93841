//! Fixed-shape reply envelopes.
//!
//! Error replies are `{"returnValue":false,"errorText":"<text>"}` and the
//! success reply is `{"returnValue":true}`. Both are serialized from typed
//! structs, so `returnValue` always comes first and `errorText` is escaped.

use lsreply_bus::{Message, MessageBus};
use serde::Serialize;
use tracing::error;

/// Sent when an error envelope cannot be serialized.
const FALLBACK_ERROR_PAYLOAD: &str = r#"{"returnValue":false,"errorText":"Internal error."}"#;

#[derive(Serialize)]
struct ErrorReply<'a> {
    #[serde(rename = "returnValue")]
    return_value: bool,
    #[serde(rename = "errorText")]
    error_text: &'a str,
}

#[derive(Serialize)]
struct SuccessReply {
    #[serde(rename = "returnValue")]
    return_value: bool,
}

/// Canonical error replies shared by every service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unknown,
    BadJson,
    InvalidParams,
    NotImplemented,
    Internal,
}

impl ErrorKind {
    /// All canonical errors, in declaration order.
    pub const ALL: [ErrorKind; 5] = [
        ErrorKind::Unknown,
        ErrorKind::BadJson,
        ErrorKind::InvalidParams,
        ErrorKind::NotImplemented,
        ErrorKind::Internal,
    ];

    /// The fixed `errorText` for this error.
    pub fn text(self) -> &'static str {
        match self {
            ErrorKind::Unknown => "Unknown Error.",
            ErrorKind::BadJson => "Malformed json.",
            ErrorKind::InvalidParams => "Invalid parameters.",
            ErrorKind::NotImplemented => "Not implemented.",
            ErrorKind::Internal => "Internal error.",
        }
    }
}

/// The error envelope carrying `error_text`.
pub fn error_payload(error_text: &str) -> String {
    serde_json::to_string(&ErrorReply {
        return_value: false,
        error_text,
    })
    .unwrap_or_else(|_| FALLBACK_ERROR_PAYLOAD.to_string())
}

/// The success envelope.
pub fn success_payload() -> String {
    serde_json::to_string(&SuccessReply { return_value: true })
        .unwrap_or_else(|_| r#"{"returnValue":true}"#.to_string())
}

/// Reply to `message` with an error envelope carrying `error_text`.
///
/// Fire-and-forget: a failed send is logged and dropped.
pub fn reply_custom_error<B>(bus: &B, message: &Message, error_text: &str)
where
    B: MessageBus + ?Sized,
{
    send_logged(bus, message, &error_payload(error_text));
}

/// Reply to `message` with one of the canonical errors.
pub fn reply_error<B>(bus: &B, message: &Message, kind: ErrorKind)
where
    B: MessageBus + ?Sized,
{
    reply_custom_error(bus, message, kind.text());
}

pub fn reply_error_unknown<B: MessageBus + ?Sized>(bus: &B, message: &Message) {
    reply_error(bus, message, ErrorKind::Unknown);
}

pub fn reply_error_bad_json<B: MessageBus + ?Sized>(bus: &B, message: &Message) {
    reply_error(bus, message, ErrorKind::BadJson);
}

pub fn reply_error_invalid_params<B: MessageBus + ?Sized>(bus: &B, message: &Message) {
    reply_error(bus, message, ErrorKind::InvalidParams);
}

pub fn reply_error_not_implemented<B: MessageBus + ?Sized>(bus: &B, message: &Message) {
    reply_error(bus, message, ErrorKind::NotImplemented);
}

pub fn reply_error_internal<B: MessageBus + ?Sized>(bus: &B, message: &Message) {
    reply_error(bus, message, ErrorKind::Internal);
}

/// Reply to `message` with `{"returnValue":true}`.
///
/// Fire-and-forget: a failed send is logged and dropped.
pub fn reply_success<B: MessageBus + ?Sized>(bus: &B, message: &Message) {
    send_logged(bus, message, &success_payload());
}

fn send_logged<B: MessageBus + ?Sized>(bus: &B, message: &Message, payload: &str) {
    if let Err(err) = bus.reply(message, payload) {
        error!(
            token = message.token(),
            method = message.method(),
            error = %err,
            "failed sending reply"
        );
    }
}

#[cfg(test)]
mod tests {
    use lsreply_bus::LoopbackBus;

    use super::*;

    fn sent_after(reply: impl FnOnce(&LoopbackBus, &Message)) -> String {
        let bus = LoopbackBus::new();
        let msg = bus.message("/com/example/svc", "doThing", "{}");
        reply(&bus, &msg);
        let sent = bus.last_reply().expect("a reply should be recorded");
        assert_eq!(sent.token, msg.token());
        sent.payload
    }

    #[test]
    fn success_envelope_is_exact() {
        assert_eq!(sent_after(reply_success), r#"{"returnValue":true}"#);
    }

    #[test]
    fn canonical_error_envelopes_are_exact() {
        assert_eq!(
            sent_after(reply_error_unknown),
            r#"{"returnValue":false,"errorText":"Unknown Error."}"#
        );
        assert_eq!(
            sent_after(reply_error_bad_json),
            r#"{"returnValue":false,"errorText":"Malformed json."}"#
        );
        assert_eq!(
            sent_after(reply_error_invalid_params),
            r#"{"returnValue":false,"errorText":"Invalid parameters."}"#
        );
        assert_eq!(
            sent_after(reply_error_not_implemented),
            r#"{"returnValue":false,"errorText":"Not implemented."}"#
        );
        assert_eq!(
            sent_after(reply_error_internal),
            r#"{"returnValue":false,"errorText":"Internal error."}"#
        );
    }

    #[test]
    fn custom_error_embeds_text() {
        let sent = sent_after(|bus, msg| reply_custom_error(bus, msg, "Device busy."));
        assert_eq!(sent, r#"{"returnValue":false,"errorText":"Device busy."}"#);
    }

    #[test]
    fn custom_error_escapes_quotes_and_backslashes() {
        let sent = sent_after(|bus, msg| reply_custom_error(bus, msg, r#"bad "name" at C:\tmp"#));
        assert_eq!(
            sent,
            r#"{"returnValue":false,"errorText":"bad \"name\" at C:\\tmp"}"#
        );

        let value: serde_json::Value = serde_json::from_str(&sent).unwrap();
        assert_eq!(value["errorText"], r#"bad "name" at C:\tmp"#);
    }

    #[test]
    fn reply_error_matches_named_wrappers() {
        for kind in ErrorKind::ALL {
            let sent = sent_after(|bus, msg| reply_error(bus, msg, kind));
            assert_eq!(sent, error_payload(kind.text()));
        }
    }

    #[test]
    fn failed_send_is_swallowed() {
        let bus = LoopbackBus::new();
        let msg = bus.message("/svc", "m", "{}");
        bus.set_fail_sends(true);

        reply_success(&bus, &msg);
        reply_error_unknown(&bus, &msg);

        assert!(bus.replies().is_empty());
    }

    #[test]
    fn works_through_trait_object() {
        let bus = LoopbackBus::new();
        let msg = bus.message("/svc", "m", "{}");
        let dyn_bus: &dyn MessageBus = &bus;

        reply_success(dyn_bus, &msg);

        assert_eq!(bus.replies().len(), 1);
    }
}
