use lsreply_bus::{Message, MessageBus};
use lsreply_schema::Schema;
use serde_json::Value;
use tracing::error;

use crate::reply::reply_error_internal;

/// Render `reply` under the permissive schema and send it as the reply to
/// `message`.
///
/// If the schema cannot be built, an internal-error reply goes to `message`
/// instead and `false` is returned. A failed send is logged and also yields
/// `false`.
pub fn validate_and_send<B>(bus: &B, message: &Message, reply: &Value) -> bool
where
    B: MessageBus + ?Sized,
{
    match Schema::permissive() {
        Ok(schema) => validate_and_send_with_schema(bus, message, reply, &schema),
        Err(err) => {
            error!(token = message.token(), error = %err, "response schema unavailable");
            reply_error_internal(bus, message);
            false
        }
    }
}

/// Check `reply` against `schema`, render it and send it as the reply to
/// `message`.
///
/// A tree the schema rejects is answered with an internal-error reply and
/// `false`.
pub fn validate_and_send_with_schema<B>(
    bus: &B,
    message: &Message,
    reply: &Value,
    schema: &Schema,
) -> bool
where
    B: MessageBus + ?Sized,
{
    let payload = match schema.render(reply) {
        Ok(payload) => payload,
        Err(err) => {
            error!(token = message.token(), error = %err, "failed rendering reply");
            reply_error_internal(bus, message);
            return false;
        }
    };

    match bus.reply(message, &payload) {
        Ok(()) => true,
        Err(err) => {
            error!(token = message.token(), error = %err, "failed sending reply");
            false
        }
    }
}

/// Render `reply` under the permissive schema and broadcast it to every
/// subscriber of `path`/`method`.
///
/// Failures are logged only.
pub fn post_subscription<B>(bus: &B, path: &str, method: &str, reply: &Value)
where
    B: MessageBus + ?Sized,
{
    match Schema::permissive() {
        Ok(schema) => post_subscription_with_schema(bus, path, method, reply, &schema),
        Err(err) => error!(path, method, error = %err, "response schema unavailable"),
    }
}

/// Check `reply` against `schema` and broadcast it to every subscriber of
/// `path`/`method`. A rejected tree is logged and nothing is posted.
pub fn post_subscription_with_schema<B>(
    bus: &B,
    path: &str,
    method: &str,
    reply: &Value,
    schema: &Schema,
) where
    B: MessageBus + ?Sized,
{
    let payload = match schema.render(reply) {
        Ok(payload) => payload,
        Err(err) => {
            error!(path, method, error = %err, "failed rendering subscription post");
            return;
        }
    };

    if let Err(err) = bus.subscription_post(path, method, &payload) {
        error!(path, method, error = %err, "failed posting to subscribers");
    }
}

#[cfg(test)]
mod tests {
    use lsreply_bus::{LoopbackBus, Post};
    use serde_json::json;

    use super::*;

    #[test]
    fn tree_is_sent_as_compact_reply() {
        let bus = LoopbackBus::new();
        let msg = bus.message("/svc", "getStatus", "{}");

        assert!(validate_and_send(
            &bus,
            &msg,
            &json!({ "returnValue": true, "state": "playing" })
        ));

        let sent = bus.last_reply().unwrap();
        assert_eq!(sent.token, msg.token());
        let value: Value = serde_json::from_str(&sent.payload).unwrap();
        assert_eq!(value, json!({ "returnValue": true, "state": "playing" }));
        assert!(!sent.payload.contains(' '));
    }

    #[test]
    fn non_object_tree_is_sent_verbatim() {
        let bus = LoopbackBus::new();
        let msg = bus.message("/svc", "list", "{}");

        assert!(validate_and_send(&bus, &msg, &json!([1, "two", null])));
        assert_eq!(bus.last_reply().unwrap().payload, r#"[1,"two",null]"#);
    }

    #[test]
    fn failed_send_returns_false() {
        let bus = LoopbackBus::new();
        let msg = bus.message("/svc", "getStatus", "{}");
        bus.set_fail_sends(true);

        assert!(!validate_and_send(&bus, &msg, &json!({ "returnValue": true })));
        assert!(bus.replies().is_empty());
    }

    #[test]
    fn post_reaches_subscribers() {
        let bus = LoopbackBus::new();
        let sub = bus.message("/svc", "watch", r#"{"subscribe":true}"#);
        bus.subscription_process(&sub).unwrap();

        post_subscription(&bus, "/svc", "watch", &json!({ "level": 5 }));

        assert_eq!(
            bus.posts(),
            vec![Post {
                subscriber: sub.token(),
                path: "/svc".to_string(),
                method: "watch".to_string(),
                payload: r#"{"level":5}"#.to_string(),
            }]
        );
    }

    #[test]
    fn failed_post_is_swallowed() {
        let bus = LoopbackBus::new();
        let sub = bus.message("/svc", "watch", r#"{"subscribe":true}"#);
        bus.subscription_process(&sub).unwrap();
        bus.set_fail_sends(true);

        post_subscription(&bus, "/svc", "watch", &json!({ "level": 5 }));

        assert!(bus.posts().is_empty());
    }

    const REPLY_SCHEMA: &str = r#"{"type":"object","required":["returnValue"]}"#;

    #[test]
    fn rejected_reply_sends_internal_error() {
        let bus = LoopbackBus::new();
        let msg = bus.message("/svc", "getStatus", "{}");
        let schema = Schema::from_json(REPLY_SCHEMA).unwrap();

        assert!(!validate_and_send_with_schema(
            &bus,
            &msg,
            &json!({ "x": 1 }),
            &schema
        ));

        let replies = bus.replies();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].token, msg.token());
        assert_eq!(
            replies[0].payload,
            r#"{"returnValue":false,"errorText":"Internal error."}"#
        );
    }

    #[test]
    fn accepted_reply_is_sent_under_schema() {
        let bus = LoopbackBus::new();
        let msg = bus.message("/svc", "getStatus", "{}");
        let schema = Schema::from_json(REPLY_SCHEMA).unwrap();

        assert!(validate_and_send_with_schema(
            &bus,
            &msg,
            &json!({ "returnValue": true }),
            &schema
        ));
        assert_eq!(bus.last_reply().unwrap().payload, r#"{"returnValue":true}"#);
    }

    #[test]
    fn rejected_post_reaches_nobody() {
        let bus = LoopbackBus::new();
        let sub = bus.message("/svc", "watch", r#"{"subscribe":true}"#);
        bus.subscription_process(&sub).unwrap();
        let schema = Schema::from_json(REPLY_SCHEMA).unwrap();

        post_subscription_with_schema(&bus, "/svc", "watch", &json!({ "x": 1 }), &schema);

        assert!(bus.posts().is_empty());
        assert!(bus.replies().is_empty());
    }
}
