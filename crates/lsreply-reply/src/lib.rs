//! Reply, parse and subscription helpers for bus services.
//!
//! Every function here is stateless glue around a borrowed
//! [`MessageBus`](lsreply_bus::MessageBus): build a reply envelope and send
//! it, parse an inbound payload, pull typed fields out of the parsed tree,
//! broadcast to subscribers, register a subscription. Transport failures are
//! logged through `tracing` and otherwise swallowed.

pub mod fields;
pub mod parse;
pub mod reply;
pub mod send;
pub mod subscription;

pub use fields::{get_bool, get_int, get_string};
pub use parse::{parse_and_validate, parse_message, parse_with_schema};
pub use reply::{
    error_payload, reply_custom_error, reply_error, reply_error_bad_json, reply_error_internal,
    reply_error_invalid_params, reply_error_not_implemented, reply_error_unknown, reply_success,
    success_payload, ErrorKind,
};
pub use send::{
    post_subscription, post_subscription_with_schema, validate_and_send,
    validate_and_send_with_schema,
};
pub use subscription::check_for_subscription_and_process;
