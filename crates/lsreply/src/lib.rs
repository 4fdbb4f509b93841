//! Reply, parse and subscription helpers for JSON services on a message bus.
//!
//! Services answering requests on a bus keep writing the same few lines:
//! build an error envelope and reply, parse the inbound payload, pull a
//! typed field out of it with a default, broadcast to subscribers. This
//! crate collects those helpers.
//!
//! # Crate Structure
//!
//! - [`bus`]: The `MessageBus` seam, inbound `Message`, and the in-process `LoopbackBus`
//! - [`schema`]: Schema-checked parsing and rendering of JSON payloads
//! - [`helpers`]: Reply envelopes, payload parsing, field accessors, subscriptions

/// Re-export bus types.
pub mod bus {
    pub use lsreply_bus::*;
}

/// Re-export schema types.
pub mod schema {
    pub use lsreply_schema::*;
}

/// Re-export the reply helpers.
pub mod helpers {
    pub use lsreply_reply::*;
}
