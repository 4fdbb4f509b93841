//! Message bus abstraction consumed by the lsreply helpers.
//!
//! The helpers never own a bus connection. They borrow something that
//! implements [`MessageBus`] for the duration of one call and use it to
//! reply to an inbound [`Message`], register a subscriber, or broadcast to
//! the subscribers of a path/method pair.
//!
//! [`LoopbackBus`] is an in-process implementation that records everything
//! sent through it. It backs the test suites and the `lsreply` CLI.

pub mod error;
pub mod loopback;
pub mod message;
pub mod traits;

pub use error::{BusError, Result};
pub use loopback::{LoopbackBus, Post, Reply};
pub use message::Message;
pub use traits::MessageBus;
