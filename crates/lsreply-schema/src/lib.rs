//! JSON Schema parsing and rendering for bus payloads.
//!
//! Inbound payloads are parsed into a [`serde_json::Value`] and checked
//! against a compiled [`Schema`]; outbound trees are checked and rendered
//! back to compact text. The reply helpers only ever use the permissive
//! schema (`{}`), which accepts any well-formed JSON.

pub mod config;
pub mod error;
pub mod schema;
pub mod validator;

pub use config::SchemaConfig;
pub use error::{Result, SchemaError};
pub use schema::{Schema, PERMISSIVE_SCHEMA};
