/// Default upper bound on a parsed payload: 16 MiB.
pub const DEFAULT_MAX_PAYLOAD: usize = 16 * 1024 * 1024;

/// Controls schema compilation and payload parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaConfig {
    /// When true, object schemas reject properties they do not declare.
    pub strict_mode: bool,
    /// Maximum payload size in bytes accepted by [`Schema::parse`](crate::Schema::parse).
    pub max_payload_size: usize,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            max_payload_size: DEFAULT_MAX_PAYLOAD,
        }
    }
}
