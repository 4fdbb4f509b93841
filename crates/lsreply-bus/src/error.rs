/// Errors reported by a message bus implementation.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    /// A reply to an inbound message could not be delivered.
    #[error("failed to reply to message {token}: {reason}")]
    Reply { token: u64, reason: String },

    /// The bus refused to register a subscription.
    #[error("failed to process subscription for message {token}: {reason}")]
    SubscriptionProcess { token: u64, reason: String },

    /// A broadcast to subscribers could not be delivered.
    #[error("failed to post to subscribers of {path}/{method}: {reason}")]
    SubscriptionPost {
        path: String,
        method: String,
        reason: String,
    },

    /// The bus connection has been shut down.
    #[error("bus shut down")]
    Shutdown,
}

pub type Result<T> = std::result::Result<T, BusError>;
