use crate::error::Result;
use crate::message::Message;

/// An open connection to the message bus.
///
/// This is the seam between the reply helpers and whatever client library
/// actually talks to the bus. Calls are synchronous; timeouts and
/// cancellation are the implementation's business.
pub trait MessageBus {
    /// Send `payload` as the reply to `message`.
    fn reply(&self, message: &Message, payload: &str) -> Result<()>;

    /// Register the sender of `message` as a subscriber of its
    /// category/method pair.
    ///
    /// Returns whether the sender ended up subscribed.
    fn subscription_process(&self, message: &Message) -> Result<bool>;

    /// Send `payload` to every current subscriber of `path`/`method`.
    fn subscription_post(&self, path: &str, method: &str, payload: &str) -> Result<()>;
}
