use lsreply_bus::{Message, MessageBus};
use tracing::{debug, error};

/// Register the sender of `message` as a subscriber if it asked to be one.
///
/// Returns true only when `message` is a subscription request and the bus
/// reports the sender as subscribed. A registration error is logged and
/// reported as `false`.
pub fn check_for_subscription_and_process<B>(bus: &B, message: &Message) -> bool
where
    B: MessageBus + ?Sized,
{
    if !message.is_subscription() {
        return false;
    }

    match bus.subscription_process(message) {
        Ok(subscribed) => {
            debug!(
                token = message.token(),
                path = message.category(),
                method = message.method(),
                subscribed,
                "processed subscription request"
            );
            subscribed
        }
        Err(err) => {
            error!(token = message.token(), error = %err, "failed processing subscription");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use lsreply_bus::{BusError, LoopbackBus};

    use super::*;

    #[test]
    fn subscription_request_is_registered() {
        let bus = LoopbackBus::new();
        let msg = bus.message("/svc", "watch", r#"{"subscribe":true}"#);

        assert!(check_for_subscription_and_process(&bus, &msg));
        assert_eq!(bus.subscribers("/svc", "watch"), vec![msg.token()]);
    }

    #[test]
    fn plain_request_is_not_registered() {
        let bus = LoopbackBus::new();
        for payload in [r#"{}"#, r#"{"subscribe":false}"#, "not json"] {
            let msg = bus.message("/svc", "watch", payload);
            assert!(!check_for_subscription_and_process(&bus, &msg));
        }
        assert!(bus.subscribers("/svc", "watch").is_empty());
    }

    #[test]
    fn registration_failure_is_false() {
        let bus = LoopbackBus::new();
        bus.set_fail_subscriptions(true);
        let msg = bus.message("/svc", "watch", r#"{"subscribe":true}"#);

        assert!(!check_for_subscription_and_process(&bus, &msg));
    }

    struct DecliningBus;

    impl MessageBus for DecliningBus {
        fn reply(&self, _message: &Message, _payload: &str) -> lsreply_bus::Result<()> {
            Err(BusError::Shutdown)
        }

        fn subscription_process(&self, _message: &Message) -> lsreply_bus::Result<bool> {
            Ok(false)
        }

        fn subscription_post(
            &self,
            _path: &str,
            _method: &str,
            _payload: &str,
        ) -> lsreply_bus::Result<()> {
            Err(BusError::Shutdown)
        }
    }

    #[test]
    fn bus_declining_is_false() {
        let msg = Message::new(1, "/svc", "watch", &br#"{"subscribe":true}"#[..]);
        assert!(!check_for_subscription_and_process(&DecliningBus, &msg));
    }
}
