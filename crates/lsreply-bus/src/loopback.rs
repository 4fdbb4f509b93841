use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::{BusError, Result};
use crate::message::Message;
use crate::traits::MessageBus;

/// A reply recorded by [`LoopbackBus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Token of the message being replied to.
    pub token: u64,
    /// Reply payload, exactly as sent.
    pub payload: String,
}

/// A broadcast delivered to one subscriber of a [`LoopbackBus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Token of the subscription request that registered the subscriber.
    pub subscriber: u64,
    pub path: String,
    pub method: String,
    pub payload: String,
}

#[derive(Default)]
struct State {
    next_token: u64,
    replies: Vec<Reply>,
    posts: Vec<Post>,
    subscribers: HashMap<(String, String), Vec<u64>>,
    fail_sends: bool,
    fail_subscriptions: bool,
}

/// In-process bus that records replies and broadcasts instead of sending them.
///
/// Subscribers are keyed by the category/method of the request that
/// registered them. Failure injection lets callers exercise the paths where
/// the bus rejects a send.
#[derive(Default)]
pub struct LoopbackBus {
    state: Mutex<State>,
}

impl LoopbackBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint an inbound message with a fresh token.
    pub fn message(&self, category: &str, method: &str, payload: &str) -> Message {
        let mut state = self.lock();
        state.next_token = state.next_token.saturating_add(1);
        Message::new(
            state.next_token,
            category,
            method,
            payload.as_bytes().to_vec(),
        )
    }

    /// Make every subsequent reply and post fail (or succeed again).
    pub fn set_fail_sends(&self, fail: bool) {
        self.lock().fail_sends = fail;
    }

    /// Make every subsequent subscription registration fail (or succeed again).
    pub fn set_fail_subscriptions(&self, fail: bool) {
        self.lock().fail_subscriptions = fail;
    }

    /// Replies sent so far, oldest first.
    pub fn replies(&self) -> Vec<Reply> {
        self.lock().replies.clone()
    }

    /// The most recent reply, if any.
    pub fn last_reply(&self) -> Option<Reply> {
        self.lock().replies.last().cloned()
    }

    /// Broadcasts delivered so far, one entry per subscriber.
    pub fn posts(&self) -> Vec<Post> {
        self.lock().posts.clone()
    }

    /// Tokens subscribed to `path`/`method`.
    pub fn subscribers(&self, path: &str, method: &str) -> Vec<u64> {
        self.lock()
            .subscribers
            .get(&(path.to_string(), method.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl MessageBus for LoopbackBus {
    fn reply(&self, message: &Message, payload: &str) -> Result<()> {
        let mut state = self.lock();
        if state.fail_sends {
            return Err(BusError::Reply {
                token: message.token(),
                reason: "sends disabled on loopback bus".to_string(),
            });
        }
        debug!(token = message.token(), size = payload.len(), "loopback reply");
        state.replies.push(Reply {
            token: message.token(),
            payload: payload.to_string(),
        });
        Ok(())
    }

    fn subscription_process(&self, message: &Message) -> Result<bool> {
        let mut state = self.lock();
        if state.fail_subscriptions {
            return Err(BusError::SubscriptionProcess {
                token: message.token(),
                reason: "subscriptions disabled on loopback bus".to_string(),
            });
        }
        let key = (message.category().to_string(), message.method().to_string());
        let tokens = state.subscribers.entry(key).or_default();
        if !tokens.contains(&message.token()) {
            tokens.push(message.token());
        }
        debug!(
            token = message.token(),
            path = message.category(),
            method = message.method(),
            "loopback subscription added"
        );
        Ok(true)
    }

    fn subscription_post(&self, path: &str, method: &str, payload: &str) -> Result<()> {
        let mut state = self.lock();
        if state.fail_sends {
            return Err(BusError::SubscriptionPost {
                path: path.to_string(),
                method: method.to_string(),
                reason: "sends disabled on loopback bus".to_string(),
            });
        }
        let subscribers = state
            .subscribers
            .get(&(path.to_string(), method.to_string()))
            .cloned()
            .unwrap_or_default();
        debug!(path, method, subscribers = subscribers.len(), "loopback post");
        for subscriber in subscribers {
            state.posts.push(Post {
                subscriber,
                path: path.to_string(),
                method: method.to_string(),
                payload: payload.to_string(),
            });
        }
        Ok(())
    }
}
