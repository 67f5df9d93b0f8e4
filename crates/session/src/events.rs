// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Broadcast channel for authentication-state transitions.
//!
//! Not a general pub/sub layer — the only payload is the latest
//! authenticated flag. Publishing is synchronous: every handler subscribed
//! at the moment of the call runs before `publish` returns. There is no
//! history; a handler subscribed after a publish does not see it.

use std::sync::Arc;

use parking_lot::Mutex;

type Handler = Arc<dyn Fn(bool) + Send + Sync>;

struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

/// Process-wide broadcast of authenticated/unauthenticated transitions.
#[derive(Clone)]
pub struct AuthEventBus {
    registry: Arc<Mutex<Registry>>,
}

impl AuthEventBus {
    pub fn new() -> Self {
        Self { registry: Arc::new(Mutex::new(Registry { next_id: 0, handlers: Vec::new() })) }
    }

    /// Register a handler for future publishes.
    ///
    /// The returned token removes the handler when
    /// [`AuthSubscription::unsubscribe`] is called; after that the handler
    /// is guaranteed to receive no further publishes. Dropping the token
    /// without calling it leaves the handler subscribed.
    pub fn subscribe<F>(&self, handler: F) -> AuthSubscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.handlers.push((id, Arc::new(handler)));
        AuthSubscription { id, registry: Arc::clone(&self.registry) }
    }

    /// Invoke every currently subscribed handler with the latest flag.
    ///
    /// The subscriber list is snapshotted on entry, so a handler that
    /// subscribes or unsubscribes from inside a callback takes effect on
    /// the next publish.
    pub fn publish(&self, authenticated: bool) {
        let snapshot: Vec<Handler> =
            self.registry.lock().handlers.iter().map(|(_, h)| Arc::clone(h)).collect();
        for handler in snapshot {
            handler(authenticated);
        }
    }

    /// Number of currently subscribed handlers.
    pub fn subscriber_count(&self) -> usize {
        self.registry.lock().handlers.len()
    }
}

impl Default for AuthEventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Token returned by [`AuthEventBus::subscribe`].
pub struct AuthSubscription {
    id: u64,
    registry: Arc<Mutex<Registry>>,
}

impl AuthSubscription {
    /// Remove the handler. No further publishes reach it.
    pub fn unsubscribe(self) {
        self.registry.lock().handlers.retain(|(id, _)| *id != self.id);
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
