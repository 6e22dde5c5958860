//! Session store with explicit subscribe/unsubscribe.
//!
//! SYSTEM CONTEXT
//! ==============
//! One store is provided via context by the root `App`. Pages subscribe on
//! mount and unsubscribe in `on_cleanup`. Whoever learns about a session change
//! (session fetch, sign-out) calls [`SessionStore::set`]; subscribers only hear
//! about changes in presence or identity.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::net::types::Session;

/// Handle returned by [`SessionStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(Option<&Session>) + Send + Sync>;

#[derive(Default)]
struct Inner {
    current: Option<Session>,
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

/// Shared, cloneable handle to the current session.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.lock().current.clone()
    }

    /// Register `listener` for future session changes.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(Option<&Session>) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|(existing, _)| *existing != id);
        inner.listeners.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Replace the current session and notify listeners if it changed.
    ///
    /// Returns whether a change was observed.
    pub fn set(&self, session: Option<Session>) -> bool {
        let listeners = {
            let mut inner = self.lock();
            if inner.current == session {
                return false;
            }
            inner.current = session.clone();
            inner
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect::<Vec<_>>()
        };
        // Listeners run unlocked so they may call back into the store.
        for listener in listeners {
            listener(session.as_ref());
        }
        true
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("SessionStore")
            .field("current", &inner.current)
            .field("subscribers", &inner.listeners.len())
            .finish()
    }
}
