//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The home page keeps an `RwSignal<AuthState>` fed by the session store and
//! renders from it. `loading` stays set until the first session lookup
//! resolves.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::Session;

/// Authentication state tracking the current session and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl AuthState {
    /// State before the first session lookup has resolved.
    #[must_use]
    pub fn pending() -> Self {
        Self { session: None, loading: true }
    }

    /// Record a resolved lookup or a store notification.
    pub fn resolve(&mut self, session: Option<Session>) {
        self.session = session;
        self.loading = false;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}
