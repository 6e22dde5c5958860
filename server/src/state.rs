//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers and middleware via the `State`
//! extractor. It only holds the identity provider: sessions, users, and
//! credentials all live on the provider side.

use std::sync::Arc;

use crate::gateway::IdentityProvider;

/// Shared application state. Clone is required by Axum.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn IdentityProvider>,
}

impl AppState {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self { provider }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
