//! Auth gateway boundary used by forms and pages.
//!
//! The identity provider is opaque: these calls are the whole surface the UI
//! relies on. [`crate::net::api::BrowserGateway`] is the browser
//! implementation; tests substitute their own.

use super::types::{AuthError, Session, SignInCredentials, SignUpCredentials};

/// Calls into the external identity provider.
#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns the provider's rejection (for example invalid credentials) or a
    /// transport failure rendered as an [`AuthError`].
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<Session, AuthError>;

    /// Create an account. `callback_target` is forwarded to the provider as the
    /// post-verification redirect.
    ///
    /// # Errors
    ///
    /// Returns the provider's rejection (for example an existing account) or a
    /// transport failure rendered as an [`AuthError`].
    async fn sign_up(&self, credentials: &SignUpCredentials, callback_target: &str) -> Result<Session, AuthError>;

    async fn sign_out(&self);

    /// Current session, or `None` when signed out or unreachable.
    async fn current_session(&self) -> Option<Session>;
}
