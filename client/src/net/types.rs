//! Wire types shared by the browser, the server proxy, and the identity provider.
//!
//! DESIGN
//! ======
//! The provider owns sessions. These types only carry what the pages read
//! (presence, `user.name`, `user.email`) plus the credential payloads sent on
//! sign-in and sign-up. Unknown provider fields are ignored on decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Identity fields exposed by the provider for the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Provider-assigned user id, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name supplied at sign-up.
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

/// An authenticated session as reported by the provider.
///
/// Decodes both the `get-session` shape (`{session, user}`) and the sign-in /
/// sign-up shape (`{token, user, ...}`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
}

impl Session {
    /// Name to greet the user with: the display name, falling back to email.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user
            .name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.user.email)
    }
}

/// A provider rejection or failure, as carried in JSON error bodies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl AuthError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { code: None, message: message.into() }
    }

    #[must_use]
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: Some(code.into()), message: message.into() }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validated sign-in payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInCredentials {
    pub email: String,
    pub password: String,
}

/// Validated sign-up payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpCredentials {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign-up body as sent to the provider, carrying the post-verification target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignUpRequest {
    #[serde(flatten)]
    pub credentials: SignUpCredentials,
    #[serde(rename = "callbackURL", default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
}
