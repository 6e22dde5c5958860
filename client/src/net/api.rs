//! Browser-side auth gateway talking to the server's `/api/auth/*` proxy.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs, since forms and session lookups only run in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure comes back as an [`AuthError`] whose message is fit for the
//! form's root error banner.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::gateway::AuthGateway;
use super::types::{AuthError, Session, SignInCredentials, SignUpCredentials};
#[cfg(feature = "hydrate")]
use super::types::SignUpRequest;

pub const SIGN_IN_ENDPOINT: &str = "/api/auth/sign-in/email";
pub const SIGN_UP_ENDPOINT: &str = "/api/auth/sign-up/email";
pub const SIGN_OUT_ENDPOINT: &str = "/api/auth/sign-out";
pub const SESSION_ENDPOINT: &str = "/api/auth/get-session";

/// Build the error for a non-OK response, preferring the body's message.
#[cfg(any(test, feature = "hydrate"))]
fn error_from_response(action: &str, status: u16, body: &str) -> AuthError {
    match serde_json::from_str::<AuthError>(body) {
        Ok(error) if !error.message.trim().is_empty() => error,
        Ok(error) => AuthError { code: error.code, message: failed_message(action, status) },
        Err(_) => AuthError::new(failed_message(action, status)),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn failed_message(action: &str, status: u16) -> String {
    format!("{action} failed: {status}")
}

#[cfg(feature = "hydrate")]
async fn post_for_session<B: serde::Serialize>(action: &str, url: &str, body: &B) -> Result<Session, AuthError> {
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| AuthError::new(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthError::new(e.to_string()))?;
    if !resp.ok() {
        let text = resp.text().await.unwrap_or_default();
        return Err(error_from_response(action, resp.status(), &text));
    }
    resp.json::<Session>()
        .await
        .map_err(|e| AuthError::new(e.to_string()))
}

/// Gateway used by hydrated pages.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserGateway;

impl AuthGateway for BrowserGateway {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<Session, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            post_for_session("sign in", SIGN_IN_ENDPOINT, credentials).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            Err(AuthError::new("not available on server"))
        }
    }

    async fn sign_up(&self, credentials: &SignUpCredentials, callback_target: &str) -> Result<Session, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let body = SignUpRequest { credentials: credentials.clone(), callback_url: Some(callback_target.to_owned()) };
            post_for_session("sign up", SIGN_UP_ENDPOINT, &body).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (credentials, callback_target);
            Err(AuthError::new("not available on server"))
        }
    }

    async fn sign_out(&self) {
        #[cfg(feature = "hydrate")]
        {
            match gloo_net::http::Request::post(SIGN_OUT_ENDPOINT).send().await {
                Ok(resp) if !resp.ok() => log::warn!("sign out failed: {}", resp.status()),
                Ok(_) => {}
                Err(e) => log::warn!("sign out request failed: {e}"),
            }
        }
    }

    async fn current_session(&self) -> Option<Session> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::get(SESSION_ENDPOINT)
                .send()
                .await
                .ok()?;
            if !resp.ok() {
                return None;
            }
            resp.json::<Option<Session>>().await.ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }
}
