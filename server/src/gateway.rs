//! Identity provider client.
//!
//! DESIGN
//! ======
//! The provider is an external HTTP service rooted at `AUTH_BASE_URL`. This
//! module forwards the browser's cookies, decodes the JSON replies, and hands
//! back any `Set-Cookie` headers for the proxy to relay. Parsing is split
//! into [`parse_reply`] so it can be tested without a network.

use std::time::Duration;

use async_trait::async_trait;
use client::net::types::{AuthError, Session, SignInCredentials, SignUpRequest};
use reqwest::header::{COOKIE, SET_COOKIE};
use serde::Serialize;

use crate::config::Config;

pub const SIGN_IN_PATH: &str = "sign-in/email";
pub const SIGN_UP_PATH: &str = "sign-up/email";
pub const SIGN_OUT_PATH: &str = "sign-out";
pub const SESSION_PATH: &str = "get-session";
const CONNECT_TIMEOUT_SECS: u64 = 5;

// =============================================================================
// TYPES
// =============================================================================

/// Failures reaching or understanding the provider.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("provider request failed: {0}")]
    Request(String),

    #[error("provider response parse failed (status {status}): {message}")]
    Parse { status: u16, message: String },

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// A provider answer: status, decoded outcome, and cookies to relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReply<T> {
    pub status: u16,
    pub result: Result<T, AuthError>,
    pub set_cookies: Vec<String>,
}

impl<T> ProviderReply<T> {
    #[must_use]
    pub fn ok(value: T) -> Self {
        Self { status: 200, result: Ok(value), set_cookies: Vec::new() }
    }

    #[must_use]
    pub fn rejected(status: u16, error: AuthError) -> Self {
        Self { status, result: Err(error), set_cookies: Vec::new() }
    }

    #[must_use]
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.set_cookies.push(cookie.into());
        self
    }

    /// Transform the success value, keeping status and cookies.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ProviderReply<U> {
        ProviderReply { status: self.status, result: self.result.map(f), set_cookies: self.set_cookies }
    }
}

/// The provider operations the server relies on.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(
        &self,
        credentials: &SignInCredentials,
        cookie: Option<&str>,
    ) -> Result<ProviderReply<Session>, GatewayError>;

    async fn sign_up(&self, request: &SignUpRequest, cookie: Option<&str>) -> Result<ProviderReply<Session>, GatewayError>;

    async fn sign_out(&self, cookie: Option<&str>) -> Result<ProviderReply<()>, GatewayError>;

    /// Look up the session carried by `cookie`. A signed-out caller yields
    /// `Ok(None)` inside the reply.
    async fn get_session(&self, cookie: Option<&str>) -> Result<ProviderReply<Option<Session>>, GatewayError>;
}

// =============================================================================
// PARSING
// =============================================================================

/// Decode a provider response body.
///
/// 2xx bodies go through `decode`; anything else becomes an [`AuthError`],
/// using the body's message when present.
///
/// # Errors
///
/// Returns [`GatewayError::Parse`] when a 2xx body cannot be decoded.
pub fn parse_reply<T>(
    status: u16,
    set_cookies: Vec<String>,
    body: &str,
    decode: impl FnOnce(&str) -> Result<T, serde_json::Error>,
) -> Result<ProviderReply<T>, GatewayError> {
    let result = if (200..300).contains(&status) {
        Ok(decode(body).map_err(|e| GatewayError::Parse { status, message: e.to_string() })?)
    } else {
        Err(rejection_from_body(status, body))
    };
    Ok(ProviderReply { status, result, set_cookies })
}

fn rejection_from_body(status: u16, body: &str) -> AuthError {
    match serde_json::from_str::<AuthError>(body) {
        Ok(error) if !error.message.trim().is_empty() => error,
        Ok(error) => AuthError { code: error.code, message: format!("authentication failed: {status}") },
        Err(_) => AuthError::new(format!("authentication failed: {status}")),
    }
}

fn decode_session(body: &str) -> Result<Session, serde_json::Error> {
    serde_json::from_str(body)
}

fn decode_optional_session(body: &str) -> Result<Option<Session>, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
}

#[allow(clippy::unnecessary_wraps)]
fn decode_nothing(_body: &str) -> Result<(), serde_json::Error> {
    Ok(())
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// [`IdentityProvider`] over HTTP.
pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
}

impl HttpIdentityProvider {
    /// # Errors
    ///
    /// Returns [`GatewayError::HttpClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.auth_request_timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| GatewayError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.auth_base_url.clone() })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn send<T>(
        &self,
        request: reqwest::RequestBuilder,
        cookie: Option<&str>,
        decode: impl FnOnce(&str) -> Result<T, serde_json::Error>,
    ) -> Result<ProviderReply<T>, GatewayError> {
        let request = match cookie {
            Some(cookie) => request.header(COOKIE, cookie),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_owned)
            .collect();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        parse_reply(status, set_cookies, &body, decode)
    }

    async fn post_json<B: Serialize + Sync, T>(
        &self,
        path: &str,
        body: &B,
        cookie: Option<&str>,
        decode: impl FnOnce(&str) -> Result<T, serde_json::Error>,
    ) -> Result<ProviderReply<T>, GatewayError> {
        let request = self.http.post(self.endpoint(path)).json(body);
        self.send(request, cookie, decode).await
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(
        &self,
        credentials: &SignInCredentials,
        cookie: Option<&str>,
    ) -> Result<ProviderReply<Session>, GatewayError> {
        self.post_json(SIGN_IN_PATH, credentials, cookie, decode_session)
            .await
    }

    async fn sign_up(&self, request: &SignUpRequest, cookie: Option<&str>) -> Result<ProviderReply<Session>, GatewayError> {
        self.post_json(SIGN_UP_PATH, request, cookie, decode_session)
            .await
    }

    async fn sign_out(&self, cookie: Option<&str>) -> Result<ProviderReply<()>, GatewayError> {
        let request = self.http.post(self.endpoint(SIGN_OUT_PATH)).json(&serde_json::json!({}));
        self.send(request, cookie, decode_nothing).await
    }

    async fn get_session(&self, cookie: Option<&str>) -> Result<ProviderReply<Option<Session>>, GatewayError> {
        let request = self.http.get(self.endpoint(SESSION_PATH));
        self.send(request, cookie, decode_optional_session)
            .await
    }
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;
