//! Auth proxy routes: the browser's `/api/auth/*` surface.
//!
//! Each handler forwards the caller's cookies to the identity provider and
//! relays the provider's status, JSON body, and `Set-Cookie` headers. Sign-in
//! and sign-up bodies are checked against the same schemas the forms use
//! before anything leaves the server.

use axum::Json;
use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use client::net::types::{AuthError, SignInCredentials, SignUpRequest};
use client::util::validation::{FieldErrors, FormSchema, SignInInput, SignUpInput};
use serde::Serialize;

use crate::gateway::{GatewayError, ProviderReply};
use crate::state::AppState;

pub const VALIDATION_ERROR_CODE: &str = "VALIDATION_ERROR";
pub const PROVIDER_UNAVAILABLE_MESSAGE: &str = "Authentication service unavailable";

/// The caller's `Cookie` header(s), byte for byte, joined with `"; "`.
///
/// `None` when the jar holds no cookies. Values are forwarded as sent: the
/// jar decodes percent escapes, so it is only used to detect presence.
pub(crate) fn forwarded_cookie_header(jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    jar.iter().next()?;
    let header = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    if header.is_empty() { None } else { Some(header) }
}

fn validation_rejection<F: Copy + Eq>(errors: &FieldErrors<F>) -> Response {
    let message = errors
        .first()
        .map_or("Invalid request", |(_, message)| message);
    (StatusCode::BAD_REQUEST, Json(AuthError::with_code(VALIDATION_ERROR_CODE, message))).into_response()
}

fn provider_unavailable(action: &str, err: &GatewayError) -> Response {
    tracing::error!(error = %err, action, "identity provider call failed");
    (StatusCode::BAD_GATEWAY, Json(AuthError::new(PROVIDER_UNAVAILABLE_MESSAGE))).into_response()
}

/// Turn a provider reply into a response, relaying its cookies.
fn relay<T: Serialize>(action: &str, reply: ProviderReply<T>) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut response = match reply.result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => {
            tracing::info!(status = reply.status, action, message = %error.message, "identity provider rejected request");
            (status, Json(error)).into_response()
        }
    };
    for cookie in reply.set_cookies {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(_) => tracing::warn!(action, "dropping unrepresentable Set-Cookie from provider"),
        }
    }
    response
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/sign-in/email`
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(credentials): Json<SignInCredentials>,
) -> Response {
    if let Err(errors) = SignInInput::from(&credentials).validate() {
        return validation_rejection(&errors);
    }
    let cookie = forwarded_cookie_header(&jar, &headers);
    match state.provider.sign_in(&credentials, cookie.as_deref()).await {
        Ok(reply) => relay("sign_in", reply),
        Err(e) => provider_unavailable("sign_in", &e),
    }
}

/// `POST /api/auth/sign-up/email`
pub async fn sign_up(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Json(request): Json<SignUpRequest>,
) -> Response {
    if let Err(errors) = SignUpInput::from(&request.credentials).validate() {
        return validation_rejection(&errors);
    }
    let cookie = forwarded_cookie_header(&jar, &headers);
    match state.provider.sign_up(&request, cookie.as_deref()).await {
        Ok(reply) => relay("sign_up", reply),
        Err(e) => provider_unavailable("sign_up", &e),
    }
}

/// `POST /api/auth/sign-out`
pub async fn sign_out(State(state): State<AppState>, jar: CookieJar, headers: HeaderMap) -> Response {
    let cookie = forwarded_cookie_header(&jar, &headers);
    match state.provider.sign_out(cookie.as_deref()).await {
        Ok(reply) => relay("sign_out", reply.map(|()| serde_json::json!({ "success": true }))),
        Err(e) => provider_unavailable("sign_out", &e),
    }
}

/// `GET /api/auth/get-session`: session JSON, or `null` when signed out.
pub async fn get_session(State(state): State<AppState>, jar: CookieJar, headers: HeaderMap) -> Response {
    let Some(cookie) = forwarded_cookie_header(&jar, &headers) else {
        return Json(serde_json::Value::Null).into_response();
    };
    match state.provider.get_session(Some(&cookie)).await {
        Ok(reply) => relay("get_session", reply),
        Err(e) => provider_unavailable("get_session", &e),
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
