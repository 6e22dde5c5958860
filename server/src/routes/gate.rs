//! Page-entry session gate.
//!
//! Runs in front of the Leptos page routes. Signed-in visitors asking for an
//! auth form get a redirect home before any rendering happens. Everything
//! else passes through untouched.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use client::util::auth::{PageAccess, PageEntry, PageRoute, entry_decision};

use super::auth::forwarded_cookie_header;
use crate::state::AppState;

/// Middleware: redirect authenticated users away from `/sign-in` and `/sign-up`.
pub async fn redirect_authenticated(State(state): State<AppState>, jar: CookieJar, request: Request, next: Next) -> Response {
    let Some(route) = PageRoute::from_path(request.uri().path()) else {
        return next.run(request).await;
    };
    if !route.redirects_when_authenticated() {
        return next.run(request).await;
    }

    let access = page_access(&state, &jar, request.headers()).await;
    match entry_decision(route, access) {
        PageEntry::Redirect(to) => {
            tracing::debug!(path = route.path(), to, "authenticated visitor redirected");
            Redirect::temporary(to).into_response()
        }
        PageEntry::Render => next.run(request).await,
    }
}

/// Resolve session presence once for this request.
///
/// No cookies means no session, without a provider round trip. Provider
/// failures render the page as signed out.
async fn page_access(state: &AppState, jar: &CookieJar, headers: &HeaderMap) -> PageAccess {
    let Some(cookie) = forwarded_cookie_header(jar, headers) else {
        return PageAccess::Unauthenticated;
    };
    match state.provider.get_session(Some(&cookie)).await {
        Ok(reply) => PageAccess::from_session(reply.result.ok().flatten().as_ref()),
        Err(e) => {
            tracing::warn!(error = %e, "session lookup failed; treating visitor as signed out");
            PageAccess::Unauthenticated
        }
    }
}

#[cfg(test)]
#[path = "gate_test.rs"]
mod tests;
