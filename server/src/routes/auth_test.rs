use axum::body::Body;
use axum::http::Request;
use client::net::types::Session;
use tower::ServiceExt;

use super::*;
use crate::routes::api_routes;
use crate::state::test_helpers::{FakeProvider, test_app_state};

// =============================================================================
// Helpers
// =============================================================================

fn post_json(uri: &str, body: &serde_json::Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

// =============================================================================
// forwarded_cookie_header
// =============================================================================

fn cookie_headers(values: &[&'static str]) -> axum::http::HeaderMap {
    let mut headers = axum::http::HeaderMap::new();
    for &value in values {
        headers.append("cookie", HeaderValue::from_static(value));
    }
    headers
}

#[test]
fn forwarded_cookie_header_empty_jar_is_none() {
    let headers = axum::http::HeaderMap::new();
    assert_eq!(forwarded_cookie_header(&CookieJar::from_headers(&headers), &headers), None);
}

#[test]
fn forwarded_cookie_header_keeps_bytes_and_order() {
    let headers = cookie_headers(&["better-auth.session_token=tok.sig%2Bab%3D%3D; pref=a%3Bb"]);
    let jar = CookieJar::from_headers(&headers);
    assert_eq!(
        forwarded_cookie_header(&jar, &headers).as_deref(),
        Some("better-auth.session_token=tok.sig%2Bab%3D%3D; pref=a%3Bb")
    );
}

#[test]
fn forwarded_cookie_header_joins_repeated_headers() {
    let headers = cookie_headers(&["a=1", "b=2%25"]);
    let jar = CookieJar::from_headers(&headers);
    assert_eq!(forwarded_cookie_header(&jar, &headers).as_deref(), Some("a=1; b=2%25"));
}

// =============================================================================
// sign-in
// =============================================================================

#[tokio::test]
async fn sign_in_success_relays_session_and_cookie() {
    let mut provider = FakeProvider::signed_in("Ada", "ada@example.com");
    provider.set_cookie = Some("better-auth.session_token=tok; Path=/; HttpOnly".to_owned());
    let (state, provider) = test_app_state(provider);

    let body = serde_json::json!({"email": "ada@example.com", "password": "hunter2"});
    let response = api_routes(state)
        .oneshot(post_json("/api/auth/sign-in/email", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(set_cookies(&response), vec!["better-auth.session_token=tok; Path=/; HttpOnly".to_owned()]);
    let session: Session = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(session.user.email, "ada@example.com");
    assert_eq!(provider.calls(), vec!["sign_in ada@example.com cookie=None".to_owned()]);
}

#[tokio::test]
async fn sign_in_rejection_relays_status_and_message() {
    let provider = FakeProvider {
        rejection: Some((401, AuthError::with_code("INVALID_EMAIL_OR_PASSWORD", "Invalid credentials"))),
        ..FakeProvider::default()
    };
    let (state, _) = test_app_state(provider);

    let body = serde_json::json!({"email": "ada@example.com", "password": "wrong"});
    let response = api_routes(state)
        .oneshot(post_json("/api/auth/sign-in/email", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid credentials");
    assert_eq!(json["code"], "INVALID_EMAIL_OR_PASSWORD");
}

#[tokio::test]
async fn sign_in_with_empty_password_never_reaches_provider() {
    let (state, provider) = test_app_state(FakeProvider::signed_in("Ada", "ada@example.com"));

    let body = serde_json::json!({"email": "ada@example.com", "password": ""});
    let response = api_routes(state)
        .oneshot(post_json("/api/auth/sign-in/email", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Password is required");
    assert_eq!(json["code"], VALIDATION_ERROR_CODE);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn sign_in_provider_unreachable_is_bad_gateway() {
    let provider = FakeProvider { unreachable: true, ..FakeProvider::default() };
    let (state, _) = test_app_state(provider);

    let body = serde_json::json!({"email": "ada@example.com", "password": "hunter2"});
    let response = api_routes(state)
        .oneshot(post_json("/api/auth/sign-in/email", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["message"], PROVIDER_UNAVAILABLE_MESSAGE);
}

// =============================================================================
// sign-up
// =============================================================================

#[tokio::test]
async fn sign_up_forwards_callback_target() {
    let (state, provider) = test_app_state(FakeProvider::signed_in("Ada", "ada@example.com"));

    let body = serde_json::json!({"name": "Ada", "email": "ada@example.com", "password": "secret1", "callbackURL": "/"});
    let response = api_routes(state)
        .oneshot(post_json("/api/auth/sign-up/email", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(provider.calls(), vec!["sign_up ada@example.com callback=Some(\"/\") cookie=None".to_owned()]);
}

#[tokio::test]
async fn sign_up_short_password_is_rejected_locally() {
    let (state, provider) = test_app_state(FakeProvider::signed_in("Ada", "ada@example.com"));

    let body = serde_json::json!({"name": "Ada", "email": "ada@example.com", "password": "12345"});
    let response = api_routes(state)
        .oneshot(post_json("/api/auth/sign-up/email", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Password must be at least 6 characters long");
    assert!(provider.calls().is_empty());
}

// =============================================================================
// sign-out + get-session
// =============================================================================

#[tokio::test]
async fn sign_out_forwards_cookie_and_relays_clear() {
    let mut provider = FakeProvider::default();
    provider.set_cookie = Some("better-auth.session_token=; Max-Age=0; Path=/".to_owned());
    let (state, provider) = test_app_state(provider);

    let response = api_routes(state)
        .oneshot(post_json("/api/auth/sign-out", &serde_json::json!({}), Some("better-auth.session_token=tok")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(set_cookies(&response).len(), 1);
    assert_eq!(body_json(response).await, serde_json::json!({"success": true}));
    assert_eq!(provider.calls(), vec!["sign_out cookie=Some(\"better-auth.session_token=tok\")".to_owned()]);
}

#[tokio::test]
async fn get_session_without_cookie_is_null_and_skips_provider() {
    let (state, provider) = test_app_state(FakeProvider::signed_in("Ada", "ada@example.com"));

    let request = Request::builder()
        .uri("/api/auth/get-session")
        .body(Body::empty())
        .unwrap();
    let response = api_routes(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::Value::Null);
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn get_session_forwards_encoded_cookie_verbatim() {
    let (state, provider) = test_app_state(FakeProvider::signed_in("Ada", "ada@example.com"));

    let request = Request::builder()
        .uri("/api/auth/get-session")
        .header("cookie", "better-auth.session_token=tok.sig%2Bab%3D%3D; pref=a%3Bb")
        .body(Body::empty())
        .unwrap();
    let response = api_routes(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        provider.calls(),
        vec!["get_session cookie=Some(\"better-auth.session_token=tok.sig%2Bab%3D%3D; pref=a%3Bb\")".to_owned()]
    );
}

#[tokio::test]
async fn get_session_with_cookie_returns_session() {
    let (state, _) = test_app_state(FakeProvider::signed_in("Ada", "ada@example.com"));

    let request = Request::builder()
        .uri("/api/auth/get-session")
        .header("cookie", "better-auth.session_token=tok")
        .body(Body::empty())
        .unwrap();
    let response = api_routes(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["name"], "Ada");
}

#[tokio::test]
async fn healthz_is_ok() {
    let (state, _) = test_app_state(FakeProvider::default());
    let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let response = api_routes(state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
