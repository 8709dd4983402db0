//! Test that the bearer middleware short-circuits before the handler.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Extension, Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware,
    routing::get,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::{AuthenticatedPrincipal, require_bearer};
use crate::e2e_tests::helpers::*;

/// A protected route whose handler counts its invocations.
#[allow(clippy::disallowed_methods)]
fn counting_router(app: &TestApp, calls: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route("/protected", get(counted_handler))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&app.state.tokens),
            require_bearer,
        ))
        .with_state(calls)
}

async fn counted_handler(
    State(calls): State<Arc<AtomicUsize>>,
    Extension(AuthenticatedPrincipal(principal)): Extension<AuthenticatedPrincipal>,
) -> String {
    calls.fetch_add(1, Ordering::SeqCst);
    principal.to_string()
}

async fn call(router: &Router, authorization: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri("/protected");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let request = builder.body(Body::empty()).expect("valid request");
    let response = router.clone().oneshot(request).await.expect("infallible");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        Value::String(String::from_utf8_lossy(&bytes).into_owned())
    });
    (status, body)
}

#[tokio::test]
#[allow(clippy::disallowed_methods)]
async fn test_rejected_requests_never_reach_handler() {
    let app = TestApp::with_ttl(Duration::from_secs(60));
    let calls = Arc::new(AtomicUsize::new(0));
    let router = counting_router(&app, Arc::clone(&calls));
    let token = app.login().await;

    let cases = [
        (None, "missing bearer token"),
        (Some("Basic YWxpY2U6czNjcmV0".to_string()), "missing bearer token"),
        (Some(token.clone()), "missing bearer token"),
        (Some("Bearer ".to_string()), "malformed token"),
        (Some("Bearer not.a.jwt".to_string()), "malformed token"),
    ];
    for (authorization, message) in cases {
        let (status, body) = call(&router, authorization.as_deref()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{authorization:?}");
        assert_eq!(body, Value::from(message), "{authorization:?}");
    }

    let (status, body) = call(&router, Some(&format!("Bearer {}", alter_last_char(&token)))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(
        body == Value::from("invalid token signature") || body == Value::from("malformed token"),
        "unexpected body {body}"
    );

    app.clock.advance(Duration::from_secs(60));
    let (status, body) = call(&router, Some(&format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, Value::from("token has expired"));

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
#[allow(clippy::disallowed_methods)]
async fn test_each_authenticated_request_invokes_handler_once() {
    let app = TestApp::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let router = counting_router(&app, Arc::clone(&calls));
    let token = app.login().await;

    for expected in 1..=3 {
        let (status, body) = call(&router, Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::from("alice"));
        assert_eq!(calls.load(Ordering::SeqCst), expected);
    }
}
