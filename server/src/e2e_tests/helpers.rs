//! Common helpers for end-to-end tests.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::auth::DEFAULT_TOKEN_TTL;
use crate::state::AppState;
use crate::testing::{ManualTimeSource, TEST_PASSWORD, TEST_USERNAME, new_test_state};

/// Fixed starting instant for the manual clock.
pub const START_SECS: u64 = 1_700_000_000;

/// A full router over fresh state and a manual clock.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<ManualTimeSource>,
}

impl TestApp {
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TOKEN_TTL)
    }

    #[must_use]
    #[allow(clippy::disallowed_methods)]
    pub fn with_ttl(ttl: Duration) -> Self {
        let clock = Arc::new(ManualTimeSource::new(START_SECS));
        let state = new_test_state(ttl, Arc::clone(&clock));
        let router = crate::router(state.clone());
        Self {
            router,
            state,
            clock,
        }
    }

    /// Send a request and return the status and decoded JSON body
    /// (`Value::Null` for an empty body).
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        bearer: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        #[allow(clippy::expect_used)]
        let request = builder.body(body).expect("valid request");
        self.send_request(request).await
    }

    /// Send a pre-built request.
    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        #[allow(clippy::expect_used)]
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        #[allow(clippy::expect_used)]
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            #[allow(clippy::expect_used)]
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, json)
    }

    /// Log in as the configured principal and return the token.
    pub async fn login(&self) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/login",
                None,
                Some(json!({ "username": TEST_USERNAME, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");

        #[allow(clippy::expect_used)]
        body.as_str().expect("token is a JSON string").to_string()
    }

    /// Create a post and return `true` on success.
    pub async fn create_post(&self, token: &str, title: &str, category_id: i64) -> StatusCode {
        let (status, _) = self
            .send(
                "POST",
                "/posts",
                Some(token),
                Some(json!({ "Title": title, "Body": format!("{title} body"), "CategoryID": category_id })),
            )
            .await;
        status
    }
}

/// Replace the last character of `token` with a different base64url character.
#[must_use]
pub fn alter_last_char(token: &str) -> String {
    let mut altered = token.to_string();
    let last = altered.pop().unwrap_or('A');
    altered.push(if last == 'A' { 'B' } else { 'A' });
    altered
}
