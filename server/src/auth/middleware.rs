//! Gatekeeping filter for protected routes.
//!
//! Runs before the handler of every protected route:
//! 1. Extracts the token from `Authorization: Bearer <token>`.
//! 2. Validates it with the `TokenService`.
//! 3. On success inserts `AuthenticatedPrincipal` into the request extensions
//!    and forwards; on failure responds 401 without calling the handler.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthError, Principal, TokenService};

/// Authorization scheme prefix, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// The principal a request was authenticated as.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal(pub Principal);

/// Extract the raw bearer token from the request headers.
///
/// # Errors
/// Returns `AuthError::MissingToken` if the header is absent, not valid
/// ASCII, or does not use the `Bearer` scheme.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthError::MissingToken)
}

/// Middleware rejecting requests without a valid bearer token.
pub async fn require_bearer(
    State(tokens): State<Arc<TokenService>>,
    mut request: Request,
    next: Next,
) -> Response {
    let outcome = bearer_token(request.headers()).and_then(|raw| tokens.validate(raw));

    match outcome {
        Ok(principal) => {
            tracing::debug!(principal = %principal, "request authenticated");
            request
                .extensions_mut()
                .insert(AuthenticatedPrincipal(principal));
            next.run(request).await
        }
        Err(error) => {
            tracing::debug!(
                method = %request.method(),
                path = request.uri().path(),
                ?error,
                "rejected unauthenticated request"
            );
            error.into_response()
        }
    }
}
