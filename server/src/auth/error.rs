//! Authentication error taxonomy.
//!
//! Every failure of login, issuance, or gatekeeping maps to exactly one
//! variant. Messages are safe to return to callers: they never include the
//! signing secret, the submitted password, or signature bytes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Error returned by the credential verifier, token service and
/// gatekeeping filter.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// Submitted username/password did not match the configured principal.
    #[error("Please provide valid login details")]
    InvalidCredentials,
    /// The signing secret is missing or the token could not be encoded.
    #[error("token signing failed")]
    SigningFailure,
    /// The token could not be decoded into header, claims and signature.
    #[error("malformed token")]
    Malformed,
    /// The token signature does not verify under the configured secret.
    #[error("invalid token signature")]
    BadSignature,
    /// The token's expiry instant has passed.
    #[error("token has expired")]
    Expired,
    /// The request carried no `Authorization: Bearer <token>` header.
    #[error("missing bearer token")]
    MissingToken,
}

impl AuthError {
    /// HTTP status reported for this error.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::SigningFailure => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidCredentials
            | Self::Malformed
            | Self::BadSignature
            | Self::Expired
            | Self::MissingToken => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_string())).into_response()
    }
}
