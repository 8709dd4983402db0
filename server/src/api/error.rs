//! Errors returned by HTTP handlers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;
use crate::posts::{PageError, RepositoryError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body was not the expected JSON document.
    #[error("Invalid json provided")]
    InvalidJson,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Page(#[from] PageError),
    #[error("{0}")]
    NotFound(&'static str),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidJson => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(self.to_string())).into_response()
            }
            Self::Auth(error) => error.into_response(),
            Self::Page(error) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "message": error.to_string() })))
                    .into_response()
            }
            Self::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            Self::Repository(error) => {
                tracing::error!("post store failure: {error}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
