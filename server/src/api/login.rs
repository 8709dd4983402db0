use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use super::{ApiError, body::json_object};
use crate::auth::{Credentials, Token};
use crate::state::AppState;

/// `POST /login`: exchange the principal's credentials for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Token>, ApiError> {
    let credentials: Credentials = json_object(body)?;

    match state
        .verifier
        .authenticate(&credentials.username, &credentials.password)
    {
        Ok(token) => {
            tracing::info!(username = %credentials.username, "login succeeded");
            Ok(Json(token))
        }
        Err(error) => {
            tracing::warn!(username = %credentials.username, ?error, "login failed");
            Err(error.into())
        }
    }
}
