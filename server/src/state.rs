use std::sync::Arc;

use crate::auth::{AuthError, CredentialVerifier, Principal, TokenService};
use crate::config::ServerConfig;
use crate::posts::{InMemoryPostRepository, PostRepository};

/// Shared, read-only application state handed to every handler.
#[derive(Clone)]
#[allow(clippy::disallowed_methods)] // Arc::clone is safe and expected for shared state
pub struct AppState {
    pub verifier: Arc<CredentialVerifier>,
    pub tokens: Arc<TokenService>,
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the state from startup configuration.
    ///
    /// # Errors
    /// Returns `AuthError::SigningFailure` if the signing secret is unusable,
    /// so a misconfigured process fails before serving requests.
    pub fn from_config(config: &ServerConfig) -> Result<Self, AuthError> {
        let tokens = Arc::new(TokenService::new(
            config.jwt_secret.as_bytes(),
            config.token_ttl,
        )?);
        Ok(Self::new(
            config.username.clone(),
            config.password.clone(),
            tokens,
            Arc::new(InMemoryPostRepository::new()),
        ))
    }

    #[must_use]
    #[allow(clippy::disallowed_methods)]
    pub fn new(
        principal: Principal,
        password: String,
        tokens: Arc<TokenService>,
        posts: Arc<dyn PostRepository>,
    ) -> Self {
        let verifier = Arc::new(CredentialVerifier::new(
            principal,
            password,
            Arc::clone(&tokens),
        ));
        Self {
            verifier,
            tokens,
            posts,
        }
    }
}
