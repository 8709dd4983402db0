//! Username/password verification against the single configured principal.
//!
//! # Invariants
//! - The configured principal is immutable for the lifetime of the verifier.
//! - A failed login never reveals which field was wrong.

use std::sync::Arc;

use serde::Deserialize;
use subtle::ConstantTimeEq;

use super::{AuthError, Principal, Token, TokenService};

/// Login request body.
#[derive(Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Never print the submitted password.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Checks credentials and issues a token on success.
pub struct CredentialVerifier {
    principal: Principal,
    password: String,
    tokens: Arc<TokenService>,
}

impl CredentialVerifier {
    #[must_use]
    pub const fn new(principal: Principal, password: String, tokens: Arc<TokenService>) -> Self {
        Self {
            principal,
            password,
            tokens,
        }
    }

    #[must_use]
    pub const fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Authenticate `username`/`password` and issue a token for the principal.
    ///
    /// # Errors
    /// - `AuthError::InvalidCredentials` unless both fields match exactly.
    /// - `AuthError::SigningFailure` if token issuance fails.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Token, AuthError> {
        // Evaluate both comparisons so timing does not reveal which one failed.
        let username_matches = constant_time_eq(username, self.principal.as_str());
        let password_matches = constant_time_eq(password, &self.password);

        if !(username_matches & password_matches) {
            return Err(AuthError::InvalidCredentials);
        }

        self.tokens.issue(&self.principal)
    }
}

impl std::fmt::Debug for CredentialVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVerifier")
            .field("principal", &self.principal)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Constant-time string comparison. Slices of different lengths compare
/// unequal.
fn constant_time_eq(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}
