//! JWT issuance and verification.
//!
//! Tokens are HS256-signed JWTs in compact serialization carrying the
//! principal in `sub` plus `iat`/`exp` in whole Unix seconds.
//!
//! # Pre-conditions
//! - The signing secret must be non-empty.
//!
//! # Post-conditions
//! - On success, `validate` returns the principal from the 'sub' claim.
//! - On failure, a single `AuthError` names the first check that failed, in
//!   the order: structure, signature, expiry.
//!
//! # Invariants
//! - Validation is stateless and performs no I/O.
//! - A token is valid iff its signature verifies under the configured secret
//!   and the current time is strictly before `exp`.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use super::{AuthError, Principal, SystemTimeSource, TimeSource, Token};

/// The only algorithm accepted at issuance and validation.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Token lifetime used when none is configured.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject claim containing the principal identity.
    sub: String,
    /// Issued-at, seconds since the Unix epoch.
    iat: u64,
    /// Expiry, seconds since the Unix epoch.
    exp: u64,
}

/// Issues and validates bearer tokens under a single process-wide secret.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    time_source: Arc<dyn TimeSource>,
}

impl TokenService {
    /// Create a token service backed by the system clock.
    ///
    /// # Errors
    /// Returns `AuthError::SigningFailure` if `secret` is empty.
    pub fn new(secret: &[u8], ttl: Duration) -> Result<Self, AuthError> {
        Self::with_time_source(secret, ttl, Arc::new(SystemTimeSource))
    }

    /// Create a token service reading time from `time_source`.
    ///
    /// # Errors
    /// Returns `AuthError::SigningFailure` if `secret` is empty.
    pub fn with_time_source(
        secret: &[u8],
        ttl: Duration,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::SigningFailure);
        }

        // Expiry is checked against `time_source` with an exact boundary, so
        // the library's own clock-based check is turned off.
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
            time_source,
        })
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject` that expires `ttl` from now.
    ///
    /// # Errors
    /// Returns `AuthError::SigningFailure` if the claims cannot be encoded.
    pub fn issue(&self, subject: &Principal) -> Result<Token, AuthError> {
        let now = self.time_source.now_secs();
        let claims = Claims {
            sub: subject.as_str().to_owned(),
            iat: now,
            exp: now.saturating_add(self.ttl.as_secs()),
        };

        let encoded = encode(&Header::new(TOKEN_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("failed to sign token: {e}");
                AuthError::SigningFailure
            })?;

        Ok(Token::new(encoded))
    }

    /// Validate a raw token (already stripped of its `Bearer ` prefix).
    ///
    /// # Errors
    /// - `AuthError::Malformed` if the token cannot be decoded or has an empty subject.
    /// - `AuthError::BadSignature` if the signature does not verify.
    /// - `AuthError::Expired` if the current time is at or after `exp`.
    pub fn validate(&self, raw_token: &str) -> Result<Principal, AuthError> {
        let token_data =
            decode::<Claims>(raw_token, &self.decoding_key, &self.validation).map_err(map_jwt_error)?;
        let claims = token_data.claims;

        let principal = Principal::new(claims.sub).ok_or(AuthError::Malformed)?;

        if self.time_source.now_secs() >= claims.exp {
            return Err(AuthError::Expired);
        }

        Ok(principal)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &TOKEN_ALGORITHM)
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Maps jsonwebtoken errors to our `AuthError` type.
fn map_jwt_error(error: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => AuthError::BadSignature,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::Malformed,
    }
}
