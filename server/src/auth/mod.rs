//! Authentication module.
//!
//! Stateless bearer-token authentication for the blog server: a credential
//! verifier for the single configured principal, a token service issuing and
//! validating HS256 JWTs, and the middleware that guards protected routes.
//!
//! # Pre-conditions
//! - The signing secret and principal are loaded once at startup.
//!
//! # Post-conditions
//! - Authentication configuration is immutable once loaded.
//!
//! # Invariants
//! - No server-side session state exists; token validity depends only on
//!   the token string, the secret, and the current time.

pub mod credentials;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod principal;
pub mod time;

pub use credentials::{CredentialVerifier, Credentials};
pub use error::AuthError;
pub use jwt::{DEFAULT_TOKEN_TTL, TOKEN_ALGORITHM, TokenService};
pub use middleware::{AuthenticatedPrincipal, BEARER_PREFIX, bearer_token, require_bearer};
pub use principal::{Principal, Token};
pub use time::{SystemTimeSource, TimeSource};
