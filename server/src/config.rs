//! Server configuration module.
//!
//! This module provides configuration loading for the blog server from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `BLOG_USERNAME`: Username of the single principal (required)
//! - `BLOG_PASSWORD`: Password of the single principal (required)
//! - `BLOG_JWT_SECRET`: Secret used to sign and verify tokens (required)
//! - `BLOG_TOKEN_TTL_SECS`: Token lifetime in seconds (default: `3600`)
//! - `BLOG_LISTEN_PORT`: Port to listen on (default: `8080`)
//!
//! # Invariants
//!
//! - `username` and `jwt_secret` are never empty
//! - `listen_port` is always a valid port number (1-65535)

use std::time::Duration;

use thiserror::Error;

use crate::auth::{DEFAULT_TOKEN_TTL, Principal};

const USERNAME_VAR: &str = "BLOG_USERNAME";
const PASSWORD_VAR: &str = "BLOG_PASSWORD";
const JWT_SECRET_VAR: &str = "BLOG_JWT_SECRET";
const TOKEN_TTL_VAR: &str = "BLOG_TOKEN_TTL_SECS";
const LISTEN_PORT_VAR: &str = "BLOG_LISTEN_PORT";

/// Server configuration.
///
/// # Post-conditions
///
/// - `listen_port` is always in the valid range (1-65535)
/// - `username` and `jwt_secret` are non-empty
#[derive(Clone)]
pub struct ServerConfig {
    /// Identity of the single principal that may log in.
    pub username: Principal,
    /// Password of the principal.
    pub password: String,
    /// Secret used to sign and verify tokens.
    pub jwt_secret: String,
    /// Lifetime of issued tokens.
    pub token_ttl: Duration,
    /// Port to listen on for HTTP requests.
    pub listen_port: u16,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// An environment variable has an invalid value.
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
}

impl ServerConfig {
    /// Default port for the server.
    pub const DEFAULT_PORT: u16 = 8080;

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is unset or empty, or if an
    /// optional variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let username = load_principal(&lookup)?;
        let password = lookup(PASSWORD_VAR)
            .ok_or_else(|| ConfigError::MissingEnvVar(PASSWORD_VAR.to_string()))?;
        let jwt_secret = require_non_empty(&lookup, JWT_SECRET_VAR)?;
        let token_ttl = load_token_ttl(&lookup)?;
        let listen_port = load_listen_port(&lookup)?;

        Ok(Self {
            username,
            password,
            jwt_secret,
            token_ttl,
            listen_port,
        })
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("listen_port", &self.listen_port)
            .finish()
    }
}

fn require_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Result<String, ConfigError> {
    let value = lookup(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))?;

    if value.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: "must not be empty".to_string(),
        });
    }

    Ok(value)
}

fn load_principal(lookup: &impl Fn(&str) -> Option<String>) -> Result<Principal, ConfigError> {
    let value = lookup(USERNAME_VAR)
        .ok_or_else(|| ConfigError::MissingEnvVar(USERNAME_VAR.to_string()))?;

    Principal::new(value).ok_or_else(|| ConfigError::InvalidValue {
        name: USERNAME_VAR.to_string(),
        message: "must not be empty".to_string(),
    })
}

/// Returns the default TTL if not set.
fn load_token_ttl(lookup: &impl Fn(&str) -> Option<String>) -> Result<Duration, ConfigError> {
    match lookup(TOKEN_TTL_VAR) {
        Some(value) => value
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidValue {
                name: TOKEN_TTL_VAR.to_string(),
                message: format!("'{value}' is not a whole number of seconds"),
            }),
        None => Ok(DEFAULT_TOKEN_TTL),
    }
}

/// Returns the default port if not set.
fn load_listen_port(lookup: &impl Fn(&str) -> Option<String>) -> Result<u16, ConfigError> {
    match lookup(LISTEN_PORT_VAR) {
        Some(value) => match value.parse::<u16>() {
            Ok(port) if port != 0 => Ok(port),
            _ => Err(ConfigError::InvalidValue {
                name: LISTEN_PORT_VAR.to_string(),
                message: format!("'{value}' is not a valid port number (must be 1-65535)"),
            }),
        },
        None => Ok(ServerConfig::DEFAULT_PORT),
    }
}
