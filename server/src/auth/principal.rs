//! The authenticated identity and the token that proves it.

use serde::Serialize;

/// The single identity this server can authenticate.
///
/// # Invariants
/// - The identity string is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Principal(String);

impl Principal {
    /// Returns `None` for an empty identity.
    #[must_use]
    pub fn new(identity: impl Into<String>) -> Option<Self> {
        let identity = identity.into();
        if identity.is_empty() {
            return None;
        }
        Some(Self(identity))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque signed token, serialized as a bare JSON string.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub(crate) const fn new(encoded: String) -> Self {
        Self(encoded)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Tokens are bearer credentials; keep them out of logs.
impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Token([REDACTED])")
    }
}
