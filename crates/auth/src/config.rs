//! Auth configuration.

use chrono::Duration;

/// Signing/lifetime configuration for the token service.
///
/// Constructed once at startup and passed into [`crate::TokenService::new`];
/// nothing in this crate reads the process environment at call time, and the
/// secret is never rotated at runtime.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Symmetric HS256 signing secret.
    pub secret: String,
    /// How long an issued token stays valid.
    pub token_ttl: Duration,
}

impl AuthConfig {
    pub fn new(secret: impl Into<String>, token_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            token_ttl,
        }
    }
}

impl Default for AuthConfig {
    /// Dev-only default: one-day tokens, insecure secret.
    fn default() -> Self {
        Self {
            secret: "dev-secret".to_string(),
            token_ttl: Duration::days(1),
        }
    }
}
