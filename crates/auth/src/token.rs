//! Token issuance and verification (HS256, shared secret).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use avatarforge_core::{DomainError, DomainResult, UserId};

use crate::{AuthConfig, Claims, Role};

/// Issues and verifies signed, time-bounded bearer tokens.
///
/// Validity is solely a function of signature and expiry at verification
/// time; tokens are never stored server-side and there is no revocation list.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: config.token_ttl,
        }
    }

    /// Sign identity + role claims with the configured lifetime.
    pub fn issue(&self, sub: UserId, email: &str, role: Role) -> DomainResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub,
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|e| {
            tracing::error!("token signing failed: {e}");
            DomainError::Unauthorized
        })
    }

    /// Verify signature and expiry, returning the decoded claims.
    ///
    /// Every failure mode (bad signature, malformed token, expired) collapses
    /// into `Unauthorized`; the reason is logged, not surfaced.
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("token rejected: {e}");
                DomainError::Unauthorized
            })
    }
}
