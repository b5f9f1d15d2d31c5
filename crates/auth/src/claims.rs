//! JWT claims model.

use serde::{Deserialize, Serialize};

use avatarforge_core::UserId;

use crate::Role;

/// Identity/role payload embedded in a signed token.
///
/// `iat`/`exp` are unix-epoch seconds, the `jsonwebtoken` convention. Claims
/// are trusted as issued at verification time; callers that need the *current*
/// role re-resolve the subject against the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user) identifier.
    pub sub: UserId,
    pub email: String,
    pub role: Role,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}
