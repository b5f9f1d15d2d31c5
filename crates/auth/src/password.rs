//! One-way password hashing.

use avatarforge_core::{DomainError, DomainResult};

/// bcrypt-backed hashing/verification primitive.
///
/// The cost is fixed at construction so tests can run with a cheap cost while
/// production uses the bcrypt default.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Syntactically valid digest that matches no password. Login verifies
    /// against this when no account exists for the email, so the unknown-email
    /// and wrong-password paths cost the same amount of work.
    pub const DUMMY_DIGEST: &'static str =
        "$2b$12$GhvMmNVjRW29ulnudl.LbuAnUtN/LRfe1JsBm1Xu6LE3059z5Tr8q";

    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Low-cost variant for tests; do not use for stored credentials.
    pub fn fast() -> Self {
        // 4 is the smallest cost bcrypt accepts.
        Self { cost: 4 }
    }

    /// Hash with a randomized per-call salt. Same input, different digest
    /// every call.
    pub fn hash(&self, raw: &str) -> DomainResult<String> {
        bcrypt::hash(raw, self.cost).map_err(|e| {
            tracing::error!("password hashing failed: {e}");
            DomainError::validation("password could not be hashed")
        })
    }

    /// Constant-time-intended comparison. Any internal error is a mismatch,
    /// never a distinct error to the caller.
    pub fn verify(&self, raw: &str, digest: &str) -> bool {
        bcrypt::verify(raw, digest).unwrap_or(false)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_the_registered_password_only() {
        let hasher = PasswordHasher::fast();
        let digest = hasher.hash("hunter2").unwrap();

        assert!(hasher.verify("hunter2", &digest));
        assert!(!hasher.verify("hunter3", &digest));
        assert!(!hasher.verify("", &digest));
    }

    #[test]
    fn same_input_never_produces_the_same_digest() {
        let hasher = PasswordHasher::fast();
        let a = hasher.hash("hunter2").unwrap();
        let b = hasher.hash("hunter2").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_digest_is_a_mismatch_not_an_error() {
        let hasher = PasswordHasher::fast();
        assert!(!hasher.verify("hunter2", "not-a-bcrypt-digest"));
    }

    #[test]
    fn fast_cost_is_accepted_by_bcrypt() {
        // The cheap cost must stay within bcrypt's accepted range or every
        // test fixture that seeds accounts breaks.
        assert!(PasswordHasher::fast().hash("hunter2").is_ok());
    }

    #[test]
    fn dummy_digest_parses_and_matches_nothing() {
        // Parseable (verification runs at full cost), but never a match.
        assert!(bcrypt::verify("anything", PasswordHasher::DUMMY_DIGEST).is_ok());
        assert!(!PasswordHasher::new().verify("password", PasswordHasher::DUMMY_DIGEST));
    }
}
