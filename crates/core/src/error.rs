//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures at the point of detection.
/// Nothing here is a transient-retry candidate; the transport layer maps each
/// variant to a status code and moves on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing/invalid/expired token, or bad login credentials.
    ///
    /// Bad email and bad password deliberately collapse into this one variant
    /// so the response never reveals which field was wrong.
    #[error("unauthorized")]
    Unauthorized,

    /// Valid identity, insufficient privilege.
    ///
    /// Carries the role names that would have been accepted, for diagnostics.
    #[error("forbidden: requires one of {0:?}")]
    Forbidden(Vec<String>),

    /// A referenced user/avatar/bond is absent.
    #[error("not found")]
    NotFound,

    /// A uniqueness conflict (e.g. duplicate email on registration).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn forbidden(required: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self::Forbidden(required.into_iter().map(Into::into).collect())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
