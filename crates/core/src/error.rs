//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// conflicts, missing entities). Every error is raised at the point of
/// detection and propagates unmodified to the HTTP boundary, which maps
/// it to a response exactly once.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. empty title, negative price).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A requested entity was not found (by id, name, or query).
    #[error("not found: {0}")]
    NotFound(String),

    /// A uniqueness conflict (e.g. duplicate category name).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A business rule was violated (inactive book, insufficient stock).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Unexpected persistence failure mid-operation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
