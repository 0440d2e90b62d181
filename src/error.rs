//! Error types for Bookyard
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! The system has exactly two recoverable fault classes at its boundary —
//! malformed filter input and missing entities — plus the usual infrastructure
//! failures (database, migrations, filesystem).

use thiserror::Error;

/// Result type alias using our CatalogError type
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Main error type for Bookyard
#[derive(Error, Debug)]
pub enum CatalogError {
    // ===== Missing entities =====

    /// Store lookup by primary key failed
    #[error("Store not found: {0}")]
    StoreNotFound(i64),

    // ===== Input validation =====

    /// A record failed validation before insert (empty author name,
    /// oversized review comment, and the like)
    #[error("Validation failed: {0}")]
    Validation(String),

    // ===== Storage =====

    /// Database schema migration failed
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Filesystem operation failed (database directory creation etc.)
    #[error("File I/O error: {0}")]
    FileIoError(String),

    /// Underlying sqlx error
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl CatalogError {
    /// Whether this error should surface as a not-found condition
    /// rather than a server fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::StoreNotFound(_))
    }
}
