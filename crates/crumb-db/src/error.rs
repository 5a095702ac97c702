//! # Database Error Types
//!
//! Error types for snapshot persistence.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ClientError (crumb-client) ← Serialized for frontend                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx and serde errors and provide context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Could not open or connect to the database file.
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration run failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// A snapshot body could not be serialized or deserialized.
    ///
    /// Raised on restore when the stored JSON no longer matches the
    /// ledger's shape.
    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for Results with DbError.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Error Conversions
// =============================================================================

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        DbError::QueryFailed(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}
