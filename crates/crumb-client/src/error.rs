//! # Client Error Type
//!
//! Unified error surface for actions.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Crumb POS                              │
//! │                                                                         │
//! │  LedgerError ──┐                                                        │
//! │                │                                                        │
//! │  RemoteError ──┼──► ClientError { code, message } ──► page frontend    │
//! │                │                                                        │
//! │  DbError ──────┘                                                        │
//! │                                                                         │
//! │  The frontend switches on `code` and renders `message`:                │
//! │    REMOTE_REJECTED  → inline form error with the server's text         │
//! │    VALIDATION_ERROR → highlight the offending field                     │
//! │    NOT_FOUND        → refresh the list view                             │
//! │                                                                         │
//! │  Connectivity failures normally never surface here - the               │
//! │  reconciliation policy absorbs them into a local commit.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use crumb_core::error::LedgerError;
use crumb_core::ValidationError;
use crumb_db::DbError;
use crumb_sync::{CommitError, RemoteError};

/// Error returned from client actions.
///
/// ## Serialization
/// This is what the frontend receives when an action fails:
/// ```json
/// {
///   "code": "REMOTE_REJECTED",
///   "message": "price must be positive"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for the action surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Entity id absent on update (404)
    NotFound,

    /// Input validation failed locally, before any remote attempt (400)
    ValidationError,

    /// The backend received the write and rejected it; local state is
    /// untouched and the user must retry explicitly (422)
    RemoteRejected,

    /// The backend was unreachable on a path with no local fallback
    Offline,

    /// Snapshot persistence failed (500)
    StorageError,

    /// Anything else (500)
    Internal,
}

impl ClientError {
    /// Creates a new client error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ClientError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ClientError::new(ErrorCode::Internal, message)
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<LedgerError> for ClientError {
    fn from(err: LedgerError) -> Self {
        match &err {
            LedgerError::ProductNotFound(_) | LedgerError::IngredientNotFound(_) => {
                ClientError::new(ErrorCode::NotFound, err.to_string())
            }
            LedgerError::Validation(inner) => ClientError::validation(inner.to_string()),
        }
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::validation(err.to_string())
    }
}

impl From<RemoteError> for ClientError {
    fn from(err: RemoteError) -> Self {
        match &err {
            // Surface the server's own message - the page renders it as-is.
            RemoteError::Application { message, .. } => {
                ClientError::new(ErrorCode::RemoteRejected, message.clone())
            }
            RemoteError::InvalidResponse(_) => {
                ClientError::new(ErrorCode::RemoteRejected, err.to_string())
            }
            RemoteError::Connectivity(_) => ClientError::new(ErrorCode::Offline, err.to_string()),
        }
    }
}

impl From<DbError> for ClientError {
    fn from(err: DbError) -> Self {
        ClientError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<CommitError<LedgerError>> for ClientError {
    fn from(err: CommitError<LedgerError>) -> Self {
        match err {
            CommitError::Remote(remote) => remote.into(),
            CommitError::Local(local) => local.into(),
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ClientError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_failure_keeps_server_message() {
        let err: ClientError = RemoteError::Application {
            status: 400,
            message: "price must be positive".to_string(),
        }
        .into();

        assert_eq!(err.code, ErrorCode::RemoteRejected);
        assert_eq!(err.message, "price must be positive");
    }

    #[test]
    fn test_not_found_maps_to_code() {
        let err: ClientError = LedgerError::ProductNotFound("p9".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ClientError::validation("name is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "name is required");
    }
}
