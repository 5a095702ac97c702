//! # Remote Error Types
//!
//! Failure classification for remote writes.
//!
//! ## Why Two Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Remote Failure Categories                           │
//! │                                                                         │
//! │  ┌───────────────────────────┐   ┌───────────────────────────────────┐ │
//! │  │  Connectivity             │   │  Application                      │ │
//! │  │                           │   │                                   │ │
//! │  │  No response received:    │   │  A response arrived carrying an   │ │
//! │  │  connection refused,      │   │  error status: validation reject, │ │
//! │  │  timeout, DNS failure     │   │  auth failure after retry, 5xx    │ │
//! │  │                           │   │                                   │ │
//! │  │  → fall back to a local   │   │  → surface the server message,    │ │
//! │  │    mutation               │   │    leave local state untouched    │ │
//! │  └───────────────────────────┘   └───────────────────────────────────┘ │
//! │                                                                         │
//! │  InvalidResponse (undecodable body) sits with Application: a server    │
//! │  answered, so the optimistic fallback must not run.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote write failure.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never produced a response: connection refused, timed
    /// out, or failed at the network level.
    #[error("Backend unreachable: {0}")]
    Connectivity(String),

    /// The backend responded with an error status. `message` carries the
    /// server-provided text when one was supplied.
    #[error("Backend rejected the request ({status}): {message}")]
    Application { status: u16, message: String },

    /// A response arrived but its body could not be decoded.
    #[error("Invalid response from backend: {0}")]
    InvalidResponse(String),
}

impl RemoteError {
    /// True only for [`RemoteError::Connectivity`].
    ///
    /// This is the single predicate the reconciliation policy branches on:
    /// everything else leaves local state untouched.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, RemoteError::Connectivity(_))
    }

    /// True when a response was received carrying an error status.
    pub fn is_application(&self) -> bool {
        matches!(self, RemoteError::Application { .. })
    }

    /// The server-facing message suitable for display.
    pub fn message(&self) -> String {
        match self {
            RemoteError::Application { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        // A decode failure means a response arrived - never fall back on it.
        if err.is_decode() {
            return RemoteError::InvalidResponse(err.to_string());
        }
        // An error carrying a status also had a response.
        if let Some(status) = err.status() {
            return RemoteError::Application {
                status: status.as_u16(),
                message: err.to_string(),
            };
        }
        // Everything else (connect, timeout, request transport) never
        // reached the server.
        RemoteError::Connectivity(err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_predicates() {
        let connectivity = RemoteError::Connectivity("connection refused".into());
        assert!(connectivity.is_connectivity());
        assert!(!connectivity.is_application());

        let application = RemoteError::Application {
            status: 400,
            message: "price must be positive".into(),
        };
        assert!(!application.is_connectivity());
        assert!(application.is_application());

        let invalid = RemoteError::InvalidResponse("EOF while parsing".into());
        assert!(!invalid.is_connectivity());
        assert!(!invalid.is_application());
    }

    #[test]
    fn test_application_message_passthrough() {
        let err = RemoteError::Application {
            status: 422,
            message: "stock must be an integer".into(),
        };
        assert_eq!(err.message(), "stock must be an integer");
    }
}
