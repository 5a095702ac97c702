//! # Error Types
//!
//! Domain-specific error types for crumb-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  crumb-core errors (this file)                                         │
//! │  ├── LedgerError      - Ledger mutation failures                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  crumb-db errors (separate crate)                                      │
//! │  └── DbError          - Snapshot persistence failures                  │
//! │                                                                         │
//! │  crumb-sync errors (separate crate)                                    │
//! │  └── RemoteError      - Connectivity vs application failures           │
//! │                                                                         │
//! │  Flow: ValidationError → LedgerError → ClientError → Frontend          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity id, field name)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Ledger Error
// =============================================================================

/// Ledger mutation errors.
///
/// A mutation that returns an error leaves the ledger untouched: validation
/// and lookups run before any state changes.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Product id absent on update/replace.
    ///
    /// Delete operations never raise this - an absent id is a no-op there,
    /// so a retried delete converges to the same end state.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Ingredient id absent on update/replace.
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Raised before any business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A numeric field that must not go below zero.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// A sale was submitted with no line items.
    #[error("a sale requires at least one line item")]
    EmptySale,

    /// A sale line carried a quantity below one.
    #[error("line quantity must be at least 1, got {qty}")]
    InvalidQuantity { qty: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================
