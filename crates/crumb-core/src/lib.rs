//! # crumb-core: Pure Business Logic for Crumb POS
//!
//! This crate is the **heart** of Crumb POS. It contains the commerce ledger
//! and all business rules as pure logic with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Crumb POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Page Frontend (external)                     │   │
//! │  │    Inventory ──► Sales ──► Expenses ──► Reports ──► Settings    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    crumb-client actions                         │   │
//! │  │    remote-first writes with offline fallback (crumb-sync)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ crumb-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  ledger   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  Ledger   │  │   rules   │  │   │
//! │  │   │   Sale    │  │  (cents)  │  │  Stats    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • OWNED STATE ONLY         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Ingredient, Sale, Expense, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`ledger`] - The authoritative ledger state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Owned State**: The [`ledger::Ledger`] is an explicitly constructed
//!    container - no global singletons, tests build fresh instances
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Deferred Side Effects**: Mutations return the stock alerts they
//!    produced; dispatching them is the caller's job, after commit
//!
//! ## Example Usage
//!
//! ```rust
//! use crumb_core::ledger::Ledger;
//! use crumb_core::types::NewProduct;
//!
//! let mut ledger = Ledger::new();
//! let applied = ledger
//!     .add_product(NewProduct {
//!         name: "Sourdough Loaf".into(),
//!         price_cents: 500,
//!         stock: 20,
//!     })
//!     .unwrap();
//!
//! assert_eq!(applied.record.price_cents, 500);
//! assert!(applied.alerts.is_empty()); // 20 > default threshold of 5
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use crumb_core::Money` instead of
// `use crumb_core::money::Money`

pub use error::{LedgerError, ValidationError};
pub use ledger::{Applied, Ledger};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default low-stock threshold applied to fresh ledgers.
///
/// A product whose stock falls to this level or below raises a low-stock
/// alert; a product at zero raises an out-of-stock alert instead.
/// Configurable per ledger through [`types::Settings`].
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;
