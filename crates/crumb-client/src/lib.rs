//! # Crumb Client Library
//!
//! The application layer of Crumb POS: everything between the page
//! frontend and the pure domain crates.
//!
//! ## Module Organization
//! ```text
//! crumb_client/
//! ├── lib.rs          ◄─── You are here
//! ├── app.rs          ◄─── App wiring: startup, restore-or-seed, shutdown
//! ├── state.rs        ◄─── Shared ledger state with deferred alert dispatch
//! ├── alerts.rs       ◄─── StockAlert → NotificationEngine dispatcher task
//! ├── error.rs        ◄─── ClientError surface for the frontend
//! └── actions/
//!     ├── mod.rs      ◄─── Shared helpers (offline notice)
//!     ├── product.rs  ◄─── Product CRUD actions
//!     ├── ingredient.rs ◄─ Ingredient CRUD actions
//!     ├── sale.rs     ◄─── Checkout action
//!     ├── expense.rs  ◄─── Expense logging action
//!     ├── settings.rs ◄─── Settings save (local-only)
//!     └── reports.rs  ◄─── Dashboard read + CSV export
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Crumb Client State                                   │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐   │
//! │  │   LedgerState    │ │ NotificationEngine│ │  Database            │   │
//! │  │                  │ │                  │ │                      │   │
//! │  │  • one mutex     │ │  • alert inbox   │ │  • snapshot store    │   │
//! │  │  • alert channel │ │  • auto-expiry   │ │  • SQLite pool       │   │
//! │  └────────┬─────────┘ └────────▲─────────┘ └──────────────────────┘   │
//! │           │  StockAlert mpsc   │ semantic constructors                 │
//! │           └────────► dispatcher task ──────┘                           │
//! │                                                                         │
//! │  The dispatcher runs on its own task: a mutation returns before its    │
//! │  alerts reach the inbox, so notification work can never block or      │
//! │  re-enter a mutation.                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod actions;
pub mod alerts;
pub mod app;
pub mod error;
pub mod state;

pub use app::{App, AppConfig};
pub use error::{ClientError, ErrorCode};
pub use state::LedgerState;
