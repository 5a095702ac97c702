//! # crumb-db: Snapshot Persistence for Crumb POS
//!
//! This crate provides local durability for the ledger.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Crumb POS Data Flow                              │
//! │                                                                         │
//! │  Client action (add_product, record_sale, ...)                         │
//! │       │ after the ledger mutation commits                               │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     crumb-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Snapshots    │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (snapshot.rs) │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ save / load   │    │ 001_snap...  │  │   │
//! │  │   │ WAL mode      │    │ by stable key │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file under the platform data directory                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`snapshot`] - The snapshot repository
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crumb_db::{Database, DbConfig, LEDGER_SNAPSHOT_KEY};
//!
//! let db = Database::new(DbConfig::new("path/to/crumb.db")).await?;
//!
//! db.snapshots().save(LEDGER_SNAPSHOT_KEY, &ledger).await?;
//! let restored: Option<Ledger> = db.snapshots().load(LEDGER_SNAPSHOT_KEY).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use snapshot::SnapshotRepository;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The stable key the ledger snapshot lives under.
///
/// One named record: write it wholesale after mutations, restore it
/// verbatim on launch.
pub const LEDGER_SNAPSHOT_KEY: &str = "crumb-ledger";
