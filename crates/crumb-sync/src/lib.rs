//! # crumb-sync: Remote Sync Adapter for Crumb POS
//!
//! The remote half of the dual-write design: an HTTP client over the
//! backend's resource paths, a failure classification that separates
//! "the backend is unreachable" from "the backend said no", and the one
//! shared reconciliation procedure every mutating action runs through.
//!
//! ## The Crux
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Dual-Write Reconciliation                             │
//! │                                                                         │
//! │  build payload ──► attempt remote write                                │
//! │                         │                                               │
//! │          ┌──────────────┼──────────────────────┐                        │
//! │          ▼              ▼                      ▼                        │
//! │     Ok(record)     Connectivity           Application                  │
//! │          │          failure                failure                     │
//! │          ▼              ▼                      ▼                        │
//! │   apply server     apply local           DO NOT touch                  │
//! │   record (or       payload +             local state;                  │
//! │   local payload)   "backend offline"     surface server                │
//! │                    notice                message                       │
//! │                                                                         │
//! │  A down backend must never block the point of sale.                    │
//! │  A rejected business rule must never leak into local state.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - `RemoteError` and its connectivity/application split
//! - [`client`] - `RemoteClient`, HTTP verbs with bearer attach and the
//!   single-retry session protocol
//! - [`session`] - the `SessionAuthority` interface
//! - [`reconcile`] - the shared `commit` procedure

pub mod client;
pub mod error;
pub mod reconcile;
pub mod session;

pub use client::RemoteClient;
pub use error::{RemoteError, RemoteResult};
pub use reconcile::{commit, CommitError, Committed, Provenance};
pub use session::SessionAuthority;
