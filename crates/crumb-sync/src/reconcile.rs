//! # Offline Reconciliation
//!
//! The one shared dual-write procedure. Every mutating action in the
//! client layer runs through [`commit`] instead of re-implementing the
//! remote-first/local-fallback dance at each call site.
//!
//! ## Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Caller builds the mutation payload (ledger untouched)              │
//! │  2. commit() awaits the remote attempt                                 │
//! │  3. Ok(record)        → apply(Some(record))  → Committed { Remote }    │
//! │     the server record, when supplied, is authoritative                 │
//! │  4. Err(connectivity) → apply(None)          → Committed {             │
//! │     the locally-built payload commits           LocalFallback }        │
//! │  5. Err(application)  → apply NOT called     → Err(Remote)             │
//! │     the ledger stays exactly as it was                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `apply` runs the local ledger mutation exactly once per commit - there
//! is no code path that runs it twice, so the fallback can never
//! double-count a sale or raise duplicate stock alerts.

use std::future::Future;

use thiserror::Error;
use tracing::{info, warn};

use crate::error::{RemoteError, RemoteResult};

// =============================================================================
// Outcome Types
// =============================================================================

/// Where the committed record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// The remote write succeeded; the backend saw this mutation.
    Remote,

    /// The backend was unreachable; the mutation is locally committed and
    /// the caller should surface a non-blocking offline notice.
    LocalFallback,
}

/// A mutation that made it into the ledger, one way or the other.
#[derive(Debug, Clone)]
pub struct Committed<T> {
    /// The committed record.
    pub record: T,

    /// Whether the backend confirmed the write or the local fallback ran.
    pub provenance: Provenance,
}

impl<T> Committed<T> {
    /// True when the local fallback committed this mutation.
    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::LocalFallback
    }
}

/// Failure of a reconciled commit.
#[derive(Debug, Error)]
pub enum CommitError<E>
where
    E: std::error::Error + 'static,
{
    /// The backend rejected the write; the local mutation never ran.
    #[error(transparent)]
    Remote(RemoteError),

    /// The local mutation itself failed (validation, missing id).
    #[error(transparent)]
    Local(E),
}

// =============================================================================
// The Procedure
// =============================================================================

/// Runs one mutation through the dual-write policy.
///
/// ## Parameters
/// - `attempt`: the remote write, already carrying its payload. Resolves
///   to the server-confirmed record when the backend returns one.
/// - `apply`: the local mutation. Receives `Some(record)` when the server
///   supplied an authoritative record, `None` when the locally-built
///   payload should commit (fallback, or a server that returned no body).
///
/// ## Example
/// ```rust,ignore
/// let committed = commit(
///     remote.post("/products", &draft_payload),
///     |confirmed| match confirmed {
///         Some(product) => ledger.insert_product(product),
///         None => ledger.add_product(draft),
///     },
/// )
/// .await?;
///
/// if committed.is_fallback() {
///     notify.add(Info, "Offline", "backend offline — using local data", ...);
/// }
/// ```
pub async fn commit<S, T, E, Fut, A>(attempt: Fut, apply: A) -> Result<Committed<T>, CommitError<E>>
where
    Fut: Future<Output = RemoteResult<Option<S>>>,
    A: FnOnce(Option<S>) -> Result<T, E>,
    E: std::error::Error + 'static,
{
    match attempt.await {
        Ok(confirmed) => {
            let record = apply(confirmed).map_err(CommitError::Local)?;
            Ok(Committed {
                record,
                provenance: Provenance::Remote,
            })
        }
        Err(err) if err.is_connectivity() => {
            info!(error = %err, "backend unreachable, committing locally");
            let record = apply(None).map_err(CommitError::Local)?;
            Ok(Committed {
                record,
                provenance: Provenance::LocalFallback,
            })
        }
        Err(err) => {
            warn!(error = %err, "backend rejected write, local state untouched");
            Err(CommitError::Remote(err))
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
