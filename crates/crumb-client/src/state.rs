//! # Ledger State
//!
//! The shared, thread-safe handle to the one ledger instance.
//!
//! ## Thread Safety
//! The ledger is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple actions may access/modify the ledger
//! 2. Only one action should modify it at a time (single-writer in effect)
//! 3. The dispatcher and persistence tasks read it concurrently
//!
//! ## Deferred Alert Dispatch
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Mutation → Alert Timeline                            │
//! │                                                                         │
//! │  apply(f)                                                              │
//! │    │ lock ───► f(&mut ledger) ───► unlock                              │
//! │    │                │                 │                                 │
//! │    │          Applied{record,         │                                 │
//! │    │                  alerts}         ▼                                 │
//! │    │                          send alerts on mpsc (fire-and-forget)    │
//! │    │                                  │                                 │
//! │    ▼                                  ▼                                 │
//! │  returns record            dispatcher task (next tick)                 │
//! │                            engine.notify_low_stock / out_of_stock      │
//! │                                                                         │
//! │  The mutation has committed and returned before any notification       │
//! │  work happens; a full or closed channel is silently ignored - a        │
//! │  failed alert dispatch must never fail the triggering mutation.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crumb_core::error::LedgerResult;
use crumb_core::ledger::{Applied, Ledger};
use crumb_core::types::StockAlert;

/// Shared handle to the ledger.
///
/// Cheap to clone - all clones share one ledger and one alert channel.
#[derive(Debug, Clone)]
pub struct LedgerState {
    ledger: Arc<Mutex<Ledger>>,
    alerts: mpsc::UnboundedSender<StockAlert>,
}

impl LedgerState {
    /// Wraps a ledger and returns the state handle plus the receiving end
    /// of its alert channel (feed it to
    /// [`crate::alerts::spawn_alert_dispatcher`]).
    pub fn new(ledger: Ledger) -> (Self, mpsc::UnboundedReceiver<StockAlert>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            LedgerState {
                ledger: Arc::new(Mutex::new(ledger)),
                alerts: tx,
            },
            rx,
        )
    }

    /// Executes a closure with read access to the ledger.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let stats = state.read(|ledger| ledger.stats());
    /// ```
    pub fn read<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        let ledger = self.ledger.lock().expect("ledger mutex poisoned");
        f(&ledger)
    }

    /// Runs an alert-producing mutation and forwards its alerts.
    ///
    /// The lock is released before the alerts are sent, so the stock check
    /// results reach the notification engine strictly after the mutation
    /// is committed and observable.
    pub fn apply<T>(
        &self,
        f: impl FnOnce(&mut Ledger) -> LedgerResult<Applied<T>>,
    ) -> LedgerResult<T> {
        let applied = {
            let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
            f(&mut ledger)?
        };

        for alert in applied.alerts {
            // Fire-and-forget: a closed channel means the app is shutting
            // down and the alert is moot.
            let _ = self.alerts.send(alert);
        }

        Ok(applied.record)
    }

    /// Executes a closure with write access, without alert forwarding.
    ///
    /// For mutations that can't raise stock alerts (deletes, settings).
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Ledger) -> R) -> R {
        let mut ledger = self.ledger.lock().expect("ledger mutex poisoned");
        f(&mut ledger)
    }

    /// Clones the current ledger for snapshot persistence.
    pub fn snapshot(&self) -> Ledger {
        self.read(Ledger::clone)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crumb_core::types::NewProduct;

    #[tokio::test]
    async fn test_apply_forwards_alerts_after_commit() {
        let (state, mut rx) = LedgerState::new(Ledger::new());

        let record = state
            .apply(|ledger| {
                ledger.add_product(NewProduct {
                    name: "Chocolate Cake".to_string(),
                    price_cents: 2000,
                    stock: 2,
                })
            })
            .unwrap();

        assert_eq!(record.stock, 2);

        // The alert arrived on the channel, not inside the mutation.
        let alert = rx.recv().await.unwrap();
        assert!(matches!(alert, StockAlert::LowStock { stock: 2, .. }));
    }

    #[tokio::test]
    async fn test_apply_with_dropped_receiver_still_commits() {
        let (state, rx) = LedgerState::new(Ledger::new());
        drop(rx);

        // Alert dispatch is fire-and-forget: the mutation must succeed
        // even with nobody listening.
        let record = state
            .apply(|ledger| {
                ledger.add_product(NewProduct {
                    name: "Baguette".to_string(),
                    price_cents: 300,
                    stock: 0,
                })
            })
            .unwrap();

        assert_eq!(record.stock, 0);
        assert_eq!(state.read(|l| l.products().len()), 1);
    }

    #[tokio::test]
    async fn test_failed_mutation_sends_nothing() {
        let (state, mut rx) = LedgerState::new(Ledger::new());

        let result = state.apply(|ledger| {
            ledger.add_product(NewProduct {
                name: String::new(),
                price_cents: 100,
                stock: 0,
            })
        });

        assert!(result.is_err());
        assert!(rx.try_recv().is_err());
    }
}
