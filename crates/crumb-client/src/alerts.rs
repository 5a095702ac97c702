//! # Alert Dispatcher
//!
//! The task that carries stock alerts from ledger mutations to the
//! notification engine.
//!
//! This is the explicit task-queue form of fire-and-forget dispatch: the
//! mutation pushes onto the channel and returns; the dispatcher drains it
//! on its own scheduling tick and talks to the engine through its semantic
//! constructors - the only entry points the stock check uses.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crumb_core::types::StockAlert;
use crumb_notify::NotificationEngine;

/// Spawns the dispatcher task consuming a ledger's alert channel.
///
/// Runs until the sending side (every [`crate::state::LedgerState`] clone)
/// is dropped.
pub fn spawn_alert_dispatcher(
    engine: NotificationEngine,
    mut alerts: mpsc::UnboundedReceiver<StockAlert>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(alert) = alerts.recv().await {
            match alert {
                StockAlert::LowStock {
                    name,
                    stock,
                    threshold,
                } => {
                    engine.notify_low_stock(&name, stock, threshold);
                }
                StockAlert::OutOfStock { name } => {
                    engine.notify_out_of_stock(&name);
                }
            }
        }
        debug!("alert channel closed, dispatcher stopping");
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crumb_notify::NotificationKind;

    #[tokio::test]
    async fn test_alerts_reach_the_engine() {
        let engine = NotificationEngine::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_alert_dispatcher(engine.clone(), rx);

        tx.send(StockAlert::LowStock {
            name: "Chocolate Cake".to_string(),
            stock: 3,
            threshold: 5,
        })
        .unwrap();
        tx.send(StockAlert::OutOfStock {
            name: "Croissant".to_string(),
        })
        .unwrap();

        // Closing the channel lets the dispatcher drain and stop.
        drop(tx);
        handle.await.unwrap();

        let inbox = engine.list();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0].kind, NotificationKind::Warning);
        assert_eq!(inbox[1].kind, NotificationKind::Error);
        assert!(inbox[1].message.contains("Croissant"));
    }
}
