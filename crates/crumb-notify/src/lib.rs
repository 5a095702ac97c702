//! # crumb-notify: Notification Engine for Crumb POS
//!
//! An ephemeral, insertion-ordered alert inbox. Notifications are added by
//! the application layer (stock alerts, success/error toasts, offline
//! notices), displayed by the page frontend, and removed either manually
//! or by their auto-expiry timer.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Notification Lifecycle                              │
//! │                                                                         │
//! │  add(kind, title, message, auto_close)                                 │
//! │       │                                                                 │
//! │       ├──► pushed at the inbox tail (insertion order = display order)  │
//! │       │                                                                 │
//! │       └──► auto_close set? spawn timer ──► sleep ──► remove(id)        │
//! │                                                          │              │
//! │  remove(id) ◄── manual dismissal ────────────────────────┘              │
//! │       │                                                                 │
//! │       └──► idempotent: expiry racing a manual dismissal is a no-op     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract Durations
//! The semantic constructors pin kind, title and duration:
//!
//! | constructor           | kind    | auto-close |
//! |-----------------------|---------|------------|
//! | `notify_low_stock`    | Warning | 8 s        |
//! | `notify_out_of_stock` | Error   | 10 s       |
//! | `notify_success`      | Success | 3 s        |
//! | `notify_error`        | Error   | 6 s        |
//! | plain `add` default   | any     | 5 s        |
//!
//! These durations are part of the contract, not incidental.
//!
//! ## Failure Model
//! None. Dispatch is fire-and-forget; a failed or dropped notification must
//! never fail the mutation that triggered it, so no operation here returns
//! a `Result`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;
use uuid::Uuid;

// =============================================================================
// Contract Durations
// =============================================================================

/// Default auto-close for plain notifications (info, offline notices).
pub const DEFAULT_AUTO_CLOSE: Duration = Duration::from_secs(5);

/// Low-stock warnings linger a little longer than the default.
pub const LOW_STOCK_AUTO_CLOSE: Duration = Duration::from_secs(8);

/// Out-of-stock alerts linger longest.
pub const OUT_OF_STOCK_AUTO_CLOSE: Duration = Duration::from_secs(10);

/// Success toasts disappear quickly.
pub const SUCCESS_AUTO_CLOSE: Duration = Duration::from_secs(3);

/// Error toasts stay visible a bit longer than successes.
pub const ERROR_AUTO_CLOSE: Duration = Duration::from_secs(6);

// =============================================================================
// Notification Types
// =============================================================================

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    Info,
}

/// A transient alert record. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    /// Unique identifier (UUID v4), used for dismissal.
    pub id: String,

    pub kind: NotificationKind,

    /// Short headline shown in the toast.
    pub title: String,

    /// Longer body text.
    pub message: String,

    /// When the notification was added.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// Auto-close delay in milliseconds; `None` keeps the notification
    /// until it is dismissed manually.
    pub auto_close_ms: Option<u64>,
}

// =============================================================================
// Notification Engine
// =============================================================================

/// The shared alert inbox.
///
/// Cheap to clone (all clones share one inbox). Auto-expiry timers are
/// spawned on the ambient Tokio runtime, so the engine must be used from
/// within one.
#[derive(Debug, Clone, Default)]
pub struct NotificationEngine {
    inbox: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationEngine {
    /// Creates a new, empty engine.
    pub fn new() -> Self {
        NotificationEngine {
            inbox: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a notification at the tail of the inbox and returns its id.
    ///
    /// When `auto_close` is set, a timer removes the notification after the
    /// delay; pass [`DEFAULT_AUTO_CLOSE`] for the conventional 5 s, or
    /// `None` for a sticky notification.
    pub fn add(
        &self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        auto_close: Option<Duration>,
    ) -> String {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            kind,
            title: title.into(),
            message: message.into(),
            created_at: Utc::now(),
            auto_close_ms: auto_close.map(|d| d.as_millis() as u64),
        };
        let id = notification.id.clone();

        debug!(id = %id, ?kind, title = %notification.title, "notification added");

        self.inbox
            .lock()
            .expect("notification inbox poisoned")
            .push(notification);

        if let Some(delay) = auto_close {
            let engine = self.clone();
            let expire_id = id.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                engine.remove(&expire_id);
            });
        }

        id
    }

    /// Removes a notification by id.
    ///
    /// Idempotent: an id that is already gone (expired or dismissed on
    /// another path) is silently ignored.
    pub fn remove(&self, id: &str) {
        self.inbox
            .lock()
            .expect("notification inbox poisoned")
            .retain(|n| n.id != id);
    }

    /// Empties the inbox.
    pub fn clear_all(&self) {
        self.inbox
            .lock()
            .expect("notification inbox poisoned")
            .clear();
    }

    /// Returns a snapshot of the inbox in display order.
    pub fn list(&self) -> Vec<Notification> {
        self.inbox
            .lock()
            .expect("notification inbox poisoned")
            .clone()
    }

    /// Number of notifications currently in the inbox.
    pub fn len(&self) -> usize {
        self.inbox
            .lock()
            .expect("notification inbox poisoned")
            .len()
    }

    /// True when the inbox is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Semantic Constructors
    // =========================================================================
    // The stock-check dispatcher uses these and nothing else.

    /// Warns that a product's stock fell to the threshold or below.
    pub fn notify_low_stock(&self, name: &str, stock: i64, threshold: i64) -> String {
        self.add(
            NotificationKind::Warning,
            "Low Stock Alert",
            format!(
                "{} is running low! Current stock: {} (threshold: {})",
                name, stock, threshold
            ),
            Some(LOW_STOCK_AUTO_CLOSE),
        )
    }

    /// Announces that a product's stock reached zero.
    pub fn notify_out_of_stock(&self, name: &str) -> String {
        self.add(
            NotificationKind::Error,
            "Out of Stock",
            format!("{} is out of stock!", name),
            Some(OUT_OF_STOCK_AUTO_CLOSE),
        )
    }

    /// Short-lived success toast.
    pub fn notify_success(&self, title: &str, message: &str) -> String {
        self.add(
            NotificationKind::Success,
            title,
            message,
            Some(SUCCESS_AUTO_CLOSE),
        )
    }

    /// Error toast.
    pub fn notify_error(&self, title: &str, message: &str) -> String {
        self.add(
            NotificationKind::Error,
            title,
            message,
            Some(ERROR_AUTO_CLOSE),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_preserves_insertion_order() {
        let engine = NotificationEngine::new();
        engine.add(NotificationKind::Info, "first", "a", None);
        engine.add(NotificationKind::Info, "second", "b", None);

        let inbox = engine.list();
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox[0].title, "first");
        assert_eq!(inbox[1].title, "second");
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let engine = NotificationEngine::new();
        let id = engine.add(NotificationKind::Info, "t", "m", None);

        engine.remove(&id);
        assert!(engine.is_empty());

        // Removing again (expiry racing dismissal) is a no-op.
        engine.remove(&id);
        assert!(engine.is_empty());
    }

    #[tokio::test]
    async fn test_clear_all() {
        let engine = NotificationEngine::new();
        engine.add(NotificationKind::Info, "a", "", None);
        engine.add(NotificationKind::Info, "b", "", None);

        engine.clear_all();
        assert!(engine.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_expiry_removes_after_duration() {
        let engine = NotificationEngine::new();
        engine.add(
            NotificationKind::Info,
            "ephemeral",
            "",
            Some(DEFAULT_AUTO_CLOSE),
        );
        assert_eq!(engine.len(), 1);

        // Paused clock auto-advances past the 5 s timer.
        tokio::time::sleep(Duration::from_secs(6)).await;
        tokio::task::yield_now().await;

        assert!(engine.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sticky_notification_survives() {
        let engine = NotificationEngine::new();
        engine.add(NotificationKind::Info, "sticky", "", None);

        tokio::time::sleep(Duration::from_secs(60)).await;
        tokio::task::yield_now().await;

        assert_eq!(engine.len(), 1);
    }

    #[tokio::test]
    async fn test_low_stock_constructor_contract() {
        let engine = NotificationEngine::new();
        engine.notify_low_stock("Chocolate Cake", 3, 5);

        let inbox = engine.list();
        assert_eq!(inbox[0].kind, NotificationKind::Warning);
        assert_eq!(inbox[0].title, "Low Stock Alert");
        assert!(inbox[0].message.contains("Chocolate Cake"));
        assert!(inbox[0].message.contains('3'));
        assert_eq!(inbox[0].auto_close_ms, Some(8_000));
    }

    #[tokio::test]
    async fn test_out_of_stock_constructor_contract() {
        let engine = NotificationEngine::new();
        engine.notify_out_of_stock("Croissant");

        let inbox = engine.list();
        assert_eq!(inbox[0].kind, NotificationKind::Error);
        assert_eq!(inbox[0].title, "Out of Stock");
        assert_eq!(inbox[0].auto_close_ms, Some(10_000));
    }

    #[tokio::test]
    async fn test_success_and_error_durations() {
        let engine = NotificationEngine::new();
        engine.notify_success("Saved", "Product added");
        engine.notify_error("Failed", "Backend rejected the sale");

        let inbox = engine.list();
        assert_eq!(inbox[0].auto_close_ms, Some(3_000));
        assert_eq!(inbox[1].auto_close_ms, Some(6_000));
    }
}
