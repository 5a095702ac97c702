//! # Settings Action
//!
//! Settings are not a remote resource - the backend exposes products,
//! ingredients, sales, expenses and the reports read. Saving settings is
//! therefore a purely local mutation plus snapshot persistence; no
//! reconciliation applies.

use tracing::debug;

use crumb_core::types::{Settings, SettingsPatch};

use crate::app::App;
use crate::error::ClientError;

/// Merge-patches the settings record and persists the snapshot.
pub async fn save_settings(app: &App, patch: SettingsPatch) -> Result<Settings, ClientError> {
    debug!("save_settings action");

    let settings = app.ledger.with_mut(|ledger| ledger.update_settings(patch));
    app.save_snapshot().await;

    Ok(settings)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testutil::offline_app;

    #[tokio::test]
    async fn test_save_settings_merges_and_persists() {
        let app = offline_app().await;

        let settings = save_settings(
            &app,
            SettingsPatch {
                low_stock_threshold: Some(10),
                theme: Some("dark".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(settings.low_stock_threshold, 10);
        assert_eq!(settings.theme, "dark");
        // Untouched fields survive the merge.
        assert_eq!(settings.currency_symbol, "$");

        let stored: crumb_core::ledger::Ledger = app
            .db
            .snapshots()
            .load(crumb_db::LEDGER_SNAPSHOT_KEY)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.settings().low_stock_threshold, 10);

        // Local-only mutation: no offline notice even with a dead backend.
        assert!(app.notify.is_empty());
    }

    #[tokio::test]
    async fn test_new_threshold_drives_later_stock_checks() {
        let app = offline_app().await;

        save_settings(
            &app,
            SettingsPatch {
                low_stock_threshold: Some(40),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        // p2 (Croissant) has stock 50; with threshold 40 an update down to
        // 35 must now raise a low-stock alert.
        let applied = app.ledger.apply(|ledger| {
            ledger.update_product(
                "p2",
                crumb_core::types::ProductPatch {
                    stock: Some(35),
                    ..Default::default()
                },
            )
        });
        assert!(applied.is_ok());

        crate::actions::testutil::drain_alerts().await;
        assert!(app
            .notify
            .list()
            .iter()
            .any(|n| n.title == "Low Stock Alert"));
    }
}
