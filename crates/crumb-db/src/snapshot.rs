//! # Snapshot Repository
//!
//! Persists serializable state as single named records.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  snapshots                                                              │
//! │  ┌──────────────┬───────────────────────────────┬───────────────────┐  │
//! │  │ key (PK)     │ body (JSON document)          │ updated_at        │  │
//! │  ├──────────────┼───────────────────────────────┼───────────────────┤  │
//! │  │ crumb-ledger │ {"products":[...],"sales":..} │ 2026-03-01T09:31Z │  │
//! │  └──────────────┴───────────────────────────────┴───────────────────┘  │
//! │                                                                         │
//! │  One row per snapshot key. Writes upsert, restores read verbatim.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The repository is generic over serde so tests can persist small probe
//! types, but in production the only tenant is the ledger under
//! [`crate::LEDGER_SNAPSHOT_KEY`].

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for snapshot persistence.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.snapshots();
/// repo.save("crumb-ledger", &ledger).await?;
/// let restored: Option<Ledger> = repo.load("crumb-ledger").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Saves a snapshot under the given key, replacing any previous body.
    pub async fn save<T>(&self, key: &str, value: &T) -> DbResult<()>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_string(value)?;
        let updated_at = Utc::now().to_rfc3339();

        debug!(key = %key, bytes = body.len(), "Saving snapshot");

        sqlx::query(
            r#"
            INSERT INTO snapshots (key, body, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                body = excluded.body,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(body)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Loads the snapshot stored under the given key.
    ///
    /// Returns `Ok(None)` when no snapshot exists yet (first launch).
    pub async fn load<T>(&self, key: &str) -> DbResult<Option<T>>
    where
        T: DeserializeOwned,
    {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT body FROM snapshots WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some((body,)) => {
                debug!(key = %key, bytes = body.len(), "Snapshot restored");
                Ok(Some(serde_json::from_str(&body)?))
            }
            None => {
                debug!(key = %key, "No snapshot stored");
                Ok(None)
            }
        }
    }

    /// Deletes the snapshot under the given key. Absent keys are a no-op.
    pub async fn delete(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM snapshots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::LEDGER_SNAPSHOT_KEY;
    use crumb_core::ledger::Ledger;
    use crumb_core::types::{Customer, SaleLine};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_load_missing_snapshot_is_none() {
        let db = test_db().await;
        let restored: Option<Ledger> = db.snapshots().load(LEDGER_SNAPSHOT_KEY).await.unwrap();
        assert!(restored.is_none());
    }

    #[tokio::test]
    async fn test_ledger_round_trip() {
        let db = test_db().await;

        let mut ledger = Ledger::seed();
        ledger
            .record_sale(
                vec![SaleLine {
                    product_id: "p1".to_string(),
                    name: "Sourdough Loaf".to_string(),
                    price_cents: 500,
                    qty: 2,
                }],
                Some(Customer {
                    name: "Ana".to_string(),
                    phone: "555-0101".to_string(),
                    notes: String::new(),
                }),
            )
            .unwrap();

        db.snapshots()
            .save(LEDGER_SNAPSHOT_KEY, &ledger)
            .await
            .unwrap();

        let restored: Ledger = db
            .snapshots()
            .load(LEDGER_SNAPSHOT_KEY)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(restored, ledger);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_body() {
        let db = test_db().await;
        let repo = db.snapshots();

        repo.save("probe", &vec![1, 2, 3]).await.unwrap();
        repo.save("probe", &vec![4, 5]).await.unwrap();

        let restored: Vec<i32> = repo.load("probe").await.unwrap().unwrap();
        assert_eq!(restored, vec![4, 5]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = test_db().await;
        let repo = db.snapshots();

        repo.save("probe", "body").await.unwrap();
        repo.delete("probe").await.unwrap();
        repo.delete("probe").await.unwrap();

        let restored: Option<String> = repo.load("probe").await.unwrap();
        assert!(restored.is_none());
    }
}
