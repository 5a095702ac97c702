//! # App Wiring
//!
//! Constructs and owns one instance of everything: the ledger state, the
//! notification engine with its dispatcher task, the remote client and the
//! snapshot database.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Open Database ────────────────────────────────────────────────────► │
//! │     • SQLite with WAL mode, pending migrations applied                  │
//! │                                                                         │
//! │  2. Restore Snapshot ─────────────────────────────────────────────────► │
//! │     • stored ledger found → restored verbatim                           │
//! │     • first launch → seeded starter ledger, written back immediately    │
//! │                                                                         │
//! │  3. Wire State ───────────────────────────────────────────────────────► │
//! │     • LedgerState around the restored ledger                            │
//! │     • NotificationEngine + alert dispatcher task                        │
//! │     • RemoteClient (with session authority when configured)             │
//! │                                                                         │
//! │  4. Hand the App to the page layer ───────────────────────────────────► │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The application root owns one [`App`]. Tests construct fresh instances
//! with in-memory databases - nothing here is a process-wide singleton.

use std::path::PathBuf;
use std::sync::Arc;

use directories::ProjectDirs;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crumb_core::ledger::Ledger;
use crumb_db::{Database, DbConfig, LEDGER_SNAPSHOT_KEY};
use crumb_notify::NotificationEngine;
use crumb_sync::{RemoteClient, SessionAuthority};

use crate::alerts::spawn_alert_dispatcher;
use crate::error::ClientError;
use crate::state::LedgerState;

// =============================================================================
// Configuration
// =============================================================================

/// Application configuration.
pub struct AppConfig {
    /// Snapshot database configuration.
    pub db: DbConfig,

    /// Base URL of the remote backend, e.g. `http://localhost:5000/api`.
    pub remote_base_url: String,

    /// Session authority for bearer credentials; `None` runs anonymous.
    pub session: Option<Arc<dyn SessionAuthority>>,

    /// Seed the starter ledger when no snapshot exists yet.
    /// Default: true.
    pub seed_on_first_launch: bool,
}

impl AppConfig {
    /// Creates a configuration with the given database and backend URL.
    pub fn new(db: DbConfig, remote_base_url: impl Into<String>) -> Self {
        AppConfig {
            db,
            remote_base_url: remote_base_url.into(),
            session: None,
            seed_on_first_launch: true,
        }
    }

    /// Attaches a session authority.
    pub fn session(mut self, session: Arc<dyn SessionAuthority>) -> Self {
        self.session = Some(session);
        self
    }

    /// Sets whether a missing snapshot seeds the starter ledger.
    pub fn seed_on_first_launch(mut self, seed: bool) -> Self {
        self.seed_on_first_launch = seed;
        self
    }

    /// Resolves the default platform database path.
    ///
    /// `CRUMB_DB_PATH` overrides; otherwise the platform data directory
    /// is used and created if missing.
    pub fn default_database_path() -> Result<PathBuf, ClientError> {
        if let Ok(path) = std::env::var("CRUMB_DB_PATH") {
            return Ok(PathBuf::from(path));
        }

        let proj_dirs = ProjectDirs::from("com", "crumb", "pos")
            .ok_or_else(|| ClientError::internal("could not determine app data directory"))?;
        let data_dir = proj_dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .map_err(|e| ClientError::internal(format!("could not create data directory: {e}")))?;
        Ok(data_dir.join("crumb.db"))
    }
}

// =============================================================================
// App
// =============================================================================

/// One running client application.
pub struct App {
    /// The authoritative ledger.
    pub ledger: LedgerState,

    /// The alert inbox the page renders.
    pub notify: NotificationEngine,

    /// The remote backend client.
    pub remote: RemoteClient,

    /// Snapshot persistence.
    pub db: Database,

    dispatcher: JoinHandle<()>,
}

impl App {
    /// Opens the database and starts the application.
    pub async fn start(config: AppConfig) -> Result<App, ClientError> {
        let db = Database::new(config.db.clone()).await?;
        Self::with_database(db, config).await
    }

    /// Starts the application over an already-open database.
    ///
    /// Split out so tests can pre-populate the store before startup.
    pub async fn with_database(db: Database, config: AppConfig) -> Result<App, ClientError> {
        // Restore the persisted ledger, or seed on first launch.
        let ledger = match db.snapshots().load::<Ledger>(LEDGER_SNAPSHOT_KEY).await? {
            Some(restored) => {
                info!(
                    products = restored.products().len(),
                    sales = restored.sales().len(),
                    "Ledger snapshot restored"
                );
                restored
            }
            None if config.seed_on_first_launch => {
                info!("No snapshot found, seeding starter ledger");
                let seeded = Ledger::seed();
                db.snapshots().save(LEDGER_SNAPSHOT_KEY, &seeded).await?;
                seeded
            }
            None => Ledger::new(),
        };

        let (ledger, alert_rx) = LedgerState::new(ledger);
        let notify = NotificationEngine::new();
        let dispatcher = spawn_alert_dispatcher(notify.clone(), alert_rx);

        let remote = match config.session {
            Some(session) => RemoteClient::with_session(&config.remote_base_url, session),
            None => RemoteClient::new(&config.remote_base_url),
        };

        info!(backend = %config.remote_base_url, "Crumb client started");

        Ok(App {
            ledger,
            notify,
            remote,
            db,
            dispatcher,
        })
    }

    /// Persists the current ledger snapshot, best-effort.
    ///
    /// Called by every action after a committed mutation. The in-memory
    /// commit already happened, so a failed disk write is logged and
    /// swallowed rather than failing the action.
    pub async fn save_snapshot(&self) {
        let snapshot = self.ledger.snapshot();
        if let Err(err) = self.db.snapshots().save(LEDGER_SNAPSHOT_KEY, &snapshot).await {
            warn!(error = %err, "snapshot write failed; ledger remains committed in memory");
        }
    }

    /// Stops the dispatcher and closes the database.
    pub async fn shutdown(self) {
        self.dispatcher.abort();
        self.db.close().await;
    }
}

// =============================================================================
// Tracing
// =============================================================================

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=crumb=trace` - Show trace for crumb crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,crumb=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crumb_core::types::NewExpense;

    #[tokio::test]
    async fn test_first_launch_seeds_and_persists() {
        let app = App::start(AppConfig::new(DbConfig::in_memory(), "http://localhost:0"))
            .await
            .unwrap();

        assert_eq!(app.ledger.read(|l| l.products().len()), 3);

        // The seeded ledger was written back immediately.
        let stored: Option<Ledger> = app
            .db
            .snapshots()
            .load(LEDGER_SNAPSHOT_KEY)
            .await
            .unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_startup_restores_existing_snapshot() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // Pre-populate the store with a non-seed ledger.
        let mut ledger = Ledger::new();
        ledger
            .add_expense(NewExpense {
                category: crumb_core::types::ExpenseCategory::Rent,
                amount_cents: 120_000,
                note: "March".to_string(),
            })
            .unwrap();
        db.snapshots()
            .save(LEDGER_SNAPSHOT_KEY, &ledger)
            .await
            .unwrap();

        let app = App::with_database(
            db,
            AppConfig::new(DbConfig::in_memory(), "http://localhost:0"),
        )
        .await
        .unwrap();

        // Restored verbatim: no seed products, the expense survived.
        assert_eq!(app.ledger.read(|l| l.products().len()), 0);
        assert_eq!(app.ledger.read(|l| l.expenses().len()), 1);
    }

    #[tokio::test]
    async fn test_first_launch_without_seeding() {
        let app = App::start(
            AppConfig::new(DbConfig::in_memory(), "http://localhost:0")
                .seed_on_first_launch(false),
        )
        .await
        .unwrap();

        assert_eq!(app.ledger.read(|l| l.products().len()), 0);
    }
}
