//! # Actions
//!
//! One function per mutating page operation. Every action follows the
//! same protocol:
//!
//! ```text
//! 1. validate input locally (ledger untouched on rejection)
//! 2. attempt the remote write
//! 3. commit through crumb_sync::reconcile::commit
//!      Ok          → apply (server record authoritative when supplied)
//!      offline     → apply local payload + non-blocking offline notice
//!      rejected    → surface the server message, ledger untouched
//! 4. persist the snapshot (best-effort)
//! ```
//!
//! Only one mutation is outstanding per user action: each action awaits
//! its remote attempt to resolution before returning. There is no retry
//! loop here - a rejected write is retried by the user, explicitly.

pub mod expense;
pub mod ingredient;
pub mod product;
pub mod reports;
pub mod sale;
pub mod settings;

use crumb_notify::{NotificationKind, DEFAULT_AUTO_CLOSE};

use crate::app::App;

/// Surfaces the non-blocking informational notice after a local-fallback
/// commit.
pub(crate) fn offline_notice(app: &App) {
    app.notify.add(
        NotificationKind::Info,
        "Offline",
        "backend offline — using local data",
        Some(DEFAULT_AUTO_CLOSE),
    );
}

// =============================================================================
// Test Fixtures
// =============================================================================

#[cfg(test)]
pub(crate) mod testutil {
    use axum::Router;
    use crumb_db::DbConfig;

    use crate::app::{App, AppConfig};

    /// A loopback address with nothing listening on it: every request
    /// fails with a connectivity error.
    pub async fn dead_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    /// A seeded app whose backend is unreachable.
    pub async fn offline_app() -> App {
        let base = dead_url().await;
        App::start(AppConfig::new(DbConfig::in_memory(), base))
            .await
            .unwrap()
    }

    /// A seeded app talking to the given loopback router.
    pub async fn app_with_router(router: Router) -> App {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        App::start(AppConfig::new(DbConfig::in_memory(), format!("http://{}", addr)))
            .await
            .unwrap()
    }

    /// Lets the alert dispatcher task drain its channel.
    pub async fn drain_alerts() {
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }
}
