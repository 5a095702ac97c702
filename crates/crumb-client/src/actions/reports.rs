//! # Reporting Reads
//!
//! The read-side counterpart of the dual-write policy: the dashboard
//! prefers the backend's aggregate view and silently falls back to
//! locally derived statistics when the backend is unreachable. Reads
//! don't surface the offline notice - nothing was at risk of being lost.
//!
//! Also hosts the CSV export consumed by the reports page.

use tracing::{debug, info};

use crumb_core::types::{Activity, Stats};

use crate::app::App;
use crate::error::ClientError;

/// Fetches the dashboard statistics.
///
/// Remote aggregate when reachable; locally derived [`Stats`] otherwise.
/// A backend that answers with an error status still surfaces that error -
/// only connectivity failures fall back.
pub async fn dashboard(app: &App) -> Result<Stats, ClientError> {
    debug!("dashboard action");

    match app.remote.get::<Stats>("/reports/dashboard").await {
        Ok(Some(stats)) => Ok(stats),
        Ok(None) => Ok(app.ledger.read(|l| l.stats())),
        Err(err) if err.is_connectivity() => {
            info!(error = %err, "backend unreachable, deriving dashboard locally");
            Ok(app.ledger.read(|l| l.stats()))
        }
        Err(err) => Err(err.into()),
    }
}

/// The activity trail for the history page, oldest first.
pub fn activity_history(app: &App) -> Vec<Activity> {
    app.ledger.read(|l| l.activities().to_vec())
}

// =============================================================================
// CSV Export
// =============================================================================

/// Renders the sales history as CSV: one row per sale with its date,
/// customer, line summary and total.
pub fn sales_csv(app: &App) -> String {
    let (sales, date_format) = app
        .ledger
        .read(|l| (l.sales().to_vec(), l.settings().date_format.clone()));

    let mut out = String::new();
    push_row(&mut out, &["id", "date", "customer", "items", "total"]);

    for sale in &sales {
        let items = sale
            .lines
            .iter()
            .map(|line| format!("{}x {}", line.qty, line.name))
            .collect::<Vec<_>>()
            .join("; ");
        let customer = sale
            .customer
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_default();

        push_row(
            &mut out,
            &[
                &sale.id,
                &sale.created_at.format(&date_format).to_string(),
                &customer,
                &items,
                &sale.total().to_string(),
            ],
        );
    }

    out
}

/// Appends one CSV row. Every field is quoted; embedded quotes are
/// escaped by doubling.
fn push_row(out: &mut String, fields: &[&str]) {
    let row = fields
        .iter()
        .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&row);
    out.push('\n');
}

// =============================================================================
// Unit Tests
// =============================================================================
