//! # Sale Action
//!
//! The checkout path: the single action with the most side effects per
//! commit (stock deduction, customer upsert, history append, stock
//! alerts), which is exactly why it runs through the same one-shot
//! reconciliation as everything else - the fallback can never
//! double-apply a sale or raise its alerts twice.

use serde::Serialize;
use tracing::{debug, info};

use crumb_core::types::{Customer, Sale, SaleLine};
use crumb_core::validation;
use crumb_sync::reconcile::commit;

use super::offline_notice;
use crate::app::App;
use crate::error::ClientError;

/// Wire payload for the sales resource.
#[derive(Debug, Serialize)]
struct SalePayload<'a> {
    items: &'a [SaleLine],
    customer: &'a Option<Customer>,
}

/// Commits a sale built from the page's cart.
///
/// Returns the committed sale - id and timestamp included - so the page
/// can render a receipt.
pub async fn record_sale(
    app: &App,
    lines: Vec<SaleLine>,
    customer: Option<Customer>,
) -> Result<Sale, ClientError> {
    debug!(lines = lines.len(), "record_sale action");

    validation::validate_sale_lines(&lines)?;

    let payload = SalePayload {
        items: &lines,
        customer: &customer,
    };
    let committed = commit(
        app.remote.post::<_, Sale>("/sales", &payload),
        |confirmed| {
            app.ledger.apply(|ledger| match confirmed {
                Some(sale) => ledger.adopt_sale(sale),
                None => ledger.record_sale(lines.clone(), customer.clone()),
            })
        },
    )
    .await?;

    if committed.is_fallback() {
        offline_notice(app);
    }
    app.save_snapshot().await;

    info!(
        sale_id = %committed.record.id,
        total_cents = committed.record.total_cents,
        lines = committed.record.lines.len(),
        "Sale recorded"
    );
    Ok(committed.record)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testutil::{app_with_router, drain_alerts, offline_app};
    use crate::error::ErrorCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use crumb_notify::NotificationKind;
    use serde_json::json;

    fn line(product_id: &str, name: &str, price_cents: i64, qty: i64) -> SaleLine {
        SaleLine {
            product_id: product_id.to_string(),
            name: name.to_string(),
            price_cents,
            qty,
        }
    }

    #[tokio::test]
    async fn test_offline_sale_commits_and_alerts_flow() {
        let app = offline_app().await;

        // Drain p3 (Chocolate Cake, stock 5, threshold 5).
        let receipt = record_sale(&app, vec![line("p3", "Chocolate Cake", 2000, 5)], None)
            .await
            .unwrap();

        assert_eq!(receipt.total_cents, 10000);
        assert_eq!(app.ledger.read(|l| l.find_product("p3").unwrap().stock), 0);

        drain_alerts().await;
        let inbox = app.notify.list();

        // Exactly one out-of-stock alert, zero low-stock alerts, plus the
        // offline notice from the fallback commit.
        let out_of_stock: Vec<_> = inbox
            .iter()
            .filter(|n| n.title == "Out of Stock")
            .collect();
        assert_eq!(out_of_stock.len(), 1);
        assert_eq!(out_of_stock[0].kind, NotificationKind::Error);
        assert!(inbox.iter().all(|n| n.title != "Low Stock Alert"));
        assert!(inbox.iter().any(|n| n.title == "Offline"));
    }

    #[tokio::test]
    async fn test_rejected_sale_leaves_everything_unchanged() {
        let router = Router::new().route(
            "/sales",
            post(|| async {
                (
                    axum::http::StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"message": "store is closed"})),
                )
            }),
        );
        let app = app_with_router(router).await;

        let err = record_sale(&app, vec![line("p3", "Chocolate Cake", 2000, 5)], None)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::RemoteRejected);
        assert_eq!(err.message, "store is closed");

        // No sale, no stock change, no alerts - the rejection was absorbed
        // nowhere.
        assert!(app.ledger.read(|l| l.sales().is_empty()));
        assert_eq!(app.ledger.read(|l| l.find_product("p3").unwrap().stock), 5);
        drain_alerts().await;
        assert!(app.notify.is_empty());
    }

    #[tokio::test]
    async fn test_server_confirmed_sale_is_adopted() {
        let router = Router::new().route(
            "/sales",
            post(|| async {
                (
                    axum::http::StatusCode::CREATED,
                    Json(json!({
                        "id": "srv-sale-1",
                        "lines": [{
                            "product_id": "p1",
                            "name": "Sourdough Loaf",
                            "price_cents": 500,
                            "qty": 2
                        }],
                        "customer": null,
                        "total_cents": 1000,
                        "created_at": "2026-01-05T08:00:00Z"
                    })),
                )
            }),
        );
        let app = app_with_router(router).await;

        let receipt = record_sale(&app, vec![line("p1", "Sourdough Loaf", 500, 2)], None)
            .await
            .unwrap();

        assert_eq!(receipt.id, "srv-sale-1");
        assert_eq!(app.ledger.read(|l| l.find_product("p1").unwrap().stock), 18);
        // Confirmed write: no offline notice.
        drain_alerts().await;
        assert!(app.notify.list().iter().all(|n| n.title != "Offline"));
    }

    #[tokio::test]
    async fn test_empty_cart_rejected_before_any_attempt() {
        let app = offline_app().await;
        let err = record_sale(&app, vec![], None).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(app.ledger.read(|l| l.sales().is_empty()));
    }

    #[tokio::test]
    async fn test_offline_sale_upserts_customer_and_persists() {
        let app = offline_app().await;

        record_sale(
            &app,
            vec![line("p2", "Croissant", 250, 2)],
            Some(Customer {
                name: "Ana".to_string(),
                phone: "555-0101".to_string(),
                notes: String::new(),
            }),
        )
        .await
        .unwrap();

        let stored: crumb_core::ledger::Ledger = app
            .db
            .snapshots()
            .load(crumb_db::LEDGER_SNAPSHOT_KEY)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.customers().len(), 1);
        assert_eq!(stored.sales().len(), 1);
    }
}
