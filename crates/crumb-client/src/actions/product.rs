//! # Product Actions
//!
//! Remote-first product CRUD with local fallback.

use tracing::{debug, info};

use crumb_core::types::{NewProduct, Product, ProductPatch};
use crumb_core::validation;
use crumb_sync::reconcile::commit;

use super::offline_notice;
use crate::app::App;
use crate::error::{ClientError, ErrorCode};

/// Adds a product.
///
/// The backend's created record, when returned, is adopted as
/// authoritative (its id wins); otherwise the locally-built draft commits.
pub async fn add_product(app: &App, draft: NewProduct) -> Result<Product, ClientError> {
    debug!(name = %draft.name, "add_product action");

    // Reject bad input before spending a round trip; the same rules run
    // again inside the ledger mutation.
    validation::validate_name("name", &draft.name)?;
    validation::validate_non_negative("price", draft.price_cents)?;
    validation::validate_non_negative("stock", draft.stock)?;

    let committed = commit(
        app.remote.post::<_, Product>("/products", &draft),
        |confirmed| {
            app.ledger.apply(|ledger| match confirmed {
                Some(product) => ledger.insert_product(product),
                None => ledger.add_product(draft.clone()),
            })
        },
    )
    .await?;

    if committed.is_fallback() {
        offline_notice(app);
    }
    app.save_snapshot().await;

    info!(id = %committed.record.id, name = %committed.record.name, "Product added");
    Ok(committed.record)
}

/// Updates a product by id with a merge patch.
pub async fn update_product(
    app: &App,
    id: &str,
    patch: ProductPatch,
) -> Result<Product, ClientError> {
    debug!(id = %id, "update_product action");

    if let Some(name) = patch.name.as_deref() {
        validation::validate_name("name", name)?;
    }
    if let Some(price_cents) = patch.price_cents {
        validation::validate_non_negative("price", price_cents)?;
    }
    if let Some(stock) = patch.stock {
        validation::validate_non_negative("stock", stock)?;
    }
    if app.ledger.read(|l| l.find_product(id).is_none()) {
        return Err(ClientError::new(
            ErrorCode::NotFound,
            format!("Product not found: {id}"),
        ));
    }

    let path = format!("/products/{id}");
    let committed = commit(
        app.remote.put::<_, Product>(&path, &patch),
        |confirmed| {
            app.ledger.apply(|ledger| match confirmed {
                Some(product) => ledger.replace_product(product),
                None => ledger.update_product(id, patch.clone()),
            })
        },
    )
    .await?;

    if committed.is_fallback() {
        offline_notice(app);
    }
    app.save_snapshot().await;

    Ok(committed.record)
}

/// Deletes a product by id.
///
/// Idempotent end to end: an id that is already gone (locally or on a
/// retried request) is a no-op, and `Ok(None)` reports that nothing was
/// removed.
pub async fn delete_product(app: &App, id: &str) -> Result<Option<Product>, ClientError> {
    debug!(id = %id, "delete_product action");

    let path = format!("/products/{id}");
    let committed = commit(
        app.remote.delete::<serde_json::Value>(&path),
        |_confirmed| {
            Ok::<_, crumb_core::error::LedgerError>(
                app.ledger.with_mut(|ledger| ledger.delete_product(id)),
            )
        },
    )
    .await?;

    if committed.is_fallback() {
        offline_notice(app);
    }
    app.save_snapshot().await;

    Ok(committed.record)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testutil::{app_with_router, offline_app};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    fn draft(name: &str, price_cents: i64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price_cents,
            stock,
        }
    }

    #[tokio::test]
    async fn test_offline_add_commits_locally_with_notice() {
        let app = offline_app().await;

        let product = add_product(&app, draft("Baguette", 300, 12)).await.unwrap();

        // Local ledger mutated exactly as if the write had succeeded.
        assert_eq!(app.ledger.read(|l| l.products().len()), 4);
        assert!(app.ledger.read(|l| l.find_product(&product.id).is_some()));

        // The non-blocking offline notice surfaced.
        let inbox = app.notify.list();
        assert!(inbox.iter().any(|n| n.title == "Offline"));
    }

    #[tokio::test]
    async fn test_rejected_add_leaves_ledger_unchanged() {
        let router = Router::new().route(
            "/products",
            post(|| async {
                (
                    axum::http::StatusCode::BAD_REQUEST,
                    Json(json!({"message": "duplicate product"})),
                )
            }),
        );
        let app = app_with_router(router).await;

        let err = add_product(&app, draft("Baguette", 300, 12))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::RemoteRejected);
        assert_eq!(err.message, "duplicate product");
        // Seed products only - the rejected write never touched the ledger.
        assert_eq!(app.ledger.read(|l| l.products().len()), 3);
        assert!(app.notify.is_empty());
    }

    #[tokio::test]
    async fn test_server_record_is_authoritative() {
        let router = Router::new().route(
            "/products",
            post(|| async {
                (
                    axum::http::StatusCode::CREATED,
                    Json(json!({
                        "id": "srv-1",
                        "name": "Baguette",
                        "price_cents": 300,
                        "stock": 12,
                        "created_at": "2026-01-05T08:00:00Z",
                        "updated_at": "2026-01-05T08:00:00Z"
                    })),
                )
            }),
        );
        let app = app_with_router(router).await;

        let product = add_product(&app, draft("Baguette", 300, 12)).await.unwrap();

        // The server-assigned id won over a locally generated one.
        assert_eq!(product.id, "srv-1");
        assert!(app.ledger.read(|l| l.find_product("srv-1").is_some()));
    }

    #[tokio::test]
    async fn test_validation_rejected_before_any_attempt() {
        let app = offline_app().await;

        let err = add_product(&app, draft("", 300, 12)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(app.ledger.read(|l| l.products().len()), 3);
        // No offline notice either: the request was never attempted.
        assert!(app.notify.is_empty());
    }

    #[tokio::test]
    async fn test_offline_update_and_missing_id() {
        let app = offline_app().await;

        let updated = update_product(
            &app,
            "p2",
            ProductPatch {
                price_cents: Some(275),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.price_cents, 275);

        let err = update_product(&app, "ghost", ProductPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_offline_delete_is_idempotent() {
        let app = offline_app().await;

        assert!(delete_product(&app, "p1").await.unwrap().is_some());
        assert!(delete_product(&app, "p1").await.unwrap().is_none());
        assert_eq!(app.ledger.read(|l| l.products().len()), 2);
    }

    #[tokio::test]
    async fn test_offline_commit_is_persisted() {
        let app = offline_app().await;
        add_product(&app, draft("Baguette", 300, 12)).await.unwrap();

        let stored: crumb_core::ledger::Ledger = app
            .db
            .snapshots()
            .load(crumb_db::LEDGER_SNAPSHOT_KEY)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.products().len(), 4);
    }
}
