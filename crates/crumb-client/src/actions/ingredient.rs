//! # Ingredient Actions
//!
//! Mirrors the product actions without stock-alert side effects.

use tracing::debug;

use crumb_core::types::{Ingredient, IngredientPatch, NewIngredient};
use crumb_core::validation;
use crumb_sync::reconcile::commit;

use super::offline_notice;
use crate::app::App;
use crate::error::{ClientError, ErrorCode};

/// Adds an ingredient.
pub async fn add_ingredient(app: &App, draft: NewIngredient) -> Result<Ingredient, ClientError> {
    debug!(name = %draft.name, "add_ingredient action");

    validation::validate_name("name", &draft.name)?;
    validation::validate_non_negative("quantity", draft.quantity)?;

    let committed = commit(
        app.remote.post::<_, Ingredient>("/ingredients", &draft),
        |confirmed| {
            app.ledger.apply(|ledger| match confirmed {
                Some(ingredient) => ledger.insert_ingredient(ingredient),
                None => ledger.add_ingredient(draft.clone()),
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

/// Updates an ingredient by id with a merge patch.
pub async fn update_ingredient(
    app: &App,
    id: &str,
    patch: IngredientPatch,
) -> Result<Ingredient, ClientError> {
    debug!(id = %id, "update_ingredient action");

    if let Some(name) = patch.name.as_deref() {
        validation::validate_name("name", name)?;
    }
    if let Some(quantity) = patch.quantity {
        validation::validate_non_negative("quantity", quantity)?;
    }
    if app.ledger.read(|l| l.find_ingredient(id).is_none()) {
        return Err(ClientError::new(
            ErrorCode::NotFound,
            format!("Ingredient not found: {id}"),
        ));
    }

    let path = format!("/ingredients/{id}");
    let committed = commit(
        app.remote.put::<_, Ingredient>(&path, &patch),
        |confirmed| {
            app.ledger.apply(|ledger| match confirmed {
                Some(ingredient) => ledger.replace_ingredient(ingredient),
                None => ledger.update_ingredient(id, patch.clone()),
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

/// Deletes an ingredient by id. Idempotent end to end.
pub async fn delete_ingredient(app: &App, id: &str) -> Result<Option<Ingredient>, ClientError> {
    debug!(id = %id, "delete_ingredient action");

    let path = format!("/ingredients/{id}");
    let committed = commit(
        app.remote.delete::<serde_json::Value>(&path),
        |_confirmed| {
            Ok::<_, crumb_core::error::LedgerError>(
                app.ledger.with_mut(|ledger| ledger.delete_ingredient(id)),
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
    use crate::actions::testutil::offline_app;

    #[tokio::test]
    async fn test_offline_ingredient_lifecycle() {
        let app = offline_app().await;

        let added = add_ingredient(
            &app,
            NewIngredient {
                name: "Yeast (g)".to_string(),
                quantity: 500,
                expires_at: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(app.ledger.read(|l| l.ingredients().len()), 3);

        let updated = update_ingredient(
            &app,
            &added.id,
            IngredientPatch {
                quantity: Some(250),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.quantity, 250);

        assert!(delete_ingredient(&app, &added.id).await.unwrap().is_some());
        assert!(delete_ingredient(&app, &added.id).await.unwrap().is_none());

        // Ingredient mutations never raise stock alerts; the only inbox
        // entries are the offline notices from the fallback commits.
        assert!(app.notify.list().iter().all(|n| n.title == "Offline"));
    }

    #[tokio::test]
    async fn test_update_missing_ingredient() {
        let app = offline_app().await;
        let err = update_ingredient(&app, "ghost", IngredientPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
