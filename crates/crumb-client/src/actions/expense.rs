//! # Expense Action

use tracing::debug;

use crumb_core::types::{Expense, NewExpense};
use crumb_core::validation;
use crumb_sync::reconcile::commit;

use super::offline_notice;
use crate::app::App;
use crate::error::ClientError;

/// Logs an expense.
pub async fn add_expense(app: &App, draft: NewExpense) -> Result<Expense, ClientError> {
    debug!(category = ?draft.category, amount_cents = draft.amount_cents, "add_expense action");

    validation::validate_non_negative("amount", draft.amount_cents)?;

    let committed = commit(
        app.remote.post::<_, Expense>("/expenses", &draft),
        |confirmed| {
            app.ledger.apply(|ledger| match confirmed {
                Some(expense) => ledger.insert_expense(expense),
                None => ledger.add_expense(draft.clone()),
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

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::testutil::offline_app;
    use crate::error::ErrorCode;
    use crumb_core::types::ExpenseCategory;

    #[tokio::test]
    async fn test_offline_expense_commits_locally() {
        let app = offline_app().await;

        let expense = add_expense(
            &app,
            NewExpense {
                category: ExpenseCategory::Utilities,
                amount_cents: 4200,
                note: "electricity".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(expense.amount_cents, 4200);
        assert_eq!(app.ledger.read(|l| l.expenses().len()), 1);
        assert_eq!(app.ledger.read(|l| l.stats().expenses_cents), 4200);
    }

    #[tokio::test]
    async fn test_negative_amount_rejected() {
        let app = offline_app().await;

        let err = add_expense(
            &app,
            NewExpense {
                category: ExpenseCategory::Other,
                amount_cents: -5,
                note: String::new(),
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(app.ledger.read(|l| l.expenses().is_empty()));
    }
}
