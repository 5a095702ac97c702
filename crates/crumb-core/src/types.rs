//! # Domain Types
//!
//! Core domain types used throughout Crumb POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │    Expense      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  lines (frozen) │   │  category       │       │
//! │  │  price_cents    │   │  customer       │   │  amount_cents   │       │
//! │  │  stock          │   │  total_cents    │   │  note           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Ingredient    │   │    Customer     │   │    Activity     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  quantity       │   │  phone (key)    │   │  kind           │       │
//! │  │  expires_at     │   │  name, notes    │   │  payload (JSON) │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A [`SaleLine`] freezes the product name and price at the moment the sale
//! commits. Later edits to the Product entity never rewrite sales history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the sales page and receipts.
    pub name: String,

    /// Price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// Units currently on hand. Never negative: sales floor it at zero.
    pub stock: i64,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Builds a fresh product record from its draft.
    pub fn from_draft(draft: NewProduct) -> Self {
        let now = Utc::now();
        Product {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            price_cents: draft.price_cents,
            stock: draft.stock,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Draft for a product about to be added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// Partial update applied to an existing product.
///
/// Absent fields are left untouched (merge-patch semantics).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub stock: Option<i64>,
}

impl ProductPatch {
    /// True when the patch modifies the stock level.
    ///
    /// The ledger re-runs the stock check only for stock-touching patches.
    #[inline]
    pub fn touches_stock(&self) -> bool {
        self.stock.is_some()
    }
}

// =============================================================================
// Ingredient
// =============================================================================

/// A raw ingredient tracked in inventory.
///
/// Independent of [`Product`]: no recipe cross-reference is enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Ingredient {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name, usually with its unit, e.g. "Flour (kg)".
    pub name: String,

    /// Quantity on hand. Never negative.
    pub quantity: i64,

    /// Optional expiry date.
    #[ts(as = "Option<String>")]
    pub expires_at: Option<NaiveDate>,

    /// When the ingredient was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the ingredient was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Ingredient {
    /// Builds a fresh ingredient record from its draft.
    pub fn from_draft(draft: NewIngredient) -> Self {
        let now = Utc::now();
        Ingredient {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            quantity: draft.quantity,
            expires_at: draft.expires_at,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Draft for an ingredient about to be added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewIngredient {
    pub name: String,
    pub quantity: i64,
    #[ts(as = "Option<String>")]
    pub expires_at: Option<NaiveDate>,
}

/// Partial update applied to an existing ingredient.
///
/// `expires_at` uses a double Option: the outer level means "touch this
/// field at all", the inner level carries the new value (`Some(None)`
/// clears the expiry date).
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IngredientPatch {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    #[ts(as = "Option<Option<String>>")]
    pub expires_at: Option<Option<NaiveDate>>,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer, keyed by phone number.
///
/// The ledger holds at most one record per phone; repeat purchases
/// overwrite name and notes (last write wins). Purchase totals and counts
/// are derived from sales history, never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub name: String,
    /// Unique key within the customer list.
    pub phone: String,
    #[serde(default)]
    pub notes: String,
}

// =============================================================================
// Sale
// =============================================================================

/// A line item, composed by the page while building a cart and frozen
/// verbatim into the committed sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleLine {
    /// The product this line deducts stock from.
    pub product_id: String,

    /// Product name at time of sale (frozen).
    pub name: String,

    /// Unit price in cents at time of sale (frozen).
    pub price_cents: i64,

    /// Quantity sold. At least 1.
    pub qty: i64,
}

impl SaleLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Calculates the line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price().multiply_quantity(self.qty)
    }
}

/// A committed sale transaction.
///
/// Immutable once created; the sales history is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Frozen cart snapshot.
    pub lines: Vec<SaleLine>,

    /// Optional customer attached at checkout.
    pub customer: Option<Customer>,

    /// Exact sum of the line totals at commit time.
    pub total_cents: i64,

    /// When the sale was committed.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Builds a sale from cart lines, computing the total.
    pub fn from_cart(lines: Vec<SaleLine>, customer: Option<Customer>) -> Self {
        let total: Money = lines.iter().map(SaleLine::line_total).sum();
        Sale {
            id: Uuid::new_v4().to_string(),
            lines,
            customer,
            total_cents: total.cents(),
            created_at: Utc::now(),
        }
    }

    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Expense
// =============================================================================

/// Expense bookkeeping category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Utilities,
    Ingredients,
    Salaries,
    Rent,
    Other,
}

/// A logged expense. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Expense {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub category: ExpenseCategory,

    /// Amount in cents. Never negative.
    pub amount_cents: i64,

    /// Free-form note.
    #[serde(default)]
    pub note: String,

    /// When the expense was logged.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Builds a fresh expense record from its draft.
    pub fn from_draft(draft: NewExpense) -> Self {
        Expense {
            id: Uuid::new_v4().to_string(),
            category: draft.category,
            amount_cents: draft.amount_cents,
            note: draft.note,
            created_at: Utc::now(),
        }
    }

    /// Returns the amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Draft for an expense about to be logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewExpense {
    pub category: ExpenseCategory,
    pub amount_cents: i64,
    #[serde(default)]
    pub note: String,
}

// =============================================================================
// Activity
// =============================================================================

/// The kind of ledger mutation an activity records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    AddProduct,
    UpdateProduct,
    DeleteProduct,
    AddIngredient,
    UpdateIngredient,
    DeleteIngredient,
    RecordSale,
    AddExpense,
}

/// An append-only audit record written alongside every mutating operation.
///
/// Activities are a trail for the history page. They are never read back
/// for business logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Activity {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub kind: ActivityKind,

    /// When the mutation happened.
    #[ts(as = "String")]
    pub at: DateTime<Utc>,

    /// The mutation's payload, serialized as free-form JSON.
    #[ts(type = "any")]
    pub payload: serde_json::Value,
}

// =============================================================================
// Settings
// =============================================================================

/// Store-wide settings. A single record, merge-patched wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settings {
    /// Symbol prefixed to displayed amounts ("$", "€", ...).
    pub currency_symbol: String,

    /// Stock level at or below which a low-stock alert fires. Never negative.
    pub low_stock_threshold: i64,

    /// UI language code ("en", ...).
    pub language: String,

    /// UI theme ("light", "dark", "system").
    pub theme: String,

    /// Display date format.
    pub date_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency_symbol: "$".to_string(),
            low_stock_threshold: crate::DEFAULT_LOW_STOCK_THRESHOLD,
            language: "en".to_string(),
            theme: "system".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// Partial update applied to [`Settings`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SettingsPatch {
    pub currency_symbol: Option<String>,
    pub low_stock_threshold: Option<i64>,
    pub language: Option<String>,
    pub theme: Option<String>,
    pub date_format: Option<String>,
}

// =============================================================================
// Stock Alerts
// =============================================================================

/// Alert raised by the post-mutation stock check.
///
/// Carried out of ledger mutations by [`crate::ledger::Applied`] and
/// dispatched to the notification engine by the caller, after commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StockAlert {
    /// Stock fell to the configured threshold or below (but not to zero).
    LowStock {
        name: String,
        stock: i64,
        threshold: i64,
    },
    /// Stock reached zero.
    OutOfStock { name: String },
}

// =============================================================================
// Derived Statistics
// =============================================================================

/// Financial statistics derived from the sales and expense history.
///
/// Always recomputed from source history - never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Stats {
    /// Σ sale.total over the whole history.
    pub income_cents: i64,

    /// Σ expense.amount over the whole history.
    pub expenses_cents: i64,

    /// income − expenses. May be negative.
    pub profit_cents: i64,

    /// Product name with the highest cumulative quantity sold.
    /// `None` while no sales exist.
    pub best: Option<String>,

    /// Product name with the lowest cumulative quantity sold.
    /// `None` while no sales exist.
    pub worst: Option<String>,
}

impl Stats {
    /// Returns the income as Money.
    #[inline]
    pub fn income(&self) -> Money {
        Money::from_cents(self.income_cents)
    }

    /// Returns the expenses as Money.
    #[inline]
    pub fn expenses(&self) -> Money {
        Money::from_cents(self.expenses_cents)
    }

    /// Returns the profit as Money.
    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
