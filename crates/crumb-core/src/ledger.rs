//! # Ledger Module
//!
//! The authoritative commerce ledger: the single source of truth for
//! products, ingredients, customers, sales, expenses, the activity trail
//! and store settings.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ledger Mutation Flow                             │
//! │                                                                         │
//! │  validate input ──► mutate state ──► append Activity ──► stock check   │
//! │        │                                                      │         │
//! │        │ Err: ledger untouched                                ▼         │
//! │        ▼                                          Applied { record,     │
//! │  ValidationError / NotFound                                 alerts }   │
//! │                                                                         │
//! │  The alerts are RETURNED, not dispatched: the caller forwards them     │
//! │  to the notification engine after the mutation has committed, so the   │
//! │  notification path can never block or re-enter a mutation.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Product stock and ingredient quantity are never negative; a sale
//!   clamps its deduction so stock floors at zero (lenient oversell
//!   policy - the sale is not rejected)
//! - `Sale.total_cents` is the exact sum of its frozen lines; later price
//!   edits never rewrite history
//! - Every state-mutating operation appends exactly one [`Activity`]
//! - At most one [`Customer`] per phone number
//!
//! ## Ownership
//! The ledger is an explicitly constructed container. The application root
//! owns one instance behind a mutex; tests build fresh instances per test.
//! There is no global.

use serde::{Deserialize, Serialize};
use serde_json::json;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{LedgerError, LedgerResult};
use crate::money::Money;
use crate::types::{
    Activity, ActivityKind, Customer, Expense, Ingredient, IngredientPatch, NewExpense,
    NewIngredient, NewProduct, Product, ProductPatch, Sale, SaleLine, Settings, SettingsPatch,
    Stats, StockAlert,
};
use crate::validation;

// =============================================================================
// Applied
// =============================================================================

/// The result of a committed mutation.
///
/// Carries the committed record plus whatever stock alerts the mutation
/// produced. The ledger never dispatches alerts itself - the caller owns
/// that side effect and performs it after commit.
#[derive(Debug, Clone)]
pub struct Applied<T> {
    /// The record as committed (fresh id and timestamps included).
    pub record: T,

    /// Stock alerts raised by this mutation, in product-touch order.
    /// Empty for operations without stock side effects.
    pub alerts: Vec<StockAlert>,
}

// =============================================================================
// Ledger
// =============================================================================

/// The authoritative domain state.
///
/// Serializes wholesale: the persisted snapshot is this entire struct,
/// restored verbatim on the next launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    products: Vec<Product>,
    ingredients: Vec<Ingredient>,
    customers: Vec<Customer>,
    sales: Vec<Sale>,
    expenses: Vec<Expense>,
    activities: Vec<Activity>,
    settings: Settings,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new()
    }
}

impl Ledger {
    /// Creates an empty ledger with default settings.
    pub fn new() -> Self {
        Ledger {
            products: Vec::new(),
            ingredients: Vec::new(),
            customers: Vec::new(),
            sales: Vec::new(),
            expenses: Vec::new(),
            activities: Vec::new(),
            settings: Settings::default(),
        }
    }

    /// Creates a ledger pre-populated with the starter inventory used on
    /// first launch and in development.
    pub fn seed() -> Self {
        let now = Utc::now();
        let today = now.date_naive();

        let product = |id: &str, name: &str, price_cents: i64, stock: i64| Product {
            id: id.to_string(),
            name: name.to_string(),
            price_cents,
            stock,
            created_at: now,
            updated_at: now,
        };

        let ingredient = |id: &str, name: &str, quantity: i64, days: u64| Ingredient {
            id: id.to_string(),
            name: name.to_string(),
            quantity,
            expires_at: today.checked_add_days(chrono::Days::new(days)),
            created_at: now,
            updated_at: now,
        };

        Ledger {
            products: vec![
                product("p1", "Sourdough Loaf", 500, 20),
                product("p2", "Croissant", 250, 50),
                product("p3", "Chocolate Cake", 2000, 5),
            ],
            ingredients: vec![
                ingredient("i1", "Flour (kg)", 50, 20),
                ingredient("i2", "Butter (kg)", 10, 10),
            ],
            customers: Vec::new(),
            sales: Vec::new(),
            expenses: Vec::new(),
            activities: Vec::new(),
            settings: Settings::default(),
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Looks up a product by id.
    pub fn find_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up an ingredient by id.
    pub fn find_ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    // =========================================================================
    // Product Operations
    // =========================================================================

    /// Adds a new product built from a draft (fresh id and timestamps).
    ///
    /// ## Errors
    /// - `ValidationError::Required` on an empty name
    /// - `ValidationError::Negative` on a negative price or stock
    pub fn add_product(&mut self, draft: NewProduct) -> LedgerResult<Applied<Product>> {
        self.insert_product(Product::from_draft(draft))
    }

    /// Inserts a fully-formed product record.
    ///
    /// Used directly when the backend supplied the authoritative record;
    /// [`Ledger::add_product`] funnels through here for local drafts.
    pub fn insert_product(&mut self, product: Product) -> LedgerResult<Applied<Product>> {
        validation::validate_name("name", &product.name)?;
        validation::validate_non_negative("price", product.price_cents)?;
        validation::validate_non_negative("stock", product.stock)?;

        self.products.push(product.clone());
        self.log_activity(
            ActivityKind::AddProduct,
            serde_json::to_value(&product).unwrap_or_default(),
        );

        let alerts = self.stock_check(&product).into_iter().collect();
        Ok(Applied {
            record: product,
            alerts,
        })
    }

    /// Merges a patch into an existing product.
    ///
    /// Re-runs the stock check only when the patch touches stock.
    ///
    /// ## Errors
    /// - `ProductNotFound` when the id is absent
    /// - Validation errors for the patched fields, checked before any change
    pub fn update_product(&mut self, id: &str, patch: ProductPatch) -> LedgerResult<Applied<Product>> {
        if let Some(name) = patch.name.as_deref() {
            validation::validate_name("name", name)?;
        }
        if let Some(price_cents) = patch.price_cents {
            validation::validate_non_negative("price", price_cents)?;
        }
        if let Some(stock) = patch.stock {
            validation::validate_non_negative("stock", stock)?;
        }

        let touches_stock = patch.touches_stock();
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| LedgerError::ProductNotFound(id.to_string()))?;

        if let Some(name) = patch.name.clone() {
            product.name = name;
        }
        if let Some(price_cents) = patch.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        product.updated_at = Utc::now();
        let record = product.clone();

        self.log_activity(
            ActivityKind::UpdateProduct,
            json!({ "id": id, "patch": patch }),
        );

        let alerts = if touches_stock {
            self.stock_check(&record).into_iter().collect()
        } else {
            Vec::new()
        };
        Ok(Applied { record, alerts })
    }

    /// Replaces a product wholesale with a server-confirmed record.
    ///
    /// Same contract as [`Ledger::update_product`]; the stock check runs
    /// when the replacement changes the stock level.
    pub fn replace_product(&mut self, product: Product) -> LedgerResult<Applied<Product>> {
        validation::validate_name("name", &product.name)?;
        validation::validate_non_negative("price", product.price_cents)?;
        validation::validate_non_negative("stock", product.stock)?;

        let slot = self
            .products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| LedgerError::ProductNotFound(product.id.clone()))?;

        let stock_changed = slot.stock != product.stock;
        *slot = product.clone();

        self.log_activity(
            ActivityKind::UpdateProduct,
            serde_json::to_value(&product).unwrap_or_default(),
        );

        let alerts = if stock_changed {
            self.stock_check(&product).into_iter().collect()
        } else {
            Vec::new()
        };
        Ok(Applied {
            record: product,
            alerts,
        })
    }

    /// Removes a product.
    ///
    /// An absent id is a no-op, not an error, so a retried delete converges
    /// to the same end state. The Activity is appended only when a record
    /// was actually removed.
    pub fn delete_product(&mut self, id: &str) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        let removed = self.products.remove(index);
        self.log_activity(ActivityKind::DeleteProduct, json!({ "id": id }));
        Some(removed)
    }

    // =========================================================================
    // Ingredient Operations
    // =========================================================================
    // Symmetric to products, without stock-alert side effects.

    /// Adds a new ingredient built from a draft.
    pub fn add_ingredient(&mut self, draft: NewIngredient) -> LedgerResult<Applied<Ingredient>> {
        self.insert_ingredient(Ingredient::from_draft(draft))
    }

    /// Inserts a fully-formed ingredient record.
    pub fn insert_ingredient(&mut self, ingredient: Ingredient) -> LedgerResult<Applied<Ingredient>> {
        validation::validate_name("name", &ingredient.name)?;
        validation::validate_non_negative("quantity", ingredient.quantity)?;

        self.ingredients.push(ingredient.clone());
        self.log_activity(
            ActivityKind::AddIngredient,
            serde_json::to_value(&ingredient).unwrap_or_default(),
        );

        Ok(Applied {
            record: ingredient,
            alerts: Vec::new(),
        })
    }

    /// Merges a patch into an existing ingredient.
    pub fn update_ingredient(
        &mut self,
        id: &str,
        patch: IngredientPatch,
    ) -> LedgerResult<Applied<Ingredient>> {
        if let Some(name) = patch.name.as_deref() {
            validation::validate_name("name", name)?;
        }
        if let Some(quantity) = patch.quantity {
            validation::validate_non_negative("quantity", quantity)?;
        }

        let ingredient = self
            .ingredients
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| LedgerError::IngredientNotFound(id.to_string()))?;

        if let Some(name) = patch.name.clone() {
            ingredient.name = name;
        }
        if let Some(quantity) = patch.quantity {
            ingredient.quantity = quantity;
        }
        if let Some(expires_at) = patch.expires_at {
            ingredient.expires_at = expires_at;
        }
        ingredient.updated_at = Utc::now();
        let record = ingredient.clone();

        self.log_activity(
            ActivityKind::UpdateIngredient,
            json!({ "id": id, "patch": patch }),
        );

        Ok(Applied {
            record,
            alerts: Vec::new(),
        })
    }

    /// Replaces an ingredient wholesale with a server-confirmed record.
    pub fn replace_ingredient(&mut self, ingredient: Ingredient) -> LedgerResult<Applied<Ingredient>> {
        validation::validate_name("name", &ingredient.name)?;
        validation::validate_non_negative("quantity", ingredient.quantity)?;

        let slot = self
            .ingredients
            .iter_mut()
            .find(|i| i.id == ingredient.id)
            .ok_or_else(|| LedgerError::IngredientNotFound(ingredient.id.clone()))?;
        *slot = ingredient.clone();

        self.log_activity(
            ActivityKind::UpdateIngredient,
            serde_json::to_value(&ingredient).unwrap_or_default(),
        );

        Ok(Applied {
            record: ingredient,
            alerts: Vec::new(),
        })
    }

    /// Removes an ingredient. Absent id is a no-op.
    pub fn delete_ingredient(&mut self, id: &str) -> Option<Ingredient> {
        let index = self.ingredients.iter().position(|i| i.id == id)?;
        let removed = self.ingredients.remove(index);
        self.log_activity(ActivityKind::DeleteIngredient, json!({ "id": id }));
        Some(removed)
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Commits a sale built locally from cart lines.
    ///
    /// ## Constraints
    /// - at least one line, every quantity ≥ 1, no negative prices
    ///
    /// ## Effects, in one logical transaction
    /// - each line decrements its product's stock, floored at zero
    ///   (an oversell is NOT rejected - the store is single-writer and
    ///   the floor-at-zero policy is deliberate)
    /// - the customer is upserted by phone when a non-empty name is given
    /// - the sale is appended to history, one Activity is appended
    /// - the stock check runs against every product the sale touched
    ///
    /// Returns the committed sale (generated id and timestamp included)
    /// so the caller can render a receipt.
    pub fn record_sale(
        &mut self,
        lines: Vec<SaleLine>,
        customer: Option<Customer>,
    ) -> LedgerResult<Applied<Sale>> {
        validation::validate_sale_lines(&lines)?;
        Ok(self.commit_sale(Sale::from_cart(lines, customer)))
    }

    /// Commits a server-confirmed sale through the same path as
    /// [`Ledger::record_sale`].
    pub fn adopt_sale(&mut self, sale: Sale) -> LedgerResult<Applied<Sale>> {
        validation::validate_sale_lines(&sale.lines)?;
        Ok(self.commit_sale(sale))
    }

    /// The single commit path for sales. Assumes validated lines.
    fn commit_sale(&mut self, sale: Sale) -> Applied<Sale> {
        let now = Utc::now();

        // Deduct stock per line, clamped at zero. Lines whose product id no
        // longer exists deduct nothing (the frozen line still appears in the
        // sale history).
        let mut touched: Vec<String> = Vec::new();
        for line in &sale.lines {
            if let Some(product) = self.products.iter_mut().find(|p| p.id == line.product_id) {
                product.stock = (product.stock - line.qty).max(0);
                product.updated_at = now;
                if !touched.contains(&product.id) {
                    touched.push(product.id.clone());
                }
            }
        }

        // Customer upsert by phone, last write wins.
        if let Some(customer) = sale.customer.as_ref() {
            if !customer.name.trim().is_empty() {
                self.customers.retain(|c| c.phone != customer.phone);
                self.customers.push(customer.clone());
            }
        }

        self.sales.push(sale.clone());
        self.log_activity(
            ActivityKind::RecordSale,
            serde_json::to_value(&sale).unwrap_or_default(),
        );

        let alerts = touched
            .iter()
            .filter_map(|id| {
                self.products
                    .iter()
                    .find(|p| &p.id == id)
                    .and_then(|p| self.stock_check(p))
            })
            .collect();

        Applied {
            record: sale,
            alerts,
        }
    }

    // =========================================================================
    // Expenses
    // =========================================================================

    /// Logs a new expense built from a draft.
    ///
    /// ## Errors
    /// - `ValidationError::Negative` on a negative amount
    pub fn add_expense(&mut self, draft: NewExpense) -> LedgerResult<Applied<Expense>> {
        self.insert_expense(Expense::from_draft(draft))
    }

    /// Inserts a fully-formed expense record.
    pub fn insert_expense(&mut self, expense: Expense) -> LedgerResult<Applied<Expense>> {
        validation::validate_non_negative("amount", expense.amount_cents)?;

        self.expenses.push(expense.clone());
        self.log_activity(
            ActivityKind::AddExpense,
            serde_json::to_value(&expense).unwrap_or_default(),
        );

        Ok(Applied {
            record: expense,
            alerts: Vec::new(),
        })
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Shallow-merges a patch into the settings record.
    ///
    /// No validation beyond numeric coercion: a negative threshold is
    /// clamped to zero. Settings changes write no Activity (matching the
    /// audited operation set).
    pub fn update_settings(&mut self, patch: SettingsPatch) -> Settings {
        if let Some(currency_symbol) = patch.currency_symbol {
            self.settings.currency_symbol = currency_symbol;
        }
        if let Some(low_stock_threshold) = patch.low_stock_threshold {
            self.settings.low_stock_threshold = low_stock_threshold.max(0);
        }
        if let Some(language) = patch.language {
            self.settings.language = language;
        }
        if let Some(theme) = patch.theme {
            self.settings.theme = theme;
        }
        if let Some(date_format) = patch.date_format {
            self.settings.date_format = date_format;
        }
        self.settings.clone()
    }

    // =========================================================================
    // Derived Statistics
    // =========================================================================

    /// Computes financial statistics from the full history.
    ///
    /// Pure derived read - recomputed from source history on every call,
    /// never cached, no side effects.
    ///
    /// Best/worst seller ties break toward the product name first
    /// encountered in sales order (strict comparisons over an
    /// insertion-ordered accumulation keep the first occurrence).
    pub fn stats(&self) -> Stats {
        let income: Money = self.sales.iter().map(Sale::total).sum();
        let expenses: Money = self.expenses.iter().map(Expense::amount).sum();

        // Cumulative quantity sold per product name, in order of first
        // appearance across the sales history.
        let mut totals: Vec<(String, i64)> = Vec::new();
        for sale in &self.sales {
            for line in &sale.lines {
                match totals.iter_mut().find(|(name, _)| name == &line.name) {
                    Some((_, qty)) => *qty += line.qty,
                    None => totals.push((line.name.clone(), line.qty)),
                }
            }
        }

        let mut best: Option<(&String, i64)> = None;
        let mut worst: Option<(&String, i64)> = None;
        for (name, qty) in &totals {
            if best.is_none_or(|(_, q)| *qty > q) {
                best = Some((name, *qty));
            }
            if worst.is_none_or(|(_, q)| *qty < q) {
                worst = Some((name, *qty));
            }
        }

        Stats {
            income_cents: income.cents(),
            expenses_cents: expenses.cents(),
            profit_cents: (income - expenses).cents(),
            best: best.map(|(name, _)| name.clone()),
            worst: worst.map(|(name, _)| name.clone()),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Compares a product's stock against the configured threshold.
    ///
    /// Zero stock wins over low stock - exactly one alert per product.
    fn stock_check(&self, product: &Product) -> Option<StockAlert> {
        if product.stock == 0 {
            Some(StockAlert::OutOfStock {
                name: product.name.clone(),
            })
        } else if product.stock <= self.settings.low_stock_threshold {
            Some(StockAlert::LowStock {
                name: product.name.clone(),
                stock: product.stock,
                threshold: self.settings.low_stock_threshold,
            })
        } else {
            None
        }
    }

    /// Appends one audit record. Called by every mutating operation.
    fn log_activity(&mut self, kind: ActivityKind, payload: serde_json::Value) {
        self.activities.push(Activity {
            id: Uuid::new_v4().to_string(),
            kind,
            at: Utc::now(),
            payload,
        });
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
