//! Shopping-list sync types.
//!
//! The sync operation matches a recipe's ingredients and pushes the matched
//! products to the external shopping list, best-effort. Partial success is
//! always preferred over all-or-nothing failure, so the result types here
//! report what did succeed alongside what didn't.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::RecipeId;
use crate::types::product::ProductMatch;

/// The minimal unit pushed to the remote shopping list.
///
/// Derived only from matched [`ProductMatch`] records. Quantity is fixed at
/// 1 per item; scaling to the recipe's needed quantity is deliberately not
/// attempted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    /// Display name on the remote list.
    pub name: String,
    /// Number of list entries to add.
    pub quantity: u32,
}

impl ListItem {
    /// A single list entry with the given name.
    #[must_use]
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: 1,
        }
    }
}

/// Result of a bulk add against the remote shopping list.
///
/// One remote mutation is issued per item; a single item's failure never
/// blocks subsequent items. `success` is true iff at least one item was
/// added.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListAddOutcome {
    /// At least one item was added.
    pub success: bool,
    /// Number of items added.
    pub added: usize,
    /// Number of items attempted.
    pub total: usize,
    /// Per-item error strings, formatted as `"<name>: <detail>"`.
    pub errors: Vec<String>,
}

impl ListAddOutcome {
    /// Outcome when the retailer client is not configured: nothing was
    /// attempted over the network.
    #[must_use]
    pub fn not_configured(total: usize) -> Self {
        Self {
            success: false,
            added: 0,
            total,
            errors: vec!["retailer not configured".to_string()],
        }
    }
}

/// Aggregated result of matching a recipe's ingredients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// The recipe that was matched.
    pub recipe_id: RecipeId,
    /// The store the search ran against.
    pub store_id: String,
    /// Count of ingredients that found a product.
    pub matched: usize,
    /// Total ingredients considered.
    pub total: usize,
    /// Sum of prices over matched records, missing price as zero, rounded
    /// to 2 decimal places.
    pub estimated_cost: Decimal,
    /// Per-ingredient match details, in recipe order.
    pub items: Vec<ProductMatch>,
}

/// Summary of one sync call: match recipe, push matched items, aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncReport {
    /// At least one item landed on the remote list.
    pub success: bool,
    /// Number of items added to the remote list.
    pub added: usize,
    /// Number of items attempted against the remote list.
    pub total_attempted: usize,
    /// Ingredient names that had no product match, in recipe order.
    pub skipped: Vec<String>,
    /// Per-item error strings from the remote add.
    pub errors: Vec<String>,
    /// Estimated cost carried over from the match step, not recomputed.
    pub estimated_cost: Decimal,
    /// Full per-item match details for display.
    pub items: Vec<ProductMatch>,
}
