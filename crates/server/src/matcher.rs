//! Ingredient-to-product matching.
//!
//! Converts a recipe's ingredient list into best-effort product matches,
//! one catalog search per ingredient. Searches run sequentially in input
//! order; `result[i]` always corresponds to `input[i]`, and the output has
//! the same length as the input no matter how many searches degrade.

use larder_core::ProductMatch;

use crate::retailer::RetailerApi;

/// One ingredient to match: resolved display name plus the quantity/unit
/// the recipe calls for.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientNeed {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl IngredientNeed {
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// Match each ingredient to its best catalog product.
///
/// Repeated names are searched independently - the same text can appear
/// with different quantities across a recipe, so no deduplication happens
/// here. Needed quantity/unit are merged onto every record, matched or not.
pub async fn match_ingredients<R: RetailerApi>(
    retailer: &R,
    needs: &[IngredientNeed],
    store_id: &str,
) -> Vec<ProductMatch> {
    let mut results = Vec::with_capacity(needs.len());
    for need in needs {
        let mut record = retailer
            .search_best_match(&need.name, store_id)
            .await
            .unwrap_or_else(|| ProductMatch::unmatched(&need.name));
        record.needed_quantity = need.quantity;
        record.needed_unit = need.unit.clone();
        results.push(record);
    }
    results
}
