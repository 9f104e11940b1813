//! Recipe ingredient types.
//!
//! These mirror what the external recipe store returns for one recipe:
//! an ordered list of ingredient lines, each with the parsed quantity/unit,
//! the raw text it was parsed from, and an optional link to a catalog
//! ingredient.

use serde::{Deserialize, Serialize};

use crate::types::id::IngredientId;

/// One ingredient line of a recipe, in recipe order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    /// Parsed quantity (e.g. 2.0 for "2 cups flour").
    pub quantity: f64,
    /// Parsed unit (may be empty for countable items).
    #[serde(default)]
    pub unit: String,
    /// The raw text the line was parsed from.
    #[serde(default)]
    pub raw_text: String,
    /// Linked catalog ingredient, if the parser resolved one.
    pub ingredient_id: Option<IngredientId>,
}

impl RecipeIngredient {
    /// A free-text ingredient line with no catalog link.
    #[must_use]
    pub fn from_raw_text(quantity: f64, unit: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            quantity,
            unit: unit.into(),
            raw_text: raw_text.into(),
            ingredient_id: None,
        }
    }
}
