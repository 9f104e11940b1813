//! Product match types.
//!
//! A [`ProductMatch`] is the result of attempting to find a retailer product
//! for one recipe ingredient. Matching is best-effort: an ingredient that
//! found no product still produces a record, with `matched = false` and all
//! retailer-sourced fields empty.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The outcome of matching one recipe ingredient against the retailer catalog.
///
/// Invariant: when `matched` is `false` every retailer-sourced field is
/// empty/`None`, but `needed_quantity` and `needed_unit` are always
/// populated from the recipe, independent of match success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMatch {
    /// The ingredient name that was searched for.
    pub ingredient: String,
    /// Whether a product was found.
    pub matched: bool,
    /// Catalog SKU/UPC of the matched product.
    #[serde(default)]
    pub upc: String,
    /// Product description.
    #[serde(default)]
    pub description: String,
    /// Product brand.
    #[serde(default)]
    pub brand: String,
    /// Package size (e.g. "16 oz").
    #[serde(default)]
    pub size: String,
    /// Effective price: sale price when on sale, regular price otherwise.
    pub price: Option<Decimal>,
    /// Regular (non-sale) price.
    pub price_regular: Option<Decimal>,
    /// Whether a distinct sale price was present.
    #[serde(default)]
    pub on_sale: bool,
    /// Whether the product is in stock at the target store.
    #[serde(default)]
    pub in_stock: bool,
    /// Normalized aisle location (e.g. "Aisle 12 Left"), free text.
    #[serde(default)]
    pub aisle: String,
    /// Product image reference.
    #[serde(default)]
    pub image_url: String,
    /// Deep-link search URL on the retailer storefront. Informational only;
    /// never used for further requests.
    #[serde(default)]
    pub search_url: String,
    /// Quantity the recipe calls for.
    pub needed_quantity: f64,
    /// Unit the recipe calls for (may be empty).
    #[serde(default)]
    pub needed_unit: String,
}

impl ProductMatch {
    /// Create an unmatched record for an ingredient.
    ///
    /// Needed quantity/unit are filled in by the matcher after the search,
    /// so they start zero/empty here.
    #[must_use]
    pub fn unmatched(ingredient: impl Into<String>) -> Self {
        Self {
            ingredient: ingredient.into(),
            matched: false,
            upc: String::new(),
            description: String::new(),
            brand: String::new(),
            size: String::new(),
            price: None,
            price_regular: None,
            on_sale: false,
            in_stock: false,
            aisle: String::new(),
            image_url: String::new(),
            search_url: String::new(),
            needed_quantity: 0.0,
            needed_unit: String::new(),
        }
    }
}
