//! Wire types for the retailer gateway's JSON payloads.
//!
//! The gateway is loose about field presence and naming (`description` vs
//! `name`, `size` vs `packageSize`, structured vs free-text aisle), so every
//! field here is defaulted and the ambiguous ones are modeled explicitly.
//! Normalization into domain types happens in [`super::conversions`].

use serde::{Deserialize, Serialize};

/// Response envelope for `GET /product-search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: Vec<RawProduct>,
}

/// One product row from a catalog search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProduct {
    pub upc: String,
    pub description: Option<String>,
    pub name: Option<String>,
    pub brand: String,
    pub size: Option<String>,
    pub package_size: Option<String>,
    pub price: RawPrice,
    pub aisle_location: Option<RawAisle>,
    pub aisle: Option<RawAisle>,
    pub in_stock: Option<bool>,
    pub image_url: Option<String>,
    pub image: Option<String>,
}

/// Price block on a product row. Which fields are populated varies by
/// product and by whether it is on sale.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPrice {
    pub sale_price: Option<f64>,
    pub base_price: Option<f64>,
    pub price: Option<f64>,
}

/// Aisle location, either free text or a structured `{aisle, side}` object.
///
/// The structured fields arrive as strings or numbers depending on the
/// store, so they are kept as raw JSON values until normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAisle {
    Text(String),
    Structured {
        #[serde(default)]
        aisle: serde_json::Value,
        #[serde(default)]
        side: serde_json::Value,
    },
}

/// Response envelope for `GET /shoppinglist`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShoppingListResponse {
    #[serde(default)]
    pub items: Vec<ShoppingListEntry>,
}

/// One entry on the remote shopping list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShoppingListEntry {
    pub item_name: String,
    pub quantity: u32,
    pub checked: bool,
}

/// Request body for `POST /shoppinglist/add`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddListItemRequest {
    pub item_name: String,
    pub quantity: u32,
}
