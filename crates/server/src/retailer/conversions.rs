//! Raw gateway rows to domain `ProductMatch` records.

use larder_core::ProductMatch;
use rust_decimal::Decimal;

use super::types::{RawAisle, RawPrice, RawProduct};

/// Price resolution result for one product row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPrice {
    /// Effective price: sale price when present, else base, else generic.
    pub price: Option<Decimal>,
    /// Regular price: base when present, else generic.
    pub regular: Option<Decimal>,
    /// A distinct sale price was present.
    pub on_sale: bool,
}

/// Resolve the effective price from the gateway's price block.
#[must_use]
pub fn resolve_price(price: &RawPrice) -> ResolvedPrice {
    ResolvedPrice {
        price: price
            .sale_price
            .or(price.base_price)
            .or(price.price)
            .and_then(to_decimal),
        regular: price.base_price.or(price.price).and_then(to_decimal),
        on_sale: price.sale_price.is_some(),
    }
}

/// Convert a matched catalog row into a [`ProductMatch`].
///
/// Needed quantity/unit stay zero/empty here; the matcher merges them from
/// the recipe after the search, regardless of match outcome.
#[must_use]
pub fn product_match(raw: &RawProduct, ingredient: &str, search_base: &str) -> ProductMatch {
    let resolved = resolve_price(&raw.price);

    ProductMatch {
        ingredient: ingredient.to_string(),
        matched: true,
        upc: raw.upc.clone(),
        description: raw
            .description
            .clone()
            .or_else(|| raw.name.clone())
            .unwrap_or_default(),
        brand: raw.brand.clone(),
        size: raw
            .size
            .clone()
            .or_else(|| raw.package_size.clone())
            .unwrap_or_default(),
        price: resolved.price,
        price_regular: resolved.regular,
        on_sale: resolved.on_sale,
        in_stock: raw.in_stock.unwrap_or(true),
        aisle: normalize_aisle(raw.aisle_location.as_ref().or(raw.aisle.as_ref())),
        image_url: raw
            .image_url
            .clone()
            .or_else(|| raw.image.clone())
            .unwrap_or_default(),
        search_url: search_url(search_base, ingredient),
        needed_quantity: 0.0,
        needed_unit: String::new(),
    }
}

/// Synthesize the storefront deep-link search URL for an ingredient.
///
/// Informational only; never used for further requests.
#[must_use]
pub fn search_url(search_base: &str, ingredient: &str) -> String {
    format!("{search_base}?s={}", urlencoding::encode(ingredient))
}

/// Normalize a structured or free-text aisle into "Aisle <n> <side>".
fn normalize_aisle(raw: Option<&RawAisle>) -> String {
    match raw {
        Some(RawAisle::Text(text)) => text.trim().to_string(),
        Some(RawAisle::Structured { aisle, side }) => {
            let aisle = json_text(aisle);
            let side = json_text(side);
            format!("Aisle {aisle} {side}").trim().to_string()
        }
        None => String::new(),
    }
}

/// Render a JSON scalar as plain text; anything else becomes empty.
fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(value).map(|d| d.round_dp(2))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn raw_price(sale: Option<f64>, base: Option<f64>, generic: Option<f64>) -> RawPrice {
        RawPrice {
            sale_price: sale,
            base_price: base,
            price: generic,
        }
    }

    #[test]
    fn test_sale_price_wins_and_sets_on_sale() {
        let resolved = resolve_price(&raw_price(Some(2.50), Some(3.00), None));
        assert_eq!(resolved.price, Some(Decimal::new(250, 2)));
        assert_eq!(resolved.regular, Some(Decimal::new(300, 2)));
        assert!(resolved.on_sale);
    }

    #[test]
    fn test_base_price_only_is_not_on_sale() {
        let resolved = resolve_price(&raw_price(None, Some(3.00), None));
        assert_eq!(resolved.price, Some(Decimal::new(300, 2)));
        assert_eq!(resolved.regular, Some(Decimal::new(300, 2)));
        assert!(!resolved.on_sale);
    }

    #[test]
    fn test_generic_price_is_last_resort() {
        let resolved = resolve_price(&raw_price(None, None, Some(1.99)));
        assert_eq!(resolved.price, Some(Decimal::new(199, 2)));
        assert_eq!(resolved.regular, Some(Decimal::new(199, 2)));
        assert!(!resolved.on_sale);
    }

    #[test]
    fn test_no_price_at_all() {
        let resolved = resolve_price(&raw_price(None, None, None));
        assert_eq!(resolved.price, None);
        assert_eq!(resolved.regular, None);
        assert!(!resolved.on_sale);
    }

    #[test]
    fn test_structured_aisle_with_numeric_aisle() {
        let raw: RawAisle = serde_json::from_str(r#"{"aisle": 12, "side": "Left"}"#).unwrap();
        assert_eq!(normalize_aisle(Some(&raw)), "Aisle 12 Left");
    }

    #[test]
    fn test_structured_aisle_missing_side_is_trimmed() {
        let raw: RawAisle = serde_json::from_str(r#"{"aisle": "7"}"#).unwrap();
        assert_eq!(normalize_aisle(Some(&raw)), "Aisle 7");
    }

    #[test]
    fn test_free_text_aisle_passes_through() {
        let raw = RawAisle::Text("  Dairy Wall  ".to_string());
        assert_eq!(normalize_aisle(Some(&raw)), "Dairy Wall");
    }

    #[test]
    fn test_search_url_percent_encodes_ingredient() {
        let url = search_url("https://www.grocer.example/shopping/search", "chicken breast");
        assert_eq!(
            url,
            "https://www.grocer.example/shopping/search?s=chicken%20breast"
        );
    }

    #[test]
    fn test_product_match_description_falls_back_to_name() {
        let raw = RawProduct {
            upc: "0004125001625".to_string(),
            name: Some("Whole Milk".to_string()),
            ..RawProduct::default()
        };
        let record = product_match(&raw, "milk", "https://www.grocer.example/shopping/search");
        assert!(record.matched);
        assert_eq!(record.description, "Whole Milk");
        assert_eq!(record.ingredient, "milk");
        assert!(record.in_stock, "stock flag defaults to true");
        assert_eq!(record.needed_quantity, 0.0);
    }

    #[test]
    fn test_product_match_size_falls_back_to_package_size() {
        let raw = RawProduct {
            upc: "0001".to_string(),
            package_size: Some("16 oz".to_string()),
            ..RawProduct::default()
        };
        let record = product_match(&raw, "pasta", "https://www.grocer.example/shopping/search");
        assert_eq!(record.size, "16 oz");
    }
}
