//! Shopping-list sync orchestration.
//!
//! Drives "match recipe ingredients -> filter matched items -> push to the
//! remote list" and aggregates the outcome. Infrastructure failures never
//! surface from here - they are contained inside the retailer client as
//! empty results and per-item error strings. The only propagating failures
//! are the two "nothing meaningful to do" conditions: a recipe with no
//! ingredients, and a recipe whose ingredients all failed to match.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use larder_core::{IngredientId, ListItem, MatchReport, ProductMatch, RecipeId, SyncReport};

use crate::matcher::{self, IngredientNeed};
use crate::retailer::RetailerApi;
use crate::stores::RecipeStore;

/// The caller-distinguishable failures of a match/sync operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    /// The recipe does not exist or has no ingredient lines.
    #[error("recipe {0} not found or has no ingredients")]
    RecipeNotFound(RecipeId),

    /// Ingredients exist, but none matched a product.
    #[error("no products matched - nothing to add")]
    NothingToAdd,
}

/// Match every ingredient of a recipe against the retailer catalog.
///
/// # Errors
///
/// Returns [`SyncError::RecipeNotFound`] when the recipe has no ingredient
/// lines - "recipe has no ingredients" and "ingredients exist but none
/// matched" are deliberately distinct conditions.
pub async fn match_recipe<R, S>(
    retailer: &R,
    store: &S,
    recipe_id: RecipeId,
    store_id: &str,
) -> Result<MatchReport, SyncError>
where
    R: RetailerApi,
    S: RecipeStore,
{
    let lines = store.recipe_ingredients(recipe_id).await;
    if lines.is_empty() {
        return Err(SyncError::RecipeNotFound(recipe_id));
    }

    let linked_ids: Vec<IngredientId> = lines.iter().filter_map(|line| line.ingredient_id).collect();
    let linked_names = store.ingredient_names(&linked_ids).await;

    let needs: Vec<IngredientNeed> = lines
        .iter()
        .map(|line| {
            let linked = line
                .ingredient_id
                .and_then(|id| linked_names.get(&id))
                .map(String::as_str);
            IngredientNeed::new(
                display_name(linked, &line.raw_text),
                line.quantity,
                line.unit.clone(),
            )
        })
        .collect();

    let items = matcher::match_ingredients(retailer, &needs, store_id).await;

    let matched = items.iter().filter(|item| item.matched).count();
    let estimated_cost = estimated_cost(&items);
    info!(
        recipe = %recipe_id,
        matched,
        total = items.len(),
        %estimated_cost,
        "matched recipe ingredients against retailer catalog"
    );

    Ok(MatchReport {
        recipe_id,
        store_id: store_id.to_string(),
        matched,
        total: items.len(),
        estimated_cost,
        items,
    })
}

/// Match a recipe and push the matched products to the remote shopping list.
///
/// List-item quantity is fixed at 1 per product; scaling to the recipe's
/// needed quantity is deliberately not attempted. The estimated cost in the
/// report is carried from the match step, not recomputed.
///
/// # Errors
///
/// Returns [`SyncError::RecipeNotFound`] for an empty ingredient list and
/// [`SyncError::NothingToAdd`] when ingredients exist but none matched.
pub async fn sync_recipe<R, S>(
    retailer: &R,
    store: &S,
    recipe_id: RecipeId,
    store_id: &str,
) -> Result<SyncReport, SyncError>
where
    R: RetailerApi,
    S: RecipeStore,
{
    let report = match_recipe(retailer, store, recipe_id, store_id).await?;

    let mut list_items = Vec::new();
    let mut skipped = Vec::new();
    for item in &report.items {
        if item.matched {
            let name = if item.description.is_empty() {
                &item.ingredient
            } else {
                &item.description
            };
            list_items.push(ListItem::single(name));
        } else {
            skipped.push(item.ingredient.clone());
        }
    }

    if list_items.is_empty() {
        return Err(SyncError::NothingToAdd);
    }

    let outcome = retailer.add_to_shopping_list(&list_items).await;

    Ok(SyncReport {
        success: outcome.success,
        added: outcome.added,
        total_attempted: outcome.total,
        skipped,
        errors: outcome.errors,
        estimated_cost: report.estimated_cost,
        items: report.items,
    })
}

/// Resolve an ingredient's display name: the linked catalog name when it is
/// present and non-empty, otherwise the raw text the line was parsed from.
///
/// The fallback applies even when a link exists but its name is empty.
fn display_name(linked: Option<&str>, raw_text: &str) -> String {
    match linked {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => raw_text.to_string(),
    }
}

/// Sum of prices over matched records, missing price as zero, rounded to
/// 2 decimal places.
fn estimated_cost(items: &[ProductMatch]) -> Decimal {
    items
        .iter()
        .filter(|item| item.matched)
        .filter_map(|item| item.price)
        .sum::<Decimal>()
        .round_dp(2)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use larder_core::RecipeIngredient;
    use rust_decimal::Decimal;

    use crate::matcher::tests::FakeRetailer;
    use crate::stores::MemoryStore;

    use super::*;

    const STORE: &str = "217";

    fn line(raw_text: &str, quantity: f64, ingredient_id: Option<i32>) -> RecipeIngredient {
        RecipeIngredient {
            quantity,
            unit: "cup".to_string(),
            raw_text: raw_text.to_string(),
            ingredient_id: ingredient_id.map(IngredientId::new),
        }
    }

    async fn seeded_store(lines: Vec<RecipeIngredient>) -> (MemoryStore, RecipeId) {
        let store = MemoryStore::new();
        let recipe = RecipeId::new(1);
        store.insert_recipe(recipe, lines).await;
        (store, recipe)
    }

    #[tokio::test]
    async fn test_empty_recipe_is_not_found() {
        let retailer = FakeRetailer::with_products(&[]);
        let (store, recipe) = seeded_store(vec![]).await;

        let err = match_recipe(&retailer, &store, recipe, STORE).await.unwrap_err();
        assert_eq!(err, SyncError::RecipeNotFound(recipe));

        let err = sync_recipe(&retailer, &store, recipe, STORE).await.unwrap_err();
        assert_eq!(err, SyncError::RecipeNotFound(recipe));
    }

    #[tokio::test]
    async fn test_all_unmatched_is_nothing_to_add() {
        let retailer = FakeRetailer::with_products(&[]);
        let (store, recipe) =
            seeded_store(vec![line("saffron", 1.0, None), line("truffle", 2.0, None)]).await;

        let err = sync_recipe(&retailer, &store, recipe, STORE).await.unwrap_err();
        assert_eq!(err, SyncError::NothingToAdd);
        assert!(
            retailer.pushed.lock().unwrap().is_empty(),
            "nothing should reach the remote list"
        );
    }

    #[tokio::test]
    async fn test_estimated_cost_skips_unmatched_and_missing_prices() {
        // Prices [1.99, None (unmatched), 3.50] -> 5.49
        let retailer = FakeRetailer::with_products(&[
            ("flour", "All Purpose Flour", Some(Decimal::new(199, 2))),
            ("milk", "Whole Milk", Some(Decimal::new(350, 2))),
        ]);
        let (store, recipe) = seeded_store(vec![
            line("flour", 2.0, None),
            line("saffron", 1.0, None),
            line("milk", 1.0, None),
        ])
        .await;

        let report = match_recipe(&retailer, &store, recipe, STORE).await.unwrap();
        assert_eq!(report.matched, 2);
        assert_eq!(report.total, 3);
        assert_eq!(report.estimated_cost, Decimal::new(549, 2));
    }

    #[tokio::test]
    async fn test_matched_without_price_counts_as_zero() {
        let retailer = FakeRetailer::with_products(&[
            ("flour", "All Purpose Flour", Some(Decimal::new(199, 2))),
            ("milk", "Whole Milk", None),
        ]);
        let (store, recipe) =
            seeded_store(vec![line("flour", 2.0, None), line("milk", 1.0, None)]).await;

        let report = match_recipe(&retailer, &store, recipe, STORE).await.unwrap();
        assert_eq!(report.matched, 2);
        assert_eq!(report.estimated_cost, Decimal::new(199, 2));
    }

    #[tokio::test]
    async fn test_linked_name_preferred_over_raw_text() {
        let retailer = FakeRetailer::with_products(&[("flour", "All Purpose Flour", None)]);
        let (store, recipe) = seeded_store(vec![line("2 cups flour, sifted", 2.0, Some(7))]).await;
        store.insert_ingredient(IngredientId::new(7), "flour").await;

        let report = match_recipe(&retailer, &store, recipe, STORE).await.unwrap();
        assert_eq!(report.items[0].ingredient, "flour");
        assert!(report.items[0].matched);
    }

    #[tokio::test]
    async fn test_empty_linked_name_falls_back_to_raw_text() {
        let retailer = FakeRetailer::with_products(&[]);
        let (store, recipe) = seeded_store(vec![line("2 cups flour", 2.0, Some(7))]).await;
        store.insert_ingredient(IngredientId::new(7), "").await;

        let report = match_recipe(&retailer, &store, recipe, STORE).await.unwrap();
        assert_eq!(report.items[0].ingredient, "2 cups flour");
    }

    #[tokio::test]
    async fn test_sync_pushes_descriptions_with_quantity_one() {
        let retailer = FakeRetailer::with_products(&[
            ("flour", "All Purpose Flour", Some(Decimal::new(199, 2))),
            ("milk", "", None),
        ]);
        let (store, recipe) = seeded_store(vec![
            line("flour", 2.0, None),
            line("saffron", 1.0, None),
            line("milk", 1.0, None),
        ])
        .await;

        let report = sync_recipe(&retailer, &store, recipe, STORE).await.unwrap();

        assert!(report.success);
        assert_eq!(report.added, 2);
        assert_eq!(report.total_attempted, 2);
        assert_eq!(report.skipped, vec!["saffron".to_string()]);
        assert_eq!(report.estimated_cost, Decimal::new(199, 2));

        let pushed = retailer.pushed.lock().unwrap();
        assert_eq!(pushed.len(), 2);
        assert_eq!(pushed[0].name, "All Purpose Flour");
        // Empty description falls back to the ingredient name
        assert_eq!(pushed[1].name, "milk");
        assert!(pushed.iter().all(|item| item.quantity == 1));
    }

    #[tokio::test]
    async fn test_partial_add_failure_is_still_success() {
        let mut retailer = FakeRetailer::with_products(&[
            ("flour", "All Purpose Flour", None),
            ("milk", "Whole Milk", None),
        ]);
        retailer.failing_items = vec!["Whole Milk".to_string()];
        let (store, recipe) =
            seeded_store(vec![line("flour", 2.0, None), line("milk", 1.0, None)]).await;

        let report = sync_recipe(&retailer, &store, recipe, STORE).await.unwrap();

        assert!(report.success, "partial success counts as overall success");
        assert_eq!(report.added, 1);
        assert_eq!(report.errors, vec!["Whole Milk: HTTP 500".to_string()]);
    }

    #[tokio::test]
    async fn test_skipped_preserves_recipe_order() {
        let retailer = FakeRetailer::with_products(&[("milk", "Whole Milk", None)]);
        let (store, recipe) = seeded_store(vec![
            line("zatar", 1.0, None),
            line("milk", 1.0, None),
            line("asafoetida", 1.0, None),
        ])
        .await;

        let report = sync_recipe(&retailer, &store, recipe, STORE).await.unwrap();
        assert_eq!(
            report.skipped,
            vec!["zatar".to_string(), "asafoetida".to_string()]
        );
    }

    #[test]
    fn test_display_name_rules() {
        assert_eq!(display_name(Some("flour"), "2 cups flour"), "flour");
        assert_eq!(display_name(Some(""), "2 cups flour"), "2 cups flour");
        assert_eq!(display_name(None, "2 cups flour"), "2 cups flour");
    }
}
