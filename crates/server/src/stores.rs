//! Store seams for the external persistence collaborators.
//!
//! Persistence is not part of this service's core: credentials and recipes
//! live in a surrounding record store with plain CRUD semantics. These
//! traits are the seam a real database plugs into; [`MemoryStore`] backs
//! development and tests.

use std::collections::HashMap;

use tokio::sync::RwLock;

use larder_core::{IngredientId, RecipeId, RecipeIngredient, RetailerCredential, UserId};

/// Read/write access to stored retailer credentials.
///
/// The core only reads; the token-capture route is the single writer.
#[allow(async_fn_in_trait)]
pub trait CredentialStore {
    /// Fetch the stored credential for a user, if any.
    async fn credential(&self, user_id: UserId) -> Option<RetailerCredential>;

    /// Insert or replace the credential for `credential.user_id`.
    async fn upsert_credential(&self, credential: RetailerCredential);
}

/// Read access to recipes and their catalog-ingredient links.
#[allow(async_fn_in_trait)]
pub trait RecipeStore {
    /// A recipe's ingredient lines, in recipe order. Empty when the recipe
    /// does not exist.
    async fn recipe_ingredients(&self, recipe_id: RecipeId) -> Vec<RecipeIngredient>;

    /// Display names for a set of linked catalog ingredients. Missing ids
    /// are simply absent from the map.
    async fn ingredient_names(&self, ids: &[IngredientId]) -> HashMap<IngredientId, String>;
}

/// In-memory record store for development and tests.
#[derive(Default)]
pub struct MemoryStore {
    credentials: RwLock<HashMap<UserId, RetailerCredential>>,
    recipes: RwLock<HashMap<RecipeId, Vec<RecipeIngredient>>>,
    ingredients: RwLock<HashMap<IngredientId, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a recipe's ingredient lines.
    pub async fn insert_recipe(&self, recipe_id: RecipeId, ingredients: Vec<RecipeIngredient>) {
        self.recipes.write().await.insert(recipe_id, ingredients);
    }

    /// Seed a catalog ingredient's display name.
    pub async fn insert_ingredient(&self, id: IngredientId, name: impl Into<String>) {
        self.ingredients.write().await.insert(id, name.into());
    }
}

impl CredentialStore for MemoryStore {
    async fn credential(&self, user_id: UserId) -> Option<RetailerCredential> {
        self.credentials.read().await.get(&user_id).cloned()
    }

    async fn upsert_credential(&self, credential: RetailerCredential) {
        self.credentials
            .write()
            .await
            .insert(credential.user_id, credential);
    }
}

impl RecipeStore for MemoryStore {
    async fn recipe_ingredients(&self, recipe_id: RecipeId) -> Vec<RecipeIngredient> {
        self.recipes
            .read()
            .await
            .get(&recipe_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn ingredient_names(&self, ids: &[IngredientId]) -> HashMap<IngredientId, String> {
        let ingredients = self.ingredients.read().await;
        ids.iter()
            .filter_map(|id| ingredients.get(id).map(|name| (*id, name.clone())))
            .collect()
    }
}
