//! Retailer integration routes - product matching, shopping-list sync.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use larder_core::{RecipeId, RetailerCredential, SyncReport, UserId};

use crate::error::{AppError, Result};
use crate::retailer::product_match;
use crate::retailer::types::ShoppingListEntry;
use crate::state::AppState;
use crate::stores::CredentialStore;
use crate::sync;

/// Captured tokens are assumed valid for a day; after that the status
/// endpoint reports them expired until a fresh capture arrives.
const TOKEN_TTL_HOURS: i64 = 24;

/// Retailer route table.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/retailer/status", get(retailer_status))
        .route("/api/retailer/token", post(save_token))
        .route("/api/retailer/search", get(search_products))
        .route("/api/retailer/list", get(shopping_list))
        .route("/api/retailer/match/{recipe_id}", get(match_recipe_ingredients))
        .route("/api/retailer/list/add/{recipe_id}", post(add_recipe_to_list))
}

const fn default_user_id() -> i32 {
    1
}

const fn default_search_limit() -> usize {
    5
}

// ── Connection Status ──

#[derive(Debug, Deserialize)]
struct UserQuery {
    #[serde(default = "default_user_id")]
    user_id: i32,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    connected: bool,
    expired: bool,
    store_id: String,
}

/// Check whether the retailer is configured and the captured token is
/// still considered valid. A stored credential wins over the
/// env-configured token.
async fn retailer_status(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Json<StatusResponse> {
    let store_id = state.config().retailer.store_id.clone();

    let response = match state.store().credential(UserId::new(query.user_id)).await {
        Some(credential) => StatusResponse {
            connected: credential.is_configured(),
            expired: credential.is_expired(Utc::now()),
            store_id,
        },
        None => StatusResponse {
            connected: state.retailer().is_configured(),
            expired: false,
            store_id,
        },
    };

    Json(response)
}

// ── Save Token (captured out-of-band) ──

#[derive(Debug, Deserialize)]
struct TokenRequest {
    #[serde(default = "default_user_id")]
    user_id: i32,
    auth_token: String,
    #[serde(default)]
    refresh_token: String,
}

#[derive(Debug, Serialize)]
struct TokenResponse {
    status: &'static str,
    message: String,
}

/// Save a retailer bearer token captured from the mobile app.
///
/// This is the single credential write path; the core itself never
/// mutates credentials.
async fn save_token(
    State(state): State<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>> {
    if request.auth_token.is_empty() {
        return Err(AppError::BadRequest("auth_token must not be empty".to_string()));
    }

    let user_id = UserId::new(request.user_id);
    let refresh_token = Some(request.refresh_token).filter(|token| !token.is_empty());
    let expires_at = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);

    state
        .store()
        .upsert_credential(RetailerCredential::new(
            user_id,
            request.auth_token,
            refresh_token,
            Some(expires_at),
        ))
        .await;

    info!(user = %user_id, "retailer token saved");
    Ok(Json(TokenResponse {
        status: "ok",
        message: "Retailer token saved".to_string(),
    }))
}

// ── Product Search ──

#[derive(Debug, Deserialize)]
struct SearchParams {
    /// Search term
    q: String,
    #[serde(default = "default_search_limit")]
    limit: usize,
}

#[derive(Debug, Serialize)]
struct SearchResult {
    upc: String,
    description: String,
    brand: String,
    size: String,
    price: Option<Decimal>,
    on_sale: bool,
}

/// Search retailer products, trimmed for display.
async fn search_products(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<SearchResult>>> {
    if params.limit == 0 || params.limit > 50 {
        return Err(AppError::BadRequest("limit must be between 1 and 50".to_string()));
    }

    let retailer = &state.config().retailer;
    let products = state
        .retailer()
        .search_products(&params.q, &retailer.store_id, params.limit)
        .await;

    let results = products
        .iter()
        .map(|raw| {
            let record = product_match(raw, &params.q, &retailer.search_base);
            SearchResult {
                upc: record.upc,
                description: record.description,
                brand: record.brand,
                size: record.size,
                price: record.price,
                on_sale: record.on_sale,
            }
        })
        .collect();

    Ok(Json(results))
}

// ── Shopping List ──

/// Read the current remote shopping list.
async fn shopping_list(State(state): State<AppState>) -> Json<Vec<ShoppingListEntry>> {
    Json(state.retailer().get_shopping_list().await)
}

// ── Product Matching ──

/// Match all recipe ingredients to retailer products.
async fn match_recipe_ingredients(
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<larder_core::MatchReport>> {
    let report = sync::match_recipe(
        state.retailer(),
        state.store(),
        RecipeId::new(recipe_id),
        &state.config().retailer.store_id,
    )
    .await?;

    Ok(Json(report))
}

// ── Add to Shopping List ──

#[derive(Debug, Serialize)]
struct SyncResponse {
    #[serde(flatten)]
    report: SyncReport,
    message: String,
}

/// Match a recipe's ingredients and add the matched products to the remote
/// shopping list.
async fn add_recipe_to_list(
    State(state): State<AppState>,
    Path(recipe_id): Path<i32>,
) -> Result<Json<SyncResponse>> {
    if !state.retailer().is_configured() {
        return Err(AppError::NotConfigured);
    }

    let report = sync::sync_recipe(
        state.retailer(),
        state.store(),
        RecipeId::new(recipe_id),
        &state.config().retailer.store_id,
    )
    .await?;

    let message = format!("Added {} items to the retailer shopping list", report.added);
    Ok(Json(SyncResponse { report, message }))
}
