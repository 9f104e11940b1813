//! HTTP client for the retailer gateway.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info, warn};

use larder_core::{ListAddOutcome, ListItem, ProductMatch};

use crate::config::RetailerConfig;

use super::conversions;
use super::types::{
    AddListItemRequest, RawProduct, SearchResponse, ShoppingListEntry, ShoppingListResponse,
};
use super::{RetailerApi, RetailerError};

/// Ceiling for each individual gateway call. A timeout degrades exactly
/// like any other transport failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Largest catalog search page the gateway accepts.
const MAX_SEARCH_LIMIT: usize = 50;

/// Fixed client identification header; the gateway rejects unknown clients.
const CLIENT_USER_AGENT: &str = "Larder/1.0 (Android)";

/// Statuses the list-add endpoint returns on success.
const ADD_SUCCESS_STATUSES: [StatusCode; 3] = [
    StatusCode::OK,
    StatusCode::CREATED,
    StatusCode::NO_CONTENT,
];

/// Client for the retailer gateway (catalog search + shopping list).
///
/// Sole holder of credential state. The token is read-only here: it is
/// captured out-of-band and never refreshed by this client.
#[derive(Clone)]
pub struct RetailerClient {
    client: reqwest::Client,
    api_base: String,
    search_base: String,
    auth_token: Option<SecretString>,
}

impl RetailerClient {
    /// Create a new retailer gateway client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &RetailerConfig) -> Result<Self, RetailerError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("User-Agent", HeaderValue::from_static(CLIENT_USER_AGENT));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            search_base: config.search_base.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// The configured bearer token, treating an empty token as absent.
    fn token(&self) -> Option<&SecretString> {
        self.auth_token
            .as_ref()
            .filter(|token| !token.expose_secret().is_empty())
    }

    /// Whether an access token is present. Pure, no I/O.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.token().is_some()
    }

    // ── Product Search ──

    /// Search the catalog for products at a store.
    ///
    /// Returns an empty vec when the client is not configured, the term is
    /// empty, the token has expired, or the request fails in any way. A
    /// single search failing must not abort matching for other ingredients,
    /// so failures surface only through tracing.
    pub async fn search_products(
        &self,
        term: &str,
        store_id: &str,
        limit: usize,
    ) -> Vec<RawProduct> {
        if term.trim().is_empty() {
            return Vec::new();
        }
        let Some(token) = self.token() else {
            warn!("retailer not configured - skipping product search");
            return Vec::new();
        };

        let limit = limit.clamp(1, MAX_SEARCH_LIMIT);
        match self.fetch_products(token, term, store_id, limit).await {
            Ok(products) => products,
            Err(RetailerError::AuthExpired) => {
                error!("retailer auth token expired - needs re-capture");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, term, "retailer product search failed");
                Vec::new()
            }
        }
    }

    async fn fetch_products(
        &self,
        token: &SecretString,
        term: &str,
        store_id: &str,
        limit: usize,
    ) -> Result<Vec<RawProduct>, RetailerError> {
        let response = self
            .client
            .get(format!("{}/product-search", self.api_base))
            .query(&[
                ("query", term),
                ("storeId", store_id),
                ("offset", "0"),
                ("limit", &limit.to_string()),
            ])
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        let body: SearchResponse = Self::check_status(response).await?.json().await?;
        debug!(count = body.products.len(), term, "catalog search returned");
        Ok(body.products)
    }

    /// Best product match for one ingredient, or `None` when nothing was
    /// found or the search degraded.
    pub async fn search_best_match(
        &self,
        ingredient: &str,
        store_id: &str,
    ) -> Option<ProductMatch> {
        let products = self.search_products(ingredient, store_id, 1).await;
        products
            .first()
            .map(|raw| conversions::product_match(raw, ingredient, &self.search_base))
    }

    // ── Shopping List Operations ──

    /// Read the remote shopping list.
    ///
    /// Same degrade-to-empty policy as search.
    pub async fn get_shopping_list(&self) -> Vec<ShoppingListEntry> {
        let Some(token) = self.token() else {
            warn!("retailer not configured - skipping shopping list read");
            return Vec::new();
        };

        match self.fetch_shopping_list(token).await {
            Ok(items) => items,
            Err(RetailerError::AuthExpired) => {
                error!("retailer auth token expired - needs re-capture");
                Vec::new()
            }
            Err(e) => {
                error!(error = %e, "failed to read retailer shopping list");
                Vec::new()
            }
        }
    }

    async fn fetch_shopping_list(
        &self,
        token: &SecretString,
    ) -> Result<Vec<ShoppingListEntry>, RetailerError> {
        let response = self
            .client
            .get(format!("{}/shoppinglist", self.api_base))
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        let body: ShoppingListResponse = Self::check_status(response).await?.json().await?;
        Ok(body.items)
    }

    /// Add items to the remote shopping list.
    ///
    /// One mutation request per item, sequentially, never batched: a single
    /// item's failure must not block subsequent items. Failures append
    /// `"<name>: <detail>"` to the outcome's error list. Short-circuits
    /// without any network calls when not configured.
    pub async fn add_to_shopping_list(&self, items: &[ListItem]) -> ListAddOutcome {
        let Some(token) = self.token() else {
            warn!("retailer not configured - skipping shopping list add");
            return ListAddOutcome::not_configured(items.len());
        };

        let mut added = 0;
        let mut errors = Vec::new();
        for item in items {
            match self.push_list_item(token, item).await {
                Ok(()) => added += 1,
                Err(e) => errors.push(format!("{}: {e}", item.name)),
            }
        }

        info!(added, total = items.len(), "added items to retailer shopping list");
        ListAddOutcome {
            success: added > 0,
            added,
            total: items.len(),
            errors,
        }
    }

    async fn push_list_item(
        &self,
        token: &SecretString,
        item: &ListItem,
    ) -> Result<(), RetailerError> {
        let response = self
            .client
            .post(format!("{}/shoppinglist/add", self.api_base))
            .bearer_auth(token.expose_secret())
            .json(&AddListItemRequest {
                item_name: item.name.clone(),
                quantity: item.quantity,
            })
            .send()
            .await?;

        let status = response.status();
        if ADD_SUCCESS_STATUSES.contains(&status) {
            Ok(())
        } else {
            Err(RetailerError::Api(status.as_u16()))
        }
    }

    /// Map 401 to [`RetailerError::AuthExpired`] and any other non-success
    /// status to [`RetailerError::Api`], logging a body snippet for
    /// diagnostics.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, RetailerError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(RetailerError::AuthExpired);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "retailer gateway returned non-success status"
            );
            return Err(RetailerError::Api(status.as_u16()));
        }
        Ok(response)
    }
}

impl RetailerApi for RetailerClient {
    fn is_configured(&self) -> bool {
        Self::is_configured(self)
    }

    async fn search_best_match(&self, ingredient: &str, store_id: &str) -> Option<ProductMatch> {
        Self::search_best_match(self, ingredient, store_id).await
    }

    async fn add_to_shopping_list(&self, items: &[ListItem]) -> ListAddOutcome {
        Self::add_to_shopping_list(self, items).await
    }
}
