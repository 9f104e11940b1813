//! Retailer gateway client: catalog search, shopping list, aisle lookup.
//!
//! # Architecture
//!
//! - Plain REST/JSON over `reqwest`, bearer token captured out-of-band from
//!   the retailer's mobile app
//! - Every search/read failure degrades to an empty result; the degrade
//!   contract is type-visible (the public methods return `Vec`/`Option`,
//!   never `Result`)
//! - Bulk list adds go one request per item and accumulate per-item error
//!   strings instead of aborting
//! - A 401 is reported as "auth token expired" and never auto-retried;
//!   token refresh is out of scope for the whole service
//!
//! # Example
//!
//! ```rust,ignore
//! use larder_server::retailer::RetailerClient;
//!
//! let client = RetailerClient::new(&config.retailer)?;
//!
//! // Best product match for one ingredient
//! let matched = client.search_best_match("chicken breast", "217").await;
//!
//! // Push items to the remote shopping list, best-effort
//! let outcome = client
//!     .add_to_shopping_list(&[ListItem::single("Chicken Breast")])
//!     .await;
//! ```

mod client;
mod conversions;
pub mod types;

pub use client::RetailerClient;
pub use conversions::product_match;

use larder_core::{ListAddOutcome, ListItem, ProductMatch};
use thiserror::Error;

/// Errors that can occur on a single retailer gateway request.
///
/// These never escape the client's public surface: search/read paths
/// convert them to empty results, and the bulk-add path folds them into
/// per-item error strings.
#[derive(Debug, Error)]
pub enum RetailerError {
    /// HTTP transport failed (connect, timeout, body read, JSON decode).
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Gateway returned a non-success status.
    #[error("HTTP {0}")]
    Api(u16),

    /// Gateway returned a 401; the captured token needs re-capture.
    #[error("auth token expired")]
    AuthExpired,
}

/// The retailer operations the matcher and sync orchestrator depend on.
///
/// The production implementation is [`RetailerClient`]; tests substitute
/// in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait RetailerApi {
    /// Whether an access token is present. Pure, no I/O.
    fn is_configured(&self) -> bool;

    /// Best product match for one ingredient, or `None` when nothing was
    /// found or the search degraded.
    async fn search_best_match(&self, ingredient: &str, store_id: &str) -> Option<ProductMatch>;

    /// Push items to the remote shopping list, one request per item.
    async fn add_to_shopping_list(&self, items: &[ListItem]) -> ListAddOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retailer_error_display() {
        assert_eq!(RetailerError::AuthExpired.to_string(), "auth token expired");
        assert_eq!(RetailerError::Api(500).to_string(), "HTTP 500");
    }
}
