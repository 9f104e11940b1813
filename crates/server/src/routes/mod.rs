//! Route handlers.
//!
//! Handlers are a thin adapter layer: they deserialize the request, call
//! into the matcher/sync core, and serialize the result. All domain logic
//! lives below this module.

pub mod retailer;

use axum::Router;

use crate::state::AppState;

/// Assemble all application routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(retailer::routes())
}
