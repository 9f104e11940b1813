//! Core types for Larder.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod id;
pub mod product;
pub mod recipe;
pub mod sync;

pub use credential::RetailerCredential;
pub use id::*;
pub use product::ProductMatch;
pub use recipe::RecipeIngredient;
pub use sync::{ListAddOutcome, ListItem, MatchReport, SyncReport};
