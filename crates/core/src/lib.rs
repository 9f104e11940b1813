//! Larder Core - Shared types library.
//!
//! This crate provides common types used across all Larder components:
//! - `server` - Recipe/grocery service binary
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, retailer credentials, product matches, and sync results

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
