//! Larder server library.
//!
//! This crate provides the server functionality as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod matcher;
pub mod retailer;
pub mod routes;
pub mod state;
pub mod stores;
pub mod sync;
