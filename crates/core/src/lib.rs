//! # `cacao-core` - domain kernel
//!
//! Entities, error enums and ports shared by every other crate in the
//! workspace. Adapters (feed, cache, api) depend on this crate, never the
//! other way around.

pub mod analysis;
pub mod cache;
pub mod common;
pub mod config;
pub mod market;
pub mod sale;
pub mod units;
