//! # `cacao-api` - HTTP API
//!
//! JSON surface of the cocoa price dashboard. Built with `axum`, documented
//! through `utoipa` (Swagger UI at `/swagger-ui`).
//!
//! ## Responsibilities
//! - Load the configured history through `HistoryService`
//! - Run the `Analyzer` pipeline off the async workers
//! - Turn the domain outcome into the dashboard view model
//! - Acknowledge sale log entries (nothing is stored)

pub mod error;
pub mod routes;
pub mod server;
pub mod types;
