//! # API server
//!
//! Assembles the axum router, mounts Swagger UI, configures CORS and binds
//! the listener. `main` lives in `crates/app`, which builds the state.

use std::sync::Arc;

use axum::Router;
use cacao_analysis::pipeline::Analyzer;
use cacao_core::common::HistoryWindow;
use cacao_core::units::UnitConverter;
use cacao_market::history::HistoryService;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use crate::routes::{dashboard, health, sales};

// ============================================================
//  Shared state
// ============================================================

/// Which history the dashboard watches
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub symbol: String,
    pub window: HistoryWindow,
}

/// Handler state, injected through axum's `State` extractor.
///
/// # Invariants
/// - Built once by the app crate; lives as long as the process.
#[derive(Clone)]
pub struct AppState {
    /// Acquisition with TTL cache
    pub history: Arc<HistoryService>,
    /// Signal and forecast pipeline
    pub analyzer: Arc<Analyzer>,
    pub settings: Arc<DashboardSettings>,
    /// Ton -> quintal conversion for displayed figures
    pub converter: UnitConverter,
}

// ============================================================
//  OpenAPI document
// ============================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cacao Dashboard API",
        version = "0.1.0",
        description = "Cocoa futures price summary, sell/wait suggestion and next-day forecast.",
        license(name = "MIT")
    ),
    tags(
        (name = "Dashboard", description = "Price summary, suggestion and expert view"),
        (name = "Sales", description = "Sale log form"),
        (name = "System", description = "Service health")
    )
)]
pub struct ApiDoc;

// ============================================================
//  Router and startup
// ============================================================

/// # Summary
/// Builds the full application router.
///
/// # Logic
/// 1. Register every documented route.
/// 2. Split the OpenAPI document out and mount Swagger UI on it.
/// 3. Apply a permissive CORS layer.
pub fn build_router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health::health))
        .routes(routes!(dashboard::get_dashboard))
        .routes(routes!(sales::log_sale))
        .with_state(state)
        .split_for_parts();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(cors)
}

/// # Summary
/// Serves the API on an already bound listener until the future is dropped.
pub async fn serve(state: AppState, listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, build_router(state)).await
}

/// # Summary
/// Binds `bind_addr` and serves the API.
///
/// # Arguments
/// * `state` - shared state built by the app crate
/// * `bind_addr` - e.g. `"0.0.0.0:8080"`
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Cacao API listening on {}", bind_addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", bind_addr);

    serve(state, listener).await?;
    Ok(())
}
