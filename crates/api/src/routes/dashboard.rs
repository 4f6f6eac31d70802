//! # Dashboard route
//!
//! One request is one dashboard render: fetch (or reuse) the history, run
//! the pipeline, shape the view model.

use axum::Json;
use axum::extract::{Query, State};
use cacao_core::analysis::error::AnalysisError;
use cacao_core::common::ViewMode;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{ApiResponse, DashboardQuery, DashboardResponse};

/// Dashboard view model
///
/// Always answers 200 with either a `ready` or an `unavailable` dashboard;
/// only a malformed `mode` is rejected.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Dashboard",
    params(
        ("mode" = Option<String>, Query, description = "basic (default) or expert")
    ),
    responses(
        (status = 200, description = "Dashboard rendered", body = ApiResponse<DashboardResponse>),
        (status = 400, description = "Unknown mode", body = crate::types::ApiErrorResponse)
    )
)]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<ApiResponse<DashboardResponse>>, ApiError> {
    let mode = match query.mode.as_deref() {
        Some(raw) => raw.parse::<ViewMode>().map_err(ApiError::BadRequest)?,
        None => ViewMode::default(),
    };
    let symbol = state.settings.symbol.clone();

    // 1. Acquisition: cached or fresh history
    let series = match state.history.load(&symbol, state.settings.window).await {
        Ok(series) => series,
        Err(e) => {
            let view = DashboardResponse::unavailable(&symbol, mode, &AnalysisError::from(e));
            return Ok(Json(ApiResponse::ok(view)));
        }
    };

    // 2. Pipeline: the forest fit is CPU bound, keep it off the async workers
    let analyzer = state.analyzer.clone();
    let (series, outcome) = tokio::task::spawn_blocking(move || {
        let outcome = analyzer.analyze(&series, mode);
        (series, outcome)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("analysis task failed: {}", e)))?;

    // 3. Presentation
    let view = match outcome {
        Ok(analysis) => {
            DashboardResponse::ready(&symbol, mode, &series, &analysis, state.converter)
        }
        Err(e) => DashboardResponse::unavailable(&symbol, mode, &e),
    };
    Ok(Json(ApiResponse::ok(view)))
}
