use axum::Json;
use cacao_core::sale::entity::SaleLogEntry;
use tracing::info;
use uuid::Uuid;

use crate::types::{ApiResponse, SaleReceipt, SaleRequest};

/// Log a sale
///
/// Acknowledges the entry with a receipt. The entry is written to the
/// application log only; nothing is stored.
#[utoipa::path(
    post,
    path = "/api/v1/sales",
    tag = "Sales",
    request_body = SaleRequest,
    responses(
        (status = 200, description = "Sale acknowledged", body = ApiResponse<SaleReceipt>)
    )
)]
pub async fn log_sale(Json(req): Json<SaleRequest>) -> Json<ApiResponse<SaleReceipt>> {
    let id = Uuid::new_v4();
    let entry = SaleLogEntry::from(req);
    info!(%id, date = %entry.date, quantity = entry.quantity, "sale logged");

    Json(ApiResponse::ok(SaleReceipt {
        id,
        message: "Sale recorded".to_string(),
    }))
}
