use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// # Summary
/// A sale the grower jots down next to the dashboard.
///
/// # Invariants
/// - Not validated and not persisted; it only lives for the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLogEntry {
    pub date: NaiveDate,
    // Quintals sold
    pub quantity: f64,
}
