use crate::analysis::error::ForecastError;
use serde::{Deserialize, Serialize};

/// # Summary
/// Direction of the last daily move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    // delta > 0
    Rising,
    // delta <= 0
    Falling,
}

/// # Summary
/// Decision signal derived from the latest closes.
///
/// # Invariants
/// - `favorable == (current_price >= avg_7d)`, both in the quote unit.
/// - `trend == Rising` iff `delta > 0`.
/// - Recomputed on every request; never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub current_price: f64,
    pub previous_price: f64,
    pub delta: f64,
    // Mean close over the last min(7, n) bars
    pub avg_7d: f64,
    pub favorable: bool,
    pub trend: Trend,
}

/// # Summary
/// One-step-ahead close prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    // Predicted next close, quote unit
    pub predicted_next_price: f64,
    // Number of (features -> next close) pairs the model was fitted on
    pub training_examples: usize,
}

/// # Summary
/// Outcome of the optional forecast step.
#[derive(Debug)]
pub enum ForecastStatus {
    // Not requested (basic view)
    Skipped,
    Ready(ForecastResult),
    // Soft failure; the signal is still valid
    Failed(ForecastError),
}

impl ForecastStatus {
    /// Prediction if the forecast succeeded
    pub fn result(&self) -> Option<&ForecastResult> {
        match self {
            ForecastStatus::Ready(result) => Some(result),
            _ => None,
        }
    }
}

/// # Summary
/// Everything the presentation layer needs from one pipeline run.
#[derive(Debug)]
pub struct Analysis {
    pub signal: Signal,
    pub forecast: ForecastStatus,
}
