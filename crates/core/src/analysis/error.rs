use crate::market::error::MarketError;
use thiserror::Error;

/// # Summary
/// Pipeline errors that leave the dashboard without a signal.
///
/// # Invariants
/// - Both variants are shown as the same "unavailable, retry shortly" state.
#[derive(Error, Debug)]
pub enum AnalysisError {
    // Acquisition failed or returned no bars
    #[error("Market data unavailable: {0}")]
    DataUnavailable(String),
    // Fewer than two bars; no previous close to compare against
    #[error("Insufficient data: {bars} bar(s), at least 2 required")]
    InsufficientData { bars: usize },
}

impl From<MarketError> for AnalysisError {
    fn from(err: MarketError) -> Self {
        AnalysisError::DataUnavailable(err.to_string())
    }
}

/// # Summary
/// Forecast failures. Soft: reported as a warning next to a valid signal.
#[derive(Error, Debug)]
pub enum ForecastError {
    // No (features -> next close) pair could be built
    #[error("Not enough complete bars to train: {rows} usable row(s)")]
    InsufficientData { rows: usize },
    // The most recent bar has a NaN or infinite feature
    #[error("Latest bar has non-finite features")]
    InvalidFeatures,
    #[error("Model produced a non-finite prediction")]
    NonFinitePrediction,
    // Fitting failed for any other reason
    #[error("Training error: {0}")]
    Training(String),
}
