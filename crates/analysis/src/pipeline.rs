use crate::forecast::Forecaster;
use crate::signal::compute_signal;
use cacao_core::analysis::entity::{Analysis, ForecastStatus};
use cacao_core::analysis::error::AnalysisError;
use cacao_core::common::ViewMode;
use cacao_core::market::entity::PriceSeries;
use tracing::{debug, warn};

/// # Summary
/// Signal and forecast pipeline over one price history.
///
/// # Invariants
/// - Stateless between calls; safe to share.
/// - A forecast failure never turns into an `AnalysisError`.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    forecaster: Forecaster,
}

impl Analyzer {
    pub fn new(forecaster: Forecaster) -> Self {
        Self { forecaster }
    }

    /// # Summary
    /// Runs the pipeline for one dashboard render.
    ///
    /// # Logic
    /// 1. An empty series is `DataUnavailable`.
    /// 2. Compute the signal (`InsufficientData` below two bars).
    /// 3. Basic view skips the forecast; expert view runs it and keeps the
    ///    outcome, success or failure, alongside the signal.
    ///
    /// # Arguments
    /// * `series`: chronological history.
    /// * `mode`: requested view.
    ///
    /// # Returns
    /// The analysis, or the reason no signal could be produced.
    pub fn analyze(&self, series: &PriceSeries, mode: ViewMode) -> Result<Analysis, AnalysisError> {
        if series.is_empty() {
            return Err(AnalysisError::DataUnavailable("empty price history".into()));
        }

        let signal = compute_signal(series)?;
        debug!(
            current = signal.current_price,
            avg_7d = signal.avg_7d,
            favorable = signal.favorable,
            "signal computed"
        );

        let forecast = match mode {
            ViewMode::Basic => ForecastStatus::Skipped,
            ViewMode::Expert => match self.forecaster.forecast(series) {
                Ok(result) => ForecastStatus::Ready(result),
                Err(e) => {
                    warn!(error = %e, bars = series.len(), "forecast unavailable");
                    ForecastStatus::Failed(e)
                }
            },
        };

        Ok(Analysis { signal, forecast })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::series_from_closes;
    use cacao_core::analysis::error::ForecastError;

    fn closes(n: i32) -> Vec<f64> {
        (0..n).map(|i| 8000.0 + 15.0 * f64::from(i % 5)).collect()
    }

    #[test]
    fn test_empty_series_is_data_unavailable() {
        let result = Analyzer::default().analyze(&PriceSeries::default(), ViewMode::Expert);
        assert!(matches!(result, Err(AnalysisError::DataUnavailable(_))));
    }

    #[test]
    fn test_single_bar_is_insufficient_data() {
        let series = series_from_closes(&[8000.0]);
        let result = Analyzer::default().analyze(&series, ViewMode::Basic);
        assert!(matches!(
            result,
            Err(AnalysisError::InsufficientData { bars: 1 })
        ));
    }

    #[test]
    fn test_basic_mode_skips_forecast() {
        let series = series_from_closes(&closes(20));
        let analysis = Analyzer::default().analyze(&series, ViewMode::Basic).unwrap();
        assert!(matches!(analysis.forecast, ForecastStatus::Skipped));
    }

    #[test]
    fn test_expert_mode_forecasts() {
        let series = series_from_closes(&closes(30));
        let analysis = Analyzer::default().analyze(&series, ViewMode::Expert).unwrap();

        let result = analysis.forecast.result().unwrap();
        assert_eq!(result.training_examples, 29);
    }

    #[test]
    fn test_forecast_failure_keeps_signal() {
        let mut bars = series_from_closes(&[10.0, 12.0, 11.0, 13.0, 14.0, 15.0, 16.0])
            .bars()
            .to_vec();
        if let Some(last) = bars.last_mut() {
            last.volume = f64::NAN;
        }
        let series = PriceSeries::new(bars);

        let analysis = Analyzer::default().analyze(&series, ViewMode::Expert).unwrap();
        assert!((analysis.signal.avg_7d - 13.0).abs() < 1e-12);
        assert!(analysis.signal.favorable);
        assert!(matches!(
            analysis.forecast,
            ForecastStatus::Failed(ForecastError::InvalidFeatures)
        ));
    }
}
