use crate::forest::{ForestParams, RandomForest};
use cacao_core::analysis::entity::ForecastResult;
use cacao_core::analysis::error::ForecastError;
use cacao_core::market::entity::PriceSeries;
use tracing::debug;

/// # Summary
/// Supervised pairs built from a price history: each complete bar's
/// features labelled with the next complete bar's close.
///
/// # Invariants
/// - `features.len() == targets.len()`.
/// - Bars with any non-finite feature are dropped before pairing, so a
///   clean series of n bars yields n - 1 examples.
#[derive(Debug, Clone, Default)]
pub struct TrainingSet {
    features: Vec<Vec<f64>>,
    targets: Vec<f64>,
}

impl TrainingSet {
    /// # Summary
    /// Builds the one-step-shifted training set.
    ///
    /// # Logic
    /// 1. Keep only bars whose five features are finite.
    /// 2. Pair row i's features with row i+1's close.
    ///
    /// # Returns
    /// The training set (empty when fewer than two complete bars exist).
    pub fn from_series(series: &PriceSeries) -> Self {
        let complete: Vec<_> = series.bars().iter().filter(|b| b.is_complete()).collect();

        let (features, targets) = complete
            .windows(2)
            .map(|pair| (pair[0].features().to_vec(), pair[1].close))
            .unzip();

        Self { features, targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }
}

/// # Summary
/// Next-day close forecaster. Retrains from scratch on every call; no model
/// state survives between calls.
#[derive(Debug, Clone, Default)]
pub struct Forecaster {
    params: ForestParams,
}

impl Forecaster {
    pub fn new(params: ForestParams) -> Self {
        Self { params }
    }

    /// # Summary
    /// Predicts the close following the most recent bar.
    ///
    /// # Logic
    /// 1. The most recent raw bar is the model input; it must be complete.
    /// 2. Build the shifted training set; it needs at least one example.
    /// 3. Fit the forest and predict the input row.
    /// 4. Reject a non-finite prediction.
    ///
    /// # Arguments
    /// * `series`: the same history the signal is computed from.
    ///
    /// # Returns
    /// The prediction, or a `ForecastError` describing why none is available.
    pub fn forecast(&self, series: &PriceSeries) -> Result<ForecastResult, ForecastError> {
        let latest = series
            .last()
            .ok_or(ForecastError::InsufficientData { rows: 0 })?;
        if !latest.is_complete() {
            return Err(ForecastError::InvalidFeatures);
        }

        let training = TrainingSet::from_series(series);
        if training.is_empty() {
            let rows = series.bars().iter().filter(|b| b.is_complete()).count();
            return Err(ForecastError::InsufficientData { rows });
        }

        let forest = RandomForest::fit(training.features(), training.targets(), &self.params)?;
        let predicted = forest.predict(&latest.features());
        if !predicted.is_finite() {
            return Err(ForecastError::NonFinitePrediction);
        }

        debug!(
            examples = training.len(),
            trees = forest.trees().len(),
            predicted,
            "forecast computed"
        );
        Ok(ForecastResult {
            predicted_next_price: predicted,
            training_examples: training.len(),
        })
    }
}
