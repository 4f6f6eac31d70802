use crate::stats::mean;
use cacao_core::analysis::entity::{Signal, Trend};
use cacao_core::analysis::error::AnalysisError;
use cacao_core::market::entity::PriceSeries;

/// Bars in the short-term average.
pub const AVERAGE_WINDOW: usize = 7;

/// # Summary
/// Derives the sell/wait signal from the latest closes.
///
/// # Logic
/// 1. Require at least two bars.
/// 2. `current` is the last close, `previous` the one before it.
/// 3. `avg_7d` is the mean of the last `min(7, n)` closes.
/// 4. `favorable` iff `current >= avg_7d`; both sides stay in the quote
///    unit, display conversion happens later.
///
/// # Arguments
/// * `series`: chronological history.
///
/// # Returns
/// The signal, or `AnalysisError::InsufficientData` for fewer than two bars.
pub fn compute_signal(series: &PriceSeries) -> Result<Signal, AnalysisError> {
    let bars = series.bars();
    let insufficient = || AnalysisError::InsufficientData { bars: bars.len() };

    let (current, previous) = match bars {
        [.., prev, last] => (last.close, prev.close),
        _ => return Err(insufficient()),
    };

    let tail = &bars[bars.len().saturating_sub(AVERAGE_WINDOW)..];
    let avg_7d = mean(tail.iter().map(|b| b.close)).ok_or_else(insufficient)?;

    let delta = current - previous;
    Ok(Signal {
        current_price: current,
        previous_price: previous,
        delta,
        avg_7d,
        favorable: current >= avg_7d,
        trend: if delta > 0.0 {
            Trend::Rising
        } else {
            Trend::Falling
        },
    })
}
