//! # `cacao-analysis` - signal and forecast pipeline
//!
//! Pure functions from a `PriceSeries` to the dashboard's decision signal
//! and an optional one-step close forecast. Nothing here touches the
//! network, the cache or the clock.

pub mod forecast;
pub mod forest;
pub mod pipeline;
pub mod signal;
mod stats;

#[cfg(test)]
pub(crate) mod testing;
