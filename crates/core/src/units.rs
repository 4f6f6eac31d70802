use serde::{Deserialize, Serialize};

/// Quintals (100 lb) per metric ton.
pub const QUINTALS_PER_TON: f64 = 22.046;

/// # Summary
/// Converts exchange quotes (USD per metric ton) into the per-quintal
/// figures growers sell in.
///
/// # Invariants
/// - Display only. Decisions compare prices in the quote unit.
/// - `factor` is finite and positive; `new` falls back to the default
///   otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitConverter {
    factor: f64,
}

impl UnitConverter {
    /// # Summary
    /// Creates a converter for the given ton-to-quintal factor.
    ///
    /// # Arguments
    /// * `factor`: quintals per ton.
    ///
    /// # Returns
    /// A converter; a non-positive or non-finite factor yields the default.
    pub fn new(factor: f64) -> Self {
        if factor.is_finite() && factor > 0.0 {
            Self { factor }
        } else {
            Self::default()
        }
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Price or price difference per ton -> per quintal
    pub fn per_quintal(&self, per_ton: f64) -> f64 {
        per_ton / self.factor
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self {
            factor: QUINTALS_PER_TON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_quintal_conversion() {
        let conv = UnitConverter::default();
        let qq = conv.per_quintal(22_046.0);
        assert!((qq - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_factor_falls_back() {
        assert_eq!(UnitConverter::new(0.0), UnitConverter::default());
        assert_eq!(UnitConverter::new(f64::NAN), UnitConverter::default());
        assert_eq!(UnitConverter::new(10.0).factor(), 10.0);
    }
}
