//! Probability → risk tier.

use crate::models::RiskTier;

/// Lowest probability classed as Medium Risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.30;

/// Lowest probability classed as High Risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.60;

/// Bucket a probability. Threshold values belong to the higher tier.
pub fn classify(probability: f64) -> RiskTier {
    if probability < MEDIUM_RISK_THRESHOLD {
        RiskTier::Low
    } else if probability < HIGH_RISK_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(0.0), RiskTier::Low);
        assert_eq!(classify(0.2999), RiskTier::Low);
        assert_eq!(classify(0.30), RiskTier::Medium);
        assert_eq!(classify(0.5999), RiskTier::Medium);
        assert_eq!(classify(0.60), RiskTier::High);
        assert_eq!(classify(1.0), RiskTier::High);
    }

    proptest! {
        #[test]
        fn low_below_medium_threshold(p in 0.0f64..MEDIUM_RISK_THRESHOLD) {
            prop_assert_eq!(classify(p), RiskTier::Low);
        }

        #[test]
        fn medium_between_thresholds(p in MEDIUM_RISK_THRESHOLD..HIGH_RISK_THRESHOLD) {
            prop_assert_eq!(classify(p), RiskTier::Medium);
        }

        #[test]
        fn high_from_high_threshold(p in HIGH_RISK_THRESHOLD..=1.0f64) {
            prop_assert_eq!(classify(p), RiskTier::High);
        }

        #[test]
        fn tier_is_monotonic(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let rank = |t: RiskTier| match t {
                RiskTier::Low => 0,
                RiskTier::Medium => 1,
                RiskTier::High => 2,
            };
            prop_assert!(rank(classify(lo)) <= rank(classify(hi)));
        }
    }
}
