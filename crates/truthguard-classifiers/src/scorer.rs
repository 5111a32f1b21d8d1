//! Logit calibration

/// Smallest probability ever reported
const MIN_PROBABILITY: f64 = f64::MIN_POSITIVE;

/// Largest probability ever reported
const MAX_PROBABILITY: f64 = 1.0 - f64::EPSILON;

/// Map a raw logit to a probability with the logistic sigmoid.
///
/// Uses the branch form so `exp` is only ever taken of a non-positive
/// number, then clamps so the result stays strictly inside (0, 1) where the
/// exact value would round to 0 or 1.
pub fn calibrate(logit: f64) -> f64 {
    let p = if logit >= 0.0 {
        1.0 / (1.0 + (-logit).exp())
    } else {
        let z = logit.exp();
        z / (1.0 + z)
    };
    p.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_is_even_odds() {
        assert_eq!(calibrate(0.0), 0.5);
    }

    #[test]
    fn test_known_values() {
        assert!((calibrate(2.0) - 0.880_797_077_977_882_3).abs() < 1e-12);
        assert!((calibrate(-2.0) - 0.119_202_922_022_117_7).abs() < 1e-12);
    }

    #[test]
    fn test_extreme_logits_stay_open_interval() {
        for logit in [-1e6, -800.0, -40.0, 40.0, 800.0, 1e6, f64::MAX, f64::MIN] {
            let p = calibrate(logit);
            assert!(p > 0.0 && p < 1.0, "calibrate({}) = {}", logit, p);
        }
    }

    #[test]
    fn test_symmetry() {
        for logit in [0.1, 1.0, 3.5, 10.0] {
            let sum = calibrate(logit) + calibrate(-logit);
            assert!((sum - 1.0).abs() < 1e-12);
        }
    }

    proptest! {
        #[test]
        fn prop_output_in_open_interval(logit in -1e4f64..1e4) {
            let p = calibrate(logit);
            prop_assert!(p > 0.0 && p < 1.0);
        }

        #[test]
        fn prop_monotonic(a in -20.0f64..20.0, gap in 0.01f64..5.0) {
            prop_assert!(calibrate(a) < calibrate(a + gap));
        }
    }
}
