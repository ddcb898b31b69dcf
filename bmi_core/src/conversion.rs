//! Closed-form conversions between weight, height and BMI.
//!
//! All functions are pure and unguarded: callers keep inputs strictly
//! positive (see [`crate::propagation`] for clamping).

use crate::{Category, WeightRange};

/// BMI below this is underweight
pub const UNDERWEIGHT_LIMIT: f64 = 18.5;
/// BMI below this (and at least [`UNDERWEIGHT_LIMIT`]) is normal weight
pub const NORMAL_LIMIT: f64 = 25.0;
/// BMI below this (and at least [`NORMAL_LIMIT`]) is overweight
pub const OVERWEIGHT_LIMIT: f64 = 30.0;

/// Lower BMI bound of the healthy weight range
pub const HEALTHY_BMI_MIN: f64 = 18.5;
/// Upper BMI bound of the healthy weight range
pub const HEALTHY_BMI_MAX: f64 = 24.9;

fn height_in_meters_squared(height_cm: f64) -> f64 {
    let meters = height_cm / 100.0;
    meters * meters
}

/// `weight / (height/100)^2`
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    weight_kg / height_in_meters_squared(height_cm)
}

/// `bmi * (height/100)^2`
pub fn compute_weight(bmi: f64, height_cm: f64) -> f64 {
    bmi * height_in_meters_squared(height_cm)
}

/// `sqrt(weight / bmi) * 100`
pub fn compute_height(bmi: f64, weight_kg: f64) -> f64 {
    (weight_kg / bmi).sqrt() * 100.0
}

/// Classify a BMI value
///
/// Each boundary value belongs to the higher bucket: 18.5 is normal weight,
/// 25 is overweight and 30 is obese.
pub fn classify(bmi: f64) -> Category {
    if bmi < UNDERWEIGHT_LIMIT {
        Category::Underweight
    } else if bmi < NORMAL_LIMIT {
        Category::NormalWeight
    } else if bmi < OVERWEIGHT_LIMIT {
        Category::Overweight
    } else {
        Category::Obese
    }
}

/// Weight range corresponding to BMI 18.5 - 24.9 at the given height
pub fn healthy_weight_range(height_cm: f64) -> WeightRange {
    let squared = height_in_meters_squared(height_cm);
    WeightRange {
        min: HEALTHY_BMI_MIN * squared,
        max: HEALTHY_BMI_MAX * squared,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn relative_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
    }

    #[test]
    fn test_compute_bmi_reference_values() {
        let bmi = compute_bmi(70.0, 175.0);
        assert!((bmi - 22.857).abs() < 0.001);
        assert_eq!(classify(bmi), Category::NormalWeight);

        let bmi = compute_bmi(85.0, 175.0);
        assert!((bmi - 27.755).abs() < 0.001);
        assert_eq!(classify(bmi), Category::Overweight);
    }

    #[test]
    fn test_compute_height() {
        let height = compute_height(22.857142857142858, 70.0);
        assert!((height - 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(classify(18.49999), Category::Underweight);
        assert_eq!(classify(18.5), Category::NormalWeight);
        assert_eq!(classify(24.999), Category::NormalWeight);
        assert_eq!(classify(25.0), Category::Overweight);
        assert_eq!(classify(29.999), Category::Overweight);
        assert_eq!(classify(30.0), Category::Obese);
    }

    #[test]
    fn test_healthy_weight_range() {
        let range = healthy_weight_range(200.0);
        assert!((range.min - 74.0).abs() < 1e-9);
        assert!((range.max - 99.6).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_inputs_are_not_finite() {
        assert!(!compute_bmi(70.0, 0.0).is_finite());
        assert!(compute_height(-5.0, 70.0).is_nan());
        assert!(!compute_height(0.0, 70.0).is_finite());
    }

    proptest! {
        #[test]
        fn weight_survives_bmi_round_trip(weight in 30.0f64..=200.0, height in 100.0f64..=250.0) {
            let back = compute_weight(compute_bmi(weight, height), height);
            prop_assert!(relative_eq(back, weight), "{} != {}", back, weight);
        }

        #[test]
        fn bmi_survives_weight_round_trip(bmi in 10.0f64..=60.0, height in 100.0f64..=250.0) {
            let back = compute_bmi(compute_weight(bmi, height), height);
            prop_assert!(relative_eq(back, bmi), "{} != {}", back, bmi);
        }

        #[test]
        fn height_survives_bmi_round_trip(weight in 30.0f64..=200.0, height in 100.0f64..=250.0) {
            let back = compute_height(compute_bmi(weight, height), weight);
            prop_assert!(relative_eq(back, height), "{} != {}", back, height);
        }

        #[test]
        fn healthy_range_grows_with_height(h1 in 100.0f64..250.0, delta in 0.01f64..50.0) {
            let h2 = h1 + delta;
            prop_assert!(healthy_weight_range(h1).max < healthy_weight_range(h2).max);
        }
    }
}
