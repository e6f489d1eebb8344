//! Test helpers shared by the GDD crates: synthetic daily temperature
//! fields, gridMET-like fixtures, scratch directories and float assertions.

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Asserts every value yielded by an iterator is within `epsilon` of `expected`.
///
/// NaN never matches.
///
/// ```ignore
/// use test_utils::assert_all_approx_eq;
///
/// assert_all_approx_eq!(climatology.values.iter(), 1815.0, 1e-9);
/// ```
#[macro_export]
macro_rules! assert_all_approx_eq {
    ($values:expr, $expected:expr, $epsilon:expr) => {{
        let expected: f64 = $expected as f64;
        let epsilon: f64 = $epsilon as f64;
        for (i, value) in $values.into_iter().enumerate() {
            let value: f64 = *value as f64;
            if !((value - expected).abs() <= epsilon) {
                panic!(
                    "assertion failed at index {}: `{:?}` not within {:?} of `{:?}`",
                    i, value, epsilon, expected
                );
            }
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_all_approx_eq_passes() {
        let values = vec![15.0, 15.0000001, 14.9999999];
        assert_all_approx_eq!(values.iter(), 15.0, 1e-6);
    }

    #[test]
    #[should_panic(expected = "index 1")]
    fn test_assert_all_approx_eq_rejects_nan() {
        let values = [15.0, f64::NAN];
        assert_all_approx_eq!(values.iter(), 15.0, 1e-6);
    }
}
