//! Small numerical helpers.
use num_traits::Float;

/// Trait for converting a value into another numeric representation.
pub trait NumericCast<T> {
    /// Converts the value.
    fn cast(&self) -> T;
}

impl NumericCast<f64> for f64 {
    fn cast(&self) -> f64 { *self }
}

impl NumericCast<f64> for f32 {
    fn cast(&self) -> f64 { *self as f64 }
}

/// Equality test of two double precision floating point numbers.
///
/// Two numbers are considered equal if their relative difference is below the
/// machine epsilon; numbers close to zero are compared absolutely.
pub fn ulp_eq(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    let a_abs = a.abs();
    let b_abs = b.abs();
    if a == b {
        true
    } else if a == 0.0 || b == 0.0 || a_abs < f64::MIN_POSITIVE || b_abs < f64::MIN_POSITIVE {
        diff < (f64::MIN_POSITIVE * f64::EPSILON)
    } else {
        (diff / f64::min(a_abs + b_abs, f64::MAX)) < f64::EPSILON
    }
}

/// Returns the reciprocal of the given value.
///
/// Zero maps to a signed infinity.
#[inline(always)]
pub fn rcp_f64(x: f64) -> f64 {
    if x == 0.0 {
        return f64::INFINITY * x.signum();
    }
    1.0 / x
}

/// Returns the square of the given value.
#[inline(always)]
pub fn sqr<F: Float>(x: F) -> F { x * x }

/// Returns the arithmetic mean of the given values, zero for an empty slice.
pub fn mean<F: Float>(values: &[F]) -> F {
    if values.is_empty() {
        return F::zero();
    }
    let sum = values.iter().fold(F::zero(), |acc, x| acc + *x);
    sum / F::from(values.len()).unwrap_or_else(F::one)
}

/// Returns the root mean square deviation of the values from their mean.
pub fn rms<F: Float>(values: &[F]) -> F {
    if values.is_empty() {
        return F::zero();
    }
    let m = mean(values);
    let n = F::from(values.len()).unwrap_or_else(F::one);
    (values.iter().fold(F::zero(), |acc, x| acc + sqr(*x - m)) / n).sqrt()
}

/// Returns the minimum and the maximum of the values.
///
/// Returns `None` for an empty slice; NaNs are skipped.
pub fn min_max<F: Float>(values: &[F]) -> Option<(F, F)> {
    values
        .iter()
        .filter(|x| !x.is_nan())
        .fold(None, |acc, &x| match acc {
            None => Some((x, x)),
            Some((min, max)) => Some((min.min(x), max.max(x))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ulp_equality() {
        assert!(ulp_eq(0.1 + 0.2, 0.3));
        assert!(ulp_eq(0.0, 0.0));
        assert!(!ulp_eq(1.0, 1.0 + 1e-10));
    }

    #[test]
    fn reciprocal() {
        assert_eq!(rcp_f64(4.0), 0.25);
        assert_eq!(rcp_f64(0.0), f64::INFINITY);
        assert_eq!(rcp_f64(-0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn statistics() {
        let values = [1.0f64, 2.0, 3.0, 4.0];
        assert_eq!(mean(&values), 2.5);
        assert!((rms(&values) - 1.25f64.sqrt()).abs() < 1e-12);
        assert_eq!(min_max(&values), Some((1.0, 4.0)));
        assert_eq!(min_max::<f64>(&[]), None);
        assert_eq!(mean::<f32>(&[]), 0.0);
    }

    proptest! {
        #[test]
        fn rms_is_shift_invariant(values in prop::collection::vec(-1.0e3f64..1.0e3, 1..64),
            shift in -1.0e3f64..1.0e3)
        {
            let shifted = values.iter().map(|v| v + shift).collect::<Vec<_>>();
            prop_assert!((rms(&values) - rms(&shifted)).abs() < 1e-6);
        }
    }
}
