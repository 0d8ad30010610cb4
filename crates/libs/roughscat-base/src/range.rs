//! Defines an inclusive range of values with a given step size.

use crate::math::NumericCast;
use std::{
    fmt,
    fmt::{Debug, Display, Formatter},
    str::FromStr,
};

/// Tolerance used when deciding whether the stop value is reached by an
/// integral number of steps.
const STEP_COUNT_TOLERANCE: f64 = 1.0e-6;

/// Defines a right inclusive range [a, b] of values with a given step.
///
/// The values are `start + i * step_size` for every `i` such that the value
/// does not exceed `stop`. When the step size does not divide the span
/// evenly, the stop value itself is not part of the sequence.
#[derive(Clone, Copy)]
pub struct StepRangeIncl<T: Copy + Clone> {
    /// Initial value of the range.
    pub start: T,
    /// Final value of the range.
    pub stop: T,
    /// Step size.
    pub step_size: T,
}

impl<T: Copy + Clone + Debug> Debug for StepRangeIncl<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepRangeIncl")
            .field("start", &self.start)
            .field("stop", &self.stop)
            .field("step_size", &self.step_size)
            .finish()
    }
}

impl<T: Copy + Clone + PartialEq> PartialEq for StepRangeIncl<T> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.stop == other.stop && self.step_size == other.step_size
    }
}

impl<T: Copy + Clone> StepRangeIncl<T> {
    /// Creates a new range with the given start, stop and step size.
    pub const fn new(start: T, stop: T, step_size: T) -> Self {
        Self {
            start,
            stop,
            step_size,
        }
    }
}

impl<T> StepRangeIncl<T>
where
    T: NumericCast<f64> + Copy + Clone,
{
    /// Returns the span of the range.
    pub fn span(&self) -> f64 { self.stop.cast() - self.start.cast() }

    /// Returns the number of values in the range.
    ///
    /// # Panics
    ///
    /// Panics if the step size is not strictly positive or if the stop value
    /// is smaller than the start value.
    pub fn step_count(&self) -> usize {
        let step_size = self.step_size.cast();
        assert!(
            step_size > 0.0 && step_size.is_finite(),
            "The step size of a range must be positive, got {}",
            step_size
        );
        let span = self.span();
        assert!(span >= 0.0, "The stop value must not precede the start value");
        (span / step_size + STEP_COUNT_TOLERANCE).floor() as usize + 1
    }
}

impl<T> StepRangeIncl<T>
where
    T: NumericCast<f64> + Copy + Clone + From<f64>,
{
    /// Returns all values of the range in ascending order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = T> {
        let step_size = self.step_size.cast();
        let start = self.start.cast();
        let stop = self.stop.cast();
        let step_count = self.step_count();
        (0..step_count).map(move |i| (start + step_size * i as f64).min(stop).into())
    }
}

impl<T> Display for StepRangeIncl<T>
where
    T: Display + Copy + Clone,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. ={} / {}", self.start, self.stop, self.step_size)
    }
}

impl<'a, T> TryFrom<&'a str> for StepRangeIncl<T>
where
    T: Copy + Clone + FromStr,
{
    type Error = String;

    /// Parses a range written as `"start .. =stop / step"`; the `=` is
    /// optional.
    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        let mut parts = value.split("..");
        let start = parts
            .next()
            .ok_or_else(|| format!("Invalid range: {value}"))?
            .trim()
            .parse::<T>()
            .map_err(|_| format!("Invalid range start value: {value}"))?;
        let mut parts = parts
            .next()
            .ok_or_else(|| format!("Invalid range: {value}"))?
            .trim()
            .split('/');
        let stop = parts
            .next()
            .ok_or_else(|| format!("Invalid range: {value}"))?
            .trim()
            .trim_start_matches('=')
            .trim()
            .parse::<T>()
            .map_err(|_| format!("Invalid range stop value: {value}"))?;
        let step = parts
            .next()
            .ok_or_else(|| format!("Invalid range: {value}"))?
            .trim()
            .parse::<T>()
            .map_err(|_| format!("Invalid range step size value: {value}"))?;
        Ok(Self::new(start, stop, step))
    }
}

impl<T> FromStr for StepRangeIncl<T>
where
    T: Copy + Clone + FromStr,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::try_from(s) }
}

impl<T> serde::Serialize for StepRangeIncl<T>
where
    T: Copy + Clone + Display,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("{}", self))
    }
}

impl<'d, T> serde::Deserialize<'d> for StepRangeIncl<T>
where
    T: Copy + Clone + FromStr,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'d>,
    {
        struct RangeVisitor<T>(std::marker::PhantomData<T>);

        impl<'de, T> serde::de::Visitor<'de> for RangeVisitor<T>
        where
            T: Copy + Clone + FromStr,
        {
            type Value = StepRangeIncl<T>;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "an inclusive range by step size in the form of \"start .. =stop / step\""
                )
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                StepRangeIncl::<T>::try_from(v).map_err(|e| E::custom(e))
            }
        }

        deserializer.deserialize_str(RangeVisitor::<T>(std::marker::PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Degrees;

    #[test]
    fn step_count_even_division() {
        let range = StepRangeIncl::new(-90.0, 90.0, 1.0);
        assert_eq!(range.step_count(), 181);
        let range = StepRangeIncl::new(-90.0, 90.0, 0.001);
        assert_eq!(range.step_count(), 180_001);
        let range = StepRangeIncl::new(0.0, 0.0, 0.5);
        assert_eq!(range.step_count(), 1);
    }

    #[test]
    fn step_count_uneven_division() {
        let range = StepRangeIncl::new(-90.0, 90.0, 7.0);
        assert_eq!(range.step_count(), 26);
        let values = range.values().collect::<Vec<f64>>();
        assert_eq!(values[0], -90.0);
        assert_eq!(values[25], 85.0);
    }

    #[test]
    fn values_never_exceed_stop() {
        let range = StepRangeIncl::new(-90.0, 90.0, 0.1);
        let values = range.values().collect::<Vec<f64>>();
        assert_eq!(values.len(), 1801);
        assert_eq!(*values.last().unwrap(), 90.0);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    #[should_panic]
    fn zero_step_panics() { let _ = StepRangeIncl::new(0.0, 1.0, 0.0).step_count(); }

    #[test]
    fn try_from_str() {
        let range = StepRangeIncl::<f64>::try_from("0.0 .. =12.0 / 0.3").unwrap();
        assert_eq!(range, StepRangeIncl::new(0.0, 12.0, 0.3));
        let range = "-90 .. 90 / 1".parse::<StepRangeIncl<f64>>().unwrap();
        assert_eq!(range, StepRangeIncl::new(-90.0, 90.0, 1.0));
        assert!(StepRangeIncl::<f64>::try_from("0.0 .. 12.0").is_err());
        assert!(StepRangeIncl::<f64>::try_from("a .. =12.0 / 1").is_err());
    }

    #[test]
    fn angle_range() {
        let range = "-90 deg .. =90 deg / 0.5 deg"
            .parse::<StepRangeIncl<Degrees>>()
            .unwrap();
        assert_eq!(range.step_count(), 361);
        assert_eq!(format!("{}", range), "-90 deg .. =90 deg / 0.5 deg");
        let values = range.values().collect::<Vec<_>>();
        assert_eq!(values[1], Degrees::new(-89.5));
    }
}
