use crate::math::ulp_eq;
use core::fmt::Debug;
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// Trait representing a unit of length.
pub trait LengthMeasurement: Debug + Copy + Clone {
    /// The name of the unit.
    const NAME: &'static str;

    /// The symbols of the unit, the first one is used for display.
    const SYMBOLS: &'static [&'static str];

    /// The factor to convert from micrometres to the unit.
    const FACTOR_FROM_MICROMETRE: f64;

    /// The factor to convert from the unit to micrometres.
    const FACTOR_TO_MICROMETRE: f64 = 1.0 / Self::FACTOR_FROM_MICROMETRE;

    /// The factor to convert from nanometres to the unit.
    const FACTOR_FROM_NANOMETRE: f64;

    /// The factor to convert from the unit to nanometres.
    const FACTOR_TO_NANOMETRE: f64 = 1.0 / Self::FACTOR_FROM_NANOMETRE;
}

/// Micrometres.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UMicrometre;

/// Nanometres.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UNanometre;

impl LengthMeasurement for UMicrometre {
    const NAME: &'static str = "micrometre";
    const SYMBOLS: &'static [&'static str] = &["um", "µm", "μm"];
    const FACTOR_FROM_MICROMETRE: f64 = 1.0;
    const FACTOR_FROM_NANOMETRE: f64 = 1.0e-3;
}

impl LengthMeasurement for UNanometre {
    const NAME: &'static str = "nanometre";
    const SYMBOLS: &'static [&'static str] = &["nm"];
    const FACTOR_FROM_MICROMETRE: f64 = 1.0e3;
    const FACTOR_FROM_NANOMETRE: f64 = 1.0;
}

/// Length with unit.
#[derive(Copy, Clone)]
pub struct Length<L: LengthMeasurement> {
    pub(crate) value: f64,
    pub(crate) unit: core::marker::PhantomData<L>,
}

/// Type alias for `Length<UMicrometre>`.
pub type Micrometres = Length<UMicrometre>;

/// Type alias for `Length<UNanometre>`.
pub type Nanometres = Length<UNanometre>;

impl<L: LengthMeasurement> Debug for Length<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Length {{ value: {}, unit: {} }}",
            self.value,
            L::SYMBOLS[0]
        )
    }
}

impl<L: LengthMeasurement> Display for Length<L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, L::SYMBOLS[0])
    }
}

impl<L: LengthMeasurement> PartialEq for Length<L> {
    fn eq(&self, other: &Self) -> bool { ulp_eq(self.value, other.value) }
}

impl<L: LengthMeasurement> PartialOrd for Length<L> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<L: LengthMeasurement> Length<L> {
    /// Zero length.
    pub const ZERO: Self = Self::new(0.0);

    /// Creates a new length with unit.
    pub const fn new(value: f64) -> Self {
        Length {
            value,
            unit: core::marker::PhantomData,
        }
    }

    /// Returns the value of the length in its own unit.
    pub const fn value(&self) -> f64 { self.value }

    /// Whether the length is strictly greater than zero.
    pub fn is_positive(&self) -> bool { self.value > 0.0 }

    /// Returns the larger of the two lengths.
    pub fn max(self, other: Self) -> Self { Self::new(self.value.max(other.value)) }

    /// Converts the length to micrometres.
    #[inline]
    pub fn in_micrometres(&self) -> Micrometres { Length::new(self.value * L::FACTOR_TO_MICROMETRE) }

    /// Converts the length to nanometres.
    #[inline]
    pub fn in_nanometres(&self) -> Nanometres { Length::new(self.value * L::FACTOR_TO_NANOMETRE) }
}

impl From<Nanometres> for Micrometres {
    fn from(length: Nanometres) -> Self { length.in_micrometres() }
}

impl From<Micrometres> for Nanometres {
    fn from(length: Micrometres) -> Self { length.in_nanometres() }
}

impl<L: LengthMeasurement> FromStr for Length<L> {
    type Err = &'static str;

    /// Parses strings like `"0.5 um"` or `"500nm"`. A bare number is
    /// interpreted in the unit of the target type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, unit) = super::split_quantity(s)?;
        if unit.is_empty() {
            Ok(Self::new(value))
        } else if UMicrometre::SYMBOLS.contains(&unit) {
            Ok(Self::new(value * L::FACTOR_FROM_MICROMETRE))
        } else if UNanometre::SYMBOLS.contains(&unit) {
            Ok(Self::new(value * L::FACTOR_FROM_NANOMETRE))
        } else {
            Err("invalid length unit")
        }
    }
}

super::impl_ops!(Length<L> where LengthMeasurement);
super::impl_serialization!(
    Length<L> where LengthMeasurement,
    LengthVisitor,
    "a number or a string containing a number and a unit of length"
);

/// Helper creating a new `Length<UMicrometre>`.
#[macro_export]
macro_rules! um {
    ($value:expr) => {
        $crate::units::Length::<$crate::units::UMicrometre>::new($value)
    };
}

/// Helper creating a new `Length<UNanometre>`.
#[macro_export]
macro_rules! nm {
    ($value:expr) => {
        $crate::units::Length::<$crate::units::UNanometre>::new($value)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion() {
        let a = crate::um!(0.8);
        assert_eq!(a.in_nanometres(), Nanometres::new(800.0));
        let b: Micrometres = crate::nm!(500.0).into();
        assert_eq!(b, Micrometres::new(0.5));
    }

    #[test]
    fn parsing() {
        assert_eq!("0.5 um".parse::<Micrometres>(), Ok(Micrometres::new(0.5)));
        assert_eq!("0.5µm".parse::<Micrometres>(), Ok(Micrometres::new(0.5)));
        assert_eq!("500 nm".parse::<Micrometres>(), Ok(Micrometres::new(0.5)));
        assert_eq!("1.2".parse::<Nanometres>(), Ok(Nanometres::new(1.2)));
        assert!("1 mile".parse::<Micrometres>().is_err());
    }

    #[test]
    fn ordering() {
        assert!(crate::um!(1e-4) < crate::um!(0.01));
        assert_eq!(crate::um!(0.0).max(crate::um!(1e-4)), crate::um!(1e-4));
        assert!(!Micrometres::ZERO.is_positive());
    }
}
