use crate::math::ulp_eq;
use core::fmt::{Debug, Display};
use std::str::FromStr;

/// Radian unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct URadian;

/// Degree unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UDegree;

/// Unit trait for angle units.
pub trait AngleUnit: Debug + Copy + Clone {
    /// The name of the unit.
    const NAME: &'static str;

    /// The symbols of the unit, the first one is used for display.
    const SYMBOLS: &'static [&'static str];

    /// The conversion factor from radians.
    const FACTOR_FROM_RAD: f64;

    /// The conversion factor to radians.
    const FACTOR_TO_RAD: f64 = 1.0 / Self::FACTOR_FROM_RAD;

    /// The conversion factor from degrees.
    const FACTOR_FROM_DEG: f64;

    /// The conversion factor to degrees.
    const FACTOR_TO_DEG: f64 = 1.0 / Self::FACTOR_FROM_DEG;
}

impl AngleUnit for URadian {
    const NAME: &'static str = "radian";
    const SYMBOLS: &'static [&'static str] = &["rad", "rads", "radians"];
    const FACTOR_FROM_RAD: f64 = 1.0;
    const FACTOR_FROM_DEG: f64 = std::f64::consts::PI / 180.0;
}

impl AngleUnit for UDegree {
    const NAME: &'static str = "degree";
    const SYMBOLS: &'static [&'static str] = &["deg", "degs", "degrees", "°"];
    const FACTOR_FROM_RAD: f64 = 180.0 / std::f64::consts::PI;
    const FACTOR_FROM_DEG: f64 = 1.0;
}

/// Angle with unit.
#[derive(Copy, Clone)]
pub struct Angle<A: AngleUnit> {
    pub(crate) value: f64,
    pub(crate) unit: core::marker::PhantomData<A>,
}

/// Type alias for `Angle<URadian>`.
pub type Radians = Angle<URadian>;

/// Type alias for `Angle<UDegree>`.
pub type Degrees = Angle<UDegree>;

impl<A: AngleUnit> Debug for Angle<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Angle {{ value: {}, unit: {} }}",
            self.value,
            A::SYMBOLS[0]
        )
    }
}

impl<A: AngleUnit> Display for Angle<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, A::SYMBOLS[0])
    }
}

impl<A: AngleUnit> PartialEq for Angle<A> {
    fn eq(&self, other: &Self) -> bool { ulp_eq(self.value, other.value) }
}

impl<A: AngleUnit> PartialOrd for Angle<A> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

impl<A: AngleUnit> Default for Angle<A> {
    fn default() -> Self { Self::ZERO }
}

impl<A: AngleUnit> Angle<A> {
    /// Zero angle.
    pub const ZERO: Self = Self::new(0.0);

    /// Creates a new angle with unit.
    pub const fn new(value: f64) -> Self {
        Angle {
            value,
            unit: core::marker::PhantomData,
        }
    }

    /// Returns the value of the angle in its own unit.
    pub const fn value(&self) -> f64 { self.value }

    /// Returns the absolute value of the angle.
    pub fn abs(&self) -> Self { Self::new(self.value.abs()) }

    /// Returns the value of the angle in radians.
    #[inline]
    pub fn as_rad(&self) -> f64 { self.value * A::FACTOR_TO_RAD }

    /// Returns the value of the angle in degrees.
    #[inline]
    pub fn as_deg(&self) -> f64 { self.value * A::FACTOR_TO_DEG }

    /// Converts the angle to radians.
    #[inline]
    pub fn to_radians(&self) -> Radians { Angle::new(self.as_rad()) }

    /// Converts the angle to degrees.
    #[inline]
    pub fn to_degrees(&self) -> Degrees { Angle::new(self.as_deg()) }

    /// Computes the sine of the angle.
    pub fn sin(&self) -> f64 { self.as_rad().sin() }

    /// Computes the cosine of the angle.
    pub fn cos(&self) -> f64 { self.as_rad().cos() }

    /// Computes the tangent of the angle.
    pub fn tan(&self) -> f64 { self.as_rad().tan() }

    /// Prints the angle in human readable format in degrees.
    pub fn prettified(&self) -> String { format!("{}°", self.as_deg()) }
}

impl Angle<UDegree> {
    /// Quarter turn in degrees.
    pub const HALF_PI: Self = Self::new(90.0);
    /// Half turn in degrees.
    pub const PI: Self = Self::new(180.0);
}

impl Angle<URadian> {
    /// Quarter turn in radians.
    pub const HALF_PI: Self = Self::new(std::f64::consts::FRAC_PI_2);
    /// Half turn in radians.
    pub const PI: Self = Self::new(std::f64::consts::PI);
}

impl From<Degrees> for Radians {
    fn from(angle: Degrees) -> Self { angle.to_radians() }
}

impl From<Radians> for Degrees {
    fn from(angle: Radians) -> Self { angle.to_degrees() }
}

impl<A: AngleUnit> FromStr for Angle<A> {
    type Err = &'static str;

    /// Parses strings like `"30 deg"`, `"0.5rad"` or `"45°"`. A bare number
    /// is interpreted in the unit of the target type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, unit) = super::split_quantity(s)?;
        if unit.is_empty() {
            Ok(Self::new(value))
        } else if URadian::SYMBOLS.contains(&unit) {
            Ok(Self::new(value * A::FACTOR_FROM_RAD))
        } else if UDegree::SYMBOLS.contains(&unit) {
            Ok(Self::new(value * A::FACTOR_FROM_DEG))
        } else {
            Err("invalid angle unit")
        }
    }
}

super::impl_ops!(Angle<A> where AngleUnit);
super::impl_serialization!(
    Angle<A> where AngleUnit,
    AngleVisitor,
    "a number or a string containing a number and a unit of angle"
);

/// Helper creating a new `Angle<URadian>`.
#[macro_export]
macro_rules! rad {
    ($value:expr) => {
        $crate::units::Angle::<$crate::units::URadian>::new($value)
    };
}

/// Helper creating a new `Angle<UDegree>`.
#[macro_export]
macro_rules! deg {
    ($value:expr) => {
        $crate::units::Angle::<$crate::units::UDegree>::new($value)
    };
}
