//! Physical quantities carrying their unit in the type.
mod angle;
mod length;

pub use angle::*;
pub use length::*;

/// Splits a quantity string such as `"0.5 um"`, `"30deg"` or `"12"` into its
/// numeric value and its (possibly empty) unit symbol.
pub(crate) fn split_quantity(s: &str) -> Result<(f64, &str), &'static str> {
    let s = s.trim();
    let idx = s
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphabetic() || *c == '°')
        .last()
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    let value = s[..idx]
        .trim()
        .parse::<f64>()
        .map_err(|_| "invalid quantity value")?;
    Ok((value, s[idx..].trim()))
}

/// Implements serialisation through the `Display` and `FromStr`
/// implementations of a unit-carrying type.
macro_rules! impl_serialization {
    ($t:ident<$u:ident> where $u_trait:ident, $visitor:ident, $expecting:literal) => {
        impl<$u: $u_trait> serde::Serialize for $t<$u> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&format!("{}", self))
            }
        }

        impl<'de, $u: $u_trait> serde::Deserialize<'de> for $t<$u> {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct $visitor<T>(core::marker::PhantomData<T>);

                impl<'de, T: $u_trait> serde::de::Visitor<'de> for $visitor<T> {
                    type Value = $t<T>;

                    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                        write!(formatter, $expecting)
                    }

                    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        v.parse::<$t<T>>().map_err(|e| E::custom(e))
                    }

                    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        Ok($t::new(v))
                    }

                    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        Ok($t::new(v as f64))
                    }

                    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        Ok($t::new(v as f64))
                    }
                }

                deserializer.deserialize_any($visitor::<$u>(core::marker::PhantomData))
            }
        }
    };
}

/// Implements the arithmetic operators shared by the unit-carrying types.
macro_rules! impl_ops {
    ($t:ident<$u:ident> where $u_trait:ident) => {
        impl<$u: $u_trait> core::ops::Add for $t<$u> {
            type Output = Self;

            fn add(self, rhs: Self) -> Self::Output { Self::new(self.value + rhs.value) }
        }

        impl<$u: $u_trait> core::ops::Sub for $t<$u> {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self::Output { Self::new(self.value - rhs.value) }
        }

        impl<$u: $u_trait> core::ops::Mul<f64> for $t<$u> {
            type Output = Self;

            fn mul(self, rhs: f64) -> Self::Output { Self::new(self.value * rhs) }
        }

        impl<$u: $u_trait> core::ops::Mul<$t<$u>> for f64 {
            type Output = $t<$u>;

            fn mul(self, rhs: $t<$u>) -> Self::Output { $t::new(self * rhs.value) }
        }

        impl<$u: $u_trait> core::ops::Div<f64> for $t<$u> {
            type Output = Self;

            fn div(self, rhs: f64) -> Self::Output { Self::new(self.value / rhs) }
        }

        impl<$u: $u_trait> core::ops::Neg for $t<$u> {
            type Output = Self;

            fn neg(self) -> Self::Output { Self::new(-self.value) }
        }

        impl<$u: $u_trait> approx::AbsDiffEq for $t<$u> {
            type Epsilon = f64;

            fn default_epsilon() -> Self::Epsilon { f64::EPSILON }

            fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
                f64::abs_diff_eq(&self.value, &other.value, epsilon)
            }
        }

        impl<$u: $u_trait> crate::math::NumericCast<f64> for $t<$u> {
            fn cast(&self) -> f64 { self.value }
        }

        impl<$u: $u_trait> From<f64> for $t<$u> {
            fn from(value: f64) -> Self { Self::new(value) }
        }
    };
}

pub(crate) use impl_ops;
pub(crate) use impl_serialization;

#[cfg(test)]
mod tests {
    use super::split_quantity;

    #[test]
    fn split_quantity_strings() {
        assert_eq!(split_quantity("0.5 um"), Ok((0.5, "um")));
        assert_eq!(split_quantity("30deg"), Ok((30.0, "deg")));
        assert_eq!(split_quantity(" -12 "), Ok((-12.0, "")));
        assert_eq!(split_quantity("45°"), Ok((45.0, "°")));
        assert_eq!(split_quantity("1e-3 µm"), Ok((1e-3, "µm")));
        assert!(split_quantity("deg").is_err());
    }
}
