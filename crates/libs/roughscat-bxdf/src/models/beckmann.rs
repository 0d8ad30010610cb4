use crate::{model::ModelKind, models::AngularLobe, params::SurfaceParameters};
use base::{
    math::{rcp_f64, sqr},
    units::{Degrees, Radians},
};
use std::fmt::Debug;

/// Lower bound of the RMS microfacet slope.
pub const MIN_MICROFACET_SLOPE: f64 = 0.005;

/// Ratio between the roughness Ra (in micrometres) and the RMS microfacet
/// slope before the slope factor is applied.
pub const RA_PER_SLOPE: f64 = 5.0;

/// Beckmann microfacet lobe, used in the rough regime.
///
/// The microfacet slopes follow a Gaussian distribution of RMS slope `m`:
///
/// $$I(\theta) = \frac{1}{\pi m^2 \cos^4\theta}
///     \exp\left(-\frac{\tan^2(\theta - \theta_i)}{2m^2}\right)$$
///
/// Directions at or below the surface plane receive nothing.
#[derive(Clone, Copy)]
pub struct BeckmannLobe {
    /// RMS slope of the microfacets.
    pub m: f64,
    /// Incident angle.
    pub incident: Radians,
    /// `1 / (π m²)`.
    norm: f64,
    /// `1 / (2 m²)`.
    exp_scale: f64,
}

impl Debug for BeckmannLobe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BeckmannLobe {{ m: {}, θi: {} }}", self.m, self.incident)
    }
}

impl BeckmannLobe {
    /// Creates a lobe of RMS slope `m`, clamped to [`MIN_MICROFACET_SLOPE`].
    pub fn new(m: f64, incident: Degrees) -> Self {
        let m = m.max(MIN_MICROFACET_SLOPE);
        Self {
            m,
            incident: incident.to_radians(),
            norm: rcp_f64(std::f64::consts::PI * sqr(m)),
            exp_scale: rcp_f64(2.0 * sqr(m)),
        }
    }

    /// Creates the lobe for the given surface.
    pub fn from_params(params: &SurfaceParameters) -> Self {
        Self::new(
            params.ra.value() / RA_PER_SLOPE * params.slope_factor,
            params.incident_angle,
        )
    }
}

impl AngularLobe for BeckmannLobe {
    fn kind(&self) -> ModelKind { ModelKind::Beckmann }

    fn eval(&self, angle: Degrees) -> f64 {
        let cos = angle.cos();
        // cos(±90°) evaluates to a tiny positive number.
        if cos <= 0.0 || angle.value().abs() >= 90.0 {
            return 0.0;
        }
        let tan = (angle.as_rad() - self.incident.value()).tan();
        self.norm / sqr(sqr(cos)) * (-sqr(tan) * self.exp_scale).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use base::deg;
    use proptest::prelude::*;

    #[test]
    fn slope_is_clamped() {
        assert_eq!(BeckmannLobe::new(0.0, deg!(0.0)).m, MIN_MICROFACET_SLOPE);
        let params = SurfaceParameters {
            ra: base::um!(0.8),
            slope_factor: 2.0,
            ..Default::default()
        };
        assert_relative_eq!(BeckmannLobe::from_params(&params).m, 0.32, max_relative = 1e-12);
    }

    #[test]
    fn grazing_and_below_horizon_are_dark() {
        let lobe = BeckmannLobe::new(0.5, deg!(0.0));
        for a in [-180.0, -120.0, -90.0, 90.0, 95.0, 180.0] {
            assert_eq!(lobe.eval(deg!(a)), 0.0, "angle {}", a);
        }
        assert!(lobe.eval(deg!(89.0)) > 0.0);
    }

    #[test]
    fn peak_value_at_specular_direction() {
        let lobe = BeckmannLobe::new(0.2, deg!(0.0));
        assert_relative_eq!(
            lobe.eval(deg!(0.0)),
            1.0 / (std::f64::consts::PI * 0.04),
            max_relative = 1e-12
        );
    }

    proptest! {
        #[test]
        fn symmetric_at_normal_incidence(a in 0.0f64..89.0, m in 0.005f64..1.0) {
            let lobe = BeckmannLobe::new(m, deg!(0.0));
            let lhs = lobe.eval(deg!(a));
            let rhs = lobe.eval(deg!(-a));
            prop_assert!((lhs - rhs).abs() <= 1e-9 * lhs.abs().max(1.0));
        }
    }
}
