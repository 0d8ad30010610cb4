use crate::{model::ModelKind, models::AngularLobe, params::SurfaceParameters};
use base::{math::sqr, units::Degrees};

/// Relative weight of the diffuse term.
pub const HARVEY_SHACK_DIFFUSE_WEIGHT: f64 = 0.3;

/// Width of the specular peak, in degrees, for a slope factor of 1.
pub const HARVEY_SHACK_PEAK_WIDTH: f64 = 1.5;

/// Harvey-Shack lobe, used in the intermediate regime.
///
/// Same structure as the Rayleigh-Rice lobe but with a peak width driven by
/// the slope factor and a stronger `cos^1.5` diffuse term.
#[derive(Debug, Clone, Copy)]
pub struct HarveyShackLobe {
    /// Incident angle, centre of the specular peak.
    pub incident: Degrees,
    /// Width of the specular peak, in degrees.
    pub peak_width: f64,
    /// `exp(-g)`.
    specular: f64,
    /// `1 - exp(-g)`.
    diffuse: f64,
}

impl HarveyShackLobe {
    /// Creates the lobe from the phase parameter `g`, the slope factor and the
    /// incident angle.
    pub fn new(g: f64, slope_factor: f64, incident: Degrees) -> Self {
        let specular = (-g).exp();
        Self {
            incident,
            peak_width: HARVEY_SHACK_PEAK_WIDTH * slope_factor,
            specular,
            diffuse: 1.0 - specular,
        }
    }

    /// Creates the lobe for the given surface.
    pub fn from_params(params: &SurfaceParameters, g: f64) -> Self {
        Self::new(g, params.slope_factor, params.incident_angle)
    }
}

impl AngularLobe for HarveyShackLobe {
    fn kind(&self) -> ModelKind { ModelKind::HarveyShack }

    fn eval(&self, angle: Degrees) -> f64 {
        let diff = (angle - self.incident).value().abs();
        let specular = self.specular * (-sqr(diff / self.peak_width)).exp();
        let diffuse = self.diffuse * angle.cos().powf(1.5);
        specular + HARVEY_SHACK_DIFFUSE_WEIGHT * diffuse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use base::deg;

    #[test]
    fn specular_peak_at_incident_angle() {
        let lobe = HarveyShackLobe::new(0.5, 1.0, deg!(20.0));
        let at_peak = lobe.eval(deg!(20.0));
        let expected = (-0.5f64).exp()
            + HARVEY_SHACK_DIFFUSE_WEIGHT * (1.0 - (-0.5f64).exp()) * deg!(20.0).cos().powf(1.5);
        assert_relative_eq!(at_peak, expected, max_relative = 1e-12);
        assert!(at_peak > lobe.eval(deg!(22.0)));
    }

    #[test]
    fn slope_factor_widens_the_peak() {
        let narrow = HarveyShackLobe::new(0.0, 1.0, deg!(0.0));
        let wide = HarveyShackLobe::new(0.0, 3.0, deg!(0.0));
        assert_relative_eq!(wide.peak_width, 4.5);
        assert!(wide.eval(deg!(3.0)) > narrow.eval(deg!(3.0)));
    }

    #[test]
    fn below_horizon_is_not_finite() {
        let lobe = HarveyShackLobe::new(1.0, 1.0, deg!(0.0));
        assert!(lobe.eval(deg!(120.0)).is_nan());
    }
}
