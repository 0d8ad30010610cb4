use crate::{model::ModelKind, models::AngularLobe, params::SurfaceParameters};
use base::{math::sqr, units::Degrees};

/// Relative weight of the diffuse term.
pub const RAYLEIGH_RICE_DIFFUSE_WEIGHT: f64 = 0.05;

/// Rayleigh-Rice perturbation lobe, used in the smooth regime.
///
/// A narrow Gaussian specular peak weighted by `exp(-g)` on top of a weak
/// `cos⁴` diffuse halo weighted by `1 - exp(-g)`.
#[derive(Debug, Clone, Copy)]
pub struct RayleighRiceLobe {
    /// Incident angle, centre of the specular peak.
    pub incident: Degrees,
    /// Width of the specular peak, in degrees.
    pub peak_width: f64,
    /// `exp(-g)`.
    specular: f64,
    /// `1 - exp(-g)`.
    diffuse: f64,
}

impl RayleighRiceLobe {
    /// Creates the lobe from the phase parameter `g`, the width of the
    /// specular peak and the incident angle.
    pub fn new(g: f64, peak_width: f64, incident: Degrees) -> Self {
        let specular = (-g).exp();
        Self {
            incident,
            peak_width,
            specular,
            diffuse: 1.0 - specular,
        }
    }

    /// Width of the specular peak for the given surface and sweep step.
    ///
    /// Never narrower than two sweep steps so that the peak is resolved.
    pub fn peak_width(params: &SurfaceParameters, step: Degrees) -> f64 {
        let ra_nm = params.ra.in_nanometres().value();
        (2.0 * step.value()).max(0.2 * params.wavelength.value() / ra_nm.max(1.0e-5))
    }

    /// Creates the lobe for the given surface.
    pub fn from_params(params: &SurfaceParameters, g: f64, step: Degrees) -> Self {
        Self::new(g, Self::peak_width(params, step), params.incident_angle)
    }
}

impl AngularLobe for RayleighRiceLobe {
    fn kind(&self) -> ModelKind { ModelKind::RayleighRice }

    fn eval(&self, angle: Degrees) -> f64 {
        let diff = (angle - self.incident).value().abs();
        let specular = self.specular * (-sqr(diff / self.peak_width)).exp();
        let diffuse = self.diffuse * sqr(sqr(angle.cos()));
        specular + RAYLEIGH_RICE_DIFFUSE_WEIGHT * diffuse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use base::{deg, um};

    #[test]
    fn peak_width_is_at_least_two_steps() {
        let params = SurfaceParameters {
            ra: um!(0.5),
            wavelength: um!(0.5),
            ..Default::default()
        };
        // 0.2 * 0.5 / 500 = 2e-4 degree, far below two steps.
        assert_eq!(RayleighRiceLobe::peak_width(&params, deg!(0.5)), 1.0);
    }

    #[test]
    fn peak_width_of_ultra_smooth_surface() {
        let params = SurfaceParameters {
            ra: um!(0.0000005),
            wavelength: um!(0.5),
            ..Default::default()
        };
        assert_relative_eq!(
            RayleighRiceLobe::peak_width(&params, deg!(0.1)),
            0.2 * 0.5 / 0.0005,
            max_relative = 1e-12
        );
        let params = SurfaceParameters { ra: um!(0.0), ..params };
        assert_relative_eq!(RayleighRiceLobe::peak_width(&params, deg!(0.1)), 0.1 / 1.0e-5);
    }

    #[test]
    fn smooth_surface_is_mostly_specular() {
        let lobe = RayleighRiceLobe::new(0.0, 2.0, deg!(30.0));
        assert_eq!(lobe.eval(deg!(30.0)), 1.0);
        assert_eq!(lobe.eval(deg!(-90.0)), 0.0);
        assert!(lobe.eval(deg!(29.0)) > lobe.eval(deg!(25.0)));
    }

    #[test]
    fn rough_surface_keeps_only_the_diffuse_halo() {
        let lobe = RayleighRiceLobe::new(f64::INFINITY, 2.0, deg!(0.0));
        assert_relative_eq!(lobe.eval(deg!(0.0)), RAYLEIGH_RICE_DIFFUSE_WEIGHT);
        assert_relative_eq!(
            lobe.eval(deg!(60.0)),
            RAYLEIGH_RICE_DIFFUSE_WEIGHT * 0.0625,
            max_relative = 1e-12
        );
    }
}
