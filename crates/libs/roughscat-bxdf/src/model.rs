//! Scattering model selection.
use base::{
    math::sqr,
    roughness::rq_from_ra,
    units::{Degrees, Micrometres},
};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// Lower bound of the wavelength used when computing the phase parameter.
pub const MIN_WAVELENGTH: Micrometres = Micrometres::new(1.0e-4);

/// Phase parameter below which a surface is considered smooth.
pub const SMOOTH_REGIME_THRESHOLD: f64 = 0.01;

/// Phase parameter above which a surface is considered rough.
pub const ROUGH_REGIME_THRESHOLD: f64 = 15.0;

/// Scattering model requested by the user.
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScatteringModel {
    /// Let the phase parameter pick the model.
    #[default]
    Auto,
    /// Beckmann microfacet model, for rough surfaces.
    Beckmann,
    /// Rayleigh-Rice perturbation model, for smooth surfaces.
    #[cfg_attr(feature = "cli", value(alias = "rr"))]
    RayleighRice,
    /// Harvey-Shack model, for the intermediate regime.
    #[cfg_attr(feature = "cli", value(alias = "hs"))]
    HarveyShack,
}

/// Model actually used to evaluate the scattering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Beckmann microfacet model.
    Beckmann,
    /// Rayleigh-Rice perturbation model.
    RayleighRice,
    /// Harvey-Shack model.
    HarveyShack,
}

/// Scattering regime of a surface, derived from its phase parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScatteringRegime {
    /// `g < 0.01`: the specular lobe dominates.
    Smooth,
    /// `0.01 <= g <= 15`.
    Intermediate,
    /// `g > 15`: the scattering is mostly diffuse.
    Rough,
}

/// Computes the phase parameter (the Rayleigh smooth-surface criterion)
///
/// $$g = \left(\frac{4\pi\sigma\cos\theta_i}{\lambda}\right)^2$$
///
/// where σ is the RMS roughness estimated from `ra`. The wavelength is clamped
/// to [`MIN_WAVELENGTH`] to keep the result finite.
pub fn phase_parameter(ra: Micrometres, wavelength: Micrometres, incident: Degrees) -> f64 {
    let sigma = rq_from_ra(ra).value();
    let wavelength = wavelength.max(MIN_WAVELENGTH).value();
    sqr(4.0 * std::f64::consts::PI * sigma * incident.cos() / wavelength)
}

impl ScatteringRegime {
    /// Classifies the regime from the phase parameter.
    pub fn classify(g: f64) -> Self {
        if g < SMOOTH_REGIME_THRESHOLD {
            Self::Smooth
        } else if g > ROUGH_REGIME_THRESHOLD {
            Self::Rough
        } else {
            Self::Intermediate
        }
    }

    /// Returns the model suited to the regime.
    pub fn model(&self) -> ModelKind {
        match self {
            Self::Smooth => ModelKind::RayleighRice,
            Self::Intermediate => ModelKind::HarveyShack,
            Self::Rough => ModelKind::Beckmann,
        }
    }
}

impl Display for ScatteringRegime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Smooth => write!(f, "smooth"),
            Self::Intermediate => write!(f, "intermediate"),
            Self::Rough => write!(f, "rough"),
        }
    }
}

impl ScatteringModel {
    /// Returns the model to evaluate given the phase parameter `g`.
    ///
    /// An explicitly requested model is returned as is; `Auto` picks the
    /// model of the regime `g` falls in.
    pub fn resolve(&self, g: f64) -> ModelKind {
        match self {
            Self::Auto => ScatteringRegime::classify(g).model(),
            Self::Beckmann => ModelKind::Beckmann,
            Self::RayleighRice => ModelKind::RayleighRice,
            Self::HarveyShack => ModelKind::HarveyShack,
        }
    }

    /// Whether the model is chosen from the phase parameter.
    pub fn is_auto(&self) -> bool { matches!(self, Self::Auto) }
}

impl From<ModelKind> for ScatteringModel {
    fn from(kind: ModelKind) -> Self {
        match kind {
            ModelKind::Beckmann => Self::Beckmann,
            ModelKind::RayleighRice => Self::RayleighRice,
            ModelKind::HarveyShack => Self::HarveyShack,
        }
    }
}

impl Display for ModelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beckmann => write!(f, "Beckmann"),
            Self::RayleighRice => write!(f, "Rayleigh-Rice"),
            Self::HarveyShack => write!(f, "Harvey-Shack"),
        }
    }
}

impl Display for ScatteringModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Beckmann => ModelKind::Beckmann.fmt(f),
            Self::RayleighRice => ModelKind::RayleighRice.fmt(f),
            Self::HarveyShack => ModelKind::HarveyShack.fmt(f),
        }
    }
}

impl FromStr for ScatteringModel {
    type Err = String;

    /// Accepts the display names as well as their lower case, kebab case or
    /// abbreviated forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "beckmann" => Ok(Self::Beckmann),
            "rayleigh-rice" | "rayleighrice" | "rayleigh_rice" | "rr" => Ok(Self::RayleighRice),
            "harvey-shack" | "harveyshack" | "harvey_shack" | "hs" => Ok(Self::HarveyShack),
            _ => Err(format!("Unknown scattering model: {}", s)),
        }
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<ScatteringModel>()? {
            ScatteringModel::Auto => Err(String::from("Auto is not a concrete scattering model")),
            ScatteringModel::Beckmann => Ok(Self::Beckmann),
            ScatteringModel::RayleighRice => Ok(Self::RayleighRice),
            ScatteringModel::HarveyShack => Ok(Self::HarveyShack),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::{deg, um};

    #[test]
    fn smooth_surface_selects_rayleigh_rice() {
        let g = phase_parameter(um!(0.0000005), um!(0.5), deg!(0.0));
        assert!(g < SMOOTH_REGIME_THRESHOLD, "g = {}", g);
        assert_eq!(ScatteringModel::Auto.resolve(g), ModelKind::RayleighRice);
    }

    #[test]
    fn rough_surface_selects_beckmann() {
        let g = phase_parameter(um!(3.2), um!(0.5), deg!(0.0));
        assert!(g > ROUGH_REGIME_THRESHOLD, "g = {}", g);
        assert_eq!(ScatteringModel::Auto.resolve(g), ModelKind::Beckmann);
    }

    #[test]
    fn intermediate_surface_selects_harvey_shack() {
        // σ = 0.0125 um, λ = 0.5 um: g = (0.1π)² ≈ 0.0987.
        let g = phase_parameter(um!(0.01), um!(0.5), deg!(0.0));
        approx::assert_relative_eq!(g, sqr(0.1 * std::f64::consts::PI), max_relative = 1e-12);
        assert_eq!(ScatteringRegime::classify(g), ScatteringRegime::Intermediate);
        assert_eq!(ScatteringModel::Auto.resolve(g), ModelKind::HarveyShack);
    }

    #[test]
    fn regime_boundaries_are_exclusive() {
        assert_eq!(ScatteringRegime::classify(0.01), ScatteringRegime::Intermediate);
        assert_eq!(ScatteringRegime::classify(15.0), ScatteringRegime::Intermediate);
        assert_eq!(ScatteringRegime::classify(15.000001), ScatteringRegime::Rough);
    }

    #[test]
    fn explicit_model_bypasses_classification() {
        for g in [0.0, 1.0, 1.0e6] {
            assert_eq!(ScatteringModel::Beckmann.resolve(g), ModelKind::Beckmann);
            assert_eq!(ScatteringModel::RayleighRice.resolve(g), ModelKind::RayleighRice);
            assert_eq!(ScatteringModel::HarveyShack.resolve(g), ModelKind::HarveyShack);
        }
    }

    #[test]
    fn zero_wavelength_is_guarded() {
        let g = phase_parameter(um!(0.8), um!(0.0), deg!(0.0));
        assert!(g.is_finite());
        assert_eq!(g, phase_parameter(um!(0.8), MIN_WAVELENGTH, deg!(0.0)));
    }

    #[test]
    fn grazing_incidence_is_smooth() {
        let g = phase_parameter(um!(3.2), um!(0.5), deg!(90.0));
        assert!(g < SMOOTH_REGIME_THRESHOLD);
    }

    #[test]
    fn model_names_round_trip() {
        for kind in [ModelKind::Beckmann, ModelKind::RayleighRice, ModelKind::HarveyShack] {
            assert_eq!(kind.to_string().parse::<ModelKind>(), Ok(kind));
            assert_eq!(
                kind.to_string().parse::<ScatteringModel>(),
                Ok(ScatteringModel::from(kind))
            );
        }
        assert_eq!("auto".parse::<ScatteringModel>(), Ok(ScatteringModel::Auto));
        assert!("Auto".parse::<ModelKind>().is_err());
        assert!("phong".parse::<ScatteringModel>().is_err());
    }
}
