//! Surface parameters fed to the scattering engine.
use crate::model::{phase_parameter, ModelKind, ScatteringModel};
use base::{
    error::RoughscatError,
    units::{Degrees, Micrometres},
};
use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

/// Practical range of the arithmetic mean roughness, in micrometres.
pub const RA_PRACTICAL_RANGE: (f64, f64) = (1.0e-6, 3.2);

/// Practical range of the wavelength, in micrometres.
pub const WAVELENGTH_PRACTICAL_RANGE: (f64, f64) = (0.01, 2.0);

/// Metal the surface is made of.
///
/// Only used to label exports and to provide a default reflectivity; the
/// models themselves are material agnostic. (De)serialised through its
/// display name, accepting every spelling [`FromStr`] accepts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Material {
    /// Polished aluminium.
    Aluminium,
    /// Polished silver.
    Silver,
    /// Polished gold.
    Gold,
    /// Polished copper.
    Copper,
    /// Stainless steel.
    Steel,
    /// Unspecified metal.
    #[default]
    Generic,
    /// Any other material, named by the user.
    Custom(String),
}

impl Material {
    /// Presets known to the crate.
    pub const PRESETS: [Material; 6] = [
        Material::Aluminium,
        Material::Silver,
        Material::Gold,
        Material::Copper,
        Material::Steel,
        Material::Generic,
    ];

    /// Nominal reflectivity at normal incidence in the visible range.
    pub fn nominal_reflectivity(&self) -> f64 {
        match self {
            Material::Aluminium => 0.92,
            Material::Silver => 0.96,
            Material::Gold => 0.80,
            Material::Copper => 0.62,
            Material::Steel => 0.58,
            Material::Generic | Material::Custom(_) => 0.9,
        }
    }
}

impl Display for Material {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Material::Aluminium => write!(f, "Aluminium"),
            Material::Silver => write!(f, "Silver"),
            Material::Gold => write!(f, "Gold"),
            Material::Copper => write!(f, "Copper"),
            Material::Steel => write!(f, "Steel"),
            Material::Generic => write!(f, "Generic"),
            Material::Custom(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for Material {
    type Err = String;

    /// Never fails on a non-empty name: unknown names become
    /// [`Material::Custom`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "" => Err(String::from("Material name must not be empty")),
            "aluminium" | "aluminum" | "al" => Ok(Material::Aluminium),
            "silver" | "ag" => Ok(Material::Silver),
            "gold" | "au" => Ok(Material::Gold),
            "copper" | "cu" => Ok(Material::Copper),
            "steel" => Ok(Material::Steel),
            "generic" | "metal" => Ok(Material::Generic),
            _ => Ok(Material::Custom(s.to_string())),
        }
    }
}

impl Serialize for Material {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Material {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct MaterialVisitor;

        impl<'de> serde::de::Visitor<'de> for MaterialVisitor {
            type Value = Material;

            fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
                write!(formatter, "a material name, e.g. \"gold\" or \"Aluminium\"")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse::<Material>().map_err(E::custom)
            }
        }

        deserializer.deserialize_str(MaterialVisitor)
    }
}

/// Description of the surface and of the illumination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParameters {
    /// Material of the surface.
    pub material: Material,
    /// Arithmetic mean roughness.
    pub ra: Micrometres,
    /// Wavelength of the incident light.
    pub wavelength: Micrometres,
    /// Incident angle, measured from the surface normal.
    pub incident_angle: Degrees,
    /// Requested scattering model.
    pub model: ScatteringModel,
    /// Reflectivity of the surface, i.e. the peak of the normalised
    /// distribution.
    pub reflectivity: f64,
    /// Multiplier on the width of the microfacet slope distribution.
    pub slope_factor: f64,
}

impl Default for SurfaceParameters {
    fn default() -> Self {
        Self {
            material: Material::Generic,
            ra: Micrometres::new(0.8),
            wavelength: Micrometres::new(0.5),
            incident_angle: Degrees::ZERO,
            model: ScatteringModel::Auto,
            reflectivity: 0.9,
            slope_factor: 1.0,
        }
    }
}

impl SurfaceParameters {
    /// Phase parameter of the surface under the current illumination.
    pub fn phase_parameter(&self) -> f64 {
        phase_parameter(self.ra, self.wavelength, self.incident_angle)
    }

    /// Model the engine evaluates for these parameters.
    pub fn resolved_model(&self) -> ModelKind { self.model.resolve(self.phase_parameter()) }

    /// Checks the parameters before handing them to the engine.
    ///
    /// Values the models cannot give a meaning to (non-positive roughness,
    /// wavelength or slope factor, reflectivity outside `[0, 1]`, non-finite
    /// numbers) are rejected. Values outside the practical range of the models
    /// are accepted with a warning.
    pub fn validate(&self) -> Result<(), RoughscatError> {
        let ra = self.ra.value();
        let wavelength = self.wavelength.value();
        let angle = self.incident_angle.value();
        if !ra.is_finite() || ra <= 0.0 {
            return Err(RoughscatError::invalid_parameter(format!(
                "Roughness Ra must be positive, got {} um",
                ra
            )));
        }
        if !wavelength.is_finite() || wavelength <= 0.0 {
            return Err(RoughscatError::invalid_parameter(format!(
                "Wavelength must be positive, got {} um",
                wavelength
            )));
        }
        if !angle.is_finite() {
            return Err(RoughscatError::invalid_parameter(format!(
                "Incident angle must be finite, got {}",
                angle
            )));
        }
        if !(0.0..=1.0).contains(&self.reflectivity) {
            return Err(RoughscatError::invalid_parameter(format!(
                "Reflectivity must lie in [0, 1], got {}",
                self.reflectivity
            )));
        }
        if !self.slope_factor.is_finite() || self.slope_factor <= 0.0 {
            return Err(RoughscatError::invalid_parameter(format!(
                "Slope factor must be positive, got {}",
                self.slope_factor
            )));
        }

        if ra < RA_PRACTICAL_RANGE.0 || ra > RA_PRACTICAL_RANGE.1 {
            log::warn!(
                "Roughness Ra = {} um is outside the practical range [{}, {}] um",
                ra,
                RA_PRACTICAL_RANGE.0,
                RA_PRACTICAL_RANGE.1
            );
        }
        if wavelength < WAVELENGTH_PRACTICAL_RANGE.0 || wavelength > WAVELENGTH_PRACTICAL_RANGE.1 {
            log::warn!(
                "Wavelength {} um is outside the practical range [{}, {}] um",
                wavelength,
                WAVELENGTH_PRACTICAL_RANGE.0,
                WAVELENGTH_PRACTICAL_RANGE.1
            );
        }
        if angle.abs() > 90.0 {
            log::warn!("Incident angle {} is below the surface plane", self.incident_angle);
        }
        Ok(())
    }
}
