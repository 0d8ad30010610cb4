//! Scattering of light by rough metallic surfaces.
//!
//! The crate evaluates a 1-D slice of the BRDF in the plane of incidence
//! with one of three closed-form models (Rayleigh-Rice, Beckmann,
//! Harvey-Shack), normalises the result so that its peak equals the
//! reflectivity of the surface, and summarises how concentrated the
//! scattered energy is.
#![warn(missing_docs)]

pub mod energy;
pub mod engine;
#[cfg(feature = "io")]
pub mod io;
pub mod model;
pub mod models;
pub mod params;

pub use energy::EnergyConcentration;
pub use engine::{simulate, AngularDomain, ScatteringDistribution, ScatteringSample};
pub use model::{ModelKind, ScatteringModel, ScatteringRegime};
pub use params::{Material, SurfaceParameters};
