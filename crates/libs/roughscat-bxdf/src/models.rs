//! Closed-form angular scattering lobes.
//!
//! Each model is built once per simulation from the surface parameters and
//! the phase parameter, precomputing every term that does not depend on the
//! observation angle, then evaluated at every angle of the sweep.
mod beckmann;
mod harvey_shack;
mod rayleigh_rice;

pub use beckmann::*;
pub use harvey_shack::*;
pub use rayleigh_rice::*;

use crate::model::ModelKind;
use base::units::Degrees;

/// Raw (non-normalised) scattered intensity as a function of the
/// observation angle in the plane of incidence.
pub trait AngularLobe {
    /// Returns the kind of the model.
    fn kind(&self) -> ModelKind;

    /// Evaluates the raw intensity scattered towards `angle`.
    ///
    /// The result is not clamped: it may be negative or NaN outside
    /// `[-90°, 90°]` for some models.
    fn eval(&self, angle: Degrees) -> f64;
}
