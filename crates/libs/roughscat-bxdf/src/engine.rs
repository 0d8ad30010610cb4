//! Angular sweep of the scattering models.
use crate::{
    energy::EnergyConcentration,
    model::ModelKind,
    models::{AngularLobe, BeckmannLobe, HarveyShackLobe, RayleighRiceLobe},
    params::SurfaceParameters,
};
use base::{range::StepRangeIncl, units::Degrees};
use serde::{Deserialize, Serialize};

/// Observation angles of a simulation, in the plane of incidence.
pub type AngularDomain = StepRangeIncl<Degrees>;

/// Angles from one horizon to the other at a 1° step.
pub const DEFAULT_ANGULAR_DOMAIN: AngularDomain =
    StepRangeIncl::new(Degrees::new(-90.0), Degrees::new(90.0), Degrees::new(1.0));

/// Returns the domain `[-90°, 90°]` sampled every `step`.
pub fn angular_domain(step: Degrees) -> AngularDomain {
    AngularDomain {
        step_size: step,
        ..DEFAULT_ANGULAR_DOMAIN
    }
}

/// Normalised intensity scattered towards one observation angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatteringSample {
    /// Observation angle.
    pub angle: Degrees,
    /// Scattered intensity, non-negative.
    pub intensity: f64,
}

/// Output of [`simulate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringDistribution {
    /// Model that produced the distribution.
    pub model: ModelKind,
    /// Phase parameter of the surface.
    pub phase: f64,
    /// Angles the distribution has been evaluated at.
    pub domain: AngularDomain,
    /// Samples in ascending angle order.
    pub samples: Vec<ScatteringSample>,
}

impl ScatteringDistribution {
    /// Returns the number of samples.
    pub fn len(&self) -> usize { self.samples.len() }

    /// Returns whether the distribution has no samples.
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// Returns the angular step between two consecutive samples.
    pub fn step(&self) -> Degrees { self.domain.step_size }

    /// Returns the observation angles.
    pub fn angles(&self) -> impl ExactSizeIterator<Item = Degrees> + '_ {
        self.samples.iter().map(|s| s.angle)
    }

    /// Returns the intensities in the order of the angles.
    pub fn intensities(&self) -> Vec<f64> { self.samples.iter().map(|s| s.intensity).collect() }

    /// Returns the sample of highest intensity, the first one in case of a
    /// tie.
    pub fn peak(&self) -> Option<ScatteringSample> {
        self.samples
            .iter()
            .copied()
            .reduce(|best, s| if s.intensity > best.intensity { s } else { best })
    }

    /// Computes the energy concentration widths of the distribution.
    pub fn energy_concentration(&self) -> EnergyConcentration {
        EnergyConcentration::from_distribution(self)
    }
}

/// Evaluates the scattered intensity over `domain`.
///
/// The model is resolved once from the phase parameter of `params`, then
/// evaluated at every angle. Raw intensities that are negative or not finite
/// are replaced by zero, then all intensities are scaled so that the highest
/// one equals the reflectivity. A distribution whose raw intensities are all
/// zero stays zero.
///
/// Parameters are not validated; degenerate values saturate instead.
///
/// # Panics
///
/// Panics if the step of the domain is not positive or if the domain is
/// reversed.
pub fn simulate(params: &SurfaceParameters, domain: &AngularDomain) -> ScatteringDistribution {
    let g = params.phase_parameter();
    let model = params.model.resolve(g);
    log::debug!(
        "Simulating {} (requested {}), g = {}, domain {}",
        model,
        params.model,
        g,
        domain
    );
    let mut samples = match model {
        ModelKind::RayleighRice => sweep(
            &RayleighRiceLobe::from_params(params, g, domain.step_size),
            domain,
        ),
        ModelKind::Beckmann => sweep(&BeckmannLobe::from_params(params), domain),
        ModelKind::HarveyShack => sweep(&HarveyShackLobe::from_params(params, g), domain),
    };
    normalise(&mut samples, params.reflectivity);
    log::trace!("Evaluated {} samples", samples.len());
    ScatteringDistribution {
        model,
        phase: g,
        domain: *domain,
        samples,
    }
}

fn sweep<L: AngularLobe>(lobe: &L, domain: &AngularDomain) -> Vec<ScatteringSample> {
    domain
        .values()
        .map(|angle| {
            let raw = lobe.eval(angle);
            let intensity = if raw.is_finite() { raw.max(0.0) } else { 0.0 };
            ScatteringSample { angle, intensity }
        })
        .collect()
}

/// Scales the intensities so that the maximum equals `reflectivity`.
fn normalise(samples: &mut [ScatteringSample], reflectivity: f64) {
    let max = samples.iter().fold(0.0f64, |max, s| max.max(s.intensity));
    let max = if max == 0.0 { 1.0 } else { max };
    for sample in samples.iter_mut() {
        sample.intensity = sample.intensity / max * reflectivity;
    }
}
