//! Energy concentration of a scattering distribution.
use crate::engine::ScatteringDistribution;
use base::units::Degrees;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Fractions of the total energy the widths are computed for.
pub const ENERGY_FRACTIONS: [f64; 3] = [0.50, 0.90, 0.99];

/// Angular widths enclosing 50 %, 90 % and 99 % of the scattered energy.
///
/// A width is the number of samples, taken from the brightest down, needed to
/// reach the fraction of the total intensity, times the angular step. The
/// samples do not need to be adjacent, so the width is not an angular
/// interval.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergyConcentration {
    /// Width enclosing 50 % of the energy.
    pub e50: Degrees,
    /// Width enclosing 90 % of the energy.
    pub e90: Degrees,
    /// Width enclosing 99 % of the energy.
    pub e99: Degrees,
}

impl EnergyConcentration {
    /// Computes the widths from intensities sampled every `step`.
    ///
    /// Every width is zero if the total intensity is zero.
    pub fn from_intensities(intensities: &[f64], step: Degrees) -> Self {
        let total: f64 = intensities.iter().sum();
        if total <= 0.0 || !total.is_finite() {
            return Self::default();
        }

        let mut sorted = intensities.to_vec();
        sorted.sort_unstable_by(|a, b| b.total_cmp(a));

        let mut counts = [0usize; 3];
        let mut reached = 0;
        let mut running = 0.0;
        for (i, intensity) in sorted.iter().enumerate() {
            running += intensity;
            let fraction = running / total;
            while reached < ENERGY_FRACTIONS.len() && fraction >= ENERGY_FRACTIONS[reached] {
                counts[reached] = i + 1;
                reached += 1;
            }
            if reached == ENERGY_FRACTIONS.len() {
                break;
            }
        }
        // The running sum may stop short of the total through rounding.
        for count in counts.iter_mut().skip(reached) {
            *count = sorted.len();
        }

        let width = |count: usize| step * count as f64;
        Self {
            e50: width(counts[0]),
            e90: width(counts[1]),
            e99: width(counts[2]),
        }
    }

    /// Computes the widths of a distribution, using the step of its domain.
    pub fn from_distribution(dist: &ScatteringDistribution) -> Self {
        Self::from_intensities(&dist.intensities(), dist.step())
    }
}

impl Display for EnergyConcentration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "E50: {}, E90: {}, E99: {}",
            self.e50.prettified(),
            self.e90.prettified(),
            self.e99.prettified()
        )
    }
}
