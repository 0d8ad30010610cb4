//! Conversions between surface roughness measures.
use crate::units::Micrometres;

/// Ratio between the RMS roughness (Rq) and the arithmetic mean roughness
/// (Ra) of a surface with a Gaussian height distribution.
pub const RQ_OVER_RA: f64 = 1.25;

/// Estimates the RMS roughness Rq (σ) from the arithmetic mean roughness Ra.
#[inline]
pub fn rq_from_ra(ra: Micrometres) -> Micrometres { ra * RQ_OVER_RA }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rq_of_typical_roughness() {
        assert_eq!(rq_from_ra(crate::um!(0.8)), crate::um!(1.0));
        assert_eq!(rq_from_ra(crate::um!(0.0)), crate::um!(0.0));
    }
}
