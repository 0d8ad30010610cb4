use base::{math, roughness::rq_from_ra, units::Micrometres};
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

/// Number of samples of a profile when the caller doesn't specify it.
pub const DEFAULT_PROFILE_LENGTH: usize = 200;

/// Weight of the new noise sample in the first-order autoregressive
/// smoothing of the profile.
pub const PROFILE_DAMPING: f32 = 0.15;

/// Amplitude of the uniform noise relative to the RMS roughness: the noise
/// spans `[-2 Rq, 2 Rq)`.
const PROFILE_NOISE_SPAN: f32 = 4.0;

/// Correlated 1-D height profile.
///
/// Heights are in micrometres; the sample index is the horizontal position.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceProfile {
    /// Height values, ordered by index.
    pub samples: Vec<f32>,
}

impl SurfaceProfile {
    /// Generates a profile of `length` samples for a surface of roughness
    /// `ra`.
    ///
    /// Each sample is an exponential moving average of uniform noise,
    /// `h[i] = h[i - 1] (1 - α) + n α` with `α =` [`PROFILE_DAMPING`] and
    /// `h[-1] = 0`, which yields a correlated random walk rather than white
    /// noise.
    ///
    /// # Panics
    ///
    /// Panics if `length` is zero.
    pub fn generate<R: Rng + ?Sized>(ra: Micrometres, length: usize, rng: &mut R) -> Self {
        assert!(length > 0, "The profile must contain at least one sample");
        let rq = rq_from_ra(ra).value() as f32;
        let uniform = Uniform::new(0.0f32, 1.0);
        let mut prev = 0.0f32;
        let samples = (0..length)
            .map(|_| {
                let noise = (uniform.sample(&mut *rng) - 0.5) * PROFILE_NOISE_SPAN * rq;
                let value = prev * (1.0 - PROFILE_DAMPING) + noise * PROFILE_DAMPING;
                prev = value;
                value
            })
            .collect::<Vec<_>>();
        log::trace!("Generated profile of {} samples, Rq = {} um", length, rq);
        Self { samples }
    }

    /// Generates a profile using the thread-local random generator.
    ///
    /// The output differs between calls even with identical parameters.
    pub fn generate_unseeded(ra: Micrometres, length: usize) -> Self {
        Self::generate(ra, length, &mut rand::thread_rng())
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize { self.samples.len() }

    /// Returns whether the profile has no samples.
    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    /// Returns the `(index, height)` pairs of the profile.
    pub fn points(&self) -> impl ExactSizeIterator<Item = (usize, f32)> + '_ {
        self.samples.iter().copied().enumerate()
    }

    /// Returns the minimum and maximum height.
    pub fn min_max(&self) -> Option<(f32, f32)> { math::min_max(&self.samples) }

    /// Returns the mean height.
    pub fn mean_height(&self) -> f32 { math::mean(&self.samples) }

    /// Returns the root-mean-square height around the mean.
    pub fn rms_height(&self) -> f32 { math::rms(&self.samples) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::um;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn profile_has_requested_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let profile = SurfaceProfile::generate(um!(0.8), DEFAULT_PROFILE_LENGTH, &mut rng);
        assert_eq!(profile.len(), 200);
        let indices = profile.points().map(|(i, _)| i).collect::<Vec<_>>();
        assert_eq!(indices, (0..200).collect::<Vec<_>>());
    }

    #[test]
    fn profile_is_bounded_by_noise_amplitude() {
        // |h| never exceeds the noise bound since the update is a convex
        // combination of the previous value and the noise.
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let ra = um!(1.6);
        let bound = (rq_from_ra(ra).value() * 2.0) as f32;
        let profile = SurfaceProfile::generate(ra, 5000, &mut rng);
        assert!(profile.samples.iter().all(|h| h.abs() <= bound * (1.0 + 1e-6)));
    }

    #[test]
    fn profile_follows_recurrence() {
        let ra = um!(0.4);
        let rq = rq_from_ra(ra).value() as f32;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let profile = SurfaceProfile::generate(ra, 16, &mut rng);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let uniform = Uniform::new(0.0f32, 1.0);
        let mut prev = 0.0f32;
        for h in &profile.samples {
            let noise = (uniform.sample(&mut rng) - 0.5) * 4.0 * rq;
            let expected = prev * (1.0 - PROFILE_DAMPING) + noise * PROFILE_DAMPING;
            approx::assert_relative_eq!(*h, expected, epsilon = 1e-6);
            prev = expected;
        }
    }

    #[test]
    fn seeded_profiles_are_reproducible() {
        let a = SurfaceProfile::generate(um!(0.8), 64, &mut ChaCha8Rng::seed_from_u64(11));
        let b = SurfaceProfile::generate(um!(0.8), 64, &mut ChaCha8Rng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn adjacent_samples_are_correlated() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let profile = SurfaceProfile::generate(um!(1.0), 4096, &mut rng);
        let rms = profile.rms_height();
        let step_rms = {
            let diffs = profile
                .samples
                .windows(2)
                .map(|w| w[1] - w[0])
                .collect::<Vec<_>>();
            math::rms(&diffs)
        };
        // White noise would give steps of about sqrt(2) times the rms height.
        assert!(step_rms < rms);
    }

    #[test]
    #[should_panic]
    fn empty_profile_is_rejected() { let _ = SurfaceProfile::generate_unseeded(um!(0.8), 0); }

    #[test]
    fn zero_roughness_gives_flat_profile() {
        let profile = SurfaceProfile::generate_unseeded(um!(0.0), 10);
        assert_eq!(profile.min_max(), Some((0.0, 0.0)));
        assert_eq!(profile.mean_height(), 0.0);
    }
}
