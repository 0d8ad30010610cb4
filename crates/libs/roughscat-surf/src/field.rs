use base::{math, roughness::rq_from_ra, units::Micrometres};
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

/// Side length of a generated height field when the caller doesn't specify
/// it.
pub const DEFAULT_FIELD_SIZE: usize = 64;

/// Amplitude of the white noise relative to the RMS roughness: the noise
/// spans `[-Rq, Rq)`.
const FIELD_NOISE_SPAN: f32 = 2.0;

/// Regular grid of heights in micrometres.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    /// Number of sample points in vertical direction.
    pub rows: usize,

    /// Number of sample points in horizontal direction.
    pub cols: usize,

    /// Minimum height of the height field.
    pub min: f32,

    /// Maximum height of the height field.
    pub max: f32,

    /// Height values of sample points (stored in row major order).
    pub samples: Vec<f32>,
}

impl HeightField {
    /// Creates a height field and sets its height values by using a function.
    ///
    /// # Arguments
    ///
    /// * `rows` - the number of sample points in vertical dimension
    /// * `cols` - the number of sample points in horizontal dimension
    /// * `setter` - the setting function, this function will be invoked with
    ///   the row number and column number as parameters, in row major order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use roughscat_surf::HeightField;
    /// let field = HeightField::new_by(4, 4, |row, col| (row + col) as f32);
    /// assert_eq!(field.samples_count(), 16);
    /// assert_eq!(field.max, 6.0);
    /// assert_eq!(field.min, 0.0);
    /// assert_eq!(field.sample_at(2, 3), 5.0);
    /// ```
    pub fn new_by<F>(rows: usize, cols: usize, mut setter: F) -> HeightField
    where
        F: FnMut(usize, usize) -> f32,
    {
        assert!(rows > 0 && cols > 0, "A height field needs at least one sample");
        let mut samples = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                samples.push(setter(r, c));
            }
        }
        Self::from_samples(rows, cols, samples)
    }

    /// Creates a height field from row major height values.
    ///
    /// # Panics
    ///
    /// Panics if the grid is empty or if the number of samples is not
    /// `rows * cols`.
    pub fn from_samples(rows: usize, cols: usize, samples: Vec<f32>) -> HeightField {
        assert!(
            rows > 0 && cols > 0 && samples.len() == rows * cols,
            "Samples count must be equal to rows * cols"
        );
        let (min, max) = math::min_max(&samples).unwrap_or((0.0, 0.0));
        HeightField {
            rows,
            cols,
            min,
            max,
            samples,
        }
    }

    /// Fills a `size` x `size` grid with independent uniform noise in
    /// `[-Rq, Rq)`, where Rq is estimated from `ra`.
    pub fn from_white_noise<R: Rng + ?Sized>(ra: Micrometres, size: usize, rng: &mut R) -> Self {
        let rq = rq_from_ra(ra).value() as f32;
        let uniform = Uniform::new(0.0f32, 1.0);
        Self::new_by(size, size, |_, _| {
            (uniform.sample(&mut *rng) - 0.5) * FIELD_NOISE_SPAN * rq
        })
    }

    /// Generates a smoothed random height field for a surface of roughness
    /// `ra`: white noise followed by one pass of [`HeightField::box_blurred`].
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn generate<R: Rng + ?Sized>(ra: Micrometres, size: usize, rng: &mut R) -> Self {
        let field = Self::from_white_noise(ra, size, rng).box_blurred();
        log::trace!(
            "Generated {}x{} height field, heights in [{}, {}]",
            size,
            size,
            field.min,
            field.max
        );
        field
    }

    /// Generates a height field using the thread-local random generator.
    ///
    /// The output differs between calls even with identical parameters.
    pub fn generate_unseeded(ra: Micrometres, size: usize) -> Self {
        Self::generate(ra, size, &mut rand::thread_rng())
    }

    /// Returns the result of one pass of a 3x3 box blur.
    ///
    /// Every output sample is the mean of the input sample and its existing
    /// neighbours. The kernel is truncated at the borders, so corners average
    /// 4 samples, edges 6 and interior samples 9.
    pub fn box_blurred(&self) -> Self {
        let rows = self.rows;
        let cols = self.cols;
        Self::new_by(rows, cols, |r, c| {
            let r0 = r.saturating_sub(1);
            let r1 = (r + 1).min(rows - 1);
            let c0 = c.saturating_sub(1);
            let c1 = (c + 1).min(cols - 1);
            let mut sum = 0.0f32;
            let mut count = 0u32;
            for nr in r0..=r1 {
                for nc in c0..=c1 {
                    sum += self.samples[nr * cols + nc];
                    count += 1;
                }
            }
            sum / count as f32
        })
    }

    /// Returns the number of samples.
    pub fn samples_count(&self) -> usize { self.rows * self.cols }

    /// Returns the height at the given row and column.
    #[inline]
    pub fn sample_at(&self, row: usize, col: usize) -> f32 {
        debug_assert!(row < self.rows && col < self.cols, "Sample index out of bounds");
        self.samples[row * self.cols + col]
    }

    /// Returns an iterator over the rows of the height field.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[f32]> { self.samples.chunks(self.cols) }

    /// Returns the mean height.
    pub fn mean_height(&self) -> f32 { math::mean(&self.samples) }

    /// Computes the root-mean-square height of the height field.
    pub fn rms_height(&self) -> f32 { math::rms(&self.samples) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base::um;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn mean_of(field: &HeightField, cells: &[(usize, usize)]) -> f32 {
        cells.iter().map(|&(r, c)| field.sample_at(r, c)).sum::<f32>() / cells.len() as f32
    }

    #[test]
    fn corner_cells_average_four_samples() {
        let raw = HeightField::new_by(5, 5, |r, c| (r * 5 + c) as f32);
        let blurred = raw.box_blurred();
        assert_eq!(blurred.sample_at(0, 0), mean_of(&raw, &[(0, 0), (0, 1), (1, 0), (1, 1)]));
        assert_eq!(blurred.sample_at(4, 4), mean_of(&raw, &[(3, 3), (3, 4), (4, 3), (4, 4)]));
        assert_eq!(blurred.sample_at(0, 4), mean_of(&raw, &[(0, 3), (0, 4), (1, 3), (1, 4)]));
    }

    #[test]
    fn edge_cells_average_six_samples() {
        let raw = HeightField::new_by(4, 4, |r, c| ((r + 1) * (c + 3)) as f32);
        let blurred = raw.box_blurred();
        let expected = mean_of(&raw, &[(0, 1), (0, 2), (0, 3), (1, 1), (1, 2), (1, 3)]);
        approx::assert_relative_eq!(blurred.sample_at(0, 2), expected);
    }

    #[test]
    fn interior_cells_average_nine_samples() {
        let raw = HeightField::new_by(3, 3, |r, c| if r == 1 && c == 1 { 9.0 } else { 0.0 });
        let blurred = raw.box_blurred();
        assert_eq!(blurred.sample_at(1, 1), 1.0);
        // The corner sees the spike through 4 cells, the edge through 6.
        assert_eq!(blurred.sample_at(0, 0), 9.0 / 4.0);
        assert_eq!(blurred.sample_at(0, 1), 9.0 / 6.0);
    }

    #[test]
    fn blur_does_not_wrap_around() {
        let raw = HeightField::new_by(4, 4, |_, c| if c == 3 { 12.0 } else { 0.0 });
        let blurred = raw.box_blurred();
        assert_eq!(blurred.sample_at(1, 0), 0.0);
        assert_eq!(blurred.sample_at(1, 3), 6.0);
    }

    #[test]
    fn single_sample_field() {
        let raw = HeightField::new_by(1, 1, |_, _| 3.5);
        assert_eq!(raw.box_blurred().samples, vec![3.5]);
    }

    #[test]
    fn generated_field_dimensions_and_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let ra = um!(0.8);
        let field = HeightField::generate(ra, DEFAULT_FIELD_SIZE, &mut rng);
        assert_eq!((field.rows, field.cols), (64, 64));
        assert_eq!(field.rows_iter().count(), 64);
        let rq = rq_from_ra(ra).value() as f32;
        assert!(field.min >= -rq && field.max <= rq);
        // Averaging reduces the spread of the noise.
        let noise = HeightField::from_white_noise(ra, 64, &mut ChaCha8Rng::seed_from_u64(1));
        assert!(field.rms_height() < noise.rms_height());
    }

    #[test]
    #[should_panic]
    fn empty_field_is_rejected() { let _ = HeightField::generate_unseeded(um!(0.8), 0); }

    #[test]
    #[should_panic(expected = "Samples count must be equal to rows * cols")]
    fn mismatched_samples_are_rejected() {
        let _ = HeightField::from_samples(3, 3, vec![0.0; 8]);
    }

    #[test]
    fn samples_are_row_major() {
        let field = HeightField::from_samples(2, 3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(field.sample_at(1, 0), 3.0);
        assert_eq!((field.min, field.max), (0.0, 5.0));
    }

    proptest! {
        #[test]
        fn blur_preserves_constant_fields(value in -10.0f32..10.0, rows in 1usize..12,
            cols in 1usize..12)
        {
            let field = HeightField::new_by(rows, cols, |_, _| value).box_blurred();
            for h in field.samples {
                prop_assert!((h - value).abs() <= value.abs() * 1e-6);
            }
        }

        #[test]
        fn blurred_values_stay_within_input_bounds(seed: u64, size in 1usize..20) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let raw = HeightField::from_white_noise(um!(1.0), size, &mut rng);
            let blurred = raw.box_blurred();
            prop_assert!(blurred.min >= raw.min - 1e-6 && blurred.max <= raw.max + 1e-6);
        }
    }
}
