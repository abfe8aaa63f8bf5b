//! Random sources for the stochastic generators.

use rand::{Rng, SeedableRng, distributions::Standard, rngs::SmallRng};

/// Builds the generator used by a single invocation.
///
/// A configured seed yields the same stream on every call; without one the
/// stream is seeded from operating-system entropy.
pub(crate) fn invocation_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    }
}

/// Draws a row-major `rows × cols` matrix of uniform values in `[0, 1)`.
///
/// The whole matrix is drawn before any value is used so every invocation
/// consumes one contiguous run of the stream.
pub(crate) fn uniform_matrix<R: Rng + ?Sized>(rng: &mut R, rows: usize, cols: usize) -> Vec<f64> {
    (0..rows * cols).map(|_| rng.sample(Standard)).collect()
}

/// Overwrites the leading diagonal of a row-major matrix with `value`.
pub(crate) fn fill_diagonal(matrix: &mut [f64], rows: usize, cols: usize, value: f64) {
    // Diagonal cells sit `cols + 1` apart in row-major order.
    for cell in matrix.iter_mut().step_by(cols + 1).take(rows.min(cols)) {
        *cell = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_streams_repeat() {
        let first = uniform_matrix(&mut invocation_rng(Some(7)), 3, 4);
        let second = uniform_matrix(&mut invocation_rng(Some(7)), 3, 4);
        assert_eq!(first, second);
        assert!(first.iter().all(|value| (0.0..1.0).contains(value)));
    }

    #[test]
    fn fill_diagonal_stops_at_shorter_axis() {
        let mut matrix = vec![0.0; 6];
        fill_diagonal(&mut matrix, 3, 2, 1.5);
        assert_eq!(matrix, [1.5, 0.0, 0.0, 1.5, 0.0, 0.0]);
    }

    #[test]
    fn fill_diagonal_strides_past_wide_rows() {
        let mut matrix = vec![0.0; 6];
        fill_diagonal(&mut matrix, 2, 3, 1.5);
        assert_eq!(matrix, [1.5, 0.0, 0.0, 0.0, 1.5, 0.0]);
    }

    #[test]
    fn fill_diagonal_ignores_empty_matrices() {
        let mut matrix: Vec<f64> = Vec::new();
        fill_diagonal(&mut matrix, 3, 0, 1.5);
        assert!(matrix.is_empty());
    }
}
