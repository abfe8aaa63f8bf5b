//! Lattice coordinates and distances for spatial generators.

/// Row-major `height × width` arrangement of a population.
///
/// # Examples
/// ```
/// use sinew_core::Lattice;
///
/// let lattice = Lattice::new(3, 4);
/// assert_eq!(lattice.coords(6), (1, 2));
/// // Normalised coordinates live on the unit square.
/// assert_eq!(lattice.normalised_coords(11, true), (1.0, 1.0));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Lattice {
    height: usize,
    width: usize,
}

impl Lattice {
    /// Creates a lattice with the given dimensions.
    #[must_use]
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    /// Returns the number of rows.
    #[must_use]
    #[rustfmt::skip]
    pub const fn height(&self) -> usize { self.height }

    /// Returns the number of columns.
    #[must_use]
    #[rustfmt::skip]
    pub const fn width(&self) -> usize { self.width }

    /// Returns the number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.height * self.width
    }

    /// Returns whether the lattice has no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the flat index of `(row, col)`.
    #[must_use]
    pub const fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Returns the `(row, col)` of a flat index.
    ///
    /// A zero-width lattice has no cells; every index maps to `(0, 0)`.
    #[must_use]
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "row-major unflattening needs the quotient and remainder"
    )]
    pub const fn coords(&self, index: usize) -> (usize, usize) {
        if self.width == 0 {
            return (0, 0);
        }
        (index / self.width, index % self.width)
    }

    /// Returns the coordinates of `index`, optionally rescaled to `[0, 1]`.
    ///
    /// Each axis is divided by `size - 1`. An axis of size one has no extent,
    /// so its normalised coordinate is fixed at `1.0`.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "lattice positions stay far below 2^52"
    )]
    pub fn normalised_coords(&self, index: usize, normalise: bool) -> (f64, f64) {
        let (row, col) = self.coords(index);
        if normalise {
            (
                normalise_axis(row, self.height),
                normalise_axis(col, self.width),
            )
        } else {
            (row as f64, col as f64)
        }
    }
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "normalisation rescales positions to the unit interval"
)]
fn normalise_axis(position: usize, extent: usize) -> f64 {
    if extent > 1 {
        position as f64 / (extent - 1) as f64
    } else {
        1.0
    }
}

/// Squared Euclidean distance between two planar points.
#[must_use]
#[expect(clippy::float_arithmetic, reason = "Euclidean distance is floating-point")]
pub fn squared_distance(left: (f64, f64), right: (f64, f64)) -> f64 {
    let rows = left.0 - right.0;
    let cols = left.1 - right.1;
    rows * rows + cols * cols
}
