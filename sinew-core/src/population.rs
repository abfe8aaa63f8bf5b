//! Population descriptors consumed by every generator.
//!
//! A [`Population`] is passive data: the index of every neuron in the group,
//! the shape those indices are laid out in, and optionally the population
//! size the caller wants reported on the resulting [`crate::Connection`].

use std::fmt;

use crate::{
    error::{ConnectError, Result},
    geometry::Lattice,
};

/// Row-major dimensions of a population.
///
/// # Examples
/// ```
/// use sinew_core::Shape;
///
/// let shape = Shape::new(vec![3, 4]);
/// assert_eq!(shape.size(), 12);
/// assert_eq!(shape.to_string(), "(3, 4)");
/// assert_eq!(Shape::new(vec![5]).to_string(), "(5,)");
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Shape(Vec<usize>);

impl Shape {
    /// Wraps the given dimensions.
    #[must_use]
    pub fn new(dims: Vec<usize>) -> Self {
        Self(dims)
    }

    /// Returns the dimensions.
    #[must_use]
    #[rustfmt::skip]
    pub fn dims(&self) -> &[usize] { &self.0 }

    /// Returns the number of dimensions.
    #[must_use]
    #[rustfmt::skip]
    pub fn ndim(&self) -> usize { self.0.len() }

    /// Returns the number of cells described by the shape.
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.iter().product()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [single] => write!(f, "({single},)"),
            dims => {
                f.write_str("(")?;
                for (position, dim) in dims.iter().enumerate() {
                    if position > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{dim}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

/// Index array and geometry of a pre- or post-synaptic neuron group.
///
/// # Examples
/// ```
/// use sinew_core::Population;
///
/// let layer = Population::grid(2, 3);
/// assert_eq!(layer.len(), 6);
/// assert_eq!(layer.ids(), &[0, 1, 2, 3, 4, 5]);
/// // Without a declared size the largest index is reported.
/// assert_eq!(layer.inferred_size(), 5);
/// assert_eq!(layer.with_declared_size(6).inferred_size(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Population {
    ids: Vec<usize>,
    shape: Shape,
    declared_size: Option<usize>,
}

impl Population {
    /// Creates a one-dimensional population `0..len`.
    #[must_use]
    pub fn range(len: usize) -> Self {
        Self {
            ids: (0..len).collect(),
            shape: Shape(vec![len]),
            declared_size: None,
        }
    }

    /// Creates a `height × width` population indexed row-major from zero.
    #[must_use]
    pub fn grid(height: usize, width: usize) -> Self {
        Self {
            ids: (0..height * width).collect(),
            shape: Shape(vec![height, width]),
            declared_size: None,
        }
    }

    /// Creates a one-dimensional population over arbitrary indices.
    #[must_use]
    pub fn from_ids(ids: Vec<usize>) -> Self {
        let shape = Shape(vec![ids.len()]);
        Self {
            ids,
            shape,
            declared_size: None,
        }
    }

    /// Creates a population whose indices are laid out in `dims`, row-major.
    ///
    /// # Errors
    /// Returns [`ConnectError::ShapeLengthMismatch`] when the product of
    /// `dims` differs from the number of indices.
    ///
    /// # Examples
    /// ```
    /// use sinew_core::{ConnectError, Population};
    ///
    /// let ok = Population::with_shape(vec![4, 5, 6, 7], vec![2, 2])?;
    /// assert_eq!(ok.shape().dims(), &[2, 2]);
    ///
    /// let err = Population::with_shape(vec![1, 2, 3], vec![2, 2]).unwrap_err();
    /// assert!(matches!(err, ConnectError::ShapeLengthMismatch { len: 3, .. }));
    /// # Ok::<(), ConnectError>(())
    /// ```
    pub fn with_shape(ids: Vec<usize>, dims: impl Into<Shape>) -> Result<Self> {
        let shape = dims.into();
        if shape.size() != ids.len() {
            return Err(ConnectError::ShapeLengthMismatch {
                shape,
                len: ids.len(),
            });
        }
        Ok(Self {
            ids,
            shape,
            declared_size: None,
        })
    }

    /// Declares the size reported as `num_pre`/`num_post`, overriding the
    /// max-index inference.
    #[must_use]
    pub fn with_declared_size(mut self, size: usize) -> Self {
        self.declared_size = Some(size);
        self
    }

    /// Returns the flattened indices in row-major order.
    #[must_use]
    #[rustfmt::skip]
    pub fn ids(&self) -> &[usize] { &self.ids }

    /// Returns the shape of the population.
    #[must_use]
    #[rustfmt::skip]
    pub fn shape(&self) -> &Shape { &self.shape }

    /// Returns the number of neurons.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.ids.len() }

    /// Returns whether the population holds no neurons.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.ids.is_empty() }

    /// Returns the caller-declared size, if any.
    #[must_use]
    #[rustfmt::skip]
    pub fn declared_size(&self) -> Option<usize> { self.declared_size }

    /// Returns the largest index in the population, or zero when empty.
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.ids.iter().copied().max().unwrap_or(0)
    }

    /// Returns the size reported on connections built from this population.
    ///
    /// This is the declared size when one was given and the largest index
    /// otherwise. For a dense `0..n` range the inferred value is `n - 1`;
    /// declare the size explicitly when an exact count matters.
    #[must_use]
    pub fn inferred_size(&self) -> usize {
        self.declared_size.unwrap_or_else(|| self.max_index())
    }

    /// Reshapes the population into a lattice for neighbourhood generators.
    ///
    /// One-dimensional populations become a single column.
    ///
    /// # Errors
    /// Returns [`ConnectError::UnsupportedGeometry`] for populations with
    /// zero or more than two dimensions.
    pub fn lattice(&self, connector: &'static str) -> Result<Lattice> {
        match *self.shape.dims() {
            [height] => Ok(Lattice::new(height, 1)),
            [height, width] => Ok(Lattice::new(height, width)),
            _ => Err(ConnectError::UnsupportedGeometry {
                connector,
                supported: "one- or two-dimensional",
                dimensions: self.shape.ndim(),
            }),
        }
    }

    /// Reshapes a strictly two-dimensional population into a lattice.
    ///
    /// # Errors
    /// Returns [`ConnectError::UnsupportedGeometry`] unless the population
    /// has exactly two dimensions.
    pub fn planar(&self, connector: &'static str) -> Result<Lattice> {
        match *self.shape.dims() {
            [height, width] => Ok(Lattice::new(height, width)),
            _ => Err(ConnectError::UnsupportedGeometry {
                connector,
                supported: "two-dimensional",
                dimensions: self.shape.ndim(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(vec![], "()")]
    #[case(vec![7], "(7,)")]
    #[case(vec![2, 3], "(2, 3)")]
    #[case(vec![2, 3, 4], "(2, 3, 4)")]
    fn shape_displays_like_an_array_shape(#[case] dims: Vec<usize>, #[case] expected: &str) {
        assert_eq!(Shape::new(dims).to_string(), expected);
    }

    #[test]
    fn inferred_size_uses_largest_index() {
        let population = Population::from_ids(vec![3, 9, 4]);
        assert_eq!(population.inferred_size(), 9);
        assert_eq!(Population::range(0).inferred_size(), 0);
    }

    #[test]
    fn declared_size_overrides_inference() {
        let population = Population::range(5).with_declared_size(5);
        assert_eq!(population.inferred_size(), 5);
        assert_eq!(population.declared_size(), Some(5));
    }

    #[rstest]
    #[case(Population::range(4), 4, 1)]
    #[case(Population::grid(3, 2), 3, 2)]
    fn lattice_reshapes_one_and_two_dimensions(
        #[case] population: Population,
        #[case] height: usize,
        #[case] width: usize,
    ) {
        let lattice = population.lattice("test").expect("lattice must resolve");
        assert_eq!((lattice.height(), lattice.width()), (height, width));
    }

    #[test]
    fn lattice_rejects_three_dimensions() {
        let population =
            Population::with_shape((0..8).collect(), vec![2, 2, 2]).expect("shape covers ids");
        let err = population.lattice("grid").expect_err("3-D must fail");
        assert!(matches!(
            err,
            ConnectError::UnsupportedGeometry { dimensions: 3, .. }
        ));
    }

    #[test]
    fn planar_rejects_one_dimension() {
        let err = Population::range(4)
            .planar("gaussian")
            .expect_err("1-D must fail");
        assert!(matches!(
            err,
            ConnectError::UnsupportedGeometry { dimensions: 1, .. }
        ));
    }
}
