//! Population shapes written as `N` or `HxW`.

use std::{fmt, num::ParseIntError, str::FromStr};

use sinew_core::Population;
use thiserror::Error;

/// Shape of a generated population.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PopulationShape {
    /// A flat population of `N` neurons, built with [`Population::range`].
    Line(usize),
    /// A `height × width` sheet, built with [`Population::grid`].
    Sheet(usize, usize),
}

impl PopulationShape {
    /// Builds the population with indices `0..size`.
    #[must_use]
    pub fn to_population(self) -> Population {
        match self {
            Self::Line(len) => Population::range(len),
            Self::Sheet(height, width) => Population::grid(height, width),
        }
    }
}

impl fmt::Display for PopulationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(len) => write!(f, "{len}"),
            Self::Sheet(height, width) => write!(f, "{height}x{width}"),
        }
    }
}

/// Errors raised while parsing a [`PopulationShape`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeParseError {
    /// A dimension was not a non-negative integer.
    #[error("dimension `{raw}` is not a non-negative integer: {source}")]
    Dimension {
        /// Offending dimension text.
        raw: String,
        /// Underlying integer parse failure.
        #[source]
        source: ParseIntError,
    },
    /// More than two dimensions were given.
    #[error("expected `N` or `HxW`, got {dimensions} dimensions")]
    TooManyDimensions {
        /// Number of `x`-separated parts.
        dimensions: usize,
    },
}

impl FromStr for PopulationShape {
    type Err = ShapeParseError;

    /// # Examples
    /// ```
    /// use sinew_cli::cli::PopulationShape;
    ///
    /// assert_eq!("12".parse(), Ok(PopulationShape::Line(12)));
    /// assert_eq!("3x4".parse(), Ok(PopulationShape::Sheet(3, 4)));
    /// assert!("2x2x2".parse::<PopulationShape>().is_err());
    /// ```
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let dims = raw
            .trim()
            .split(['x', 'X'])
            .map(|part| {
                part.trim().parse::<usize>().map_err(|source| ShapeParseError::Dimension {
                    raw: part.to_owned(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        match *dims.as_slice() {
            [len] => Ok(Self::Line(len)),
            [height, width] => Ok(Self::Sheet(height, width)),
            _ => Err(ShapeParseError::TooManyDimensions {
                dimensions: dims.len(),
            }),
        }
    }
}
