//! Benchmark parameter types.

use std::fmt;

use sinew_core::Population;

/// A square sheet of neurons used as both pre and post population.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SheetParams {
    /// Cells along each side.
    pub side: usize,
}

impl SheetParams {
    /// Builds the `side × side` population.
    #[must_use]
    pub fn population(self) -> Population {
        Population::grid(self.side, self.side)
    }

    /// Number of neurons in the sheet.
    #[must_use]
    pub const fn len(self) -> usize {
        self.side * self.side
    }

    /// Returns `true` for a zero-sided sheet.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.side == 0
    }
}

impl fmt::Display for SheetParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.side)
    }
}

/// A grid-neighbourhood run: sheet size plus neighbourhood radius.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RadiusParams {
    /// Sheet being connected.
    pub sheet: SheetParams,
    /// Neighbourhood radius.
    pub radius: usize,
}

impl fmt::Display for RadiusParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},n={}", self.sheet, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(SheetParams { side: 16 }, "16x16")]
    #[case(SheetParams { side: 1 }, "1x1")]
    fn sheet_labels(#[case] params: SheetParams, #[case] expected: &str) {
        assert_eq!(params.to_string(), expected);
        assert_eq!(params.population().len(), params.len());
    }

    #[test]
    fn radius_labels() {
        let params = RadiusParams {
            sheet: SheetParams { side: 8 },
            radius: 3,
        };
        assert_eq!(params.to_string(), "8x8,n=3");
    }
}
