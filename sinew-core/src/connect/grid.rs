//! Fixed-radius neighbourhoods on a two-dimensional lattice.
//!
//! The pre population is reshaped into a `height × width` lattice (a
//! one-dimensional population becomes a single column) and every cell is
//! connected to its in-bounds neighbours. When a post population is given it
//! must have exactly the pre shape; its indices stand in for the neighbour
//! side of each edge. Rows are independent and are generated concurrently
//! with the `parallel` feature.

use tracing::instrument;

use crate::{ConnectError, Connection, Lattice, Population, Result};

use super::{Connector, gather, map_ids, record};

/// Connects each cell to the cells directly above, below, left and right.
///
/// # Examples
/// ```
/// use sinew_core::{GridFour, Population};
///
/// let layer = Population::grid(3, 3);
/// let connection = GridFour::default().connect_within(&layer)?;
/// let centre = connection.pre_ids().iter().filter(|&&id| id == 4).count();
/// let corner = connection.pre_ids().iter().filter(|&&id| id == 0).count();
/// assert_eq!((centre, corner), (4, 2));
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridFour {
    include_self: bool,
}

impl GridFour {
    /// Creates the rule with the given self-connection policy.
    #[must_use]
    pub const fn new(include_self: bool) -> Self {
        Self { include_self }
    }

    /// Returns whether each cell is also connected to itself.
    #[must_use]
    #[rustfmt::skip]
    pub const fn include_self(&self) -> bool { self.include_self }

    /// Connects a population to itself.
    ///
    /// # Errors
    /// Returns [`ConnectError::UnsupportedGeometry`] for populations with more
    /// than two dimensions.
    pub fn connect_within(&self, population: &Population) -> Result<Connection> {
        self.generate(population, None)
    }

    #[instrument(
        name = "connect.grid_four",
        err,
        skip_all,
        fields(pre = %pre.shape(), include_self = self.include_self),
    )]
    fn generate(&self, pre: &Population, post: Option<&Population>) -> Result<Connection> {
        let lattice = resolve_lattice(self.name(), pre, post)?;
        let include_self = self.include_self;
        let pairs = gather(lattice.height(), |row| {
            four_neighbours(lattice, row, include_self)
        });
        Ok(assemble(self.name(), pre, post, pairs))
    }
}

impl Connector for GridFour {
    fn name(&self) -> &'static str {
        "grid_four"
    }

    fn connect(&self, pre: &Population, post: &Population) -> Result<Connection> {
        self.generate(pre, Some(post))
    }
}

/// Connects each cell to every cell within Chebyshev distance `n`.
///
/// The neighbourhood is the `(2n + 1) × (2n + 1)` square centred on the cell,
/// clipped to the lattice. For `n = 1`:
///
/// ```text
/// [x x x]
/// [x I x]
/// [x x x]
/// ```
///
/// # Examples
/// ```
/// use sinew_core::{GridN, Population};
///
/// let layer = Population::grid(5, 5);
/// let connection = GridN::new(2, false).connect_within(&layer)?;
/// let centre = connection.pre_ids().iter().filter(|&&id| id == 12).count();
/// assert_eq!(centre, 24);
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridN {
    n: usize,
    include_self: bool,
}

impl Default for GridN {
    fn default() -> Self {
        Self::new(1, false)
    }
}

impl GridN {
    /// Creates the rule for radius `n`.
    #[must_use]
    pub const fn new(n: usize, include_self: bool) -> Self {
        Self { n, include_self }
    }

    /// Returns the neighbourhood radius.
    #[must_use]
    #[rustfmt::skip]
    pub const fn n(&self) -> usize { self.n }

    /// Returns whether each cell is also connected to itself.
    #[must_use]
    #[rustfmt::skip]
    pub const fn include_self(&self) -> bool { self.include_self }

    /// Connects a population to itself.
    ///
    /// # Errors
    /// Returns [`ConnectError::UnsupportedGeometry`] for populations with more
    /// than two dimensions.
    pub fn connect_within(&self, population: &Population) -> Result<Connection> {
        self.generate(population, None)
    }

    #[instrument(
        name = "connect.grid_n",
        err,
        skip_all,
        fields(pre = %pre.shape(), n = self.n, include_self = self.include_self),
    )]
    fn generate(&self, pre: &Population, post: Option<&Population>) -> Result<Connection> {
        self.neighbourhood(self.name(), pre, post)
    }

    fn neighbourhood(
        &self,
        connector: &'static str,
        pre: &Population,
        post: Option<&Population>,
    ) -> Result<Connection> {
        let lattice = resolve_lattice(connector, pre, post)?;
        let (n, include_self) = (self.n, self.include_self);
        let pairs = gather(lattice.height(), |row| {
            square_neighbours(lattice, row, n, include_self)
        });
        Ok(assemble(connector, pre, post, pairs))
    }
}

impl Connector for GridN {
    fn name(&self) -> &'static str {
        "grid_n"
    }

    fn connect(&self, pre: &Population, post: &Population) -> Result<Connection> {
        self.generate(pre, Some(post))
    }
}

/// [`GridN`] with radius one: the eight surrounding cells.
///
/// # Examples
/// ```
/// use sinew_core::{GridEight, Population};
///
/// let connection = GridEight::default().connect_within(&Population::grid(3, 3))?;
/// assert_eq!(connection.len(), 4 * 3 + 4 * 5 + 8);
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridEight(GridN);

impl Default for GridEight {
    fn default() -> Self {
        Self::new(false)
    }
}

impl GridEight {
    /// Creates the rule with the given self-connection policy.
    #[must_use]
    pub const fn new(include_self: bool) -> Self {
        Self(GridN::new(1, include_self))
    }

    /// Returns whether each cell is also connected to itself.
    #[must_use]
    pub const fn include_self(&self) -> bool {
        self.0.include_self()
    }

    /// Connects a population to itself.
    ///
    /// # Errors
    /// Returns [`ConnectError::UnsupportedGeometry`] for populations with more
    /// than two dimensions.
    pub fn connect_within(&self, population: &Population) -> Result<Connection> {
        self.generate(population, None)
    }

    #[instrument(
        name = "connect.grid_eight",
        err,
        skip_all,
        fields(pre = %pre.shape(), include_self = self.include_self()),
    )]
    fn generate(&self, pre: &Population, post: Option<&Population>) -> Result<Connection> {
        self.0.neighbourhood(self.name(), pre, post)
    }
}

impl Connector for GridEight {
    fn name(&self) -> &'static str {
        "grid_eight"
    }

    fn connect(&self, pre: &Population, post: &Population) -> Result<Connection> {
        self.generate(pre, Some(post))
    }
}

fn resolve_lattice(
    connector: &'static str,
    pre: &Population,
    post: Option<&Population>,
) -> Result<Lattice> {
    if let Some(post) = post {
        if pre.shape() != post.shape() {
            return Err(ConnectError::ShapeMismatch {
                pre: pre.shape().clone(),
                post: post.shape().clone(),
            });
        }
    }
    pre.lattice(connector)
}

fn assemble(
    connector: &'static str,
    pre: &Population,
    post: Option<&Population>,
    pairs: Vec<(usize, usize)>,
) -> Connection {
    let target = post.unwrap_or(pre);
    let (pre_ids, post_ids) = map_ids(pre, target, pairs);
    let connection = Connection::new(
        pre_ids,
        post_ids,
        pre.inferred_size(),
        target.inferred_size(),
    );
    record(connector, &connection);
    connection
}

fn four_neighbours(lattice: Lattice, row: usize, include_self: bool) -> Vec<(usize, usize)> {
    let (height, width) = (lattice.height(), lattice.width());
    let mut pairs = Vec::with_capacity(width * 5);
    for col in 0..width {
        let cell = lattice.index(row, col);
        if row > 0 {
            pairs.push((cell, lattice.index(row - 1, col)));
        }
        if row + 1 < height {
            pairs.push((cell, lattice.index(row + 1, col)));
        }
        if col > 0 {
            pairs.push((cell, lattice.index(row, col - 1)));
        }
        if col + 1 < width {
            pairs.push((cell, lattice.index(row, col + 1)));
        }
        if include_self {
            pairs.push((cell, cell));
        }
    }
    pairs
}

fn square_neighbours(
    lattice: Lattice,
    row: usize,
    n: usize,
    include_self: bool,
) -> Vec<(usize, usize)> {
    let (height, width) = (lattice.height(), lattice.width());
    let reach = isize::try_from(n).unwrap_or(isize::MAX);
    let mut pairs = Vec::new();
    for col in 0..width {
        let cell = lattice.index(row, col);
        for row_diff in -reach..=reach {
            let Some(target_row) = row.checked_add_signed(row_diff).filter(|r| *r < height) else {
                continue;
            };
            for col_diff in -reach..=reach {
                if !include_self && row_diff == 0 && col_diff == 0 {
                    continue;
                }
                let Some(target_col) = col.checked_add_signed(col_diff).filter(|c| *c < width)
                else {
                    continue;
                };
                pairs.push((cell, lattice.index(target_row, target_col)));
            }
        }
    }
    pairs
}
