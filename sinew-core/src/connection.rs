//! Edge sets produced by the generators and the derived layouts consumers
//! use to walk them.

/// A single directed connection, optionally weighted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Index of the pre-synaptic neuron.
    pub pre: usize,
    /// Index of the post-synaptic neuron.
    pub post: usize,
    /// Scalar weight, present only for weighted generators.
    pub weight: Option<f64>,
}

/// Dense `rows × cols` membership matrix, stored row-major.
///
/// # Examples
/// ```
/// use sinew_core::ConnMatrix;
///
/// let matrix = ConnMatrix::from_pairs(2, 3, [(0, 2), (1, 0)]);
/// assert_eq!(matrix.get(0, 2), Some(true));
/// assert_eq!(matrix.get(0, 0), Some(false));
/// assert_eq!(matrix.get(2, 0), None);
/// assert_eq!(matrix.count(), 2);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConnMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl ConnMatrix {
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols, "cells must cover the matrix");
        Self { rows, cols, cells }
    }

    /// Builds a matrix with the given `(row, col)` cells set.
    ///
    /// Pairs outside the matrix are ignored.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "out-of-range pairs are skipped before the write"
    )]
    pub fn from_pairs(
        rows: usize,
        cols: usize,
        pairs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut cells = vec![false; rows * cols];
        for (row, col) in pairs {
            if row < rows && col < cols {
                cells[row * cols + col] = true;
            }
        }
        Self { rows, cols, cells }
    }

    /// Returns the number of rows.
    #[must_use]
    #[rustfmt::skip]
    pub fn rows(&self) -> usize { self.rows }

    /// Returns the number of columns.
    #[must_use]
    #[rustfmt::skip]
    pub fn cols(&self) -> usize { self.cols }

    /// Returns the membership of `(row, col)`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    /// Returns one row of the matrix.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[bool]> {
        if row >= self.rows {
            return None;
        }
        self.cells.get(row * self.cols..(row + 1) * self.cols)
    }

    /// Returns the number of set cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell).count()
    }

    /// Returns the matrix as `0.0`/`1.0` values for numeric consumers.
    #[must_use]
    pub fn to_f64(&self) -> Vec<f64> {
        self.cells
            .iter()
            .map(|cell| if *cell { 1.0 } else { 0.0 })
            .collect()
    }
}

/// Compressed sparse row view of a connection.
///
/// Row `r` owns `indices[indptr[r]..indptr[r + 1]]`; `edge_ids` holds the
/// position of each entry in the originating [`Connection`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Adjacency {
    indptr: Vec<usize>,
    indices: Vec<usize>,
    edge_ids: Vec<usize>,
}

impl Adjacency {
    #[expect(
        clippy::indexing_slicing,
        reason = "callers size `rows` past the largest source id"
    )]
    fn build(rows: usize, sources: &[usize], targets: &[usize]) -> Self {
        let mut indptr = vec![0_usize; rows + 1];
        for &source in sources {
            indptr[source + 1] += 1;
        }
        for row in 0..rows {
            indptr[row + 1] += indptr[row];
        }
        let mut cursor = indptr.clone();
        let mut indices = vec![0_usize; sources.len()];
        let mut edge_ids = vec![0_usize; sources.len()];
        for (edge, (&source, &target)) in sources.iter().zip(targets).enumerate() {
            let slot = cursor[source];
            indices[slot] = target;
            edge_ids[slot] = edge;
            cursor[source] += 1;
        }
        Self {
            indptr,
            indices,
            edge_ids,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.indptr.len().saturating_sub(1)
    }

    /// Returns the row offsets, one longer than [`Self::rows`].
    #[must_use]
    #[rustfmt::skip]
    pub fn indptr(&self) -> &[usize] { &self.indptr }

    /// Returns the column of every entry, grouped by row.
    #[must_use]
    #[rustfmt::skip]
    pub fn indices(&self) -> &[usize] { &self.indices }

    /// Returns the originating edge position of every entry.
    #[must_use]
    #[rustfmt::skip]
    pub fn edge_ids(&self) -> &[usize] { &self.edge_ids }

    /// Returns the neighbours of `row`, or an empty slice when out of range.
    #[must_use]
    pub fn neighbours(&self, row: usize) -> &[usize] {
        match (self.indptr.get(row), self.indptr.get(row + 1)) {
            (Some(&start), Some(&end)) => self.indices.get(start..end).unwrap_or(&[]),
            _ => &[],
        }
    }
}

/// Edge set produced by one generator invocation.
///
/// `pre_ids` and `post_ids` are positionally paired; `weights`, when present,
/// runs parallel to both. Edges are not deduplicated.
///
/// # Examples
/// ```
/// use sinew_core::{Connector, One2One, Population};
///
/// let connection = One2One.connect(&Population::range(3), &Population::range(3))?;
/// assert_eq!(connection.len(), 3);
/// let pairs: Vec<_> = connection.edges().map(|edge| (edge.pre, edge.post)).collect();
/// assert_eq!(pairs, [(0, 0), (1, 1), (2, 2)]);
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    pre_ids: Vec<usize>,
    post_ids: Vec<usize>,
    weights: Option<Vec<f64>>,
    num_pre: usize,
    num_post: usize,
    conn_mat: Option<ConnMatrix>,
}

impl Connection {
    pub(crate) fn new(
        pre_ids: Vec<usize>,
        post_ids: Vec<usize>,
        num_pre: usize,
        num_post: usize,
    ) -> Self {
        debug_assert_eq!(pre_ids.len(), post_ids.len(), "edge columns must pair up");
        Self {
            pre_ids,
            post_ids,
            weights: None,
            num_pre,
            num_post,
            conn_mat: None,
        }
    }

    pub(crate) fn with_weights(mut self, weights: Vec<f64>) -> Self {
        debug_assert_eq!(weights.len(), self.pre_ids.len(), "one weight per edge");
        self.weights = Some(weights);
        self
    }

    pub(crate) fn with_conn_mat(mut self, conn_mat: ConnMatrix) -> Self {
        self.conn_mat = Some(conn_mat);
        self
    }

    /// Returns the pre-synaptic index of every edge.
    #[must_use]
    #[rustfmt::skip]
    pub fn pre_ids(&self) -> &[usize] { &self.pre_ids }

    /// Returns the post-synaptic index of every edge.
    #[must_use]
    #[rustfmt::skip]
    pub fn post_ids(&self) -> &[usize] { &self.post_ids }

    /// Returns the per-edge weights for weighted generators.
    #[must_use]
    #[rustfmt::skip]
    pub fn weights(&self) -> Option<&[f64]> { self.weights.as_deref() }

    /// Returns the pre population size reported for this connection.
    #[must_use]
    #[rustfmt::skip]
    pub fn num_pre(&self) -> usize { self.num_pre }

    /// Returns the post population size reported for this connection.
    #[must_use]
    #[rustfmt::skip]
    pub fn num_post(&self) -> usize { self.num_post }

    /// Returns the positional membership matrix, when the generator built one.
    #[must_use]
    #[rustfmt::skip]
    pub fn conn_mat(&self) -> Option<&ConnMatrix> { self.conn_mat.as_ref() }

    /// Returns the number of edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.pre_ids.len() }

    /// Returns whether the connection holds no edges.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.pre_ids.is_empty() }

    /// Iterates over the edges in emission order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.pre_ids
            .iter()
            .zip(&self.post_ids)
            .enumerate()
            .map(|(position, (&pre, &post))| Edge {
                pre,
                post,
                weight: self
                    .weights
                    .as_ref()
                    .and_then(|weights| weights.get(position).copied()),
            })
    }

    /// Groups the edges by pre-synaptic index.
    #[must_use]
    pub fn pre_to_post(&self) -> Adjacency {
        let rows = row_count(self.num_pre, &self.pre_ids);
        Adjacency::build(rows, &self.pre_ids, &self.post_ids)
    }

    /// Groups the edges by post-synaptic index.
    #[must_use]
    pub fn post_to_pre(&self) -> Adjacency {
        let rows = row_count(self.num_post, &self.post_ids);
        Adjacency::build(rows, &self.post_ids, &self.pre_ids)
    }

    /// Materialises the edges as a dense index-space membership matrix.
    ///
    /// Unlike [`Self::conn_mat`], rows and columns are neuron indices rather
    /// than positions within the populations.
    #[must_use]
    pub fn to_matrix(&self) -> ConnMatrix {
        let rows = row_count(self.num_pre, &self.pre_ids);
        let cols = row_count(self.num_post, &self.post_ids);
        ConnMatrix::from_pairs(
            rows,
            cols,
            self.pre_ids.iter().copied().zip(self.post_ids.iter().copied()),
        )
    }
}

/// Sizes an index-space layout so that neither the declared size nor any
/// referenced index is cut off.
fn row_count(reported: usize, ids: &[usize]) -> usize {
    let referenced = ids.iter().copied().max().map_or(0, |max| max + 1);
    reported.max(referenced)
}
