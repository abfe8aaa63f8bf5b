//! Connectivity generators.
//!
//! Each generator holds configuration only. [`Connector::connect`] validates
//! both populations, builds a fresh [`Connection`] and leaves the generator
//! untouched, so one instance may be shared freely across threads.

mod decay;
mod dense;
mod grid;
mod identity;
mod placeholder;
mod random;

pub use self::{
    decay::{Dog, GaussianProb, GaussianWeight},
    dense::All2All,
    grid::{GridEight, GridFour, GridN},
    identity::One2One,
    placeholder::{ScaleFree, SmallWorld},
    random::{Degree, FixedPostNum, FixedPreNum, FixedProb},
};

use tracing::debug;

use crate::{Connection, Population, Result};

/// A rule that turns a pair of populations into an edge set.
///
/// # Examples
/// ```
/// use sinew_core::{All2All, Connector, GridFour, Population};
///
/// let rules: Vec<Box<dyn Connector>> = vec![
///     Box::new(All2All::default()),
///     Box::new(GridFour::default()),
/// ];
/// let layer = Population::grid(2, 2);
/// let counts: Vec<usize> = rules
///     .iter()
///     .map(|rule| rule.connect(&layer, &layer).map(|c| c.len()))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(counts, [16, 8]);
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
pub trait Connector {
    /// Returns a short, stable name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Generates the edges between `pre` and `post`.
    ///
    /// # Errors
    /// Returns [`crate::ConnectError`] when the populations or parameters
    /// are incompatible with the rule. No edges are produced in that case.
    fn connect(&self, pre: &Population, post: &Population) -> Result<Connection>;
}

/// Maps positional `(pre, post)` pairs through the populations' index arrays.
#[expect(
    clippy::indexing_slicing,
    reason = "generators only emit positions below each population's length"
)]
fn map_ids(
    pre: &Population,
    post: &Population,
    pairs: impl IntoIterator<Item = (usize, usize)>,
) -> (Vec<usize>, Vec<usize>) {
    let pre_lookup = pre.ids();
    let post_lookup = post.ids();
    pairs
        .into_iter()
        .map(|(i, j)| (pre_lookup[i], post_lookup[j]))
        .unzip()
}

/// Runs `kernel` for every item in `0..count` and concatenates the results
/// in item order.
///
/// With the `parallel` feature the items are spread over the Rayon pool; the
/// output is identical either way.
#[cfg(feature = "parallel")]
fn gather<T, F>(count: usize, kernel: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> Vec<T> + Sync + Send,
{
    use rayon::prelude::*;

    (0..count)
        .into_par_iter()
        .map(kernel)
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn gather<T, F>(count: usize, kernel: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> Vec<T> + Sync + Send,
{
    (0..count).flat_map(kernel).collect()
}

/// Emits the shared completion diagnostics for a generated connection.
fn record(connector: &'static str, connection: &Connection) {
    debug!(
        connector,
        edges = connection.len(),
        num_pre = connection.num_pre(),
        num_post = connection.num_post(),
        "connection generated"
    );
    #[cfg(feature = "metrics")]
    metrics::counter!("sinew_edges_generated", "connector" => connector)
        .increment(connection.len() as u64);
}
