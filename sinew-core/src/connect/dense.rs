//! Complete bipartite connectivity.

use tracing::instrument;

use crate::{Connection, Population, Result};

use super::{Connector, map_ids, record};

/// Connects every pre neuron to every post neuron.
///
/// With `include_self` disabled the pairs whose *positions* coincide,
/// `(k, k)` for `k < min(len(pre), len(post))`, are left out. Exclusion is
/// positional, so it also applies when the two index arrays hold different
/// values.
///
/// # Examples
/// ```
/// use sinew_core::{All2All, Connector, Population};
///
/// let layer = Population::range(3);
/// let connection = All2All::new(false).connect(&layer, &layer)?;
/// assert_eq!(connection.len(), 6);
/// assert!(connection.edges().all(|edge| edge.pre != edge.post));
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct All2All {
    include_self: bool,
}

impl Default for All2All {
    fn default() -> Self {
        Self { include_self: true }
    }
}

impl All2All {
    /// Creates the rule with the given self-connection policy.
    #[must_use]
    pub const fn new(include_self: bool) -> Self {
        Self { include_self }
    }

    /// Returns whether positional self-pairs are kept.
    #[must_use]
    #[rustfmt::skip]
    pub const fn include_self(&self) -> bool { self.include_self }
}

impl Connector for All2All {
    fn name(&self) -> &'static str {
        "all2all"
    }

    #[instrument(
        name = "connect.all2all",
        err,
        skip_all,
        fields(pre = %pre.shape(), post = %post.shape(), include_self = self.include_self),
    )]
    fn connect(&self, pre: &Population, post: &Population) -> Result<Connection> {
        let (num_pre, num_post) = (pre.len(), post.len());
        let include_self = self.include_self;
        let pairs = (0..num_pre)
            .flat_map(|i| (0..num_post).map(move |j| (i, j)))
            .filter(|&(i, j)| include_self || i != j);
        let (pre_ids, post_ids) = map_ids(pre, post, pairs);
        let connection = Connection::new(
            pre_ids,
            post_ids,
            pre.inferred_size(),
            post.inferred_size(),
        );
        record(self.name(), &connection);
        Ok(connection)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(true, 12)]
    #[case(false, 9)]
    fn counts_rectangular_products(#[case] include_self: bool, #[case] expected: usize) {
        let connection = All2All::new(include_self)
            .connect(&Population::range(3), &Population::range(4))
            .expect("dense connection never fails");
        assert_eq!(connection.len(), expected);
    }

    #[test]
    fn excludes_by_position_not_by_value() {
        let pre = Population::from_ids(vec![10, 11]);
        let post = Population::from_ids(vec![11, 10]);
        let connection = All2All::new(false)
            .connect(&pre, &post)
            .expect("dense connection never fails");
        let pairs: Vec<_> = connection.edges().map(|e| (e.pre, e.post)).collect();
        // Positions (0, 1) and (1, 0) survive; their values coincide.
        assert_eq!(pairs, [(10, 10), (11, 11)]);
    }
}
