//! Random samplers driven by a uniform pre × post draw matrix.
//!
//! Each invocation draws the full `len(pre) × len(post)` matrix up front, so
//! a seeded generator always consumes the same contiguous run of its stream.
//! Self-connections are suppressed by overwriting the positional diagonal of
//! that matrix before thresholding or ranking.

use std::str::FromStr;

use rand::Rng;
use tracing::instrument;

use crate::{
    ConnMatrix, ConnectError, Connection, Population, Result,
    rng::{fill_diagonal, invocation_rng, uniform_matrix},
};

use super::{Connector, gather, map_ids, record};

/// Diagonal value that keeps a self-pair above any probability threshold.
const ABOVE_THRESHOLD: f64 = 1.0;
/// Diagonal value that ranks a self-pair behind every genuine draw.
const BEYOND_LAST_RANK: f64 = 1.1;

/// Fixed in- or out-degree, either absolute or relative to the population
/// the partners are drawn from.
///
/// # Examples
/// ```
/// use sinew_core::Degree;
///
/// assert_eq!(Degree::Count(3).resolve(10), 3);
/// assert_eq!(Degree::Fraction(0.25).resolve(10), 2);
/// assert_eq!("4".parse::<Degree>()?, Degree::Count(4));
/// assert_eq!("0.5".parse::<Degree>()?, Degree::Fraction(0.5));
/// assert!("many".parse::<Degree>().is_err());
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Degree {
    /// Exactly this many partners.
    Count(usize),
    /// This fraction of the partner population, rounded down.
    Fraction(f64),
}

impl Degree {
    /// Returns the number of partners out of `population` candidates.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "validated fractions lie in [0, 1], so the product fits the population"
    )]
    pub fn resolve(self, population: usize) -> usize {
        match self {
            Self::Count(count) => count,
            Self::Fraction(fraction) => (fraction * population as f64).floor() as usize,
        }
    }

    fn validate(self, connector: &'static str) -> Result<Self> {
        match self {
            Self::Fraction(fraction) if !(0.0..=1.0).contains(&fraction) => {
                Err(ConnectError::InvalidDegree {
                    connector,
                    reason: format!("fraction {fraction} must lie in [0, 1]"),
                })
            }
            valid => Ok(valid),
        }
    }
}

impl From<usize> for Degree {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<f64> for Degree {
    fn from(fraction: f64) -> Self {
        Self::Fraction(fraction)
    }
}

impl FromStr for Degree {
    type Err = ConnectError;

    fn from_str(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if let Ok(count) = trimmed.parse::<i64>() {
            return usize::try_from(count)
                .map(Self::Count)
                .map_err(|_| ConnectError::InvalidDegree {
                    connector: "degree",
                    reason: format!("count {count} must be non-negative"),
                });
        }
        match trimmed.parse::<f64>() {
            Ok(fraction) => Self::Fraction(fraction).validate("degree"),
            Err(_) => Err(ConnectError::InvalidParameterType {
                raw: raw.to_owned(),
            }),
        }
    }
}

/// Connects each `(pre, post)` pair whose uniform draw falls below `prob`.
///
/// Besides the edge list the connection carries the positional membership
/// matrix ([`Connection::conn_mat`]).
///
/// # Examples
/// ```
/// use sinew_core::{Connector, FixedProb, Population};
///
/// let layer = Population::range(20);
/// let rule = FixedProb::new(0.3)?.with_include_self(false).with_seed(11);
/// let first = rule.connect(&layer, &layer)?;
/// assert_eq!(first, rule.connect(&layer, &layer)?);
/// assert!(first.edges().all(|edge| edge.pre != edge.post));
/// assert_eq!(first.conn_mat().map(|m| m.count()), Some(first.len()));
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedProb {
    prob: f64,
    include_self: bool,
    seed: Option<u64>,
}

impl FixedProb {
    /// Creates the rule for connection probability `prob`.
    ///
    /// # Errors
    /// Returns [`ConnectError::InvalidParameter`] unless `prob` lies in
    /// `[0, 1]`.
    pub fn new(prob: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&prob) {
            return Err(ConnectError::InvalidParameter {
                connector: "fixed_prob",
                name: "prob",
                reason: format!("{prob} must lie in [0, 1]"),
            });
        }
        Ok(Self {
            prob,
            include_self: true,
            seed: None,
        })
    }

    /// Sets whether positional self-pairs may be drawn.
    #[must_use]
    pub const fn with_include_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    /// Seeds the random stream used by [`Connector::connect`].
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the connection probability.
    #[must_use]
    #[rustfmt::skip]
    pub const fn prob(&self) -> f64 { self.prob }

    /// Generates the connection using draws from `rng`.
    ///
    /// # Errors
    /// This rule accepts any pair of populations; the signature matches the
    /// other samplers.
    #[expect(
        clippy::integer_division,
        clippy::integer_division_remainder_used,
        reason = "membership cells are unflattened row-major"
    )]
    #[instrument(
        name = "connect.fixed_prob",
        err,
        skip_all,
        fields(
            pre = %pre.shape(),
            post = %post.shape(),
            prob = self.prob,
            include_self = self.include_self,
        ),
    )]
    pub fn connect_with_rng<R: Rng + ?Sized>(
        &self,
        pre: &Population,
        post: &Population,
        rng: &mut R,
    ) -> Result<Connection> {
        let (rows, cols) = (pre.len(), post.len());
        let mut draws = uniform_matrix(rng, rows, cols);
        if !self.include_self {
            fill_diagonal(&mut draws, rows, cols, ABOVE_THRESHOLD);
        }
        let cells: Vec<bool> = draws.iter().map(|draw| *draw < self.prob).collect();
        let pairs = cells
            .iter()
            .enumerate()
            .filter(|(_, member)| **member)
            .map(|(cell, _)| (cell / cols, cell % cols));
        let (pre_ids, post_ids) = map_ids(pre, post, pairs);
        let connection = Connection::new(
            pre_ids,
            post_ids,
            pre.inferred_size(),
            post.inferred_size(),
        )
        .with_conn_mat(ConnMatrix::from_cells(rows, cols, cells));
        record(self.name(), &connection);
        Ok(connection)
    }
}

impl Connector for FixedProb {
    fn name(&self) -> &'static str {
        "fixed_prob"
    }

    fn connect(&self, pre: &Population, post: &Population) -> Result<Connection> {
        self.connect_with_rng(pre, post, &mut invocation_rng(self.seed))
    }
}

/// Gives every post neuron exactly `num` pre partners.
///
/// For each post neuron the pre neurons with the smallest draws in its
/// column are chosen. The diagonal is pushed behind every genuine draw when
/// self-connections are excluded, so a self-pair is only chosen when `num`
/// equals the number of pre neurons.
///
/// # Examples
/// ```
/// use sinew_core::{Connector, FixedPreNum, Population};
///
/// let rule = FixedPreNum::new(2)?.with_seed(3);
/// let connection = rule.connect(&Population::range(5), &Population::range(4))?;
/// for post in 0..4 {
///     let in_degree = connection.post_ids().iter().filter(|&&id| id == post).count();
///     assert_eq!(in_degree, 2);
/// }
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPreNum {
    num: Degree,
    include_self: bool,
    seed: Option<u64>,
}

impl FixedPreNum {
    /// Creates the rule for in-degree `num`.
    ///
    /// # Errors
    /// Returns [`ConnectError::InvalidDegree`] for fractions outside `[0, 1]`.
    pub fn new(num: impl Into<Degree>) -> Result<Self> {
        Ok(Self {
            num: num.into().validate("fixed_pre_num")?,
            include_self: true,
            seed: None,
        })
    }

    /// Sets whether positional self-pairs may be chosen.
    #[must_use]
    pub const fn with_include_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    /// Seeds the random stream used by [`Connector::connect`].
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured in-degree.
    #[must_use]
    #[rustfmt::skip]
    pub const fn num(&self) -> Degree { self.num }

    /// Generates the connection using draws from `rng`.
    ///
    /// # Errors
    /// Returns [`ConnectError::InvalidDegree`] when the resolved degree
    /// exceeds the number of pre neurons.
    #[expect(
        clippy::indexing_slicing,
        reason = "`row < rows` and `col < cols` address the drawn matrix"
    )]
    #[instrument(
        name = "connect.fixed_pre_num",
        err,
        skip_all,
        fields(
            pre = %pre.shape(),
            post = %post.shape(),
            num = ?self.num,
            include_self = self.include_self,
        ),
    )]
    pub fn connect_with_rng<R: Rng + ?Sized>(
        &self,
        pre: &Population,
        post: &Population,
        rng: &mut R,
    ) -> Result<Connection> {
        let (rows, cols) = (pre.len(), post.len());
        let num = resolve_degree(self.name(), self.num, rows, "pre")?;
        let mut draws = uniform_matrix(rng, rows, cols);
        if !self.include_self {
            fill_diagonal(&mut draws, rows, cols, BEYOND_LAST_RANK);
        }
        let draws = draws.as_slice();
        let pairs = gather(cols, |col| {
            lowest_ranks(rows, num, |row| draws[row * cols + col])
                .into_iter()
                .map(|row| (row, col))
                .collect()
        });
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

impl Connector for FixedPreNum {
    fn name(&self) -> &'static str {
        "fixed_pre_num"
    }

    fn connect(&self, pre: &Population, post: &Population) -> Result<Connection> {
        self.connect_with_rng(pre, post, &mut invocation_rng(self.seed))
    }
}

/// Gives every pre neuron exactly `num` post partners.
///
/// The mirror image of [`FixedPreNum`]: for each pre neuron the post neurons
/// with the smallest draws in its row are chosen.
///
/// # Examples
/// ```
/// use sinew_core::{Connector, Degree, FixedPostNum, Population};
///
/// let rule = FixedPostNum::new(Degree::Fraction(0.5))?.with_include_self(false).with_seed(9);
/// let layer = Population::range(6);
/// let connection = rule.connect(&layer, &layer)?;
/// assert_eq!(connection.len(), 18);
/// assert!(connection.edges().all(|edge| edge.pre != edge.post));
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPostNum {
    num: Degree,
    include_self: bool,
    seed: Option<u64>,
}

impl FixedPostNum {
    /// Creates the rule for out-degree `num`.
    ///
    /// # Errors
    /// Returns [`ConnectError::InvalidDegree`] for fractions outside `[0, 1]`.
    pub fn new(num: impl Into<Degree>) -> Result<Self> {
        Ok(Self {
            num: num.into().validate("fixed_post_num")?,
            include_self: true,
            seed: None,
        })
    }

    /// Sets whether positional self-pairs may be chosen.
    #[must_use]
    pub const fn with_include_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    /// Seeds the random stream used by [`Connector::connect`].
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured out-degree.
    #[must_use]
    #[rustfmt::skip]
    pub const fn num(&self) -> Degree { self.num }

    /// Generates the connection using draws from `rng`.
    ///
    /// # Errors
    /// Returns [`ConnectError::InvalidDegree`] when the resolved degree
    /// exceeds the number of post neurons.
    #[expect(
        clippy::indexing_slicing,
        reason = "`row < rows` and `col < cols` address the drawn matrix"
    )]
    #[instrument(
        name = "connect.fixed_post_num",
        err,
        skip_all,
        fields(
            pre = %pre.shape(),
            post = %post.shape(),
            num = ?self.num,
            include_self = self.include_self,
        ),
    )]
    pub fn connect_with_rng<R: Rng + ?Sized>(
        &self,
        pre: &Population,
        post: &Population,
        rng: &mut R,
    ) -> Result<Connection> {
        let (rows, cols) = (pre.len(), post.len());
        let num = resolve_degree(self.name(), self.num, cols, "post")?;
        let mut draws = uniform_matrix(rng, rows, cols);
        if !self.include_self {
            fill_diagonal(&mut draws, rows, cols, BEYOND_LAST_RANK);
        }
        let draws = draws.as_slice();
        let pairs = gather(rows, |row| {
            lowest_ranks(cols, num, |col| draws[row * cols + col])
                .into_iter()
                .map(|col| (row, col))
                .collect()
        });
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

impl Connector for FixedPostNum {
    fn name(&self) -> &'static str {
        "fixed_post_num"
    }

    fn connect(&self, pre: &Population, post: &Population) -> Result<Connection> {
        self.connect_with_rng(pre, post, &mut invocation_rng(self.seed))
    }
}

fn resolve_degree(
    connector: &'static str,
    degree: Degree,
    available: usize,
    side: &str,
) -> Result<usize> {
    let num = degree.resolve(available);
    if num > available {
        return Err(ConnectError::InvalidDegree {
            connector,
            reason: format!("{num} exceeds the {available} {side} neurons"),
        });
    }
    Ok(num)
}

/// Returns the positions of the `num` smallest draws, smallest first.
///
/// Ties are broken by position so the selection is fully determined by the
/// draws.
fn lowest_ranks(len: usize, num: usize, draw: impl Fn(usize) -> f64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.sort_unstable_by(|&left, &right| {
        draw(left)
            .total_cmp(&draw(right))
            .then_with(|| left.cmp(&right))
    });
    order.truncate(num);
    order
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use super::*;

    fn in_degrees(connection: &Connection, posts: usize) -> Vec<usize> {
        (0..posts)
            .map(|post| connection.post_ids().iter().filter(|&&id| id == post).count())
            .collect()
    }

    #[rstest]
    #[case("3", Degree::Count(3))]
    #[case(" 0 ", Degree::Count(0))]
    #[case("0.75", Degree::Fraction(0.75))]
    #[case("1.0", Degree::Fraction(1.0))]
    fn parses_degrees(#[case] raw: &str, #[case] expected: Degree) {
        assert_eq!(raw.parse::<Degree>().expect("valid degree"), expected);
    }

    #[rstest]
    #[case("-2")]
    #[case("1.5")]
    fn rejects_out_of_range_degrees(#[case] raw: &str) {
        let err = raw.parse::<Degree>().expect_err("out of range");
        assert!(matches!(err, ConnectError::InvalidDegree { .. }));
    }

    #[test]
    fn rejects_untyped_degree() {
        let err = "ten".parse::<Degree>().expect_err("not numeric");
        assert!(matches!(err, ConnectError::InvalidParameterType { .. }));
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.01)]
    #[case(f64::NAN)]
    fn fixed_prob_rejects_invalid_probability(#[case] prob: f64) {
        assert!(matches!(
            FixedProb::new(prob),
            Err(ConnectError::InvalidParameter { name: "prob", .. })
        ));
    }

    #[test]
    fn fixed_prob_extremes() {
        let layer = Population::range(4);
        let none = FixedProb::new(0.0).expect("valid").with_seed(1);
        assert!(none.connect(&layer, &layer).expect("connects").is_empty());

        let all_but_self = FixedProb::new(1.0)
            .expect("valid")
            .with_include_self(false)
            .with_seed(1);
        let connection = all_but_self.connect(&layer, &layer).expect("connects");
        assert_eq!(connection.len(), 12);
        let matrix = connection.conn_mat().expect("fixed_prob keeps its matrix");
        assert_eq!(matrix.get(2, 2), Some(false));
        assert_eq!(matrix.get(2, 3), Some(true));
    }

    #[test]
    fn fixed_prob_matches_explicit_rng() {
        let layer = Population::range(8);
        let rule = FixedProb::new(0.4).expect("valid").with_seed(21);
        let seeded = rule.connect(&layer, &layer).expect("connects");
        let explicit = rule
            .connect_with_rng(&layer, &layer, &mut SmallRng::seed_from_u64(21))
            .expect("connects");
        assert_eq!(seeded, explicit);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    fn fixed_pre_num_fixes_in_degree(#[case] include_self: bool) {
        let rule = FixedPreNum::new(2)
            .expect("valid")
            .with_include_self(include_self);
        for seed in 0..8 {
            let connection = rule
                .connect_with_rng(
                    &Population::range(5),
                    &Population::range(4),
                    &mut SmallRng::seed_from_u64(seed),
                )
                .expect("degree fits");
            assert_eq!(in_degrees(&connection, 4), [2, 2, 2, 2]);
            if !include_self {
                assert!(connection.edges().all(|edge| edge.pre != edge.post));
            }
        }
    }

    #[test]
    fn fixed_pre_num_never_repeats_a_partner() {
        let connection = FixedPreNum::new(4)
            .expect("valid")
            .with_seed(5)
            .connect(&Population::range(6), &Population::range(3))
            .expect("degree fits");
        for post in 0..3 {
            let mut partners: Vec<_> = connection
                .edges()
                .filter(|edge| edge.post == post)
                .map(|edge| edge.pre)
                .collect();
            partners.sort_unstable();
            partners.dedup();
            assert_eq!(partners.len(), 4);
        }
    }

    #[test]
    fn fixed_pre_num_rejects_excess_degree() {
        let err = FixedPreNum::new(6)
            .expect("valid")
            .connect(&Population::range(5), &Population::range(5))
            .expect_err("6 > 5");
        assert!(matches!(err, ConnectError::InvalidDegree { .. }));
    }

    #[test]
    fn fixed_post_num_resolves_fraction_against_post() {
        let connection = FixedPostNum::new(0.5)
            .expect("valid")
            .with_seed(2)
            .connect(&Population::range(3), &Population::range(7))
            .expect("degree fits");
        // floor(0.5 * 7) = 3 partners for each of the three pre neurons.
        assert_eq!(connection.len(), 9);
        for pre in 0..3 {
            assert_eq!(connection.pre_ids().iter().filter(|&&id| id == pre).count(), 3);
        }
    }

    #[test]
    fn fixed_post_num_rejects_excess_degree() {
        let err = FixedPostNum::new(4)
            .expect("valid")
            .connect(&Population::range(8), &Population::range(3))
            .expect_err("4 > 3");
        assert!(matches!(err, ConnectError::InvalidDegree { .. }));
    }

    #[test]
    fn fractions_outside_unit_interval_fail_construction() {
        assert!(matches!(
            FixedPostNum::new(Degree::Fraction(2.0)),
            Err(ConnectError::InvalidDegree { .. })
        ));
    }

    #[test]
    fn lowest_ranks_orders_by_draw_then_position() {
        let draws = [0.5, 0.1, 0.5, 0.0];
        assert_eq!(lowest_ranks(4, 3, |i| draws[i]), [3, 1, 0]);
    }
}
