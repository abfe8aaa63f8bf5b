//! Distance-decay generators on planar populations.
//!
//! Every pre neuron is compared with every post neuron. The squared distance
//! between their (optionally normalised) grid coordinates feeds a decay
//! function, and pairs whose value clears the threshold become candidates.
//! Self-pairs are skipped by position before any value is computed.

use rand::{Rng, distributions::Standard};
use tracing::instrument;

use crate::{
    ConnectError, Connection, Lattice, Population, Result, rng::invocation_rng,
    squared_distance,
};

use super::{Connector, gather, map_ids, record};

/// Fraction of the peak amplitude used as the default pruning threshold.
const DEFAULT_THRESHOLD_RATIO: f64 = 0.01;

/// Gaussian kernel `exp(-distance / (2 sigma^2))` on a squared distance.
#[expect(clippy::float_arithmetic, reason = "Gaussian decay is floating-point")]
fn gaussian(distance: f64, sigma: f64) -> f64 {
    (-distance / (2.0 * sigma * sigma)).exp()
}

fn validate_sigma(connector: &'static str, name: &'static str, sigma: f64) -> Result<f64> {
    if sigma.is_finite() && sigma > 0.0 {
        Ok(sigma)
    } else {
        Err(ConnectError::InvalidParameter {
            connector,
            name,
            reason: format!("{sigma} must be finite and positive"),
        })
    }
}

/// Geometry shared by one decay invocation.
#[derive(Clone, Copy, Debug)]
struct Field {
    pre: Lattice,
    post: Lattice,
    normalize: bool,
    include_self: bool,
}

impl Field {
    fn resolve(
        connector: &'static str,
        pre: &Population,
        post: &Population,
        normalize: bool,
        include_self: bool,
    ) -> Result<Self> {
        Ok(Self {
            pre: pre.planar(connector)?,
            post: post.planar(connector)?,
            normalize,
            include_self,
        })
    }

    /// Returns every `(pre, post, value)` whose decay value is kept by
    /// `kernel`, grouped by pre neuron and ordered by post position.
    fn scan<F>(self, kernel: F) -> Vec<(usize, usize, f64)>
    where
        F: Fn(f64) -> Option<f64> + Sync + Send,
    {
        gather(self.pre.len(), |source| {
            let origin = self.pre.normalised_coords(source, self.normalize);
            (0..self.post.len())
                .filter(|&target| self.include_self || source != target)
                .filter_map(|target| {
                    let point = self.post.normalised_coords(target, self.normalize);
                    kernel(squared_distance(origin, point)).map(|value| (source, target, value))
                })
                .collect()
        })
    }
}

fn weighted_connection(
    pre: &Population,
    post: &Population,
    candidates: Vec<(usize, usize, f64)>,
) -> Connection {
    let (pairs, weights): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .map(|(source, target, weight)| ((source, target), weight))
        .unzip();
    let (pre_ids, post_ids) = map_ids(pre, post, pairs);
    Connection::new(
        pre_ids,
        post_ids,
        pre.inferred_size(),
        post.inferred_size(),
    )
    .with_weights(weights)
}

/// Weights decay with a Gaussian of the distance between neurons.
///
/// `w = w_max * exp(-d / (2 sigma^2))` where `d` is the squared distance.
/// Pairs with `w <= w_min` are pruned; `w_min` defaults to `0.01 * w_max`.
///
/// # Examples
/// ```
/// use sinew_core::{Connector, GaussianWeight, Population};
///
/// let point = Population::grid(1, 1);
/// let connection = GaussianWeight::new(1.0, 1.0)?.connect(&point, &point)?;
/// assert_eq!(connection.weights(), Some(&[1.0][..]));
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianWeight {
    sigma: f64,
    w_max: f64,
    w_min: Option<f64>,
    normalize: bool,
    include_self: bool,
}

impl GaussianWeight {
    /// Creates the rule with width `sigma` and peak weight `w_max`.
    ///
    /// # Errors
    /// Returns [`ConnectError::InvalidParameter`] when `sigma` is not a
    /// positive finite number.
    pub fn new(sigma: f64, w_max: f64) -> Result<Self> {
        Ok(Self {
            sigma: validate_sigma("gaussian_weight", "sigma", sigma)?,
            w_max,
            w_min: None,
            normalize: true,
            include_self: true,
        })
    }

    /// Overrides the pruning threshold.
    #[must_use]
    pub const fn with_w_min(mut self, w_min: f64) -> Self {
        self.w_min = Some(w_min);
        self
    }

    /// Sets whether coordinates are rescaled to `[0, 1]`.
    #[must_use]
    pub const fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Sets whether positional self-pairs are considered.
    #[must_use]
    pub const fn with_include_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    /// Returns the effective pruning threshold.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "the default threshold scales the peak weight")]
    pub fn w_min(&self) -> f64 {
        self.w_min
            .unwrap_or(self.w_max * DEFAULT_THRESHOLD_RATIO)
    }
}

impl Connector for GaussianWeight {
    fn name(&self) -> &'static str {
        "gaussian_weight"
    }

    #[expect(clippy::float_arithmetic, reason = "weights scale the decay kernel")]
    #[instrument(
        name = "connect.gaussian_weight",
        err,
        skip_all,
        fields(pre = %pre.shape(), post = %post.shape(), sigma = self.sigma, w_max = self.w_max),
    )]
    fn connect(&self, pre: &Population, post: &Population) -> Result<Connection> {
        let field = Field::resolve(self.name(), pre, post, self.normalize, self.include_self)?;
        let (sigma, w_max, w_min) = (self.sigma, self.w_max, self.w_min());
        let candidates = field.scan(|distance| {
            let weight = w_max * gaussian(distance, sigma);
            (weight > w_min).then_some(weight)
        });
        let connection = weighted_connection(pre, post, candidates);
        record(self.name(), &connection);
        Ok(connection)
    }
}

/// Connection probability decays with a Gaussian of the distance.
///
/// `p = exp(-d / (2 sigma^2))`. Pairs with `p <= p_min` are discarded
/// outright; every remaining pair is then kept with probability `p`, using
/// one uniform draw per candidate in emission order.
///
/// # Examples
/// ```
/// use sinew_core::{Connector, GaussianProb, Population};
///
/// let sheet = Population::grid(3, 3);
/// let rule = GaussianProb::new(0.3)?.with_seed(4);
/// let connection = rule.connect(&sheet, &sheet)?;
/// assert_eq!(connection, rule.connect(&sheet, &sheet)?);
/// assert!(connection.weights().is_none());
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GaussianProb {
    sigma: f64,
    p_min: f64,
    normalize: bool,
    include_self: bool,
    seed: Option<u64>,
}

impl GaussianProb {
    /// Creates the rule with width `sigma`.
    ///
    /// # Errors
    /// Returns [`ConnectError::InvalidParameter`] when `sigma` is not a
    /// positive finite number.
    pub fn new(sigma: f64) -> Result<Self> {
        Ok(Self {
            sigma: validate_sigma("gaussian_prob", "sigma", sigma)?,
            p_min: 0.0,
            normalize: true,
            include_self: true,
            seed: None,
        })
    }

    /// Sets the probability at or below which pairs are never tried.
    #[must_use]
    pub const fn with_p_min(mut self, p_min: f64) -> Self {
        self.p_min = p_min;
        self
    }

    /// Sets whether coordinates are rescaled to `[0, 1]`.
    #[must_use]
    pub const fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Sets whether positional self-pairs are considered.
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

    /// Generates the connection, drawing the Bernoulli trials from `rng`.
    ///
    /// # Errors
    /// Returns [`ConnectError::UnsupportedGeometry`] unless both populations
    /// are two-dimensional.
    #[instrument(
        name = "connect.gaussian_prob",
        err,
        skip_all,
        fields(pre = %pre.shape(), post = %post.shape(), sigma = self.sigma, p_min = self.p_min),
    )]
    pub fn connect_with_rng<R: Rng + ?Sized>(
        &self,
        pre: &Population,
        post: &Population,
        rng: &mut R,
    ) -> Result<Connection> {
        let field = Field::resolve(self.name(), pre, post, self.normalize, self.include_self)?;
        let (sigma, p_min) = (self.sigma, self.p_min);
        let candidates = field.scan(|distance| {
            let prob = gaussian(distance, sigma);
            (prob > p_min).then_some(prob)
        });
        let pairs: Vec<(usize, usize)> = candidates
            .into_iter()
            .filter(|&(_, _, prob)| rng.sample::<f64, _>(Standard) < prob)
            .map(|(source, target, _)| (source, target))
            .collect();
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

impl Connector for GaussianProb {
    fn name(&self) -> &'static str {
        "gaussian_prob"
    }

    fn connect(&self, pre: &Population, post: &Population) -> Result<Connection> {
        self.connect_with_rng(pre, post, &mut invocation_rng(self.seed))
    }
}

/// Difference-of-Gaussians weights: an excitatory centre with an inhibitory
/// surround.
///
/// `w = w_pos * exp(-d / (2 sigma_pos^2)) - w_neg * exp(-d / (2 sigma_neg^2))`.
/// Pairs with `|w| <= w_min` are pruned; `w_min` defaults to
/// `0.01 * |w_pos - w_neg|`. Weights keep their sign.
///
/// # Examples
/// ```
/// use sinew_core::{Connector, Dog, Population};
///
/// let sheet = Population::grid(2, 2);
/// let connection = Dog::new((0.5, 1.0), (1.0, 1.0))?.connect(&sheet, &sheet)?;
/// // Balanced amplitudes cancel at distance zero, so self-pairs vanish.
/// assert_eq!(connection.len(), 12);
/// assert!(connection.weights().is_some_and(|w| w.iter().all(|&v| v < 0.0)));
/// # Ok::<(), sinew_core::ConnectError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dog {
    sigmas: (f64, f64),
    ws_max: (f64, f64),
    w_min: Option<f64>,
    normalize: bool,
    include_self: bool,
}

impl Dog {
    /// Creates the rule from `(positive, negative)` widths and amplitudes.
    ///
    /// # Errors
    /// Returns [`ConnectError::InvalidParameter`] when either width is not a
    /// positive finite number.
    pub fn new(sigmas: (f64, f64), ws_max: (f64, f64)) -> Result<Self> {
        Ok(Self {
            sigmas: (
                validate_sigma("dog", "sigma_pos", sigmas.0)?,
                validate_sigma("dog", "sigma_neg", sigmas.1)?,
            ),
            ws_max,
            w_min: None,
            normalize: true,
            include_self: true,
        })
    }

    /// Overrides the pruning threshold on `|w|`.
    #[must_use]
    pub const fn with_w_min(mut self, w_min: f64) -> Self {
        self.w_min = Some(w_min);
        self
    }

    /// Sets whether coordinates are rescaled to `[0, 1]`.
    #[must_use]
    pub const fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Sets whether positional self-pairs are considered.
    #[must_use]
    pub const fn with_include_self(mut self, include_self: bool) -> Self {
        self.include_self = include_self;
        self
    }

    /// Returns the effective pruning threshold.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "the default threshold scales the peak weight")]
    pub fn w_min(&self) -> f64 {
        self.w_min
            .unwrap_or_else(|| (self.ws_max.0 - self.ws_max.1).abs() * DEFAULT_THRESHOLD_RATIO)
    }
}

impl Connector for Dog {
    fn name(&self) -> &'static str {
        "dog"
    }

    #[expect(clippy::float_arithmetic, reason = "weights scale the decay kernel")]
    #[instrument(
        name = "connect.dog",
        err,
        skip_all,
        fields(
            pre = %pre.shape(),
            post = %post.shape(),
            sigma_pos = self.sigmas.0,
            sigma_neg = self.sigmas.1,
        ),
    )]
    fn connect(&self, pre: &Population, post: &Population) -> Result<Connection> {
        let field = Field::resolve(self.name(), pre, post, self.normalize, self.include_self)?;
        let ((sigma_pos, sigma_neg), (w_pos, w_neg)) = (self.sigmas, self.ws_max);
        let w_min = self.w_min();
        let candidates = field.scan(|distance| {
            let weight =
                w_pos * gaussian(distance, sigma_pos) - w_neg * gaussian(distance, sigma_neg);
            (weight.abs() > w_min).then_some(weight)
        });
        let connection = weighted_connection(pre, post, candidates);
        record(self.name(), &connection);
        Ok(connection)
    }
}
