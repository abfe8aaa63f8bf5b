use std::io::{self, Write};

use clap::{Args, Parser, Subcommand, ValueEnum};
use sinew_core::{
    All2All, ConnectError, Connection, Connector, Degree, Dog, FixedPostNum, FixedPreNum,
    FixedProb, GaussianProb, GaussianWeight, GridEight, GridFour, GridN, One2One,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

use super::shape::PopulationShape;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "sinew", about = "Generate connectivity between neuron populations.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run one generator and print its edges.
    #[command(subcommand)]
    Generate(Generator),
}

/// Generators selectable from the command line.
#[derive(Debug, Subcommand, Clone)]
pub enum Generator {
    /// Pair neurons by position.
    #[command(name = "one2one")]
    One2One(CommonArgs),
    /// Connect every pre neuron to every post neuron.
    #[command(name = "all2all")]
    All2All(SelfPolicyArgs),
    /// Four-neighbour lattice adjacency.
    GridFour(SelfPolicyArgs),
    /// Eight-neighbour lattice adjacency.
    GridEight(SelfPolicyArgs),
    /// Square-neighbourhood lattice adjacency of radius `n`.
    GridN(GridNArgs),
    /// Independent connection with a fixed probability.
    FixedProb(FixedProbArgs),
    /// Fixed number of pre partners per post neuron.
    FixedPreNum(DegreeArgs),
    /// Fixed number of post partners per pre neuron.
    FixedPostNum(DegreeArgs),
    /// Gaussian distance-decaying weights.
    GaussianWeight(GaussianWeightArgs),
    /// Gaussian distance-decaying connection probability.
    GaussianProb(GaussianProbArgs),
    /// Difference-of-Gaussians weights.
    Dog(DogArgs),
}

/// Options shared by every generator.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Pre population shape, `N` or `HxW`.
    #[arg(long)]
    pub pre: PopulationShape,

    /// Post population shape; defaults to the pre shape.
    #[arg(long)]
    pub post: Option<PopulationShape>,

    /// Output layout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Tsv)]
    pub format: OutputFormat,
}

/// Options for generators with a self-connection policy.
#[derive(Debug, Args, Clone)]
pub struct SelfPolicyArgs {
    /// Populations and output layout.
    #[command(flatten)]
    pub common: CommonArgs,

    /// Keep (or with `false`, drop) self-pairs. Defaults per generator.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub include_self: Option<bool>,
}

impl SelfPolicyArgs {
    const fn include_self_or(&self, default: bool) -> bool {
        match self.include_self {
            Some(include_self) => include_self,
            None => default,
        }
    }
}

/// Options for `grid-n`.
#[derive(Debug, Args, Clone)]
pub struct GridNArgs {
    /// Populations, output layout and self-pair policy.
    #[command(flatten)]
    pub policy: SelfPolicyArgs,

    /// Neighbourhood radius.
    #[arg(long, default_value_t = 1)]
    pub n: usize,
}

/// Options for `fixed-prob`.
#[derive(Debug, Args, Clone)]
pub struct FixedProbArgs {
    /// Populations, output layout and self-pair policy.
    #[command(flatten)]
    pub policy: SelfPolicyArgs,

    /// Connection probability in `[0, 1]`.
    #[arg(long)]
    pub prob: f64,

    /// Seed for the random draws; entropy-seeded when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Options for the fixed-degree generators.
#[derive(Debug, Args, Clone)]
pub struct DegreeArgs {
    /// Populations, output layout and self-pair policy.
    #[command(flatten)]
    pub policy: SelfPolicyArgs,

    /// Degree as an integer count or a fraction in `[0, 1]`.
    #[arg(long)]
    pub num: Degree,

    /// Seed for the random draws; entropy-seeded when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Options for `gaussian-weight`.
#[derive(Debug, Args, Clone)]
pub struct GaussianWeightArgs {
    /// Populations, output layout and self-pair policy.
    #[command(flatten)]
    pub policy: SelfPolicyArgs,

    /// Width of the Gaussian.
    #[arg(long)]
    pub sigma: f64,

    /// Peak weight.
    #[arg(long)]
    pub w_max: f64,

    /// Pruning threshold; defaults to `0.01 * w_max`.
    #[arg(long)]
    pub w_min: Option<f64>,

    /// Use raw grid coordinates instead of `[0, 1]`-normalised ones.
    #[arg(long)]
    pub raw_coords: bool,
}

/// Options for `gaussian-prob`.
#[derive(Debug, Args, Clone)]
pub struct GaussianProbArgs {
    /// Populations, output layout and self-pair policy.
    #[command(flatten)]
    pub policy: SelfPolicyArgs,

    /// Width of the Gaussian.
    #[arg(long)]
    pub sigma: f64,

    /// Probability at or below which pairs are never tried.
    #[arg(long, default_value_t = 0.0)]
    pub p_min: f64,

    /// Use raw grid coordinates instead of `[0, 1]`-normalised ones.
    #[arg(long)]
    pub raw_coords: bool,

    /// Seed for the Bernoulli draws; entropy-seeded when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Options for `dog`.
#[derive(Debug, Args, Clone)]
pub struct DogArgs {
    /// Populations, output layout and self-pair policy.
    #[command(flatten)]
    pub policy: SelfPolicyArgs,

    /// Width of the excitatory Gaussian.
    #[arg(long)]
    pub sigma_pos: f64,

    /// Width of the inhibitory Gaussian.
    #[arg(long)]
    pub sigma_neg: f64,

    /// Amplitude of the excitatory Gaussian.
    #[arg(long)]
    pub w_pos: f64,

    /// Amplitude of the inhibitory Gaussian.
    #[arg(long)]
    pub w_neg: f64,

    /// Pruning threshold on `|w|`; defaults to `0.01 * |w_pos - w_neg|`.
    #[arg(long)]
    pub w_min: Option<f64>,

    /// Use raw grid coordinates instead of `[0, 1]`-normalised ones.
    #[arg(long)]
    pub raw_coords: bool,
}

/// Rendering applied to a generated connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated edge list with size headers.
    Tsv,
    /// One `key: value` line per statistic.
    Summary,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The generator rejected its parameters or populations.
    #[error(transparent)]
    Core(#[from] ConnectError),
}

/// Outcome of a `generate` command.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Name of the generator that ran.
    pub connector: &'static str,
    /// Generated edges.
    pub connection: Connection,
    /// Requested output layout.
    pub format: OutputFormat,
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the generator rejects its configuration.
///
/// # Examples
/// ```
/// use clap::Parser;
/// use sinew_cli::cli::{Cli, run_cli};
///
/// let cli = Cli::try_parse_from(["sinew", "generate", "grid-four", "--pre", "3x3"])?;
/// let report = run_cli(cli)?;
/// assert_eq!(report.connector, "grid_four");
/// assert_eq!(report.connection.len(), 24);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<GenerationReport, CliError> {
    match cli.command {
        Command::Generate(generator) => {
            Span::current().record("command", field::display("generate"));
            generate(generator)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(generator),
    fields(connector = field::Empty, pre = field::Empty, post = field::Empty),
)]
pub(super) fn generate(generator: Generator) -> Result<GenerationReport, CliError> {
    let (rule, common) = build(generator)?;
    let pre_shape = common.pre;
    let post_shape = common.post.unwrap_or(pre_shape);

    let span = Span::current();
    span.record("connector", field::display(rule.name()));
    span.record("pre", field::display(pre_shape));
    span.record("post", field::display(post_shape));

    let connection = rule.connect(&pre_shape.to_population(), &post_shape.to_population())?;
    info!(
        connector = rule.name(),
        edges = connection.len(),
        weighted = connection.weights().is_some(),
        "generation completed"
    );
    Ok(GenerationReport {
        connector: rule.name(),
        connection,
        format: common.format,
    })
}

/// Resolves the generator, applying per-generator defaults for options the
/// user left unset.
fn build(generator: Generator) -> Result<(Box<dyn Connector>, CommonArgs), CliError> {
    let built: (Box<dyn Connector>, CommonArgs) = match generator {
        Generator::One2One(common) => (Box::new(One2One), common),
        Generator::All2All(policy) => {
            let rule = All2All::new(policy.include_self_or(true));
            (Box::new(rule), policy.common)
        }
        Generator::GridFour(policy) => {
            let rule = GridFour::new(policy.include_self_or(false));
            (Box::new(rule), policy.common)
        }
        Generator::GridEight(policy) => {
            let rule = GridEight::new(policy.include_self_or(false));
            (Box::new(rule), policy.common)
        }
        Generator::GridN(GridNArgs { policy, n }) => {
            let rule = GridN::new(n, policy.include_self_or(false));
            (Box::new(rule), policy.common)
        }
        Generator::FixedProb(FixedProbArgs { policy, prob, seed }) => {
            let mut rule = FixedProb::new(prob)?.with_include_self(policy.include_self_or(true));
            if let Some(seed) = seed {
                rule = rule.with_seed(seed);
            }
            (Box::new(rule), policy.common)
        }
        Generator::FixedPreNum(DegreeArgs { policy, num, seed }) => {
            let mut rule = FixedPreNum::new(num)?.with_include_self(policy.include_self_or(true));
            if let Some(seed) = seed {
                rule = rule.with_seed(seed);
            }
            (Box::new(rule), policy.common)
        }
        Generator::FixedPostNum(DegreeArgs { policy, num, seed }) => {
            let mut rule = FixedPostNum::new(num)?.with_include_self(policy.include_self_or(true));
            if let Some(seed) = seed {
                rule = rule.with_seed(seed);
            }
            (Box::new(rule), policy.common)
        }
        Generator::GaussianWeight(args) => {
            let mut rule = GaussianWeight::new(args.sigma, args.w_max)?
                .with_normalize(!args.raw_coords)
                .with_include_self(args.policy.include_self_or(true));
            if let Some(w_min) = args.w_min {
                rule = rule.with_w_min(w_min);
            }
            (Box::new(rule), args.policy.common)
        }
        Generator::GaussianProb(args) => {
            let mut rule = GaussianProb::new(args.sigma)?
                .with_p_min(args.p_min)
                .with_normalize(!args.raw_coords)
                .with_include_self(args.policy.include_self_or(true));
            if let Some(seed) = args.seed {
                rule = rule.with_seed(seed);
            }
            (Box::new(rule), args.policy.common)
        }
        Generator::Dog(args) => {
            let mut rule = Dog::new((args.sigma_pos, args.sigma_neg), (args.w_pos, args.w_neg))?
                .with_normalize(!args.raw_coords)
                .with_include_self(args.policy.include_self_or(true));
            if let Some(w_min) = args.w_min {
                rule = rule.with_w_min(w_min);
            }
            (Box::new(rule), args.policy.common)
        }
    };
    Ok(built)
}

/// Renders `report` to `writer` in its requested format.
///
/// The TSV layout starts with `# num_pre` and `# num_post` header lines,
/// followed by one `pre\tpost` row per edge, with a third `weight` column
/// for weighted generators.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_report(report: &GenerationReport, mut writer: impl Write) -> io::Result<()> {
    let connection = &report.connection;
    match report.format {
        OutputFormat::Tsv => {
            writeln!(writer, "# num_pre\t{}", connection.num_pre())?;
            writeln!(writer, "# num_post\t{}", connection.num_post())?;
            for edge in connection.edges() {
                match edge.weight {
                    Some(weight) => writeln!(writer, "{}\t{}\t{weight}", edge.pre, edge.post)?,
                    None => writeln!(writer, "{}\t{}", edge.pre, edge.post)?,
                }
            }
        }
        OutputFormat::Summary => {
            writeln!(writer, "connector: {}", report.connector)?;
            writeln!(writer, "edges: {}", connection.len())?;
            writeln!(writer, "num_pre: {}", connection.num_pre())?;
            writeln!(writer, "num_post: {}", connection.num_post())?;
            writeln!(writer, "weighted: {}", connection.weights().is_some())?;
        }
    }
    Ok(())
}
