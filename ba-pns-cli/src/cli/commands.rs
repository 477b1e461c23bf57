//! Argument parsing and the `run` command.

use std::io::{self, Write};
use std::num::NonZeroUsize;

use ba_pns_core::{
    DEFAULT_MAX_ATTEMPTS, EdgeGrowthEngine, Ensemble, EstimationErrorCode, GrowthConfig,
    GrowthError, GrowthSummary, NetworkExponents, PowerLawFit, Topology,
};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_NODES: usize = 1_000;
const DEFAULT_SEED_NODES: usize = 3;
const DEFAULT_EDGES_PER_NODE: usize = 2;

/// Top-level options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "ba-pns",
    about = "Grow preferential-attachment payment networks and measure their exponents."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Grow one or more networks and report their power-law exponents.
    Run(RunCommand),
}

/// Options shared by every topology.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Final number of nodes.
    #[arg(long, default_value_t = DEFAULT_NODES)]
    pub nodes: usize,

    /// Size of the complete seed graph.
    #[arg(long = "seed-nodes", default_value_t = DEFAULT_SEED_NODES)]
    pub seed_nodes: usize,

    /// Seed of the random source; runs derive their own seeds from it.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of independent realisations.
    #[arg(long, default_value = "1")]
    pub runs: NonZeroUsize,

    /// Proposals allowed per edge before growth reports saturation.
    #[arg(long = "max-attempts", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Skip transaction amounts.
    #[arg(long = "no-amounts")]
    pub no_amounts: bool,

    /// Topology and per-step quotas.
    #[command(subcommand)]
    pub topology: TopologyArgs,
}

/// Topology-specific quotas.
#[derive(Debug, Subcommand, Clone)]
pub enum TopologyArgs {
    /// Directed growth with separate incoming and outgoing quotas.
    Directed(DirectedArgs),
    /// Undirected growth.
    Undirected(UndirectedArgs),
}

/// Quotas for directed growth.
#[derive(Debug, Args, Clone)]
pub struct DirectedArgs {
    /// Edges each new node receives from existing nodes.
    #[arg(long = "m-in", default_value_t = DEFAULT_EDGES_PER_NODE)]
    pub m_in: usize,

    /// Edges each new node sends to existing nodes.
    #[arg(long = "m-out", default_value_t = DEFAULT_EDGES_PER_NODE)]
    pub m_out: usize,

    /// Swap the two quotas with probability one half on every step.
    #[arg(long = "variable-edges")]
    pub variable_edges: bool,
}

/// Quotas for undirected growth.
#[derive(Debug, Args, Clone)]
pub struct UndirectedArgs {
    /// Links each new node attaches.
    #[arg(long = "edges-per-node", default_value_t = DEFAULT_EDGES_PER_NODE)]
    pub edges_per_node: usize,
}

/// Errors surfaced while executing commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuring or growing the network failed.
    #[error(transparent)]
    Growth(#[from] GrowthError),
}

/// Fits of one sequence gathered across runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceSummary {
    /// Sequence label, such as `in_degree`.
    pub label: &'static str,
    /// Successful fits, in run order.
    pub fits: Vec<PowerLawFit>,
    /// Codes of the runs whose fit failed.
    pub failures: Vec<EstimationErrorCode>,
}

impl SequenceSummary {
    /// Mean exponent over the successful fits.
    #[must_use]
    pub fn mean_alpha(&self) -> Option<f64> {
        if self.fits.is_empty() {
            return None;
        }
        let total: f64 = self.fits.iter().map(|fit| fit.alpha).sum();
        Some(total / self.fits.len() as f64)
    }
}

/// Outcome of the `run` command.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Orientation of the grown networks.
    pub topology: Topology,
    /// Number of realisations.
    pub runs: usize,
    /// Nodes per network.
    pub nodes: usize,
    /// Edges per network.
    pub edges: usize,
    /// Duplicate proposals summed over all runs.
    pub duplicate_proposals: usize,
    /// Uniform fallback draws summed over all runs.
    pub uniform_draws: usize,
    /// Exponent fits per sequence.
    pub sequences: Vec<SequenceSummary>,
}

/// Executes the command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when the configuration is rejected or growth fails.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
///
/// use ba_pns_cli::cli::{Cli, Command, RunCommand, TopologyArgs, UndirectedArgs, run_cli};
///
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         nodes: 200,
///         seed_nodes: 3,
///         seed: Some(1),
///         runs: NonZeroUsize::MIN,
///         max_attempts: 64,
///         no_amounts: true,
///         topology: TopologyArgs::Undirected(UndirectedArgs { edges_per_node: 2 }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.nodes, 200);
/// assert_eq!(summary.edges, 3 + 197 * 2);
/// # Ok::<(), ba_pns_cli::cli::CliError>(())
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<RunSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(nodes = command.nodes, runs = command.runs.get(), topology = field::Empty),
)]
pub(super) fn run_command(command: RunCommand) -> Result<RunSummary, CliError> {
    let config = build_config(&command)?;
    Span::current().record("topology", field::debug(config.topology()));

    let outcomes = Ensemble::new(config.clone(), command.runs.get())
        .run(|engine: &EdgeGrowthEngine| (engine.summary(), NetworkExponents::measure(engine)))?;
    let summary = summarise(&config, &outcomes);

    info!(
        runs = summary.runs,
        nodes = summary.nodes,
        edges = summary.edges,
        "command completed"
    );
    Ok(summary)
}

pub(super) fn build_config(command: &RunCommand) -> Result<GrowthConfig, GrowthError> {
    let config = match &command.topology {
        TopologyArgs::Directed(args) => {
            GrowthConfig::directed(command.nodes, command.seed_nodes, args.m_in, args.m_out)?
                .with_variable_edges(args.variable_edges)?
        }
        TopologyArgs::Undirected(args) => {
            GrowthConfig::undirected(command.nodes, command.seed_nodes, args.edges_per_node)?
        }
    };
    let config = config
        .with_amounts(!command.no_amounts)
        .with_max_attempts(command.max_attempts)?;
    Ok(match command.seed {
        Some(seed) => config.with_rng_seed(seed),
        None => config,
    })
}

fn summarise(config: &GrowthConfig, outcomes: &[(GrowthSummary, NetworkExponents)]) -> RunSummary {
    let mut sequences: Vec<SequenceSummary> = Vec::new();
    for (_, exponents) in outcomes {
        for (label, outcome) in exponents.outcomes() {
            let position = match sequences.iter().position(|entry| entry.label == label) {
                Some(position) => position,
                None => {
                    sequences.push(SequenceSummary {
                        label,
                        fits: Vec::new(),
                        failures: Vec::new(),
                    });
                    sequences.len() - 1
                }
            };
            let entry = &mut sequences[position];
            match outcome {
                Ok(fit) => entry.fits.push(*fit),
                Err(error) => entry.failures.push(error.code()),
            }
        }
    }

    let (nodes, edges) = outcomes
        .first()
        .map_or((config.nodes(), config.expected_edge_count()), |(growth, _)| {
            (growth.nodes, growth.edges)
        });
    RunSummary {
        topology: config.topology(),
        runs: outcomes.len(),
        nodes,
        edges,
        duplicate_proposals: outcomes.iter().map(|(growth, _)| growth.duplicate_proposals).sum(),
        uniform_draws: outcomes.iter().map(|(growth, _)| growth.uniform_draws).sum(),
        sequences,
    }
}

/// Renders `summary` as human-readable text.
///
/// A single run prints the full fit of every sequence; several runs print the
/// mean exponent and how many runs produced a fit.
///
/// # Errors
/// Returns [`io::Error`] if writing fails.
pub fn render_summary(summary: &RunSummary, mut writer: impl Write) -> io::Result<()> {
    let topology = match summary.topology {
        Topology::Directed => "directed",
        Topology::Undirected => "undirected",
    };
    writeln!(writer, "topology: {topology}")?;
    writeln!(writer, "runs: {}", summary.runs)?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "edges: {}", summary.edges)?;
    writeln!(writer, "duplicate proposals: {}", summary.duplicate_proposals)?;
    writeln!(writer, "uniform draws: {}", summary.uniform_draws)?;

    for sequence in &summary.sequences {
        match (sequence.fits.as_slice(), sequence.mean_alpha()) {
            ([fit], _) if summary.runs == 1 => writeln!(
                writer,
                "{}: alpha={:.3} ± {:.3} (xmin={}, tail={}, ks={:.4})",
                sequence.label, fit.alpha, fit.std_error, fit.xmin, fit.tail_len, fit.ks_distance
            )?,
            (_, Some(mean)) => writeln!(
                writer,
                "{}: mean alpha={mean:.3} ({}/{} runs fitted)",
                sequence.label,
                sequence.fits.len(),
                summary.runs
            )?,
            (_, None) => {
                let codes: Vec<&str> = sequence.failures.iter().map(|code| code.as_str()).collect();
                writeln!(writer, "{}: not estimated ({})", sequence.label, codes.join(", "))?;
            }
        }
    }
    Ok(())
}
