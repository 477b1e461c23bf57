//! Preferential-attachment growth engine.
//!
//! The engine owns one [`GraphState`], the optional [`AmountMatrix`] and the
//! random source of a single run. It moves through
//! [`GrowthPhase::Seeded`] -> [`GrowthPhase::Growing`] ->
//! [`GrowthPhase::Complete`] exactly once; the growth loop is sequential
//! because every draw depends on the degrees produced by all earlier draws.

mod attach;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{info, instrument};

use crate::{
    Result,
    amount::{AmountMatrix, AmountSampler},
    config::{EdgeQuota, GrowthConfig},
    error::GrowthError,
    graph::GraphState,
    sampler::PreferentialAttachmentSampler,
};

pub use self::attach::Attachment;

/// Lifecycle of an [`EdgeGrowthEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrowthPhase {
    /// Only the complete seed graph exists.
    Seeded,
    /// Nodes are being added.
    Growing,
    /// The target node count was reached.
    Complete,
}

/// Counters describing a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GrowthSummary {
    /// Final node count.
    pub nodes: usize,
    /// Final edge count.
    pub edges: usize,
    /// Proposals rejected because the edge already existed.
    pub duplicate_proposals: usize,
    /// Draws served by the uniform fallback.
    pub uniform_draws: usize,
}

/// Grows a scale-free network by preferential attachment.
///
/// # Examples
/// ```
/// use ba_pns_core::{EdgeGrowthEngine, GrowthConfig, GrowthPhase};
///
/// let config = GrowthConfig::directed(10, 3, 2, 2)?.with_rng_seed(7);
/// let mut engine = EdgeGrowthEngine::new(config)?;
/// assert_eq!(engine.phase(), GrowthPhase::Seeded);
///
/// let summary = engine.generate()?;
/// assert_eq!(summary.nodes, 10);
/// assert_eq!(summary.edges, 34);
/// assert_eq!(engine.phase(), GrowthPhase::Complete);
/// assert!(engine.edges().iter().all(|&(source, target)| source != target));
/// # Ok::<(), ba_pns_core::GrowthError>(())
/// ```
#[derive(Debug)]
pub struct EdgeGrowthEngine<R = SmallRng> {
    config: GrowthConfig,
    graph: GraphState,
    amounts: Option<AmountMatrix>,
    amount_sampler: Option<AmountSampler>,
    sampler: PreferentialAttachmentSampler,
    rng: R,
    phase: GrowthPhase,
    duplicate_proposals: usize,
    uniform_draws: usize,
}

impl EdgeGrowthEngine<SmallRng> {
    /// Creates an engine whose random source is seeded from
    /// [`GrowthConfig::rng_seed`].
    ///
    /// # Errors
    /// Returns [`GrowthError::Amount`] when the configured amount model is
    /// rejected.
    pub fn new(config: GrowthConfig) -> Result<Self> {
        let rng = SmallRng::seed_from_u64(config.rng_seed());
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> EdgeGrowthEngine<R> {
    /// Creates an engine drawing from a caller-supplied random source.
    ///
    /// The complete seed graph is built immediately. When amounts are tracked
    /// the seed edges receive amounts measured on the complete seed.
    ///
    /// # Errors
    /// Returns [`GrowthError::Amount`] when the configured amount model is
    /// rejected.
    pub fn with_rng(config: GrowthConfig, mut rng: R) -> Result<Self> {
        let amount_sampler = config
            .track_amounts()
            .then(|| AmountSampler::new(config.amount_model()))
            .transpose()?;
        let graph = GraphState::complete(config.topology(), config.seed_nodes())?;

        let amounts = match &amount_sampler {
            Some(sampler) => {
                let mut amounts = AmountMatrix::new();
                for &(source, target) in graph.edges() {
                    let amount = sampler.sample(&graph, source, target, &mut rng);
                    amounts.record(source, target, amount)?;
                }
                Some(amounts)
            }
            None => None,
        };

        info!(
            seed_nodes = graph.node_count(),
            seed_edges = graph.edge_count(),
            topology = ?graph.topology(),
            "seed graph created"
        );

        Ok(Self {
            config,
            graph,
            amounts,
            amount_sampler,
            sampler: PreferentialAttachmentSampler::new(),
            rng,
            phase: GrowthPhase::Seeded,
            duplicate_proposals: 0,
            uniform_draws: 0,
        })
    }

    /// Runs the growth loop until the configured node count is reached.
    ///
    /// The loop always performs exactly `n - m0` steps; duplicate proposals
    /// only affect how many draws each edge costs.
    ///
    /// # Errors
    /// Returns [`GrowthError::AlreadyGenerated`] unless the engine is still
    /// [`GrowthPhase::Seeded`], and [`GrowthError::Saturated`] or
    /// [`GrowthError::EmptyCandidatePool`] when an edge cannot be placed.
    #[instrument(
        name = "growth.generate",
        err,
        skip(self),
        fields(
            nodes = self.config.nodes(),
            seed_nodes = self.config.seed_nodes(),
            topology = ?self.config.topology(),
            variable_edges = self.config.variable_edges(),
        ),
    )]
    pub fn generate(&mut self) -> Result<GrowthSummary> {
        if self.phase != GrowthPhase::Seeded {
            return Err(GrowthError::AlreadyGenerated);
        }
        self.phase = GrowthPhase::Growing;

        let first = self.config.seed_nodes();
        for node in first..self.config.nodes() {
            self.grow_node(node)?;
        }

        self.phase = GrowthPhase::Complete;
        let summary = self.summary();
        info!(
            nodes = summary.nodes,
            edges = summary.edges,
            duplicate_proposals = summary.duplicate_proposals,
            uniform_draws = summary.uniform_draws,
            "final number of nodes reached"
        );
        Ok(summary)
    }

    #[instrument(level = "debug", name = "growth.step", skip(self), fields(node = node))]
    fn grow_node(&mut self, node: usize) -> Result<()> {
        self.graph.add_node(node)?;
        match self.config.quota() {
            EdgeQuota::Directed { incoming, outgoing } => {
                let (incoming, outgoing) =
                    if self.config.variable_edges() && self.rng.gen_bool(0.5) {
                        (outgoing, incoming)
                    } else {
                        (incoming, outgoing)
                    };
                for _ in 0..incoming {
                    self.attach(node, Attachment::Incoming)?;
                }
                for _ in 0..outgoing {
                    self.attach(node, Attachment::Outgoing)?;
                }
            }
            EdgeQuota::Undirected { edges } => {
                for _ in 0..edges {
                    self.attach(node, Attachment::Undirected)?;
                }
            }
        }
        Ok(())
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> GrowthPhase {
        self.phase
    }

    /// Configuration driving this run.
    #[must_use]
    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// The grown graph.
    #[must_use]
    pub fn graph(&self) -> &GraphState {
        &self.graph
    }

    /// Recorded amounts, when amount tracking is enabled.
    #[must_use]
    pub fn amounts(&self) -> Option<&AmountMatrix> {
        self.amounts.as_ref()
    }

    /// Counters accumulated so far.
    #[must_use]
    pub fn summary(&self) -> GrowthSummary {
        GrowthSummary {
            nodes: self.graph.node_count(),
            edges: self.graph.edge_count(),
            duplicate_proposals: self.duplicate_proposals,
            uniform_draws: self.uniform_draws,
        }
    }

    /// Node identifiers in creation order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = usize> + use<R> {
        self.graph.nodes()
    }

    /// Edges in commit order.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        self.graph.edges()
    }

    /// In-degree of `node`.
    #[must_use]
    pub fn in_degree(&self, node: usize) -> usize {
        self.graph.in_degree(node)
    }

    /// Out-degree of `node`.
    #[must_use]
    pub fn out_degree(&self, node: usize) -> usize {
        self.graph.out_degree(node)
    }

    /// Total degree of `node`.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.graph.degree(node)
    }

    /// Per-node `(incoming_total, outgoing_total)` amount sums, or `None` when
    /// amounts are not tracked. Both totals are equal on undirected graphs.
    #[must_use]
    pub fn node_amount_totals(&self) -> Option<Vec<(f64, f64)>> {
        self.amounts
            .as_ref()
            .map(|amounts| amounts.node_totals(self.graph.topology(), self.graph.node_count()))
    }

    /// Consumes the engine, returning the graph and the amounts.
    #[must_use]
    pub fn into_parts(self) -> (GraphState, Option<AmountMatrix>) {
        (self.graph, self.amounts)
    }
}
