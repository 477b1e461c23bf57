//! Growth configuration and its validation.
//!
//! A [`GrowthConfig`] is validated once, when it is built, so an
//! [`crate::EdgeGrowthEngine`] never starts mutating a graph it cannot finish
//! for configuration reasons.

use crate::{
    Result,
    amount::AmountModel,
    error::GrowthError,
    graph::Topology,
};

/// Default budget of proposals per committed edge before reporting saturation.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1024;

/// Default seed for the engine's random source.
pub const DEFAULT_RNG_SEED: u64 = 0x5EED_CAFE;

/// Number of edges a freshly added node attaches in each direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeQuota {
    /// Directed growth: `incoming` edges from existing nodes, then `outgoing`
    /// edges to existing nodes.
    Directed {
        /// Edges received by the new node per step (`m_in`).
        incoming: usize,
        /// Edges initiated by the new node per step (`m_out`).
        outgoing: usize,
    },
    /// Undirected growth: `edges` links per step (`m`).
    Undirected {
        /// Edges attached per step.
        edges: usize,
    },
}

impl EdgeQuota {
    /// Orientation of the graph grown under this quota.
    #[must_use]
    pub const fn topology(self) -> Topology {
        match self {
            Self::Directed { .. } => Topology::Directed,
            Self::Undirected { .. } => Topology::Undirected,
        }
    }

    /// Edges committed per growth step.
    #[must_use]
    pub const fn edges_per_step(self) -> usize {
        match self {
            Self::Directed { incoming, outgoing } => incoming + outgoing,
            Self::Undirected { edges } => edges,
        }
    }

    /// The larger of the per-step quotas; the seed must hold at least this
    /// many nodes.
    #[must_use]
    pub const fn widest(self) -> usize {
        match self {
            Self::Directed { incoming, outgoing } => {
                if incoming > outgoing {
                    incoming
                } else {
                    outgoing
                }
            }
            Self::Undirected { edges } => edges,
        }
    }
}

/// Validated parameters of one growth run.
///
/// # Examples
/// ```
/// use ba_pns_core::GrowthConfig;
///
/// let config = GrowthConfig::directed(100, 3, 2, 2)?
///     .with_variable_edges(true)?
///     .with_rng_seed(42);
/// assert_eq!(config.nodes(), 100);
/// assert_eq!(config.expected_edge_count(), 3 * 2 + 97 * 4);
///
/// assert!(GrowthConfig::directed(10, 1, 2, 0).is_err());
/// # Ok::<(), ba_pns_core::GrowthError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthConfig {
    nodes: usize,
    seed_nodes: usize,
    quota: EdgeQuota,
    variable_edges: bool,
    track_amounts: bool,
    amount_model: AmountModel,
    max_attempts: usize,
    rng_seed: u64,
}

impl GrowthConfig {
    /// Configures directed growth to `nodes` nodes from a complete seed of
    /// `seed_nodes`, attaching `incoming` and `outgoing` edges per step.
    ///
    /// # Errors
    /// Returns [`GrowthError::InvalidConfig`] when
    /// `seed_nodes < max(incoming, outgoing)` or `nodes < seed_nodes`.
    pub fn directed(
        nodes: usize,
        seed_nodes: usize,
        incoming: usize,
        outgoing: usize,
    ) -> Result<Self> {
        Self::with_quota(nodes, seed_nodes, EdgeQuota::Directed { incoming, outgoing })
    }

    /// Configures undirected growth attaching `edges` links per step.
    ///
    /// # Errors
    /// Returns [`GrowthError::InvalidConfig`] when `seed_nodes < edges` or
    /// `nodes < seed_nodes`.
    pub fn undirected(nodes: usize, seed_nodes: usize, edges: usize) -> Result<Self> {
        Self::with_quota(nodes, seed_nodes, EdgeQuota::Undirected { edges })
    }

    /// Configures growth from an explicit [`EdgeQuota`].
    ///
    /// # Errors
    /// Returns [`GrowthError::InvalidConfig`] when the quota does not fit the
    /// seed or the seed exceeds the target node count.
    pub fn with_quota(nodes: usize, seed_nodes: usize, quota: EdgeQuota) -> Result<Self> {
        if seed_nodes < quota.widest() {
            return Err(GrowthError::invalid_config(format!(
                "seed_nodes ({seed_nodes}) must be >= the per-step edge quota ({})",
                quota.widest()
            )));
        }
        if nodes < seed_nodes {
            return Err(GrowthError::invalid_config(format!(
                "nodes ({nodes}) must be >= seed_nodes ({seed_nodes})"
            )));
        }
        Ok(Self {
            nodes,
            seed_nodes,
            quota,
            variable_edges: false,
            track_amounts: true,
            amount_model: AmountModel::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            rng_seed: DEFAULT_RNG_SEED,
        })
    }

    /// Swaps the incoming and outgoing quotas with probability one half on
    /// every step.
    ///
    /// # Errors
    /// Returns [`GrowthError::InvalidConfig`] when enabled on undirected
    /// growth, which has a single quota.
    pub fn with_variable_edges(mut self, enabled: bool) -> Result<Self> {
        if enabled && matches!(self.quota, EdgeQuota::Undirected { .. }) {
            return Err(GrowthError::invalid_config(
                "variable edges require directed growth",
            ));
        }
        self.variable_edges = enabled;
        Ok(self)
    }

    /// Enables or disables amount sampling for committed edges.
    #[must_use]
    pub fn with_amounts(mut self, enabled: bool) -> Self {
        self.track_amounts = enabled;
        self
    }

    /// Replaces the amount noise model.
    #[must_use]
    pub fn with_amount_model(mut self, model: AmountModel) -> Self {
        self.amount_model = model;
        self
    }

    /// Caps the number of proposals drawn for a single edge.
    ///
    /// # Errors
    /// Returns [`GrowthError::InvalidConfig`] when `attempts` is zero.
    pub fn with_max_attempts(mut self, attempts: usize) -> Result<Self> {
        if attempts == 0 {
            return Err(GrowthError::invalid_config(
                "max_attempts must be greater than zero",
            ));
        }
        self.max_attempts = attempts;
        Ok(self)
    }

    /// Seeds the engine's random source.
    #[must_use]
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self
    }

    /// Target node count (`n`).
    #[must_use]
    pub fn nodes(&self) -> usize {
        self.nodes
    }

    /// Size of the complete seed graph (`m0`).
    #[must_use]
    pub fn seed_nodes(&self) -> usize {
        self.seed_nodes
    }

    /// Per-step edge quota.
    #[must_use]
    pub fn quota(&self) -> EdgeQuota {
        self.quota
    }

    /// Orientation of the grown graph.
    #[must_use]
    pub fn topology(&self) -> Topology {
        self.quota.topology()
    }

    /// Whether quotas are swapped at random per step.
    #[must_use]
    pub fn variable_edges(&self) -> bool {
        self.variable_edges
    }

    /// Whether committed edges receive amounts.
    #[must_use]
    pub fn track_amounts(&self) -> bool {
        self.track_amounts
    }

    /// Noise model for amounts.
    #[must_use]
    pub fn amount_model(&self) -> AmountModel {
        self.amount_model
    }

    /// Proposal budget per committed edge.
    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Seed of the engine's random source.
    #[must_use]
    pub fn rng_seed(&self) -> u64 {
        self.rng_seed
    }

    /// Number of growth steps (`n - m0`).
    #[must_use]
    pub fn growth_steps(&self) -> usize {
        self.nodes - self.seed_nodes
    }

    /// Edges in the complete seed graph.
    #[must_use]
    pub fn seed_edge_count(&self) -> usize {
        let pairs = self.seed_nodes * self.seed_nodes.saturating_sub(1);
        match self.topology() {
            Topology::Directed => pairs,
            Topology::Undirected => pairs / 2,
        }
    }

    /// Edge count of a completed run.
    #[must_use]
    pub fn expected_edge_count(&self) -> usize {
        self.seed_edge_count() + self.growth_steps() * self.quota.edges_per_step()
    }
}
