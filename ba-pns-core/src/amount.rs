//! Transaction amounts attached to committed edges.
//!
//! An edge `(source, target)` carries `d * exp(v)` where `d` is the smaller of
//! the source's out-degree and the target's in-degree, measured right after
//! the edge is committed, and `v` is drawn from a normal distribution. The
//! degree factor bounds flow by the weaker endpoint's connectivity.

use std::collections::BTreeMap;

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{
    error::AmountError,
    graph::{GraphState, Topology},
};

/// Parameters of the normal distribution driving the log-amount noise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmountModel {
    mean: f64,
    std_dev: f64,
}

impl AmountModel {
    /// Mean of the log-amount noise used by default.
    pub const DEFAULT_MEAN: f64 = 1.0;
    /// Standard deviation of the log-amount noise used by default.
    pub const DEFAULT_STD_DEV: f64 = 0.2;

    /// Creates a model with explicit parameters.
    ///
    /// # Errors
    /// Returns [`AmountError::InvalidDistribution`] when either parameter is
    /// not finite or `std_dev` is negative.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, AmountError> {
        if !mean.is_finite() || !std_dev.is_finite() || std_dev < 0.0 {
            return Err(AmountError::InvalidDistribution { mean, std_dev });
        }
        Ok(Self { mean, std_dev })
    }

    /// Mean of the log-amount noise.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Standard deviation of the log-amount noise.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

impl Default for AmountModel {
    fn default() -> Self {
        Self {
            mean: Self::DEFAULT_MEAN,
            std_dev: Self::DEFAULT_STD_DEV,
        }
    }
}

/// Draws an amount for each newly committed edge.
///
/// # Examples
/// ```
/// use ba_pns_core::{AmountModel, AmountSampler, GraphState, Topology};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let graph = GraphState::complete(Topology::Directed, 3)?;
/// let sampler = AmountSampler::new(AmountModel::default())?;
/// let mut rng = SmallRng::seed_from_u64(1);
/// let amount = sampler.sample(&graph, 0, 1, &mut rng);
/// // min(out_degree(0), in_degree(1)) == 2
/// assert!(amount > 0.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct AmountSampler {
    noise: Normal<f64>,
}

impl AmountSampler {
    /// Builds a sampler for `model`.
    ///
    /// # Errors
    /// Returns [`AmountError::InvalidDistribution`] when the normal
    /// distribution rejects the parameters.
    pub fn new(model: AmountModel) -> Result<Self, AmountError> {
        let noise =
            Normal::new(model.mean, model.std_dev).map_err(|_| AmountError::InvalidDistribution {
                mean: model.mean,
                std_dev: model.std_dev,
            })?;
        Ok(Self { noise })
    }

    /// Capacity factor of the edge: the smaller of the source's out-degree and
    /// the target's in-degree (plain degree for undirected graphs).
    #[must_use]
    pub fn capacity(graph: &GraphState, source: usize, target: usize) -> usize {
        graph.out_degree(source).min(graph.in_degree(target))
    }

    /// Draws the amount for the committed edge `(source, target)`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        graph: &GraphState,
        source: usize,
        target: usize,
        rng: &mut R,
    ) -> f64 {
        let capacity = Self::capacity(graph, source, target) as f64;
        capacity * self.noise.sample(rng).exp()
    }
}

/// Sparse, write-once map from edges to amounts.
///
/// # Examples
/// ```
/// use ba_pns_core::{AmountMatrix, Topology};
///
/// let mut amounts = AmountMatrix::new();
/// amounts.record(0, 1, 2.5)?;
/// amounts.record(1, 0, 1.0)?;
/// assert!(amounts.record(0, 1, 9.0).is_err());
/// assert_eq!(amounts.get(0, 1), Some(2.5));
/// assert_eq!(
///     amounts.node_totals(Topology::Directed, 2),
///     vec![(1.0, 2.5), (2.5, 1.0)]
/// );
/// assert_eq!(
///     amounts.node_totals(Topology::Undirected, 2),
///     vec![(3.5, 3.5), (3.5, 3.5)]
/// );
/// # Ok::<(), ba_pns_core::AmountError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AmountMatrix {
    entries: BTreeMap<(usize, usize), f64>,
}

impl AmountMatrix {
    /// Creates an empty matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the amount of edge `(source, target)`.
    ///
    /// # Errors
    /// Returns [`AmountError::AlreadyRecorded`] when the edge already carries
    /// an amount; the stored value is left untouched.
    pub fn record(&mut self, source: usize, target: usize, amount: f64) -> Result<(), AmountError> {
        match self.entries.entry((source, target)) {
            std::collections::btree_map::Entry::Occupied(_) => Err(AmountError::AlreadyRecorded {
                source_node: source,
                target,
            }),
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(amount);
                Ok(())
            }
        }
    }

    /// Amount recorded for `(source, target)`.
    #[must_use]
    pub fn get(&self, source: usize, target: usize) -> Option<f64> {
        self.entries.get(&(source, target)).copied()
    }

    /// Number of recorded edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Recorded `(source, target, amount)` triples ordered by edge.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.entries
            .iter()
            .map(|(&(source, target), &amount)| (source, target, amount))
    }

    /// Per-node `(incoming_total, outgoing_total)` sums for nodes
    /// `0..node_count`. Entries referring to nodes outside that range are
    /// ignored.
    ///
    /// Undirected edges have no orientation, so each amount is credited to
    /// both columns of both endpoints and the two totals coincide.
    #[must_use]
    pub fn node_totals(&self, topology: Topology, node_count: usize) -> Vec<(f64, f64)> {
        let mut totals = vec![(0.0, 0.0); node_count];
        let mut credit = |node: usize, incoming: f64, outgoing: f64| {
            if let Some(entry) = totals.get_mut(node) {
                entry.0 += incoming;
                entry.1 += outgoing;
            }
        };
        for (source, target, amount) in self.iter() {
            match topology {
                Topology::Directed => {
                    credit(source, 0.0, amount);
                    credit(target, amount, 0.0);
                }
                Topology::Undirected => {
                    credit(source, amount, amount);
                    credit(target, amount, amount);
                }
            }
        }
        totals
    }
}
