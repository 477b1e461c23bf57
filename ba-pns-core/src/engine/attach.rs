//! Single-edge attachment with bounded duplicate retries.

use rand::Rng;
use tracing::{debug, trace};

use crate::{
    Result,
    error::GrowthError,
    sampler::{DegreeKind, Draw},
};

use super::EdgeGrowthEngine;

/// Role of the active node in the edge being attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attachment {
    /// An existing node sends an edge to the active node; sources are weighted
    /// by out-degree.
    Incoming,
    /// The active node sends an edge to an existing node; targets are weighted
    /// by in-degree.
    Outgoing,
    /// Undirected link weighted by plain degree.
    Undirected,
}

impl Attachment {
    /// Degree that weights the counterpart draw.
    #[must_use]
    pub const fn weighting(self) -> DegreeKind {
        match self {
            Self::Incoming => DegreeKind::Out,
            Self::Outgoing => DegreeKind::In,
            Self::Undirected => DegreeKind::Total,
        }
    }

    /// Orders `(active, counterpart)` into `(source, target)`.
    #[must_use]
    pub const fn orient(self, active: usize, counterpart: usize) -> (usize, usize) {
        match self {
            Self::Incoming => (counterpart, active),
            Self::Outgoing | Self::Undirected => (active, counterpart),
        }
    }
}

impl<R: Rng> EdgeGrowthEngine<R> {
    /// Attaches one edge between `node` and a preferentially drawn
    /// counterpart.
    ///
    /// `node` is excluded from its own candidate pool, so the outgoing phase
    /// cannot select the active node even after the incoming phase has given
    /// it in-degree.
    pub(super) fn attach(&mut self, node: usize, attachment: Attachment) -> Result<()> {
        let kind = attachment.weighting();
        let budget = self.config.max_attempts();
        for attempt in 1..=budget {
            let draw = self
                .sampler
                .sample(&self.graph, kind, Some(node), &mut self.rng)
                .ok_or(GrowthError::EmptyCandidatePool { node })?;
            if matches!(draw, Draw::Uniform(_)) {
                self.uniform_draws += 1;
            }

            let (source, target) = attachment.orient(node, draw.node());
            if self.graph.has_edge(source, target) {
                self.duplicate_proposals += 1;
                #[cfg(feature = "metrics")]
                metrics::counter!("growth_duplicate_proposals").increment(1);
                debug!(source, target, attempt, "edge already exists, resampling");
                continue;
            }

            self.commit(source, target)?;
            return Ok(());
        }

        Err(GrowthError::Saturated {
            node,
            kind,
            attempts: budget,
        })
    }

    fn commit(&mut self, source: usize, target: usize) -> Result<()> {
        self.graph.add_edge(source, target)?;
        #[cfg(feature = "metrics")]
        metrics::counter!("growth_edges_committed").increment(1);

        match (&self.amount_sampler, &mut self.amounts) {
            (Some(sampler), Some(amounts)) => {
                let amount = sampler.sample(&self.graph, source, target, &mut self.rng);
                amounts.record(source, target, amount)?;
                trace!(source, target, amount, "edge added");
            }
            _ => trace!(source, target, "edge added"),
        }
        Ok(())
    }
}
