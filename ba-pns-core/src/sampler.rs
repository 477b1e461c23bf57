//! Degree-proportional node selection.
//!
//! Draws index into the graph's degree stubs, so a draw costs O(1) in the
//! common case regardless of graph size. The active node can be excluded from
//! its own candidate pool; exclusion is handled by rejection with a bounded
//! number of redraws, followed by an exact scan when the excluded node holds
//! most of the weight.

use std::fmt;

use rand::Rng;

use crate::graph::GraphState;

const REJECTION_LIMIT: usize = 32;

/// Degree that weights a preferential draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DegreeKind {
    /// Number of incoming edges.
    In,
    /// Number of outgoing edges.
    Out,
    /// Number of incident edges; the plain degree of an undirected graph.
    Total,
}

impl DegreeKind {
    /// Stable lowercase label used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::Total => "total",
        }
    }
}

impl fmt::Display for DegreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Draw {
    /// Drawn proportionally to degree.
    Preferential(usize),
    /// Drawn uniformly because every candidate had zero weight.
    Uniform(usize),
}

impl Draw {
    /// The selected node.
    #[must_use]
    pub const fn node(self) -> usize {
        match self {
            Self::Preferential(node) | Self::Uniform(node) => node,
        }
    }
}

/// Selects nodes with probability proportional to a chosen degree.
///
/// # Examples
/// ```
/// use ba_pns_core::{DegreeKind, GraphState, PreferentialAttachmentSampler, Topology};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut graph = GraphState::complete(Topology::Directed, 3)?;
/// graph.add_node(3)?;
/// let mut rng = SmallRng::seed_from_u64(7);
/// let draw = PreferentialAttachmentSampler::new()
///     .sample(&graph, DegreeKind::Out, Some(3), &mut rng)
///     .expect("seed nodes are candidates");
/// assert!(draw.node() < 3);
/// # Ok::<(), ba_pns_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PreferentialAttachmentSampler;

impl PreferentialAttachmentSampler {
    /// Creates a sampler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Draws one node from the whole node population of `graph`, weighted by
    /// `kind` degree, never returning `exclude`.
    ///
    /// Falls back to a uniform draw when every candidate has zero weight.
    /// Returns `None` only when no candidate exists at all.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        graph: &GraphState,
        kind: DegreeKind,
        exclude: Option<usize>,
        rng: &mut R,
    ) -> Option<Draw> {
        let total = graph.stub_count(kind);
        let excluded_weight = exclude.map_or(0, |node| graph.degree_of(node, kind));
        if total > excluded_weight {
            return self
                .sample_preferential(graph, kind, exclude, total - excluded_weight, rng)
                .map(Draw::Preferential);
        }
        sample_uniform(graph.node_count(), exclude, rng).map(Draw::Uniform)
    }

    fn sample_preferential<R: Rng + ?Sized>(
        &self,
        graph: &GraphState,
        kind: DegreeKind,
        exclude: Option<usize>,
        eligible: usize,
        rng: &mut R,
    ) -> Option<usize> {
        let total = graph.stub_count(kind);
        for _ in 0..REJECTION_LIMIT {
            let node = graph.stub_at(kind, rng.gen_range(0..total))?;
            if Some(node) != exclude {
                return Some(node);
            }
        }

        // Exact draw over the eligible stubs only.
        let mut remaining = rng.gen_range(0..eligible);
        for index in 0..total {
            let node = graph.stub_at(kind, index)?;
            if Some(node) == exclude {
                continue;
            }
            if remaining == 0 {
                return Some(node);
            }
            remaining -= 1;
        }
        None
    }
}

fn sample_uniform<R: Rng + ?Sized>(
    population: usize,
    exclude: Option<usize>,
    rng: &mut R,
) -> Option<usize> {
    match exclude.filter(|&node| node < population) {
        Some(excluded) => {
            let candidates = population.checked_sub(1).filter(|&count| count > 0)?;
            let drawn = rng.gen_range(0..candidates);
            Some(if drawn >= excluded { drawn + 1 } else { drawn })
        }
        None if population > 0 => Some(rng.gen_range(0..population)),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    use crate::graph::Topology;

    const DRAWS: usize = 20_000;

    /// Directed star around node 0 plus one isolated node:
    /// in-degree is `[3, 0, 0, 0, 0]` before the chord `1 -> 2` is added.
    fn hub_graph() -> GraphState {
        let mut graph = GraphState::new(Topology::Directed);
        for node in 0..5 {
            graph.add_node(node).expect("node must insert");
        }
        for source in 1..4 {
            graph.add_edge(source, 0).expect("edge must insert");
        }
        graph.add_edge(1, 2).expect("edge must insert");
        graph
    }

    fn histogram(graph: &GraphState, kind: DegreeKind, exclude: Option<usize>) -> Vec<usize> {
        let sampler = PreferentialAttachmentSampler::new();
        let mut rng = SmallRng::seed_from_u64(0xDEC0DE);
        let mut counts = vec![0_usize; graph.node_count()];
        for _ in 0..DRAWS {
            let node = sampler
                .sample(graph, kind, exclude, &mut rng)
                .expect("graph has candidates")
                .node();
            counts[node] += 1;
        }
        counts
    }

    #[test]
    fn draws_proportionally_to_in_degree() {
        let graph = hub_graph();
        let counts = histogram(&graph, DegreeKind::In, None);
        // Weights are 3:0:1:0:0.
        assert_eq!(counts[1], 0);
        assert_eq!(counts[3], 0);
        assert_eq!(counts[4], 0);
        let share = counts[0] as f64 / DRAWS as f64;
        assert!((share - 0.75).abs() < 0.02, "hub share was {share}");
    }

    #[test]
    fn zero_degree_nodes_are_never_drawn_preferentially() {
        let graph = hub_graph();
        let counts = histogram(&graph, DegreeKind::Out, None);
        assert_eq!(counts[0], 0);
        assert_eq!(counts[4], 0);
        assert!(counts[1] > counts[2]);
    }

    #[rstest]
    #[case(DegreeKind::In)]
    #[case(DegreeKind::Out)]
    #[case(DegreeKind::Total)]
    fn excluded_node_is_never_returned(#[case] kind: DegreeKind) {
        let graph = hub_graph();
        for excluded in 0..graph.node_count() {
            let counts = histogram(&graph, kind, Some(excluded));
            assert_eq!(counts[excluded], 0, "node {excluded} drawn for {kind}");
        }
    }

    #[test]
    fn exclusion_preserves_relative_weights() {
        let graph = hub_graph();
        // Total degree: [3, 2, 2, 1, 0]; excluding the hub leaves 2:2:1.
        let counts = histogram(&graph, DegreeKind::Total, Some(0));
        for (node, expected) in [(1, 0.4), (2, 0.4), (3, 0.2)] {
            let share = counts[node] as f64 / DRAWS as f64;
            assert!((share - expected).abs() < 0.02, "node {node} share was {share}");
        }
        assert_eq!(counts[4], 0);
    }

    #[test]
    fn falls_back_to_uniform_when_weights_vanish() {
        let mut graph = GraphState::new(Topology::Directed);
        for node in 0..4 {
            graph.add_node(node).expect("node must insert");
        }
        let sampler = PreferentialAttachmentSampler::new();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let draw = sampler
                .sample(&graph, DegreeKind::In, Some(2), &mut rng)
                .expect("three candidates remain");
            assert!(matches!(draw, Draw::Uniform(_)));
            seen[draw.node()] = true;
        }
        assert_eq!(seen, [true, true, false, true]);
    }

    #[test]
    fn falls_back_when_only_the_excluded_node_has_weight() {
        let mut graph = GraphState::new(Topology::Directed);
        for node in 0..3 {
            graph.add_node(node).expect("node must insert");
        }
        graph.add_edge(0, 2).expect("edge must insert");
        let mut rng = SmallRng::seed_from_u64(11);
        let draw = PreferentialAttachmentSampler::new()
            .sample(&graph, DegreeKind::In, Some(2), &mut rng)
            .expect("two candidates remain");
        assert!(matches!(draw, Draw::Uniform(0 | 1)));
    }

    #[rstest]
    #[case(0, None)]
    #[case(1, Some(0))]
    fn empty_pools_yield_none(#[case] nodes: usize, #[case] exclude: Option<usize>) {
        let mut graph = GraphState::new(Topology::Undirected);
        for node in 0..nodes {
            graph.add_node(node).expect("node must insert");
        }
        let mut rng = SmallRng::seed_from_u64(5);
        let draw = PreferentialAttachmentSampler::new().sample(
            &graph,
            DegreeKind::Total,
            exclude,
            &mut rng,
        );
        assert_eq!(draw, None);
    }
}
