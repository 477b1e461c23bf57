//! Incrementally grown graph with O(1) degree bookkeeping.
//!
//! Adjacency is kept as insertion-ordered lists so that enumeration is
//! reproducible under a fixed seed, alongside a hash index for constant-time
//! edge membership. Every committed edge also appends its endpoints to
//! "stub" lists: a node appears in the out-stub list once per unit of
//! out-degree (and likewise for in-degree), which lets the sampler draw a node
//! proportionally to its degree with a single uniform index.

use std::collections::HashSet;

use crate::{error::GraphError, sampler::DegreeKind};

/// Orientation of the edges stored in a [`GraphState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Ordered pairs; in- and out-degree are tracked separately.
    Directed,
    /// Unordered pairs; in- and out-degree coincide with the plain degree.
    Undirected,
}

/// Mutable graph grown by the [`crate::EdgeGrowthEngine`].
///
/// Nodes and edges are only ever added. For undirected graphs the in- and
/// out-views are the same adjacency.
///
/// # Examples
/// ```
/// use ba_pns_core::{GraphState, Topology};
///
/// let mut graph = GraphState::new(Topology::Directed);
/// graph.add_node(0)?;
/// graph.add_node(1)?;
/// graph.add_edge(0, 1)?;
/// assert!(graph.has_edge(0, 1));
/// assert!(!graph.has_edge(1, 0));
/// assert_eq!(graph.out_degree(0), 1);
/// assert_eq!(graph.in_degree(1), 1);
/// # Ok::<(), ba_pns_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct GraphState {
    topology: Topology,
    out_neighbours: Vec<Vec<usize>>,
    // Empty for undirected graphs, which read `out_neighbours` for both views.
    in_neighbours: Vec<Vec<usize>>,
    edge_index: HashSet<(usize, usize)>,
    edges: Vec<(usize, usize)>,
    out_stubs: Vec<usize>,
    in_stubs: Vec<usize>,
}

impl GraphState {
    /// Creates an empty graph with the given orientation.
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            out_neighbours: Vec::new(),
            in_neighbours: Vec::new(),
            edge_index: HashSet::new(),
            edges: Vec::new(),
            out_stubs: Vec::new(),
            in_stubs: Vec::new(),
        }
    }

    /// Creates the complete seed graph over `seed_nodes` nodes.
    ///
    /// Directed seeds contain both orientations of every pair, giving
    /// `m0 * (m0 - 1)` edges; undirected seeds contain `m0 * (m0 - 1) / 2`.
    ///
    /// # Errors
    /// Never fails in practice; the error is propagated from the underlying
    /// insertions for uniformity.
    ///
    /// # Examples
    /// ```
    /// use ba_pns_core::{GraphState, Topology};
    ///
    /// let graph = GraphState::complete(Topology::Directed, 4)?;
    /// assert_eq!(graph.node_count(), 4);
    /// assert_eq!(graph.edge_count(), 12);
    /// # Ok::<(), ba_pns_core::GraphError>(())
    /// ```
    pub fn complete(topology: Topology, seed_nodes: usize) -> Result<Self, GraphError> {
        let mut graph = Self::new(topology);
        for node in 0..seed_nodes {
            graph.add_node(node)?;
        }
        for source in 0..seed_nodes {
            let targets = match topology {
                Topology::Directed => 0..seed_nodes,
                Topology::Undirected => (source + 1)..seed_nodes,
            };
            for target in targets.filter(|&target| target != source) {
                graph.add_edge(source, target)?;
            }
        }
        Ok(graph)
    }

    /// Returns the orientation of the graph.
    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// Returns `true` when edges are ordered pairs.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.topology == Topology::Directed
    }

    /// Inserts an isolated node.
    ///
    /// # Errors
    /// Returns [`GraphError::NonContiguousNode`] unless `id` equals the current
    /// node count.
    pub fn add_node(&mut self, id: usize) -> Result<(), GraphError> {
        let expected = self.node_count();
        if id != expected {
            return Err(GraphError::NonContiguousNode { got: id, expected });
        }
        self.out_neighbours.push(Vec::new());
        if self.is_directed() {
            self.in_neighbours.push(Vec::new());
        }
        Ok(())
    }

    /// Inserts the edge `(source, target)` and updates degree bookkeeping.
    ///
    /// # Errors
    /// Returns [`GraphError::UnknownNode`] for a missing endpoint,
    /// [`GraphError::SelfLoop`] when `source == target`, and
    /// [`GraphError::DuplicateEdge`] when the pair is already present.
    pub fn add_edge(&mut self, source: usize, target: usize) -> Result<(), GraphError> {
        for node in [source, target] {
            if node >= self.node_count() {
                return Err(GraphError::UnknownNode {
                    node,
                    node_count: self.node_count(),
                });
            }
        }
        if source == target {
            return Err(GraphError::SelfLoop { node: source });
        }
        let key = self.key(source, target);
        if !self.edge_index.insert(key) {
            return Err(GraphError::DuplicateEdge {
                source_node: source,
                target,
            });
        }

        self.edges.push((source, target));
        match self.topology {
            Topology::Directed => {
                push_neighbour(&mut self.out_neighbours, source, target);
                push_neighbour(&mut self.in_neighbours, target, source);
                self.out_stubs.push(source);
                self.in_stubs.push(target);
            }
            Topology::Undirected => {
                push_neighbour(&mut self.out_neighbours, source, target);
                push_neighbour(&mut self.out_neighbours, target, source);
                self.out_stubs.extend([source, target]);
            }
        }
        Ok(())
    }

    /// Returns `true` when the edge is present. Undirected graphs ignore the
    /// argument order.
    #[must_use]
    pub fn has_edge(&self, source: usize, target: usize) -> bool {
        self.edge_index.contains(&self.key(source, target))
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.out_neighbours.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node identifiers in creation order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = usize> + use<> {
        0..self.node_count()
    }

    /// Edges in commit order. Undirected edges are reported in the
    /// orientation they were proposed.
    #[must_use]
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Out-neighbours of `node` in commit order, or an empty slice for an
    /// unknown node.
    #[must_use]
    pub fn out_neighbours(&self, node: usize) -> &[usize] {
        self.out_neighbours.get(node).map_or(&[], Vec::as_slice)
    }

    /// In-neighbours of `node`; identical to [`Self::out_neighbours`] for
    /// undirected graphs.
    #[must_use]
    pub fn in_neighbours(&self, node: usize) -> &[usize] {
        match self.topology {
            Topology::Directed => self.in_neighbours.get(node).map_or(&[], Vec::as_slice),
            Topology::Undirected => self.out_neighbours(node),
        }
    }

    /// Number of edges pointing at `node`.
    #[must_use]
    pub fn in_degree(&self, node: usize) -> usize {
        self.in_neighbours(node).len()
    }

    /// Number of edges leaving `node`.
    #[must_use]
    pub fn out_degree(&self, node: usize) -> usize {
        self.out_neighbours(node).len()
    }

    /// Total number of incident edges. For directed graphs this is the sum of
    /// in- and out-degree.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        match self.topology {
            Topology::Directed => self.in_degree(node) + self.out_degree(node),
            Topology::Undirected => self.out_degree(node),
        }
    }

    /// Degree of `node` of the requested kind.
    #[must_use]
    pub fn degree_of(&self, node: usize, kind: DegreeKind) -> usize {
        match kind {
            DegreeKind::In => self.in_degree(node),
            DegreeKind::Out => self.out_degree(node),
            DegreeKind::Total => self.degree(node),
        }
    }

    /// In-degree of every node, indexed by node id.
    #[must_use]
    pub fn in_degrees(&self) -> Vec<usize> {
        self.nodes().map(|node| self.in_degree(node)).collect()
    }

    /// Out-degree of every node, indexed by node id.
    #[must_use]
    pub fn out_degrees(&self) -> Vec<usize> {
        self.nodes().map(|node| self.out_degree(node)).collect()
    }

    /// Total degree of every node, indexed by node id.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        self.nodes().map(|node| self.degree(node)).collect()
    }

    /// Multiset of nodes in which each node occurs once per unit of degree of
    /// the requested kind.
    pub(crate) fn stubs(&self, kind: DegreeKind) -> &[usize] {
        match (self.topology, kind) {
            (Topology::Directed, DegreeKind::In) => &self.in_stubs,
            (Topology::Directed, DegreeKind::Out) | (Topology::Undirected, _) => &self.out_stubs,
            // Total degree on a directed graph spans both lists; callers use
            // `stub_at` for that case.
            (Topology::Directed, DegreeKind::Total) => &[],
        }
    }

    /// Number of degree units of the requested kind across the graph.
    pub(crate) fn stub_count(&self, kind: DegreeKind) -> usize {
        match (self.topology, kind) {
            (Topology::Directed, DegreeKind::Total) => self.out_stubs.len() + self.in_stubs.len(),
            _ => self.stubs(kind).len(),
        }
    }

    /// Node owning the `index`-th degree unit of the requested kind.
    pub(crate) fn stub_at(&self, kind: DegreeKind, index: usize) -> Option<usize> {
        match (self.topology, kind) {
            (Topology::Directed, DegreeKind::Total) => {
                let split = self.out_stubs.len();
                if index < split {
                    self.out_stubs.get(index).copied()
                } else {
                    self.in_stubs.get(index - split).copied()
                }
            }
            _ => self.stubs(kind).get(index).copied(),
        }
    }

    fn key(&self, source: usize, target: usize) -> (usize, usize) {
        match self.topology {
            Topology::Directed => (source, target),
            Topology::Undirected => (source.min(target), source.max(target)),
        }
    }
}

fn push_neighbour(adjacency: &mut [Vec<usize>], node: usize, neighbour: usize) {
    if let Some(list) = adjacency.get_mut(node) {
        list.push(neighbour);
    }
}
