//! Dense-id directed graph.

use smallvec::SmallVec;

/// Node identifier within a [`Digraph`]. Ids form the dense range
/// `0..node_count`.
pub type NodeId = u32;

/// A directed graph over a dense range of node ids.
///
/// Immutable once generated: the instance generator builds it edge by edge
/// and the search engines only ever query it. Both successor and predecessor
/// lists are kept so that the reverse breadth-first traversal used for
/// goal-distance computation needs no transposition pass.
///
/// # Example
///
/// ```
/// use searchlab_core::Digraph;
///
/// let mut g = Digraph::with_nodes(3);
/// g.add_edge(0, 1);
/// g.add_edge(1, 2);
///
/// assert_eq!(g.edge_count(), 2);
/// assert_eq!(g.successors(0), &[1]);
/// assert_eq!(g.in_degree(2), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Digraph {
    succ: Vec<SmallVec<[NodeId; 4]>>,
    pred: Vec<SmallVec<[NodeId; 4]>>,
    edges: usize,
}

impl Digraph {
    /// Creates a graph with `n` nodes and no edges.
    pub fn with_nodes(n: u32) -> Self {
        Self {
            succ: vec![SmallVec::new(); n as usize],
            pred: vec![SmallVec::new(); n as usize],
            edges: 0,
        }
    }

    /// Adds the directed edge `from -> to`.
    ///
    /// The generator never produces duplicate edges or self-loops, so no
    /// deduplication happens here.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.succ[from as usize].push(to);
        self.pred[to as usize].push(from);
        self.edges += 1;
    }

    /// Number of nodes.
    pub fn node_count(&self) -> u32 {
        self.succ.len() as u32
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Successors of `node` (targets of its outgoing edges).
    pub fn successors(&self, node: NodeId) -> &[NodeId] {
        &self.succ[node as usize]
    }

    /// Predecessors of `node` (sources of its incoming edges).
    pub fn predecessors(&self, node: NodeId) -> &[NodeId] {
        &self.pred[node as usize]
    }

    /// In-degree of `node`.
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.pred[node as usize].len()
    }

    /// Iterates over all node ids.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        0..self.node_count()
    }
}
