//! The local-minima heuristic constructor.

use crate::distance::DistanceMap;
use crate::graph::NodeId;

/// Maps each node with a finite goal-distance to its heuristic value.
///
/// Built once per instance per `delta` and read-only during search. Covers
/// exactly the nodes present in the [`DistanceMap`] it was derived from.
#[derive(Debug, Clone)]
pub struct HeuristicMap {
    h: Vec<Option<u32>>,
}

impl HeuristicMap {
    /// Derives heuristic values from true distances, deliberately injecting
    /// local minima of width `delta`.
    ///
    /// For a node at true distance `d`:
    /// - `d == 0`: the heuristic is 0 (goal recognition stays exact),
    /// - `d mod (delta + 1) == 1`: the heuristic is `d + delta` (inflated,
    ///   so these nodes look farther than they are),
    /// - otherwise: the heuristic is `d - 1` (slightly deflated, so normal
    ///   progress looks promising).
    ///
    /// `delta = 0` degenerates toward a near-perfect heuristic; larger
    /// `delta` creates wider and more frequent local minima.
    ///
    /// # Example
    ///
    /// ```
    /// use searchlab_core::{Digraph, DistanceMap, HeuristicMap};
    ///
    /// let mut g = Digraph::with_nodes(5);
    /// for i in 0..4 {
    ///     g.add_edge(i, i + 1);
    /// }
    /// let dstar = DistanceMap::from_goal(&g, 4);
    /// let h = HeuristicMap::local_minima(&dstar, 1);
    ///
    /// assert_eq!(h.get(4), Some(0)); // d = 0
    /// assert_eq!(h.get(3), Some(2)); // d = 1, inflated
    /// assert_eq!(h.get(2), Some(1)); // d = 2, deflated
    /// ```
    pub fn local_minima(dstar: &DistanceMap, delta: u32) -> Self {
        // h is a pure function of d, so no distinct-value table is needed.
        let value_of = |d: u32| -> u32 {
            if d == 0 {
                0
            } else if d % (delta + 1) == 1 {
                d + delta
            } else {
                d - 1
            }
        };

        let mut h = vec![None; dstar.node_capacity()];
        for (node, d) in dstar.iter() {
            h[node as usize] = Some(value_of(d));
        }
        Self { h }
    }

    /// Heuristic value of `node`, or `None` if the node cannot reach the
    /// goal (and therefore must never be generated by a search).
    pub fn get(&self, node: NodeId) -> Option<u32> {
        self.h.get(node as usize).copied().flatten()
    }
}
