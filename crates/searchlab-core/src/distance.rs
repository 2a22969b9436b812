//! True goal-distance maps.

use std::collections::VecDeque;

use crate::graph::{Digraph, NodeId};

/// Maps each node that can reach the goal to its true shortest distance
/// (edge count) to the goal.
///
/// Computed once per instance by a reverse breadth-first traversal from the
/// goal over predecessor lists. Nodes that cannot reach the goal are absent.
/// Invariant: `get(goal) == Some(0)`.
#[derive(Debug, Clone)]
pub struct DistanceMap {
    dist: Vec<Option<u32>>,
    goal: NodeId,
    reachable: usize,
}

impl DistanceMap {
    /// Computes goal distances for every node that can reach `goal`.
    pub fn from_goal(graph: &Digraph, goal: NodeId) -> Self {
        let mut dist = vec![None; graph.node_count() as usize];
        dist[goal as usize] = Some(0);
        let mut reachable = 1;

        let mut queue = VecDeque::new();
        queue.push_back(goal);

        while let Some(node) = queue.pop_front() {
            // Present by construction: nodes are enqueued only after their
            // distance is recorded.
            let d = dist[node as usize].unwrap_or(0);
            for &pred in graph.predecessors(node) {
                if dist[pred as usize].is_none() {
                    dist[pred as usize] = Some(d + 1);
                    reachable += 1;
                    queue.push_back(pred);
                }
            }
        }

        Self {
            dist,
            goal,
            reachable,
        }
    }

    /// Distance of `node` to the goal, or `None` if the goal is unreachable
    /// from it.
    pub fn get(&self, node: NodeId) -> Option<u32> {
        self.dist.get(node as usize).copied().flatten()
    }

    /// The goal node this map was computed for.
    pub fn goal(&self) -> NodeId {
        self.goal
    }

    /// Number of nodes with a finite distance (including the goal).
    pub fn len(&self) -> usize {
        self.reachable
    }

    /// True if only the goal itself is present. Never fully empty.
    pub fn is_empty(&self) -> bool {
        self.reachable <= 1
    }

    /// Total node count of the underlying graph (the dense id range), not
    /// the number of reachable nodes.
    pub fn node_capacity(&self) -> usize {
        self.dist.len()
    }

    /// Iterates over `(node, distance)` pairs in ascending node-id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, u32)> + '_ {
        self.dist
            .iter()
            .enumerate()
            .filter_map(|(node, d)| d.map(|d| (node as NodeId, d)))
    }
}
