//! Shared per-run search state and the classic open list.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use searchlab_core::NodeId;

/// Mutable state shared by every search variant within a single run:
/// the closed set, the g-value map, and the generation counter.
///
/// The g-value map doubles as the generated set: a node has been generated
/// if and only if it has a g-value. The g-value itself is the number of
/// edges along the discovering path from the start, a provenance value
/// rather than a cost-optimal metric.
///
/// Created fresh per trial and discarded afterwards.
#[derive(Debug)]
pub struct SearchState {
    closed: Vec<bool>,
    g: Vec<Option<u32>>,
    generated: u64,
}

impl SearchState {
    /// Creates empty state for a graph with `node_count` nodes.
    pub fn new(node_count: u32) -> Self {
        Self {
            closed: vec![false; node_count as usize],
            g: vec![None; node_count as usize],
            generated: 0,
        }
    }

    /// True if `node` has been expanded.
    pub fn is_closed(&self, node: NodeId) -> bool {
        self.closed[node as usize]
    }

    /// Marks `node` as expanded.
    pub fn close(&mut self, node: NodeId) {
        self.closed[node as usize] = true;
    }

    /// True if `node` has been generated (pushed onto the frontier).
    pub fn is_generated(&self, node: NodeId) -> bool {
        self.g[node as usize].is_some()
    }

    /// The g-value of `node`, if generated.
    pub fn g(&self, node: NodeId) -> Option<u32> {
        self.g[node as usize]
    }

    /// Records the g-value of a freshly generated node and returns the
    /// strictly increasing generation order used for classic tie-breaking.
    pub fn generate(&mut self, node: NodeId, g: u32) -> u64 {
        self.g[node as usize] = Some(g);
        let order = self.generated;
        self.generated += 1;
        order
    }

    /// Total nodes generated so far.
    pub fn generated_count(&self) -> u64 {
        self.generated
    }
}

/// The classic strict open list: a min-priority structure keyed by
/// `(heuristic value, generation order)`.
///
/// The generation order breaks heuristic-value ties in FIFO order, making
/// the pop sequence fully deterministic.
#[derive(Debug, Default)]
pub struct ClassicOpenList {
    heap: BinaryHeap<Reverse<(u32, u64, NodeId)>>,
}

impl ClassicOpenList {
    /// Creates an empty open list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes `node` with heuristic value `h` and generation order `order`.
    pub fn push(&mut self, h: u32, order: u64, node: NodeId) {
        self.heap.push(Reverse((h, order, node)));
    }

    /// Pops the node with the smallest `(h, order)` pair.
    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse((_, _, node))| node)
    }

    /// True if no node is queued.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_heuristic_order() {
        let mut open = ClassicOpenList::new();
        open.push(5, 0, 10);
        open.push(1, 1, 11);
        open.push(3, 2, 12);
        assert_eq!(open.pop(), Some(11));
        assert_eq!(open.pop(), Some(12));
        assert_eq!(open.pop(), Some(10));
        assert_eq!(open.pop(), None);
    }

    #[test]
    fn equal_heuristics_break_ties_fifo() {
        let mut open = ClassicOpenList::new();
        open.push(2, 0, 7);
        open.push(2, 1, 8);
        open.push(2, 2, 9);
        assert_eq!(open.pop(), Some(7));
        assert_eq!(open.pop(), Some(8));
        assert_eq!(open.pop(), Some(9));
    }

    #[test]
    fn state_tracks_generation_and_closure() {
        let mut state = SearchState::new(4);
        assert!(!state.is_generated(2));
        let first = state.generate(2, 0);
        let second = state.generate(3, 1);
        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(state.g(3), Some(1));
        assert_eq!(state.generated_count(), 2);

        assert!(!state.is_closed(2));
        state.close(2);
        assert!(state.is_closed(2));
    }
}
