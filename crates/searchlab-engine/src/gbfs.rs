//! Baseline greedy best-first search.

use searchlab_core::{Digraph, HeuristicMap, NodeId};

use crate::error::SearchError;
use crate::state::{ClassicOpenList, SearchState};

/// Runs strict greedy best-first search and returns the expansion count.
///
/// Pops the minimum `(h, generation order)` pair, expands it, and pushes
/// each not-yet-generated successor that has a finite heuristic value.
/// Successors without one cannot reach the goal and are never generated,
/// so they do not bias the expansion count. The goal pop itself counts as
/// an expansion.
///
/// # Errors
///
/// [`SearchError::Exhausted`] if the frontier empties before the goal is
/// popped, [`SearchError::StartUnreachable`] if the start has no heuristic
/// value.
pub fn gbfs(
    graph: &Digraph,
    start: NodeId,
    goal: NodeId,
    h_values: &HeuristicMap,
) -> Result<u64, SearchError> {
    let start_h = h_values
        .get(start)
        .ok_or(SearchError::StartUnreachable(start))?;

    let mut state = SearchState::new(graph.node_count());
    let mut open = ClassicOpenList::new();

    let order = state.generate(start, 0);
    open.push(start_h, order, start);

    let mut expansions: u64 = 0;

    while let Some(node) = open.pop() {
        expansions += 1;

        if node == goal {
            tracing::debug!(expansions, generated = state.generated_count(), "goal expanded");
            return Ok(expansions);
        }

        let g = state.g(node).unwrap_or(0) + 1;
        for &succ in graph.successors(node) {
            if state.is_generated(succ) {
                continue;
            }
            let Some(h) = h_values.get(succ) else {
                continue;
            };
            let order = state.generate(succ, g);
            open.push(h, order, succ);
        }
    }

    Err(SearchError::Exhausted { expansions })
}
