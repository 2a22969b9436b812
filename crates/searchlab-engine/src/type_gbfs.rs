//! Type-based greedy best-first search.
//!
//! Runs two open structures in parallel over the same frontier: the classic
//! strict open list and a type-based bucketed list. Expansion strictly
//! alternates between the two, which trades some of the classic list's
//! tie-breaking discipline for randomized exploration of equally-promising
//! buckets.

use rand::Rng;
use searchlab_core::{Digraph, HeuristicMap, NodeId};

use crate::bucket::{StratifiedOpenList, TypedOpenList};
use crate::error::SearchError;
use crate::policy::SelectionPolicy;
use crate::state::{ClassicOpenList, SearchState};

/// Which open structure the next step pops from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpansionMode {
    /// Pop the strict `(h, order)` minimum from the classic open list.
    Classic,
    /// Pop via the type-based bucketed structure and the active policy.
    TypeBased,
}

impl ExpansionMode {
    fn flipped(self) -> Self {
        match self {
            ExpansionMode::Classic => ExpansionMode::TypeBased,
            ExpansionMode::TypeBased => ExpansionMode::Classic,
        }
    }
}

/// The two addressing schemes for the type-based side of the frontier.
enum TypedFrontier {
    Flat(TypedOpenList),
    Stratified(StratifiedOpenList),
}

impl TypedFrontier {
    fn insert(&mut self, h: u32, g: u32, node: NodeId) {
        match self {
            TypedFrontier::Flat(open) => open.insert((h, g), node),
            TypedFrontier::Stratified(open) => open.insert(h, (h, g), node),
        }
    }

    fn select_and_remove(
        &mut self,
        policy: &SelectionPolicy,
        rng: &mut impl Rng,
    ) -> Result<NodeId, SearchError> {
        let node = match self {
            TypedFrontier::Flat(open) => open.select_and_remove(policy, rng)?,
            TypedFrontier::Stratified(open) => open.select_and_remove(policy, rng)?,
        };
        Ok(node)
    }

    fn is_empty(&self) -> bool {
        match self {
            TypedFrontier::Flat(open) => open.is_empty(),
            TypedFrontier::Stratified(open) => open.is_empty(),
        }
    }
}

/// Runs type-based GBFS and returns the expansion count.
///
/// Every generated node is pushed into the classic open list *and* the
/// type-based structure. Each step pops from the structure the current
/// mode designates, starting from `start_mode`, and flips the mode
/// afterwards; when the designated structure is empty the other one is
/// used instead. A popped node that was already expanded through the other
/// structure is discarded without counting, and the mode still flips.
///
/// With `stratified` the type-based side buckets by `h` first and `(h, g)`
/// within; the policy then picks at the h level and the inner pick is
/// uniform. The flat scheme buckets by `(h, g)` directly and only pairs
/// with [`SelectionPolicy::Uniform`]; `run_trial` enforces that pairing.
///
/// # Errors
///
/// [`SearchError::Exhausted`] when both structures empty before the goal
/// is expanded, [`SearchError::StartUnreachable`] for a start outside the
/// heuristic map, and policy failures surfaced as
/// [`SearchError::Policy`].
pub fn type_gbfs(
    graph: &Digraph,
    start: NodeId,
    goal: NodeId,
    h_values: &HeuristicMap,
    stratified: bool,
    policy: &SelectionPolicy,
    start_mode: ExpansionMode,
    rng: &mut impl Rng,
) -> Result<u64, SearchError> {
    let start_h = h_values
        .get(start)
        .ok_or(SearchError::StartUnreachable(start))?;

    let mut state = SearchState::new(graph.node_count());
    let mut classic = ClassicOpenList::new();
    let mut typed = if stratified {
        TypedFrontier::Stratified(StratifiedOpenList::new())
    } else {
        TypedFrontier::Flat(TypedOpenList::new())
    };

    let order = state.generate(start, 0);
    classic.push(start_h, order, start);
    typed.insert(start_h, 0, start);

    let mut mode = start_mode;
    let mut expansions: u64 = 0;

    loop {
        if classic.is_empty() && typed.is_empty() {
            return Err(SearchError::Exhausted { expansions });
        }

        // Fall back to the other structure when the designated one is
        // empty. Both hold the same frontier, but stale entries drain at
        // different rates, so one can run dry before the other.
        let use_typed = match mode {
            ExpansionMode::TypeBased => !typed.is_empty(),
            ExpansionMode::Classic => classic.is_empty(),
        };

        let node = if use_typed {
            typed.select_and_remove(policy, rng)?
        } else {
            match classic.pop() {
                Some(node) => node,
                None => return Err(SearchError::Exhausted { expansions }),
            }
        };

        // A node expanded via the other structure is a stale entry here.
        // Discard it without counting; the mode flips regardless.
        if state.is_closed(node) {
            mode = mode.flipped();
            continue;
        }

        state.close(node);
        expansions += 1;

        if node == goal {
            tracing::debug!(
                expansions,
                generated = state.generated_count(),
                stratified,
                "goal expanded"
            );
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
            classic.push(h, order, succ);
            typed.insert(h, g, succ);
        }

        mode = mode.flipped();
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use searchlab_core::{generate, DistanceMap, InstanceParams};

    use super::*;

    fn chain(n: u32) -> Digraph {
        let mut g = Digraph::with_nodes(n);
        for i in 0..n - 1 {
            g.add_edge(i, i + 1);
        }
        g
    }

    fn chain_heuristic(n: u32, delta: u32) -> (Digraph, HeuristicMap) {
        let g = chain(n);
        let dstar = DistanceMap::from_goal(&g, n - 1);
        let h = HeuristicMap::local_minima(&dstar, delta);
        (g, h)
    }

    #[test]
    fn chain_expands_every_node_exactly_once() {
        // On a chain the frontier never holds more than one fresh node, so
        // both structures keep popping the same node and every variant
        // expands all n nodes.
        let (g, h) = chain_heuristic(6, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let expansions = type_gbfs(
            &g,
            0,
            5,
            &h,
            false,
            &SelectionPolicy::Uniform,
            ExpansionMode::Classic,
            &mut rng,
        )
        .unwrap();
        assert_eq!(expansions, 6);
    }

    #[test]
    fn stratified_policies_terminate_on_the_goal() {
        let (g, h) = chain_heuristic(8, 2);
        let policies = [
            SelectionPolicy::Uniform,
            SelectionPolicy::Softmin { tau: 1.0 },
            SelectionPolicy::Linear { alpha: 1.0, beta: 1.0 },
            SelectionPolicy::Nth { nth: 3 },
            SelectionPolicy::Cheat { delta: 2 },
        ];
        for policy in policies {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let expansions = type_gbfs(
                &g,
                0,
                7,
                &h,
                true,
                &policy,
                ExpansionMode::Classic,
                &mut rng,
            )
            .unwrap();
            assert_eq!(expansions, 8, "policy {policy:?}");
        }
    }

    #[test]
    fn both_start_modes_reach_the_goal() {
        let (g, h) = chain_heuristic(5, 1);
        for start_mode in [ExpansionMode::Classic, ExpansionMode::TypeBased] {
            let mut rng = ChaCha8Rng::seed_from_u64(2);
            let expansions = type_gbfs(
                &g,
                0,
                4,
                &h,
                true,
                &SelectionPolicy::Uniform,
                start_mode,
                &mut rng,
            )
            .unwrap();
            assert_eq!(expansions, 5);
        }
    }

    #[test]
    fn expansions_stay_within_the_reachable_frontier() {
        let params = InstanceParams {
            nodes: 60,
            edge_probability: 0.08,
            min_edges: 20,
        };
        for seed in 0..10u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let instance = generate(&params, &mut rng).unwrap();
            let h = HeuristicMap::local_minima(&instance.dstar, 2);
            let expansions = type_gbfs(
                &instance.graph,
                instance.start,
                instance.goal,
                &h,
                true,
                &SelectionPolicy::Softmin { tau: 1.0 },
                ExpansionMode::Classic,
                &mut rng,
            )
            .unwrap();
            assert!(expansions >= 1);
            assert!(expansions as usize <= instance.dstar.len());
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_count() {
        let params = InstanceParams {
            nodes: 60,
            edge_probability: 0.08,
            min_edges: 20,
        };
        let run = || {
            let mut rng = ChaCha8Rng::seed_from_u64(11);
            let instance = generate(&params, &mut rng).unwrap();
            let h = HeuristicMap::local_minima(&instance.dstar, 3);
            type_gbfs(
                &instance.graph,
                instance.start,
                instance.goal,
                &h,
                true,
                &SelectionPolicy::Nth { nth: 3 },
                ExpansionMode::Classic,
                &mut rng,
            )
            .unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn exhausted_frontier_is_a_distinct_failure() {
        // Start's only successor lies outside the heuristic map, so both
        // structures empty after a single expansion.
        let mut g = Digraph::with_nodes(4);
        g.add_edge(0, 3);
        let reachable = {
            let mut r = Digraph::with_nodes(4);
            r.add_edge(0, 1);
            r.add_edge(1, 2);
            DistanceMap::from_goal(&r, 2)
        };
        let h = HeuristicMap::local_minima(&reachable, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let err = type_gbfs(
            &g,
            0,
            2,
            &h,
            true,
            &SelectionPolicy::Uniform,
            ExpansionMode::Classic,
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, SearchError::Exhausted { expansions: 1 });
    }
}
