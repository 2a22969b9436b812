//! Random instance generation.
//!
//! Samples directed Erdős–Rényi graphs and turns them into search
//! instances: a goal reachable from a start node, plus the true
//! goal-distance of every node that can reach the goal.

use rand::Rng;

use crate::distance::DistanceMap;
use crate::error::GenerateError;
use crate::graph::{Digraph, NodeId};

/// Sampling attempts before generation is reported as a configuration
/// error. For the parameter ranges the experiments use, a valid instance
/// appears almost surely within the first few samples.
const MAX_ATTEMPTS: u32 = 64;

/// Parameters for random instance generation.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceParams {
    /// Number of nodes `n`.
    pub nodes: u32,
    /// Independent edge probability `p` of the G(n, p) model, in `(0, 1]`.
    pub edge_probability: f64,
    /// Minimum accepted edge count; sparser samples are rejected.
    pub min_edges: usize,
}

/// A generated search instance.
///
/// The graph is immutable from here on; `dstar` holds the true
/// goal-distance of every node that can reach `goal`, with
/// `dstar.get(goal) == Some(0)` and `dstar.get(start)` finite and positive.
#[derive(Debug, Clone)]
pub struct Instance {
    pub graph: Digraph,
    pub start: NodeId,
    pub goal: NodeId,
    pub dstar: DistanceMap,
}

/// Samples a directed G(n, p) graph without self-loops.
///
/// Uses geometric skipping over the linearized ordered-pair space, so the
/// cost is proportional to the number of edges rather than `n^2`.
pub fn sample_gnp(n: u32, p: f64, rng: &mut impl Rng) -> Digraph {
    let mut graph = Digraph::with_nodes(n);
    if n < 2 || p <= 0.0 {
        return graph;
    }

    let total = u64::from(n) * u64::from(n - 1);

    if p >= 1.0 {
        for k in 0..total {
            let (u, v) = pair_from_index(k, n);
            graph.add_edge(u, v);
        }
        return graph;
    }

    let log_q = (1.0 - p).ln();
    let mut k: u64 = 0;
    while k < total {
        let r: f64 = rng.random();
        // Geometric number of skipped pairs before the next edge.
        let skip = ((1.0 - r).ln() / log_q) as u64;
        k = k.saturating_add(skip);
        if k >= total {
            break;
        }
        let (u, v) = pair_from_index(k, n);
        graph.add_edge(u, v);
        k += 1;
    }

    graph
}

/// Maps a linear index over the `n * (n - 1)` ordered pairs to the pair
/// itself, skipping self-loops.
fn pair_from_index(k: u64, n: u32) -> (NodeId, NodeId) {
    let row = u64::from(n - 1);
    let u = (k / row) as NodeId;
    let r = (k % row) as NodeId;
    let v = if r >= u { r + 1 } else { r };
    (u, v)
}

/// Generates a random instance.
///
/// Resamples on degenerate draws: too few edges, no node with positive
/// in-degree (no goal candidate), or no node strictly away from the goal
/// that can still reach it (no start candidate). Gives up with
/// [`GenerateError::RetriesExhausted`] after a bounded number of attempts.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use searchlab_core::{generate, InstanceParams};
///
/// let params = InstanceParams {
///     nodes: 50,
///     edge_probability: 0.1,
///     min_edges: 10,
/// };
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let instance = generate(&params, &mut rng).unwrap();
///
/// assert_eq!(instance.dstar.get(instance.goal), Some(0));
/// assert!(instance.dstar.get(instance.start).unwrap() > 0);
/// ```
pub fn generate(params: &InstanceParams, rng: &mut impl Rng) -> Result<Instance, GenerateError> {
    if params.nodes < 2 {
        return Err(GenerateError::InvalidParams(format!(
            "need at least 2 nodes, got {}",
            params.nodes
        )));
    }
    if !(params.edge_probability > 0.0 && params.edge_probability <= 1.0) {
        return Err(GenerateError::InvalidParams(format!(
            "edge probability must be in (0, 1], got {}",
            params.edge_probability
        )));
    }

    for attempt in 1..=MAX_ATTEMPTS {
        let graph = sample_gnp(params.nodes, params.edge_probability, rng);

        if graph.edge_count() < params.min_edges {
            tracing::trace!(attempt, edges = graph.edge_count(), "sample too sparse");
            continue;
        }

        // A goal without incoming edges is unreachable from everywhere.
        let goal_candidates: Vec<NodeId> =
            graph.nodes().filter(|&v| graph.in_degree(v) > 0).collect();
        if goal_candidates.is_empty() {
            tracing::trace!(attempt, "no node with positive in-degree");
            continue;
        }
        let goal = goal_candidates[rng.random_range(0..goal_candidates.len())];

        let dstar = DistanceMap::from_goal(&graph, goal);

        // The start must be strictly away from the goal and able to reach it.
        let start_candidates: Vec<NodeId> = dstar
            .iter()
            .filter(|&(_, d)| d > 0)
            .map(|(node, _)| node)
            .collect();
        if start_candidates.is_empty() {
            tracing::trace!(attempt, "goal has no reachable non-goal node");
            continue;
        }
        let start = start_candidates[rng.random_range(0..start_candidates.len())];

        tracing::debug!(
            attempt,
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            goal,
            start,
            reachable = dstar.len(),
            "generated instance"
        );

        return Ok(Instance {
            graph,
            start,
            goal,
            dstar,
        });
    }

    Err(GenerateError::RetriesExhausted {
        attempts: MAX_ATTEMPTS,
    })
}
