//! Error types for the search engines.

use searchlab_core::NodeId;
use thiserror::Error;

use crate::policy::PolicyError;

/// Errors raised by a search run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    /// Every open structure emptied before the goal was expanded. Carries
    /// the expansions performed so far; a failed run is never conflated
    /// with a zero-expansion success.
    #[error("open lists exhausted after {expansions} expansions without reaching the goal")]
    Exhausted {
        /// Expansions performed before the frontier ran dry.
        expansions: u64,
    },

    /// The start node has no finite heuristic value, so it cannot reach
    /// the goal. Generated instances never trigger this; hand-built ones
    /// can.
    #[error("start node {0} has no finite heuristic value")]
    StartUnreachable(NodeId),

    /// A selection policy failed while choosing a bucket.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}
