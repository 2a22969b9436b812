//! Error types for instance generation.

use thiserror::Error;

/// Errors raised while generating a random problem instance.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerateError {
    /// The parameters themselves are unusable (too few nodes, probability
    /// outside `(0, 1]`, ...).
    #[error("invalid instance parameters: {0}")]
    InvalidParams(String),

    /// Every sampled graph was degenerate (too few edges, no node with
    /// positive in-degree, or no valid start node). The parameters cannot
    /// produce a valid instance.
    #[error("no valid instance after {attempts} sampling attempts")]
    RetriesExhausted {
        /// Number of graphs sampled before giving up.
        attempts: u32,
    },
}
