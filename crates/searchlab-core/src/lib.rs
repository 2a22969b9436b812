//! SearchLab Core - Problem instances for heuristic-shape experiments
//!
//! This crate provides the domain side of searchlab:
//! - A dense-id directed graph with successor/predecessor queries
//! - Random G(n, p) instance generation with goal/start selection
//! - True goal-distance maps via reverse breadth-first search
//! - The parametrized local-minima heuristic constructor

pub mod distance;
pub mod error;
pub mod generate;
pub mod graph;
pub mod heuristic;

pub use distance::DistanceMap;
pub use error::GenerateError;
pub use generate::{generate, sample_gnp, Instance, InstanceParams};
pub use graph::{Digraph, NodeId};
pub use heuristic::HeuristicMap;
