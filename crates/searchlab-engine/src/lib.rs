//! SearchLab Engine - GBFS variants over bucketed open lists
//!
//! This crate provides the search side of searchlab:
//! - Shared search state (closed set, g-values, generation counter)
//! - The classic strict open list and baseline GBFS
//! - Type-based open lists, flat and h-stratified
//! - Randomized type-selection policies
//! - Type-based GBFS with strict mode alternation
//! - The per-trial entry point [`run_trial`]

pub mod bucket;
pub mod error;
pub mod gbfs;
pub mod policy;
pub mod state;
pub mod trial;
pub mod type_gbfs;

pub use bucket::{StratifiedOpenList, TypeKey, TypedOpenList};
pub use error::SearchError;
pub use gbfs::gbfs;
pub use policy::{HKeyed, PolicyError, SelectionPolicy};
pub use state::{ClassicOpenList, SearchState};
pub use trial::{run_trial, PreparedTrial, SearchVariant, TrialError, TrialOutcome, TrialParams};
pub use type_gbfs::{type_gbfs, ExpansionMode};
