//! SearchLab Bench - the experiment driver
//!
//! Sweeps local-minimum widths and trial counts, running every configured
//! search variant on the same instance per trial and collecting the raw
//! per-trial expansion counts. Aggregation (min/median/max) and result
//! serialization are left to whatever consumes the records.

pub mod result;
pub mod runner;
pub mod variants;

pub use result::{ExperimentResult, TrialRecord, VariantResult};
pub use runner::Experiment;
pub use variants::{standard_variants, VariantSpec};
