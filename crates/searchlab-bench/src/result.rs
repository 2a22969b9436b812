//! Raw experiment records.

/// Expansion count of one variant within one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantResult {
    /// The variant's label from its `VariantSpec`.
    pub label: String,
    /// Expansions the variant performed on the trial's instance.
    pub expansions: u64,
}

/// Everything one `(delta, trial)` cell produced.
///
/// All variants of a record ran on the identical instance: they share the
/// trial seed, and generation draws precede search draws in the stream.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialRecord {
    /// Local-minimum width of this sweep step.
    pub delta: u32,
    /// Trial index within the sweep step (0-based).
    pub trial: usize,
    /// Per-variant expansion counts, in lineup order.
    pub results: Vec<VariantResult>,
    /// `(heuristic value, true distance)` per reachable node, for the
    /// external rank-correlation pass.
    pub h_dstar_pairs: Vec<(u32, u32)>,
}

/// The raw output of an experiment: one record per `(delta, trial)` cell,
/// ordered by delta, then trial index.
///
/// Deliberately unaggregated; medians, extremes, and serialization belong
/// to the analytics pass, not the driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperimentResult {
    pub records: Vec<TrialRecord>,
}

impl ExperimentResult {
    /// Iterates over the records of one sweep step.
    pub fn for_delta(&self, delta: u32) -> impl Iterator<Item = &TrialRecord> {
        self.records.iter().filter(move |r| r.delta == delta)
    }

    /// Expansion counts of one variant at one sweep step, in trial order.
    pub fn expansions(&self, delta: u32, label: &str) -> Vec<u64> {
        self.for_delta(delta)
            .flat_map(|r| r.results.iter())
            .filter(|v| v.label == label)
            .map(|v| v.expansions)
            .collect()
    }
}
