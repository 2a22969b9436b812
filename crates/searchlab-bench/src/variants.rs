//! The standard variant lineup.

use searchlab_config::PolicyParams;
use searchlab_engine::{SearchVariant, SelectionPolicy};

/// A labeled search variant within an experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantSpec {
    /// Stable label used to identify the variant in trial records.
    pub label: String,
    /// The variant handed to `run_trial`.
    pub variant: SearchVariant,
}

impl VariantSpec {
    /// Creates a labeled variant.
    pub fn new(label: impl Into<String>, variant: SearchVariant) -> Self {
        Self {
            label: label.into(),
            variant,
        }
    }
}

/// The seven standard variants compared per trial: baseline GBFS, flat and
/// h-stratified uniform type-based search, and the nth, linear, softmin,
/// and cheating policies at the h-stratified level.
///
/// The cheating variant is seeded with the sweep's current `delta`, the
/// ground-truth local-minimum width. It is an oracle upper bound; no real
/// heuristic can realize it.
pub fn standard_variants(policy: &PolicyParams, delta: u32) -> Vec<VariantSpec> {
    vec![
        VariantSpec::new("gbfs", SearchVariant::Classic),
        VariantSpec::new(
            "type",
            SearchVariant::TypeBased {
                stratified: false,
                policy: SelectionPolicy::Uniform,
            },
        ),
        VariantSpec::new(
            "type-h",
            SearchVariant::TypeBased {
                stratified: true,
                policy: SelectionPolicy::Uniform,
            },
        ),
        VariantSpec::new(
            format!("{}-type-h", policy.nth),
            SearchVariant::TypeBased {
                stratified: true,
                policy: SelectionPolicy::Nth { nth: policy.nth },
            },
        ),
        VariantSpec::new(
            "lin-type-h",
            SearchVariant::TypeBased {
                stratified: true,
                policy: SelectionPolicy::Linear {
                    alpha: policy.alpha,
                    beta: policy.beta,
                },
            },
        ),
        VariantSpec::new(
            "softmin-type-h",
            SearchVariant::TypeBased {
                stratified: true,
                policy: SelectionPolicy::Softmin { tau: policy.tau },
            },
        ),
        VariantSpec::new(
            "cheating-type-h",
            SearchVariant::TypeBased {
                stratified: true,
                policy: SelectionPolicy::Cheat { delta },
            },
        ),
    ]
}
