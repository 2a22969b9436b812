//! The per-trial entry point.
//!
//! A trial generates one random instance, derives the local-minima
//! heuristic for it, runs one search variant, and reports the expansion
//! count plus the `(h, d*)` pairing that the external rank-correlation
//! pass consumes. Every trial owns its own seeded generator, so trials are
//! independent and may run in parallel.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use searchlab_core::{generate, GenerateError, HeuristicMap, Instance, InstanceParams};
use thiserror::Error;

use crate::error::SearchError;
use crate::gbfs::gbfs;
use crate::policy::SelectionPolicy;
use crate::type_gbfs::{type_gbfs, ExpansionMode};

/// Errors raised by a trial.
#[derive(Debug, Error)]
pub enum TrialError {
    /// The trial parameters cannot produce a valid run.
    #[error("invalid trial configuration: {0}")]
    Config(String),

    /// Instance generation failed.
    #[error(transparent)]
    Generate(#[from] GenerateError),

    /// The search itself failed.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Which search the trial runs.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchVariant {
    /// Baseline strict GBFS.
    Classic,
    /// Type-based GBFS, alternating classic and bucketed expansion.
    TypeBased {
        /// Use the h-stratified addressing scheme. Required for every
        /// policy other than [`SelectionPolicy::Uniform`].
        stratified: bool,
        /// The bucket-selection policy.
        policy: SelectionPolicy,
    },
}

impl SearchVariant {
    /// Validates the variant at setup time.
    pub fn validate(&self) -> Result<(), TrialError> {
        match self {
            SearchVariant::Classic => Ok(()),
            SearchVariant::TypeBased { stratified, policy } => {
                policy
                    .validate()
                    .map_err(|e| TrialError::Config(e.to_string()))?;
                if !*stratified && policy.requires_stratified() {
                    return Err(TrialError::Config(format!(
                        "policy {policy:?} requires the h-stratified open list"
                    )));
                }
                Ok(())
            }
        }
    }
}

/// Scalar parameters of one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialParams {
    /// Instance-generation parameters.
    pub instance: InstanceParams,
    /// Local-minimum width of the heuristic constructor.
    pub delta: u32,
    /// Seed of the trial's own random stream. Trials with equal seeds and
    /// instance parameters see the identical instance, regardless of
    /// variant: generation draws come first in the stream.
    pub seed: u64,
    /// The search variant to run.
    pub variant: SearchVariant,
}

/// What a trial produces.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialOutcome {
    /// Nodes expanded before (and including) the goal.
    pub expansions: u64,
    /// `(heuristic value, true distance)` for every node with a finite
    /// distance. Reduced to a rank-correlation statistic by the external
    /// analytics pass, never by the engine.
    pub h_dstar_pairs: Vec<(u32, u32)>,
}

/// A generated instance with its heuristic, ready to run any number of
/// variants.
///
/// Generation is the dominant cost of a trial, so drivers that compare
/// several variants on the same `(instance params, delta, seed)` cell
/// prepare once and run each variant against it. Every run starts from a
/// clone of the post-generation generator state, so its outcome is
/// identical to calling [`run_trial`] with the same parameters.
#[derive(Debug, Clone)]
pub struct PreparedTrial {
    instance: Instance,
    h_values: HeuristicMap,
    h_dstar_pairs: Vec<(u32, u32)>,
    rng: ChaCha8Rng,
}

impl PreparedTrial {
    /// Generates the instance and derives the heuristic.
    pub fn new(
        instance_params: &InstanceParams,
        delta: u32,
        seed: u64,
    ) -> Result<Self, TrialError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let instance = generate(instance_params, &mut rng)?;
        let h_values = HeuristicMap::local_minima(&instance.dstar, delta);

        let h_dstar_pairs: Vec<(u32, u32)> = instance
            .dstar
            .iter()
            .filter_map(|(node, d)| h_values.get(node).map(|h| (h, d)))
            .collect();

        Ok(Self {
            instance,
            h_values,
            h_dstar_pairs,
            rng,
        })
    }

    /// The `(heuristic value, true distance)` pairing of this instance.
    pub fn h_dstar_pairs(&self) -> &[(u32, u32)] {
        &self.h_dstar_pairs
    }

    /// Runs one variant and returns its expansion count.
    pub fn run(&self, variant: &SearchVariant) -> Result<u64, TrialError> {
        variant.validate()?;

        let expansions = match variant {
            SearchVariant::Classic => gbfs(
                &self.instance.graph,
                self.instance.start,
                self.instance.goal,
                &self.h_values,
            )?,
            SearchVariant::TypeBased { stratified, policy } => {
                let mut rng = self.rng.clone();
                type_gbfs(
                    &self.instance.graph,
                    self.instance.start,
                    self.instance.goal,
                    &self.h_values,
                    *stratified,
                    policy,
                    ExpansionMode::Classic,
                    &mut rng,
                )?
            }
        };
        Ok(expansions)
    }
}

/// Runs a single trial.
///
/// # Example
///
/// ```
/// use searchlab_core::InstanceParams;
/// use searchlab_engine::{run_trial, SearchVariant, TrialParams};
///
/// let params = TrialParams {
///     instance: InstanceParams {
///         nodes: 100,
///         edge_probability: 0.05,
///         min_edges: 20,
///     },
///     delta: 2,
///     seed: 2021,
///     variant: SearchVariant::Classic,
/// };
/// let outcome = run_trial(&params).unwrap();
/// assert!(outcome.expansions >= 1);
/// ```
pub fn run_trial(params: &TrialParams) -> Result<TrialOutcome, TrialError> {
    params.variant.validate()?;

    let prepared = PreparedTrial::new(&params.instance, params.delta, params.seed)?;
    let expansions = prepared.run(&params.variant)?;

    tracing::debug!(
        delta = params.delta,
        seed = params.seed,
        expansions,
        variant = ?params.variant,
        "trial finished"
    );

    Ok(TrialOutcome {
        expansions,
        h_dstar_pairs: prepared.h_dstar_pairs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_instance() -> InstanceParams {
        InstanceParams {
            nodes: 80,
            edge_probability: 0.06,
            min_edges: 20,
        }
    }

    fn trial(variant: SearchVariant, seed: u64) -> TrialParams {
        TrialParams {
            instance: small_instance(),
            delta: 2,
            seed,
            variant,
        }
    }

    #[test]
    fn classic_trial_runs_and_reports_pairs() {
        let outcome = run_trial(&trial(SearchVariant::Classic, 1)).unwrap();
        assert!(outcome.expansions >= 1);
        assert!(!outcome.h_dstar_pairs.is_empty());
        // The goal contributes the (0, 0) pair.
        assert!(outcome.h_dstar_pairs.contains(&(0, 0)));
    }

    #[test]
    fn variants_share_the_instance_for_a_seed() {
        let classic = run_trial(&trial(SearchVariant::Classic, 5)).unwrap();
        let typed = run_trial(&trial(
            SearchVariant::TypeBased {
                stratified: true,
                policy: SelectionPolicy::Softmin { tau: 1.0 },
            },
            5,
        ))
        .unwrap();
        // Same seed, same generation draws, same instance: the pairing is
        // identical even though the searches differ.
        assert_eq!(classic.h_dstar_pairs, typed.h_dstar_pairs);
    }

    #[test]
    fn trials_are_reproducible() {
        let variant = SearchVariant::TypeBased {
            stratified: true,
            policy: SelectionPolicy::Nth { nth: 3 },
        };
        let a = run_trial(&trial(variant.clone(), 9)).unwrap();
        let b = run_trial(&trial(variant, 9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn stratified_trials_repeat_identically_for_every_seed() {
        // Bucket selection must draw only from the trial's generator, so
        // running the identical parameters twice yields the identical
        // expansion count.
        let variant = SearchVariant::TypeBased {
            stratified: true,
            policy: SelectionPolicy::Softmin { tau: 1.0 },
        };
        for seed in 0..6 {
            let a = run_trial(&trial(variant.clone(), seed)).unwrap();
            let b = run_trial(&trial(variant.clone(), seed)).unwrap();
            assert_eq!(a.expansions, b.expansions, "seed {seed}");
        }
    }

    #[test]
    fn prepared_trial_matches_individual_runs() {
        let variants = [
            SearchVariant::Classic,
            SearchVariant::TypeBased {
                stratified: false,
                policy: SelectionPolicy::Uniform,
            },
            SearchVariant::TypeBased {
                stratified: true,
                policy: SelectionPolicy::Softmin { tau: 1.0 },
            },
            SearchVariant::TypeBased {
                stratified: true,
                policy: SelectionPolicy::Cheat { delta: 2 },
            },
        ];
        let prepared = PreparedTrial::new(&small_instance(), 2, 17).unwrap();
        for variant in variants {
            let shared = prepared.run(&variant).unwrap();
            let standalone = run_trial(&trial(variant.clone(), 17)).unwrap();
            assert_eq!(shared, standalone.expansions, "variant {variant:?}");
            assert_eq!(prepared.h_dstar_pairs(), standalone.h_dstar_pairs);
        }
    }

    #[test]
    fn invalid_policy_parameters_fail_at_setup() {
        let err = run_trial(&trial(
            SearchVariant::TypeBased {
                stratified: true,
                policy: SelectionPolicy::Nth { nth: 0 },
            },
            1,
        ))
        .unwrap_err();
        assert!(matches!(err, TrialError::Config(_)));
    }

    #[test]
    fn weighted_policies_reject_the_flat_scheme() {
        let err = run_trial(&trial(
            SearchVariant::TypeBased {
                stratified: false,
                policy: SelectionPolicy::Softmin { tau: 1.0 },
            },
            1,
        ))
        .unwrap_err();
        assert!(matches!(err, TrialError::Config(_)));
    }

    #[test]
    fn flat_uniform_is_accepted() {
        let outcome = run_trial(&trial(
            SearchVariant::TypeBased {
                stratified: false,
                policy: SelectionPolicy::Uniform,
            },
            3,
        ))
        .unwrap();
        assert!(outcome.expansions >= 1);
    }
}
