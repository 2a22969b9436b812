//! Randomized type-selection policies.
//!
//! A policy chooses one key among the currently non-empty keys of a
//! bucketed open list. Keys expose their heuristic component through
//! [`HKeyed`], so the same policy works at the flat `(h, g)` level and at
//! the h-stratified outer level.

use rand::Rng;
use thiserror::Error;

/// Errors raised by policy validation or selection.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PolicyError {
    /// `nth` must keep at least one distinct heuristic value.
    #[error("nth policy requires nth >= 1, got {0}")]
    InvalidNth(usize),

    /// Softmin temperature must be positive.
    #[error("softmin policy requires tau > 0, got {0}")]
    InvalidTau(f64),

    /// Linear weights stay positive only for non-negative alpha and beta.
    #[error("linear policy requires alpha >= 0 and beta >= 0, got alpha={alpha}, beta={beta}")]
    InvalidLinear { alpha: f64, beta: f64 },

    /// Selection was invoked on an empty candidate set.
    #[error("selection requested from an empty candidate set")]
    NoCandidates,

    /// The candidate weights do not form a valid distribution (all zero,
    /// or not finite).
    #[error("selection weights do not form a valid probability distribution")]
    DegenerateWeights,
}

/// Bucket keys that carry a heuristic value as their primary component.
pub trait HKeyed: Copy {
    /// The heuristic value the policies reason about.
    fn h(&self) -> u32;
}

impl HKeyed for u32 {
    fn h(&self) -> u32 {
        *self
    }
}

impl HKeyed for (u32, u32) {
    fn h(&self) -> u32 {
        self.0
    }
}

/// A closed enumeration of type-selection strategies.
///
/// Selected once at trial configuration time; each variant implements a
/// single capability, [`SelectionPolicy::choose`].
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use searchlab_engine::SelectionPolicy;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(0);
/// // nth = 1 keeps only the keys with the smallest heuristic value.
/// let policy = SelectionPolicy::Nth { nth: 1 };
/// let key = policy.choose(&[(1, 0), (3, 0), (3, 1)], &mut rng).unwrap();
/// assert_eq!(key, (1, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionPolicy {
    /// Pick a key uniformly at random.
    Uniform,
    /// Weight key `k` by `exp(-h(k) / tau)`; lower heuristic values get
    /// exponentially higher weight.
    Softmin { tau: f64 },
    /// Weight key `k` by `bias - alpha * h(k)` with
    /// `bias = beta + 1 + alpha * max(h)`, which keeps every weight
    /// positive.
    Linear { alpha: f64, beta: f64 },
    /// Pick uniformly among keys whose heuristic value is one of the `nth`
    /// smallest distinct values present.
    Nth { nth: usize },
    /// Pick uniformly among keys within `delta` of the smallest heuristic
    /// value present. `delta` is the ground-truth local-minimum width the
    /// heuristic was built with, so this is an oracle upper bound that no
    /// real heuristic can realize.
    Cheat { delta: u32 },
}

impl SelectionPolicy {
    /// Checks the policy parameters. Called at trial setup so that bad
    /// parameters surface as configuration errors, not as silent fallbacks
    /// mid-search.
    pub fn validate(&self) -> Result<(), PolicyError> {
        match *self {
            SelectionPolicy::Uniform | SelectionPolicy::Cheat { .. } => Ok(()),
            SelectionPolicy::Softmin { tau } => {
                if tau > 0.0 {
                    Ok(())
                } else {
                    Err(PolicyError::InvalidTau(tau))
                }
            }
            SelectionPolicy::Linear { alpha, beta } => {
                if alpha >= 0.0 && beta >= 0.0 {
                    Ok(())
                } else {
                    Err(PolicyError::InvalidLinear { alpha, beta })
                }
            }
            SelectionPolicy::Nth { nth } => {
                if nth >= 1 {
                    Ok(())
                } else {
                    Err(PolicyError::InvalidNth(nth))
                }
            }
        }
    }

    /// True if the policy reasons about heuristic values independently of
    /// g, and therefore needs the h-stratified open list.
    pub fn requires_stratified(&self) -> bool {
        !matches!(self, SelectionPolicy::Uniform)
    }

    /// Chooses one key among `candidates`.
    ///
    /// A single candidate is returned without consuming randomness, which
    /// keeps seeded runs reproducible across policies.
    pub fn choose<K: HKeyed>(
        &self,
        candidates: &[K],
        rng: &mut impl Rng,
    ) -> Result<K, PolicyError> {
        match candidates {
            [] => return Err(PolicyError::NoCandidates),
            [only] => return Ok(*only),
            _ => {}
        }

        match *self {
            SelectionPolicy::Uniform => {
                Ok(candidates[rng.random_range(0..candidates.len())])
            }
            SelectionPolicy::Softmin { tau } => {
                let weights: Vec<f64> = candidates
                    .iter()
                    .map(|k| (-f64::from(k.h()) / tau).exp())
                    .collect();
                sample_weighted(candidates, &weights, rng)
            }
            SelectionPolicy::Linear { alpha, beta } => {
                let max_h = candidates.iter().map(|k| k.h()).max().unwrap_or(0);
                let bias = beta + 1.0 + alpha * f64::from(max_h);
                let weights: Vec<f64> = candidates
                    .iter()
                    .map(|k| bias - alpha * f64::from(k.h()))
                    .collect();
                sample_weighted(candidates, &weights, rng)
            }
            SelectionPolicy::Nth { nth } => {
                let mut distinct: Vec<u32> = candidates.iter().map(|k| k.h()).collect();
                distinct.sort_unstable();
                distinct.dedup();
                distinct.truncate(nth);
                let kept: Vec<K> = candidates
                    .iter()
                    .filter(|k| distinct.binary_search(&k.h()).is_ok())
                    .copied()
                    .collect();
                uniform_among(&kept, rng)
            }
            SelectionPolicy::Cheat { delta } => {
                let min_h = candidates.iter().map(|k| k.h()).min().unwrap_or(0);
                let kept: Vec<K> = candidates
                    .iter()
                    .filter(|k| k.h() <= min_h.saturating_add(delta))
                    .copied()
                    .collect();
                uniform_among(&kept, rng)
            }
        }
    }
}

fn uniform_among<K: Copy>(candidates: &[K], rng: &mut impl Rng) -> Result<K, PolicyError> {
    match candidates {
        [] => Err(PolicyError::NoCandidates),
        [only] => Ok(*only),
        _ => Ok(candidates[rng.random_range(0..candidates.len())]),
    }
}

/// Samples a candidate proportionally to its weight.
///
/// Normalizes by the total weight and walks the cumulative sum; rejects
/// all-zero or non-finite totals instead of falling back to uniform.
fn sample_weighted<K: Copy>(
    candidates: &[K],
    weights: &[f64],
    rng: &mut impl Rng,
) -> Result<K, PolicyError> {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(PolicyError::DegenerateWeights);
    }

    let mut target = rng.random::<f64>() * total;
    for (k, w) in candidates.iter().zip(weights) {
        target -= *w;
        if target < 0.0 {
            return Ok(*k);
        }
    }
    // Rounding can leave a sliver of target; it belongs to the last key.
    Ok(candidates[candidates.len() - 1])
}
