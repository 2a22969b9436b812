//! Type-based open lists.
//!
//! Buckets generated-but-unexpanded nodes by a type key and hands bucket
//! choice to a [`SelectionPolicy`]. Nodes are never ordered inside a
//! bucket: removal is uniformly random, so no hidden FIFO bias reintroduces
//! the tie-breaking advantage the classic open list has.

use std::collections::HashMap;

use rand::Rng;
use searchlab_core::NodeId;

use crate::policy::{PolicyError, SelectionPolicy};

/// Flat type key: `(heuristic value, g value)`.
pub type TypeKey = (u32, u32);

/// Removes one node uniformly at random, via swap-with-last-and-pop.
fn random_pop(bucket: &mut Vec<NodeId>, rng: &mut impl Rng) -> NodeId {
    let i = rng.random_range(0..bucket.len());
    bucket.swap_remove(i)
}

/// The flat type-based open list: one bucket per `(h, g)` key.
///
/// Buckets are deleted the moment they empty, so the present keys are
/// always exactly the non-empty buckets. Policies that enumerate "all
/// present keys" rely on this.
#[derive(Debug, Default)]
pub struct TypedOpenList {
    buckets: HashMap<TypeKey, Vec<NodeId>>,
    len: usize,
}

impl TypedOpenList {
    /// Creates an empty open list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `node` to the bucket for `key`, creating it if absent.
    pub fn insert(&mut self, key: TypeKey, node: NodeId) {
        self.buckets.entry(key).or_default().push(node);
        self.len += 1;
    }

    /// Chooses a bucket via `policy`, removes one of its nodes uniformly
    /// at random, and drops the bucket if it emptied.
    pub fn select_and_remove(
        &mut self,
        policy: &SelectionPolicy,
        rng: &mut impl Rng,
    ) -> Result<NodeId, PolicyError> {
        let mut keys: Vec<TypeKey> = self.buckets.keys().copied().collect();
        // Sorted so the pick depends only on the generator stream, not on
        // hash iteration order.
        keys.sort_unstable();
        let key = policy.choose(&keys, rng)?;

        // Present: `choose` only returns keys it was given.
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return Err(PolicyError::NoCandidates);
        };
        let node = random_pop(bucket, rng);
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        self.len -= 1;
        Ok(node)
    }

    /// Total queued nodes across all buckets.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no node is queued.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

/// The h-stratified type-based open list: an outer level keyed by `h`
/// whose entries are flat `(h, g)` bucket maps.
///
/// The active policy chooses the h-level key; the inner `(h, g)` key is
/// always chosen uniformly. Required by every policy that reasons about
/// heuristic values independently of g.
#[derive(Debug, Default)]
pub struct StratifiedOpenList {
    levels: HashMap<u32, HashMap<TypeKey, Vec<NodeId>>>,
    len: usize,
}

impl StratifiedOpenList {
    /// Creates an empty open list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `node` to the bucket for `key` inside the `h` level,
    /// creating both as needed. `key.0` must equal `h`.
    pub fn insert(&mut self, h: u32, key: TypeKey, node: NodeId) {
        debug_assert_eq!(key.0, h);
        self.levels
            .entry(h)
            .or_default()
            .entry(key)
            .or_default()
            .push(node);
        self.len += 1;
    }

    /// Chooses an h level via `policy`, a bucket within it uniformly, and
    /// removes one of the bucket's nodes uniformly at random. Empty
    /// buckets and empty levels are dropped immediately.
    pub fn select_and_remove(
        &mut self,
        policy: &SelectionPolicy,
        rng: &mut impl Rng,
    ) -> Result<NodeId, PolicyError> {
        let mut hs: Vec<u32> = self.levels.keys().copied().collect();
        // Sorted at both levels for the same reason as the flat list: the
        // pick must depend only on the generator stream.
        hs.sort_unstable();
        let h = policy.choose(&hs, rng)?;

        let Some(level) = self.levels.get_mut(&h) else {
            return Err(PolicyError::NoCandidates);
        };
        let mut keys: Vec<TypeKey> = level.keys().copied().collect();
        keys.sort_unstable();
        let key = SelectionPolicy::Uniform.choose(&keys, rng)?;

        let Some(bucket) = level.get_mut(&key) else {
            return Err(PolicyError::NoCandidates);
        };
        let node = random_pop(bucket, rng);
        if bucket.is_empty() {
            level.remove(&key);
            if level.is_empty() {
                self.levels.remove(&h);
            }
        }
        self.len -= 1;
        Ok(node)
    }

    /// Total queued nodes across all levels.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True if no node is queued.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of non-empty h levels.
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}
