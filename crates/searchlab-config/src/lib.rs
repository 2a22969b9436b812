//! Configuration system for searchlab experiments.
//!
//! Load an experiment sweep from TOML to control instance generation,
//! the delta sweep, trial counts, and selection-policy parameters without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use searchlab_config::ExperimentConfig;
//!
//! let config = ExperimentConfig::from_toml_str(r#"
//!     nodes = 500
//!     gamma = 2.0
//!     min_edges = 100
//!     deltas = [1, 2, 3]
//!     trials = 50
//!     seed = 2021
//!
//!     [policy]
//!     tau = 1.0
//!     alpha = 1.0
//!     beta = 1.0
//!     nth = 3
//! "#).unwrap();
//!
//! assert_eq!(config.nodes, 500);
//! assert_eq!(config.deltas, vec![1, 2, 3]);
//! assert!((config.edge_probability() - 2.0 / 499.0).abs() < 1e-12);
//! ```
//!
//! Use defaults when no file is present:
//!
//! ```
//! use searchlab_config::ExperimentConfig;
//!
//! let config = ExperimentConfig::load("experiment.toml").unwrap_or_default();
//! assert_eq!(config.seed, 2021);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Parameters of the randomized selection policies.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct PolicyParams {
    /// Softmin temperature; lower values sharpen the distribution.
    pub tau: f64,
    /// Linear-weight slope.
    pub alpha: f64,
    /// Linear-weight offset.
    pub beta: f64,
    /// Number of smallest distinct heuristic values the nth policy keeps.
    pub nth: usize,
}

impl Default for PolicyParams {
    fn default() -> Self {
        Self {
            tau: 1.0,
            alpha: 1.0,
            beta: 1.0,
            nth: 3,
        }
    }
}

/// A full experiment sweep: instance-generation parameters, the delta
/// values to sweep over, trial count, and the base random seed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ExperimentConfig {
    /// Nodes per generated graph.
    pub nodes: u32,
    /// Expected out-degree; the edge probability is `gamma / (nodes - 1)`.
    pub gamma: f64,
    /// Minimum accepted edge count per sampled graph.
    pub min_edges: usize,
    /// Local-minimum widths to sweep.
    pub deltas: Vec<u32>,
    /// Trials per delta value.
    pub trials: usize,
    /// Base random seed; each trial derives its own seed from it.
    pub seed: u64,
    /// Selection-policy parameters shared by all policy variants.
    pub policy: PolicyParams,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            nodes: 10_000,
            gamma: 2.0,
            min_edges: 1_000,
            deltas: (1..=9).collect(),
            trials: 1_000,
            seed: 2021,
            policy: PolicyParams::default(),
        }
    }
}

impl ExperimentConfig {
    /// Creates a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Sets the base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the trial count per delta.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the delta sweep.
    pub fn with_deltas(mut self, deltas: Vec<u32>) -> Self {
        self.deltas = deltas;
        self
    }

    /// The G(n, p) edge probability implied by `gamma`.
    pub fn edge_probability(&self) -> f64 {
        self.gamma / f64::from(self.nodes.saturating_sub(1).max(1))
    }

    /// Checks that the configuration can produce valid trials.
    ///
    /// Policy parameters are checked here so that a bad sweep fails at
    /// setup, not silently mid-experiment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nodes < 2 {
            return Err(ConfigError::Invalid(format!(
                "nodes must be at least 2, got {}",
                self.nodes
            )));
        }
        let p = self.edge_probability();
        if !(p > 0.0 && p <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "gamma {} yields edge probability {p} outside (0, 1]",
                self.gamma
            )));
        }
        if self.deltas.is_empty() {
            return Err(ConfigError::Invalid("deltas must not be empty".into()));
        }
        if self.trials == 0 {
            return Err(ConfigError::Invalid("trials must be positive".into()));
        }
        if self.policy.nth == 0 {
            return Err(ConfigError::Invalid("policy.nth must be at least 1".into()));
        }
        if !(self.policy.tau > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "policy.tau must be positive, got {}",
                self.policy.tau
            )));
        }
        if self.policy.alpha < 0.0 || self.policy.beta < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "policy.alpha and policy.beta must be non-negative, got {} and {}",
                self.policy.alpha, self.policy.beta
            )));
        }
        Ok(())
    }
}
