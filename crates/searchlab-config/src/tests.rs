//! Tests for experiment configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        nodes = 200
        gamma = 3.0
        min_edges = 50
        deltas = [2, 4]
        trials = 10
        seed = 7

        [policy]
        tau = 0.5
        alpha = 2.0
        beta = 0.0
        nth = 5
    "#;

    let config = ExperimentConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.nodes, 200);
    assert_eq!(config.min_edges, 50);
    assert_eq!(config.deltas, vec![2, 4]);
    assert_eq!(config.trials, 10);
    assert_eq!(config.seed, 7);
    assert_eq!(config.policy.nth, 5);
    assert!((config.policy.tau - 0.5).abs() < 1e-12);
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config = ExperimentConfig::from_toml_str("trials = 3").unwrap();
    assert_eq!(config.trials, 3);
    assert_eq!(config.nodes, 10_000);
    assert_eq!(config.seed, 2021);
    assert_eq!(config.policy, PolicyParams::default());
}

#[test]
fn test_defaults_match_reference_sweep() {
    let config = ExperimentConfig::default();
    assert_eq!(config.nodes, 10_000);
    assert_eq!(config.min_edges, 1_000);
    assert_eq!(config.deltas, (1..=9).collect::<Vec<_>>());
    assert_eq!(config.trials, 1_000);
    config.validate().unwrap();
}

#[test]
fn test_builder() {
    let config = ExperimentConfig::new()
        .with_seed(123)
        .with_trials(5)
        .with_deltas(vec![1, 3]);
    assert_eq!(config.seed, 123);
    assert_eq!(config.trials, 5);
    assert_eq!(config.deltas, vec![1, 3]);
}

#[test]
fn test_edge_probability_from_gamma() {
    let config = ExperimentConfig::from_toml_str("nodes = 11\ngamma = 2.0").unwrap();
    assert!((config.edge_probability() - 0.2).abs() < 1e-12);
}

#[test]
fn test_validate_rejects_bad_policy_params() {
    let mut config = ExperimentConfig::default();
    config.policy.nth = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let mut config = ExperimentConfig::default();
    config.policy.tau = 0.0;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let mut config = ExperimentConfig::default();
    config.policy.alpha = -1.0;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_validate_rejects_degenerate_sweep() {
    let mut config = ExperimentConfig::default();
    config.deltas.clear();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let mut config = ExperimentConfig::default();
    config.trials = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    // gamma larger than n - 1 pushes p above 1.
    let config = ExperimentConfig::from_toml_str("nodes = 3\ngamma = 5.0");
    assert!(config.is_err());
}

#[test]
fn test_missing_file_falls_back_to_default() {
    let config = ExperimentConfig::load("does-not-exist.toml").unwrap_or_default();
    assert_eq!(config, ExperimentConfig::default());
}
