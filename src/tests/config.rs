//src/tests/config.rs

use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_TOLERANCE, ImitationConfig, Method, RunConfig, SolverSettings};
use crate::error::ConfigError;

#[test]
fn defaults_match_reference_run() {
    let cfg = RunConfig::default();
    assert_eq!(cfg.payoffs.player_one, [1.0, 0.0, 0.0, 1.0]);
    assert_eq!(cfg.payoffs.player_two, [0.0, 1.0, 1.0, 0.0]);
    assert_eq!(cfg.initial_state, [0.1, 0.25, 0.45, 0.2]);
    assert_eq!(cfg.time_span, (0.0, 150.0));
    assert_eq!(cfg.sample_count, 1500);
    assert_eq!(cfg.output_path, PathBuf::from("Solutions.txt"));
    assert!(cfg.show_plot);
    assert_eq!(cfg.plot_path, None);
    assert_eq!(cfg.solver.method, Method::Auto);
    assert_eq!(cfg.solver.rtol, DEFAULT_TOLERANCE);
}

#[test]
fn partial_json_keeps_defaults() {
    let json = r#"{
        "payoffs": { "player_one": [2, 0, 0, 1], "player_two": [1, 0, 0, 2] },
        "time_span": [0, 20],
        "solver": { "method": "stiff" }
    }"#;
    let cfg: RunConfig = serde_json::from_str(json).expect("parse");

    assert_eq!(cfg.payoffs.player_one, [2.0, 0.0, 0.0, 1.0]);
    assert_eq!(cfg.time_span, (0.0, 20.0));
    assert_eq!(cfg.solver.method, Method::Stiff);
    assert_eq!(cfg.solver.max_steps_per_sample, 500);
    assert_eq!(cfg.sample_count, 1500);
    assert!(cfg.show_plot);
    assert_eq!(cfg.plot_path, None);
}

#[test]
fn headless_json_disables_window() {
    let cfg: RunConfig = serde_json::from_str(r#"{ "show_plot": false, "plot_path": "out.svg" }"#).expect("parse");
    assert!(!cfg.show_plot);
    assert_eq!(cfg.plot_path, Some(PathBuf::from("out.svg")));
}

#[test]
fn imitation_json_with_seed() {
    let cfg: ImitationConfig = serde_json::from_str(r#"{ "population": 50, "seed": 9 }"#).expect("parse");
    assert_eq!(cfg.population, 50);
    assert_eq!(cfg.seed, Some(9));
    assert_eq!(cfg.runs, 10);
    assert!(cfg.validate().is_ok());
}

#[test]
fn invalid_solver_settings_are_rejected() {
    let bad = SolverSettings {
        rtol: 0.0,
        ..SolverSettings::default()
    };
    assert!(matches!(bad.validate(), Err(ConfigError::InvalidTolerance { .. })));

    let bad = SolverSettings {
        max_steps_per_sample: 0,
        ..SolverSettings::default()
    };
    assert!(matches!(bad.validate(), Err(ConfigError::InvalidStepLimit)));
}

#[test]
fn missing_config_file_is_reported() {
    let err = RunConfig::load(Path::new("tests/outputs/config/does_not_exist.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
