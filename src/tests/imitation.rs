//src/tests/imitation.rs

use std::fs::{self, create_dir_all};
use std::path::PathBuf;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::ImitationConfig;
use crate::error::{ConfigError, ImitationError, ReportError};
use crate::solvers::{ImitationModel, simulate};
use crate::state::{GameParams, PayoffMatrix};
use crate::tasks::imitation::run;

const X0: [f64; 4] = [0.1, 0.25, 0.45, 0.2];

#[test]
fn seeded_runs_are_reproducible() {
    let matrix = PayoffMatrix::symmetrize(&GameParams::default());

    let mut rng_a = ChaCha8Rng::seed_from_u64(7);
    let mut rng_b = ChaCha8Rng::seed_from_u64(7);
    let a = simulate(&matrix, &X0, 200, 5_000, 3, 50, &mut rng_a, None).expect("simulate");
    let b = simulate(&matrix, &X0, 200, 5_000, 3, 50, &mut rng_b, None).expect("simulate");

    assert_eq!(a.samples().count(), 101);
    assert_eq!(a.runs(), 3);
    for ((ta, xa), (tb, xb)) in a.samples().zip(b.samples()) {
        assert_eq!(ta, tb);
        assert_eq!(xa, xb);
    }
}

#[test]
fn population_size_is_conserved() {
    let matrix = PayoffMatrix::symmetrize(&GameParams::default());
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let series = simulate(&matrix, &X0, 100, 10_000, 4, 100, &mut rng, None).expect("simulate");

    assert_eq!(series.frequencies(0), X0);
    for (step, x) in series.samples() {
        let mass: f64 = x.iter().sum();
        assert!((mass - 1.0).abs() < 1e-12, "step {step}: {x:?}");
    }
}

#[test]
fn dominant_strategy_never_loses_players() {
    let matrix = PayoffMatrix::symmetrize(&super::prisoners_dilemma());
    let model = ImitationModel::new(matrix, 100, 1).expect("model");
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let record = model.run(&X0, 30_000, &mut rng);
    assert_eq!(record.len(), 30_001);
    for pair in record.windows(2) {
        assert!(pair[1][3] >= pair[0][3]);
    }
    let last = record[record.len() - 1];
    assert!(last[3] >= 90, "final counts {last:?}");
}

#[test]
fn pipeline_writes_averaged_table() {
    let dir = PathBuf::from("tests/outputs/imitation/table");
    let _ = create_dir_all(&dir);
    let config = ImitationConfig {
        payoffs: super::prisoners_dilemma(),
        population: 100,
        steps: 1_000,
        runs: 2,
        save_interval: 10,
        seed: Some(42),
        output_path: dir.join("strat_freq_x_time.txt"),
        ..ImitationConfig::default()
    };

    let series = run(&config, false).expect("run");
    assert_eq!(series.runs(), 2);

    let text = fs::read_to_string(&config.output_path).expect("read output");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10 + 101);
    assert_eq!(lines[0], "Imitation dynamics with 4 strategies");
    assert_eq!(lines[1], "N = 100, S = 2");
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "A = 3.00 B = 0.00");
    assert_eq!(lines[4], "C = 5.00 D = 1.00");
    assert_eq!(lines[6], "a = 3.00 b = 0.00");
    assert_eq!(lines[7], "c = 5.00 d = 1.00");
    assert_eq!(lines[9], "t|1     |2     |3     |4  ");
    assert_eq!(lines[10], "0 0.1000 0.2500 0.4500 0.2000");
    assert!(lines[110].starts_with("1000 "));
}

#[test]
fn unwritable_output_aborts_before_simulating() {
    let config = ImitationConfig {
        steps: 10,
        runs: 1,
        output_path: PathBuf::from("tests/outputs/imitation/no_such_dir/out.txt"),
        ..ImitationConfig::default()
    };
    let err = run(&config, false).unwrap_err();
    assert!(matches!(err, ImitationError::Report(ReportError::Open { .. })));
}

#[test]
fn tiny_population_is_rejected() {
    let config = ImitationConfig {
        population: 1,
        ..ImitationConfig::default()
    };
    let err = run(&config, false).unwrap_err();
    assert!(matches!(
        err,
        ImitationError::Config(ConfigError::PopulationTooSmall(1))
    ));
}

#[test]
fn simulate_rejects_lone_player() {
    let matrix = PayoffMatrix::symmetrize(&GameParams::default());
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let err = simulate(&matrix, &X0, 1, 100, 1, 1, &mut rng, None).unwrap_err();
    assert!(matches!(err, ConfigError::PopulationTooSmall(1)));

    let err = simulate(&matrix, &X0, 0, 100, 1, 1, &mut rng, None).unwrap_err();
    assert!(matches!(err, ConfigError::PopulationTooSmall(0)));
}
