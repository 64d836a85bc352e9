//src/tests/pipeline.rs

use std::fs::{self, create_dir_all};
use std::path::PathBuf;

use ndarray::{Array1, Array2};

use crate::config::RunConfig;
use crate::error::ReportError;
use crate::report::{WINDOW_SIZE, format_solution, plot_trajectories, render_frame};
use crate::state::{GameParams, TimeSeries};
use crate::tasks::replicator_bimatrix::run;

fn output_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/outputs/pipeline").join(name);
    let _ = create_dir_all(&dir);
    dir
}

fn quiet_config(output_path: PathBuf) -> RunConfig {
    RunConfig {
        output_path,
        show_plot: false,
        plot_path: None,
        ..RunConfig::default()
    }
}

#[test]
fn default_run_writes_expected_file() {
    let dir = output_dir("default_run");
    let config = quiet_config(dir.join("Solutions.txt"));

    let report = run(&config, false).expect("run");
    assert!(report.file_error.is_none());
    assert!(!report.plotted);

    let text = fs::read_to_string(&config.output_path).expect("read output");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4 + 1500);
    assert_eq!(lines[0], "RE solution");
    assert_eq!(lines[1], "A 1.00 B 0.00 C 0.00 D 1.00");
    assert_eq!(lines[2], "a 0.00 b 1.00 c 1.00 d 0.00");
    assert_eq!(lines[3], "t      x1     x2     x3     x4");
    assert_eq!(lines[4], "0.0000 0.1000 0.2500 0.4500 0.2000");
    assert!(lines[1503].starts_with("150.0000 "));

    for line in &lines[4..] {
        let fields: Vec<f64> = line
            .split(' ')
            .map(|f| f.parse().expect("numeric field"))
            .collect();
        assert_eq!(fields.len(), 5);
        let mass: f64 = fields[1..].iter().sum();
        // Four fields rounded to 4 dp.
        assert!((mass - 1.0).abs() <= 2.5e-4, "{line}");
    }
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = output_dir("repeat");
    let first = quiet_config(dir.join("first.txt"));
    let second = quiet_config(dir.join("second.txt"));

    run(&first, false).expect("first run");
    run(&second, false).expect("second run");

    let a = fs::read(&first.output_path).expect("read first");
    let b = fs::read(&second.output_path).expect("read second");
    assert!(!a.is_empty());
    assert_eq!(a, b);
}

#[test]
fn unwritable_output_does_not_abort() {
    let config = quiet_config(PathBuf::from("tests/outputs/pipeline/no_such_dir/nested/Solutions.txt"));

    let report = run(&config, false).expect("run completes without the file");
    assert!(matches!(report.file_error, Some(ReportError::Open { .. })));
    assert_eq!(report.solution.series.len(), 1500);
    assert!(report.solution.series.max_mass_deviation() < 1e-6);
    assert!(!config.output_path.exists());
}

#[test]
fn plot_still_rendered_without_output_file() {
    let dir = output_dir("plot_after_open_failure");
    let svg = dir.join("Solutions.svg");
    let _ = fs::remove_file(&svg);
    let mut config = quiet_config(dir.join("missing/Solutions.txt"));
    config.plot_path = Some(svg.clone());

    let report = run(&config, false).expect("run completes without the file");
    assert!(matches!(report.file_error, Some(ReportError::Open { .. })));
    assert!(report.plotted);
    assert!(fs::metadata(&svg).is_ok_and(|m| m.len() > 0));
}

#[test]
fn solver_failure_is_fatal() {
    let dir = output_dir("solver_failure");
    let mut config = quiet_config(dir.join("Solutions.txt"));
    config.payoffs = GameParams::new([f64::INFINITY, 0.0, 0.0, 1.0], [0.0, 1.0, 1.0, 0.0]);

    assert!(run(&config, false).is_err());
}

#[test]
fn json_export_lists_every_sample() {
    let dir = output_dir("json");
    let mut config = quiet_config(dir.join("Solutions.txt"));
    config.sample_count = 11;
    config.time_span = (0.0, 10.0);
    config.json_path = Some(dir.join("Solutions.json"));

    run(&config, false).expect("run");

    let text = fs::read_to_string(dir.join("Solutions.json")).expect("read json");
    let value: serde_json::Value = serde_json::from_str(&text).expect("parse json");
    assert_eq!(value["times"].as_array().map(Vec::len), Some(11));
    assert_eq!(value["states"].as_array().map(Vec::len), Some(11));
    assert_eq!(value["states"][0][2].as_f64(), Some(0.45));
    assert!(value["stats"]["accepted_steps"].as_u64().is_some_and(|n| n > 0));
}

#[test]
fn formatter_prints_negative_zero_like_source() {
    let times = Array1::from_vec(vec![0.0]);
    let states = Array2::from_shape_vec((1, 4), vec![-1e-12, 0.5, 0.25, 0.25]).expect("shape");
    let series = TimeSeries::new(times, states);

    let mut buf = Vec::new();
    format_solution(&mut buf, &GameParams::default(), &series).expect("format");
    let text = String::from_utf8(buf).expect("utf8");
    assert_eq!(text.lines().last(), Some("0.0000 -0.0000 0.5000 0.2500 0.2500"));
}

#[test]
fn window_frame_holds_the_traces() {
    let times = Array1::linspace(0.0, 10.0, 11);
    let states = Array2::from_shape_fn((11, 4), |(i, j)| if j == 0 { 0.1 * i as f64 } else { 0.0 });
    let series = TimeSeries::new(times, states);

    let frame = render_frame(&series, WINDOW_SIZE).expect("render");
    assert_eq!(frame.len(), (WINDOW_SIZE.0 * WINDOW_SIZE.1) as usize);
    assert!(frame.iter().any(|&px| px != 0x00FF_FFFF));
}

#[test]
fn plotting_empty_series_reports_error() {
    let dir = output_dir("plot");
    let series = TimeSeries::new(Array1::zeros(0), Array2::zeros((0, 4)));
    assert!(plot_trajectories(&dir.join("empty.svg"), &series).is_err());
    assert!(render_frame(&series, WINDOW_SIZE).is_err());
}
