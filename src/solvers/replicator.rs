use indicatif::ProgressBar;
use log::warn;
use ndarray::Array1;

use super::control::SolverStats;
use super::odeint::integrate;
use super::system::ReplicatorSystem;
use crate::config::SolverSettings;
use crate::error::IntegrationError;
use crate::state::{PayoffMatrix, TimeSeries, Vec4, linspace};

/// Largest |Σx(0) − 1| accepted silently.
const MASS_TOLERANCE: f64 = 1e-9;

/// Trajectory plus solver counters.
#[derive(Clone, Debug)]
pub struct Solution {
    pub series: TimeSeries,
    pub stats: SolverStats,
}

/// Solve the replicator IVP on `sample_count` equally spaced points of `time_span`.
///     Inputs:
///         - `matrix`: symmetrized payoff matrix M
///         - `x0`: initial frequencies (expected on the simplex; deviations are only reported)
///         - `time_span`: (start, end)
///         - `sample_count`: number of output rows, endpoints included
///     Any solver failure is returned as-is; no partial trajectory is produced.
pub fn integrate_replicator(
    matrix: &PayoffMatrix,          // M
    x0: &Vec4,                      // x(0)
    time_span: (f64, f64),          // [t_start, t_end]
    sample_count: usize,            // output rows
    settings: &SolverSettings,      // method + tolerances
    progress: Option<&ProgressBar>, // optional progress bar
) -> Result<Solution, IntegrationError> {
    let mass: f64 = x0.iter().sum();
    if (mass - 1.0).abs() > MASS_TOLERANCE || x0.iter().any(|&v| v < 0.0) {
        // dx₃/dt is taken from conservation, so off-simplex starts drift silently.
        warn!("initial state {x0:?} is not on the simplex (sum = {mass})");
    }

    let times = linspace(time_span.0, time_span.1, sample_count)?;
    let system = ReplicatorSystem::new(*matrix);
    let (states, stats) = integrate(&system, x0, &times, settings, progress)?;

    Ok(Solution {
        series: TimeSeries::new(Array1::from_vec(times), states),
        stats,
    })
}
