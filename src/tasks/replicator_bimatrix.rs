use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};

use crate::config::RunConfig;
use crate::error::{IntegrationError, ReportError};
use crate::report::{OutputFile, plot_trajectories, show_trajectories, write_json};
use crate::solvers::{Solution, integrate_replicator};
use crate::state::{GameParams, PayoffMatrix};

/// ==============================================================================================
/// ===================================== Experiment Runner ======================================
/// ==============================================================================================

/// What a finished run produced.
///     - `file_error`: why the text output is missing (run still completed)
///     - `plotted`: whether the plot was shown or exported
#[derive(Debug)]
pub struct RunReport {
    pub solution: Solution,
    pub file_error: Option<ReportError>,
    pub plotted: bool,
}

/// Build the symmetrized payoff matrix and log it once.
pub fn setup(params: &GameParams) -> PayoffMatrix {
    let matrix = PayoffMatrix::symmetrize(params);
    info!("symmetrized payoff matrix:");
    for line in matrix.to_string().lines() {
        info!("    {line}");
    }
    matrix
}

pub(crate) fn progress_bar(len: u64, message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("{msg} [{bar:40.cyan/blue}] {pos}/{len}") {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb.set_message(message.to_string());
    pb
}

/// Setup → integrate → report.
///     - output file cannot be opened / written: warning, run continues
///     - solver failure: returned as error, nothing is written
///     - plot window / export failure: warning; the plot step runs even without the output file
pub fn run(config: &RunConfig, show_progress: bool) -> Result<RunReport, IntegrationError> {
    // Acquire the output file up front; released on every exit path.
    let output = OutputFile::create(&config.output_path);
    if let Err(err) = &output {
        warn!("{err}");
    }

    let matrix = setup(&config.payoffs);

    let pb = progress_bar(config.sample_count as u64, "integrating", show_progress);
    let solution = integrate_replicator(
        &matrix,
        &config.initial_state,
        config.time_span,
        config.sample_count,
        &config.solver,
        Some(&pb),
    )?;
    pb.finish_and_clear();
    info!(
        "integrated {} samples, max |Σx − 1| = {:e}",
        solution.series.len(),
        solution.series.max_mass_deviation()
    );

    let file_error = match output.and_then(|out| out.write_solution(&config.payoffs, &solution.series)) {
        Ok(()) => {
            info!("trajectory written to {}", config.output_path.display());
            None
        }
        Err(err @ ReportError::Open { .. }) => Some(err),
        Err(err) => {
            warn!("{err}");
            Some(err)
        }
    };

    if let Some(path) = &config.json_path {
        match write_json(path, &solution) {
            Ok(()) => info!("trajectory JSON written to {}", path.display()),
            Err(err) => warn!("{err}"),
        }
    }

    let mut plotted = false;
    if let Some(path) = &config.plot_path {
        match plot_trajectories(path, &solution.series) {
            Ok(()) => {
                info!("plot exported to {}", path.display());
                plotted = true;
            }
            Err(err) => warn!("{err}"),
        }
    }
    if config.show_plot {
        info!("showing plot; close the window to finish");
        match show_trajectories(&solution.series) {
            Ok(()) => plotted = true,
            Err(err) => warn!("{err}"),
        }
    }

    Ok(RunReport {
        solution,
        file_error,
        plotted,
    })
}
