use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::LevelFilter;

use replicator_bimatrix_rs::config::{ImitationConfig, RunConfig};
use replicator_bimatrix_rs::logging::setup_logger;
use replicator_bimatrix_rs::tasks;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Options {
    #[arg(short = 'v', long = "log_level", default_value = "info")]
    log_level: LevelFilter,

    #[arg(short = 'o', long = "logfile")]
    log_file: Option<PathBuf>,

    /// JSON file with run parameters; missing fields keep their defaults.
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    #[arg(long = "no-progress")]
    no_progress: bool,

    /// Do not open the plot window (headless runs).
    #[arg(long = "no-plot")]
    no_plot: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Integrate the replicator equation (default).
    Ode,
    /// Monte Carlo pairwise-imitation dynamics in a finite population.
    Imitation,
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    setup_logger(options.log_level, options.log_file.as_deref()).context("logger setup")?;
    let show_progress = !options.no_progress;

    match options.command.unwrap_or(Command::Ode) {
        Command::Ode => {
            let mut config = match &options.config {
                Some(path) => RunConfig::load(path)?,
                None => RunConfig::default(),
            };
            if options.no_plot {
                config.show_plot = false;
            }
            tasks::replicator_bimatrix::run(&config, show_progress)
                .context("replicator integration failed")?;
        }
        Command::Imitation => {
            let config = match &options.config {
                Some(path) => ImitationConfig::load(path)?,
                None => ImitationConfig::default(),
            };
            tasks::imitation::run(&config, show_progress).context("imitation run failed")?;
        }
    }

    Ok(())
}
