use std::time::Instant;

use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::replicator_bimatrix::{progress_bar, setup};
use crate::config::ImitationConfig;
use crate::error::ImitationError;
use crate::report::OutputFile;
use crate::solvers::{initial_counts, simulate};
use crate::state::ImitationSeries;

/// Run `runs` imitation trajectories and write the averaged frequencies.
///     The output file is opened before simulating; failing to open it aborts the run.
pub fn run(config: &ImitationConfig, show_progress: bool) -> Result<ImitationSeries, ImitationError> {
    config.validate()?;
    let output = OutputFile::create(&config.output_path)?;

    let start = Instant::now();
    let matrix = setup(&config.payoffs);

    let counts = initial_counts(&config.initial_state, config.population);
    info!("initial counts {counts:?} of N = {}", config.population);

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    info!("seed = {seed}");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let pb = progress_bar(config.runs as u64, "imitation runs", show_progress);
    let series = simulate(
        &matrix,
        &config.initial_state,
        config.population,
        config.steps,
        config.runs,
        config.save_interval,
        &mut rng,
        Some(&pb),
    )?;
    pb.finish_and_clear();

    output.write_imitation(&config.payoffs, &series)?;
    info!(
        "averages written to {}; total time: {:.3}s",
        config.output_path.display(),
        start.elapsed().as_secs_f64()
    );

    Ok(series)
}
