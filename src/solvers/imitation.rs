/// ==============================================================================================
/// =============================== Pairwise Imitation (Monte Carlo) =============================
/// ==============================================================================================

use indicatif::ProgressBar;
use log::debug;
use rand::Rng;

use crate::error::ConfigError;
use crate::state::{ImitationSeries, NUM_STRATEGIES, PayoffMatrix, Vec4};

pub type Counts = [u32; NUM_STRATEGIES];

/// Integer head counts for `population` players from frequencies `x0`.
///     - strategies 0..2 get ⌊N·xᵢ⌋ (clamped to the players left)
///     - strategy 3 takes the remainder, so counts always sum to N
pub fn initial_counts(x0: &Vec4, population: usize) -> Counts {
    let mut counts = [0u32; NUM_STRATEGIES];
    let mut left = population;
    for (i, c) in counts.iter_mut().take(NUM_STRATEGIES - 1).enumerate() {
        let share = (population as f64 * x0[i]).floor().max(0.0) as usize;
        let share = share.min(left);
        *c = share as u32;
        left -= share;
    }
    counts[NUM_STRATEGIES - 1] = left as u32;
    counts
}

/// Well-mixed population playing the symmetrized game against everybody else.
pub struct ImitationModel {
    matrix: PayoffMatrix,
    population: usize,
    save_interval: usize,
    dw_max: f64,
}

impl ImitationModel {
    /// Needs a focal player and a distinct model player (N ≥ 2) and a save interval ≥ 1.
    pub fn new(matrix: PayoffMatrix, population: usize, save_interval: usize) -> Result<Self, ConfigError> {
        if population < 2 {
            return Err(ConfigError::PopulationTooSmall(population));
        }
        if save_interval == 0 {
            return Err(ConfigError::InvalidSaveInterval);
        }
        // Spread of the raw bimatrix sums (M is halved).
        let dw_max = 2.0 * matrix.spread();
        Ok(Self {
            matrix,
            population,
            save_interval,
            dw_max,
        })
    }

    /// Average payoff of one `strategy` player against the other N − 1.
    #[inline]
    fn payoff(&self, strategy: usize, counts: &Counts) -> f64 {
        let row = &self.matrix.rows()[strategy];
        let total: f64 = row
            .iter()
            .zip(counts.iter())
            .map(|(m, &n)| m * f64::from(n))
            .sum();
        (total - row[strategy]) / (self.population - 1) as f64
    }

    /// One trajectory of `steps` updates; counts stored every `save_interval` steps (t = 0 included).
    pub fn run<R: Rng>(&self, x0: &Vec4, steps: usize, rng: &mut R) -> Vec<Counts> {
        let save_interval = self.save_interval;
        let mut counts = initial_counts(x0, self.population);

        let mut players: Vec<u8> = Vec::with_capacity(self.population);
        for (strategy, &n) in counts.iter().enumerate() {
            players.extend(std::iter::repeat_n(strategy as u8, n as usize));
        }

        let mut record = Vec::with_capacity(steps / save_interval + 1);
        record.push(counts);

        for step in 1..=steps {
            let x = rng.random_range(0..self.population);
            let y = loop {
                let y = rng.random_range(0..self.population);
                if y != x {
                    break y;
                }
            };

            let sx = players[x] as usize;
            let sy = players[y] as usize;
            let fx = self.payoff(sx, &counts);
            let fy = self.payoff(sy, &counts);

            if fy > fx {
                let p = (fy - fx) / self.dw_max;
                if rng.random::<f64>() < p {
                    counts[sy] += 1;
                    counts[sx] -= 1;
                    players[x] = players[y];
                }
            }

            if step % save_interval == 0 {
                record.push(counts);
            }
        }

        record
    }
}

/// Run `runs` independent trajectories back-to-back and accumulate their counts.
///     Inputs:
///         - `matrix`: symmetrized payoff matrix M
///         - `x0`: initial frequencies (converted by `initial_counts`)
///         - `population`: N ≥ 2, else `PopulationTooSmall`
///         - `steps`: updates per run
///         - `runs`: number of runs averaged
///         - `save_interval`: record every Nth step (≥ 1, else `InvalidSaveInterval`)
pub fn simulate<R: Rng>(
    matrix: &PayoffMatrix,          // M
    x0: &Vec4,                      // initial frequencies
    population: usize,              // N
    steps: usize,                   // T
    runs: usize,                    // S
    save_interval: usize,           // record every N steps
    rng: &mut R,                    // random source
    progress: Option<&ProgressBar>, // optional progress bar
) -> Result<ImitationSeries, ConfigError> {
    let model = ImitationModel::new(*matrix, population, save_interval)?;
    let recorded: Vec<usize> = (0..=steps).step_by(save_interval).collect();
    let mut series = ImitationSeries::empty(population, recorded);

    for run in 0..runs {
        debug!("imitation run {}/{runs}", run + 1);
        let counts = model.run(x0, steps, rng);
        series.accumulate(&counts);
        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameParams;

    #[test]
    fn remainder_goes_to_last_strategy() {
        assert_eq!(initial_counts(&[0.1, 0.25, 0.45, 0.2], 1000), [100, 250, 450, 200]);
        assert_eq!(initial_counts(&[0.1, 0.25, 0.45, 0.2], 7), [0, 1, 3, 3]);
        // Over-full shares are clamped.
        assert_eq!(initial_counts(&[0.9, 0.9, 0.0, 0.0], 10), [9, 1, 0, 0]);
    }

    #[test]
    fn degenerate_model_is_rejected() {
        let matrix = PayoffMatrix::symmetrize(&GameParams::default());
        assert!(matches!(
            ImitationModel::new(matrix, 1, 1),
            Err(ConfigError::PopulationTooSmall(1))
        ));
        assert!(matches!(
            ImitationModel::new(matrix, 0, 1),
            Err(ConfigError::PopulationTooSmall(0))
        ));
        assert!(matches!(
            ImitationModel::new(matrix, 10, 0),
            Err(ConfigError::InvalidSaveInterval)
        ));
    }
}
