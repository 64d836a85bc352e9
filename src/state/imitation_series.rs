/// ==============================================================================================
/// ============================ Averaged Finite-Population Counts ===============================
/// ==============================================================================================

use ndarray::{Array2, Axis};

use super::payoff::{NUM_STRATEGIES, Vec4};

/// Strategy counts accumulated over independent runs.
///     Layout:
///         - `steps`: recorded step indices (0, k, 2k, ...)
///         - `counts`: row r holds Σ_runs (n₀, n₁, n₂, n₃) at `steps[r]`
#[derive(Clone, Debug)]
pub struct ImitationSeries {
    population: usize,
    runs: usize,
    steps: Vec<usize>,
    counts: Array2<u64>,
}

impl ImitationSeries {
    /// Empty accumulator for `steps.len()` recorded points.
    pub fn empty(population: usize, steps: Vec<usize>) -> Self {
        let counts = Array2::zeros((steps.len(), NUM_STRATEGIES));
        Self {
            population,
            runs: 0,
            steps,
            counts,
        }
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.population
    }

    #[inline]
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Add the counts of one finished run (rows aligned with `steps`).
    pub fn accumulate(&mut self, run_counts: &[[u32; NUM_STRATEGIES]]) {
        debug_assert_eq!(run_counts.len(), self.steps.len(), "one row per recorded step");
        for (mut row, counts) in self.counts.axis_iter_mut(Axis(0)).zip(run_counts) {
            for (acc, &n) in row.iter_mut().zip(counts.iter()) {
                *acc += u64::from(n);
            }
        }
        self.runs += 1;
    }

    /// Average frequencies Σcounts / (runs · N) at record r.
    pub fn frequencies(&self, r: usize) -> Vec4 {
        let norm = (self.runs.max(1) * self.population.max(1)) as f64;
        let row = self.counts.row(r);
        [
            row[0] as f64 / norm,
            row[1] as f64 / norm,
            row[2] as f64 / norm,
            row[3] as f64 / norm,
        ]
    }

    /// Iterate (step, averaged frequencies).
    pub fn samples(&self) -> impl Iterator<Item = (usize, Vec4)> + '_ {
        self.steps
            .iter()
            .enumerate()
            .map(|(r, &step)| (step, self.frequencies(r)))
    }
}
