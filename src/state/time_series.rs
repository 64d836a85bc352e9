/// ==============================================================================================
/// ================================= Time Series Container ======================================
/// ==============================================================================================

use ndarray::{Array1, Array2, ArrayView1, Axis};

use super::payoff::{NUM_STRATEGIES, Vec4};
use crate::error::IntegrationError;

/// `n` equally spaced points from `start` to `end` (both included).
///     - n = 0 → empty grid
///     - n = 1 → [start]
///     - last point is exactly `end`
pub fn linspace(start: f64, end: f64, n: usize) -> Result<Vec<f64>, IntegrationError> {
    if !start.is_finite() || !end.is_finite() || end < start {
        return Err(IntegrationError::InvalidTimeGrid { start, end });
    }

    let grid = match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            let mut grid: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            grid[n - 1] = end;
            grid
        }
    };
    Ok(grid)
}

/// Dense trajectory: row i holds (x₀, x₁, x₂, x₃) at `times[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    times: Array1<f64>,
    states: Array2<f64>,
}

impl TimeSeries {
    #[inline]
    pub fn new(times: Array1<f64>, states: Array2<f64>) -> Self {
        debug_assert_eq!(states.nrows(), times.len(), "one state row per time point");
        debug_assert_eq!(states.ncols(), NUM_STRATEGIES, "four strategy columns");
        Self { times, states }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[inline]
    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    #[inline]
    pub fn states(&self) -> &Array2<f64> {
        &self.states
    }

    /// State at sample i.
    pub fn state(&self, i: usize) -> Vec4 {
        let row = self.states.row(i);
        [row[0], row[1], row[2], row[3]]
    }

    /// Trajectory of strategy j over the whole grid.
    #[inline]
    pub fn component(&self, j: usize) -> ArrayView1<'_, f64> {
        self.states.column(j)
    }

    /// Iterate (t, x(t)) samples in time order.
    pub fn samples(&self) -> impl Iterator<Item = (f64, Vec4)> + '_ {
        self.times
            .iter()
            .zip(self.states.axis_iter(Axis(0)))
            .map(|(&t, row)| (t, [row[0], row[1], row[2], row[3]]))
    }

    /// max_t |Σᵢ xᵢ(t) − 1|
    pub fn max_mass_deviation(&self) -> f64 {
        self.states
            .sum_axis(Axis(1))
            .iter()
            .fold(0.0, |acc, s| acc.max((s - 1.0).abs()))
    }

    /// (min, max) over every entry; (0, 0) when empty.
    pub fn value_range(&self) -> (f64, f64) {
        if self.states.is_empty() {
            return (0.0, 0.0);
        }
        self.states
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}
