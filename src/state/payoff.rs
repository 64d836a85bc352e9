/// ==============================================================================================
/// =============================== Symmetrized Bimatrix Payoffs =================================
/// ==============================================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of strategies of the symmetrized game (2 × 2 pure strategy pairs).
pub const NUM_STRATEGIES: usize = 4;

/// A strategy-frequency (or any other) vector of the symmetrized game.
pub type Vec4 = [f64; NUM_STRATEGIES];

/// Standard basis e₀..e₃ of ℝ⁴.
pub const BASIS: [Vec4; NUM_STRATEGIES] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

#[inline]
pub fn dot(u: &Vec4, v: &Vec4) -> f64 {
    u.iter().zip(v.iter()).map(|(a, b)| a * b).sum()
}

/// Payoffs of a 2×2 bimatrix game.
///     Layout:
///         - `player_one`: [A, B, C, D] (row player)
///         - `player_two`: [a, b, c, d] (column player)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameParams {
    pub player_one: [f64; 4],
    pub player_two: [f64; 4],
}

impl Default for GameParams {
    /// Coordination game against anti-coordination game (cyclic dynamics).
    fn default() -> Self {
        Self {
            player_one: [1.0, 0.0, 0.0, 1.0],
            player_two: [0.0, 1.0, 1.0, 0.0],
        }
    }
}

impl GameParams {
    #[inline]
    pub fn new(player_one: [f64; 4], player_two: [f64; 4]) -> Self {
        Self {
            player_one,
            player_two,
        }
    }
}

/// Symmetrized 4×4 payoff matrix M of a bimatrix game.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    entries: [Vec4; NUM_STRATEGIES],
}

impl PayoffMatrix {
    /// Hofbauer–Sigmund symmetrization:
    ///     M = ½ · [[A+a, A+b, B+a, B+b],
    ///              [C+a, C+b, D+a, D+b],
    ///              [A+c, A+d, B+c, B+d],
    ///              [C+c, C+d, D+c, D+d]]
    /// No validation: any real payoffs are accepted.
    pub fn symmetrize(params: &GameParams) -> Self {
        let [big_a, big_b, big_c, big_d] = params.player_one;
        let [a, b, c, d] = params.player_two;

        let raw = [
            [big_a + a, big_a + b, big_b + a, big_b + b],
            [big_c + a, big_c + b, big_d + a, big_d + b],
            [big_a + c, big_a + d, big_b + c, big_b + d],
            [big_c + c, big_c + d, big_d + c, big_d + d],
        ];

        let mut entries = [[0.0; NUM_STRATEGIES]; NUM_STRATEGIES];
        for (row_out, row_raw) in entries.iter_mut().zip(raw.iter()) {
            for (m, r) in row_out.iter_mut().zip(row_raw.iter()) {
                *m = 0.5 * r;
            }
        }
        Self { entries }
    }

    #[inline]
    pub fn rows(&self) -> &[Vec4; NUM_STRATEGIES] {
        &self.entries
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.entries[i][j]
    }

    /// w = M·x
    #[inline]
    pub fn apply(&self, x: &Vec4) -> Vec4 {
        let mut w = [0.0; NUM_STRATEGIES];
        for (wi, row) in w.iter_mut().zip(self.entries.iter()) {
            *wi = dot(row, x);
        }
        w
    }

    /// Mean payoff xᵗ·M·x.
    #[inline]
    pub fn mean_payoff(&self, x: &Vec4) -> f64 {
        dot(x, &self.apply(x))
    }

    /// Spread (max − min) of the entries.
    pub fn spread(&self) -> f64 {
        let flat = self.entries.iter().flatten().copied();
        let (lo, hi) = flat.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        hi - lo
    }
}

impl fmt::Display for PayoffMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.entries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "[{:>8.3} {:>8.3} {:>8.3} {:>8.3}]",
                row[0], row[1], row[2], row[3]
            )?;
        }
        Ok(())
    }
}
