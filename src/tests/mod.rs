mod config;
mod imitation;
mod payoff;
mod pipeline;

use crate::state::GameParams;

/// Prisoner's dilemma for both players: the (defect, defect) strategy strictly dominates.
pub(crate) fn prisoners_dilemma() -> GameParams {
    GameParams::new([3.0, 0.0, 5.0, 1.0], [3.0, 0.0, 5.0, 1.0])
}
