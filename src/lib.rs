//! Replicator dynamics and finite-population imitation dynamics for 4-strategy
//! games obtained by symmetrizing a 2×2 bimatrix game (Hofbauer & Sigmund, 2003).

pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod solvers;
pub mod state;
pub mod tasks;

#[cfg(test)]
mod tests;
