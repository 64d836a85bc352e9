pub mod imitation_series;
pub mod payoff;
pub mod time_series;

pub use imitation_series::ImitationSeries;
pub use payoff::{BASIS, GameParams, NUM_STRATEGIES, PayoffMatrix, Vec4, dot};
pub use time_series::{TimeSeries, linspace};
