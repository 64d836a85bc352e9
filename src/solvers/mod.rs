pub mod control;
pub mod dopri5;
pub mod imitation;
pub mod linalg;
pub mod odeint;
pub mod replicator;
pub mod rosenbrock;
pub mod system;

pub use control::SolverStats;
pub use imitation::{ImitationModel, initial_counts, simulate};
pub use odeint::integrate;
pub use replicator::{Solution, integrate_replicator};
pub use system::{OdeSystem, ReplicatorSystem};
