pub mod json;
pub mod plot;
pub mod text;

pub use json::write_json;
pub use plot::{WINDOW_SIZE, plot_trajectories, render_frame, show_trajectories};
pub use text::{OutputFile, format_imitation, format_solution};
