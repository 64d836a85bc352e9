use std::path::PathBuf;

/// Solver failures. Always fatal for the pipeline.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum IntegrationError {
    #[error("Invalid time span [{start}, {end}]")]
    InvalidTimeGrid { start: f64, end: f64 },

    #[error("State or derivative is not finite at t = {t}")]
    NonFiniteState { t: f64 },

    #[error("Step size underflow at t = {t} (h = {h:e})")]
    StepSizeUnderflow { t: f64, h: f64 },

    #[error("More than {limit} steps needed before t = {t}")]
    TooManySteps { t: f64, limit: usize },
}

/// Output-file failures. Recovered by the pipeline with a warning.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("Error opening the file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing the file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error serializing {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Plot backend failures. Never abort a run.
#[derive(thiserror::Error, Debug)]
pub enum PlotError {
    #[error("Rendering the plot failed: {0}")]
    Render(String),

    #[error("Plot window failed: {0}")]
    Window(String),

    #[error("Exporting the plot to {path} failed: {message}")]
    Export { path: PathBuf, message: String },
}

/// Configuration problems detected before any work starts.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Tolerances must be positive (rtol = {rtol}, atol = {atol})")]
    InvalidTolerance { rtol: f64, atol: f64 },

    #[error("max_steps_per_sample must be >= 1")]
    InvalidStepLimit,

    #[error("Population of {0} players is too small for pairwise imitation")]
    PopulationTooSmall(usize),

    #[error("save_interval must be >= 1")]
    InvalidSaveInterval,
}

/// Failures of the finite-population pipeline.
#[derive(thiserror::Error, Debug)]
pub enum ImitationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReportError),
}
