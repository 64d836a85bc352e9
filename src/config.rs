/// ==============================================================================================
/// ===================================== Run Configuration ======================================
/// ==============================================================================================

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::state::{GameParams, Vec4};

/// x(0) used by both pipelines unless overridden.
pub const DEFAULT_INITIAL_STATE: Vec4 = [0.1, 0.25, 0.45, 0.2];

/// scipy/LSODA default tolerance (√ε of f64).
pub const DEFAULT_TOLERANCE: f64 = 1.49012e-8;

/// Stepper selection.
///     - `Auto`: start explicit, switch on detected stiffness (and back)
///     - `NonStiff`: Dormand–Prince 5(4) only
///     - `Stiff`: Rosenbrock 2(3) only
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    #[default]
    Auto,
    NonStiff,
    Stiff,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub method: Method,
    pub rtol: f64,
    pub atol: f64,
    pub max_steps_per_sample: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            method: Method::Auto,
            rtol: DEFAULT_TOLERANCE,
            atol: DEFAULT_TOLERANCE,
            max_steps_per_sample: 500,
        }
    }
}

impl SolverSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.rtol) || !ok(self.atol) {
            return Err(ConfigError::InvalidTolerance {
                rtol: self.rtol,
                atol: self.atol,
            });
        }
        if self.max_steps_per_sample == 0 {
            return Err(ConfigError::InvalidStepLimit);
        }
        Ok(())
    }
}

/// Replicator-equation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub payoffs: GameParams,
    pub initial_state: Vec4,
    pub time_span: (f64, f64),
    pub sample_count: usize,
    pub output_path: PathBuf,
    /// Open the plot window after integrating (blocks until closed).
    pub show_plot: bool,
    /// Optional SVG export of the same chart.
    pub plot_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
    pub solver: SolverSettings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            payoffs: GameParams::default(),
            initial_state: DEFAULT_INITIAL_STATE,
            time_span: (0.0, 150.0),
            sample_count: 1500,
            output_path: PathBuf::from("Solutions.txt"),
            show_plot: true,
            plot_path: None,
            json_path: None,
            solver: SolverSettings::default(),
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let cfg: Self = load_json(path)?;
        cfg.solver.validate()?;
        Ok(cfg)
    }
}

/// Finite-population imitation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImitationConfig {
    pub payoffs: GameParams,
    pub initial_state: Vec4,
    pub population: usize,
    pub steps: usize,
    pub runs: usize,
    pub save_interval: usize,
    pub seed: Option<u64>,
    pub output_path: PathBuf,
}

impl Default for ImitationConfig {
    fn default() -> Self {
        Self {
            payoffs: GameParams::default(),
            initial_state: DEFAULT_INITIAL_STATE,
            population: 1000,
            steps: 1_000_000,
            runs: 10,
            save_interval: 1,
            seed: None,
            output_path: PathBuf::from("strat_freq_x_time.txt"),
        }
    }
}

impl ImitationConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let cfg: Self = load_json(path)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population));
        }
        if self.save_interval == 0 {
            return Err(ConfigError::InvalidSaveInterval);
        }
        Ok(())
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
