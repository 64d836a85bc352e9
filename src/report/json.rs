use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::ReportError;
use crate::solvers::{Solution, SolverStats};
use crate::state::Vec4;

/// Trajectory payload: parallel `times` / `states` arrays plus solver counters.
#[derive(Serialize)]
struct TrajectoryRecord<'a> {
    times: Vec<f64>,
    states: Vec<Vec4>,
    stats: &'a SolverStats,
}

/// Write `solution` to `path` as pretty-printed JSON.
pub fn write_json(path: &Path, solution: &Solution) -> Result<(), ReportError> {
    let record = TrajectoryRecord {
        times: solution.series.times().to_vec(),
        states: solution.series.samples().map(|(_, x)| x).collect(),
        stats: &solution.stats,
    };

    let json = serde_json::to_string_pretty(&record).map_err(|source| ReportError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;

    let mut file = File::create(path).map_err(|source| ReportError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    file.write_all(json.as_bytes())
        .map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })
}
