/// ==============================================================================================
/// ================================== Fixed-Format Text Output ==================================
/// ==============================================================================================

use std::fs::File;
use std::io::{BufWriter, Result as IoResult, Write};
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::state::{GameParams, ImitationSeries, TimeSeries};

/// Output file opened for writing; closed when dropped.
pub struct OutputFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl OutputFile {
    /// Create (or truncate) `path`. The parent directory is not created.
    pub fn create(path: &Path) -> Result<Self, ReportError> {
        let file = File::create(path).map_err(|source| ReportError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Run `body` against the buffered writer and flush.
    fn write_with<F>(mut self, body: F) -> Result<(), ReportError>
    where
        F: FnOnce(&mut BufWriter<File>) -> IoResult<()>,
    {
        body(&mut self.writer)
            .and_then(|()| self.writer.flush())
            .map_err(|source| ReportError::Write {
                path: self.path.clone(),
                source,
            })
    }

    /// Replicator trajectory in the `RE solution` layout.
    pub fn write_solution(self, params: &GameParams, series: &TimeSeries) -> Result<(), ReportError> {
        self.write_with(|w| format_solution(w, params, series))
    }

    /// Averaged imitation counts in the `Imitation dynamics` layout.
    pub fn write_imitation(
        self,
        params: &GameParams,
        series: &ImitationSeries,
    ) -> Result<(), ReportError> {
        self.write_with(|w| format_imitation(w, params, series))
    }
}

/// RE solution
/// A <2dp> B <2dp> C <2dp> D <2dp>
/// a <2dp> b <2dp> c <2dp> d <2dp>
/// t      x1     x2     x3     x4
/// <t> <x1> <x2> <x3> <x4>            (4dp, one line per sample)
pub fn format_solution<W: Write>(w: &mut W, params: &GameParams, series: &TimeSeries) -> IoResult<()> {
    let [big_a, big_b, big_c, big_d] = params.player_one;
    let [a, b, c, d] = params.player_two;

    writeln!(w, "RE solution")?;
    writeln!(w, "A {big_a:.2} B {big_b:.2} C {big_c:.2} D {big_d:.2}")?;
    writeln!(w, "a {a:.2} b {b:.2} c {c:.2} d {d:.2}")?;
    writeln!(w, "t      x1     x2     x3     x4")?;
    for (t, x) in series.samples() {
        writeln!(w, "{t:.4} {:.4} {:.4} {:.4} {:.4}", x[0], x[1], x[2], x[3])?;
    }
    Ok(())
}

pub fn format_imitation<W: Write>(
    w: &mut W,
    params: &GameParams,
    series: &ImitationSeries,
) -> IoResult<()> {
    let [big_a, big_b, big_c, big_d] = params.player_one;
    let [a, b, c, d] = params.player_two;

    writeln!(w, "Imitation dynamics with 4 strategies")?;
    writeln!(w, "N = {}, S = {}", series.population(), series.runs())?;
    writeln!(w)?;
    writeln!(w, "A = {big_a:.2} B = {big_b:.2}")?;
    writeln!(w, "C = {big_c:.2} D = {big_d:.2}")?;
    writeln!(w)?;
    writeln!(w, "a = {a:.2} b = {b:.2}")?;
    writeln!(w, "c = {c:.2} d = {d:.2}")?;
    writeln!(w, "------------------------------------")?;
    writeln!(w, "t|1     |2     |3     |4  ")?;
    for (step, x) in series.samples() {
        writeln!(w, "{step} {:.4} {:.4} {:.4} {:.4}", x[0], x[1], x[2], x[3])?;
    }
    Ok(())
}
