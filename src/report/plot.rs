use std::error::Error;
use std::path::Path;

use log::debug;
use minifb::{Key, Window, WindowOptions};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::PlotError;
use crate::state::{NUM_STRATEGIES, TimeSeries};

pub const WINDOW_SIZE: (u32, u32) = (800, 600);
const WINDOW_TITLE: &str = "Replicator dynamics";
const TRACE_COLORS: [RGBColor; NUM_STRATEGIES] = [RED, BLUE, GREEN, MAGENTA];

/// Show one line per strategy frequency in a window.
///     Blocks until the window is closed (or Escape is pressed).
pub fn show_trajectories(series: &TimeSeries) -> Result<(), PlotError> {
    let (width, height) = WINDOW_SIZE;
    let frame = render_frame(series, WINDOW_SIZE)?;
    let (width, height) = (width as usize, height as usize);

    let mut window = Window::new(WINDOW_TITLE, width, height, WindowOptions::default())
        .map_err(|e| PlotError::Window(e.to_string()))?;
    window.set_target_fps(30);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        window
            .update_with_buffer(&frame, width, height)
            .map_err(|e| PlotError::Window(e.to_string()))?;
    }
    Ok(())
}

/// Draw the chart into a 0RGB pixel buffer of `size`.
pub fn render_frame(series: &TimeSeries, size: (u32, u32)) -> Result<Vec<u32>, PlotError> {
    let mut rgb = vec![0u8; size.0 as usize * size.1 as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut rgb, size).into_drawing_area();
        draw(&root, series).map_err(|e| PlotError::Render(e.to_string()))?;
    }

    Ok(rgb
        .chunks_exact(3)
        .map(|p| (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2]))
        .collect())
}

/// Export the same chart to an SVG file.
pub fn plot_trajectories(file: &Path, series: &TimeSeries) -> Result<(), PlotError> {
    let root = SVGBackend::new(file, WINDOW_SIZE).into_drawing_area();
    draw(&root, series).map_err(|e| PlotError::Export {
        path: file.to_path_buf(),
        message: e.to_string(),
    })
}

fn draw<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, series: &TimeSeries) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    if series.is_empty() {
        return Err("empty time series".into());
    }

    let times = series.times();
    let t_lo = times[0];
    let t_hi = times[times.len() - 1];
    let t_hi = if t_hi > t_lo { t_hi } else { t_lo + 1.0 };

    let (lo, hi) = series.value_range();
    let pad = if hi - lo > 1e-12 { 0.05 * (hi - lo) } else { 0.5 };
    let (lo, hi) = (lo - pad, hi + pad);
    debug!("Plotting globals: t in [{t_lo}, {t_hi}], x in [{lo}, {hi}]");

    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(40)
        .build_cartesian_2d(t_lo..t_hi, lo..hi)?;

    chart.configure_mesh().draw()?;

    for (j, &color) in TRACE_COLORS.iter().enumerate() {
        let points = times
            .iter()
            .zip(series.component(j).into_iter())
            .map(|(&t, &x)| (t, x));
        chart
            .draw_series(LineSeries::new(points, &color))?
            .label(format!("x{}", j + 1))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
