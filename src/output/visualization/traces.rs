//! Plots of a trap-memory run
//!
//! - [`plot_trap_memory`]: occupancy `f(t)` on the left axis, `log10 n(t)`
//!   dashed on the right axis
//! - [`plot_hysteresis_loop`]: recombination proxy against `log10 n`, with
//!   the rising and falling legs in two colours

use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

use super::config::{PlotConfig, NO_TITLE};
use super::value_range;
use crate::experiment::TrapMemoryRun;

/// Occupancy axis, slightly wider than [0, 1] so that saturated traces stay visible
const OCCUPANCY_AXIS: (f64, f64) = (-0.05, 1.05);

/// Number of dashes along the density trace
const DASHES: usize = 60;

/// Plot occupancy and carrier density against time
///
/// # Arguments
///
/// * `run`         — Completed trap-memory run
/// * `output_path` — Output file path (`.svg` → vector, anything else → PNG)
/// * `config`      — Optional plot configuration; `None` uses
///                   [`PlotConfig::trap_memory`]
///
/// # Errors
///
/// Returns `Err` if the backend cannot write to `output_path`.
///
/// # Example
///
/// ```rust,no_run
/// use trapmem_rs::experiment::{TrapMemoryConfig, TrapMemoryExperiment};
/// use trapmem_rs::output::visualization::plot_trap_memory;
///
/// let run = TrapMemoryExperiment::run(&TrapMemoryConfig::default())?;
/// plot_trap_memory(&run, "trap_memory.png", None)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn plot_trap_memory(
    run: &TrapMemoryRun,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if run.is_empty() {
        return Err("trap-memory run has no samples".into());
    }

    let default_config = PlotConfig::trap_memory(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    match extension(output_path) {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_trap_memory_impl(backend, run, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_trap_memory_impl(backend, run, config)
        }
    }
}

/// Plot the recombination proxy against log10 n, one colour per sweep leg
///
/// # Errors
///
/// Returns `Err` if the backend cannot write to `output_path`.
pub fn plot_hysteresis_loop(
    run: &TrapMemoryRun,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if run.is_empty() {
        return Err("trap-memory run has no samples".into());
    }

    let default_config = PlotConfig::hysteresis(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    match extension(output_path) {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_hysteresis_impl(backend, run, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_hysteresis_impl(backend, run, config)
        }
    }
}

pub(super) fn extension(output_path: &str) -> &str {
    Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png")
}

// =================================================================================================
// Private Plot Implementations
// =================================================================================================

fn plot_trap_memory_impl<DB: DrawingBackend>(
    backend: DB,
    run: &TrapMemoryRun,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let (t_min, t_max) = value_range(run.time.iter().copied(), 0.0);
    let (logn_min, logn_max) = value_range(run.log_density.iter().copied(), 0.05);

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .right_y_label_area_size(60)
        .build_cartesian_2d(t_min..t_max, OCCUPANCY_AXIS.0..OCCUPANCY_AXIS.1)?
        .set_secondary_coord(t_min..t_max, logn_min..logn_max);

    let time_format = |x: &f64| format!("{:.1}", x);
    let occupancy_format = |y: &f64| format!("{:.2}", y);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&time_format)
        .y_label_formatter(&occupancy_format);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    chart
        .configure_secondary_axes()
        .y_desc(&config.secondary_ylabel)
        .label_style(("sans-serif", 15).into_font().color(&config.secondary_color))
        .y_label_formatter(&|y| format!("{:.1}", y))
        .draw()?;

    let primary = config.line_color;
    chart
        .draw_series(LineSeries::new(
            run.time.iter().copied().zip(run.occupancy.iter().copied()),
            ShapeStyle::from(&primary).stroke_width(config.line_width),
        ))?
        .label("Trap occupancy f")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &primary));

    // Dashes are drawn as alternate chunks of the sampled trace
    let secondary = config.secondary_color;
    let dash_style = ShapeStyle::from(&secondary).stroke_width(config.line_width);
    let points: Vec<(f64, f64)> = run.time.iter().copied().zip(run.log_density.iter().copied()).collect();
    let dash = (points.len() / DASHES).max(2);

    chart
        .draw_secondary_series(
            points
                .chunks(dash)
                .step_by(2)
                .map(move |chunk| PathElement::new(chunk.to_vec(), dash_style)),
        )?
        .label("log10 n")
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 8, y)], &secondary)
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn plot_hysteresis_impl<DB: DrawingBackend>(
    backend: DB,
    run: &TrapMemoryRun,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let (x_min, x_max) = value_range(run.log_density.iter().copied(), 0.0);
    let (_, r_max) = value_range(run.recombination.iter().copied(), 0.0);

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, 0.0..(r_max * 1.1).max(f64::MIN_POSITIVE))?;

    let density_format = |x: &f64| format!("{:.1}", x);
    let rate_format = |y: &f64| format!("{:.1e}", y);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&density_format)
        .y_label_formatter(&rate_format);
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    let split = run.split_index.min(run.len());
    let legs = [
        ("Rising n", 0..split, config.line_color),
        ("Falling n", split..run.len(), config.secondary_color),
    ];

    for (label, range, color) in legs {
        if range.is_empty() {
            continue;
        }
        chart
            .draw_series(LineSeries::new(
                run.log_density[range.clone()]
                    .iter()
                    .copied()
                    .zip(run.recombination[range].iter().copied()),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
