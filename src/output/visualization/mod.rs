//! Plots of simulation results using `plotters`
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **traces**: Trap-memory run against time and its hysteresis loop
//! - **curves**: Line families for the device sweeps
//!
//! Every function picks the backend from the file extension: `.svg` gives a
//! vector file, anything else a PNG bitmap.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trapmem_rs::experiment::{TrapMemoryConfig, TrapMemoryExperiment};
//! use trapmem_rs::output::visualization::{plot_hysteresis_loop, plot_trap_memory, PlotConfig};
//!
//! let run = TrapMemoryExperiment::run(&TrapMemoryConfig::default())?;
//!
//! plot_trap_memory(&run, "trace.png", None)?;
//!
//! let mut config = PlotConfig::hysteresis("R vs n");
//! config.width = 1600;
//! plot_hysteresis_loop(&run, "loop.svg", Some(&config))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod traces;
pub mod curves;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};
pub use traces::{plot_hysteresis_loop, plot_trap_memory};
pub use curves::plot_curve_family;

/// `(min, max)` of finite values, widened by `pad` of the span
///
/// A flat or empty series gets a unit-wide window so that the chart
/// coordinates stay valid.
pub(crate) fn value_range(values: impl Iterator<Item = f64>, pad: f64) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if min > max {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        let half = 0.5 * min.abs().max(1.0);
        return (min - half, max + half);
    }
    (min - pad * span, max + pad * span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range() {
        assert_eq!(value_range([1.0, 3.0, 2.0].into_iter(), 0.0), (1.0, 3.0));

        let (lo, hi) = value_range([0.0, 10.0].into_iter(), 0.1);
        assert!((lo + 1.0).abs() < 1e-12 && (hi - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_value_range_degenerate() {
        assert_eq!(value_range(std::iter::empty(), 0.0), (0.0, 1.0));
        assert_eq!(value_range([f64::NAN].into_iter(), 0.0), (0.0, 1.0));

        let (lo, hi) = value_range([16.0].into_iter(), 0.0);
        assert!(lo < 16.0 && hi > 16.0);
    }
}
