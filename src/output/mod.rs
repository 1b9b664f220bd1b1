//! Output of simulation results
//!
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV files for external analysis
//!
//! ```text
//! output/
//! ├── visualization/
//! │   ├── config.rs   PlotConfig and presets
//! │   ├── traces.rs   trap-memory trace, hysteresis loop
//! │   └── curves.rs   curve families
//! └── export/
//!     ├── mod.rs      Exporter trait, ExportError
//!     └── csv.rs      CSV writer
//! ```
//!
//! Both sides take a [`TrapMemoryRun`](crate::experiment::TrapMemoryRun)
//! or plain `&[f64]` slices.

pub mod visualization;
pub mod export;

pub use visualization::{plot_curve_family, plot_hysteresis_loop, plot_trap_memory, PlotConfig};

pub use export::{export_series_csv, export_trap_memory_csv, CsvConfig, CsvExporter, ExportError, Exporter};
