//! Export of simulation results to files
//!
//! The [`Exporter`] trait abstracts the format; CSV is the one implemented
//! format ([`csv`]). The free functions [`export_trap_memory_csv`] and
//! [`export_series_csv`] are the direct entry points.
//!
//! ```rust,no_run
//! use trapmem_rs::experiment::{TrapMemoryConfig, TrapMemoryExperiment};
//! use trapmem_rs::output::export::{CsvExporter, Exporter};
//!
//! let run = TrapMemoryExperiment::run(&TrapMemoryConfig::default())?;
//! CsvExporter::default().export_run(&run, "run.csv")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod csv;

pub use csv::{export_series_csv, export_trap_memory_csv, CsvConfig, CsvMetadata, TRAP_MEMORY_HEADERS};

use thiserror::Error;

use crate::experiment::TrapMemoryRun;

/// Errors raised while writing result files
#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to write
    #[error("nothing to export: data must contain at least one row and one column")]
    Empty,

    /// A column does not match the abscissa
    #[error("column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    /// NaN or infinite value
    #[error("non-finite value in column '{column}' at row {row}")]
    NonFinite { column: String, row: usize },

    /// File system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A file format for simulation results
///
/// Each format carries its own error type so that callers can match on it
/// without downcasting a `Box<dyn Error>`.
pub trait Exporter {
    /// Error type of this format
    type Error: std::error::Error;

    /// Write every sequence of a trap-memory run
    fn export_run(&self, run: &TrapMemoryRun, path: &str) -> Result<(), Self::Error>;

    /// Write named columns against a shared abscissa
    fn export_series(
        &self,
        x_header: &str,
        x: &[f64],
        columns: &[(&str, &[f64])],
        path: &str,
    ) -> Result<(), Self::Error>;
}

/// CSV implementation of [`Exporter`]
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    /// Formatting and header options
    pub config: CsvConfig,
}

impl CsvExporter {
    /// Exporter with the given configuration
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = ExportError;

    fn export_run(&self, run: &TrapMemoryRun, path: &str) -> Result<(), ExportError> {
        export_trap_memory_csv(run, path, Some(&self.config))
    }

    fn export_series(
        &self,
        x_header: &str,
        x: &[f64],
        columns: &[(&str, &[f64])],
        path: &str,
    ) -> Result<(), ExportError> {
        export_series_csv(x_header, x, columns, path, Some(&self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_exporter_uses_its_config() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("csv");
        let path = path.to_str().unwrap();

        let exporter = CsvExporter::new(CsvConfig::default().delimiter(';').fixed().precision(1));
        exporter.export_series("x", &[1.0, 2.0], &[("y", &[3.0, 4.0][..])], path).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(content, "x;y\n1.0;3.0\n2.0;4.0\n");
    }

    #[test]
    fn test_error_messages() {
        let err = ExportError::LengthMismatch {
            column: "f".to_string(),
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "column 'f' has 2 rows, expected 3");

        let io: ExportError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(io, ExportError::Io(_)));
    }
}
