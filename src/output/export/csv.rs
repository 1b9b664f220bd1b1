//! CSV export of simulation results
//!
//! Files open in any spreadsheet, pandas or MATLAB. An optional header of
//! `#`-prefixed comment lines records how the data was produced.
//!
//! # Example
//!
//! ```rust,no_run
//! use trapmem_rs::experiment::{TrapMemoryConfig, TrapMemoryExperiment};
//! use trapmem_rs::output::export::{export_trap_memory_csv, CsvConfig, CsvMetadata};
//!
//! let config = TrapMemoryConfig::default();
//! let run = TrapMemoryExperiment::run(&config)?;
//!
//! let csv = CsvConfig::default().with_metadata(CsvMetadata::from_trap_memory(&config, &run));
//! export_trap_memory_csv(&run, "trap_memory.csv", Some(&csv))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! **Output** (`trap_memory.csv`):
//! ```text
//! # Trap Memory Simulation Data
//! # Generated: 2026-10-16T09:12:44.105+00:00
//! # Solver: Forward Euler
//! # Total Time: 20 s
//! # Samples: 4000
//! # Capture Coefficient: 0.000000000000000005 cm^3/s
//! # ...
//! #
//! t_s,log10_n,n_cm3,f,R
//! 0.000000e0,1.400000e1,1.000000e14,5.000000e-2,5.000000e-8
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};

use super::ExportError;
use crate::experiment::{TrapMemoryConfig, TrapMemoryRun};

// =================================================================================================
// Configuration
// =================================================================================================

/// Configuration for CSV export
///
/// ```rust
/// use trapmem_rs::output::export::CsvConfig;
///
/// let config = CsvConfig::european().precision(10);
/// assert_eq!(config.delimiter, ';');
/// assert_eq!(config.precision, 10);
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Significant digits after the point (default: 6)
    pub precision: usize,

    /// Scientific notation (default: true, densities span many decades)
    pub scientific: bool,

    /// Write the `#` header (default: false)
    pub include_metadata: bool,

    /// Content of the `#` header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            scientific: true,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Semicolon delimiter and decimal comma
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Set the delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Plain decimal notation
    pub fn fixed(mut self) -> Self {
        self.scientific = false;
        self
    }

    /// Enable the `#` header with this content
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }

    fn format(&self, value: f64) -> String {
        let formatted = if self.scientific {
            format!("{:.prec$e}", value, prec = self.precision)
        } else {
            format!("{:.prec$}", value, prec = self.precision)
        };

        if self.decimal_separator != '.' {
            formatted.replace('.', &self.decimal_separator.to_string())
        } else {
            formatted
        }
    }
}

/// Content of the `#` header
///
/// Only fields that are set are written.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CsvMetadata {
    /// Title line (default: "Simulation Data")
    pub title: Option<String>,

    /// Solver name
    pub solver_name: Option<String>,

    /// Simulated duration (s)
    pub total_time: Option<f64>,

    /// Number of samples
    pub samples: Option<usize>,

    /// Additional `key: value` lines, in order
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Header describing a trap-memory run and its parameters
    pub fn from_trap_memory(config: &TrapMemoryConfig, run: &TrapMemoryRun) -> Self {
        let mut metadata = Self {
            title: Some("Trap Memory Simulation Data".to_string()),
            solver_name: Some(run.solver_name.clone()),
            total_time: Some(config.t_end),
            samples: Some(run.len()),
            custom: Vec::new(),
        };

        metadata.add_custom("Density Range", format!("1e{} .. 1e{} cm^-3", config.logn_low, config.logn_high));
        metadata.add_custom("Capture Coefficient", format!("{} cm^3/s", config.capture_coefficient));
        metadata.add_custom("Emission Rate", format!("{} 1/s", config.emission_rate));
        metadata.add_custom("Initial Occupancy", config.initial_occupancy.to_string());
        metadata.add_custom("Recombination Scale", config.recombination_scale.to_string());
        metadata.add_custom("Max Step Factor", format!("{:.4}", run.stability.max_step_factor));
        metadata.add_custom("Clamped Steps", run.diagnostics.clamped_steps.to_string());
        metadata
    }

    /// Append a `key: value` line
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }

    fn write_header<W: Write>(&self, out: &mut W) -> Result<(), ExportError> {
        writeln!(out, "# {}", self.title.as_deref().unwrap_or("Simulation Data"))?;
        writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

        if let Some(solver) = &self.solver_name {
            writeln!(out, "# Solver: {}", solver)?;
        }
        if let Some(total_time) = self.total_time {
            writeln!(out, "# Total Time: {} s", total_time)?;
        }
        if let Some(samples) = self.samples {
            writeln!(out, "# Samples: {}", samples)?;
        }
        for (key, value) in &self.custom {
            writeln!(out, "# {}: {}", key, value)?;
        }

        writeln!(out, "#")?;
        Ok(())
    }
}

// =================================================================================================
// Export Functions
// =================================================================================================

/// Columns of [`export_trap_memory_csv`]
pub const TRAP_MEMORY_HEADERS: [&str; 5] = ["t_s", "log10_n", "n_cm3", "f", "R"];

/// Export every sequence of a trap-memory run
///
/// Columns: time, log10 n, n, occupancy, recombination proxy.
///
/// # Errors
///
/// [`ExportError::Empty`] for an empty run, [`ExportError::NonFinite`] if a
/// value is NaN or infinite, [`ExportError::Io`] if the file cannot be written.
pub fn export_trap_memory_csv(
    run: &TrapMemoryRun,
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), ExportError> {
    let columns: [(&str, &[f64]); 4] = [
        (TRAP_MEMORY_HEADERS[1], &run.log_density),
        (TRAP_MEMORY_HEADERS[2], &run.density),
        (TRAP_MEMORY_HEADERS[3], &run.occupancy),
        (TRAP_MEMORY_HEADERS[4], &run.recombination),
    ];
    export_series_csv(TRAP_MEMORY_HEADERS[0], &run.time, &columns, output_path, config)
}

/// Export columns sharing one abscissa
///
/// ```rust,no_run
/// use trapmem_rs::models::UpconversionGain;
/// use trapmem_rs::output::export::export_series_csv;
///
/// let (x1, gain) = UpconversionGain::default().sweep(10.0, 200)?;
/// export_series_csv("x1", &x1, &[("gain", gain.as_slice())], "gain.csv", None)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// [`ExportError::Empty`] without rows or columns,
/// [`ExportError::LengthMismatch`] when a column length differs from `x`,
/// [`ExportError::NonFinite`] for NaN or infinite values,
/// [`ExportError::Io`] if the file cannot be written.
pub fn export_series_csv(
    x_header: &str,
    x: &[f64],
    columns: &[(&str, &[f64])],
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), ExportError> {
    // ============================= Validation =============================

    if x.is_empty() || columns.is_empty() {
        return Err(ExportError::Empty);
    }
    check_finite(x_header, x)?;
    for (header, values) in columns {
        if values.len() != x.len() {
            return Err(ExportError::LengthMismatch {
                column: header.to_string(),
                expected: x.len(),
                found: values.len(),
            });
        }
        check_finite(header, values)?;
    }

    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);

    // ============================= Write ==================================

    let mut out = BufWriter::new(File::create(output_path)?);

    if config.include_metadata {
        if let Some(metadata) = &config.metadata {
            metadata.write_header(&mut out)?;
        }
    }

    write!(out, "{}", x_header)?;
    for (header, _) in columns {
        write!(out, "{}{}", config.delimiter, header)?;
    }
    writeln!(out)?;

    for (row, x_value) in x.iter().enumerate() {
        write!(out, "{}", config.format(*x_value))?;
        for (_, values) in columns {
            write!(out, "{}{}", config.delimiter, config.format(values[row]))?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    log::debug!("wrote {} rows x {} columns to {}", x.len(), columns.len() + 1, output_path);
    Ok(())
}

fn check_finite(column: &str, values: &[f64]) -> Result<(), ExportError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(row) => Err(ExportError::NonFinite {
            column: column.to_string(),
            row,
        }),
        None => Ok(()),
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::TrapMemoryExperiment;
    use std::fs;
    use tempfile::NamedTempFile;

    fn temp_path() -> (NamedTempFile, String) {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("csv").to_str().unwrap().to_string();
        (tmp, path)
    }

    #[test]
    fn test_format_number() {
        let config = CsvConfig::default();
        assert_eq!(config.format(1e17), "1.000000e17");

        let config = CsvConfig::default().fixed().precision(2);
        assert_eq!(config.format(0.123), "0.12");

        let config = CsvConfig::european().fixed().precision(1);
        assert_eq!(config.format(2.5), "2,5");
    }

    #[test]
    fn test_export_series() {
        let (_tmp, path) = temp_path();
        let x = [0.0, 1.0, 2.0];
        let a = [1.0, 2.0, 3.0];
        let b = [0.5, 0.25, 0.125];

        let config = CsvConfig::default().fixed().precision(3);
        export_series_csv("x", &x, &[("a", &a[..]), ("b", &b[..])], &path, Some(&config)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "x,a,b");
        assert_eq!(lines[1], "0.000,1.000,0.500");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_export_with_metadata() {
        let (_tmp, path) = temp_path();
        let mut metadata = CsvMetadata::default();
        metadata.add_custom("Intensity", "1000 W/m^2");

        let config = CsvConfig::default().with_metadata(metadata);
        export_series_csv("V", &[0.0], &[("J", &[19.0][..])], &path, Some(&config)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Simulation Data\n# Generated: "));
        assert!(content.contains("# Intensity: 1000 W/m^2"));
        assert!(content.contains("#\nV,J\n"));
    }

    #[test]
    fn test_export_trap_memory() {
        let trap_config = TrapMemoryConfig::default().with_samples(50);
        let run = TrapMemoryExperiment::run(&trap_config).unwrap();
        let (_tmp, path) = temp_path();

        let config = CsvConfig::default().with_metadata(CsvMetadata::from_trap_memory(&trap_config, &run));
        export_trap_memory_csv(&run, &path, Some(&config)).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Solver: Forward Euler"));
        assert!(content.contains("# Samples: 50"));

        let data: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(data[0], TRAP_MEMORY_HEADERS.join(","));
        assert_eq!(data.len(), 51);
        assert_eq!(data[1].split(',').count(), 5);
    }

    #[test]
    fn test_export_errors() {
        let (_tmp, path) = temp_path();

        assert!(matches!(
            export_series_csv("x", &[], &[("a", &[] as &[f64])], &path, None),
            Err(ExportError::Empty)
        ));
        assert!(matches!(
            export_series_csv("x", &[0.0, 1.0], &[("a", &[1.0][..])], &path, None),
            Err(ExportError::LengthMismatch { expected: 2, found: 1, .. })
        ));
        assert!(matches!(
            export_series_csv("x", &[0.0, 1.0], &[("a", &[1.0, f64::NAN][..])], &path, None),
            Err(ExportError::NonFinite { row: 1, .. })
        ));
        assert!(matches!(
            export_series_csv("x", &[0.0], &[("a", &[1.0][..])], "/nonexistent/dir/out.csv", None),
            Err(ExportError::Io(_))
        ));
    }
}
