//! CSV export of simulation runs
//!
//! CSV files open in Excel, pandas, MATLAB and most analysis tools.
//!
//! # Files
//!
//! **Run summary** ([`Exporter::export_run`]), one row per frame:
//!
//! ```csv
//! # Enamel Erosion Simulation Data
//! # Generated: 2026-10-18T09:12:44+00:00
//! # frames: 260
//! # seed: 42
//! #
//! frame,phase,coating_thickness,mean_surface,min_enamel_thickness,acid_alpha,ion_count
//! 0,Attack,0.000000,0.874512,0.800000,0.600000,0
//! ...
//! ```
//!
//! **Profile** ([`Exporter::export_profile`]), one row per x sample:
//!
//! ```csv
//! x,substrate,surface,coating
//! -2.500000,-0.868311,-0.068311,0.226689
//! ...
//! ```
//!
//! The metadata block is written only when [`CsvConfig::include_metadata`]
//! is set.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};

use super::{downsample_indices, Exporter};
use crate::physics::is_finite;
use crate::simulation::{SimulationResult, Snapshot};

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while writing CSV files
#[derive(Debug)]
pub enum CsvError {
    /// File creation or write failure
    Io(std::io::Error),
    /// Nothing to write, or values that cannot be written
    InvalidData(String),
}

impl fmt::Display for CsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CsvError::Io(e) => write!(f, "CSV I/O error: {}", e),
            CsvError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
        }
    }
}

impl std::error::Error for CsvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CsvError::Io(e) => Some(e),
            CsvError::InvalidData(_) => None,
        }
    }
}

impl From<std::io::Error> for CsvError {
    fn from(e: std::io::Error) -> Self {
        CsvError::Io(e)
    }
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust
/// use enamel_rs::output::export::{CsvConfig, CsvMetadata};
///
/// let config = CsvConfig::european()
///     .precision(4)
///     .with_metadata(CsvMetadata::new().seed(7));
///
/// assert_eq!(config.delimiter, ';');
/// assert!(config.include_metadata);
/// ```
#[derive(Debug, Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only fields that are set appear in the header. The run's own metadata
/// map is appended after them.
#[derive(Debug, Clone, Default)]
pub struct CsvMetadata {
    /// Free-form run label
    pub label: Option<String>,

    /// RNG seed of the run
    pub seed: Option<u64>,

    /// Number of surface samples
    pub sample_count: Option<usize>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = Some(sample_count);
        self
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: &str, value: &str) {
        self.custom.push((key.to_string(), value.to_string()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(
    out: &mut W,
    metadata: &CsvMetadata,
    run_metadata: Option<&SimulationResult>,
) -> Result<(), CsvError> {
    writeln!(out, "# Enamel Erosion Simulation Data")?;
    writeln!(out, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    if let Some(label) = &metadata.label {
        writeln!(out, "# Label: {}", label)?;
    }
    if let Some(seed) = metadata.seed {
        writeln!(out, "# Seed: {}", seed)?;
    }
    if let Some(n) = metadata.sample_count {
        writeln!(out, "# Sample Count: {}", n)?;
    }
    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    // Run metadata, sorted so files diff cleanly
    if let Some(result) = run_metadata {
        let mut entries: Vec<_> = result.metadata.iter().collect();
        entries.sort();
        for (key, value) in entries {
            writeln!(out, "# {}: {}", key, value)?;
        }
    }

    writeln!(out, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
pub(crate) fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn check_snapshot_finite(snapshot: &Snapshot) -> Result<(), CsvError> {
    if !is_finite(&snapshot.surface) || !is_finite(&snapshot.substrate) {
        return Err(CsvError::InvalidData(format!(
            "NaN or Inf in the profile of frame {}",
            snapshot.frame
        )));
    }
    if let Some(coating) = &snapshot.coating
        && !is_finite(coating)
    {
        return Err(CsvError::InvalidData(format!(
            "NaN or Inf in the coating of frame {}",
            snapshot.frame
        )));
    }
    Ok(())
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    fn write_row<W: Write>(&self, out: &mut W, fields: &[String]) -> Result<(), CsvError> {
        let delimiter = self.config.delimiter.to_string();
        writeln!(out, "{}", fields.join(&delimiter))?;
        Ok(())
    }

    fn write_header<W: Write>(
        &self,
        out: &mut W,
        result: Option<&SimulationResult>,
    ) -> Result<(), CsvError> {
        if self.config.include_metadata
            && let Some(metadata) = &self.config.metadata
        {
            write_metadata_header(out, metadata, result)?;
        }
        Ok(())
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export_run(
        &self,
        result: &SimulationResult,
        n_points: Option<usize>,
        path: &str,
    ) -> Result<(), CsvError> {
        // ============================= Validation =============================

        if result.is_empty() {
            return Err(CsvError::InvalidData(
                "simulation result holds no snapshot".to_string(),
            ));
        }
        for snapshot in &result.snapshots {
            check_snapshot_finite(snapshot)?;
        }

        // ============================= Write ==================================

        let mut out = BufWriter::new(File::create(path)?);
        self.write_header(&mut out, Some(result))?;

        let header = [
            "frame",
            "phase",
            "coating_thickness",
            "mean_surface",
            "min_enamel_thickness",
            "acid_alpha",
            "ion_count",
        ];
        self.write_row(&mut out, &header.map(String::from))?;

        let indices = downsample_indices(result.len(), n_points);
        for &i in &indices {
            let s = &result.snapshots[i];
            let row = [
                s.frame.to_string(),
                s.phase.name().to_string(),
                format_number(s.coating_thickness, &self.config),
                format_number(s.mean_surface_height(), &self.config),
                format_number(s.min_enamel_thickness(), &self.config),
                format_number(s.acid.alpha, &self.config),
                s.ion_count().to_string(),
            ];
            self.write_row(&mut out, &row)?;
        }

        out.flush()?;
        log::debug!("exported {} of {} frames to {}", indices.len(), result.len(), path);
        Ok(())
    }

    fn export_profile(&self, snapshot: &Snapshot, path: &str) -> Result<(), CsvError> {
        check_snapshot_finite(snapshot)?;

        let mut out = BufWriter::new(File::create(path)?);
        self.write_header(&mut out, None)?;

        let mut header = vec!["x".to_string(), "substrate".to_string(), "surface".to_string()];
        if snapshot.coating.is_some() {
            header.push("coating".to_string());
        }
        self.write_row(&mut out, &header)?;

        for i in 0..snapshot.x.len() {
            let mut row = vec![
                format_number(snapshot.x[i], &self.config),
                format_number(snapshot.substrate[i], &self.config),
                format_number(snapshot.surface[i], &self.config),
            ];
            if let Some(coating) = &snapshot.coating {
                row.push(format_number(coating[i], &self.config));
            }
            self.write_row(&mut out, &row)?;
        }

        out.flush()?;
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{Simulation, SimulationConfig};
    use std::fs;
    use tempfile::NamedTempFile;

    fn run() -> SimulationResult {
        Simulation::new(SimulationConfig::default().with_sample_count(40), Some(5))
            .unwrap()
            .run()
            .unwrap()
    }

    #[test]
    fn test_format_number_european() {
        let config = CsvConfig::european().precision(2);
        assert_eq!(format_number(1.23456, &config), "1,23");
    }

    #[test]
    fn test_export_run_all_frames() {
        let result = run();
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        CsvExporter::default().export_run(&result, None, path).unwrap();

        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 261);
        assert!(lines[0].starts_with("frame,phase,coating_thickness"));
        assert!(lines[1].starts_with("0,Attack,0.000000"));
        assert!(lines[260].starts_with("259,ResistanceTest,0.295000"));
    }

    #[test]
    fn test_export_run_downsampled_with_metadata() {
        let result = run();
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();

        let config = CsvConfig::default().with_metadata(CsvMetadata::new().label("unit").seed(5));
        CsvExporter::new(config).export_run(&result, Some(20), path).unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("# Enamel Erosion Simulation Data"));
        assert!(content.contains("# Label: unit"));
        assert!(content.contains("# Seed: 5"));

        let data: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(data.len(), 21);
        assert!(data[20].starts_with("259,"));
    }

    #[test]
    fn test_export_profile_columns_follow_coating() {
        let result = run();
        let exporter = CsvExporter::default();

        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        exporter.export_profile(&result.snapshots[10], path).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().next(), Some("x,substrate,surface"));
        assert_eq!(content.lines().count(), 41);

        exporter.export_profile(&result.snapshots[150], path).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().next(), Some("x,substrate,surface,coating"));
    }

    #[test]
    fn test_export_empty_result_rejected() {
        let result = SimulationResult::new(Vec::new());
        let err = CsvExporter::default()
            .export_run(&result, None, "unused.csv")
            .unwrap_err();
        assert!(matches!(err, CsvError::InvalidData(_)));
    }

    #[test]
    fn test_export_to_missing_directory_is_io_error() {
        let result = run();
        let err = CsvExporter::default()
            .export_run(&result, None, "/nonexistent-dir/run.csv")
            .unwrap_err();
        assert!(matches!(err, CsvError::Io(_)));
    }
}
