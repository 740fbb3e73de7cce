//! Export functionality for summary tables
//!
//! Contains output path derivation and the CSV table writer.

use std::path::{Path, PathBuf};

#[cfg(feature = "csv")]
use crate::conversion::{format_timestamp, format_value};
#[cfg(feature = "csv")]
use crate::error::Result;
#[cfg(feature = "csv")]
use crate::types::Table;

/// Suffix appended to the input file stem for derived output names
pub const SUMMARY_SUFFIX: &str = "_summary.csv";

/// Where summary files are written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputLocation {
    /// Next to the input file
    #[default]
    BesideInput,
    /// Inside a directory, with a derived file name
    Directory(PathBuf),
    /// Exactly this file
    File(PathBuf),
}

impl OutputLocation {
    /// Interpret a user-supplied output path
    ///
    /// Existing directories, paths ending in a separator and paths without an
    /// extension are treated as directories; anything else is a file.
    pub fn from_path(path: &Path) -> Self {
        let ends_with_separator = path
            .to_str()
            .map(|s| s.ends_with('/') || s.ends_with(std::path::MAIN_SEPARATOR))
            .unwrap_or(false);

        if path.is_dir() || ends_with_separator || path.extension().is_none() {
            OutputLocation::Directory(path.to_path_buf())
        } else {
            OutputLocation::File(path.to_path_buf())
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, OutputLocation::File(_))
    }

    /// Output path for a given input file
    pub fn path_for(&self, input_path: &Path) -> PathBuf {
        match self {
            OutputLocation::File(path) => path.clone(),
            OutputLocation::Directory(dir) => dir.join(summary_file_name(input_path)),
            OutputLocation::BesideInput => {
                let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
                parent.join(summary_file_name(input_path))
            }
        }
    }
}

/// `ride.fit` -> `ride_summary.csv`
pub fn summary_file_name(input_path: &Path) -> String {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{stem}{SUMMARY_SUFFIX}")
}

/// Compute the output path for an input and an optional output argument
pub fn compute_export_path(input_path: &Path, output: Option<&Path>) -> PathBuf {
    output
        .map(OutputLocation::from_path)
        .unwrap_or_default()
        .path_for(input_path)
}

/// Result of writing one summary file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub csv_path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

/// Write a table as CSV
///
/// Returns `Ok(None)` without touching the filesystem when the table is
/// empty; no header-only files are produced.
#[cfg(feature = "csv")]
pub fn export_to_csv(table: &Table, output_path: &Path) -> Result<Option<ExportReport>> {
    if table.is_empty() {
        log::debug!("Table is empty, not writing {}", output_path.display());
        return Ok(None);
    }

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(table.header())?;

    let mut record = Vec::with_capacity(table.columns.len() + 1);
    for row in &table.rows {
        record.clear();
        record.push(format_timestamp(&row.timestamp));
        record.extend(row.values.iter().map(|value| format_value(*value)));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    Ok(Some(ExportReport {
        csv_path: output_path.to_path_buf(),
        rows: table.rows.len(),
        columns: table.columns.len() + 1,
    }))
}
