//! Batch processing over many input files
//!
//! Each file is processed independently; a failure is recorded in the
//! report and the batch moves on to the next file.

use crate::error::FailureKind;
use crate::export::OutputLocation;
use crate::pipeline::{process_fit_file, ProcessOutcome, SummaryOptions};
use crate::types::{DecodeStats, GroupStats};
use log::{info, warn};
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Why an input was not processed at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum SkipReason {
    NotFound,
    UnsupportedExtension,
}

/// Per-file result
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(tag = "outcome", rename_all = "snake_case"))]
pub enum FileOutcome {
    Success {
        output: PathBuf,
        rows: usize,
        decode_stats: DecodeStats,
        group_stats: GroupStats,
    },
    NoValidData,
    Skipped { reason: SkipReason },
    Failed { kind: FailureKind, message: String },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FileOutcome::Success { .. })
    }

    /// Human-readable status line
    pub fn status(&self) -> String {
        match self {
            FileOutcome::Success { output, rows, .. } => {
                format!("wrote {rows} rows to {}", output.display())
            }
            FileOutcome::NoValidData => "no valid data found".to_string(),
            FileOutcome::Skipped {
                reason: SkipReason::NotFound,
            } => "skipped: file does not exist".to_string(),
            FileOutcome::Skipped {
                reason: SkipReason::UnsupportedExtension,
            } => "skipped: not a .fit file".to_string(),
            FileOutcome::Failed { kind, message } => format!("failed ({kind}): {message}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FileReport {
    pub input: PathBuf,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub outcome: FileOutcome,
}

/// Collected results of a batch run, in input order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_success()).count()
    }

    pub fn skipped(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Failed { .. }))
            .count()
    }

    pub fn no_data(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.outcome == FileOutcome::NoValidData)
            .count()
    }

    #[cfg(feature = "json")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// `.fit` extension, case-insensitive
pub fn is_fit_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("fit"))
        .unwrap_or(false)
}

/// Process one input and classify the result
pub fn process_one(
    input_path: &Path,
    output: &OutputLocation,
    options: &SummaryOptions,
) -> FileOutcome {
    if !input_path.exists() {
        warn!("File does not exist: {}", input_path.display());
        return FileOutcome::Skipped {
            reason: SkipReason::NotFound,
        };
    }

    if !is_fit_file(input_path) {
        warn!("Skipping non-FIT file: {}", input_path.display());
        return FileOutcome::Skipped {
            reason: SkipReason::UnsupportedExtension,
        };
    }

    let output_path = output.path_for(input_path);
    match process_fit_file(input_path, &output_path, options) {
        Ok(ProcessOutcome::Written { report, summary }) => FileOutcome::Success {
            output: report.csv_path,
            rows: report.rows,
            decode_stats: summary.decode_stats,
            group_stats: summary.group_stats,
        },
        Ok(ProcessOutcome::NoValidData { .. }) => FileOutcome::NoValidData,
        Err(err) => {
            warn!("Error processing {}: {err}", input_path.display());
            FileOutcome::Failed {
                kind: err.kind(),
                message: err.to_string(),
            }
        }
    }
}

/// Process every input in order, continuing past per-file failures
pub fn process_batch<P: AsRef<Path>>(
    inputs: &[P],
    output: &OutputLocation,
    options: &SummaryOptions,
) -> BatchReport {
    let mut report = BatchReport::default();

    for input in inputs {
        let input = input.as_ref();
        info!("Processing: {}", input.display());
        let outcome = process_one(input, output, options);
        report.files.push(FileReport {
            input: input.to_path_buf(),
            outcome,
        });
    }

    info!(
        "Batch finished: {} succeeded, {} without data, {} skipped, {} failed",
        report.succeeded(),
        report.no_data(),
        report.skipped(),
        report.failed()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_extension_case_insensitive() {
        assert!(is_fit_file(Path::new("ride.fit")));
        assert!(is_fit_file(Path::new("RIDE.FIT")));
        assert!(is_fit_file(Path::new("dir/ride.Fit")));
        assert!(!is_fit_file(Path::new("ride.csv")));
        assert!(!is_fit_file(Path::new("ride")));
        assert!(!is_fit_file(Path::new("ride.fit.bak")));
    }

    #[test]
    fn test_missing_input_is_skipped() {
        let outcome = process_one(
            Path::new("/nonexistent/ride.fit"),
            &OutputLocation::BesideInput,
            &SummaryOptions::default(),
        );
        assert_eq!(
            outcome,
            FileOutcome::Skipped {
                reason: SkipReason::NotFound
            }
        );
        assert_eq!(outcome.status(), "skipped: file does not exist");
    }

    #[test]
    fn test_report_counts() {
        let report = BatchReport {
            files: vec![
                FileReport {
                    input: PathBuf::from("a.fit"),
                    outcome: FileOutcome::Success {
                        output: PathBuf::from("a_summary.csv"),
                        rows: 3,
                        decode_stats: DecodeStats::default(),
                        group_stats: GroupStats::default(),
                    },
                },
                FileReport {
                    input: PathBuf::from("b.txt"),
                    outcome: FileOutcome::Skipped {
                        reason: SkipReason::UnsupportedExtension,
                    },
                },
                FileReport {
                    input: PathBuf::from("c.fit"),
                    outcome: FileOutcome::Failed {
                        kind: FailureKind::Decode,
                        message: "bad header".into(),
                    },
                },
                FileReport {
                    input: PathBuf::from("d.fit"),
                    outcome: FileOutcome::NoValidData,
                },
            ],
        };
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.no_data(), 1);
    }
}
