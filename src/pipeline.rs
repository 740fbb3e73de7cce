//! Single-file pipeline: decode, select, group, resample, write
//!
//! Every stage owns its input and hands the result on; nothing is shared
//! between invocations, so separate files can be processed concurrently by
//! separate calls.

use crate::aggregate::aggregate_records;
use crate::error::{FitError, Result};
use crate::filters::Selection;
use crate::parser::RecordStream;
use crate::types::{BucketWidth, DecodeStats, GroupStats, Table};
use log::{debug, info};
use std::path::Path;

#[cfg(feature = "csv")]
use crate::export::{export_to_csv, ExportReport};

/// Options controlling how a file is summarized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOptions {
    /// Message kinds and fields to keep
    pub selection: Selection,
    /// Bucket width in seconds; zero or negative disables resampling
    pub rounded_timestamp_seconds: i64,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            rounded_timestamp_seconds: 0,
        }
    }
}

impl SummaryOptions {
    pub fn bucket_width(&self) -> Option<BucketWidth> {
        BucketWidth::from_seconds(self.rounded_timestamp_seconds)
    }
}

/// Summary table together with the statistics gathered building it
#[derive(Debug, Clone)]
pub struct Summary {
    pub table: Table,
    pub decode_stats: DecodeStats,
    pub group_stats: GroupStats,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Decode and aggregate a FIT file without writing anything
pub fn summarize_fit_file(file_path: &Path, options: &SummaryOptions) -> Result<Summary> {
    let stream = RecordStream::open(file_path, Some(options.selection.kind_filter()))?;
    summarize_stream(stream, options)
}

/// Decode and aggregate FIT data held in memory
pub fn summarize_fit_bytes(data: &[u8], options: &SummaryOptions) -> Result<Summary> {
    let stream = RecordStream::from_bytes(data, Some(options.selection.kind_filter()))?;
    summarize_stream(stream, options)
}

fn summarize_stream(mut stream: RecordStream, options: &SummaryOptions) -> Result<Summary> {
    let fields = options.selection.fields();
    let aggregated = aggregate_records(stream.by_ref(), &fields, options.bucket_width());
    // a truncated or corrupt stream outranks whatever was built from its prefix
    let decode_stats = stream.finish()?;
    let (table, group_stats) = aggregated?;

    debug!(
        "Kept {} of {} messages ({} unrecognized fields, {} non-scalar values)",
        decode_stats.kept_messages,
        decode_stats.messages,
        decode_stats.unrecognized_fields,
        decode_stats.non_scalar_values
    );

    Ok(Summary {
        table,
        decode_stats,
        group_stats,
    })
}

/// Outcome of processing one file
#[derive(Debug, Clone)]
pub enum ProcessOutcome {
    /// A summary file was written
    #[cfg(feature = "csv")]
    Written {
        report: ExportReport,
        summary: Summary,
    },
    /// Decoding worked but no complete rows survived; nothing was written
    NoValidData { summary: Summary },
}

impl ProcessOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ProcessOutcome::NoValidData { .. })
    }

    pub fn summary(&self) -> &Summary {
        match self {
            #[cfg(feature = "csv")]
            ProcessOutcome::Written { summary, .. } => summary,
            ProcessOutcome::NoValidData { summary } => summary,
        }
    }

    /// Convert the empty outcome into [`FitError::EmptyResult`]
    pub fn into_result(self) -> Result<Self> {
        match self {
            ProcessOutcome::NoValidData { .. } => Err(FitError::EmptyResult),
            outcome => Ok(outcome),
        }
    }
}

/// Summarize a FIT file and write the table as CSV to `output_path`
///
/// The output file is only created when every stage succeeded and the table
/// has at least one row.
#[cfg(feature = "csv")]
pub fn process_fit_file(
    input_path: &Path,
    output_path: &Path,
    options: &SummaryOptions,
) -> Result<ProcessOutcome> {
    let summary = summarize_fit_file(input_path, options)?;

    match export_to_csv(&summary.table, output_path)? {
        Some(report) => {
            info!(
                "Wrote {} rows x {} columns to {}",
                report.rows,
                report.columns,
                report.csv_path.display()
            );
            Ok(ProcessOutcome::Written { report, summary })
        }
        None => {
            info!("No valid data found in {}", input_path.display());
            Ok(ProcessOutcome::NoValidData { summary })
        }
    }
}
