use crate::aggregate::GroupAccumulator;
use crate::error::{FitError, Result};
use crate::types::{BucketWidth, GroupStats, Table, TimeColumn};
use chrono::{DateTime, TimeZone, Utc};
use log::debug;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Round an instant to the nearest bucket boundary
///
/// Boundaries are multiples of the width counted from the Unix epoch. An
/// instant exactly halfway between two boundaries goes to the later one.
pub fn round_to_bucket(instant: &DateTime<Utc>, width: BucketWidth) -> Result<DateTime<Utc>> {
    let nanos = instant
        .timestamp_nanos_opt()
        .ok_or_else(|| FitError::Resample(format!("timestamp {instant} is out of range")))?;
    let width_nanos = i64::try_from(width.seconds())
        .ok()
        .and_then(|seconds| seconds.checked_mul(NANOS_PER_SECOND))
        .ok_or_else(|| {
            FitError::Resample(format!("{}s buckets are too wide", width.seconds()))
        })?;

    let rounded = nanos
        .checked_add(width_nanos / 2)
        .map(|shifted| shifted.div_euclid(width_nanos))
        .and_then(|bucket| bucket.checked_mul(width_nanos))
        .ok_or_else(|| {
            FitError::Resample(format!(
                "rounding {instant} to {}s buckets overflows",
                width.seconds()
            ))
        })?;

    Ok(Utc.timestamp_nanos(rounded))
}

/// Coarsen a table into buckets of `width`, re-averaging merged rows
///
/// The exact time column is replaced by the bucket column; the value
/// columns are unchanged.
pub fn resample(table: &Table, width: BucketWidth, stats: &mut GroupStats) -> Result<Table> {
    let mut groups = GroupAccumulator::new();

    for row in &table.rows {
        let bucket = round_to_bucket(&row.timestamp, width)?;
        groups.touch(bucket);
        for (column, value) in row.values.iter().enumerate() {
            groups.add(bucket, column, *value);
        }
    }

    let (rows, incomplete) = groups.finish(table.columns.len());
    if incomplete > 0 {
        return Err(FitError::Resample(format!(
            "{incomplete} buckets lost values while regrouping"
        )));
    }

    let merged = table.rows.len().saturating_sub(rows.len()) as u64;
    stats.merged_by_resample += merged;
    debug!(
        "Resampled {} rows into {} buckets of {}s",
        table.rows.len(),
        rows.len(),
        width.seconds()
    );

    Ok(Table {
        time_column: TimeColumn::Bucket(width),
        columns: table.columns.clone(),
        rows,
    })
}
