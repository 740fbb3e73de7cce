use crate::types::Field;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Width of a resampling bucket in whole seconds (always > 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketWidth(u64);

impl BucketWidth {
    /// Zero or negative widths disable resampling; every positive width is kept
    pub fn from_seconds(seconds: i64) -> Option<Self> {
        u64::try_from(seconds)
            .ok()
            .filter(|seconds| *seconds > 0)
            .map(BucketWidth)
    }

    pub fn seconds(self) -> u64 {
        self.0
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

/// Which instant a table is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeColumn {
    /// Exact sample timestamps, after merging duplicates
    Exact,
    /// Timestamps rounded to the nearest bucket boundary
    Bucket(BucketWidth),
}

impl TimeColumn {
    pub fn header(&self) -> &'static str {
        match self {
            TimeColumn::Exact => "timestamp",
            TimeColumn::Bucket(_) => "rounded_timestamp",
        }
    }
}

/// One output row: a unique instant and one averaged value per column
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub timestamp: DateTime<Utc>,
    pub values: Vec<f64>,
}

/// Summary table, sorted by timestamp with complete rows only
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub time_column: TimeColumn,
    pub columns: Vec<Field>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn empty(time_column: TimeColumn) -> Self {
        Self {
            time_column,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Header names in output order, time column first
    pub fn header(&self) -> Vec<&'static str> {
        std::iter::once(self.time_column.header())
            .chain(self.columns.iter().map(|field| field.name()))
            .collect()
    }

    pub fn column_index(&self, field: Field) -> Option<usize> {
        self.columns.iter().position(|column| *column == field)
    }

    /// Values of one column, in row order
    pub fn column(&self, field: Field) -> Option<Vec<f64>> {
        let index = self.column_index(field)?;
        Some(self.rows.iter().map(|row| row.values[index]).collect())
    }

    /// Every row holds one value per column
    pub fn is_complete(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.values.len() == self.columns.len() && row.values.iter().all(|v| !v.is_nan()))
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.rows.first().map(|row| row.timestamp)
    }

    pub fn end_time(&self) -> Option<DateTime<Utc>> {
        self.rows.last().map(|row| row.timestamp)
    }

    /// Duration covered by the table in seconds
    pub fn duration_seconds(&self) -> f64 {
        match (self.start_time(), self.end_time()) {
            (Some(start), Some(end)) => (end - start).num_milliseconds() as f64 / 1000.0,
            _ => 0.0,
        }
    }
}
