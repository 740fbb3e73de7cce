use crate::types::Row;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Running `(sum, count)` for one column of one group
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MeanAccumulator {
    sum: f64,
    count: u32,
}

impl MeanAccumulator {
    pub fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Mean over the values actually added; `None` when nothing was added
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Accumulators keyed by instant, one per column
///
/// The column set may grow while records are added; groups created before a
/// column was first seen simply have no contribution for it.
#[derive(Debug, Default)]
pub struct GroupAccumulator {
    groups: BTreeMap<DateTime<Utc>, Vec<MeanAccumulator>>,
}

impl GroupAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure a group exists for `key`, even if it never gets a value
    pub fn touch(&mut self, key: DateTime<Utc>) {
        self.groups.entry(key).or_default();
    }

    pub fn add(&mut self, key: DateTime<Utc>, column: usize, value: f64) {
        let group = self.groups.entry(key).or_default();
        if group.len() <= column {
            group.resize(column + 1, MeanAccumulator::default());
        }
        group[column].add(value);
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Finalize every group into a row, ascending by key
    ///
    /// Groups missing a value for any of the `column_count` columns are
    /// dropped; the second element is how many were dropped.
    pub fn finish(self, column_count: usize) -> (Vec<Row>, u64) {
        let mut rows = Vec::with_capacity(self.groups.len());
        let mut incomplete = 0u64;

        for (timestamp, accumulators) in self.groups {
            let values: Option<Vec<f64>> = (0..column_count)
                .map(|column| accumulators.get(column).and_then(MeanAccumulator::mean))
                .collect();

            match values {
                Some(values) => rows.push(Row { timestamp, values }),
                None => incomplete += 1,
            }
        }

        (rows, incomplete)
    }
}
