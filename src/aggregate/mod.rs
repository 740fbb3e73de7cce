//! Aggregation pipeline
//!
//! Two grouping passes over decoded records: an exact-timestamp merge, then
//! optional bucket resampling. Both use the same `(sum, count)` accumulator.

pub mod accumulator;
pub mod grouper;
pub mod resample;

pub use accumulator::*;
pub use grouper::*;
pub use resample::*;

use crate::error::Result;
use crate::filters::retain_fields;
use crate::types::{BucketWidth, Field, GroupStats, Record, Table};
use std::collections::BTreeSet;

/// Run field selection, the exact merge and (if `bucket` is set) resampling
pub fn aggregate_records<I>(
    records: I,
    fields: &BTreeSet<Field>,
    bucket: Option<BucketWidth>,
) -> Result<(Table, GroupStats)>
where
    I: IntoIterator<Item = Record>,
{
    let mut stats = GroupStats::default();
    let selected = records
        .into_iter()
        .map(|record| retain_fields(record, fields));
    let table = group_by_timestamp(selected, &mut stats);

    let table = match bucket {
        Some(width) if !table.is_empty() => resample(&table, width, &mut stats)?,
        _ => table,
    };

    Ok((table, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldValue, TimeColumn};
    use chrono::{TimeZone, Utc};

    fn sample(second: u32, heart_rate: f64, cadence: f64) -> Record {
        Record::new("record")
            .with(
                Field::Timestamp,
                FieldValue::Instant(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, second).unwrap()),
            )
            .with(Field::HeartRate, FieldValue::Number(heart_rate))
            .with(Field::Cadence, FieldValue::Number(cadence))
    }

    #[test]
    fn test_unselected_fields_never_become_columns() {
        let fields: BTreeSet<Field> = [Field::HeartRate].into_iter().collect();
        let records = vec![sample(0, 100.0, 80.0), sample(1, 110.0, 82.0)];
        let (table, stats) = aggregate_records(records, &fields, None).unwrap();

        assert_eq!(table.columns, vec![Field::HeartRate]);
        assert_eq!(table.time_column, TimeColumn::Exact);
        assert_eq!(table.len(), 2);
        assert_eq!(stats.records, 2);
    }

    #[test]
    fn test_bucket_pass_runs_after_exact_merge() {
        let fields: BTreeSet<Field> = [Field::HeartRate, Field::Cadence].into_iter().collect();
        let records = vec![
            sample(0, 100.0, 80.0),
            sample(0, 120.0, 80.0),
            sample(1, 140.0, 90.0),
        ];
        let bucket = BucketWidth::from_seconds(5);
        let (table, _) = aggregate_records(records, &fields, bucket).unwrap();

        // exact merge first (110 at :00), then the bucket mean of 110 and 140
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].values, vec![125.0, 85.0]);
        assert_eq!(table.header()[0], "rounded_timestamp");
    }

    #[test]
    fn test_empty_input_skips_resampling() {
        let fields = BTreeSet::new();
        let (table, _) =
            aggregate_records(Vec::new(), &fields, BucketWidth::from_seconds(5)).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.time_column, TimeColumn::Exact);
    }
}
