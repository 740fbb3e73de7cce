use crate::aggregate::GroupAccumulator;
use crate::types::{Field, FieldValue, GroupStats, Record, Table, TimeColumn};
use log::{debug, trace};
use std::collections::HashMap;

/// Merge records sharing an exact timestamp into averaged rows
///
/// Columns are the numeric fields seen in at least one record, in first-seen
/// order. Records without a timestamp instant are skipped. Groups lacking a
/// value for any column are dropped, so every returned row is complete.
pub fn group_by_timestamp<I>(records: I, stats: &mut GroupStats) -> Table
where
    I: IntoIterator<Item = Record>,
{
    let mut columns: Vec<Field> = Vec::new();
    let mut column_index: HashMap<Field, usize> = HashMap::new();
    let mut groups = GroupAccumulator::new();

    for record in records {
        stats.records += 1;

        let Some(timestamp) = record.timestamp() else {
            trace!("Skipping '{}' record without timestamp", record.kind);
            stats.untimed_records += 1;
            continue;
        };
        groups.touch(timestamp);

        for (field, value) in record.fields {
            if field == Field::Timestamp {
                continue;
            }

            let FieldValue::Number(number) = value else {
                trace!("Ignoring non-numeric value for '{field}'");
                stats.non_numeric_values += 1;
                continue;
            };

            let index = *column_index.entry(field).or_insert_with(|| {
                columns.push(field);
                columns.len() - 1
            });
            groups.add(timestamp, index, number);
        }
    }

    stats.groups += groups.len() as u64;
    let (rows, incomplete) = groups.finish(columns.len());
    stats.incomplete_rows += incomplete;

    debug!(
        "Grouped {} records into {} timestamps over {} columns ({} incomplete dropped)",
        stats.records,
        stats.groups,
        columns.len(),
        incomplete
    );

    if rows.is_empty() {
        return Table::empty(TimeColumn::Exact);
    }

    Table {
        time_column: TimeColumn::Exact,
        columns,
        rows,
    }
}
