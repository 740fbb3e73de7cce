//! Record and field selection
//!
//! One list of names drives both filters: every name is matched against
//! message kinds (which messages are kept at all) and against field names
//! (which values of those messages are kept).
//!
//! # Usage
//!
//! ```rust
//! use fit_summary::{select_fields, Field, FieldValue, Record, Selection};
//!
//! let selection = Selection::default();
//! let record = Record::new("record")
//!     .with(Field::HeartRate, FieldValue::Number(120.0))
//!     .with(Field::Cadence, FieldValue::Number(85.0));
//! let reduced = select_fields(&record, &selection.fields());
//! assert!(reduced.get(Field::Cadence).is_none());
//! ```

use crate::conversion::normalize_kind_name;
use crate::types::{Field, Record};
use std::collections::BTreeSet;

/// Default selection, matching the reference field set
pub const DEFAULT_SELECTION: [&str; 10] = [
    "record",
    "timestamp",
    "distance",
    "enhanced_altitude",
    "enhanced_speed",
    "gps_accuracy",
    "position_lat",
    "position_long",
    "speed",
    "heart_rate",
];

/// Ordered, de-duplicated list of selected names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    names: Vec<String>,
}

impl Selection {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() && !unique.iter().any(|existing| existing == name) {
                unique.push(name.to_string());
            }
        }
        Self { names: unique }
    }

    /// Parse a list of names separated by commas and/or whitespace
    pub fn parse_list(list: &str) -> Self {
        Self::new(list.split(|c: char| c == ',' || c.is_whitespace()))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Known fields named by the selection
    pub fn fields(&self) -> BTreeSet<Field> {
        self.names
            .iter()
            .filter_map(|name| Field::from_name(&name.to_ascii_lowercase()))
            .collect()
    }

    /// Names that are not known telemetry fields (candidate message kinds)
    pub fn unrecognized_fields(&self) -> Vec<&str> {
        self.names
            .iter()
            .filter(|name| Field::from_name(&name.to_ascii_lowercase()).is_none())
            .map(String::as_str)
            .collect()
    }

    /// Kind filter built from the same list
    pub fn kind_filter(&self) -> KindFilter {
        KindFilter::new(self.names.iter())
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(DEFAULT_SELECTION)
    }
}

/// Set of message kinds to keep while decoding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindFilter {
    kinds: BTreeSet<String>,
}

impl KindFilter {
    pub fn new<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            kinds: kinds
                .into_iter()
                .map(|kind| normalize_kind_name(kind.as_ref()))
                .collect(),
        }
    }

    pub fn matches(&self, kind: &str) -> bool {
        self.kinds.contains(&normalize_kind_name(kind))
    }
}

/// Keep only the selected fields of a record, plus its timestamp
pub fn select_fields(record: &Record, fields: &BTreeSet<Field>) -> Record {
    Record {
        kind: record.kind.clone(),
        fields: record
            .fields
            .iter()
            .filter(|(field, _)| *field == Field::Timestamp || fields.contains(field))
            .cloned()
            .collect(),
    }
}

/// Owned variant of [`select_fields`] used inside the pipeline
pub fn retain_fields(mut record: Record, fields: &BTreeSet<Field>) -> Record {
    record
        .fields
        .retain(|(field, _)| *field == Field::Timestamp || fields.contains(field));
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldValue;
    use chrono::{TimeZone, Utc};

    fn sample_record() -> Record {
        Record::new("record")
            .with(
                Field::Timestamp,
                FieldValue::Instant(Utc.with_ymd_and_hms(2024, 3, 2, 7, 15, 0).unwrap()),
            )
            .with(Field::HeartRate, FieldValue::Number(131.0))
            .with(Field::Cadence, FieldValue::Number(88.0))
            .with(Field::Distance, FieldValue::Number(1204.5))
    }

    #[test]
    fn test_default_selection_fields() {
        let fields = Selection::default().fields();
        assert_eq!(fields.len(), 9);
        assert!(fields.contains(&Field::Timestamp));
        assert!(fields.contains(&Field::HeartRate));
        assert!(!fields.contains(&Field::Cadence));
        assert_eq!(Selection::default().unrecognized_fields(), vec!["record"]);
    }

    #[test]
    fn test_selection_deduplicates_and_parses_lists() {
        let selection = Selection::parse_list("record, heart_rate,heart_rate  distance");
        assert_eq!(selection.names(), ["record", "heart_rate", "distance"]);
        assert!(Selection::parse_list(" , ").is_empty());
    }

    #[test]
    fn test_kind_filter_matching() {
        let filter = Selection::default().kind_filter();
        assert!(filter.matches("record"));
        assert!(filter.matches("Record"));
        assert!(!filter.matches("lap"));
        assert!(!filter.matches("file_id"));

        let filter = KindFilter::new(["file_id"]);
        assert!(filter.matches("FileId"));
    }

    #[test]
    fn test_select_fields_keeps_timestamp() {
        let fields: BTreeSet<Field> = [Field::HeartRate].into_iter().collect();
        let reduced = select_fields(&sample_record(), &fields);
        assert_eq!(reduced.kind, "record");
        assert_eq!(reduced.fields.len(), 2);
        assert!(reduced.timestamp().is_some());
        assert!(reduced.get(Field::HeartRate).is_some());
        assert!(reduced.get(Field::Distance).is_none());
    }

    #[test]
    fn test_select_absent_field_is_not_an_error() {
        let fields: BTreeSet<Field> = [Field::Power].into_iter().collect();
        let reduced = retain_fields(sample_record(), &fields);
        assert_eq!(reduced.fields.len(), 1);
        assert!(reduced.get(Field::Power).is_none());
    }
}
