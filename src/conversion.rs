//! Value conversion utilities
//!
//! Contains the conversions between decoder values, the canonical record
//! values, and the text forms written to CSV.

use crate::types::FieldValue;
use chrono::{DateTime, Timelike, Utc};
use fitparser::Value;

/// Result of converting a single decoder value
#[derive(Debug, Clone, PartialEq)]
pub enum Converted {
    Scalar(FieldValue),
    /// Arrays and other composite values, dropped by the adapter
    NonScalar,
}

/// Convert a decoder value into a record value
///
/// Timestamps are normalized to UTC instants once here; every numeric base
/// type (including the `z` variants, bytes and raw enums) becomes an `f64`.
pub fn convert_fit_value(value: Value) -> Converted {
    let scalar = match value {
        Value::Timestamp(instant) => FieldValue::Instant(instant.with_timezone(&Utc)),
        Value::String(text) => FieldValue::Text(text),
        Value::Byte(v) | Value::Enum(v) | Value::UInt8(v) | Value::UInt8z(v) => {
            FieldValue::Number(v as f64)
        }
        Value::SInt8(v) => FieldValue::Number(v as f64),
        Value::SInt16(v) => FieldValue::Number(v as f64),
        Value::UInt16(v) | Value::UInt16z(v) => FieldValue::Number(v as f64),
        Value::SInt32(v) => FieldValue::Number(v as f64),
        Value::UInt32(v) | Value::UInt32z(v) => FieldValue::Number(v as f64),
        Value::SInt64(v) => FieldValue::Number(v as f64),
        Value::UInt64(v) | Value::UInt64z(v) => FieldValue::Number(v as f64),
        Value::Float32(v) => FieldValue::Number(v as f64),
        Value::Float64(v) => FieldValue::Number(v),
        Value::Array(_) => return Converted::NonScalar,
        #[allow(unreachable_patterns)]
        _ => return Converted::NonScalar,
    };
    Converted::Scalar(scalar)
}

/// Normalize a message kind name for comparison
///
/// `record`, `Record` and `RECORD` compare equal, as do `file_id` and `FileId`.
pub fn normalize_kind_name(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Format an instant for CSV output
///
/// Whole seconds print as `YYYY-MM-DD HH:MM:SS`; sub-second instants get a
/// six digit fraction so the output stays stable across runs.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    if instant.nanosecond() == 0 {
        instant.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        instant.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

/// Format an averaged value for CSV output (shortest round-trip form)
pub fn format_value(value: f64) -> String {
    value.to_string()
}
