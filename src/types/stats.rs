#[cfg(feature = "serde")]
use serde::Serialize;

/// Decoder statistics
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DecodeStats {
    /// Messages produced by the decoder
    pub messages: u64,
    /// Messages that passed the kind filter
    pub kept_messages: u64,
    /// Fields whose name is not a known telemetry field
    pub unrecognized_fields: u64,
    /// Array or otherwise non-scalar values that were dropped
    pub non_scalar_values: u64,
}

/// Grouping statistics, accumulated over both grouping passes
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GroupStats {
    /// Records consumed by the exact-timestamp pass
    pub records: u64,
    /// Records without a timestamp instant (cannot be keyed)
    pub untimed_records: u64,
    /// Text or instant values on averaged columns
    pub non_numeric_values: u64,
    /// Distinct exact timestamps
    pub groups: u64,
    /// Groups dropped because a column had no value
    pub incomplete_rows: u64,
    /// Rows merged away by bucket resampling
    pub merged_by_resample: u64,
}
