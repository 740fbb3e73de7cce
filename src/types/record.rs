use chrono::{DateTime, Utc};
use std::fmt;

/// Telemetry fields known to the summarizer
///
/// Names follow the FIT profile (`enhanced_speed`, `position_lat`, ...).
/// Decoded fields outside this set are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Timestamp,
    Distance,
    Altitude,
    EnhancedAltitude,
    Speed,
    EnhancedSpeed,
    GpsAccuracy,
    PositionLat,
    PositionLong,
    HeartRate,
    Cadence,
    Power,
    Temperature,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Timestamp,
        Field::Distance,
        Field::Altitude,
        Field::EnhancedAltitude,
        Field::Speed,
        Field::EnhancedSpeed,
        Field::GpsAccuracy,
        Field::PositionLat,
        Field::PositionLong,
        Field::HeartRate,
        Field::Cadence,
        Field::Power,
        Field::Temperature,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Timestamp => "timestamp",
            Field::Distance => "distance",
            Field::Altitude => "altitude",
            Field::EnhancedAltitude => "enhanced_altitude",
            Field::Speed => "speed",
            Field::EnhancedSpeed => "enhanced_speed",
            Field::GpsAccuracy => "gps_accuracy",
            Field::PositionLat => "position_lat",
            Field::PositionLong => "position_long",
            Field::HeartRate => "heart_rate",
            Field::Cadence => "cadence",
            Field::Power => "power",
            Field::Temperature => "temperature",
        }
    }

    /// Look up a field by its profile name (exact, lowercase)
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|field| field.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Instant(DateTime<Utc>),
}

impl FieldValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Instant(instant) => Some(*instant),
            _ => None,
        }
    }
}

/// One decoded FIT message, reduced to the known fields
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub kind: String,
    pub fields: Vec<(Field, FieldValue)>,
}

impl Record {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    /// Builder-style helper, mostly for tests and synthetic input
    pub fn with(mut self, field: Field, value: FieldValue) -> Self {
        self.fields.push((field, value));
        self
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
    }

    /// The record's instant, if it carries a usable `timestamp` field
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.get(Field::Timestamp).and_then(FieldValue::as_instant)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
