//! Synthetic FIT files for integration tests
//!
//! Builds minimal but valid FIT streams (14-byte header with CRC, definition
//! and data messages, trailing file CRC) so the tests run against the real
//! decoder without binary fixtures.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::path::{Path, PathBuf};

/// Seconds between the Unix epoch and the FIT epoch (1989-12-31T00:00:00Z)
const FIT_EPOCH_OFFSET: i64 = 631_065_600;

const MESG_FILE_ID: u16 = 0;
const MESG_RECORD: u16 = 20;

const BASE_ENUM: u8 = 0x00;
const BASE_UINT8: u8 = 0x02;
const BASE_UINT16: u8 = 0x84;
const BASE_UINT32: u8 = 0x86;

const FIELD_TIMESTAMP: u8 = 253;
const FIELD_HEART_RATE: u8 = 3;
const FIELD_DISTANCE: u8 = 5;

const CRC_TABLE: [u16; 16] = [
    0x0000, 0xCC01, 0xD801, 0x1400, 0xF001, 0x3C00, 0x2800, 0xE401, 0xA001, 0x6C00, 0x7800,
    0xB401, 0x5000, 0x9C01, 0x8801, 0x4400,
];

pub fn fit_crc(bytes: &[u8]) -> u16 {
    let mut crc = 0u16;
    for &byte in bytes {
        let mut tmp = CRC_TABLE[(crc & 0xF) as usize];
        crc = (crc >> 4) & 0x0FFF;
        crc = crc ^ tmp ^ CRC_TABLE[(byte & 0xF) as usize];

        tmp = CRC_TABLE[(crc & 0xF) as usize];
        crc = (crc >> 4) & 0x0FFF;
        crc = crc ^ tmp ^ CRC_TABLE[((byte >> 4) & 0xF) as usize];
    }
    crc
}

/// 10:00:00 UTC on a fixed day, plus `seconds`
pub fn at(seconds: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 6, 1, 10, 0, 0).unwrap() + chrono::Duration::seconds(seconds)
}

fn fit_time(instant: DateTime<Utc>) -> u32 {
    (instant.timestamp() - FIT_EPOCH_OFFSET) as u32
}

/// Layout of a record message: which optional fields are present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RecordLayout {
    heart_rate: bool,
    distance: bool,
}

#[derive(Debug, Default)]
pub struct FitFileBuilder {
    data: Vec<u8>,
    record_layout: Option<RecordLayout>,
}

impl FitFileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file_id message (local type 1), as real devices write first
    pub fn file_id(mut self, created: DateTime<Utc>) -> Self {
        self.data.extend_from_slice(&[
            0x41,
            0x00,
            0x00,
            (MESG_FILE_ID & 0xFF) as u8,
            (MESG_FILE_ID >> 8) as u8,
            3,
            0,
            1,
            BASE_ENUM,
            1,
            2,
            BASE_UINT16,
            4,
            4,
            BASE_UINT32,
        ]);
        self.data.push(0x01);
        self.data.push(4); // activity
        self.data.extend_from_slice(&1u16.to_le_bytes()); // garmin
        self.data.extend_from_slice(&fit_time(created).to_le_bytes());
        self
    }

    /// Add a record message (local type 0); absent fields are left out of
    /// the definition rather than written as invalid values
    pub fn record(
        mut self,
        timestamp: DateTime<Utc>,
        heart_rate: Option<u8>,
        distance_m: Option<f64>,
    ) -> Self {
        let layout = RecordLayout {
            heart_rate: heart_rate.is_some(),
            distance: distance_m.is_some(),
        };

        if self.record_layout != Some(layout) {
            let mut fields = vec![(FIELD_TIMESTAMP, 4u8, BASE_UINT32)];
            if layout.heart_rate {
                fields.push((FIELD_HEART_RATE, 1, BASE_UINT8));
            }
            if layout.distance {
                fields.push((FIELD_DISTANCE, 4, BASE_UINT32));
            }

            self.data.extend_from_slice(&[
                0x40,
                0x00,
                0x00,
                (MESG_RECORD & 0xFF) as u8,
                (MESG_RECORD >> 8) as u8,
                fields.len() as u8,
            ]);
            for (number, size, base_type) in fields {
                self.data.extend_from_slice(&[number, size, base_type]);
            }
            self.record_layout = Some(layout);
        }

        self.data.push(0x00);
        self.data.extend_from_slice(&fit_time(timestamp).to_le_bytes());
        if let Some(bpm) = heart_rate {
            self.data.push(bpm);
        }
        if let Some(meters) = distance_m {
            // distance is stored in centimeters (scale 100)
            let raw = (meters * 100.0).round() as u32;
            self.data.extend_from_slice(&raw.to_le_bytes());
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut file = Vec::with_capacity(self.data.len() + 16);
        file.push(14);
        file.push(0x10);
        file.extend_from_slice(&2093u16.to_le_bytes());
        file.extend_from_slice(&(self.data.len() as u32).to_le_bytes());
        file.extend_from_slice(b".FIT");
        let header_crc = fit_crc(&file);
        file.extend_from_slice(&header_crc.to_le_bytes());
        file.extend_from_slice(&self.data);
        let file_crc = fit_crc(&file);
        file.extend_from_slice(&file_crc.to_le_bytes());
        file
    }

    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, self.build()).expect("Failed to write FIT fixture");
        path
    }
}

/// A short ride: two samples share 10:00:00, then one per second
pub fn sample_ride() -> FitFileBuilder {
    FitFileBuilder::new()
        .file_id(at(0))
        .record(at(0), Some(100), Some(0.0))
        .record(at(0), Some(120), Some(2.0))
        .record(at(1), Some(130), Some(5.0))
        .record(at(2), Some(140), Some(9.0))
        .record(at(4), Some(150), Some(15.0))
}

/// Read a CSV file into (header, rows)
pub fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV output");
    let header = reader
        .headers()
        .expect("Failed to read CSV header")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|record| {
            record
                .expect("Failed to read CSV record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect();
    (header, rows)
}

/// Value of `column` in `row`, looked up by header name
pub fn cell<'a>(header: &[String], row: &'a [String], column: &str) -> &'a str {
    let index = header
        .iter()
        .position(|name| name == column)
        .unwrap_or_else(|| panic!("Column '{column}' missing from {header:?}"));
    &row[index]
}
