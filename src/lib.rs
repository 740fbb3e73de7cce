//! FIT Summary Library
//!
//! A Rust library for turning FIT activity files (position, altitude, speed,
//! distance, heart rate, GPS accuracy samples) into flat, time-averaged
//! tables. Samples sharing a timestamp are averaged into one row, and rows
//! can optionally be resampled into N-second buckets.
//!
//! # Features
//!
//! - **`csv`** (default): Enable CSV export and the file/batch pipeline
//! - **`cli`** (default): Build the `fit_summary` command-line binary
//! - **`json`**: Enable JSON batch reports
//! - **`serde`**: Enable serialization of report and stats types
//!
//! # Quick Start
//!
//! Summarize a file in memory:
//! ```rust,no_run
//! use fit_summary::{summarize_fit_file, SummaryOptions};
//! use std::path::Path;
//!
//! let summary = summarize_fit_file(Path::new("ride.fit"), &SummaryOptions::default()).unwrap();
//! println!("{} rows, columns: {:?}", summary.table.len(), summary.table.header());
//! ```
//!
//! Write a 5-second summary CSV:
//! ```rust,no_run
//! use fit_summary::{compute_export_path, process_fit_file, SummaryOptions};
//! use std::path::Path;
//!
//! let options = SummaryOptions {
//!     rounded_timestamp_seconds: 5,
//!     ..SummaryOptions::default()
//! };
//! let input = Path::new("ride.fit");
//! let output = compute_export_path(input, Some(Path::new("processed")));
//! let outcome = process_fit_file(input, &output, &options).unwrap();
//! if !outcome.is_success() {
//!     println!("No valid data found in {}", input.display());
//! }
//! ```
//!
//! # Public API
//!
//! ## Decoding
//! - [`RecordStream`] - Record iterator decoding one FIT message at a time
//! - [`parse_fit_file`] / [`parse_fit_bytes`] - Collect all records at once
//!
//! ## Aggregation
//! - [`Selection`], [`select_fields`] - Message kind and field selection
//! - [`group_by_timestamp`] - Exact-timestamp merge with completeness filter
//! - [`resample`], [`round_to_bucket`] - Bucket resampling
//! - [`aggregate_records`] - Both passes plus field selection
//!
//! ## Pipeline and export
//! - [`summarize_fit_file`] / [`summarize_fit_bytes`] - Decode and aggregate
//! - [`process_fit_file`] - Decode, aggregate and write CSV
//! - [`process_batch`] - Many files, with a per-file [`BatchReport`]
//! - [`export_to_csv`], [`compute_export_path`] - Table writer helpers

// Module declarations
pub mod aggregate;
#[cfg(feature = "csv")]
pub mod batch;
pub mod conversion;
pub mod error;
pub mod export;
pub mod filters;
pub mod parser;
pub mod pipeline;
pub mod types;

// Re-export everything from modules for convenience
#[allow(ambiguous_glob_reexports)]
pub use aggregate::*;
#[cfg(feature = "csv")]
#[allow(ambiguous_glob_reexports)]
pub use batch::*;
#[allow(ambiguous_glob_reexports)]
pub use conversion::*;
#[allow(ambiguous_glob_reexports)]
pub use error::*;
#[allow(ambiguous_glob_reexports)]
pub use export::*;
#[allow(ambiguous_glob_reexports)]
pub use filters::*;
#[allow(ambiguous_glob_reexports)]
pub use parser::*;
#[allow(ambiguous_glob_reexports)]
pub use pipeline::*;
#[allow(ambiguous_glob_reexports)]
pub use types::*;
