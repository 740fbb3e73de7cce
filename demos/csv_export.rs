//! CSV Export Example
//!
//! Demonstrates how to summarize a FIT file and export it to CSV, optionally
//! resampled into N-second buckets.
//!
//! Usage: csv_export <input.fit> [output_dir] [bucket_seconds]

use fit_summary::{
    compute_export_path, export_to_csv, summarize_fit_file, SummaryOptions,
};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Get input file from command line or show usage
    let input_file = std::env::args().nth(1).unwrap_or_else(|| {
        println!("Usage: csv_export <input.fit> [output_dir] [bucket_seconds]");
        println!("Example: csv_export ride.fit ./processed 5");
        std::process::exit(1);
    });

    let output_dir = std::env::args().nth(2);
    let rounded_timestamp_seconds = std::env::args()
        .nth(3)
        .map(|s| s.parse::<i64>())
        .transpose()?
        .unwrap_or(0);

    let options = SummaryOptions {
        rounded_timestamp_seconds,
        ..SummaryOptions::default()
    };

    println!("Summarizing: {}", input_file);
    let input_path = Path::new(&input_file);
    let summary = summarize_fit_file(input_path, &options)?;

    println!("\nSummary Information:");
    println!("  Messages decoded: {}", summary.decode_stats.messages);
    println!("  Messages kept: {}", summary.decode_stats.kept_messages);
    println!("  Distinct timestamps: {}", summary.group_stats.groups);
    println!("  Incomplete rows dropped: {}", summary.group_stats.incomplete_rows);
    println!("  Rows: {}", summary.table.len());
    println!("  Columns: {}", summary.table.header().join(", "));
    if !summary.is_empty() {
        println!("  Duration: {:.1}s", summary.table.duration_seconds());
    }

    let output_path = compute_export_path(input_path, output_dir.as_deref().map(Path::new));
    match export_to_csv(&summary.table, &output_path)? {
        Some(report) => println!("\n✓ Exported {} rows to {}", report.rows, report.csv_path.display()),
        None => println!("\nNo valid data found in {}", input_file),
    }

    Ok(())
}
