//! CLI binary for FIT Summary
//!
//! This provides the command-line interface for the fit_summary library.

use anyhow::{bail, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use fit_summary::{process_batch, OutputLocation, Selection, SummaryOptions, DEFAULT_SELECTION};
use glob::glob;
use log::{debug, LevelFilter};
use std::path::{Path, PathBuf};

fn build_command() -> Command {
    Command::new("FIT Summary")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Summarize FIT activity files into time-averaged CSV tables.")
        .arg(
            Arg::new("files")
                .help("FIT files to process (.fit extension, case-insensitive, supports globbing)")
                .required(true)
                .num_args(1..)
                .index(1),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Output CSV file or directory (default: next to each input file)")
                .value_name("PATH")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("selected-records")
                .long("selected-records")
                .help("Message kinds and fields to include (comma separated, repeatable)")
                .value_name("NAME[,NAME...]")
                .action(ArgAction::Append)
                .value_delimiter(',')
                .default_values(DEFAULT_SELECTION),
        )
        .arg(
            Arg::new("rounded-timestamp-seconds")
                .long("rounded-timestamp-seconds")
                .help("Round timestamps to the nearest N seconds and average per bucket (0 disables)")
                .value_name("N")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("0"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .help("Write a JSON report of per-file outcomes (requires the json feature)")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed processing information")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> Result<()> {
    let matches = build_command().get_matches();

    let debug = matches.get_flag("debug");
    init_logging(debug);
    debug!(
        "fit_summary {} ({})",
        env!("CARGO_PKG_VERSION"),
        option_env!("VERGEN_GIT_SHA").unwrap_or("unknown")
    );

    let file_patterns: Vec<&String> = matches
        .get_many::<String>("files")
        .map(|values| values.collect())
        .unwrap_or_default();
    let selection = selection_from(&matches);
    let rounded_timestamp_seconds = matches
        .get_one::<i64>("rounded-timestamp-seconds")
        .copied()
        .unwrap_or(0);
    let output = matches
        .get_one::<PathBuf>("output")
        .map(|path| OutputLocation::from_path(path))
        .unwrap_or_default();

    debug!("Input patterns: {file_patterns:?}");
    debug!("Selection: {:?}", selection.names());
    for name in selection.unrecognized_fields() {
        debug!("'{name}' is not a known field, matching it against message kinds only");
    }

    let input_paths = expand_patterns(&file_patterns);
    if input_paths.is_empty() {
        eprintln!("Error: No input files found.");
        eprintln!("Input patterns were: {file_patterns:?}");
        std::process::exit(1);
    }

    if output.is_file() && input_paths.len() > 1 {
        bail!(
            "--output must be a directory when processing {} files",
            input_paths.len()
        );
    }

    let options = SummaryOptions {
        selection,
        rounded_timestamp_seconds,
    };

    let report = process_batch(&input_paths, &output, &options);

    for file in &report.files {
        let filename = file
            .input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown");
        if file.outcome.is_success() {
            println!("Successfully processed: {filename} ({})", file.outcome.status());
        } else {
            eprintln!("Error processing: {filename} ({})", file.outcome.status());
        }
    }

    if let Some(report_path) = matches.get_one::<PathBuf>("report") {
        write_report(&report, report_path)?;
    }

    if report.succeeded() == 0 {
        eprintln!(
            "Error: No files were successfully processed out of {} files found.",
            report.files.len()
        );
        eprintln!("Use --debug flag for more detailed error information.");
        std::process::exit(1);
    }

    Ok(())
}

fn selection_from(matches: &ArgMatches) -> Selection {
    Selection::parse_list(
        &matches
            .get_many::<String>("selected-records")
            .map(|values| values.map(String::as_str).collect::<Vec<_>>().join(","))
            .unwrap_or_default(),
    )
}

/// Initialize logging; `RUST_LOG` overrides the level picked by `--debug`
fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Expand glob patterns; plain paths pass through untouched
fn expand_patterns(patterns: &[&String]) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    for pattern in patterns {
        if !(pattern.contains('*') || pattern.contains('?')) {
            paths.push(Path::new(pattern.as_str()).to_path_buf());
            continue;
        }

        match glob(pattern) {
            Ok(glob_iter) => {
                let mut matched = 0;
                for entry in glob_iter {
                    match entry {
                        Ok(path) => {
                            matched += 1;
                            paths.push(path);
                        }
                        Err(e) => eprintln!("Error expanding glob pattern '{pattern}': {e}"),
                    }
                }
                debug!("Glob pattern '{pattern}' matched {matched} files");
            }
            Err(e) => eprintln!("Invalid glob pattern '{pattern}': {e}"),
        }
    }

    paths
}

#[cfg(feature = "json")]
fn write_report(report: &fit_summary::BatchReport, path: &Path) -> Result<()> {
    use anyhow::Context;

    let json = report.to_json().context("Failed to serialize batch report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write batch report: {path:?}"))?;
    debug!("Wrote batch report to {}", path.display());
    Ok(())
}

#[cfg(not(feature = "json"))]
fn write_report(_report: &fit_summary::BatchReport, _path: &Path) -> Result<()> {
    bail!("--report requires fit_summary to be built with the json feature")
}
