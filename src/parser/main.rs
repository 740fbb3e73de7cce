use crate::error::Result;
use crate::filters::KindFilter;
use crate::parser::RecordStream;
use crate::types::{DecodeStats, Record};
use std::path::Path;

/// Decode a FIT file into records, keeping only the given message kinds
pub fn parse_fit_file(
    file_path: &Path,
    kinds: Option<KindFilter>,
) -> Result<(Vec<Record>, DecodeStats)> {
    collect_records(RecordStream::open(file_path, kinds)?)
}

/// Decode FIT data from memory
pub fn parse_fit_bytes(data: &[u8], kinds: Option<KindFilter>) -> Result<(Vec<Record>, DecodeStats)> {
    collect_records(RecordStream::from_bytes(data, kinds)?)
}

fn collect_records(mut stream: RecordStream) -> Result<(Vec<Record>, DecodeStats)> {
    let records: Vec<Record> = stream.by_ref().collect();
    let stats = stream.finish()?;
    Ok((records, stats))
}
