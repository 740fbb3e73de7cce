use crate::conversion::{convert_fit_value, Converted};
use crate::error::{FitError, Result};
use crate::filters::KindFilter;
use crate::types::{DecodeStats, Field, Record};
use fitparser::de::{FitObject, FitStreamProcessor};
use fitparser::FitDataRecord;
use log::{debug, trace, warn};
use std::path::Path;

/// Lazy sequence of records decoded from one FIT stream
///
/// Each call to `next` deserializes FIT objects until one data message passes
/// the kind filter, so only one decoded message is held at a time. Messages of
/// other kinds are still decoded (they can carry timestamp state) but never
/// converted. The stream is finite and cannot be restarted.
///
/// A decode failure part way through ends the iteration; it is reported by
/// [`RecordStream::finish`].
pub struct RecordStream {
    data: Vec<u8>,
    offset: usize,
    processor: FitStreamProcessor,
    kinds: Option<KindFilter>,
    stats: DecodeStats,
    error: Option<FitError>,
}

impl RecordStream {
    /// Open a FIT file and validate its header
    pub fn open(file_path: &Path, kinds: Option<KindFilter>) -> Result<Self> {
        if !file_path.is_file() {
            return Err(FitError::NotFound(file_path.to_path_buf()));
        }

        let file_data = std::fs::read(file_path).map_err(|err| {
            debug!("Failed to read {}: {err}", file_path.display());
            FitError::NotFound(file_path.to_path_buf())
        })?;

        debug!(
            "Read {} bytes ({:.2} MB) from {}",
            file_data.len(),
            file_data.len() as f64 / 1024.0 / 1024.0,
            file_path.display()
        );

        Self::from_vec(file_data, kinds)
    }

    /// Decode FIT data held in memory
    pub fn from_bytes(data: &[u8], kinds: Option<KindFilter>) -> Result<Self> {
        Self::from_vec(data.to_vec(), kinds)
    }

    fn from_vec(data: Vec<u8>, kinds: Option<KindFilter>) -> Result<Self> {
        if data.is_empty() {
            return Err(FitError::Decode("input is empty".to_string()));
        }

        let mut processor = FitStreamProcessor::new();
        let (remaining, header) = processor
            .deserialize_next(&data)
            .map_err(|err| FitError::Decode(err.to_string()))?;
        let offset = data.len() - remaining.len();

        if let FitObject::Header(header) = &header {
            debug!(
                "FIT header: {} header bytes, {} data bytes",
                header.header_size(),
                header.data_size()
            );
        }

        Ok(Self {
            data,
            offset,
            processor,
            kinds,
            stats: DecodeStats::default(),
            error: None,
        })
    }

    /// Statistics for the messages consumed so far
    pub fn stats(&self) -> &DecodeStats {
        &self.stats
    }

    /// Decode failure that ended the iteration early, if any
    pub fn error(&self) -> Option<&FitError> {
        self.error.as_ref()
    }

    /// Drain the stream's outcome: the statistics, or the decode failure
    /// that cut the stream short
    pub fn finish(self) -> Result<DecodeStats> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.stats),
        }
    }

    fn fail(&mut self, err: fitparser::Error) {
        warn!("Decoding stopped at byte {}: {err}", self.offset);
        self.error = Some(FitError::Decode(err.to_string()));
        self.offset = self.data.len();
    }

    /// Next decoded data message, any kind
    fn next_message(&mut self) -> Option<FitDataRecord> {
        while self.offset < self.data.len() {
            let step = self
                .processor
                .deserialize_next(&self.data[self.offset..])
                .map(|(remaining, object)| (remaining.len(), object));
            let object = match step {
                Ok((remaining, object)) => {
                    self.offset = self.data.len() - remaining;
                    object
                }
                Err(err) => {
                    self.fail(err);
                    return None;
                }
            };

            match object {
                FitObject::DataMessage(message) => match self.processor.decode_message(message) {
                    Ok(record) => return Some(record),
                    Err(err) => {
                        self.fail(err);
                        return None;
                    }
                },
                // end of one FIT file; chained files start from fresh definitions
                FitObject::Crc(_) => self.processor.reset(),
                FitObject::Header(_) | FitObject::DefinitionMessage(_) => {}
            }
        }
        None
    }

    fn convert(&mut self, kind: String, message: &FitDataRecord) -> Record {
        let mut record = Record::new(kind);

        for data_field in message.fields() {
            let Some(field) = Field::from_name(data_field.name()) else {
                trace!("Ignoring unrecognized field '{}'", data_field.name());
                self.stats.unrecognized_fields += 1;
                continue;
            };

            match convert_fit_value(data_field.value().clone()) {
                Converted::Scalar(value) => record.fields.push((field, value)),
                Converted::NonScalar => self.stats.non_scalar_values += 1,
            }
        }

        record
    }
}

impl Iterator for RecordStream {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        loop {
            let message = self.next_message()?;
            self.stats.messages += 1;

            let kind = kind_name(&message);
            if let Some(filter) = &self.kinds {
                if !filter.matches(&kind) {
                    continue;
                }
            }

            self.stats.kept_messages += 1;
            return Some(self.convert(kind, &message));
        }
    }
}

/// Message kind as a snake_case profile name (`FileId` -> `file_id`)
fn kind_name(message: &FitDataRecord) -> String {
    to_snake_case(&format!("{:?}", message.kind()))
}

fn to_snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                snake.push('_');
            }
            snake.push(c.to_ascii_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}
