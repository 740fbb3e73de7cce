use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Errors produced while summarizing a FIT file
#[derive(Debug, thiserror::Error)]
pub enum FitError {
    /// Input path does not exist or is not a regular file
    #[error("FIT file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The decoder rejected the binary stream
    #[error("Failed to decode FIT data: {0}")]
    Decode(String),

    /// Rounding timestamps into buckets or regrouping them failed
    #[error("Error processing timestamps: {0}")]
    Resample(String),

    /// Decoding worked but no complete row survived grouping
    #[error("No valid data found")]
    EmptyResult,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer errors
    #[cfg(feature = "csv")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl FitError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FitError::NotFound(_) => FailureKind::NotFound,
            FitError::Decode(_) => FailureKind::Decode,
            FitError::Resample(_) => FailureKind::Resample,
            FitError::EmptyResult => FailureKind::EmptyResult,
            FitError::Io(_) => FailureKind::Io,
            #[cfg(feature = "csv")]
            FitError::Csv(_) => FailureKind::Io,
        }
    }
}

/// Coarse failure category recorded in batch reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "snake_case"))]
pub enum FailureKind {
    NotFound,
    Decode,
    Resample,
    EmptyResult,
    Io,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureKind::NotFound => "not found",
            FailureKind::Decode => "decode",
            FailureKind::Resample => "resample",
            FailureKind::EmptyResult => "empty result",
            FailureKind::Io => "i/o",
        };
        f.write_str(name)
    }
}

pub type Result<T> = std::result::Result<T, FitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            FitError::NotFound(PathBuf::from("a.fit")).kind(),
            FailureKind::NotFound
        );
        assert_eq!(FitError::Decode("bad".into()).kind(), FailureKind::Decode);
        assert_eq!(
            FitError::Resample("overflow".into()).kind(),
            FailureKind::Resample
        );
        assert_eq!(FitError::EmptyResult.kind(), FailureKind::EmptyResult);
    }

    #[test]
    fn test_error_messages_name_the_file() {
        let err = FitError::NotFound(PathBuf::from("rides/morning.fit"));
        assert!(err.to_string().contains("rides/morning.fit"));
        assert_eq!(FailureKind::EmptyResult.to_string(), "empty result");
    }
}
