//! Error types for scram-profile.
//!
//! Every fallible operation in the library returns [`ScramError`]. I/O and
//! decompression failures abort the whole load; numeric and configuration
//! problems are surfaced as their own variants rather than as `NaN` counts.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading read or reference files.
#[derive(Debug, Error)]
pub enum ScramError {
    /// Read file could not be opened.
    #[error("can't load read file '{path}': {source}")]
    ReadFile {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// Gzip stream could not be decoded.
    #[error("can't decompress read file '{path}': {source}")]
    Decompress {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// I/O failure while streaming lines from an uncompressed file.
    #[error("failed reading lines from '{path}': {source}")]
    LineRead {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// RPMR normalization was requested for a file with no retained reads.
    #[error("can't normalize '{path}': no reads retained after filtering")]
    ZeroTotalNormalization { path: PathBuf },

    /// Minimum read length exceeds the maximum.
    #[error("invalid read length bounds: minimum {min} is greater than maximum {max}")]
    InvalidLengthBounds { min: usize, max: usize },

    /// Minimum count is negative or not a finite number.
    #[error("invalid minimum count {value}: must be a finite, non-negative number")]
    InvalidMinCount { value: f64 },

    /// A per-file worker thread could not be started.
    #[error("can't start worker for '{path}': {source}")]
    WorkerSpawn {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// A per-file worker thread panicked before publishing its result.
    #[error("worker loading '{path}' panicked")]
    WorkerPanicked { path: PathBuf },

    /// The aggregator received a result for a column it does not have.
    #[error("unexpected result for '{path}': all {columns} columns are already filled")]
    UnexpectedResult { path: PathBuf, columns: usize },

    /// The run summary could not be serialized.
    #[error("can't serialize summary: {source}")]
    Summary {
        #[from]
        source: serde_json::Error,
    },

    /// Reference FASTA could not be opened or read.
    #[error("problem opening fasta reference file '{path}': {source}")]
    ReferenceRead {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
}

impl ScramError {
    /// Returns the file the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::ReadFile { path, .. }
            | Self::Decompress { path, .. }
            | Self::LineRead { path, .. }
            | Self::ZeroTotalNormalization { path }
            | Self::WorkerSpawn { path, .. }
            | Self::WorkerPanicked { path }
            | Self::UnexpectedResult { path, .. }
            | Self::ReferenceRead { path, .. } => Some(path),
            Self::InvalidLengthBounds { .. }
            | Self::InvalidMinCount { .. }
            | Self::Summary { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn zero_total_display() {
        let err = ScramError::ZeroTotalNormalization {
            path: PathBuf::from("rep1.fq"),
        };
        insta::assert_snapshot!(err.to_string(), @"can't normalize 'rep1.fq': no reads retained after filtering");
    }

    #[test]
    fn length_bounds_display() {
        let err = ScramError::InvalidLengthBounds { min: 30, max: 18 };
        insta::assert_snapshot!(err.to_string(), @"invalid read length bounds: minimum 30 is greater than maximum 18");
    }

    #[test]
    fn read_file_keeps_source() {
        let err = ScramError::ReadFile {
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
            path: PathBuf::from("gone.fa"),
        };
        assert_eq!(err.to_string(), "can't load read file 'gone.fa': missing");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn path_accessor() {
        let err = ScramError::WorkerPanicked {
            path: PathBuf::from("a.fa"),
        };
        assert_eq!(err.path(), Some(std::path::Path::new("a.fa")));
        assert!(ScramError::InvalidMinCount { value: -1.0 }.path().is_none());
    }

    #[test]
    fn json_errors_convert_to_summary() {
        let json_err = serde_json::from_str::<u8>("not json").unwrap_err();
        let err = ScramError::from(json_err);
        assert!(matches!(err, ScramError::Summary { .. }));
        assert!(err.to_string().starts_with("can't serialize summary: "));
        assert!(err.path().is_none());
    }
}
