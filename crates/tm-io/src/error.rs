//! Error types for tm-io.

use thiserror::Error;

/// Errors that can occur when reading or writing trajectory tables.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: invalid RFC 3339 timestamp {value:?}: {source}")]
    Timestamp {
        line:   u64,
        value:  String,
        source: chrono::ParseError,
    },

    #[error("line {line}: invalid GeoJSON geometry {value:?}: {reason}")]
    Geometry {
        line:   u64,
        value:  String,
        reason: String,
    },
}

/// Alias for `Result<T, IoError>`.
pub type IoResult<T> = Result<T, IoError>;
