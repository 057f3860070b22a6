use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for dataset operations
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Error types for corpus parsing, audio loading and frame extraction
#[derive(Error, Debug)]
pub enum DatasetError {
    /// IO error (file operations, disk access)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported audio format
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Invalid audio metadata
    #[error("Invalid audio metadata: {0}")]
    InvalidMetadata(String),

    /// Decoding failed
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// Encoding failed
    #[error("Encode error: {0}")]
    EncodeError(String),

    /// Invalid channel configuration
    #[error("Invalid channel configuration: expected {expected}, got {got}")]
    InvalidChannels {
        /// Expected number of channels
        expected: u32,
        /// Got number of channels
        got: u32,
    },

    /// Invalid sample rate
    #[error("Invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate
        rate: u32,
    },

    /// Alignment file could not be parsed
    #[error("Parse error in {path}:{line}: {message}")]
    ParseError {
        /// File being parsed
        path: PathBuf,
        /// 1-based line of the offending token (0 when unknown)
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Description table read/write failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Speaker directory with no entry in the speaker table
    #[error("Unknown speaker: {0}")]
    UnknownSpeaker(String),

    /// Dialect region code with no entry in the dialect table
    #[error("Unknown dialect region: {0}")]
    UnknownDialect(String),

    /// Interval bounds violate 0 <= t0 <= t1
    #[error("Invalid interval [{t0}, {t1}] in {path}")]
    InvalidInterval {
        /// Audio file the interval refers to
        path: String,
        /// Start time in seconds
        t0: f64,
        /// End time in seconds
        t1: f64,
    },

    /// Row without a class index reached frame extraction
    #[error("Missing class index for phone {0:?}")]
    MissingClassIndex(String),

    /// Frames of differing shape cannot be batched
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<symphonia::core::errors::Error> for DatasetError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        match err {
            symphonia::core::errors::Error::IoError(e) => DatasetError::Io(e),
            symphonia::core::errors::Error::Unsupported(what) => {
                DatasetError::UnsupportedFormat(what.to_string())
            }
            e => DatasetError::DecodeError(e.to_string()),
        }
    }
}

impl From<hound::Error> for DatasetError {
    fn from(err: hound::Error) -> Self {
        match err {
            hound::Error::IoError(e) => DatasetError::Io(e),
            e => DatasetError::EncodeError(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        DatasetError::ConfigError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for DatasetError {
    fn from(err: ndarray::ShapeError) -> Self {
        DatasetError::ShapeMismatch(err.to_string())
    }
}
