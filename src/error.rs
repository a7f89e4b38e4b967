use std::io;
use std::path::{Path, PathBuf};

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Result type alias used throughout the benchmark harness.
pub type Result<T> = std::result::Result<T, BenchError>;

/// Fatal conditions that abort a sweep.
///
/// None of these are retried: each one means the run cannot produce a
/// trustworthy record for the current parameter point.
#[derive(Debug, Error)]
pub enum BenchError {
    /// Building a synthetic column or assembling the table failed.
    #[error("failed to build synthetic column {column}: {source}")]
    Allocation {
        /// Column being built, or the column count when assembling the table failed.
        column: usize,
        /// Underlying arrow error.
        source: ArrowError,
    },
    /// Opening or creating a file failed.
    #[error("failed to open {path}: {source}")]
    Io {
        /// File that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Writing the table into the on-disk format failed.
    #[error("failed to encode table into {path}: {source}")]
    Encode {
        /// Artifact path being written.
        path: PathBuf,
        /// Underlying parquet error.
        source: ParquetError,
    },
    /// Materializing a table from the on-disk artifact failed.
    #[error("failed to decode {path}: {failure}")]
    Decode {
        /// Artifact path being read.
        path: PathBuf,
        /// What went wrong while decoding.
        failure: DecodeFailure,
    },
    /// Writing, flushing or parsing a results file failed.
    #[error("results file error: {0}")]
    Sink(#[from] csv::Error),
    /// A parameter or configuration value is outside its valid domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// The sweep configuration file could not be loaded.
    #[error("failed to load config {path}: {message}")]
    Config {
        /// Configuration file path.
        path: PathBuf,
        /// Reader or parser message.
        message: String,
    },
}

/// Reasons a read could not materialize a table.
#[derive(Debug, Error)]
pub enum DecodeFailure {
    /// The parquet reader rejected the file.
    #[error(transparent)]
    Parquet(#[from] ParquetError),
    /// Assembling record batches failed.
    #[error(transparent)]
    Arrow(#[from] ArrowError),
    /// A projection index does not name a column of the file.
    #[error("column index {index} out of range for {columns} columns")]
    ColumnOutOfRange {
        /// Requested column index.
        index: usize,
        /// Number of columns in the file.
        columns: usize,
    },
}

/// Coarse classification of [`BenchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`BenchError::Allocation`].
    Allocation,
    /// See [`BenchError::Io`].
    Io,
    /// See [`BenchError::Encode`].
    Encode,
    /// See [`BenchError::Decode`].
    Decode,
    /// See [`BenchError::Sink`].
    Sink,
    /// See [`BenchError::InvalidParameter`].
    InvalidParameter,
    /// See [`BenchError::Config`].
    Config,
}

impl BenchError {
    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BenchError::Allocation { .. } => ErrorKind::Allocation,
            BenchError::Io { .. } => ErrorKind::Io,
            BenchError::Encode { .. } => ErrorKind::Encode,
            BenchError::Decode { .. } => ErrorKind::Decode,
            BenchError::Sink(_) => ErrorKind::Sink,
            BenchError::InvalidParameter(_) => ErrorKind::InvalidParameter,
            BenchError::Config { .. } => ErrorKind::Config,
        }
    }

    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        BenchError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn encode(path: impl AsRef<Path>, source: ParquetError) -> Self {
        BenchError::Encode {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn decode(path: impl AsRef<Path>, failure: impl Into<DecodeFailure>) -> Self {
        BenchError::Decode {
            path: path.as_ref().to_path_buf(),
            failure: failure.into(),
        }
    }
}
