//! Error types for BedWig
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

/// Main error type for conversion operations
///
/// Every failure is fatal: the conversion aborts before the output file is
/// created, so no partial output can corrupt downstream coordinates.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// First line matches neither known track type marker
    #[error("unrecognized input format: first line contains neither 'bedGraph' nor 'wiggle_0'")]
    UnrecognizedFormat,

    /// A required declaration field is absent
    #[error("missing required field '{field}' in declaration at line {line}")]
    MissingField { field: &'static str, line: usize },

    /// A line that cannot be decoded in the current stream state
    #[error("malformed stream at line {line}: {message}")]
    MalformedStream { line: usize, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Shorthand for a `MalformedStream` at a 1-based source line
    pub fn malformed(line: usize, message: impl Into<String>) -> Self {
        ConvertError::MalformedStream {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for conversion operations
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;
