//! Error types for twinviz operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in twinviz operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Input that cannot describe a valid request (negative or fractional
    /// limit, zero window width, malformed twin pair).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Too few twin pairs to build a gap sequence.
    #[error("Insufficient data: need at least {required} twin pairs, got {actual}")]
    InsufficientData {
        /// Minimum number of pairs needed.
        required: usize,
        /// Number of pairs supplied.
        actual: usize,
    },

    /// The limit is larger than the primality table can hold.
    #[error("Resource exhausted: limit {limit} exceeds the ceiling of {max}")]
    ResourceExhausted {
        /// Requested limit.
        limit: u64,
        /// Largest accepted limit.
        max: u64,
    },

    /// Generation was cancelled through its cancellation flag.
    #[error("Generation cancelled")]
    Cancelled,

    /// The trial-division and sieve generators disagree.
    #[error("Method mismatch at limit {limit}: basic found {basic} pairs, sieve found {sieve}")]
    MethodMismatch {
        /// Limit both methods ran with.
        limit: u64,
        /// Pairs found by trial division.
        basic: usize,
        /// Pairs found by the sieve.
        sieve: usize,
    },

    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for framebuffer or plot.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Data length mismatch between x and y arrays.
    #[error("Data length mismatch: x has {x_len} elements, y has {y_len} elements")]
    DataLengthMismatch {
        /// Length of x data.
        x_len: usize,
        /// Length of y data.
        y_len: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error (e.g., log of non-positive value).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Configuration file could not be read.
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    /// Configuration file could not be parsed.
    #[error("Config parse error at line {line}: {message}")]
    Config {
        /// Line of the offending YAML (0 when unknown).
        line: usize,
        /// Parser message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = Error::InsufficientData {
            required: 2,
            actual: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("at least 2"));
        assert!(msg.contains("got 1"));
    }

    #[test]
    fn test_resource_exhausted_display() {
        let err = Error::ResourceExhausted {
            limit: 10,
            max: 5,
        };
        assert!(err.to_string().contains("10"));
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn test_io_conversion() {
        let io = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
