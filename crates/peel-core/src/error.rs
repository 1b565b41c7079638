//! Error types for decode operations.
//!
//! Only [`Error`] ever reaches a caller of the decoder. [`StrategyError`] is
//! the failure signal a single strategy hands back to the fallback loop.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the decoder and its configuration.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The source could not be buffered in full. No strategy was attempted.
    #[error("Failed to read input: {source}")]
    #[diagnostic(
        code(peel::read),
        help("Check that the input is readable to completion and within the configured size limit")
    )]
    Read {
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Every configured strategy rejected the input.
    #[error("No decoding strategy matched the input (tried: {})", .tried.join(", "))]
    #[diagnostic(
        code(peel::no_matching_strategy),
        help("Append the `identity` strategy to pass unrecognised content through unchanged")
    )]
    NoMatchingStrategy {
        /// Names of the strategies that were attempted, in order.
        tried: Vec<&'static str>,
    },

    /// Invalid decoder configuration.
    #[error("Configuration error: {message}")]
    #[diagnostic(code(peel::config))]
    Config {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Create a read error.
    #[must_use]
    pub fn read(source: std::io::Error) -> Self {
        Self::Read { source }
    }

    /// Create a read error for a source longer than `limit` bytes.
    #[must_use]
    pub fn input_too_large(limit: u64) -> Self {
        Self::Read {
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("input exceeds the {limit} byte limit"),
            ),
        }
    }

    /// Create a no-matching-strategy error.
    #[must_use]
    pub fn no_matching_strategy(tried: Vec<&'static str>) -> Self {
        Self::NoMatchingStrategy { tried }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Why a single strategy rejected its input.
///
/// The decoder logs and discards these; they are never returned from
/// [`crate::Decoder::decode`].
#[derive(Error, Debug)]
pub enum StrategyError {
    /// The input does not start with the gzip magic bytes.
    #[error("input is not gzip compressed")]
    NotGzip,

    /// The tar structure is corrupt before the end-of-archive marker.
    #[error("malformed tar archive: {source}")]
    MalformedArchive {
        /// The parse failure reported by the tar reader.
        #[source]
        source: std::io::Error,
    },

    /// The gzip header was valid but the compressed data is not.
    #[error("failed to inflate gzip stream: {source}")]
    Inflate {
        /// The failure reported by the inflater.
        #[source]
        source: std::io::Error,
    },
}

impl StrategyError {
    /// Create a malformed archive error.
    #[must_use]
    pub fn malformed(source: std::io::Error) -> Self {
        Self::MalformedArchive { source }
    }

    /// Create an inflate error.
    #[must_use]
    pub fn inflate(source: std::io::Error) -> Self {
        Self::Inflate { source }
    }
}
