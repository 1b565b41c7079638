//! Ordered fallback decoding for opaque byte streams.
//!
//! This crate provides functionality to:
//! - Buffer a source once and try several decodings against it
//! - Extract the regular files of plain or gzip-compressed tar archives
//! - Inflate gzip streams, or pass unrecognised bytes through unchanged
//!
//! # Example
//!
//! ```
//! use peel_core::{Decoder, Error, StrategyKind};
//!
//! let decoder = Decoder::standard();
//! let payload = decoder.decode(&b"not an archive"[..])?;
//! assert_eq!(&payload[..], b"not an archive");
//!
//! let strict = Decoder::from_kinds([StrategyKind::Tar, StrategyKind::GzipTar]);
//! assert!(matches!(
//!     strict.decode(&b"not an archive"[..]),
//!     Err(Error::NoMatchingStrategy { .. })
//! ));
//! # Ok::<(), Error>(())
//! ```

#![warn(missing_docs)]

mod config;
mod decoder;
mod error;
mod snapshot;
pub mod strategies;
mod strategy;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::DecoderConfig;
pub use decoder::{Decoded, Decoder};
pub use error::{Error, Result, StrategyError};
pub use snapshot::{Snapshot, SnapshotView};
pub use strategy::{Strategy, StrategyKind};
