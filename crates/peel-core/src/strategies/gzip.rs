//! Gzip-based strategies.
//!
//! Both strategies reject input lacking the gzip magic bytes up front, which
//! is what lets a chain tell compressed input from everything else.

use bytes::Bytes;
use flate2::read::{GzDecoder, MultiGzDecoder};
use std::io::Read;

use super::tar::extract_regular_files;
use crate::error::StrategyError;
use crate::snapshot::SnapshotView;
use crate::strategy::Strategy;

/// Gzip magic: 0x1f 0x8b
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Whether `data` begins with the gzip magic bytes.
#[must_use]
pub fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

fn ensure_gzip(view: &SnapshotView) -> Result<(), StrategyError> {
    if is_gzip(view.remaining()) {
        Ok(())
    } else {
        Err(StrategyError::NotGzip)
    }
}

/// Decodes a gzip-compressed tar archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct GzipTarStrategy;

impl Strategy for GzipTarStrategy {
    fn name(&self) -> &'static str {
        "gzip+tar"
    }

    fn description(&self) -> &'static str {
        "Concatenate regular files from a gzip-compressed tar archive"
    }

    fn decode(&self, view: SnapshotView) -> Result<Bytes, StrategyError> {
        ensure_gzip(&view)?;
        extract_regular_files(GzDecoder::new(view)).map(Bytes::from)
    }
}

/// Inflates a gzip stream without interpreting its contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct GzipStrategy;

impl Strategy for GzipStrategy {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn description(&self) -> &'static str {
        "Inflate a gzip-compressed stream"
    }

    fn decode(&self, view: SnapshotView) -> Result<Bytes, StrategyError> {
        ensure_gzip(&view)?;

        let mut payload = Vec::new();
        MultiGzDecoder::new(view)
            .read_to_end(&mut payload)
            .map_err(StrategyError::inflate)?;

        Ok(Bytes::from(payload))
    }
}
