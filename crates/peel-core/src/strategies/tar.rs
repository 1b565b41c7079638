//! Regular-file extraction from tar archives.

use bytes::Bytes;
use std::io::Read;
use tar::Archive;
use tracing::trace;

use crate::error::StrategyError;
use crate::snapshot::SnapshotView;
use crate::strategy::Strategy;

/// Concatenate the contents of every regular file in a tar stream.
///
/// Entries are visited in archive order. Directories, links and other
/// non-regular entries contribute nothing. Parsing stops at the
/// end-of-archive marker (or at end of input on a block boundary).
pub(crate) fn extract_regular_files<R: Read>(reader: R) -> Result<Vec<u8>, StrategyError> {
    let mut archive = Archive::new(reader);
    let mut payload = Vec::new();

    for entry in archive.entries().map_err(StrategyError::malformed)? {
        let mut entry = entry.map_err(StrategyError::malformed)?;
        let entry_type = entry.header().entry_type();

        if !entry_type.is_file() {
            trace!(
                path = %entry.path_bytes().escape_ascii(),
                ?entry_type,
                "Skipping non-regular tar entry"
            );
            continue;
        }

        let size = entry.size();
        trace!(
            path = %entry.path_bytes().escape_ascii(),
            size,
            "Appending tar entry"
        );
        entry
            .read_to_end(&mut payload)
            .map_err(StrategyError::malformed)?;
    }

    Ok(payload)
}

/// Decodes an uncompressed tar archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct TarStrategy;

impl Strategy for TarStrategy {
    fn name(&self) -> &'static str {
        "tar"
    }

    fn description(&self) -> &'static str {
        "Concatenate regular files from an uncompressed tar archive"
    }

    fn decode(&self, view: SnapshotView) -> Result<Bytes, StrategyError> {
        extract_regular_files(view).map(Bytes::from)
    }
}
