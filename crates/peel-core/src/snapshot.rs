//! Immutable in-memory copy of a decode source.
//!
//! The source is read once into a [`Snapshot`]; every strategy attempt then
//! gets its own [`SnapshotView`] positioned at the start, so a strategy that
//! consumed half the input before failing leaves nothing behind for the next.

use bytes::Bytes;
use std::io::{self, BufRead, Cursor, Read};

/// The full byte content of a source, shared between attempts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    bytes: Bytes,
}

impl Snapshot {
    /// Wrap already-buffered bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// A fresh read cursor at offset 0.
    #[must_use]
    pub fn view(&self) -> SnapshotView {
        SnapshotView {
            cursor: Cursor::new(self.bytes.clone()),
        }
    }

    /// Number of buffered bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the source was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The buffered bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for Snapshot {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<Bytes> for Snapshot {
    fn from(bytes: Bytes) -> Self {
        Self::new(bytes)
    }
}

impl From<&'static [u8]> for Snapshot {
    fn from(bytes: &'static [u8]) -> Self {
        Self::new(Bytes::from_static(bytes))
    }
}

/// An independent reader over a [`Snapshot`].
#[derive(Debug, Clone)]
pub struct SnapshotView {
    cursor: Cursor<Bytes>,
}

impl SnapshotView {
    /// The bytes not yet consumed through this view.
    #[must_use]
    pub fn remaining(&self) -> &[u8] {
        let data = self.cursor.get_ref();
        let pos = usize::try_from(self.cursor.position())
            .unwrap_or(data.len())
            .min(data.len());
        &data[pos..]
    }

    /// Current read offset.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// The whole snapshot, regardless of how much was read.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.cursor.into_inner()
    }
}

impl Read for SnapshotView {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl BufRead for SnapshotView {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt);
    }
}
