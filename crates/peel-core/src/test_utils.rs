//! Shared test utilities for peel tests.
//!
//! Builds tar and gzip fixtures in memory. Available to other crates through
//! the `test-utils` feature.

#![allow(clippy::unwrap_used)]

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;
use tar::{Builder, EntryType, Header};

/// Create an uncompressed tar archive of regular files, in order.
pub fn tar_of(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = Builder::new(Vec::new());

    for (path, content) in files {
        let mut header = Header::new_gnu();
        header.set_path(path).unwrap();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append(&header, &content[..]).unwrap();
    }

    builder.into_inner().unwrap()
}

/// Create a tar archive mixing a directory, a symlink and regular files.
pub fn tar_with_non_files() -> Vec<u8> {
    let mut builder = Builder::new(Vec::new());

    let mut dir = Header::new_gnu();
    dir.set_path("docs/").unwrap();
    dir.set_entry_type(EntryType::Directory);
    dir.set_size(0);
    dir.set_mode(0o755);
    dir.set_cksum();
    builder.append(&dir, std::io::empty()).unwrap();

    let mut file = Header::new_gnu();
    file.set_path("docs/a.txt").unwrap();
    file.set_size(5);
    file.set_mode(0o644);
    file.set_cksum();
    builder.append(&file, &b"hello"[..]).unwrap();

    let mut link = Header::new_gnu();
    link.set_path("docs/latest").unwrap();
    link.set_link_name("a.txt").unwrap();
    link.set_entry_type(EntryType::Symlink);
    link.set_size(0);
    link.set_cksum();
    builder.append(&link, std::io::empty()).unwrap();

    let mut file = Header::new_gnu();
    file.set_path("docs/b.txt").unwrap();
    file.set_size(5);
    file.set_mode(0o644);
    file.set_cksum();
    builder.append(&file, &b"world"[..]).unwrap();

    builder.into_inner().unwrap()
}

/// Gzip-compress `data` as a single member.
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}
