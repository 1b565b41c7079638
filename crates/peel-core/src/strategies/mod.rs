//! Built-in decoding strategies.
//!
//! Each strategy is a leaf: it either recognises the whole input or fails,
//! leaving the choice of what to try next to the [`crate::Decoder`].

mod gzip;
mod identity;
mod tar;

pub use gzip::{GzipStrategy, GzipTarStrategy, is_gzip};
pub use identity::IdentityStrategy;
pub use tar::TarStrategy;
