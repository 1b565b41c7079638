//! The decoding strategy capability and the built-in strategy kinds.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::StrategyError;
use crate::snapshot::SnapshotView;
use crate::strategies::{GzipStrategy, GzipTarStrategy, IdentityStrategy, TarStrategy};
use crate::{Error, Result};

/// A stateless way of turning a buffered input into its payload.
///
/// Implementations are constructed once and shared across decode calls,
/// possibly from several threads at a time.
pub trait Strategy: Send + Sync {
    /// Strategy name (e.g., "tar", "gzip").
    ///
    /// Used in logs and in [`Error::NoMatchingStrategy`].
    fn name(&self) -> &'static str;

    /// Human-readable description for help text.
    fn description(&self) -> &'static str;

    /// Decode the input behind `view`, or explain why it does not apply.
    ///
    /// `view` is positioned at the start of the input and is not shared with
    /// any other attempt.
    ///
    /// # Errors
    ///
    /// Returns a [`StrategyError`] when the input is not in this strategy's
    /// format.
    fn decode(&self, view: SnapshotView) -> std::result::Result<Bytes, StrategyError>;
}

/// The built-in strategies, selectable by name from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum StrategyKind {
    /// Uncompressed tar archive.
    Tar,
    /// Gzip-compressed tar archive.
    GzipTar,
    /// Gzip-compressed single stream.
    Gzip,
    /// Raw bytes, passed through unchanged.
    Identity,
}

impl StrategyKind {
    /// All built-ins, most specific first.
    pub const ALL: [Self; 4] = [Self::GzipTar, Self::Tar, Self::Gzip, Self::Identity];

    /// Canonical configuration name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tar => "tar",
            Self::GzipTar => "gzip+tar",
            Self::Gzip => "gzip",
            Self::Identity => "identity",
        }
    }

    /// Instantiate the strategy.
    #[must_use]
    pub fn into_strategy(self) -> Arc<dyn Strategy> {
        match self {
            Self::Tar => Arc::new(TarStrategy),
            Self::GzipTar => Arc::new(GzipTarStrategy),
            Self::Gzip => Arc::new(GzipStrategy),
            Self::Identity => Arc::new(IdentityStrategy),
        }
    }

    /// Parse a comma-separated chain such as `"gzip+tar,tar,identity"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for unknown or empty entries.
    pub fn parse_chain(chain: &str) -> Result<Vec<Self>> {
        chain.split(',').map(|name| name.trim().parse()).collect()
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tar" => Ok(Self::Tar),
            "gzip+tar" | "tar+gzip" | "tgz" | "tar.gz" => Ok(Self::GzipTar),
            "gzip" | "gz" => Ok(Self::Gzip),
            "identity" | "raw" | "passthrough" => Ok(Self::Identity),
            "" => Err(Error::config("empty strategy name")),
            other => Err(Error::config(format!("unknown strategy '{other}'"))),
        }
    }
}

impl TryFrom<String> for StrategyKind {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<StrategyKind> for &'static str {
    fn from(kind: StrategyKind) -> Self {
        kind.name()
    }
}
