//! Decoder configuration.
//!
//! Configuration is a small TOML document naming the strategy chain:
//!
//! ```toml
//! chain = ["gzip+tar", "tar", "gzip", "identity"]
//! max_input_bytes = 67108864
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::decoder::Decoder;
use crate::strategy::StrategyKind;
use crate::{Error, Result};

/// Strategy chain and limits for a [`Decoder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Strategies in the order they are tried.
    pub chain: Vec<StrategyKind>,
    /// Reject inputs longer than this many bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_input_bytes: Option<u64>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            chain: StrategyKind::ALL.to_vec(),
            max_input_bytes: None,
        }
    }
}

impl DecoderConfig {
    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for invalid TOML or unknown strategy names.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::config(format!("invalid configuration: {e}")))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(?path, "Loading decoder configuration");
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the chain, warning about orderings that weaken discrimination.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the chain is empty.
    pub fn validate(&self) -> Result<()> {
        if self.chain.is_empty() {
            return Err(Error::config("strategy chain is empty"));
        }

        if let Some(pos) = self.chain.iter().position(|k| *k == StrategyKind::Identity) {
            if pos + 1 != self.chain.len() {
                warn!(
                    shadowed = ?&self.chain[pos + 1..],
                    "identity strategy is not last; later strategies will never run"
                );
            }
        }

        for (i, kind) in self.chain.iter().enumerate() {
            if self.chain[..i].contains(kind) {
                warn!(strategy = %kind, "Strategy listed more than once");
            }
        }

        Ok(())
    }

    /// Validate and build a decoder.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if validation fails.
    pub fn build(&self) -> Result<Decoder> {
        self.validate()?;
        Ok(Decoder::from_kinds(self.chain.iter().copied())
            .with_max_input_bytes(self.max_input_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_standard_chain() {
        let decoder = DecoderConfig::default().build().unwrap();
        assert_eq!(decoder.names(), Decoder::standard().names());
        assert_eq!(decoder.max_input_bytes(), None);
    }

    #[test]
    fn test_parse_toml() {
        let config = DecoderConfig::from_toml_str(
            r#"
            chain = ["tar", "tgz", "identity"]
            max_input_bytes = 1024
            "#,
        )
        .unwrap();

        assert_eq!(
            config.chain,
            vec![
                StrategyKind::Tar,
                StrategyKind::GzipTar,
                StrategyKind::Identity
            ]
        );
        assert_eq!(config.max_input_bytes, Some(1024));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = DecoderConfig::from_toml_str("").unwrap();
        assert_eq!(config, DecoderConfig::default());
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = DecoderConfig::from_toml_str(r#"chain = ["tar", "zstd"]"#).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("zstd"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = DecoderConfig::from_toml_str("strategies = []").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_empty_chain_rejected() {
        let config = DecoderConfig {
            chain: Vec::new(),
            max_input_bytes: None,
        };
        assert!(matches!(config.build(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_identity_first_is_allowed() {
        let config = DecoderConfig {
            chain: vec![StrategyKind::Identity, StrategyKind::Tar],
            max_input_bytes: None,
        };
        let decoder = config.build().unwrap();
        assert_eq!(decoder.names(), vec!["identity", "tar"]);
    }

    #[test]
    fn test_serialize_round_trip_names() {
        let text = toml::to_string(&DecoderConfig::default()).unwrap();
        assert!(text.contains(r#""gzip+tar""#));
        assert_eq!(
            DecoderConfig::from_toml_str(&text).unwrap(),
            DecoderConfig::default()
        );
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = NamedTempFile::new().map_err(Error::read)?;
        writeln!(file, r#"chain = ["gzip", "identity"]"#).map_err(Error::read)?;

        let config = DecoderConfig::load(file.path())?;
        assert_eq!(
            config.chain,
            vec![StrategyKind::Gzip, StrategyKind::Identity]
        );
        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let err = DecoderConfig::load(Path::new("/nonexistent/peel.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
