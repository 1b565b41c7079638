//! Command execution.

use miette::{IntoDiagnostic, WrapErr};
use peel_core::{Decoded, Decoder, DecoderConfig, StrategyKind};
use std::path::PathBuf;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

/// A parsed command ready to run.
#[derive(Debug)]
pub enum Command {
    Decode(DecodeOptions),
    Strategies,
}

/// Options for `peel decode`.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Input file; stdin when absent.
    pub input: Option<PathBuf>,
    /// Output file; stdout when absent.
    pub output: Option<PathBuf>,
    /// Chain override. Empty means "use the config file or the standard chain".
    pub chain: Vec<StrategyKind>,
    /// Decoder config file (`--config` or `PEEL_CONFIG`).
    pub config: Option<PathBuf>,
    /// Input size limit; overrides the config file when set.
    pub max_input_bytes: Option<u64>,
}

impl DecodeOptions {
    /// Resolve the decoder: `--chain` beats the config file, which beats the standard chain.
    pub fn decoder(&self) -> peel_core::Result<Decoder> {
        let mut config = match &self.config {
            Some(path) => DecoderConfig::load(path)?,
            None => DecoderConfig::default(),
        };

        if !self.chain.is_empty() {
            config.chain.clone_from(&self.chain);
        }
        if self.max_input_bytes.is_some() {
            config.max_input_bytes = self.max_input_bytes;
        }

        config.build()
    }
}

pub async fn execute(command: Command) -> miette::Result<()> {
    match command {
        Command::Decode(options) => {
            let decoded = decode(&options).await?;
            match &options.output {
                Some(path) => tokio::fs::write(path, &decoded.payload)
                    .await
                    .into_diagnostic()
                    .wrap_err_with(|| format!("Failed to write {}", path.display())),
                None => write_payload(&mut tokio::io::stdout(), &decoded).await,
            }
        }
        Command::Strategies => write_strategies(&mut tokio::io::stdout()).await,
    }
}

/// Run the configured chain over the input named by `options`.
pub async fn decode(options: &DecodeOptions) -> miette::Result<Decoded> {
    let decoder = options.decoder()?;
    debug!(strategies = ?decoder.names(), "Decoder configured");

    let decoded = match &options.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .map_err(peel_core::Error::read)
                .wrap_err_with(|| format!("Failed to open {}", path.display()))?;
            decoder.decode_async(file).await?
        }
        None => decoder.decode_async(tokio::io::stdin()).await?,
    };

    info!(
        strategy = decoded.strategy,
        bytes = decoded.payload.len(),
        "Decoded input"
    );
    Ok(decoded)
}

async fn write_payload<W: AsyncWrite + Unpin>(out: &mut W, decoded: &Decoded) -> miette::Result<()> {
    out.write_all(&decoded.payload).await.into_diagnostic()?;
    out.flush().await.into_diagnostic()
}

async fn write_strategies<W: AsyncWrite + Unpin>(out: &mut W) -> miette::Result<()> {
    let mut listing = String::new();
    for kind in StrategyKind::ALL {
        let strategy = kind.into_strategy();
        listing.push_str(&format!("{:<10} {}\n", strategy.name(), strategy.description()));
    }
    out.write_all(listing.as_bytes()).await.into_diagnostic()?;
    out.flush().await.into_diagnostic()
}

#[cfg(test)]
mod tests {
    use super::*;
    use peel_core::test_utils::{gzip, tar_of};
    use tempfile::TempDir;

    fn gzip_tar(files: &[(&str, &[u8])]) -> Vec<u8> {
        gzip(&tar_of(files))
    }

    #[tokio::test]
    async fn test_decode_file_with_standard_chain() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("layer.tar.gz");
        std::fs::write(&input, gzip_tar(&[("a.txt", b"hello"), ("b.txt", b"world")])).unwrap();

        let options = DecodeOptions {
            input: Some(input),
            ..Default::default()
        };
        let decoded = decode(&options).await.unwrap();

        assert_eq!(&decoded.payload[..], b"helloworld");
        assert_eq!(decoded.strategy, "gzip+tar");
    }

    #[tokio::test]
    async fn test_chain_override_without_identity() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("notes.txt");
        std::fs::write(&input, b"not an archive").unwrap();

        let options = DecodeOptions {
            input: Some(input),
            chain: vec![StrategyKind::Tar, StrategyKind::GzipTar, StrategyKind::Gzip],
            ..Default::default()
        };
        let err = decode(&options).await.unwrap_err();

        assert!(err.to_string().contains("No decoding strategy matched"));
    }

    #[tokio::test]
    async fn test_config_file_and_overrides() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("peel.toml");
        std::fs::write(&config, "chain = [\"identity\"]\nmax_input_bytes = 2\n").unwrap();

        let options = DecodeOptions {
            config: Some(config.clone()),
            ..Default::default()
        };
        let decoder = options.decoder().unwrap();
        assert_eq!(decoder.names(), vec!["identity"]);
        assert_eq!(decoder.max_input_bytes(), Some(2));

        let options = DecodeOptions {
            config: Some(config),
            chain: vec![StrategyKind::Tar],
            max_input_bytes: Some(64),
            ..Default::default()
        };
        let decoder = options.decoder().unwrap();
        assert_eq!(decoder.names(), vec!["tar"]);
        assert_eq!(decoder.max_input_bytes(), Some(64));
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let options = DecodeOptions {
            input: Some(PathBuf::from("/nonexistent/input.tgz")),
            ..Default::default()
        };
        let err = decode(&options).await.unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }

    #[tokio::test]
    async fn test_write_strategies_lists_all() {
        let mut out = Vec::new();
        write_strategies(&mut out).await.unwrap();
        let listing = String::from_utf8(out).unwrap();

        let names: Vec<_> = listing
            .lines()
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        assert_eq!(names, vec!["gzip+tar", "tar", "gzip", "identity"]);
    }

    #[tokio::test]
    async fn test_write_payload() {
        let decoded = Decoded {
            payload: "payload".into(),
            strategy: "identity",
        };
        let mut out = Vec::new();
        write_payload(&mut out, &decoded).await.unwrap();
        assert_eq!(out, b"payload");
    }
}
