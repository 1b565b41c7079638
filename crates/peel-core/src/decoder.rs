//! Ordered fallback decoding.
//!
//! A [`Decoder`] buffers its source once, then offers a fresh view of the
//! buffered bytes to each configured strategy in turn. The first strategy
//! that succeeds wins. Failures are logged and otherwise discarded.

use bytes::Bytes;
use std::io::Read;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::snapshot::Snapshot;
use crate::strategy::{Strategy, StrategyKind};
use crate::{Error, Result};

/// Output of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded payload.
    pub payload: Bytes,
    /// Name of the strategy that produced it.
    pub strategy: &'static str,
}

/// Tries an ordered list of strategies against a buffered input.
///
/// Strategies are attempted in registration order and nothing reorders them
/// afterwards, so callers must register the most specific formats first. A
/// passthrough such as `identity` placed early wins against everything.
///
/// The decoder holds no mutable state; one instance can serve concurrent
/// decode calls.
#[derive(Clone, Default)]
pub struct Decoder {
    strategies: Vec<Arc<dyn Strategy>>,
    max_input_bytes: Option<u64>,
}

impl Decoder {
    /// Create a decoder with no strategies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard chain: `gzip+tar`, `tar`, `gzip`, `identity`.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_kinds(StrategyKind::ALL)
    }

    /// Create a decoder from built-in strategy kinds, keeping their order.
    #[must_use]
    pub fn from_kinds(kinds: impl IntoIterator<Item = StrategyKind>) -> Self {
        let mut decoder = Self::new();
        for kind in kinds {
            decoder.register_arc(kind.into_strategy());
        }
        decoder
    }

    /// Append a strategy to the chain.
    #[must_use]
    pub fn with_strategy<S: Strategy + 'static>(mut self, strategy: S) -> Self {
        self.register(strategy);
        self
    }

    /// Append a strategy to the chain.
    pub fn register<S: Strategy + 'static>(&mut self, strategy: S) {
        self.strategies.push(Arc::new(strategy));
    }

    /// Append a shared strategy to the chain.
    pub fn register_arc(&mut self, strategy: Arc<dyn Strategy>) {
        self.strategies.push(strategy);
    }

    /// Reject sources longer than `limit` bytes with a read error.
    #[must_use]
    pub fn with_max_input_bytes(mut self, limit: Option<u64>) -> Self {
        self.max_input_bytes = limit;
        self
    }

    /// The configured input size limit, if any.
    #[must_use]
    pub fn max_input_bytes(&self) -> Option<u64> {
        self.max_input_bytes
    }

    /// Strategy names in the order they are tried.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Number of configured strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether no strategy is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Decode `source`, returning only the payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] if the source cannot be read in full, or
    /// [`Error::NoMatchingStrategy`] if every strategy rejects it.
    pub fn decode<R: Read>(&self, source: R) -> Result<Bytes> {
        self.decode_detailed(source).map(|decoded| decoded.payload)
    }

    /// Decode `source`, reporting which strategy matched.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode`].
    pub fn decode_detailed<R: Read>(&self, source: R) -> Result<Decoded> {
        let snapshot = self.snapshot(source)?;
        self.decode_snapshot(&snapshot)
    }

    /// Decode an async source. The source is buffered in full first.
    ///
    /// # Errors
    ///
    /// See [`Decoder::decode`].
    pub async fn decode_async<R: AsyncRead + Unpin>(&self, mut source: R) -> Result<Decoded> {
        let mut buf = Vec::new();
        match self.max_input_bytes {
            Some(limit) => {
                (&mut source)
                    .take(limit.saturating_add(1))
                    .read_to_end(&mut buf)
                    .await
                    .map_err(Error::read)?;
                check_limit(buf.len(), limit)?;
            }
            None => {
                source.read_to_end(&mut buf).await.map_err(Error::read)?;
            }
        }

        self.decode_snapshot(&Snapshot::from(buf))
    }

    /// Read `source` to completion into a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Read`] on I/O failure or when the input size limit is
    /// exceeded.
    pub fn snapshot<R: Read>(&self, mut source: R) -> Result<Snapshot> {
        let mut buf = Vec::new();
        match self.max_input_bytes {
            Some(limit) => {
                source
                    .by_ref()
                    .take(limit.saturating_add(1))
                    .read_to_end(&mut buf)
                    .map_err(Error::read)?;
                check_limit(buf.len(), limit)?;
            }
            None => {
                source.read_to_end(&mut buf).map_err(Error::read)?;
            }
        }

        Ok(Snapshot::from(buf))
    }

    /// Run the chain over bytes that are already buffered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMatchingStrategy`] if every strategy rejects the
    /// input.
    pub fn decode_snapshot(&self, snapshot: &Snapshot) -> Result<Decoded> {
        let mut tried = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            let name = strategy.name();
            debug!(strategy = name, input_len = snapshot.len(), "Trying decoding strategy");
            tried.push(name);

            match strategy.decode(snapshot.view()) {
                Ok(payload) => {
                    debug!(
                        strategy = name,
                        payload_len = payload.len(),
                        "Decoding strategy matched"
                    );
                    return Ok(Decoded {
                        payload,
                        strategy: name,
                    });
                }
                Err(e) => {
                    trace!(strategy = name, error = %e, "Decoding strategy did not match");
                }
            }
        }

        debug!(?tried, "No decoding strategy matched");
        Err(Error::no_matching_strategy(tried))
    }
}

fn check_limit(len: usize, limit: u64) -> Result<()> {
    if len as u64 > limit {
        return Err(Error::input_too_large(limit));
    }
    Ok(())
}

impl std::fmt::Debug for Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder")
            .field("strategies", &self.names())
            .field("max_input_bytes", &self.max_input_bytes)
            .finish()
    }
}
