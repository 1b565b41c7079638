//! Passthrough strategy.

use bytes::Bytes;

use crate::error::StrategyError;
use crate::snapshot::SnapshotView;
use crate::strategy::Strategy;

/// Returns the input unchanged.
///
/// Accepts everything, so it only makes sense as the last entry of a chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityStrategy;

impl Strategy for IdentityStrategy {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn description(&self) -> &'static str {
        "Pass the input through unchanged"
    }

    fn decode(&self, view: SnapshotView) -> Result<Bytes, StrategyError> {
        Ok(view.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;
    use crate::test_utils::{gzip, tar_of};

    #[test]
    fn test_returns_input_unchanged() {
        for input in [
            b"not an archive".to_vec(),
            Vec::new(),
            gzip(b"compressed"),
            tar_of(&[("a.txt", b"hello")]),
        ] {
            let payload = IdentityStrategy
                .decode(Snapshot::from(input.clone()).view())
                .unwrap();
            assert_eq!(payload, input);
        }
    }
}
