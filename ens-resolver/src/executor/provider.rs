//! `eth_call` through an [`alloy`] provider.

use std::fmt;
use std::sync::Arc;

use alloy::network::{Ethereum, TransactionBuilder};
use alloy::primitives::hex;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tracing::info;

use super::{CallExecutor, CallRequest};
use crate::error::{Error, Result, TransportError};

/// Adapter exposing an alloy [`DynProvider`] as a [`CallExecutor`].
///
/// Useful when the wallet already holds a provider with its own transport
/// layers (fallback, retry, auth); the resolver reuses it as-is.
#[derive(Clone)]
pub struct ProviderExecutor {
    provider: Arc<DynProvider<Ethereum>>,
}

impl fmt::Debug for ProviderExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderExecutor").finish_non_exhaustive()
    }
}

impl ProviderExecutor {
    /// Wrap an existing provider.
    #[must_use]
    pub fn new(provider: DynProvider<Ethereum>) -> Self {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Connect a new provider to `rpc_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the connection cannot be established.
    pub async fn connect(rpc_url: &str) -> Result<Self> {
        let provider: DynProvider<Ethereum> = ProviderBuilder::new()
            .connect(rpc_url)
            .await
            .map_err(|e| Error::config(format!("RPC connection to '{rpc_url}' failed: {e}")))?
            .erased();

        info!(rpc_url, "ENS provider connected");
        Ok(Self::new(provider))
    }

    /// Reference to the underlying provider.
    #[must_use]
    pub fn provider(&self) -> &DynProvider<Ethereum> {
        &self.provider
    }
}

#[async_trait]
impl CallExecutor for ProviderExecutor {
    async fn call(&self, request: &CallRequest) -> std::result::Result<String, TransportError> {
        let tx = TransactionRequest::default()
            .with_to(request.to)
            .with_input(request.data.clone());
        let output = self
            .provider
            .call(tx)
            .await
            .map_err(|e| TransportError::provider(format!("eth_call failed: {e}")))?;
        Ok(hex::encode_prefixed(&output))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use alloy::primitives::{Address, Bytes};
    use alloy::transports::mock::Asserter;

    use super::*;

    fn mocked(asserter: Asserter) -> ProviderExecutor {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter)
            .erased();
        ProviderExecutor::new(provider)
    }

    fn request() -> CallRequest {
        CallRequest::new(Address::repeat_byte(0x11), vec![0x01, 0x78, 0xb8, 0xbf])
    }

    #[tokio::test]
    async fn returns_prefixed_hex() {
        let asserter = Asserter::new();
        asserter.push_success(&Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]));
        let executor = mocked(asserter);

        assert_eq!(executor.call(&request()).await.unwrap(), "0xdeadbeef");
    }

    #[tokio::test]
    async fn rpc_failure_is_provider_error() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("execution reverted");
        let executor = mocked(asserter);

        let err = executor.call(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            TransportError::Provider(msg) if msg.starts_with("eth_call failed")
        ));
    }

    #[tokio::test]
    async fn exhausted_mock_is_provider_error() {
        let executor = mocked(Asserter::new());

        assert!(matches!(
            executor.call(&request()).await,
            Err(TransportError::Provider(_))
        ));
    }
}
