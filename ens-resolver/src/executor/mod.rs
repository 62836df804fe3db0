//! Remote call execution.
//!
//! A [`CallExecutor`] sends one read-only contract call and hands back the
//! hex-encoded return data. The resolver treats it as an injected capability:
//! retries, batching, timeouts and cancellation all live behind this trait.
//!
//! Two implementations ship with the crate:
//! - [`HttpExecutor`] — raw JSON-RPC 2.0 `eth_call` over HTTP
//! - [`ProviderExecutor`] — `eth_call` through an alloy provider

use std::fmt;
use std::sync::Arc;

use alloy::primitives::{Address, Bytes, hex};
use async_trait::async_trait;
use serde_json::Value;

use crate::error::{DecodeError, TransportError};

mod http;
mod provider;

pub use http::HttpExecutor;
pub use provider::ProviderExecutor;

/// A read-only contract invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRequest {
    /// Target contract.
    pub to: Address,
    /// Encoded call data (selector and arguments).
    pub data: Bytes,
}

impl CallRequest {
    /// Create a new call request.
    #[must_use]
    pub fn new(to: Address, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            data: data.into(),
        }
    }

    /// Target address as lower-case `0x` hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode_prefixed(self.to)
    }

    /// Call data as `0x` hex.
    #[must_use]
    pub fn data_hex(&self) -> String {
        hex::encode_prefixed(&self.data)
    }

    /// The 4-byte selector at the head of the call data, if present.
    #[must_use]
    pub fn selector(&self) -> Option<[u8; 4]> {
        self.data.get(..4).and_then(|s| s.try_into().ok())
    }

    /// JSON-RPC call object: `{"to": .., "data": ..}`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "to": self.to_hex(),
            "data": self.data_hex(),
        })
    }
}

/// Sends read-only contract calls to an Ethereum node.
#[async_trait]
pub trait CallExecutor: Send + Sync + fmt::Debug {
    /// Execute `request` and return the raw result as `0x` hex.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for any connectivity or RPC failure.
    async fn call(&self, request: &CallRequest) -> Result<String, TransportError>;
}

#[async_trait]
impl<T: CallExecutor + ?Sized> CallExecutor for Arc<T> {
    async fn call(&self, request: &CallRequest) -> Result<String, TransportError> {
        (**self).call(request).await
    }
}

#[async_trait]
impl<T: CallExecutor + ?Sized> CallExecutor for Box<T> {
    async fn call(&self, request: &CallRequest) -> Result<String, TransportError> {
        (**self).call(request).await
    }
}

/// Decode executor output (`0x`-prefixed or bare hex) into bytes.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidHex`] if the string is not hex.
pub fn decode_hex_result(result: &str) -> Result<Bytes, DecodeError> {
    let digits = result.strip_prefix("0x").unwrap_or(result);
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| DecodeError::InvalidHex(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use alloy::primitives::address;

    use super::*;

    #[test]
    fn request_hex_forms() {
        let request = CallRequest::new(
            address!("314159265dD8dbb310642f98f50C066173C1259b"),
            vec![0x01, 0x78, 0xb8, 0xbf, 0xff],
        );
        assert_eq!(request.to_hex(), "0x314159265dd8dbb310642f98f50c066173c1259b");
        assert_eq!(request.data_hex(), "0x0178b8bfff");
        assert_eq!(request.selector(), Some([0x01, 0x78, 0xb8, 0xbf]));
        assert_eq!(
            request.to_json(),
            serde_json::json!({
                "to": "0x314159265dd8dbb310642f98f50c066173c1259b",
                "data": "0x0178b8bfff",
            })
        );
    }

    #[test]
    fn short_data_has_no_selector() {
        let request = CallRequest::new(Address::ZERO, vec![0x01]);
        assert_eq!(request.selector(), None);
    }

    #[test]
    fn hex_result_decoding() {
        assert_eq!(decode_hex_result("0x").unwrap(), Bytes::new());
        assert_eq!(decode_hex_result("").unwrap(), Bytes::new());
        assert_eq!(decode_hex_result("0x0a0b").unwrap().to_vec(), vec![0x0a, 0x0b]);
        assert_eq!(decode_hex_result("0A0B").unwrap().to_vec(), vec![0x0a, 0x0b]);
        assert!(matches!(
            decode_hex_result("0xzz"),
            Err(DecodeError::InvalidHex(_))
        ));
        assert!(matches!(
            decode_hex_result("0xabc"),
            Err(DecodeError::InvalidHex(_))
        ));
    }
}
