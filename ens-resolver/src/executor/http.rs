//! JSON-RPC 2.0 `eth_call` over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use super::{CallExecutor, CallRequest};
use crate::config::ResolverConfig;
use crate::error::{Error, Result, TransportError};

/// Executes calls with a plain `eth_call` POST against a JSON-RPC endpoint.
///
/// Each call is one request; there is no batching and no retry.
#[derive(Debug)]
pub struct HttpExecutor {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

impl HttpExecutor {
    /// Create an executor for `url` without a request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, None)
    }

    /// Create an executor with an optional request timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL is empty or the HTTP client cannot be built.
    pub fn with_timeout(url: impl Into<String>, timeout_secs: Option<u64>) -> Result<Self> {
        let url = url.into();
        if url.is_empty() {
            return Err(Error::config("RPC URL is required"));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout));
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    /// Create an executor from the `[rpc]` section of a config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the HTTP client cannot be built.
    pub fn from_config(config: &ResolverConfig) -> Result<Self> {
        Self::with_timeout(config.rpc.url.clone(), config.rpc.timeout_secs)
    }

    /// Endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build the `eth_call` request body.
    pub(crate) fn build_body(id: u64, request: &CallRequest) -> Value {
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": "eth_call",
            "params": [request.to_json(), "latest"],
        })
    }

    /// Map an HTTP status and body to the call outcome.
    pub(crate) fn handle_response(
        status: StatusCode,
        body: &str,
    ) -> std::result::Result<String, TransportError> {
        if !status.is_success() {
            return Err(TransportError::http(format!("HTTP {}: {body}", status.as_u16())));
        }
        Self::parse_response(body)
    }

    /// Extract the hex result from a response body.
    pub(crate) fn parse_response(body: &str) -> std::result::Result<String, TransportError> {
        let response: RpcResponse = serde_json::from_str(body)
            .map_err(|e| TransportError::invalid_response(format!("malformed JSON: {e}")))?;

        if let Some(error) = response.error {
            return Err(TransportError::rpc(error.code, error.message));
        }
        response
            .result
            .ok_or_else(|| TransportError::invalid_response("response has neither result nor error"))
    }
}

#[async_trait]
impl CallExecutor for HttpExecutor {
    async fn call(&self, request: &CallRequest) -> std::result::Result<String, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = Self::build_body(id, request);
        trace!(id, url = %self.url, to = %request.to_hex(), "eth_call");

        let response = self.client.post(&self.url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        Self::handle_response(status, &text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use alloy::primitives::Address;

    use super::*;

    #[test]
    fn body_shape() {
        let request = CallRequest::new(Address::repeat_byte(0x11), vec![0xaa, 0xbb]);
        let body = HttpExecutor::build_body(7, &request);
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["id"], 7);
        assert_eq!(body["method"], "eth_call");
        assert_eq!(body["params"][0]["to"], request.to_hex());
        assert_eq!(body["params"][0]["data"], "0xaabb");
        assert_eq!(body["params"][1], "latest");
    }

    #[test]
    fn parses_result() {
        let result =
            HttpExecutor::parse_response(r#"{"jsonrpc":"2.0","id":1,"result":"0x1234"}"#).unwrap();
        assert_eq!(result, "0x1234");
    }

    #[test]
    fn parses_rpc_error() {
        let err = HttpExecutor::parse_response(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#,
        )
        .unwrap_err();
        assert_eq!(err, TransportError::rpc(-32000, "execution reverted"));
    }

    #[test]
    fn non_success_status_is_http_error() {
        let err = HttpExecutor::handle_response(StatusCode::BAD_GATEWAY, "upstream down").unwrap_err();
        assert_eq!(err, TransportError::http("HTTP 502: upstream down"));

        // Status wins even when the body looks like a valid reply.
        let err = HttpExecutor::handle_response(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"jsonrpc":"2.0","id":1,"result":"0x"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, TransportError::Http(msg) if msg.starts_with("HTTP 429")));
    }

    #[test]
    fn success_status_parses_body() {
        let result = HttpExecutor::handle_response(
            StatusCode::OK,
            r#"{"jsonrpc":"2.0","id":1,"result":"0xabcd"}"#,
        )
        .unwrap();
        assert_eq!(result, "0xabcd");
    }

    #[test]
    fn rejects_bad_bodies() {
        assert!(matches!(
            HttpExecutor::parse_response("not json"),
            Err(TransportError::InvalidResponse(_))
        ));
        assert!(matches!(
            HttpExecutor::parse_response(r#"{"jsonrpc":"2.0","id":1}"#),
            Err(TransportError::InvalidResponse(_))
        ));
    }

    #[test]
    fn requires_url() {
        assert!(matches!(HttpExecutor::new(""), Err(Error::Config(_))));
        let executor = HttpExecutor::with_timeout("http://127.0.0.1:8545", Some(5)).unwrap();
        assert_eq!(executor.url(), "http://127.0.0.1:8545");
    }
}
