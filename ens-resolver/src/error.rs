//! Error types for ENS resolution.
//!
//! Resolution produces exactly two failure categories:
//! - [`TransportError`] — raised by a [`CallExecutor`](crate::executor::CallExecutor)
//!   and propagated to the caller untouched.
//! - [`DecodeError`] — raised locally when returned call data has the wrong shape.
//!
//! [`Error`] wraps both, plus a configuration variant used only while
//! loading settings or constructing executors.

/// Result type alias for ENS operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Remote call executor failure, forwarded verbatim.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Returned call data did not match the expected ABI shape.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Invalid configuration (bad address, unreadable file, bad TOML).
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a config error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the transport error if this is one.
    #[must_use]
    pub const fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the decode error if this is one.
    #[must_use]
    pub const fn as_decode(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode(e) => Some(e),
            _ => None,
        }
    }
}

/// Failure to decode contract return data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// A fixed-size return was not exactly one ABI word.
    #[error("expected {expected} bytes of return data, got {actual}")]
    WrongLength {
        /// Required byte count.
        expected: usize,
        /// Byte count actually received.
        actual: usize,
    },

    /// A dynamic return was empty.
    #[error("empty return data")]
    EmptyData,

    /// The dynamic tuple encoding was malformed or not valid UTF-8.
    #[error("tuple decode failed: {0}")]
    TupleDecode(String),

    /// The executor answered with something that is not hex.
    #[error("invalid hex in return data: {0}")]
    InvalidHex(String),
}

impl DecodeError {
    /// Create a tuple decode error.
    #[must_use]
    pub fn tuple(msg: impl Into<String>) -> Self {
        Self::TupleDecode(msg.into())
    }
}

/// Failure reported by a remote call executor.
///
/// The core never inspects or retries these; they reach the caller as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
    /// Connection or HTTP-level failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The node returned a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// JSON-RPC error code.
        code: i64,
        /// JSON-RPC error message.
        message: String,
    },

    /// The response body was not a usable JSON-RPC response.
    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),

    /// Failure surfaced by an alloy provider.
    #[error("Provider error: {0}")]
    Provider(String),
}

impl TransportError {
    /// Create an HTTP error.
    #[must_use]
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    /// Create a JSON-RPC error.
    #[must_use]
    pub fn rpc(code: i64, message: impl Into<String>) -> Self {
        Self::Rpc {
            code,
            message: message.into(),
        }
    }

    /// Create an invalid response error.
    #[must_use]
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Create a provider error.
    #[must_use]
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}
