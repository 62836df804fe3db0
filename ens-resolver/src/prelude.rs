//! Commonly used types, re-exported for glob import.

pub use crate::client::{EnsClient, ResolveResult};
pub use crate::config::{NetworkConfig, ResolverConfig};
pub use crate::error::{DecodeError, Error, Result, TransportError};
pub use crate::executor::{CallExecutor, CallRequest, HttpExecutor, ProviderExecutor};
pub use crate::namehash::{Node, namehash};
pub use alloy::primitives::Address;
