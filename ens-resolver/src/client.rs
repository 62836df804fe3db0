//! ENS resolution client.
//!
//! Provides forward resolution (name → address), owner lookup, and reverse
//! resolution (address → name) by issuing `eth_call`s against the registry
//! and resolver contracts of a [`NetworkConfig`].
//!
//! Every operation is independent and stateless; the client can be shared
//! across concurrent tasks as long as its executor can.

use alloy::primitives::{Address, B256, hex};
use tracing::debug;

use crate::codec::{
    ADDR_SIGNATURE, AbiArg, NAME_SIGNATURE, OWNER_SIGNATURE, RESOLVER_SIGNATURE,
    decode_fixed_return, decode_string_return, encode_call, extract_address, selector,
};
use crate::config::NetworkConfig;
use crate::error::Result;
use crate::executor::{CallExecutor, CallRequest, decode_hex_result};
use crate::namehash::{Node, namehash};

/// Outcome of forward resolution.
///
/// `resolver` is zero when no resolver is registered; `address` is zero
/// when the resolver holds no address record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveResult {
    /// Resolver contract registered for the name.
    pub resolver: Address,
    /// Address the resolver returned.
    pub address: Address,
}

impl ResolveResult {
    /// Whether the name resolved to a non-zero address.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.address.is_zero()
    }
}

/// Resolves ENS names through a [`CallExecutor`].
#[derive(Debug, Clone)]
pub struct EnsClient<E> {
    executor: E,
    network: NetworkConfig,
}

impl<E: CallExecutor> EnsClient<E> {
    /// Create a client for the given network.
    #[must_use]
    pub const fn new(executor: E, network: NetworkConfig) -> Self {
        Self { executor, network }
    }

    /// Create a client for Ethereum mainnet.
    #[must_use]
    pub fn mainnet(executor: E) -> Self {
        Self::new(executor, NetworkConfig::mainnet())
    }

    /// Reference to the network configuration.
    #[must_use]
    pub const fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Reference to the executor.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Resolve an ENS name to its resolver and address.
    ///
    /// Looks up the resolver in the registry first. If none is registered
    /// the result is all-zero and no second call is made; otherwise the
    /// resolver is asked for the address.
    ///
    /// # Errors
    ///
    /// Returns the executor's transport error unchanged, or a decode error
    /// if either reply is not a single ABI word.
    pub async fn resolve(&self, name: &str) -> Result<ResolveResult> {
        let node = namehash(name);

        let resolver = self.registry_lookup(RESOLVER_SIGNATURE, node).await?;
        if resolver.is_zero() {
            debug!(name, "no resolver registered");
            return Ok(ResolveResult::default());
        }

        let address = self.address_call(resolver, ADDR_SIGNATURE, node).await?;
        debug!(name, %resolver, %address, "ENS name resolved");

        Ok(ResolveResult { resolver, address })
    }

    /// Resolver contract registered for `name`, zero if none.
    ///
    /// # Errors
    ///
    /// Returns the executor's transport error unchanged, or a decode error.
    pub async fn resolver_of(&self, name: &str) -> Result<Address> {
        self.registry_lookup(RESOLVER_SIGNATURE, namehash(name)).await
    }

    /// Owner of `name` according to the registry.
    ///
    /// # Errors
    ///
    /// Returns the executor's transport error unchanged, or a decode error.
    pub async fn owner_of(&self, name: &str) -> Result<Address> {
        self.registry_lookup(OWNER_SIGNATURE, namehash(name)).await
    }

    /// Reverse-resolve an address to its primary ENS name.
    ///
    /// Queries `name(bytes32)` on the configured reverse resolver for the
    /// node of `<lower-case hex>.addr.reverse`.
    ///
    /// # Errors
    ///
    /// Returns the executor's transport error unchanged, or a decode error
    /// if the reply is empty or not a well-formed ABI string.
    pub async fn lookup(&self, address: Address) -> Result<String> {
        let node = self.reverse_node(address);
        let data = encode_call(NAME_SIGNATURE, &[AbiArg::Bytes32(node)]);
        let request = CallRequest::new(self.network.reverse_resolver, data);
        debug!(
            %address,
            %node,
            to = %request.to,
            selector = %hex::encode(selector(NAME_SIGNATURE)),
            "reverse lookup"
        );

        let result = self.executor.call(&request).await?;
        let bytes = decode_hex_result(&result)?;
        Ok(decode_string_return(&bytes)?)
    }

    /// Node of the reverse record for `address`.
    #[must_use]
    pub fn reverse_node(&self, address: Address) -> Node {
        namehash(&self.reverse_name(address))
    }

    /// `<lower-case hex without 0x>.<reverse suffix>`.
    #[must_use]
    pub fn reverse_name(&self, address: Address) -> String {
        format!("{}.{}", hex::encode(address), self.network.reverse_suffix)
    }

    async fn registry_lookup(&self, signature: &str, node: B256) -> Result<Address> {
        self.address_call(self.network.registry, signature, node).await
    }

    /// Call `signature(node)` on `to` and decode the reply as an address.
    async fn address_call(&self, to: Address, signature: &str, node: B256) -> Result<Address> {
        let data = encode_call(signature, &[AbiArg::Bytes32(node)]);
        let request = CallRequest::new(to, data);
        debug!(%to, signature, selector = %hex::encode(selector(signature)), %node, "eth_call");

        let result = self.executor.call(&request).await?;
        let bytes = decode_hex_result(&result)?;
        let word = decode_fixed_return(&bytes)?;
        Ok(extract_address(&word))
    }
}
