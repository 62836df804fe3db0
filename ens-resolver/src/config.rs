//! Network and client configuration.
//!
//! [`NetworkConfig`] holds the fixed per-chain contract addresses. It can be
//! built from a preset, from environment variables, or from the `[network]`
//! table of a [`ResolverConfig`] TOML file:
//!
//! ```toml
//! [rpc]
//! url = "https://eth.llamarpc.com"
//! timeout_secs = 30
//!
//! [network]
//! registry = "0x314159265dd8dbb310642f98f50c066173c1259b"
//! ```

use std::env::VarError;
use std::path::Path;
use std::str::FromStr;

use alloy::primitives::{Address, address};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Mainnet ENS registry.
pub const MAINNET_REGISTRY: Address = address!("314159265dd8dbb310642f98f50c066173c1259b");

/// Mainnet public resolver.
pub const MAINNET_PUBLIC_RESOLVER: Address = address!("5fbb459c49bb06083c33109fa4f14810ec2cf358");

/// Mainnet reverse resolver.
pub const MAINNET_REVERSE_RESOLVER: Address = address!("5fbb459c49bb06083c33109fa4f14810ec2cf358");

/// Name under which reverse records live.
pub const REVERSE_SUFFIX: &str = "addr.reverse";

/// Fixed contract addresses for one chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// ENS registry contract.
    pub registry: Address,
    /// Public resolver contract.
    pub public_resolver: Address,
    /// Reverse resolver contract queried by reverse lookups.
    pub reverse_resolver: Address,
    /// Suffix appended to the hex address for reverse lookups.
    pub reverse_suffix: String,
}

impl NetworkConfig {
    /// Ethereum mainnet deployment.
    #[must_use]
    pub fn mainnet() -> Self {
        Self {
            registry: MAINNET_REGISTRY,
            public_resolver: MAINNET_PUBLIC_RESOLVER,
            reverse_resolver: MAINNET_REVERSE_RESOLVER,
            reverse_suffix: REVERSE_SUFFIX.to_owned(),
        }
    }

    /// Mainnet preset with overrides from the environment.
    ///
    /// Reads from:
    /// - `ENS_REGISTRY` - Optional registry address
    /// - `ENS_PUBLIC_RESOLVER` - Optional public resolver address
    /// - `ENS_REVERSE_RESOLVER` - Optional reverse resolver address
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is set but is not an address.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::mainnet();
        if let Some(addr) = env_address("ENS_REGISTRY")? {
            config.registry = addr;
        }
        if let Some(addr) = env_address("ENS_PUBLIC_RESOLVER")? {
            config.public_resolver = addr;
        }
        if let Some(addr) = env_address("ENS_REVERSE_RESOLVER")? {
            config.reverse_resolver = addr;
        }
        Ok(config)
    }

    /// Sets the registry address.
    #[must_use]
    pub const fn with_registry(mut self, registry: Address) -> Self {
        self.registry = registry;
        self
    }

    /// Sets the public resolver address.
    #[must_use]
    pub const fn with_public_resolver(mut self, resolver: Address) -> Self {
        self.public_resolver = resolver;
        self
    }

    /// Sets the reverse resolver address.
    #[must_use]
    pub const fn with_reverse_resolver(mut self, resolver: Address) -> Self {
        self.reverse_resolver = resolver;
        self
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::mainnet()
    }
}

fn env_address(var: &str) -> Result<Option<Address>> {
    address_from_var(var, std::env::var(var))
}

fn address_from_var(
    var: &str,
    value: std::result::Result<String, VarError>,
) -> Result<Option<Address>> {
    match value {
        Ok(value) => parse_address(var, &value).map(Some),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(_)) => Err(Error::config(format!("{var} is not valid UTF-8"))),
    }
}

fn parse_address(field: &str, value: &str) -> Result<Address> {
    Address::from_str(value.trim())
        .map_err(|e| Error::config(format!("{field}: invalid address '{value}': {e}")))
}

/// Default JSON-RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Root of the TOML configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolverConfig {
    /// JSON-RPC endpoint settings.
    #[serde(default)]
    pub rpc: RpcConfig,

    /// Contract address overrides; unset fields keep mainnet values.
    #[serde(default)]
    pub network: NetworkOverrides,
}

/// JSON-RPC endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpcConfig {
    /// Endpoint URL.
    #[serde(default = "default_rpc_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: default_rpc_url(),
            timeout_secs: None,
        }
    }
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_owned()
}

/// Optional overrides of [`NetworkConfig::mainnet`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkOverrides {
    /// Registry address.
    #[serde(default)]
    pub registry: Option<String>,
    /// Public resolver address.
    #[serde(default)]
    pub public_resolver: Option<String>,
    /// Reverse resolver address.
    #[serde(default)]
    pub reverse_resolver: Option<String>,
    /// Reverse suffix.
    #[serde(default)]
    pub reverse_suffix: Option<String>,
}

impl NetworkOverrides {
    /// Apply the overrides on top of the mainnet preset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an address does not parse.
    pub fn to_network(&self) -> Result<NetworkConfig> {
        let mut config = NetworkConfig::mainnet();
        if let Some(value) = &self.registry {
            config.registry = parse_address("network.registry", value)?;
        }
        if let Some(value) = &self.public_resolver {
            config.public_resolver = parse_address("network.public_resolver", value)?;
        }
        if let Some(value) = &self.reverse_resolver {
            config.reverse_resolver = parse_address("network.reverse_resolver", value)?;
        }
        if let Some(suffix) = &self.reverse_suffix {
            config.reverse_suffix.clone_from(suffix);
        }
        Ok(config)
    }
}

impl ResolverConfig {
    /// Parse from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on invalid TOML or unknown fields.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("TOML parse error: {e}")))
    }

    /// Resolved network addresses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an address override does not parse.
    pub fn network(&self) -> Result<NetworkConfig> {
        self.network.to_network()
    }
}

/// Load configuration from a file, falling back to defaults if it is missing.
///
/// # Errors
///
/// Returns [`Error::Config`] if the file cannot be read or parsed.
pub async fn load_config_from(path: impl AsRef<Path>) -> Result<ResolverConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "config file not found, using defaults");
        return Ok(ResolverConfig::default());
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::config(format!("failed to read {}: {e}", path.display())))?;
    let config = ResolverConfig::from_toml_str(&content)?;
    debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_preset() {
        let config = NetworkConfig::mainnet();
        assert_eq!(
            config.registry.to_string().to_lowercase(),
            "0x314159265dd8dbb310642f98f50c066173c1259b"
        );
        assert_eq!(config.reverse_suffix, "addr.reverse");
        assert_eq!(config, NetworkConfig::default());
    }

    #[test]
    fn builder_overrides() {
        let registry = Address::repeat_byte(0x01);
        let config = NetworkConfig::mainnet()
            .with_registry(registry)
            .with_reverse_resolver(Address::repeat_byte(0x02));
        assert_eq!(config.registry, registry);
        assert_eq!(config.reverse_resolver, Address::repeat_byte(0x02));
        assert_eq!(config.public_resolver, MAINNET_PUBLIC_RESOLVER);
    }

    #[test]
    fn env_var_states() {
        assert_eq!(
            address_from_var("ENS_REGISTRY", Err(VarError::NotPresent)).unwrap(),
            None
        );
        assert_eq!(
            address_from_var(
                "ENS_REGISTRY",
                Ok("0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e".to_owned())
            )
            .unwrap(),
            Some(address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e"))
        );
        assert!(matches!(
            address_from_var("ENS_REGISTRY", Ok("0x12".to_owned())),
            Err(Error::Config(_))
        ));

        let err = address_from_var(
            "ENS_REGISTRY",
            Err(VarError::NotUnicode(std::ffi::OsString::from("registry"))),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("ENS_REGISTRY")));
    }

    #[test]
    fn toml_defaults() {
        let config = ResolverConfig::from_toml_str("").unwrap();
        assert_eq!(config.rpc.url, DEFAULT_RPC_URL);
        assert!(config.rpc.timeout_secs.is_none());
        assert_eq!(config.network().unwrap(), NetworkConfig::mainnet());
    }

    #[test]
    fn toml_overrides() {
        let config = ResolverConfig::from_toml_str(
            r#"
            [rpc]
            url = "https://rpc.example.com"
            timeout_secs = 15

            [network]
            registry = "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e"
            reverse_suffix = "addr.reverse"
            "#,
        )
        .unwrap();
        assert_eq!(config.rpc.url, "https://rpc.example.com");
        assert_eq!(config.rpc.timeout_secs, Some(15));
        let network = config.network().unwrap();
        assert_eq!(
            network.registry,
            address!("00000000000C2E074eC69A0dFb2997BA6C7d2e1e")
        );
        assert_eq!(network.reverse_resolver, MAINNET_REVERSE_RESOLVER);
    }

    #[test]
    fn toml_rejects_bad_address() {
        let config = ResolverConfig::from_toml_str("[network]\nregistry = \"0x1234\"").unwrap();
        assert!(matches!(config.network(), Err(Error::Config(_))));
    }

    #[test]
    fn toml_rejects_unknown_fields() {
        assert!(matches!(
            ResolverConfig::from_toml_str("[rpc]\nendpoint = \"x\""),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_uses_defaults() {
        let config = load_config_from("/nonexistent/ens-resolver/config.toml")
            .await
            .unwrap();
        assert_eq!(config.rpc.url, DEFAULT_RPC_URL);
    }
}
