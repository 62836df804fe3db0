//! ENS (Ethereum Name Service) resolution.
//!
//! This crate turns human-readable names into account addresses and back:
//! - [`namehash`](mod@namehash) — EIP-137 node computation
//! - [`codec`] — minimal ABI call encoding and return decoding
//! - [`executor`] — the injected `eth_call` transport and two implementations
//! - [`client`] — the forward, owner and reverse resolution protocols
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ens_resolver::prelude::*;
//!
//! # async fn example() -> ens_resolver::Result<()> {
//! let executor = HttpExecutor::new("https://eth.llamarpc.com")?;
//! let client = EnsClient::mainnet(executor);
//!
//! let resolved = client.resolve("alice.eth").await?;
//! if resolved.is_resolved() {
//!     let name = client.lookup(resolved.address).await?;
//!     println!("{name} -> {}", resolved.address);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod executor;
pub mod namehash;
pub mod prelude;

pub use client::{EnsClient, ResolveResult};
pub use config::NetworkConfig;
pub use error::{DecodeError, Error, Result, TransportError};
pub use namehash::{Node, namehash};
