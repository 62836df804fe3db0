//! Contract call encoding and return-data decoding.
//!
//! Only the subset of the Ethereum ABI that ENS lookups need is covered:
//! static arguments for call data, a single static word for fixed returns
//! and a single `string` for dynamic returns.

use alloy::primitives::{Address, B256, Bytes, U256, keccak256};
use alloy::sol_types::SolCall;

use super::address::address_as_left_padded_word;
use crate::error::DecodeError;

mod abi {
    alloy::sol! {
        function name(bytes32 node) external view returns (string);
    }
}

/// Size of one ABI word.
pub const WORD_SIZE: usize = 32;

/// `resolver(bytes32)` on the registry.
pub const RESOLVER_SIGNATURE: &str = "resolver(bytes32)";
/// `owner(bytes32)` on the registry.
pub const OWNER_SIGNATURE: &str = "owner(bytes32)";
/// `addr(bytes32)` on a public resolver.
pub const ADDR_SIGNATURE: &str = "addr(bytes32)";
/// `name(bytes32)` on a reverse resolver.
pub const NAME_SIGNATURE: &str = "name(bytes32)";

/// A static ABI argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiArg {
    /// `bytes32`, appended verbatim.
    Bytes32(B256),
    /// `address`, left-padded.
    Address(Address),
    /// `uint256`, big-endian.
    Uint(U256),
    /// `bool`, encoded as 0 or 1.
    Bool(bool),
}

impl AbiArg {
    /// Canonical ABI type name as it appears in a signature.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bytes32(_) => "bytes32",
            Self::Address(_) => "address",
            Self::Uint(_) => "uint256",
            Self::Bool(_) => "bool",
        }
    }

    /// Encode as a single 32-byte word.
    #[must_use]
    pub fn encode_word(&self) -> B256 {
        match self {
            Self::Bytes32(word) => *word,
            Self::Address(address) => address_as_left_padded_word(address),
            Self::Uint(value) => B256::from(value.to_be_bytes::<WORD_SIZE>()),
            Self::Bool(flag) => B256::with_last_byte(u8::from(*flag)),
        }
    }
}

/// First four bytes of `keccak256(signature)`.
#[must_use]
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut out = [0u8; 4];
    out.copy_from_slice(&hash[..4]);
    out
}

/// Encode a function call: `selector(signature) || word(arg)...`.
///
/// The caller keeps `signature` and `args` consistent; the encoder does not
/// parse the signature.
#[must_use]
pub fn encode_call(signature: &str, args: &[AbiArg]) -> Bytes {
    let mut data = Vec::with_capacity(4 + args.len() * WORD_SIZE);
    data.extend_from_slice(&selector(signature));
    for arg in args {
        data.extend_from_slice(arg.encode_word().as_slice());
    }
    Bytes::from(data)
}

/// Decode a return value that must be exactly one ABI word.
///
/// # Errors
///
/// Returns [`DecodeError::WrongLength`] unless `data` is 32 bytes long.
pub fn decode_fixed_return(data: &[u8]) -> Result<B256, DecodeError> {
    if data.len() != WORD_SIZE {
        return Err(DecodeError::WrongLength {
            expected: WORD_SIZE,
            actual: data.len(),
        });
    }
    Ok(B256::from_slice(data))
}

/// Decode a return value consisting of a single ABI `string`.
///
/// Layout: offset word, then at that offset a length word followed by the
/// UTF-8 bytes padded to a word boundary.
///
/// # Errors
///
/// Returns [`DecodeError::EmptyData`] for empty input and
/// [`DecodeError::TupleDecode`] for a malformed layout or invalid UTF-8.
pub fn decode_string_return(data: &[u8]) -> Result<String, DecodeError> {
    if data.is_empty() {
        return Err(DecodeError::EmptyData);
    }
    // Shorter input cannot hold both the offset and the length word.
    if data.len() < 2 * WORD_SIZE {
        return Err(DecodeError::tuple(format!(
            "need at least {} bytes, got {}",
            2 * WORD_SIZE,
            data.len()
        )));
    }

    abi::nameCall::abi_decode_returns_validate(data)
        .map_err(|e| DecodeError::tuple(e.to_string()))
}

/// Encode `value` the way a contract returns a single `string`.
#[must_use]
pub fn encode_string_return(value: &str) -> Bytes {
    let bytes = value.as_bytes();
    let padded = bytes.len().div_ceil(WORD_SIZE) * WORD_SIZE;
    let mut data = Vec::with_capacity(2 * WORD_SIZE + padded);
    data.extend_from_slice(AbiArg::Uint(U256::from(WORD_SIZE)).encode_word().as_slice());
    data.extend_from_slice(AbiArg::Uint(U256::from(bytes.len())).encode_word().as_slice());
    data.extend_from_slice(bytes);
    data.resize(2 * WORD_SIZE + padded, 0);
    Bytes::from(data)
}
