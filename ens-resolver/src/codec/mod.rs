//! Stateless ABI helpers for ENS calls.
//!
//! - [`address`] — 20-byte address ⇄ 32-byte word packing
//! - [`call`] — call data encoding and return data decoding

pub mod address;
pub mod call;

pub use address::{address_as_left_padded_word, extract_address};
pub use call::{
    ADDR_SIGNATURE, AbiArg, NAME_SIGNATURE, OWNER_SIGNATURE, RESOLVER_SIGNATURE, WORD_SIZE,
    decode_fixed_return, decode_string_return, encode_call, encode_string_return, selector,
};
