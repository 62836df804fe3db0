//! Packing of 20-byte addresses into 32-byte ABI words.

use alloy::primitives::{Address, B256};

/// Offset of a right-aligned address inside an ABI word.
const ADDRESS_OFFSET: usize = 32 - 20;

/// Extract the address held in the low-order 20 bytes of an ABI word.
///
/// The upper 12 bytes are ignored.
#[must_use]
pub fn extract_address(word: &B256) -> Address {
    Address::from_slice(&word[ADDRESS_OFFSET..])
}

/// Left-pad an address with zeros to a full ABI word.
#[must_use]
pub fn address_as_left_padded_word(address: &Address) -> B256 {
    let mut word = [0u8; 32];
    word[ADDRESS_OFFSET..].copy_from_slice(address.as_slice());
    B256::from(word)
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{address, b256};

    use super::*;

    #[test]
    fn extracts_low_order_bytes() {
        let word = b256!("000000000000000000000000314159265dd8dbb310642f98f50c066173c1259b");
        assert_eq!(
            extract_address(&word),
            address!("314159265dd8dbb310642f98f50c066173c1259b")
        );
    }

    #[test]
    fn ignores_high_order_bytes() {
        let word = b256!("ffffffffffffffffffffffff0000000000000000000000000000000000000001");
        assert_eq!(
            extract_address(&word),
            address!("0000000000000000000000000000000000000001")
        );
    }

    #[test]
    fn padding_is_left_inverse() {
        for addr in [
            Address::ZERO,
            address!("5fbb459c49bb06083c33109fa4f14810ec2cf358"),
            Address::repeat_byte(0xff),
        ] {
            let word = address_as_left_padded_word(&addr);
            assert!(word[..12].iter().all(|b| *b == 0));
            assert_eq!(extract_address(&word), addr);
        }
    }
}
