//! ENS `namehash` (EIP-137).
//!
//! Turns a dotted domain name into the 32-byte node identifier that the
//! registry and resolver contracts are keyed by.

use alloy::primitives::{B256, keccak256};

/// A 32-byte ENS node identifier.
pub type Node = B256;

/// The root node, `namehash("")`.
pub const ROOT_NODE: Node = B256::ZERO;

/// Compute the ENS namehash for a domain name.
///
/// Labels are hashed right to left: `node = keccak256(node || keccak256(label))`
/// starting from [`ROOT_NODE`]. Label bytes are hashed as given; callers are
/// responsible for case normalization.
#[must_use]
pub fn namehash(name: &str) -> Node {
    let mut node = ROOT_NODE;
    if name.is_empty() {
        return node;
    }
    for label in name.rsplit('.') {
        node = child_node(node, label);
    }
    node
}

/// Derive the node of `label` directly beneath `parent`.
#[must_use]
pub fn child_node(parent: Node, label: &str) -> Node {
    let label_hash = keccak256(label.as_bytes());
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(parent.as_slice());
    buf[32..].copy_from_slice(label_hash.as_slice());
    keccak256(buf)
}
