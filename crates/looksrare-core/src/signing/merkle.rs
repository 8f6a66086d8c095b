//! Merkle tree over maker orders for batch signing.
//!
//! A batch of orders is signed once as the EIP-712 struct
//! `BatchOrder(Maker[2]..[2] tree)`. Hashing that nested array is exactly a
//! positional binary Merkle tree over the maker struct hashes, so the
//! signature commits to the root and each order is later proven against it.
//!
//! ```text
//!              root
//!            /      \
//!      H(l0,l1)    H(l2,l3)
//!       /   \       /    \
//!     l0    l1    l2   l3 = H(default maker)
//! ```

use alloy_primitives::{keccak256, B256};
use serde::{Deserialize, Serialize};

use super::maker_types::maker_type_string;
use crate::types::Maker;
use crate::{Error, Result};

/// Deepest tree the exchange accepts.
pub const MAX_TREE_HEIGHT: usize = 10;

/// Largest batch that fits in one tree.
pub const MAX_ORDERS_PER_TREE: usize = 1 << MAX_TREE_HEIGHT;

/// Side a sibling node sits on relative to the running hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum MerkleTreeNodePosition {
    Left = 0,
    Right = 1,
}

impl From<MerkleTreeNodePosition> for u8 {
    fn from(value: MerkleTreeNodePosition) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for MerkleTreeNodePosition {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(MerkleTreeNodePosition::Left),
            1 => Ok(MerkleTreeNodePosition::Right),
            other => Err(format!("unknown node position {}", other)),
        }
    }
}

/// One sibling on the path from a leaf to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTreeNode {
    pub value: B256,
    pub position: MerkleTreeNodePosition,
}

/// Inclusion proof of one order, as expected by `executeTakerBid/Ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTree {
    pub root: B256,
    pub proof: Vec<MerkleTreeNode>,
}

impl MerkleTree {
    /// Fold `leaf` up the proof and compare with the root.
    pub fn verify(&self, leaf: B256) -> bool {
        let computed = self.proof.iter().fold(leaf, |acc, node| match node.position {
            MerkleTreeNodePosition::Left => hash_pair(node.value, acc),
            MerkleTreeNodePosition::Right => hash_pair(acc, node.value),
        });
        computed == self.root
    }
}

/// Complete binary tree over maker struct hashes, padded with the hash of the
/// all-zero maker.
#[derive(Debug, Clone)]
pub struct MakerMerkleTree {
    maker_orders: Vec<Maker>,
    /// `layers[0]` are the leaves, the last layer holds only the root.
    layers: Vec<Vec<B256>>,
}

impl MakerMerkleTree {
    pub fn new(maker_orders: Vec<Maker>) -> Result<Self> {
        if maker_orders.is_empty() {
            return Err(Error::InvalidOrder {
                message: "cannot build a tree without orders".to_string(),
            });
        }
        if maker_orders.len() > MAX_ORDERS_PER_TREE {
            return Err(Error::InvalidOrder {
                message: format!(
                    "{} orders exceed the tree limit of {}",
                    maker_orders.len(),
                    MAX_ORDERS_PER_TREE
                ),
            });
        }

        let height = tree_height(maker_orders.len());
        let size = 1usize << height;

        let mut leaves: Vec<B256> = maker_orders.iter().map(Maker::struct_hash).collect();
        leaves.resize(size, Maker::default().struct_hash());

        let mut layers = vec![leaves];
        while let Some(last) = layers.last() {
            if last.len() == 1 {
                break;
            }
            let next = last
                .chunks(2)
                .map(|pair| hash_pair(pair[0], pair[1]))
                .collect();
            layers.push(next);
        }

        Ok(Self {
            maker_orders,
            layers,
        })
    }

    /// The orders the tree was built from, in leaf order.
    pub fn maker_orders(&self) -> &[Maker] {
        &self.maker_orders
    }

    pub fn into_maker_orders(self) -> Vec<Maker> {
        self.maker_orders
    }

    pub fn height(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn root(&self) -> B256 {
        self.layers[self.height()][0]
    }

    /// Inclusion proof for the order at `index`.
    pub fn proof(&self, index: usize) -> Option<MerkleTree> {
        if index >= self.maker_orders.len() {
            return None;
        }

        let mut position = index;
        let mut proof = Vec::with_capacity(self.height());
        for layer in &self.layers[..self.height()] {
            let sibling = position ^ 1;
            proof.push(MerkleTreeNode {
                value: layer[sibling],
                position: if sibling < position {
                    MerkleTreeNodePosition::Left
                } else {
                    MerkleTreeNodePosition::Right
                },
            });
            position /= 2;
        }

        Some(MerkleTree {
            root: self.root(),
            proof,
        })
    }

    /// Proofs for every order, in order.
    pub fn proofs(&self) -> Vec<MerkleTree> {
        (0..self.maker_orders.len())
            .filter_map(|index| self.proof(index))
            .collect()
    }

    /// EIP-712 struct hash of the `BatchOrder` committing to this tree.
    pub fn struct_hash(&self) -> B256 {
        let mut encoded = [0u8; 64];
        encoded[..32].copy_from_slice(batch_order_type_hash(self.height()).as_slice());
        encoded[32..].copy_from_slice(self.root().as_slice());
        keccak256(encoded)
    }
}

/// Type hash of `BatchOrder(Maker[2]...[2] tree)` with `height` dimensions.
pub fn batch_order_type_hash(height: usize) -> B256 {
    let dimensions = "[2]".repeat(height);
    let type_string = format!("BatchOrder(Maker{} tree){}", dimensions, maker_type_string());
    keccak256(type_string.as_bytes())
}

/// Smallest height holding `count` leaves, never below one.
fn tree_height(count: usize) -> usize {
    (count.next_power_of_two().trailing_zeros() as usize).max(1)
}

fn hash_pair(left: B256, right: B256) -> B256 {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(left.as_slice());
    data[32..].copy_from_slice(right.as_slice());
    keccak256(data)
}
