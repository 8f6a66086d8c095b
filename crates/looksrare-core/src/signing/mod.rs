//! Signing module for LooksRare v2 maker orders.
//!
//! This module provides EIP-712 typed data signing for single orders and
//! Merkle-tree batches of orders.
//!
//! # Architecture
//!
//! ```text
//! Maker ── struct_hash ──► leaf
//!                           │
//!                           ▼
//!                   MakerMerkleTree ── root ──► BatchOrder digest
//!                           │                          │
//!                           ▼                          ▼
//!                    MerkleTree proofs          OrderSigner (one signature)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use looksrare_core::signing::{ChainId, Eip712Domain, OrderSigner};
//! use alloy_signer_local::PrivateKeySigner;
//!
//! let key = PrivateKeySigner::from_str("0x...")?;
//! let signer = OrderSigner::new(key, Eip712Domain::for_chain(ChainId::Goerli));
//!
//! let output = signer.sign_multiple_maker_orders(vec![ask, bid]).await?;
//! assert!(output.merkle_tree_proofs[0].verify(ask.struct_hash()));
//! ```

pub mod domain;
pub mod maker_types;
pub mod merkle;
pub mod signer;

pub use domain::{Addresses, ChainId, Eip712Domain};

pub use maker_types::{maker_type_string, typed_data_hash};

pub use merkle::{
    batch_order_type_hash, MakerMerkleTree, MerkleTree, MerkleTreeNode, MerkleTreeNodePosition,
    MAX_ORDERS_PER_TREE,
};

pub use signer::{OrderSigner, SignMerkleTreeOutput};
