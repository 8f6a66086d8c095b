//! LooksRare Batch: maker order approvals and Merkle batch signing
//!
//! This is the root crate that hosts the cross-crate integration tests.
//! For actual functionality, use the individual crates directly:
//!
//! - `looksrare-core`: Maker order types, on-chain approvals, EIP-712 and
//!   Merkle tree signing
//! - `maker-batch`: Ask and bid workflows, serialization, CLI

pub use looksrare_core as core;
pub use maker_batch as batch;
