//! LooksRare Core Library
//!
//! Maker order types, contract bindings, on-chain approvals and EIP-712 /
//! Merkle batch signing for the LooksRare v2 protocol.

pub mod api;
pub mod client;
pub mod error;
pub mod signing;
pub mod types;

pub use client::LooksRare;
pub use error::{Error, Result};
