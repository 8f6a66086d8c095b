//! Error types for the LooksRare client.

use alloy_primitives::B256;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid RPC result: {0}")]
    InvalidResult(String),

    #[error("Signing error: {message}")]
    Signing { message: String },

    #[error("Invalid order: {message}")]
    InvalidOrder { message: String },

    #[error("Transaction {0} reverted")]
    Reverted(B256),

    #[error("Transaction {tx_hash} not mined after {attempts} attempts")]
    ConfirmationTimeout { tx_hash: B256, attempts: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
