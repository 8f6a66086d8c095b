//! Ethereum JSON-RPC client.

use crate::{Error, Result};
use alloy_primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use std::time::Duration as StdDuration;

/// JSON-RPC client for reading chain state and submitting transactions.
#[derive(Debug, Clone)]
pub struct RpcClient {
    rpc_url: String,
    http_client: reqwest::Client,
}

impl RpcClient {
    /// Create a new client for a JSON-RPC endpoint.
    pub fn new(rpc_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(30))
            .connect_timeout(StdDuration::from_secs(10))
            .build()?;
        Ok(Self {
            rpc_url: rpc_url.into(),
            http_client,
        })
    }

    /// Execute a read-only call against `to` at the latest block.
    pub async fn call(&self, to: Address, data: Bytes) -> Result<Bytes> {
        let params = serde_json::json!([
            { "to": to.to_string(), "data": format!("0x{}", hex::encode(&data)) },
            "latest"
        ]);
        let hex: String = self.rpc_call("eth_call", params).await?;
        parse_bytes(&hex)
    }

    /// Next nonce for `address`, counting pending transactions.
    pub async fn get_transaction_count(&self, address: Address) -> Result<u64> {
        let hex: String = self
            .rpc_call(
                "eth_getTransactionCount",
                serde_json::json!([address.to_string(), "pending"]),
            )
            .await?;
        parse_quantity_u64(&hex)
    }

    /// Current gas price in wei.
    pub async fn gas_price(&self) -> Result<u128> {
        let hex: String = self.rpc_call("eth_gasPrice", serde_json::json!([])).await?;
        let value = parse_quantity(&hex)?;
        u128::try_from(value).map_err(|_| Error::InvalidResult(format!("gas price {}", hex)))
    }

    /// Broadcast a signed transaction and return its hash.
    pub async fn send_raw_transaction(&self, raw: &[u8]) -> Result<B256> {
        let raw_hex = format!("0x{}", hex::encode(raw));
        let hash: String = self
            .rpc_call("eth_sendRawTransaction", serde_json::json!([raw_hex]))
            .await?;
        hash.parse()
            .map_err(|_| Error::InvalidResult(format!("transaction hash {}", hash)))
    }

    /// Receipt of a mined transaction, `None` while it is still pending.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: B256,
    ) -> Result<Option<TransactionReceipt>> {
        let response: JsonRpcResponse<TransactionReceipt> = self
            .rpc_request(
                "eth_getTransactionReceipt",
                serde_json::json!([format!("0x{}", hex::encode(tx_hash))]),
            )
            .await?;

        if let Some(error) = response.error {
            return Err(Error::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        Ok(response.result)
    }

    /// Perform a call whose result must be present.
    async fn rpc_call<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let response: JsonRpcResponse<T> = self.rpc_request(method, params).await?;

        if let Some(error) = response.error {
            return Err(Error::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response
            .result
            .ok_or_else(|| Error::InvalidResult(format!("{} returned no result", method)))
    }

    async fn rpc_request<T: for<'de> Deserialize<'de>>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<JsonRpcResponse<T>> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Rpc {
                code: i64::from(response.status().as_u16()),
                message: format!("RPC request {} failed: {}", method, response.status()),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'a str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Subset of a transaction receipt the client relies on.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionReceipt {
    #[serde(rename = "transactionHash")]
    pub transaction_hash: String,
    #[serde(rename = "blockNumber")]
    pub block_number: Option<String>,
    /// `0x1` on success, `0x0` when reverted.
    pub status: Option<String>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.as_deref() == Some("0x1")
    }
}

/// Parse a hex quantity (`0x1a`) into a U256.
pub fn parse_quantity(hex: &str) -> Result<U256> {
    let digits = hex.trim_start_matches("0x");
    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    U256::from_str_radix(digits, 16).map_err(|_| Error::InvalidResult(format!("quantity {}", hex)))
}

fn parse_quantity_u64(hex: &str) -> Result<u64> {
    u64::from_str_radix(hex.trim_start_matches("0x"), 16)
        .map_err(|_| Error::InvalidResult(format!("quantity {}", hex)))
}

fn parse_bytes(hex: &str) -> Result<Bytes> {
    hex::decode(hex.trim_start_matches("0x"))
        .map(Bytes::from)
        .map_err(|_| Error::InvalidResult(format!("call data {}", hex)))
}
