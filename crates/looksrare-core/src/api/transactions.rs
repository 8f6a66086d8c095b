//! Signing, broadcasting and confirming approval transactions.
//!
//! Transactions are EIP-155 legacy transactions signed locally and sent with
//! `eth_sendRawTransaction`. Callers wait for each receipt before sending the
//! next one, so nonces are always read fresh from the node.

use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_network::TxSignerSync;
use alloy_primitives::{Address, Bytes, TxKind, B256, U256};
use alloy_signer_local::PrivateKeySigner;
use std::time::Duration;
use tracing::{debug, info};

use super::rpc::{RpcClient, TransactionReceipt};
use crate::{Error, Result};

/// Gas limit for approval calls (`approve`, `setApprovalForAll`,
/// `grantApprovals` all stay well below it).
const APPROVAL_GAS_LIMIT: u64 = 100_000;

/// How long to wait for a transaction to be mined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmationPolicy {
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl Default for ConfirmationPolicy {
    /// Poll every 2 seconds for up to 2 minutes.
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            max_attempts: 60,
        }
    }
}

/// Sign and broadcast a contract call from `signer`, returning the tx hash.
pub async fn send_call(
    rpc: &RpcClient,
    signer: &PrivateKeySigner,
    chain_id: u64,
    to: Address,
    input: Bytes,
) -> Result<B256> {
    let nonce = rpc.get_transaction_count(signer.address()).await?;
    let gas_price = rpc.gas_price().await?;
    // Use 1.2x gas price for faster inclusion
    let gas_price = gas_price + gas_price / 5;

    let tx = TxLegacy {
        chain_id: Some(chain_id),
        nonce,
        gas_price,
        gas_limit: APPROVAL_GAS_LIMIT,
        to: TxKind::Call(to),
        value: U256::ZERO,
        input,
    };

    let raw = sign_legacy(signer, tx)?;
    let tx_hash = rpc.send_raw_transaction(&raw).await?;
    debug!(tx_hash = %tx_hash, nonce = nonce, to = %to, "Transaction sent");
    Ok(tx_hash)
}

/// Sign a legacy transaction and return its raw encoding.
fn sign_legacy(signer: &PrivateKeySigner, mut tx: TxLegacy) -> Result<Vec<u8>> {
    let signature = signer
        .sign_transaction_sync(&mut tx)
        .map_err(|e| Error::Signing {
            message: format!("Failed to sign transaction: {}", e),
        })?;

    let envelope: TxEnvelope = tx.into_signed(signature).into();
    Ok(envelope.encoded_2718())
}

/// Poll until `tx_hash` is mined; a reverted receipt is an error.
///
/// The node is always asked at least once, even with a zero attempt budget.
pub async fn wait_for_receipt(
    rpc: &RpcClient,
    tx_hash: B256,
    policy: ConfirmationPolicy,
) -> Result<TransactionReceipt> {
    let max_attempts = policy.max_attempts.max(1);
    for attempt in 1..=max_attempts {
        tokio::time::sleep(policy.poll_interval).await;

        match rpc.get_transaction_receipt(tx_hash).await? {
            Some(receipt) if receipt.succeeded() => {
                info!(
                    tx_hash = %tx_hash,
                    block = receipt.block_number.as_deref().unwrap_or("?"),
                    attempt = attempt,
                    "Transaction confirmed"
                );
                return Ok(receipt);
            }
            Some(_) => return Err(Error::Reverted(tx_hash)),
            None => debug!(tx_hash = %tx_hash, attempt = attempt, "Transaction pending"),
        }
    }

    Err(Error::ConfirmationTimeout {
        tx_hash,
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub_node::StubNode;
    use serde_json::json;
    use std::str::FromStr;

    const TX_HASH: B256 = B256::repeat_byte(0x42);

    fn fast_policy(max_attempts: u32) -> ConfirmationPolicy {
        ConfirmationPolicy {
            poll_interval: Duration::from_millis(1),
            max_attempts,
        }
    }

    fn receipt(status: &str) -> serde_json::Value {
        json!({
            "transactionHash": format!("0x{}", hex::encode(TX_HASH)),
            "blockNumber": "0x10",
            "status": status,
        })
    }

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_default_policy() {
        let policy = ConfirmationPolicy::default();
        assert_eq!(policy.poll_interval, Duration::from_secs(2));
        assert_eq!(policy.max_attempts, 60);
    }

    #[test]
    fn test_sign_legacy_is_rlp_list() {
        let signer = PrivateKeySigner::from_str(TEST_PRIVATE_KEY).unwrap();
        let tx = TxLegacy {
            chain_id: Some(5),
            nonce: 0,
            gas_price: 1_000_000_000,
            gas_limit: APPROVAL_GAS_LIMIT,
            to: TxKind::Call(Address::repeat_byte(0x01)),
            value: U256::ZERO,
            input: Bytes::from(vec![0x09, 0x5e, 0xa7, 0xb3]),
        };

        let raw = sign_legacy(&signer, tx.clone()).unwrap();
        // Legacy transactions are bare RLP lists, no type prefix.
        assert!(raw[0] >= 0xc0);
        assert_eq!(raw, sign_legacy(&signer, tx).unwrap());
    }

    #[tokio::test]
    async fn test_wait_for_receipt_pending_then_mined() {
        let node =
            StubNode::with_results(vec![json!(null), json!(null), receipt("0x1")]).await;
        let rpc = RpcClient::new(node.url.clone()).unwrap();

        let mined = wait_for_receipt(&rpc, TX_HASH, fast_policy(5)).await.unwrap();

        assert!(mined.succeeded());
        assert_eq!(mined.block_number.as_deref(), Some("0x10"));
        assert_eq!(node.hits(), 3);
    }

    #[tokio::test]
    async fn test_wait_for_receipt_reverted() {
        let node = StubNode::with_results(vec![receipt("0x0")]).await;
        let rpc = RpcClient::new(node.url.clone()).unwrap();

        let result = wait_for_receipt(&rpc, TX_HASH, fast_policy(5)).await;

        assert!(matches!(result, Err(Error::Reverted(hash)) if hash == TX_HASH));
        assert_eq!(node.hits(), 1);
    }

    #[tokio::test]
    async fn test_wait_for_receipt_times_out() {
        let node = StubNode::with_results(vec![json!(null)]).await;
        let rpc = RpcClient::new(node.url.clone()).unwrap();

        let result = wait_for_receipt(&rpc, TX_HASH, fast_policy(3)).await;

        assert!(matches!(
            result,
            Err(Error::ConfirmationTimeout { tx_hash, attempts: 3 }) if tx_hash == TX_HASH
        ));
        assert_eq!(node.hits(), 3);
    }

    #[tokio::test]
    async fn test_wait_for_receipt_polls_at_least_once() {
        let node = StubNode::with_results(vec![receipt("0x1")]).await;
        let rpc = RpcClient::new(node.url.clone()).unwrap();

        let mined = wait_for_receipt(&rpc, TX_HASH, fast_policy(0)).await.unwrap();

        assert!(mined.succeeded());
        assert_eq!(node.hits(), 1);
    }
}
