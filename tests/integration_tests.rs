//! Integration tests for component interactions.
//!
//! These tests drive the maker-batch runs against an in-memory marketplace
//! and check what ends up on disk.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use alloy_primitives::{Address, B256, U256};
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use looksrare_core::signing::{
    Addresses, ChainId, Eip712Domain, MerkleTree, MerkleTreeNode, MerkleTreeNodePosition,
    OrderSigner, SignMerkleTreeOutput,
};
use looksrare_core::types::{
    CreateMakerAskOutput, CreateMakerBidOutput, CreateMakerInput, Maker, QuoteType, StrategyType,
};
use looksrare_core::{Error, Result};
use maker_batch::output::SignedBundle;
use maker_batch::{convert_maker_string, run_batch, Config, Marketplace, OfferKind};
use serde_json::{json, Value};

// Test private key (DO NOT USE IN PRODUCTION - this is a well-known test key)
const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

const NOW: u64 = 1_700_000_000;

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("looksrare-batch-it-{}", uuid::Uuid::new_v4()))
}

/// How the fake answers batch signing requests.
enum BatchSigning {
    /// Return a canned triple regardless of input.
    Fixed(SignMerkleTreeOutput),
    /// Sign for real with a local key.
    Local(OrderSigner),
}

/// In-memory marketplace that records every call it receives.
struct RecordingMarketplace {
    signer: Address,
    collection_approved: bool,
    transfer_manager_approved: bool,
    currency_approved: bool,
    fail_collection_approval: bool,
    signing: BatchSigning,
    calls: Mutex<Vec<String>>,
}

impl RecordingMarketplace {
    fn new(signing: BatchSigning) -> Self {
        Self {
            signer: Address::repeat_byte(0x5e),
            collection_approved: true,
            transfer_manager_approved: true,
            currency_approved: true,
            fail_collection_approval: false,
            signing,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn bid(&self, input: &CreateMakerInput) -> CreateMakerBidOutput {
        CreateMakerBidOutput {
            maker: Maker::from_input(input, QuoteType::Bid, U256::from(1u64), self.signer),
            is_currency_approved: self.currency_approved,
            is_balance_sufficient: true,
        }
    }
}

#[async_trait]
impl Marketplace for RecordingMarketplace {
    async fn create_maker_ask(&self, input: &CreateMakerInput) -> Result<CreateMakerAskOutput> {
        self.record("create_maker_ask");
        Ok(CreateMakerAskOutput {
            maker: Maker::from_input(input, QuoteType::Ask, U256::from(1u64), self.signer),
            is_collection_approved: self.collection_approved,
            is_transfer_manager_approved: self.transfer_manager_approved,
        })
    }

    async fn create_maker_bid(&self, input: &CreateMakerInput) -> Result<CreateMakerBidOutput> {
        self.record("create_maker_bid");
        Ok(self.bid(input))
    }

    async fn create_maker_collection_offer(
        &self,
        input: &CreateMakerInput,
    ) -> Result<CreateMakerBidOutput> {
        self.record("create_maker_collection_offer");
        let offer = CreateMakerInput {
            strategy_id: StrategyType::Collection,
            item_ids: Vec::new(),
            ..input.clone()
        };
        Ok(self.bid(&offer))
    }

    async fn approve_all_collection_items(&self, _collection: Address) -> Result<B256> {
        self.record("approve_all_collection_items");
        if self.fail_collection_approval {
            return Err(Error::Rpc {
                code: -32000,
                message: "execution reverted".to_string(),
            });
        }
        Ok(B256::repeat_byte(1))
    }

    async fn grant_transfer_manager_approval(&self) -> Result<B256> {
        self.record("grant_transfer_manager_approval");
        Ok(B256::repeat_byte(2))
    }

    async fn approve_erc20(&self, _currency: Address, amount: U256) -> Result<B256> {
        self.record(format!("approve_erc20:{}", amount));
        Ok(B256::repeat_byte(3))
    }

    async fn wait_for_transaction(&self, tx_hash: B256) -> Result<()> {
        self.record(format!("wait_for_transaction:{}", tx_hash[0]));
        Ok(())
    }

    async fn sign_maker_order(&self, _maker: &Maker) -> Result<String> {
        self.record("sign_maker_order");
        Ok("0x00".to_string())
    }

    async fn sign_multiple_maker_orders(&self, makers: Vec<Maker>) -> Result<SignMerkleTreeOutput> {
        self.record("sign_multiple_maker_orders");
        match &self.signing {
            BatchSigning::Fixed(output) => Ok(output.clone()),
            BatchSigning::Local(signer) => signer.sign_multiple_maker_orders(makers).await,
        }
    }
}

fn fixed_order(quote_type: QuoteType, price: u64) -> Maker {
    Maker {
        quote_type,
        global_nonce: U256::from(12u64),
        subset_nonce: U256::from(0u64),
        order_nonce: U256::from(0x1fu64),
        collection: Address::repeat_byte(0x77),
        currency: Address::repeat_byte(0xb4),
        signer: Address::repeat_byte(0x5e),
        start_time: NOW,
        end_time: NOW + 86_400,
        price: U256::from(price),
        item_ids: vec![U256::from(117u64)],
        amounts: vec![U256::from(1u64)],
        ..Default::default()
    }
}

/// The written bundle deep-equals the signer output with stringified orders.
#[tokio::test]
async fn test_tree_file_matches_signer_output() {
    let order1 = fixed_order(QuoteType::Ask, 210);
    let order2 = fixed_order(QuoteType::Bid, 250);
    let proof = MerkleTree {
        root: B256::repeat_byte(0xaa),
        proof: vec![MerkleTreeNode {
            value: B256::repeat_byte(0xbb),
            position: MerkleTreeNodePosition::Right,
        }],
    };
    let market = RecordingMarketplace::new(BatchSigning::Fixed(SignMerkleTreeOutput {
        signature: "0x1234".to_string(),
        merkle_tree_proofs: vec![proof.clone(), proof.clone()],
        maker_orders: vec![order1.clone(), order2.clone()],
    }));
    let dir = temp_dir();

    let (path, _) = run_batch(&market, NOW, OfferKind::Collection, &dir)
        .await
        .unwrap();

    let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let expected = json!({
        "signature": "0x1234",
        "merkleTreeProofs": [proof.clone(), proof],
        "makerOrders": [
            convert_maker_string(&order1).unwrap(),
            convert_maker_string(&order2).unwrap(),
        ],
    });
    assert_eq!(written, expected);
    assert_eq!(written["makerOrders"][0]["orderNonce"], "31");
    assert_eq!(written["makerOrders"][1]["price"], "250");

    std::fs::remove_dir_all(dir).unwrap();
}

/// A rejected collection approval ends the run before any bid or signing.
#[tokio::test]
async fn test_ask_approval_failure_short_circuits() {
    let mut market = RecordingMarketplace::new(BatchSigning::Fixed(SignMerkleTreeOutput {
        signature: String::new(),
        merkle_tree_proofs: Vec::new(),
        maker_orders: Vec::new(),
    }));
    market.collection_approved = false;
    market.fail_collection_approval = true;
    let dir = temp_dir();

    let result = run_batch(&market, NOW, OfferKind::Collection, &dir).await;

    assert!(result.is_err());
    assert_eq!(
        market.calls(),
        vec!["create_maker_ask", "approve_all_collection_items"]
    );
    assert!(!dir.exists());
}

/// Missing approvals are sent and confirmed in order before signing.
#[tokio::test]
async fn test_approvals_are_sequenced_before_signing() {
    let signer = PrivateKeySigner::from_str(TEST_PRIVATE_KEY).unwrap();
    let mut market = RecordingMarketplace::new(BatchSigning::Local(OrderSigner::new(
        signer,
        Eip712Domain::for_chain(ChainId::Goerli),
    )));
    market.collection_approved = false;
    market.transfer_manager_approved = false;
    market.currency_approved = false;
    let dir = temp_dir();

    run_batch(&market, NOW, OfferKind::SingleItem, &dir)
        .await
        .unwrap();

    assert_eq!(
        market.calls(),
        vec![
            "create_maker_ask".to_string(),
            "approve_all_collection_items".to_string(),
            "wait_for_transaction:1".to_string(),
            "grant_transfer_manager_approval".to_string(),
            "wait_for_transaction:2".to_string(),
            "create_maker_bid".to_string(),
            "approve_erc20:250000000000000000".to_string(),
            "wait_for_transaction:3".to_string(),
            "sign_multiple_maker_orders".to_string(),
        ]
    );

    std::fs::remove_dir_all(dir).unwrap();
}

/// With a real key every written proof folds back to the signed root.
#[tokio::test]
async fn test_written_proofs_verify_against_orders() {
    let signer = PrivateKeySigner::from_str(TEST_PRIVATE_KEY).unwrap();
    let market = RecordingMarketplace::new(BatchSigning::Local(OrderSigner::new(
        signer,
        Eip712Domain::looksrare(ChainId::Goerli.as_u64(), Addresses::GOERLI.exchange),
    )));
    let dir = temp_dir();

    let (path, bundle) = run_batch(&market, NOW, OfferKind::Collection, &dir)
        .await
        .unwrap();

    let written: SignedBundle =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, bundle);
    assert_eq!(written.maker_orders.len(), 2);
    assert_eq!(written.merkle_tree_proofs.len(), 2);
    assert!(written.signature.starts_with("0x"));
    assert_eq!(written.signature.len(), 2 + 130);

    let root = written.merkle_tree_proofs[0].root;
    assert_eq!(written.merkle_tree_proofs[1].root, root);
    assert_eq!(written.maker_orders[1]["strategyId"], 1);
    assert_eq!(written.maker_orders[1]["itemIds"], json!([]));

    let ask = fixed_leaf(&market, QuoteType::Ask);
    let bid = fixed_leaf(&market, QuoteType::Bid);
    assert!(written.merkle_tree_proofs[0].verify(ask.struct_hash()));
    assert!(written.merkle_tree_proofs[1].verify(bid.struct_hash()));

    std::fs::remove_dir_all(dir).unwrap();
}

/// Rebuild the order the fake produced for `quote_type` in the default run.
fn fixed_leaf(market: &RecordingMarketplace, quote_type: QuoteType) -> Maker {
    match quote_type {
        QuoteType::Ask => Maker::from_input(
            &maker_batch::template::base_maker(NOW),
            QuoteType::Ask,
            U256::from(1u64),
            market.signer,
        ),
        QuoteType::Bid => {
            let offer = CreateMakerInput {
                strategy_id: StrategyType::Collection,
                item_ids: Vec::new(),
                ..maker_batch::template::bid_maker(NOW)
            };
            market.bid(&offer).maker
        }
    }
}

/// Configuration fails on a missing key without touching the network.
#[test]
fn test_missing_private_key_fails_config() {
    let err = Config::from_lookup(|_| None).unwrap_err();
    assert!(err.to_string().contains("WALLET_PRIVATE_KEY"));
}
