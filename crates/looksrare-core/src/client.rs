//! LooksRare v2 client.
//!
//! Prepares maker orders (reading nonces and approval state from chain),
//! sends the approval transactions makers need, and signs orders.

use alloy_primitives::{Address, B256, U256};
use alloy_signer_local::PrivateKeySigner;
use tracing::{debug, info};

use crate::api::contracts::{self, UserBidAskNonces};
use crate::api::transactions::{self, ConfirmationPolicy};
use crate::api::{RpcClient, TransactionReceipt};
use crate::signing::{Addresses, ChainId, Eip712Domain, OrderSigner, SignMerkleTreeOutput};
use crate::types::{
    CreateMakerAskOutput, CreateMakerBidOutput, CreateMakerInput, Maker, QuoteType, StrategyType,
};
use crate::{Error, Result};

/// Client bound to one chain, one RPC endpoint and one signing key.
#[derive(Debug, Clone)]
pub struct LooksRare {
    chain_id: u64,
    addresses: Addresses,
    rpc: RpcClient,
    signer: OrderSigner,
    confirmation: ConfirmationPolicy,
}

impl LooksRare {
    /// Client for a supported chain using its canonical deployment.
    pub fn new(chain: ChainId, rpc_url: impl Into<String>, signer: PrivateKeySigner) -> Result<Self> {
        Self::with_addresses(chain.as_u64(), Addresses::for_chain(chain), rpc_url, signer)
    }

    /// Client for a custom deployment (local fork, test network).
    pub fn with_addresses(
        chain_id: u64,
        addresses: Addresses,
        rpc_url: impl Into<String>,
        signer: PrivateKeySigner,
    ) -> Result<Self> {
        let domain = Eip712Domain::looksrare(chain_id, addresses.exchange);
        Ok(Self {
            chain_id,
            addresses,
            rpc: RpcClient::new(rpc_url)?,
            signer: OrderSigner::new(signer, domain),
            confirmation: ConfirmationPolicy::default(),
        })
    }

    /// Override how approval transactions are awaited.
    pub fn with_confirmation(mut self, confirmation: ConfirmationPolicy) -> Self {
        self.confirmation = confirmation;
        self
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn addresses(&self) -> &Addresses {
        &self.addresses
    }

    /// Address of the signing wallet.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Prepare an ask and report the approvals it still needs.
    pub async fn create_maker_ask(&self, input: &CreateMakerInput) -> Result<CreateMakerAskOutput> {
        input.validate_timestamps()?;
        let signer = self.address();

        let is_collection_approved = contracts::is_approved_for_all(
            &self.rpc,
            input.collection,
            signer,
            self.addresses.transfer_manager,
        )
        .await?;
        let nonces = self.user_bid_ask_nonces(signer).await?;
        let is_transfer_manager_approved = contracts::has_user_approved_operator(
            &self.rpc,
            self.addresses.transfer_manager,
            signer,
            self.addresses.exchange,
        )
        .await?;

        debug!(
            collection = %input.collection,
            ask_nonce = %nonces.ask_nonce,
            is_collection_approved,
            is_transfer_manager_approved,
            "Prepared maker ask"
        );

        Ok(CreateMakerAskOutput {
            maker: Maker::from_input(input, QuoteType::Ask, nonces.ask_nonce, signer),
            is_collection_approved,
            is_transfer_manager_approved,
        })
    }

    /// Prepare a bid on specific items and report the allowance state.
    pub async fn create_maker_bid(&self, input: &CreateMakerInput) -> Result<CreateMakerBidOutput> {
        input.validate_timestamps()?;
        if input.currency == Address::ZERO {
            return Err(Error::InvalidOrder {
                message: "bids must be placed in an ERC-20 currency".to_string(),
            });
        }
        let signer = self.address();

        let balance = contracts::balance_of(&self.rpc, input.currency, signer).await?;
        let current_allowance =
            contracts::allowance(&self.rpc, input.currency, signer, self.addresses.exchange)
                .await?;
        let nonces = self.user_bid_ask_nonces(signer).await?;

        debug!(
            currency = %input.currency,
            bid_nonce = %nonces.bid_nonce,
            balance = %balance,
            allowance = %current_allowance,
            "Prepared maker bid"
        );

        Ok(CreateMakerBidOutput {
            maker: Maker::from_input(input, QuoteType::Bid, nonces.bid_nonce, signer),
            is_currency_approved: current_allowance >= input.price,
            is_balance_sufficient: balance >= input.price,
        })
    }

    /// Prepare a bid on any item of the collection.
    pub async fn create_maker_collection_offer(
        &self,
        input: &CreateMakerInput,
    ) -> Result<CreateMakerBidOutput> {
        let offer = CreateMakerInput {
            strategy_id: StrategyType::Collection,
            item_ids: Vec::new(),
            ..input.clone()
        };
        self.create_maker_bid(&offer).await
    }

    /// `setApprovalForAll(transferManager, approved)` on the collection.
    pub async fn approve_all_collection_items(
        &self,
        collection: Address,
        approved: bool,
    ) -> Result<B256> {
        let input =
            contracts::encode_set_approval_for_all(self.addresses.transfer_manager, approved);
        let tx_hash = self.send(collection, input).await?;
        info!(tx_hash = %tx_hash, collection = %collection, approved, "Collection approval sent");
        Ok(tx_hash)
    }

    /// Whitelist the exchange as an operator on the transfer manager.
    pub async fn grant_transfer_manager_approval(&self) -> Result<B256> {
        let input = contracts::encode_grant_approvals(vec![self.addresses.exchange]);
        let tx_hash = self.send(self.addresses.transfer_manager, input).await?;
        info!(tx_hash = %tx_hash, "Transfer manager approval sent");
        Ok(tx_hash)
    }

    /// Approve the exchange to spend `amount` of `currency`.
    pub async fn approve_erc20(&self, currency: Address, amount: U256) -> Result<B256> {
        let input = contracts::encode_approve(self.addresses.exchange, amount);
        let tx_hash = self.send(currency, input).await?;
        info!(tx_hash = %tx_hash, currency = %currency, amount = %amount, "ERC-20 approval sent");
        Ok(tx_hash)
    }

    /// Block until `tx_hash` is mined successfully.
    pub async fn wait_for_transaction(&self, tx_hash: B256) -> Result<TransactionReceipt> {
        transactions::wait_for_receipt(&self.rpc, tx_hash, self.confirmation).await
    }

    /// Sign one maker order.
    pub async fn sign_maker_order(&self, maker: &Maker) -> Result<String> {
        self.signer.sign_maker_order(maker).await
    }

    /// Sign several maker orders with one signature over their Merkle root.
    pub async fn sign_multiple_maker_orders(
        &self,
        maker_orders: Vec<Maker>,
    ) -> Result<SignMerkleTreeOutput> {
        self.signer.sign_multiple_maker_orders(maker_orders).await
    }

    async fn user_bid_ask_nonces(&self, user: Address) -> Result<UserBidAskNonces> {
        contracts::user_bid_ask_nonces(&self.rpc, self.addresses.exchange, user).await
    }

    async fn send(&self, to: Address, input: alloy_primitives::Bytes) -> Result<B256> {
        transactions::send_call(&self.rpc, self.signer.inner(), self.chain_id, to, input).await
    }
}
