//! The marketplace operations the workflows depend on.
//!
//! Workflows only see this trait, so the network client can be swapped for a
//! test double.

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use looksrare_core::signing::SignMerkleTreeOutput;
use looksrare_core::types::{CreateMakerAskOutput, CreateMakerBidOutput, CreateMakerInput, Maker};
use looksrare_core::{LooksRare, Result};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Marketplace: Send + Sync {
    async fn create_maker_ask(&self, input: &CreateMakerInput) -> Result<CreateMakerAskOutput>;

    async fn create_maker_bid(&self, input: &CreateMakerInput) -> Result<CreateMakerBidOutput>;

    async fn create_maker_collection_offer(
        &self,
        input: &CreateMakerInput,
    ) -> Result<CreateMakerBidOutput>;

    /// Let the transfer manager move every item of `collection`.
    async fn approve_all_collection_items(&self, collection: Address) -> Result<B256>;

    /// Let the exchange use the transfer manager on the maker's behalf.
    async fn grant_transfer_manager_approval(&self) -> Result<B256>;

    /// Let the exchange spend `amount` of `currency`.
    async fn approve_erc20(&self, currency: Address, amount: U256) -> Result<B256>;

    /// Resolve once `tx_hash` is mined successfully.
    async fn wait_for_transaction(&self, tx_hash: B256) -> Result<()>;

    async fn sign_maker_order(&self, maker: &Maker) -> Result<String>;

    async fn sign_multiple_maker_orders(&self, makers: Vec<Maker>) -> Result<SignMerkleTreeOutput>;
}

#[async_trait]
impl Marketplace for LooksRare {
    async fn create_maker_ask(&self, input: &CreateMakerInput) -> Result<CreateMakerAskOutput> {
        LooksRare::create_maker_ask(self, input).await
    }

    async fn create_maker_bid(&self, input: &CreateMakerInput) -> Result<CreateMakerBidOutput> {
        LooksRare::create_maker_bid(self, input).await
    }

    async fn create_maker_collection_offer(
        &self,
        input: &CreateMakerInput,
    ) -> Result<CreateMakerBidOutput> {
        LooksRare::create_maker_collection_offer(self, input).await
    }

    async fn approve_all_collection_items(&self, collection: Address) -> Result<B256> {
        LooksRare::approve_all_collection_items(self, collection, true).await
    }

    async fn grant_transfer_manager_approval(&self) -> Result<B256> {
        LooksRare::grant_transfer_manager_approval(self).await
    }

    async fn approve_erc20(&self, currency: Address, amount: U256) -> Result<B256> {
        LooksRare::approve_erc20(self, currency, amount).await
    }

    async fn wait_for_transaction(&self, tx_hash: B256) -> Result<()> {
        LooksRare::wait_for_transaction(self, tx_hash).await.map(|_| ())
    }

    async fn sign_maker_order(&self, maker: &Maker) -> Result<String> {
        LooksRare::sign_maker_order(self, maker).await
    }

    async fn sign_multiple_maker_orders(&self, makers: Vec<Maker>) -> Result<SignMerkleTreeOutput> {
        LooksRare::sign_multiple_maker_orders(self, makers).await
    }
}
