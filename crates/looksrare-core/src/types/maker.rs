//! Maker order types.
//!
//! A [`CreateMakerInput`] is what a caller fills in; the client turns it into
//! a [`Maker`] by adding the side, the signer and the current global nonce
//! read from the exchange.

use alloy_primitives::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use super::enums::{CollectionType, QuoteType, StrategyType};
use crate::{Error, Result};

/// Exclusive upper bound for order timestamps. Anything at or above it is
/// almost certainly a millisecond timestamp passed where seconds are expected.
pub const MAX_TIMESTAMP_SECS: u64 = 10_000_000_000;

/// Caller supplied parameters of a maker order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMakerInput {
    pub collection_type: CollectionType,
    /// Collection (ERC-721 / ERC-1155) contract.
    pub collection: Address,
    /// ERC-20 currency. Zero address means native currency (asks only).
    pub currency: Address,
    pub strategy_id: StrategyType,
    pub subset_nonce: U256,
    pub order_nonce: U256,
    /// Price in the currency's base units (wei for WETH).
    pub price: U256,
    /// Unix seconds.
    pub start_time: u64,
    /// Unix seconds.
    pub end_time: u64,
    pub item_ids: Vec<U256>,
    pub amounts: Vec<U256>,
    pub additional_parameters: Bytes,
}

impl CreateMakerInput {
    /// Reject timestamps that are not expressed in seconds.
    pub fn validate_timestamps(&self) -> Result<()> {
        if self.start_time >= MAX_TIMESTAMP_SECS || self.end_time >= MAX_TIMESTAMP_SECS {
            return Err(Error::InvalidOrder {
                message: format!(
                    "timestamps must be unix seconds (start={}, end={})",
                    self.start_time, self.end_time
                ),
            });
        }
        Ok(())
    }
}

/// A LooksRare v2 maker order, field for field the on-chain `Maker` struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maker {
    pub quote_type: QuoteType,
    pub global_nonce: U256,
    pub subset_nonce: U256,
    pub order_nonce: U256,
    pub strategy_id: StrategyType,
    pub collection_type: CollectionType,
    pub collection: Address,
    pub currency: Address,
    pub signer: Address,
    pub start_time: u64,
    pub end_time: u64,
    pub price: U256,
    pub item_ids: Vec<U256>,
    pub amounts: Vec<U256>,
    pub additional_parameters: Bytes,
}

impl Maker {
    /// Build a maker order from caller input plus the chain derived fields.
    pub fn from_input(
        input: &CreateMakerInput,
        quote_type: QuoteType,
        global_nonce: U256,
        signer: Address,
    ) -> Self {
        Self {
            quote_type,
            global_nonce,
            subset_nonce: input.subset_nonce,
            order_nonce: input.order_nonce,
            strategy_id: input.strategy_id,
            collection_type: input.collection_type,
            collection: input.collection,
            currency: input.currency,
            signer,
            start_time: input.start_time,
            end_time: input.end_time,
            price: input.price,
            item_ids: input.item_ids.clone(),
            amounts: input.amounts.clone(),
            additional_parameters: input.additional_parameters.clone(),
        }
    }
}

/// Result of preparing an ask order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMakerAskOutput {
    pub maker: Maker,
    /// The collection has granted the transfer manager `setApprovalForAll`.
    pub is_collection_approved: bool,
    /// The signer has whitelisted the exchange on the transfer manager.
    pub is_transfer_manager_approved: bool,
}

/// Result of preparing a bid order (single item or collection offer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateMakerBidOutput {
    pub maker: Maker,
    /// The exchange allowance covers the order price.
    pub is_currency_approved: bool,
    /// The signer holds at least the order price.
    pub is_balance_sufficient: bool,
}
