//! The fixed demo listing both orders are derived from.

use alloy_primitives::{address, Address, Bytes, U256};
use looksrare_core::signing::Addresses;
use looksrare_core::types::{CollectionType, CreateMakerInput, StrategyType};

/// Goerli test collection.
pub const COLLECTION: Address = address!("77566d540d1e207dff8da205ed78750f9a1e7c55");

/// Goerli WETH.
pub const CURRENCY: Address = Addresses::GOERLI.weth;

pub const TOKEN_ID: u64 = 117;

/// Ask price, 0.21 ETH.
pub const ASK_PRICE_MILLI: u64 = 210;

/// Bid price, 0.25 ETH.
pub const BID_PRICE_MILLI: u64 = 250;

/// Orders stay valid for one day.
pub const ORDER_LIFETIME_SECS: u64 = 24 * 3600;

/// Amount in wei of `milli` thousandths of an ether.
pub fn milli_ether(milli: u64) -> U256 {
    U256::from(milli) * U256::from(1_000_000_000_000_000u64)
}

/// The base listing: token 117 of the test collection for 0.21 WETH,
/// valid from `now` for one day.
pub fn base_maker(now: u64) -> CreateMakerInput {
    CreateMakerInput {
        collection_type: CollectionType::Erc721,
        collection: COLLECTION,
        currency: CURRENCY,
        strategy_id: StrategyType::Standard,
        subset_nonce: U256::ZERO,
        order_nonce: U256::ZERO,
        price: milli_ether(ASK_PRICE_MILLI),
        start_time: now,
        end_time: now + ORDER_LIFETIME_SECS,
        item_ids: vec![U256::from(TOKEN_ID)],
        amounts: vec![U256::from(1u64)],
        additional_parameters: Bytes::new(),
    }
}

/// The bid side: same listing priced at 0.25 WETH.
pub fn bid_maker(now: u64) -> CreateMakerInput {
    CreateMakerInput {
        price: milli_ether(BID_PRICE_MILLI),
        ..base_maker(now)
    }
}
