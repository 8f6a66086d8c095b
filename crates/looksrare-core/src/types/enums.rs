//! Protocol enumerations.
//!
//! All of them travel as plain integers, both on-chain (`uint8` / `uint256`)
//! and in the JSON written for off-chain consumers.

use serde::{Deserialize, Serialize};

/// Side of a maker order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum QuoteType {
    /// Offer to buy.
    #[default]
    Bid = 0,
    /// Listing to sell.
    Ask = 1,
}

/// Token standard of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CollectionType {
    #[default]
    Erc721 = 0,
    Erc1155 = 1,
}

/// Execution strategy of a maker order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum StrategyType {
    /// Fixed price for the listed item ids.
    #[default]
    Standard = 0,
    /// Bid on any item of the collection.
    Collection = 1,
    /// Bid on any item whose id is part of a Merkle root.
    CollectionWithMerkleTree = 2,
}

impl From<QuoteType> for u8 {
    fn from(value: QuoteType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for QuoteType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(QuoteType::Bid),
            1 => Ok(QuoteType::Ask),
            other => Err(format!("unknown quote type {}", other)),
        }
    }
}

impl From<CollectionType> for u8 {
    fn from(value: CollectionType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for CollectionType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CollectionType::Erc721),
            1 => Ok(CollectionType::Erc1155),
            other => Err(format!("unknown collection type {}", other)),
        }
    }
}

impl From<StrategyType> for u8 {
    fn from(value: StrategyType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for StrategyType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(StrategyType::Standard),
            1 => Ok(StrategyType::Collection),
            2 => Ok(StrategyType::CollectionWithMerkleTree),
            other => Err(format!("unknown strategy {}", other)),
        }
    }
}

impl std::fmt::Display for QuoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteType::Bid => write!(f, "BID"),
            QuoteType::Ask => write!(f, "ASK"),
        }
    }
}
