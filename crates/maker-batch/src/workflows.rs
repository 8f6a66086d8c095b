//! Ask and bid workflows.
//!
//! Each workflow prepares one maker order and sends whatever approval
//! transactions it still lacks, waiting for every approval to be mined before
//! moving on.

use anyhow::{Context, Result};
use looksrare_core::types::{CreateMakerInput, Maker};
use tracing::{info, warn};

use crate::marketplace::Marketplace;

/// Which kind of bid to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OfferKind {
    /// Bid on the listed item ids only.
    SingleItem,
    /// Bid on any item of the collection.
    #[default]
    Collection,
}

impl std::fmt::Display for OfferKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferKind::SingleItem => write!(f, "single-item"),
            OfferKind::Collection => write!(f, "collection"),
        }
    }
}

/// Prepare an ask, approving the collection and the transfer manager first
/// when needed (in that order).
pub async fn ask_workflow<M>(market: &M, input: &CreateMakerInput) -> Result<Maker>
where
    M: Marketplace + ?Sized,
{
    let output = market
        .create_maker_ask(input)
        .await
        .context("Failed to create maker ask")?;

    if !output.is_collection_approved {
        warn!(
            collection = %output.maker.collection,
            "Collection not approved yet, approving..."
        );
        let tx_hash = market
            .approve_all_collection_items(output.maker.collection)
            .await
            .context("Failed to approve collection items")?;
        market
            .wait_for_transaction(tx_hash)
            .await
            .context("Collection approval was not confirmed")?;
        info!(tx_hash = %tx_hash, "Collection approved");
    }

    if !output.is_transfer_manager_approved {
        warn!("Signer has not approved the transfer manager, approving...");
        let tx_hash = market
            .grant_transfer_manager_approval()
            .await
            .context("Failed to grant transfer manager approval")?;
        market
            .wait_for_transaction(tx_hash)
            .await
            .context("Transfer manager approval was not confirmed")?;
        info!(tx_hash = %tx_hash, "Transfer manager approved");
    }

    Ok(output.maker)
}

/// Prepare a bid of the given kind, raising the currency allowance to the
/// order price when it falls short.
pub async fn bid_workflow<M>(market: &M, input: &CreateMakerInput, kind: OfferKind) -> Result<Maker>
where
    M: Marketplace + ?Sized,
{
    let output = match kind {
        OfferKind::SingleItem => market.create_maker_bid(input).await,
        OfferKind::Collection => market.create_maker_collection_offer(input).await,
    }
    .with_context(|| format!("Failed to create {} maker bid", kind))?;

    if !output.is_balance_sufficient {
        warn!(
            currency = %output.maker.currency,
            price = %output.maker.price,
            "Currency balance is below the bid price; the order cannot be filled until topped up"
        );
    }

    if !output.is_currency_approved {
        warn!(
            currency = %output.maker.currency,
            amount = %output.maker.price,
            "Not enough ERC20 allowance, allowing more..."
        );
        let tx_hash = market
            .approve_erc20(output.maker.currency, output.maker.price)
            .await
            .context("Failed to approve currency")?;
        market
            .wait_for_transaction(tx_hash)
            .await
            .context("Currency approval was not confirmed")?;
        info!(tx_hash = %tx_hash, "Currency approved");
    }

    Ok(output.maker)
}
