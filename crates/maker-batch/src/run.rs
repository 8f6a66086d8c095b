//! End to end runs: prepare orders, sign them, write the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use crate::marketplace::Marketplace;
use crate::output::{single_order_record, write_json, SignedBundle, SINGLE_FILE, TREE_FILE};
use crate::template::{base_maker, bid_maker};
use crate::workflows::{ask_workflow, bid_workflow, OfferKind};

/// Prepare the ask and the bid, sign both in one Merkle tree and write
/// `tree.json` under `orders_dir`.
pub async fn run_batch<M>(
    market: &M,
    now: u64,
    offer: OfferKind,
    orders_dir: &Path,
) -> Result<(PathBuf, SignedBundle)>
where
    M: Marketplace + ?Sized,
{
    let ask = ask_workflow(market, &base_maker(now))
        .await
        .context("Ask workflow failed")?;
    info!(price = %ask.price, "Maker ask ready");

    let bid = bid_workflow(market, &bid_maker(now), offer)
        .await
        .context("Bid workflow failed")?;
    info!(price = %bid.price, offer = %offer, "Maker bid ready");

    let output = market
        .sign_multiple_maker_orders(vec![ask, bid])
        .await
        .context("Failed to sign order batch")?;
    let bundle = SignedBundle::from_output(output)?;

    let path = orders_dir.join(TREE_FILE);
    write_json(&path, &bundle)?;
    info!(
        path = %path.display(),
        orders = bundle.maker_orders.len(),
        "Signed order batch written"
    );

    Ok((path, bundle))
}

/// Prepare the ask alone, sign it as a plain EIP-712 order and write
/// `single.json` under `orders_dir`.
pub async fn run_single<M>(market: &M, now: u64, orders_dir: &Path) -> Result<(PathBuf, Value)>
where
    M: Marketplace + ?Sized,
{
    let ask = ask_workflow(market, &base_maker(now))
        .await
        .context("Ask workflow failed")?;

    let signature = market
        .sign_maker_order(&ask)
        .await
        .context("Failed to sign maker ask")?;
    let record = single_order_record(&ask, &signature)?;

    let path = orders_dir.join(SINGLE_FILE);
    write_json(&path, &record)?;
    info!(path = %path.display(), "Signed order written");

    Ok((path, record))
}
