//! Maker Batch
//!
//! Signs a LooksRare v2 ask and collection offer as one Merkle tree batch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use looksrare_core::LooksRare;
use maker_batch::{run_batch, run_single, Config, OfferKind};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "maker-batch", about = "Approve and batch-sign LooksRare v2 maker orders")]
struct Cli {
    /// Output directory (overrides ORDERS_DIR)
    #[arg(long, global = true)]
    orders_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Sign an ask and a bid in one Merkle tree (default)
    Batch {
        /// Kind of bid to place next to the ask
        #[arg(long, value_enum, default_value_t = OfferKind::Collection)]
        offer: OfferKind,
    },
    /// Sign the ask alone
    Single,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "maker_batch=info,looksrare_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(dir) = cli.orders_dir {
        config.orders_dir = dir;
    }

    info!(
        address = %config.address(),
        chain = %config.chain,
        rpc_url = %config.rpc_url,
        "Starting maker batch"
    );

    let client = LooksRare::new(config.chain, config.rpc_url.clone(), config.signer.clone())
        .context("Failed to build LooksRare client")?
        .with_confirmation(config.confirmation);

    let now = chrono::Utc::now().timestamp().max(0) as u64;

    match cli.command.unwrap_or(Command::Batch {
        offer: OfferKind::default(),
    }) {
        Command::Batch { offer } => {
            let (path, _) = run_batch(&client, now, offer, &config.orders_dir).await?;
            info!(path = %path.display(), "Done");
        }
        Command::Single => {
            let (path, _) = run_single(&client, now, &config.orders_dir).await?;
            info!(path = %path.display(), "Done");
        }
    }

    Ok(())
}
