//! Configuration management for the maker batch tool.

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{bail, Context, Result};
use looksrare_core::api::ConfirmationPolicy;
use looksrare_core::signing::ChainId;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Public Goerli endpoint used when `RPC_URL` is unset.
pub const DEFAULT_RPC_URL: &str = "https://rpc.ankr.com/eth_goerli";

/// Directory the signed orders are written to.
pub const DEFAULT_ORDERS_DIR: &str = "./orders";

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// Wallet that signs orders and sends approvals.
    pub signer: PrivateKeySigner,
    pub chain: ChainId,
    pub rpc_url: String,
    pub orders_dir: PathBuf,
    pub confirmation: ConfirmationPolicy,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// Only the key is mandatory; it is parsed here so a bad key fails
    /// before anything touches the network.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let private_key = lookup("WALLET_PRIVATE_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("WALLET_PRIVATE_KEY environment variable not set")?;
        let signer = PrivateKeySigner::from_str(private_key.trim().trim_start_matches("0x"))
            .context("Invalid WALLET_PRIVATE_KEY - expected 64 hex characters")?;

        let chain = match lookup("CHAIN_ID") {
            Some(raw) => {
                let id: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("CHAIN_ID is not a number: {}", raw))?;
                match ChainId::from_u64(id) {
                    Some(chain) => chain,
                    None => bail!("Unsupported CHAIN_ID {} (expected 1 or 5)", id),
                }
            }
            None => ChainId::Goerli,
        };

        let defaults = ConfirmationPolicy::default();
        let poll_interval = match lookup("CONFIRMATION_POLL_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_millis)
                .with_context(|| format!("CONFIRMATION_POLL_MS is not a number: {}", raw))?,
            None => defaults.poll_interval,
        };
        let max_attempts = match lookup("CONFIRMATION_MAX_ATTEMPTS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("CONFIRMATION_MAX_ATTEMPTS is not a number: {}", raw))?,
            None => defaults.max_attempts,
        };
        if max_attempts == 0 {
            bail!("CONFIRMATION_MAX_ATTEMPTS must be at least 1");
        }
        let confirmation = ConfirmationPolicy {
            poll_interval,
            max_attempts,
        };

        Ok(Self {
            signer,
            chain,
            rpc_url: lookup("RPC_URL").unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            orders_dir: lookup("ORDERS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ORDERS_DIR)),
            confirmation,
        })
    }

    /// Address of the configured wallet.
    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the private key in debug output
        f.debug_struct("Config")
            .field("address", &format!("{:?}", self.address()))
            .field("chain", &self.chain)
            .field("rpc_url", &self.rpc_url)
            .field("orders_dir", &self.orders_dir)
            .field("confirmation", &self.confirmation)
            .finish()
    }
}
