//! Maker Batch
//!
//! Prepares a LooksRare v2 ask and bid for the demo listing, sends the
//! approvals each one still needs, signs both with a single Merkle tree
//! signature and writes the signed bundle to disk.

pub mod config;
pub mod marketplace;
pub mod output;
pub mod run;
pub mod template;
pub mod workflows;

pub use config::Config;
pub use marketplace::Marketplace;
pub use output::{convert_maker_string, SignedBundle};
pub use run::{run_batch, run_single};
pub use workflows::{ask_workflow, bid_workflow, OfferKind};
