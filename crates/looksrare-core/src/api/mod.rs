//! JSON-RPC access to the chain: reads, contract bindings and transactions.

pub mod contracts;
pub mod rpc;
pub mod transactions;

#[cfg(test)]
pub(crate) mod stub_node;

pub use rpc::{RpcClient, TransactionReceipt};
pub use transactions::ConfirmationPolicy;
