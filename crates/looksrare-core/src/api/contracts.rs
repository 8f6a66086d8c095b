//! Contract bindings used by the LooksRare client.
//!
//! Calldata is encoded from `sol!` interfaces; the few view functions we read
//! return static words, decoded here directly.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};

use super::rpc::RpcClient;
use crate::{Error, Result};

sol! {
    /// ERC-721 and ERC-1155 share the operator approval interface.
    interface ICollection {
        function isApprovedForAll(address owner, address operator) external view returns (bool);
        function setApprovalForAll(address operator, bool approved) external;
    }

    interface IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    interface ITransferManager {
        function hasUserApprovedOperator(address user, address operator) external view returns (bool);
        function grantApprovals(address[] operators) external;
    }

    interface ILooksRareProtocol {
        function userBidAskNonces(address user) external view returns (uint256 bidNonce, uint256 askNonce);
    }
}

/// Global nonces of a user on the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UserBidAskNonces {
    pub bid_nonce: U256,
    pub ask_nonce: U256,
}

/// Calldata for `setApprovalForAll(operator, approved)`.
pub fn encode_set_approval_for_all(operator: Address, approved: bool) -> Bytes {
    ICollection::setApprovalForAllCall { operator, approved }
        .abi_encode()
        .into()
}

/// Calldata for `grantApprovals(operators)`.
pub fn encode_grant_approvals(operators: Vec<Address>) -> Bytes {
    ITransferManager::grantApprovalsCall { operators }
        .abi_encode()
        .into()
}

/// Calldata for `approve(spender, amount)`.
pub fn encode_approve(spender: Address, amount: U256) -> Bytes {
    IERC20::approveCall { spender, amount }.abi_encode().into()
}

/// Whether `owner` approved `operator` on a collection.
pub async fn is_approved_for_all(
    rpc: &RpcClient,
    collection: Address,
    owner: Address,
    operator: Address,
) -> Result<bool> {
    let data = ICollection::isApprovedForAllCall { owner, operator }.abi_encode();
    let output = rpc.call(collection, data.into()).await?;
    decode_bool(&output)
}

/// Whether `user` whitelisted `operator` on the transfer manager.
pub async fn has_user_approved_operator(
    rpc: &RpcClient,
    transfer_manager: Address,
    user: Address,
    operator: Address,
) -> Result<bool> {
    let data = ITransferManager::hasUserApprovedOperatorCall { user, operator }.abi_encode();
    let output = rpc.call(transfer_manager, data.into()).await?;
    decode_bool(&output)
}

/// ERC-20 allowance granted by `owner` to `spender`.
pub async fn allowance(
    rpc: &RpcClient,
    currency: Address,
    owner: Address,
    spender: Address,
) -> Result<U256> {
    let data = IERC20::allowanceCall { owner, spender }.abi_encode();
    let output = rpc.call(currency, data.into()).await?;
    decode_word(&output, 0)
}

/// ERC-20 balance of `account`.
pub async fn balance_of(rpc: &RpcClient, currency: Address, account: Address) -> Result<U256> {
    let data = IERC20::balanceOfCall { account }.abi_encode();
    let output = rpc.call(currency, data.into()).await?;
    decode_word(&output, 0)
}

/// Current bid and ask global nonces of `user`.
pub async fn user_bid_ask_nonces(
    rpc: &RpcClient,
    exchange: Address,
    user: Address,
) -> Result<UserBidAskNonces> {
    let data = ILooksRareProtocol::userBidAskNoncesCall { user }.abi_encode();
    let output = rpc.call(exchange, data.into()).await?;
    Ok(UserBidAskNonces {
        bid_nonce: decode_word(&output, 0)?,
        ask_nonce: decode_word(&output, 1)?,
    })
}

/// Read the `index`-th 32-byte word of ABI encoded return data.
fn decode_word(output: &[u8], index: usize) -> Result<U256> {
    let start = index * 32;
    let word = output.get(start..start + 32).ok_or_else(|| {
        Error::InvalidResult(format!(
            "return data of {} bytes has no word {}",
            output.len(),
            index
        ))
    })?;
    Ok(U256::from_be_slice(word))
}

fn decode_bool(output: &[u8]) -> Result<bool> {
    let word = decode_word(output, 0)?;
    if word > U256::from(1u8) {
        return Err(Error::InvalidResult(format!("{} is not a bool", word)));
    }
    Ok(word == U256::from(1u8))
}
