//! EIP-712 encoding of maker orders.
//!
//! The typed struct mirrors `OrderStructs.Maker` of the LooksRare v2
//! contracts; enums are encoded as their integer discriminants.

use alloy_primitives::{B256, U256};
use alloy_sol_types::SolStruct;

use crate::types::Maker;

pub(crate) mod typed {
    alloy_sol_types::sol! {
        #[derive(Debug, PartialEq, Eq)]
        struct Maker {
            uint8 quoteType;
            uint256 globalNonce;
            uint256 subsetNonce;
            uint256 orderNonce;
            uint256 strategyId;
            uint8 collectionType;
            address collection;
            address currency;
            address signer;
            uint256 startTime;
            uint256 endTime;
            uint256 price;
            uint256[] itemIds;
            uint256[] amounts;
            bytes additionalParameters;
        }
    }
}

impl From<&Maker> for typed::Maker {
    fn from(maker: &Maker) -> Self {
        Self {
            quoteType: maker.quote_type.into(),
            globalNonce: maker.global_nonce,
            subsetNonce: maker.subset_nonce,
            orderNonce: maker.order_nonce,
            strategyId: U256::from(u8::from(maker.strategy_id)),
            collectionType: maker.collection_type.into(),
            collection: maker.collection,
            currency: maker.currency,
            signer: maker.signer,
            startTime: U256::from(maker.start_time),
            endTime: U256::from(maker.end_time),
            price: maker.price,
            itemIds: maker.item_ids.clone(),
            amounts: maker.amounts.clone(),
            additionalParameters: maker.additional_parameters.clone(),
        }
    }
}

/// Canonical EIP-712 type string of `Maker`.
pub fn maker_type_string() -> String {
    typed::Maker::eip712_encode_type().into_owned()
}

impl Maker {
    /// EIP-712 `hashStruct(Maker)`, the leaf value of batch trees.
    pub fn struct_hash(&self) -> B256 {
        typed::Maker::from(self).eip712_hash_struct()
    }
}

/// Compute the EIP-712 typed data hash.
pub fn typed_data_hash(domain_separator: B256, struct_hash: B256) -> B256 {
    let mut data = [0u8; 66];
    data[0] = 0x19;
    data[1] = 0x01;
    data[2..34].copy_from_slice(domain_separator.as_slice());
    data[34..66].copy_from_slice(struct_hash.as_slice());
    alloy_primitives::keccak256(data)
}
