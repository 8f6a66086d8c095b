//! Maker order signing.
//!
//! Single orders are signed as EIP-712 `Maker` structs; batches are signed
//! once over the Merkle root of their `BatchOrder` tree.

use alloy_primitives::{Address, B256};
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use serde::{Deserialize, Serialize};

use super::domain::Eip712Domain;
use super::maker_types::typed_data_hash;
use super::merkle::{MakerMerkleTree, MerkleTree};
use crate::types::Maker;
use crate::{Error, Result};

/// Output of batch signing: one signature for every order in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignMerkleTreeOutput {
    /// Hex encoded 65-byte signature over the `BatchOrder` digest.
    pub signature: String,
    /// Inclusion proof of each order, same order as `maker_orders`.
    pub merkle_tree_proofs: Vec<MerkleTree>,
    /// The signed orders, in leaf order.
    pub maker_orders: Vec<Maker>,
}

/// Order signer bound to one exchange domain.
#[derive(Clone)]
pub struct OrderSigner {
    signer: PrivateKeySigner,
    domain: Eip712Domain,
}

impl OrderSigner {
    pub fn new(signer: PrivateKeySigner, domain: Eip712Domain) -> Self {
        Self { signer, domain }
    }

    /// Get the signer's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// Underlying key, used for transaction signing.
    pub fn inner(&self) -> &PrivateKeySigner {
        &self.signer
    }

    /// Sign a single maker order.
    pub async fn sign_maker_order(&self, maker: &Maker) -> Result<String> {
        self.sign_digest(maker.struct_hash()).await
    }

    /// Sign a batch of maker orders with one signature over their Merkle root.
    pub async fn sign_multiple_maker_orders(
        &self,
        maker_orders: Vec<Maker>,
    ) -> Result<SignMerkleTreeOutput> {
        let tree = MakerMerkleTree::new(maker_orders)?;
        let signature = self.sign_digest(tree.struct_hash()).await?;
        let merkle_tree_proofs = tree.proofs();

        Ok(SignMerkleTreeOutput {
            signature,
            merkle_tree_proofs,
            maker_orders: tree.into_maker_orders(),
        })
    }

    async fn sign_digest(&self, struct_hash: B256) -> Result<String> {
        let digest = typed_data_hash(self.domain.separator(), struct_hash);

        let signature = self
            .signer
            .sign_hash(&digest)
            .await
            .map_err(|e| Error::Signing {
                message: e.to_string(),
            })?;

        Ok(format!("0x{}", hex::encode(signature.as_bytes())))
    }
}

impl std::fmt::Debug for OrderSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderSigner")
            .field("address", &format!("{:?}", self.address()))
            .field("domain", &self.domain.name)
            .finish()
    }
}
