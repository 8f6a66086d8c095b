//! EIP-712 domain and deployed contract addresses for LooksRare v2.
//!
//! Maker orders are signed against the `LooksRareProtocol` domain of the
//! exchange contract on the target chain.

use alloy_primitives::{address, Address, B256, U256};
use alloy_sol_types::SolValue;

/// Chains the protocol is deployed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainId {
    Mainnet = 1,
    Goerli = 5,
}

impl ChainId {
    /// Numeric EIP-155 chain id.
    pub fn as_u64(&self) -> u64 {
        *self as u64
    }

    /// Look up a supported chain by its numeric id.
    pub fn from_u64(id: u64) -> Option<Self> {
        match id {
            1 => Some(ChainId::Mainnet),
            5 => Some(ChainId::Goerli),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChainId::Mainnet => write!(f, "mainnet"),
            ChainId::Goerli => write!(f, "goerli"),
        }
    }
}

/// Protocol contracts on one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addresses {
    /// `LooksRareProtocol` exchange.
    pub exchange: Address,
    /// `TransferManager` moving NFTs on behalf of makers.
    pub transfer_manager: Address,
    /// Wrapped native currency used for bids.
    pub weth: Address,
}

impl Addresses {
    pub const MAINNET: Self = Self {
        exchange: address!("0000000000e655fae4d56241588680f86e3b2377"),
        transfer_manager: address!("000000000060c4ca14cfc4325359062ace33fe3d"),
        weth: address!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
    };

    pub const GOERLI: Self = Self {
        exchange: address!("35c2215f2ffe8917b06454eeeaba189877f200cf"),
        transfer_manager: address!("c20e0cead98abbbeb626b77efb8dc1e5d781f90c"),
        weth: address!("b4fbf271143f4fbf7b91a5ded31805e42b2208d6"),
    };

    pub fn for_chain(chain: ChainId) -> Self {
        match chain {
            ChainId::Mainnet => Self::MAINNET,
            ChainId::Goerli => Self::GOERLI,
        }
    }
}

/// EIP-712 domain separator for order signing.
#[derive(Debug, Clone)]
pub struct Eip712Domain {
    /// Domain name.
    pub name: String,
    /// Domain version.
    pub version: String,
    /// Chain ID.
    pub chain_id: U256,
    /// Verifying contract address.
    pub verifying_contract: Address,
}

impl Eip712Domain {
    /// Domain of the LooksRare v2 exchange deployed at `exchange`.
    pub fn looksrare(chain_id: u64, exchange: Address) -> Self {
        Self {
            name: "LooksRareProtocol".to_string(),
            version: "2".to_string(),
            chain_id: U256::from(chain_id),
            verifying_contract: exchange,
        }
    }

    /// Domain for a supported chain with its canonical exchange.
    pub fn for_chain(chain: ChainId) -> Self {
        Self::looksrare(chain.as_u64(), Addresses::for_chain(chain).exchange)
    }

    /// Compute the EIP-712 domain separator hash.
    pub fn separator(&self) -> B256 {
        let domain_type_hash = alloy_primitives::keccak256(
            b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)",
        );

        let name_hash = alloy_primitives::keccak256(self.name.as_bytes());
        let version_hash = alloy_primitives::keccak256(self.version.as_bytes());

        // Every member is one 32-byte word, so packed encoding equals abi.encode.
        let encoded = (
            domain_type_hash,
            name_hash,
            version_hash,
            self.chain_id,
            B256::left_padding_from(self.verifying_contract.as_slice()),
        )
            .abi_encode_packed();

        alloy_primitives::keccak256(&encoded)
    }
}
