//! Transcend network definitions

use alloy_primitives::{address, Address, B256};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Network type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NetworkType {
    /// Lisk Sepolia testnet (current deployment target)
    LiskSepolia,
    /// Local development chain
    Devnet,
}

/// Network configuration
#[derive(Debug, Clone)]
pub struct Network {
    /// Network type
    pub network_type: NetworkType,
    /// Human-readable name
    pub name: &'static str,
    /// EVM chain id
    pub chain_id: u64,
    /// Native coin ticker
    pub native_symbol: &'static str,
    /// Default JSON-RPC endpoint
    pub rpc_url: &'static str,
    /// Block explorer base URL (no trailing slash)
    pub explorer_url: &'static str,
    /// Community multi-send contract
    pub multi_send_contract: Address,
    /// Enterprise treasury contract (deposits, payroll, withdrawals)
    pub treasury_contract: Address,
    /// Known ERC-20 tokens and their tickers
    pub known_tokens: &'static [(Address, &'static str)],
    /// Block-range granularity for one log query
    pub scan_window_size: u64,
    /// Maximum historical depth reconstructed by a scan, in blocks
    pub max_history_blocks: u64,
}

/// Tokens whitelisted on Lisk Sepolia
const LISK_SEPOLIA_TOKENS: &[(Address, &'static str)] = &[
    (
        address!("69a58006574BBf7032afb321341661Db8754d21b"), // mock USDT
        "USDT",
    ),
    (
        address!("b2Bc5e9cd746177f86c2B2d79B2BD3be41fA9C7d"), // mock DAI
        "DAI",
    ),
];

impl Network {
    /// Get Lisk Sepolia parameters
    pub const fn lisk_sepolia() -> Self {
        Self {
            network_type: NetworkType::LiskSepolia,
            name: "lisk-sepolia",
            chain_id: 4202,
            native_symbol: "LSK",
            rpc_url: "https://rpc.sepolia-api.lisk.com",
            explorer_url: "https://sepolia-blockscout.lisk.com",
            multi_send_contract: address!("57472feF0B62745862F81E8020e17e94bCcA335b"),
            treasury_contract: address!("8Ba0f3482cD11Af5ce8a08048b22b05E88a67Ea3"),
            known_tokens: LISK_SEPOLIA_TOKENS,
            scan_window_size: 40_000,
            max_history_blocks: 500_000,
        }
    }

    /// Get local devnet parameters
    pub const fn devnet() -> Self {
        Self {
            network_type: NetworkType::Devnet,
            name: "devnet",
            chain_id: 31_337,
            native_symbol: "ETH",
            rpc_url: "http://127.0.0.1:8545",
            explorer_url: "http://127.0.0.1:4000",
            multi_send_contract: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            treasury_contract: address!("e7f1725E7734CE288F8367e1Bb143E90bb3F0512"),
            known_tokens: &[],
            scan_window_size: 2_000,
            max_history_blocks: 50_000,
        }
    }

    /// Get network by type
    pub const fn from_type(network_type: NetworkType) -> Self {
        match network_type {
            NetworkType::LiskSepolia => Self::lisk_sepolia(),
            NetworkType::Devnet => Self::devnet(),
        }
    }

    /// Look up a network by its name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "lisk-sepolia" => Ok(Self::lisk_sepolia()),
            "devnet" => Ok(Self::devnet()),
            other => Err(Error::InvalidNetwork(other.to_string())),
        }
    }

    /// Explorer URL for a transaction hash
    pub fn explorer_tx_url(&self, tx_hash: B256) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }
}
