//! Transcend network parameters and constants
//!
//! This crate provides network-specific constants for the Transcend protocol:
//! contract addresses, known token addresses, explorer URLs, and the default
//! scan depth used by the ledger history scanner.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod network;

pub use network::{Network, NetworkType};

/// Error types for parameter operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid network specified
    #[error("Invalid network: {0}")]
    InvalidNetwork(String),
}

/// Result type for parameter operations
pub type Result<T> = std::result::Result<T, Error>;
