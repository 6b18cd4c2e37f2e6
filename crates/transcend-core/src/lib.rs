//! Transcend ledger core types
//!
//! This crate implements the domain model shared by the ledger history
//! scanner: event kinds, raw and normalized activity records, decimal unit
//! formatting, and the known-asset symbol table.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assets;
pub mod records;
pub mod units;

pub use assets::{AssetTable, FALLBACK_SYMBOL, MIXED_SYMBOL};
pub use records::{EventKind, HistoryEntry, RawField, RawRecord, UNSPECIFIED_AMOUNT};
pub use units::{format_units, NATIVE_DECIMALS};
