//! Raw and normalized activity records
//!
//! A scan produces `RawRecord`s straight off the event log, one per matched
//! log entry. The normalizer consumes them exactly once and emits one
//! `HistoryEntry` per raw record, the stable shape the presentation layer
//! renders.

use alloy_primitives::{Address, B256, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel rendered for entries without a single well-defined amount
pub const UNSPECIFIED_AMOUNT: &str = "-";

/// Payload field names shared by the event decoder and the normalizer
pub mod fields {
    /// Recipient count of a batch send or payroll run
    pub const TOTAL_RECIPIENTS: &str = "totalRecipients";
    /// Total native value moved by a batch send
    pub const TOTAL_NATIVE_SENT: &str = "totalNativeSent";
    /// Total ERC-20 value moved by a batch send
    pub const TOTAL_ERC20_SENT: &str = "totalERC20Sent";
    /// Token address of a deposit or withdrawal
    pub const TOKEN: &str = "token";
    /// Amount of a deposit or withdrawal
    pub const AMOUNT: &str = "amount";
}

/// Financial event categories tracked by the product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// Outbound batch send from the community multi-send contract
    CommunitySend,
    /// Deposit into the enterprise treasury
    TreasuryDeposit,
    /// Payroll run executed from the enterprise treasury
    PayrollRun,
    /// Withdrawal from the enterprise treasury
    TreasuryWithdraw,
}

impl EventKind {
    /// All kinds the scanner cares about, in declaration order
    pub const ALL: [EventKind; 4] = [
        EventKind::CommunitySend,
        EventKind::TreasuryDeposit,
        EventKind::PayrollRun,
        EventKind::TreasuryWithdraw,
    ];

    /// Short badge label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::CommunitySend => "Transfer",
            Self::TreasuryDeposit => "Deposit",
            Self::PayrollRun => "Payroll",
            Self::TreasuryWithdraw => "Withdraw",
        }
    }
}

/// One decoded payload field of a raw log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawField {
    /// Unsigned 256-bit quantity
    Uint(U256),
    /// 20-byte account or token address
    Address(Address),
}

/// An unprocessed event-log match, tagged with its originating kind
///
/// `fields` holds the kind-specific payload as emitted by the source
/// (recipient counts, amounts, token addresses). Missing or mistyped fields
/// are tolerated; the normalizer substitutes defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Transaction hash of the emitting transaction
    pub tx_hash: B256,
    /// Block the log was emitted in
    pub block_number: u64,
    /// Position of the log within its block
    pub log_index: u64,
    /// Originating event kind
    pub kind: EventKind,
    /// Kind-specific payload fields
    pub fields: HashMap<String, RawField>,
}

impl RawRecord {
    /// Create a record with an empty payload
    pub fn new(tx_hash: B256, block_number: u64, log_index: u64, kind: EventKind) -> Self {
        Self {
            tx_hash,
            block_number,
            log_index,
            kind,
            fields: HashMap::new(),
        }
    }

    /// Attach a payload field (builder style)
    pub fn with_field(mut self, name: impl Into<String>, value: RawField) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Read a uint payload field, if present and of the right shape
    pub fn uint_field(&self, name: &str) -> Option<U256> {
        match self.fields.get(name) {
            Some(RawField::Uint(v)) => Some(*v),
            _ => None,
        }
    }

    /// Read an address payload field, if present and of the right shape
    pub fn address_field(&self, name: &str) -> Option<Address> {
        match self.fields.get(name) {
            Some(RawField::Address(a)) => Some(*a),
            _ => None,
        }
    }
}

/// One normalized, consumer-facing activity record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Transaction hash of the emitting transaction
    pub tx_hash: B256,
    /// Block the event was emitted in
    pub block_number: u64,
    /// Position of the log within its block (sort tie-break)
    pub log_index: u64,
    /// Event kind
    pub kind: EventKind,
    /// Short human description, e.g. "Payroll to 12 employees"
    pub description: String,
    /// Decimal-scaled amount; `None` when no single amount is well-defined
    pub amount: Option<String>,
    /// Resolved asset ticker, never empty
    pub asset_symbol: String,
    /// Wall-clock time of the containing block
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Amount string for display, with the unspecified sentinel applied
    pub fn amount_display(&self) -> &str {
        self.amount.as_deref().unwrap_or(UNSPECIFIED_AMOUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(EventKind::CommunitySend.label(), "Transfer");
        assert_eq!(EventKind::TreasuryDeposit.label(), "Deposit");
        assert_eq!(EventKind::PayrollRun.label(), "Payroll");
        assert_eq!(EventKind::TreasuryWithdraw.label(), "Withdraw");
    }

    #[test]
    fn test_field_access() {
        let record = RawRecord::new(B256::ZERO, 10, 0, EventKind::TreasuryDeposit)
            .with_field("amount", RawField::Uint(U256::from(7u64)))
            .with_field("token", RawField::Address(Address::ZERO));

        assert_eq!(record.uint_field("amount"), Some(U256::from(7u64)));
        assert_eq!(record.address_field("token"), Some(Address::ZERO));
        // Wrong shape and absent names both read as missing
        assert_eq!(record.uint_field("token"), None);
        assert_eq!(record.address_field("missing"), None);
    }

    #[test]
    fn test_amount_display_sentinel() {
        let entry = HistoryEntry {
            tx_hash: B256::ZERO,
            block_number: 1,
            log_index: 0,
            kind: EventKind::PayrollRun,
            description: "Payroll to 3 employees".to_string(),
            amount: None,
            asset_symbol: "Mixed".to_string(),
            timestamp: DateTime::UNIX_EPOCH,
        };
        assert_eq!(entry.amount_display(), UNSPECIFIED_AMOUNT);
    }
}
