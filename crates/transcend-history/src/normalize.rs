//! Record normalization
//!
//! Maps each raw, kind-tagged record into the unified history shape. Kind
//! dispatch goes through a per-variant rule table: adding an event kind means
//! adding a variant and its rule, nothing else. Missing or mistyped payload
//! fields degrade to zero/empty values; a record is never dropped here.

use crate::source::LogSource;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::warn;
use transcend_core::records::fields;
use transcend_core::{
    format_units, AssetTable, EventKind, HistoryEntry, RawRecord, MIXED_SYMBOL, NATIVE_DECIMALS,
};

/// Normalization rule for one event kind
struct KindRule {
    describe: fn(&RawRecord) -> String,
    amount: fn(&RawRecord) -> Option<String>,
    asset: fn(&RawRecord, &AssetTable) -> String,
}

const COMMUNITY_SEND_RULE: KindRule = KindRule {
    describe: describe_community_send,
    amount: amount_native_sent,
    asset: asset_native,
};

const TREASURY_DEPOSIT_RULE: KindRule = KindRule {
    describe: describe_deposit,
    amount: amount_token,
    asset: asset_token,
};

const PAYROLL_RUN_RULE: KindRule = KindRule {
    describe: describe_payroll,
    amount: amount_unspecified,
    asset: asset_mixed,
};

const TREASURY_WITHDRAW_RULE: KindRule = KindRule {
    describe: describe_withdraw,
    amount: amount_token,
    asset: asset_token,
};

fn rule_for(kind: EventKind) -> &'static KindRule {
    match kind {
        EventKind::CommunitySend => &COMMUNITY_SEND_RULE,
        EventKind::TreasuryDeposit => &TREASURY_DEPOSIT_RULE,
        EventKind::PayrollRun => &PAYROLL_RUN_RULE,
        EventKind::TreasuryWithdraw => &TREASURY_WITHDRAW_RULE,
    }
}

fn describe_community_send(raw: &RawRecord) -> String {
    let recipients = raw.uint_field(fields::TOTAL_RECIPIENTS).unwrap_or_default();
    format!("Sent to {recipients} recipients")
}

fn describe_deposit(_raw: &RawRecord) -> String {
    "Deposit to Treasury".to_string()
}

fn describe_payroll(raw: &RawRecord) -> String {
    let recipients = raw.uint_field(fields::TOTAL_RECIPIENTS).unwrap_or_default();
    format!("Payroll to {recipients} employees")
}

fn describe_withdraw(_raw: &RawRecord) -> String {
    "Withdraw from Treasury".to_string()
}

fn amount_native_sent(raw: &RawRecord) -> Option<String> {
    let value = raw.uint_field(fields::TOTAL_NATIVE_SENT).unwrap_or_default();
    Some(format_units(value, NATIVE_DECIMALS))
}

fn amount_token(raw: &RawRecord) -> Option<String> {
    let value = raw.uint_field(fields::AMOUNT).unwrap_or_default();
    Some(format_units(value, NATIVE_DECIMALS))
}

fn amount_unspecified(_raw: &RawRecord) -> Option<String> {
    None
}

fn asset_native(_raw: &RawRecord, assets: &AssetTable) -> String {
    assets.native().to_string()
}

fn asset_token(raw: &RawRecord, assets: &AssetTable) -> String {
    match raw.address_field(fields::TOKEN) {
        Some(token) => assets.symbol_for(token).to_string(),
        None => transcend_core::FALLBACK_SYMBOL.to_string(),
    }
}

fn asset_mixed(_raw: &RawRecord, _assets: &AssetTable) -> String {
    MIXED_SYMBOL.to_string()
}

/// Normalize a batch of raw records into history entries
///
/// Timestamps are resolved through the source once per distinct block number,
/// concurrently; records sharing a block share one lookup. A failed lookup
/// degrades that block's entries to the Unix epoch instead of dropping them,
/// so every raw record yields exactly one entry.
pub async fn normalize_records<S>(
    source: &Arc<S>,
    assets: &AssetTable,
    raw_records: Vec<RawRecord>,
) -> Vec<HistoryEntry>
where
    S: LogSource + 'static,
{
    let timestamps = resolve_timestamps(source, &raw_records).await;
    raw_records
        .into_iter()
        .map(|raw| {
            let timestamp = timestamps
                .get(&raw.block_number)
                .copied()
                .unwrap_or(DateTime::UNIX_EPOCH);
            normalize_one(raw, timestamp, assets)
        })
        .collect()
}

async fn resolve_timestamps<S>(
    source: &Arc<S>,
    records: &[RawRecord],
) -> HashMap<u64, DateTime<Utc>>
where
    S: LogSource + 'static,
{
    let blocks: BTreeSet<u64> = records.iter().map(|r| r.block_number).collect();
    let mut handles = Vec::with_capacity(blocks.len());
    for block in blocks {
        let source = Arc::clone(source);
        handles.push(tokio::spawn(async move {
            (block, source.block_timestamp(block).await)
        }));
    }

    let mut resolved = HashMap::new();
    for handle in handles {
        match handle.await {
            Ok((block, Ok(timestamp))) => {
                resolved.insert(block, timestamp);
            }
            Ok((block, Err(e))) => {
                warn!(block, error = %e, "block timestamp lookup failed, defaulting to epoch");
                resolved.insert(block, DateTime::UNIX_EPOCH);
            }
            Err(e) => {
                warn!(error = %e, "timestamp lookup task failed");
            }
        }
    }
    resolved
}

fn normalize_one(raw: RawRecord, timestamp: DateTime<Utc>, assets: &AssetTable) -> HistoryEntry {
    let rule = rule_for(raw.kind);
    HistoryEntry {
        description: (rule.describe)(&raw),
        amount: (rule.amount)(&raw),
        asset_symbol: (rule.asset)(&raw, assets),
        tx_hash: raw.tx_hash,
        block_number: raw.block_number,
        log_index: raw.log_index,
        kind: raw.kind,
        timestamp,
    }
}
