//! JSON-RPC log-source client
//!
//! Implements the `LogSource` capability over plain HTTP JSON-RPC
//! (`eth_blockNumber`, `eth_getLogs`, `eth_getBlockByNumber`). Event payloads
//! are decoded by hand from the log's 32-byte data words; all four product
//! events carry only static-width fields, so no ABI machinery is needed.

use crate::filter::EventFilter;
use crate::source::{LogSource, SourceError};
use crate::window::BlockWindow;
use crate::{Error, Result};
use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use sha3::{Digest, Keccak256};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;
use transcend_core::records::fields;
use transcend_core::{EventKind, RawField, RawRecord};

/// Default per-request HTTP timeout
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration
#[derive(Debug, Clone)]
pub struct RpcClientConfig {
    /// JSON-RPC endpoint URL
    pub endpoint: String,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl RpcClientConfig {
    /// Configuration with the default timeout
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            request_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

/// HTTP JSON-RPC implementation of the log-source capability
pub struct RpcClient {
    http: reqwest::Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Connect to an endpoint with the default configuration
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_config(RpcClientConfig::new(endpoint))
    }

    /// Connect with custom configuration
    pub fn with_config(config: RpcClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Client(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: config.endpoint,
            next_id: AtomicU64::new(1),
        })
    }

    async fn request<R>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> std::result::Result<R, SourceError>
    where
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(method, id, "rpc request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(SourceError::RateLimited);
        }
        let response = response.error_for_status().map_err(map_reqwest_error)?;

        let envelope: RpcResponse<R> = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;
        if let Some(err) = envelope.error {
            return Err(SourceError::Transport(format!(
                "rpc error {}: {}",
                err.code, err.message
            )));
        }
        envelope
            .result
            .ok_or_else(|| SourceError::Malformed(format!("{method}: missing result")))
    }
}

#[async_trait]
impl LogSource for RpcClient {
    async fn head_block(&self) -> std::result::Result<u64, SourceError> {
        let head: String = self.request("eth_blockNumber", json!([])).await?;
        parse_quantity(&head)
    }

    async fn query_logs(
        &self,
        filter: &EventFilter,
        window: &BlockWindow,
    ) -> std::result::Result<Vec<RawRecord>, SourceError> {
        let params = json!([{
            "address": filter.contract,
            "topics": [event_topic(filter.kind), filter.account.into_word()],
            "fromBlock": quantity(window.from_block),
            "toBlock": quantity(window.to_block),
        }]);
        let entries: Vec<LogEntry> = self.request("eth_getLogs", params).await?;
        entries
            .iter()
            .map(|entry| decode_log(filter.kind, entry))
            .collect()
    }

    async fn block_timestamp(
        &self,
        block_number: u64,
    ) -> std::result::Result<DateTime<Utc>, SourceError> {
        let block: BlockHeader = self
            .request("eth_getBlockByNumber", json!([quantity(block_number), false]))
            .await?;
        let seconds = parse_quantity(&block.timestamp)?;
        DateTime::from_timestamp(seconds as i64, 0)
            .ok_or_else(|| SourceError::Malformed(format!("block timestamp {seconds} out of range")))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Timeout
    } else if e.status() == Some(StatusCode::TOO_MANY_REQUESTS) {
        SourceError::RateLimited
    } else {
        SourceError::Transport(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogEntry {
    data: String,
    block_number: Option<String>,
    transaction_hash: Option<B256>,
    log_index: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BlockHeader {
    timestamp: String,
}

/// Hex-quantity encoding used by the wire protocol
fn quantity(value: u64) -> String {
    format!("{value:#x}")
}

fn parse_quantity(raw: &str) -> std::result::Result<u64, SourceError> {
    let digits = raw
        .strip_prefix("0x")
        .ok_or_else(|| SourceError::Malformed(format!("quantity without 0x prefix: {raw}")))?;
    u64::from_str_radix(digits, 16)
        .map_err(|_| SourceError::Malformed(format!("bad hex quantity: {raw}")))
}

static COMMUNITY_SEND_TOPIC: Lazy<B256> =
    Lazy::new(|| keccak_topic("MultiPaymentExecuted(address,uint256,uint256,uint256)"));
static TREASURY_DEPOSIT_TOPIC: Lazy<B256> =
    Lazy::new(|| keccak_topic("Deposited(address,address,uint256)"));
static PAYROLL_RUN_TOPIC: Lazy<B256> =
    Lazy::new(|| keccak_topic("PayrollExecuted(address,uint256)"));
static TREASURY_WITHDRAW_TOPIC: Lazy<B256> =
    Lazy::new(|| keccak_topic("Withdrawn(address,address,uint256)"));

fn keccak_topic(signature: &str) -> B256 {
    B256::from_slice(&Keccak256::digest(signature.as_bytes()))
}

/// Signature topic identifying one event kind on the wire
fn event_topic(kind: EventKind) -> B256 {
    match kind {
        EventKind::CommunitySend => *COMMUNITY_SEND_TOPIC,
        EventKind::TreasuryDeposit => *TREASURY_DEPOSIT_TOPIC,
        EventKind::PayrollRun => *PAYROLL_RUN_TOPIC,
        EventKind::TreasuryWithdraw => *TREASURY_WITHDRAW_TOPIC,
    }
}

fn decode_log(kind: EventKind, entry: &LogEntry) -> std::result::Result<RawRecord, SourceError> {
    let block_number = entry
        .block_number
        .as_deref()
        .ok_or_else(|| SourceError::Malformed("log without block number".to_string()))
        .and_then(parse_quantity)?;
    let log_index = entry
        .log_index
        .as_deref()
        .map(parse_quantity)
        .transpose()?
        .unwrap_or(0);
    let tx_hash = entry.transaction_hash.unwrap_or(B256::ZERO);

    let data = hex::decode(entry.data.trim_start_matches("0x"))
        .map_err(|e| SourceError::Malformed(format!("bad log data: {e}")))?;

    let mut record = RawRecord::new(tx_hash, block_number, log_index, kind);
    match kind {
        EventKind::CommunitySend => {
            record = record
                .with_field(
                    fields::TOTAL_RECIPIENTS,
                    RawField::Uint(uint_word(&data, 0)?),
                )
                .with_field(
                    fields::TOTAL_NATIVE_SENT,
                    RawField::Uint(uint_word(&data, 1)?),
                )
                .with_field(
                    fields::TOTAL_ERC20_SENT,
                    RawField::Uint(uint_word(&data, 2)?),
                );
        }
        EventKind::TreasuryDeposit | EventKind::TreasuryWithdraw => {
            record = record
                .with_field(fields::TOKEN, RawField::Address(address_word(&data, 0)?))
                .with_field(fields::AMOUNT, RawField::Uint(uint_word(&data, 1)?));
        }
        EventKind::PayrollRun => {
            record = record.with_field(
                fields::TOTAL_RECIPIENTS,
                RawField::Uint(uint_word(&data, 0)?),
            );
        }
    }
    Ok(record)
}

fn data_word(data: &[u8], index: usize) -> std::result::Result<&[u8], SourceError> {
    let start = index * 32;
    let end = start + 32;
    if data.len() < end {
        return Err(SourceError::Malformed(format!(
            "log data too short: {} bytes, word {index} needed",
            data.len()
        )));
    }
    Ok(&data[start..end])
}

fn uint_word(
    data: &[u8],
    index: usize,
) -> std::result::Result<alloy_primitives::U256, SourceError> {
    Ok(alloy_primitives::U256::from_be_slice(data_word(
        data, index,
    )?))
}

fn address_word(data: &[u8], index: usize) -> std::result::Result<Address, SourceError> {
    let word = data_word(data, index)?;
    Ok(Address::from_slice(&word[12..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};

    fn word_hex(value: u64) -> String {
        format!("{value:064x}")
    }

    fn address_word_hex(addr: Address) -> String {
        format!("{:0>64}", hex::encode(addr))
    }

    fn entry(data: String) -> LogEntry {
        LogEntry {
            data: format!("0x{data}"),
            block_number: Some("0xb71b0".to_string()),
            transaction_hash: Some(B256::repeat_byte(0x22)),
            log_index: Some("0x3".to_string()),
        }
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("0x0").unwrap(), 0);
        assert_eq!(parse_quantity("0xb71b0").unwrap(), 750_000);
        assert!(parse_quantity("12").is_err());
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn test_quantity_round_trip() {
        assert_eq!(quantity(40_000), "0x9c40");
        assert_eq!(parse_quantity(&quantity(1_000_000)).unwrap(), 1_000_000);
    }

    #[test]
    fn test_decode_community_send() {
        let data = format!("{}{}{}", word_hex(7), word_hex(1_000), word_hex(0));
        let record = decode_log(EventKind::CommunitySend, &entry(data)).unwrap();

        assert_eq!(record.kind, EventKind::CommunitySend);
        assert_eq!(record.block_number, 750_000);
        assert_eq!(record.log_index, 3);
        assert_eq!(
            record.uint_field(fields::TOTAL_RECIPIENTS),
            Some(U256::from(7u64))
        );
        assert_eq!(
            record.uint_field(fields::TOTAL_NATIVE_SENT),
            Some(U256::from(1_000u64))
        );
    }

    #[test]
    fn test_decode_deposit() {
        let token = address!("69a58006574BBf7032afb321341661Db8754d21b");
        let data = format!("{}{}", address_word_hex(token), word_hex(42));
        let record = decode_log(EventKind::TreasuryDeposit, &entry(data)).unwrap();

        assert_eq!(record.address_field(fields::TOKEN), Some(token));
        assert_eq!(record.uint_field(fields::AMOUNT), Some(U256::from(42u64)));
    }

    #[test]
    fn test_decode_payroll() {
        let record = decode_log(EventKind::PayrollRun, &entry(word_hex(12))).unwrap();
        assert_eq!(
            record.uint_field(fields::TOTAL_RECIPIENTS),
            Some(U256::from(12u64))
        );
    }

    #[test]
    fn test_decode_truncated_data_is_malformed() {
        let result = decode_log(EventKind::CommunitySend, &entry(word_hex(7)));
        assert!(matches!(result, Err(SourceError::Malformed(_))));
    }

    #[test]
    fn test_decode_requires_block_number() {
        let mut log = entry(word_hex(1));
        log.block_number = None;
        assert!(matches!(
            decode_log(EventKind::PayrollRun, &log),
            Err(SourceError::Malformed(_))
        ));
    }

    #[test]
    fn test_event_topics_are_distinct() {
        let topics: std::collections::BTreeSet<B256> = EventKind::ALL
            .iter()
            .map(|kind| event_topic(*kind))
            .collect();
        assert_eq!(topics.len(), 4);
    }
}
