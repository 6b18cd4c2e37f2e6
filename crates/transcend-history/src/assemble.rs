//! History assembly
//!
//! Final ordering of the normalized feed. Records within one block carry no
//! inherent order from the source, so the log index breaks ties: higher index
//! first, matching the newest-first ordering across blocks.

use transcend_core::HistoryEntry;

/// Sort entries most recent first
///
/// Sort key: `block_number` descending, then `log_index` descending within a
/// block. Stable, total; performs no filtering or deduplication.
pub fn assemble(mut entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    entries.sort_by(|a, b| {
        b.block_number
            .cmp(&a.block_number)
            .then(b.log_index.cmp(&a.log_index))
    });
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::B256;
    use chrono::DateTime;
    use transcend_core::EventKind;

    fn entry(block_number: u64, log_index: u64) -> HistoryEntry {
        HistoryEntry {
            tx_hash: B256::ZERO,
            block_number,
            log_index,
            kind: EventKind::CommunitySend,
            description: String::new(),
            amount: None,
            asset_symbol: "LSK".to_string(),
            timestamp: DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_newest_block_first() {
        let sorted = assemble(vec![entry(5, 0), entry(9, 0), entry(1, 0), entry(7, 0)]);
        let blocks: Vec<u64> = sorted.iter().map(|e| e.block_number).collect();
        assert_eq!(blocks, vec![9, 7, 5, 1]);
    }

    #[test]
    fn test_non_increasing_for_adjacent_pairs() {
        let sorted = assemble(vec![entry(3, 0), entry(3, 1), entry(10, 0), entry(1, 0)]);
        for pair in sorted.windows(2) {
            assert!(pair[0].block_number >= pair[1].block_number);
        }
    }

    #[test]
    fn test_log_index_breaks_ties() {
        let sorted = assemble(vec![entry(4, 1), entry(4, 3), entry(4, 0)]);
        let indices: Vec<u64> = sorted.iter().map(|e| e.log_index).collect();
        assert_eq!(indices, vec![3, 1, 0]);
    }

    #[test]
    fn test_empty_input() {
        assert!(assemble(Vec::new()).is_empty());
    }
}
