//! Event filters
//!
//! A filter identifies one (contract, event kind, indexed account) triple.
//! The filter set is declared once per scan and never changes while the scan
//! runs.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use transcend_core::EventKind;
use transcend_params::Network;

/// One (source contract, event kind, indexed account) query target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventFilter {
    /// Contract the event is emitted from
    pub contract: Address,
    /// Event kind this filter matches
    pub kind: EventKind,
    /// Account bound to the event's indexed argument
    pub account: Address,
}

impl EventFilter {
    /// Create a filter
    pub fn new(contract: Address, kind: EventKind, account: Address) -> Self {
        Self {
            contract,
            kind,
            account,
        }
    }
}

/// The product's standard filter set for one account
///
/// Community sends are emitted by the multi-send contract; deposits, payroll
/// runs, and withdrawals by the enterprise treasury contract.
pub fn standard_filters(network: &Network, account: Address) -> Vec<EventFilter> {
    vec![
        EventFilter::new(
            network.multi_send_contract,
            EventKind::CommunitySend,
            account,
        ),
        EventFilter::new(
            network.treasury_contract,
            EventKind::TreasuryDeposit,
            account,
        ),
        EventFilter::new(network.treasury_contract, EventKind::PayrollRun, account),
        EventFilter::new(
            network.treasury_contract,
            EventKind::TreasuryWithdraw,
            account,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_filters_cover_all_kinds() {
        let network = Network::lisk_sepolia();
        let account = Address::repeat_byte(0xab);
        let filters = standard_filters(&network, account);

        assert_eq!(filters.len(), EventKind::ALL.len());
        for kind in EventKind::ALL {
            assert!(filters.iter().any(|f| f.kind == kind));
        }
        assert!(filters.iter().all(|f| f.account == account));

        let send = filters
            .iter()
            .find(|f| f.kind == EventKind::CommunitySend)
            .unwrap();
        assert_eq!(send.contract, network.multi_send_contract);
        let payroll = filters
            .iter()
            .find(|f| f.kind == EventKind::PayrollRun)
            .unwrap();
        assert_eq!(payroll.contract, network.treasury_contract);
    }
}
