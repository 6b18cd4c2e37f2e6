//! Known-asset symbol table
//!
//! Events carry token addresses, not tickers. The table maps the product's
//! whitelisted token addresses to display symbols; anything else falls back
//! to a generic placeholder.

use alloy_primitives::Address;
use std::collections::HashMap;

/// Symbol reported for token addresses the table does not know
pub const FALLBACK_SYMBOL: &str = "TOKEN";

/// Symbol reported for events spanning several assets (payroll runs)
pub const MIXED_SYMBOL: &str = "Mixed";

/// Static lookup table from token address to display symbol
#[derive(Debug, Clone)]
pub struct AssetTable {
    native: String,
    tokens: HashMap<Address, String>,
}

impl AssetTable {
    /// Create a table knowing only the native coin
    pub fn new(native_symbol: impl Into<String>) -> Self {
        Self {
            native: native_symbol.into(),
            tokens: HashMap::new(),
        }
    }

    /// Register a token symbol (builder style)
    pub fn with_token(mut self, token: Address, symbol: impl Into<String>) -> Self {
        self.tokens.insert(token, symbol.into());
        self
    }

    /// Register several token symbols at once
    pub fn with_tokens<S: Into<String>>(
        mut self,
        tokens: impl IntoIterator<Item = (Address, S)>,
    ) -> Self {
        for (token, symbol) in tokens {
            self.tokens.insert(token, symbol.into());
        }
        self
    }

    /// Ticker of the native coin
    pub fn native(&self) -> &str {
        &self.native
    }

    /// Resolve a token address to its symbol, falling back to the generic one
    pub fn symbol_for(&self, token: Address) -> &str {
        self.tokens
            .get(&token)
            .map(String::as_str)
            .unwrap_or(FALLBACK_SYMBOL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_known_token_lookup() {
        let usdt = address!("69a58006574BBf7032afb321341661Db8754d21b");
        let table = AssetTable::new("LSK").with_token(usdt, "USDT");

        assert_eq!(table.native(), "LSK");
        assert_eq!(table.symbol_for(usdt), "USDT");
    }

    #[test]
    fn test_unknown_token_falls_back() {
        let table = AssetTable::new("LSK");
        assert_eq!(table.symbol_for(Address::ZERO), FALLBACK_SYMBOL);
    }

    #[test]
    fn test_bulk_registration() {
        let a = address!("0000000000000000000000000000000000000001");
        let b = address!("0000000000000000000000000000000000000002");
        let table = AssetTable::new("ETH").with_tokens([(a, "USDT"), (b, "DAI")]);

        assert_eq!(table.symbol_for(a), "USDT");
        assert_eq!(table.symbol_for(b), "DAI");
    }
}
