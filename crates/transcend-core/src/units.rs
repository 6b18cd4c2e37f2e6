//! Decimal scaling of raw on-chain quantities

use alloy_primitives::U256;

/// Decimals of the native coin and of the product's whitelisted tokens
pub const NATIVE_DECIMALS: u8 = 18;

/// Format a raw integer quantity as a decimal string
///
/// Trailing zeros of the fractional part are trimmed; whole values render
/// without a decimal point. Never fails, never rounds.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let integer = value / scale;
    let fraction = value % scale;
    if fraction.is_zero() {
        return integer.to_string();
    }
    let mut frac = format!("{fraction:0>width$}", width = decimals as usize);
    while frac.ends_with('0') {
        frac.pop();
    }
    format!("{integer}.{frac}")
}
