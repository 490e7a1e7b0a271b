use alloy_primitives::U256;

use crate::models::errors::HexError;

/// Render an unsigned big integer as a `0x`-prefixed lowercase hex string
/// with no padding beyond the natural width of the value.
pub fn to_hex(value: U256) -> String {
    format!("0x{value:x}")
}

/// Parse a `0x`/`0X`-prefixed (or bare) hex string into a `U256`.
///
/// Empty or missing values decode to zero; the JSON-RPC shapes default
/// absent fields to the empty string and rely on this policy. `field` names
/// the originating JSON field for diagnostics.
pub fn from_hex(field: &'static str, raw: &str) -> Result<U256, HexError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);

    if digits.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(digits, 16).map_err(|_| HexError::BadHex {
        field,
        raw: raw.to_string(),
    })
}

/// Decode a hex field that is 64-bit on chain (block numbers, timestamps,
/// indices). Values beyond u64 saturate rather than wrap.
pub fn from_hex_u64(field: &'static str, raw: &str) -> Result<u64, HexError> {
    Ok(from_hex(field, raw)?.saturating_to::<u64>())
}
