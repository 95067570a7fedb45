use crate::error::{FormatError, Result};

/// Encode bytes as a lowercase `0x`-prefixed hex string.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode a `0x`-prefixed hex string. Accepts upper- and lowercase digits;
/// fails on a missing prefix, odd length, or non-hex characters.
pub fn hex_to_bytes(value: &str) -> Result<Vec<u8>> {
    let digits = value
        .strip_prefix("0x")
        .ok_or(FormatError::MissingHexPrefix)?;
    Ok(hex::decode(digits)?)
}
