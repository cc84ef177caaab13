//! Address and public key normalization helpers.

/// Reserved all-zero address, always present in the uploaded address set.
pub const ZERO_ADDRESS: &str = "0000000000000000000000000000000000000000";

/// Network prefix carried by wire-format addresses.
pub const ADDRESS_PREFIX: &str = "Mx";

/// Network prefix carried by wire-format candidate public keys.
pub const PUBLIC_KEY_PREFIX: &str = "Mp";

/// Strip the network prefix and lowercase the hex body. Values without a
/// recognized prefix pass through unchanged apart from case.
pub fn normalize_key(value: &str) -> String {
    let body = value
        .strip_prefix(ADDRESS_PREFIX)
        .or_else(|| value.strip_prefix(PUBLIC_KEY_PREFIX))
        .unwrap_or(value);
    body.to_lowercase()
}

/// True if the value is well-formed hex encoding exactly `bytes` bytes.
pub fn is_hex_of_len(value: &str, bytes: usize) -> bool {
    hex::decode(value).map(|raw| raw.len() == bytes).unwrap_or(false)
}
