//! Binary to hexadecimal rendering.

/// Renders `data` as uppercase hexits, two per byte, in input order.
///
/// ```
/// assert_eq!(cryptkit::hex::encode_hex(&[0x00, 0xFF, 0x1A]), "00FF1A");
/// ```
pub fn encode_hex(data: &[u8]) -> String {
    ::hex::encode_upper(data)
}

/// Lowercase rendering, used by the textual digest helpers.
pub fn encode_hex_lower(data: &[u8]) -> String {
    ::hex::encode(data)
}
