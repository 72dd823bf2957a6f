// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

pub use hex::{FromHex, FromHexError};

pub trait ToHex {
    fn to_hex_lower(&self) -> String;

    fn to_hex_upper(&self) -> String;
}

impl<T: AsRef<[u8]>> ToHex for T {
    #[inline]
    fn to_hex_lower(&self) -> String {
        hex::encode(self)
    }

    #[inline]
    fn to_hex_upper(&self) -> String {
        hex::encode_upper(self)
    }
}

/// Hex of the bytes in reverse order, i.e. the display form of a little-endian
/// stored hash.
pub trait ToRevHex {
    fn to_rev_hex_lower(&self) -> String;
}

impl<T: AsRef<[u8]>> ToRevHex for T {
    fn to_rev_hex_lower(&self) -> String {
        const TABLE: &[u8; 16] = b"0123456789abcdef";
        let data = self.as_ref();
        let mut out = String::with_capacity(data.len() * 2);
        for b in data.iter().rev() {
            out.push(TABLE[(b >> 4) as usize] as char);
            out.push(TABLE[(b & 0x0F) as usize] as char);
        }
        out
    }
}

/// Strips an optional `0x`/`0X` prefix.
#[inline]
pub fn trim_0x(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Decodes hex with an optional `0x` prefix.
pub fn decode_hex(value: &str) -> Result<Vec<u8>, FromHexError> {
    hex::decode(trim_0x(value.trim()))
}
