// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! The Neo binary wire format: little-endian fixed-width integers, var-size
//! integers and length-prefixed byte strings and collections.

mod primitives;
mod reader;
mod traits;
mod varint;


pub use primitives::*;
pub use reader::*;
pub use traits::*;
pub use varint::*;

/// Failures while decoding untrusted wire bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("decode: truncated input, {needed} bytes needed but {remaining} remain")]
    Truncated { needed: usize, remaining: usize },

    #[error("decode: non-canonical var-int with marker {0:#04x}")]
    NonCanonicalVarInt(u8),

    #[error("decode: length {len} out of range, max {max}")]
    LengthOutOfRange { len: u64, max: u64 },

    #[error("decode: invalid {0}")]
    InvalidFormat(&'static str),

    #[error("decode: unknown {ty} tag {tag:#04x}")]
    UnknownTag { ty: &'static str, tag: u8 },

    #[error("decode: nesting depth exceeds {max}")]
    MaxDepthExceeded { max: usize },

    #[error("decode: {ty} exceeds {max} bytes")]
    SizeExceeded { ty: &'static str, max: usize },

    #[error("decode: {0} trailing bytes")]
    TrailingBytes(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("encode: buffer too small, {needed} bytes needed but {available} available")]
    BufferTooSmall { needed: usize, available: usize },
}
