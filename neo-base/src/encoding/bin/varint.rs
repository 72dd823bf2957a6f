// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use super::{DecodeError, EncodeError, NeoRead, NeoWrite, SliceReader};

/// Width in bytes of the var-size encoding of `value`.
#[inline]
pub const fn var_size(value: u64) -> usize {
    if value < 0xFD {
        1
    } else if value <= 0xFFFF {
        3
    } else if value <= 0xFFFF_FFFF {
        5
    } else {
        9
    }
}

/// Encodes `value` into the front of `out`, returning the bytes written.
pub fn encode_varint(value: u64, out: &mut [u8]) -> Result<usize, EncodeError> {
    let mut scratch = [0u8; 9];
    let len = to_varint_le(value, &mut scratch);
    if out.len() < len {
        return Err(EncodeError::BufferTooSmall {
            needed: len,
            available: out.len(),
        });
    }
    out[..len].copy_from_slice(&scratch[..len]);
    Ok(len)
}

/// Decodes a var-size integer from the front of `input`, returning the value
/// and the number of bytes consumed.
pub fn decode_varint(input: &[u8]) -> Result<(u64, usize), DecodeError> {
    let mut reader = SliceReader::new(input);
    let value = read_varint(&mut reader)?;
    Ok((value, reader.consumed()))
}

#[inline]
pub fn write_varint<W: NeoWrite + ?Sized>(writer: &mut W, value: u64) {
    let mut scratch = [0u8; 9];
    let len = to_varint_le(value, &mut scratch);
    writer.write_bytes(&scratch[..len]);
}

/// Reads a var-size integer; wider-than-necessary forms are rejected.
pub fn read_varint<R: NeoRead + ?Sized>(reader: &mut R) -> Result<u64, DecodeError> {
    let tag = reader.read_u8()?;
    match tag {
        value @ 0x00..=0xFC => Ok(value as u64),
        0xFD => {
            let value = reader.read_u16()?;
            if value < 0xFD {
                Err(DecodeError::NonCanonicalVarInt(0xFD))
            } else {
                Ok(value as u64)
            }
        }
        0xFE => {
            let value = reader.read_u32()?;
            if value < 0x0001_0000 {
                Err(DecodeError::NonCanonicalVarInt(0xFE))
            } else {
                Ok(value as u64)
            }
        }
        0xFF => {
            let value = reader.read_u64()?;
            if value < 0x0000_0001_0000_0000 {
                Err(DecodeError::NonCanonicalVarInt(0xFF))
            } else {
                Ok(value)
            }
        }
    }
}

#[inline]
fn to_varint_le(value: u64, scratch: &mut [u8; 9]) -> usize {
    if value < 0xFD {
        scratch[0] = value as u8;
        1
    } else if value <= 0xFFFF {
        scratch[0] = 0xFD;
        scratch[1..3].copy_from_slice(&(value as u16).to_le_bytes());
        3
    } else if value <= 0xFFFF_FFFF {
        scratch[0] = 0xFE;
        scratch[1..5].copy_from_slice(&(value as u32).to_le_bytes());
        5
    } else {
        scratch[0] = 0xFF;
        scratch[1..9].copy_from_slice(&value.to_le_bytes());
        9
    }
}
