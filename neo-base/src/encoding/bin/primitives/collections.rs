// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use super::super::{var_size, DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite};

/// A var-size count followed by each item.
impl<T: NeoEncode> NeoEncode for [T] {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_varint(self.len() as u64);
        self.iter().for_each(|item| item.neo_encode(writer));
    }

    fn encoded_size(&self) -> usize {
        var_size(self.len() as u64) + self.iter().map(NeoEncode::encoded_size).sum::<usize>()
    }
}

impl<T: NeoEncode> NeoEncode for Vec<T> {
    #[inline]
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        self.as_slice().neo_encode(writer)
    }

    #[inline]
    fn encoded_size(&self) -> usize {
        self.as_slice().encoded_size()
    }
}

/// Reads a var-size count (at most `max`) and then that many items.
pub fn read_array<T: NeoDecode, R: NeoRead>(reader: &mut R, max: usize) -> Result<Vec<T>, DecodeError> {
    let count = reader.read_varint()?;
    if count > max as u64 {
        return Err(DecodeError::LengthOutOfRange {
            len: count,
            max: max as u64,
        });
    }
    // every item occupies at least one byte
    if count > reader.remaining() as u64 {
        return Err(DecodeError::Truncated {
            needed: count as usize,
            remaining: reader.remaining(),
        });
    }

    let mut items = Vec::with_capacity(count as usize);
    for _ in 0..count {
        items.push(T::neo_decode(reader)?);
    }
    Ok(items)
}
