// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use neo_base::{
    encoding::{var_size, DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite},
    UInt160,
};
use neo_crypto::{ecc256::PUBLIC_KEY_SIZE, PublicKey};

use super::{WitnessCondition, WitnessConditionType, MAX_CONDITION_SIZE, MAX_NESTING_DEPTH};
use crate::tx::MAX_SUBITEMS;

impl NeoEncode for WitnessCondition {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_u8(self.condition_type() as u8);
        match self {
            Self::Boolean { expression } => expression.neo_encode(writer),
            Self::Not { expression } => expression.neo_encode(writer),
            Self::And { expressions } | Self::Or { expressions } => expressions.neo_encode(writer),
            Self::ScriptHash { hash } | Self::CalledByContract { hash } => hash.neo_encode(writer),
            Self::Group { group } | Self::CalledByGroup { group } => group.write_compressed(writer),
            Self::CalledByEntry => {}
        }
    }

    fn encoded_size(&self) -> usize {
        1 + match self {
            Self::Boolean { .. } => 1,
            Self::Not { expression } => expression.encoded_size(),
            Self::And { expressions } | Self::Or { expressions } => {
                var_size(expressions.len() as u64)
                    + expressions.iter().map(NeoEncode::encoded_size).sum::<usize>()
            }
            Self::ScriptHash { .. } | Self::CalledByContract { .. } => UInt160::LENGTH,
            Self::Group { .. } | Self::CalledByGroup { .. } => PUBLIC_KEY_SIZE,
            Self::CalledByEntry => 0,
        }
    }
}

impl NeoDecode for WitnessCondition {
    #[inline]
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        Self::decode_with_depth(reader, MAX_NESTING_DEPTH)
    }
}

/// Bounds applied while decoding one tree.
struct Limits {
    max_depth: usize,
    // reading past this many remaining bytes means the budget is spent
    floor: usize,
}

impl WitnessCondition {
    /// Decodes a condition allowing at most `max_depth` nested composite
    /// nodes and at most [`MAX_CONDITION_SIZE`] bytes. `max_depth` is capped at
    /// [`MAX_NESTING_DEPTH`], so recursion stays shallow whatever the caller
    /// or the input asks for.
    pub fn decode_with_depth<R: NeoRead>(reader: &mut R, max_depth: usize) -> Result<Self, DecodeError> {
        let max_depth = max_depth.min(MAX_NESTING_DEPTH);
        let limits = Limits {
            max_depth,
            floor: reader.remaining().saturating_sub(MAX_CONDITION_SIZE),
        };
        let condition = Self::decode_node(reader, max_depth, &limits)?;
        limits.check(reader)?;
        Ok(condition)
    }

    fn decode_node<R: NeoRead>(reader: &mut R, depth: usize, limits: &Limits) -> Result<Self, DecodeError> {
        limits.check(reader)?;

        let tag = reader.read_u8()?;
        let ty = WitnessConditionType::from_u8(tag).ok_or(DecodeError::UnknownTag {
            ty: "witness condition",
            tag,
        })?;

        let composite = matches!(
            ty,
            WitnessConditionType::Not | WitnessConditionType::And | WitnessConditionType::Or
        );
        if composite && depth == 0 {
            return Err(DecodeError::MaxDepthExceeded {
                max: limits.max_depth,
            });
        }

        Ok(match ty {
            WitnessConditionType::Boolean => Self::Boolean {
                expression: bool::neo_decode(reader)?,
            },
            WitnessConditionType::Not => Self::Not {
                expression: Box::new(Self::decode_node(reader, depth - 1, limits)?),
            },
            WitnessConditionType::And => Self::And {
                expressions: Self::decode_children(reader, depth - 1, limits)?,
            },
            WitnessConditionType::Or => Self::Or {
                expressions: Self::decode_children(reader, depth - 1, limits)?,
            },
            WitnessConditionType::ScriptHash => Self::ScriptHash {
                hash: UInt160::neo_decode(reader)?,
            },
            WitnessConditionType::Group => Self::Group {
                group: PublicKey::read_compressed(reader)?,
            },
            WitnessConditionType::CalledByEntry => Self::CalledByEntry,
            WitnessConditionType::CalledByContract => Self::CalledByContract {
                hash: UInt160::neo_decode(reader)?,
            },
            WitnessConditionType::CalledByGroup => Self::CalledByGroup {
                group: PublicKey::read_compressed(reader)?,
            },
        })
    }

    fn decode_children<R: NeoRead>(
        reader: &mut R,
        depth: usize,
        limits: &Limits,
    ) -> Result<Vec<Self>, DecodeError> {
        let count = reader.read_varint()?;
        if count == 0 {
            return Err(DecodeError::InvalidFormat("empty And/Or condition"));
        }
        if count > MAX_SUBITEMS as u64 {
            return Err(DecodeError::LengthOutOfRange {
                len: count,
                max: MAX_SUBITEMS as u64,
            });
        }

        let mut children = Vec::with_capacity(count as usize);
        for _ in 0..count {
            children.push(Self::decode_node(reader, depth, limits)?);
        }
        Ok(children)
    }
}

impl Limits {
    #[inline]
    fn check<R: NeoRead>(&self, reader: &R) -> Result<(), DecodeError> {
        if reader.remaining() < self.floor {
            return Err(DecodeError::SizeExceeded {
                ty: "witness condition",
                max: MAX_CONDITION_SIZE,
            });
        }
        Ok(())
    }
}
