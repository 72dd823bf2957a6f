// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use neo_base::{
    encoding::{DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite},
    UInt256,
};
use serde::{Deserialize, Serialize};

/// Largest oracle result carried in an `OracleResponse` attribute.
pub const MAX_ORACLE_RESULT_SIZE: usize = u16::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransactionAttributeType {
    HighPriority = 0x01,
    OracleResponse = 0x11,
    NotValidBefore = 0x20,
    Conflicts = 0x21,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OracleResponseCode {
    Success = 0x00,
    ProtocolNotSupported = 0x10,
    ConsensusUnreachable = 0x12,
    NotFound = 0x14,
    Timeout = 0x16,
    Forbidden = 0x18,
    ResponseTooLarge = 0x1a,
    InsufficientFunds = 0x1c,
    ContentTypeNotSupported = 0x1f,
    Error = 0xff,
}

impl OracleResponseCode {
    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0x00 => Self::Success,
            0x10 => Self::ProtocolNotSupported,
            0x12 => Self::ConsensusUnreachable,
            0x14 => Self::NotFound,
            0x16 => Self::Timeout,
            0x18 => Self::Forbidden,
            0x1a => Self::ResponseTooLarge,
            0x1c => Self::InsufficientFunds,
            0x1f => Self::ContentTypeNotSupported,
            0xff => Self::Error,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransactionAttribute {
    HighPriority,
    OracleResponse {
        id: u64,
        code: OracleResponseCode,
        #[serde(with = "super::b64")]
        result: Vec<u8>,
    },
    NotValidBefore {
        height: u32,
    },
    Conflicts {
        hash: UInt256,
    },
}

impl TransactionAttribute {
    pub fn attribute_type(&self) -> TransactionAttributeType {
        match self {
            Self::HighPriority => TransactionAttributeType::HighPriority,
            Self::OracleResponse { .. } => TransactionAttributeType::OracleResponse,
            Self::NotValidBefore { .. } => TransactionAttributeType::NotValidBefore,
            Self::Conflicts { .. } => TransactionAttributeType::Conflicts,
        }
    }

    /// Only `Conflicts` may appear more than once in a transaction.
    #[inline]
    pub fn allow_multiple(&self) -> bool {
        matches!(self, Self::Conflicts { .. })
    }
}

impl NeoEncode for TransactionAttribute {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_u8(self.attribute_type() as u8);
        match self {
            Self::HighPriority => {}
            Self::OracleResponse { id, code, result } => {
                writer.write_u64(*id);
                writer.write_u8(*code as u8);
                writer.write_var_bytes(result);
            }
            Self::NotValidBefore { height } => writer.write_u32(*height),
            Self::Conflicts { hash } => hash.neo_encode(writer),
        }
    }
}

impl NeoDecode for TransactionAttribute {
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        let tag = reader.read_u8()?;
        match tag {
            0x01 => Ok(Self::HighPriority),
            0x11 => {
                let id = reader.read_u64()?;
                let code = reader.read_u8()?;
                let code = OracleResponseCode::from_u8(code)
                    .ok_or(DecodeError::InvalidFormat("oracle response code"))?;
                let result = reader.read_var_bytes(MAX_ORACLE_RESULT_SIZE as u64)?;
                if code != OracleResponseCode::Success && !result.is_empty() {
                    return Err(DecodeError::InvalidFormat("oracle error carries a result"));
                }
                Ok(Self::OracleResponse { id, code, result })
            }
            0x20 => Ok(Self::NotValidBefore {
                height: reader.read_u32()?,
            }),
            0x21 => Ok(Self::Conflicts {
                hash: UInt256::neo_decode(reader)?,
            }),
            _ => Err(DecodeError::UnknownTag {
                ty: "transaction attribute",
                tag,
            }),
        }
    }
}
