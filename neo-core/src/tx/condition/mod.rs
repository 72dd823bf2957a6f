// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Boolean expressions gating a `WitnessRules` signer.

mod codec;
mod dto;


use neo_base::{encoding::NeoEncode, UInt160};
use neo_crypto::PublicKey;
use serde::Serialize;

use super::{MAX_SUBITEMS, MAX_TRANSACTION_SIZE};
use crate::{TxError, TxResult};

/// Deepest chain of `Not`/`And`/`Or` nodes a condition may contain.
pub const MAX_NESTING_DEPTH: usize = 3;

/// Byte budget of one serialized condition tree.
pub const MAX_CONDITION_SIZE: usize = MAX_TRANSACTION_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WitnessConditionType {
    Boolean = 0x00,
    Not = 0x01,
    And = 0x02,
    Or = 0x03,
    ScriptHash = 0x18,
    Group = 0x19,
    CalledByEntry = 0x20,
    CalledByContract = 0x28,
    CalledByGroup = 0x29,
}

impl WitnessConditionType {
    pub fn from_u8(tag: u8) -> Option<Self> {
        Some(match tag {
            0x00 => Self::Boolean,
            0x01 => Self::Not,
            0x02 => Self::And,
            0x03 => Self::Or,
            0x18 => Self::ScriptHash,
            0x19 => Self::Group,
            0x20 => Self::CalledByEntry,
            0x28 => Self::CalledByContract,
            0x29 => Self::CalledByGroup,
            _ => return None,
        })
    }
}

/// A witness condition tree. Composite nodes own their children; build them
/// with [`WitnessCondition::not`], [`WitnessCondition::and`] and
/// [`WitnessCondition::or`], which enforce the nesting, fan-out and size limits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type")]
pub enum WitnessCondition {
    Boolean { expression: bool },
    Not { expression: Box<WitnessCondition> },
    And { expressions: Vec<WitnessCondition> },
    Or { expressions: Vec<WitnessCondition> },
    ScriptHash { hash: UInt160 },
    Group { group: PublicKey },
    CalledByEntry,
    CalledByContract { hash: UInt160 },
    CalledByGroup { group: PublicKey },
}

impl WitnessCondition {
    #[inline]
    pub fn boolean(expression: bool) -> Self {
        Self::Boolean { expression }
    }

    pub fn not(child: WitnessCondition) -> TxResult<Self> {
        Self::Not {
            expression: Box::new(child),
        }
        .checked()
    }

    pub fn and(children: Vec<WitnessCondition>) -> TxResult<Self> {
        Self::And {
            expressions: children,
        }
        .checked()
    }

    pub fn or(children: Vec<WitnessCondition>) -> TxResult<Self> {
        Self::Or {
            expressions: children,
        }
        .checked()
    }

    #[inline]
    pub fn script_hash(hash: UInt160) -> Self {
        Self::ScriptHash { hash }
    }

    #[inline]
    pub fn group(group: PublicKey) -> Self {
        Self::Group { group }
    }

    #[inline]
    pub fn called_by_entry() -> Self {
        Self::CalledByEntry
    }

    #[inline]
    pub fn called_by_contract(hash: UInt160) -> Self {
        Self::CalledByContract { hash }
    }

    #[inline]
    pub fn called_by_group(group: PublicKey) -> Self {
        Self::CalledByGroup { group }
    }

    pub fn condition_type(&self) -> WitnessConditionType {
        match self {
            Self::Boolean { .. } => WitnessConditionType::Boolean,
            Self::Not { .. } => WitnessConditionType::Not,
            Self::And { .. } => WitnessConditionType::And,
            Self::Or { .. } => WitnessConditionType::Or,
            Self::ScriptHash { .. } => WitnessConditionType::ScriptHash,
            Self::Group { .. } => WitnessConditionType::Group,
            Self::CalledByEntry => WitnessConditionType::CalledByEntry,
            Self::CalledByContract { .. } => WitnessConditionType::CalledByContract,
            Self::CalledByGroup { .. } => WitnessConditionType::CalledByGroup,
        }
    }

    /// Number of composite nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Self::Not { expression } => 1 + expression.depth(),
            Self::And { expressions } | Self::Or { expressions } => {
                1 + expressions.iter().map(Self::depth).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Checks every limit a decoder would enforce. Trees assembled through the
    /// enum variants directly are only trusted after this passes.
    pub fn validate(&self) -> TxResult<()> {
        self.validate_node(MAX_NESTING_DEPTH)?;
        let size = self.encoded_size();
        if size > MAX_CONDITION_SIZE {
            return Err(TxError::SizeExceeded {
                what: "witness condition",
                max: MAX_CONDITION_SIZE,
            });
        }
        Ok(())
    }

    fn validate_node(&self, depth: usize) -> TxResult<()> {
        match self {
            Self::Not { expression } => {
                if depth == 0 {
                    return Err(TxError::MaxDepthExceeded {
                        max: MAX_NESTING_DEPTH,
                    });
                }
                expression.validate_node(depth - 1)
            }
            Self::And { expressions } | Self::Or { expressions } => {
                if depth == 0 {
                    return Err(TxError::MaxDepthExceeded {
                        max: MAX_NESTING_DEPTH,
                    });
                }
                if expressions.is_empty() {
                    return Err(TxError::invalid_argument(
                        "expressions",
                        "And/Or needs at least one child",
                    ));
                }
                if expressions.len() > MAX_SUBITEMS {
                    return Err(TxError::TooManyItems {
                        field: "expressions",
                        max: MAX_SUBITEMS,
                    });
                }
                expressions
                    .iter()
                    .try_for_each(|child| child.validate_node(depth - 1))
            }
            _ => Ok(()),
        }
    }

    #[inline]
    fn checked(self) -> TxResult<Self> {
        self.validate()?;
        Ok(self)
    }
}
