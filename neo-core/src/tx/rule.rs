// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use neo_base::encoding::{DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite};
use serde::{Deserialize, Serialize};

use super::WitnessCondition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum WitnessRuleAction {
    Deny = 0x00,
    Allow = 0x01,
}

/// An action applied when its condition matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WitnessRule {
    action: WitnessRuleAction,
    condition: WitnessCondition,
}

impl WitnessRule {
    #[inline]
    pub fn new(action: WitnessRuleAction, condition: WitnessCondition) -> Self {
        Self { action, condition }
    }

    #[inline]
    pub fn action(&self) -> WitnessRuleAction {
        self.action
    }

    #[inline]
    pub fn condition(&self) -> &WitnessCondition {
        &self.condition
    }
}

impl NeoEncode for WitnessRule {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_u8(self.action as u8);
        self.condition.neo_encode(writer);
    }

    fn encoded_size(&self) -> usize {
        1 + self.condition.encoded_size()
    }
}

impl NeoDecode for WitnessRule {
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        let action = match reader.read_u8()? {
            0x00 => WitnessRuleAction::Deny,
            0x01 => WitnessRuleAction::Allow,
            _ => return Err(DecodeError::InvalidFormat("witness rule action")),
        };
        Ok(Self {
            action,
            condition: WitnessCondition::neo_decode(reader)?,
        })
    }
}
