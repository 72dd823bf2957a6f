// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use neo_base::UInt160;
use neo_crypto::PublicKey;
use serde::{Deserialize, Deserializer};

use super::WitnessCondition;
use crate::{TxError, TxResult};

/// JSON shape of a condition before the tree limits are checked.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub(super) enum WitnessConditionDto {
    Boolean { expression: BooleanDto },
    Not { expression: Box<WitnessConditionDto> },
    And { expressions: Vec<WitnessConditionDto> },
    Or { expressions: Vec<WitnessConditionDto> },
    ScriptHash { hash: UInt160 },
    Group { group: PublicKey },
    CalledByEntry {},
    CalledByContract { hash: UInt160 },
    CalledByGroup { group: PublicKey },
}

/// Nodes emit `true`/`false`; older tooling wrote the strings.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub(super) enum BooleanDto {
    Bool(bool),
    Text(BoolText),
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub(super) enum BoolText {
    #[serde(alias = "True")]
    #[serde(rename = "true")]
    True,
    #[serde(alias = "False")]
    #[serde(rename = "false")]
    False,
}

impl BooleanDto {
    fn value(self) -> bool {
        match self {
            Self::Bool(value) => value,
            Self::Text(BoolText::True) => true,
            Self::Text(BoolText::False) => false,
        }
    }
}

impl WitnessConditionDto {
    fn into_condition(self) -> WitnessCondition {
        match self {
            Self::Boolean { expression } => WitnessCondition::Boolean {
                expression: expression.value(),
            },
            Self::Not { expression } => WitnessCondition::Not {
                expression: Box::new(expression.into_condition()),
            },
            Self::And { expressions } => WitnessCondition::And {
                expressions: expressions.into_iter().map(Self::into_condition).collect(),
            },
            Self::Or { expressions } => WitnessCondition::Or {
                expressions: expressions.into_iter().map(Self::into_condition).collect(),
            },
            Self::ScriptHash { hash } => WitnessCondition::ScriptHash { hash },
            Self::Group { group } => WitnessCondition::Group { group },
            Self::CalledByEntry {} => WitnessCondition::CalledByEntry,
            Self::CalledByContract { hash } => WitnessCondition::CalledByContract { hash },
            Self::CalledByGroup { group } => WitnessCondition::CalledByGroup { group },
        }
    }
}

impl WitnessCondition {
    /// Parses the JSON form and applies the same limits as binary decoding.
    pub fn from_json(value: &serde_json::Value) -> TxResult<Self> {
        let dto = WitnessConditionDto::deserialize(value)
            .map_err(|err| TxError::invalid_argument("condition", err.to_string()))?;
        let condition = dto.into_condition();
        condition.validate()?;
        Ok(condition)
    }
}

impl<'de> Deserialize<'de> for WitnessCondition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let condition = WitnessConditionDto::deserialize(deserializer)?.into_condition();
        condition.validate().map_err(serde::de::Error::custom)?;
        Ok(condition)
    }
}
