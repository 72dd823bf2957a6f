// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Witness scopes describing how a signer may be used during verification.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WitnessScope: u8 {
        const CALLED_BY_ENTRY = 0x01;
        const CUSTOM_CONTRACTS = 0x10;
        const CUSTOM_GROUPS = 0x20;
        const WITNESS_RULES = 0x40;
        const GLOBAL = 0x80;
    }
}

impl WitnessScope {
    /// Only the transaction fee may be paid.
    pub const NONE: Self = Self::empty();

    #[inline]
    pub fn has_scope(self, scope: Self) -> bool {
        self.contains(scope)
    }

    /// `Global` must stand alone and no undefined bit may be set.
    pub fn is_valid_bits(bits: u8) -> bool {
        match Self::from_bits(bits) {
            Some(scopes) => !scopes.contains(Self::GLOBAL) || scopes == Self::GLOBAL,
            None => false,
        }
    }
}

const NAMES: [(WitnessScope, &str); 5] = [
    (WitnessScope::CALLED_BY_ENTRY, "CalledByEntry"),
    (WitnessScope::CUSTOM_CONTRACTS, "CustomContracts"),
    (WitnessScope::CUSTOM_GROUPS, "CustomGroups"),
    (WitnessScope::WITNESS_RULES, "WitnessRules"),
    (WitnessScope::GLOBAL, "Global"),
];

/// The comma separated form nodes use in JSON, e.g. `CalledByEntry, WitnessRules`.
impl Display for WitnessScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("None");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown witness scope `{0}`")]
pub struct ParseScopeError(String);

impl FromStr for WitnessScope {
    type Err = ParseScopeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut scopes = Self::NONE;
        for part in value.split(|c| c == '|' || c == ',').map(str::trim) {
            scopes |= match part {
                "None" | "" => Self::NONE,
                _ => NAMES
                    .iter()
                    .find(|(_, name)| *name == part)
                    .map(|(flag, _)| *flag)
                    .ok_or_else(|| ParseScopeError(part.to_string()))?,
            };
        }
        Ok(scopes)
    }
}

impl Serialize for WitnessScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WitnessScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_bits() {
        assert_eq!(WitnessScope::NONE.bits(), 0x00);
        assert_eq!(WitnessScope::CALLED_BY_ENTRY.bits(), 0x01);
        assert_eq!(WitnessScope::CUSTOM_CONTRACTS.bits(), 0x10);
        assert_eq!(WitnessScope::CUSTOM_GROUPS.bits(), 0x20);
        assert_eq!(WitnessScope::WITNESS_RULES.bits(), 0x40);
        assert_eq!(WitnessScope::GLOBAL.bits(), 0x80);
    }

    #[test]
    fn validity() {
        assert!(WitnessScope::is_valid_bits(0x00));
        assert!(WitnessScope::is_valid_bits(0x71));
        assert!(WitnessScope::is_valid_bits(0x80));
        assert!(!WitnessScope::is_valid_bits(0x81));
        assert!(!WitnessScope::is_valid_bits(0x02));
    }

    #[test]
    fn text_form() {
        let scopes = WitnessScope::CALLED_BY_ENTRY | WitnessScope::CUSTOM_CONTRACTS;
        assert_eq!(scopes.to_string(), "CalledByEntry, CustomContracts");
        assert_eq!("CalledByEntry, CustomContracts".parse::<WitnessScope>().unwrap(), scopes);
        assert_eq!("CalledByEntry|CustomContracts".parse::<WitnessScope>().unwrap(), scopes);
        assert_eq!(WitnessScope::NONE.to_string(), "None");
        assert_eq!("None".parse::<WitnessScope>().unwrap(), WitnessScope::NONE);
        assert!("Everything".parse::<WitnessScope>().is_err());
        assert!(scopes.has_scope(WitnessScope::CALLED_BY_ENTRY));
        assert!(!scopes.has_scope(WitnessScope::GLOBAL));
    }
}
