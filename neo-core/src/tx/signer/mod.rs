// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! The accounts that authorize a transaction and how far each authorization reaches.


use neo_base::{
    encoding::{read_array, var_size, DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite},
    UInt160,
};
use neo_crypto::PublicKey;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{WitnessRule, WitnessScope, MAX_SUBITEMS};
use crate::{TxError, TxResult};

/// An account hash plus the witness scopes it grants and the payload those
/// scopes need. Every constructor and mutator keeps the scope invariants:
/// `Global` stands alone, each list holds at most [`MAX_SUBITEMS`] entries and
/// a non-empty list always has its scope bit set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signer {
    account: UInt160,
    scopes: WitnessScope,
    allowed_contracts: Vec<UInt160>,
    allowed_groups: Vec<PublicKey>,
    rules: Vec<WitnessRule>,
}

impl Signer {
    pub fn new(account: UInt160, scopes: WitnessScope) -> TxResult<Self> {
        check_scopes(scopes).map_err(|reason| TxError::invalid_argument("scopes", reason))?;
        Ok(Self {
            account,
            scopes,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        })
    }

    /// The common case: the signature is valid only for the entry script.
    pub fn called_by_entry(account: UInt160) -> Self {
        Self {
            account,
            scopes: WitnessScope::CALLED_BY_ENTRY,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        }
    }

    pub fn global(account: UInt160) -> Self {
        Self {
            account,
            scopes: WitnessScope::GLOBAL,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Assembles a signer from all of its parts, applying the same checks as
    /// the incremental mutators and the wire decoder.
    pub fn from_parts(
        account: UInt160,
        scopes: WitnessScope,
        allowed_contracts: Vec<UInt160>,
        allowed_groups: Vec<PublicKey>,
        rules: Vec<WitnessRule>,
    ) -> TxResult<Self> {
        let mut signer = Self::new(account, scopes)?;
        check_section(
            "allowed_contracts",
            allowed_contracts.len(),
            scopes,
            WitnessScope::CUSTOM_CONTRACTS,
        )?;
        check_section(
            "allowed_groups",
            allowed_groups.len(),
            scopes,
            WitnessScope::CUSTOM_GROUPS,
        )?;
        check_section("rules", rules.len(), scopes, WitnessScope::WITNESS_RULES)?;
        rules
            .iter()
            .try_for_each(|rule| rule.condition().validate())?;

        signer.allowed_contracts = allowed_contracts;
        signer.allowed_groups = allowed_groups;
        signer.rules = rules;
        Ok(signer)
    }

    #[inline]
    pub fn account(&self) -> UInt160 {
        self.account
    }

    #[inline]
    pub fn scopes(&self) -> WitnessScope {
        self.scopes
    }

    #[inline]
    pub fn allowed_contracts(&self) -> &[UInt160] {
        &self.allowed_contracts
    }

    #[inline]
    pub fn allowed_groups(&self) -> &[PublicKey] {
        &self.allowed_groups
    }

    #[inline]
    pub fn rules(&self) -> &[WitnessRule] {
        &self.rules
    }

    #[inline]
    pub fn has_scope(&self, scope: WitnessScope) -> bool {
        self.scopes.has_scope(scope)
    }

    /// Adds scope bits. Mixing `Global` with anything else is an `InvalidState`.
    pub fn add_scope(&mut self, scope: WitnessScope) -> TxResult<&mut Self> {
        let combined = self.scopes | scope;
        check_scopes(combined).map_err(|reason| TxError::InvalidState(reason.into()))?;
        self.scopes = combined;
        Ok(self)
    }

    pub fn add_allowed_contract(&mut self, hash: UInt160) -> TxResult<&mut Self> {
        self.make_room("allowed_contracts", self.allowed_contracts.len())?;
        self.allowed_contracts.push(hash);
        self.scopes |= WitnessScope::CUSTOM_CONTRACTS;
        Ok(self)
    }

    pub fn add_allowed_group(&mut self, group: PublicKey) -> TxResult<&mut Self> {
        self.make_room("allowed_groups", self.allowed_groups.len())?;
        self.allowed_groups.push(group);
        self.scopes |= WitnessScope::CUSTOM_GROUPS;
        Ok(self)
    }

    pub fn add_rule(&mut self, rule: WitnessRule) -> TxResult<&mut Self> {
        self.make_room("rules", self.rules.len())?;
        rule.condition().validate()?;
        self.rules.push(rule);
        self.scopes |= WitnessScope::WITNESS_RULES;
        Ok(self)
    }

    fn make_room(&self, field: &'static str, len: usize) -> TxResult<()> {
        if self.scopes.contains(WitnessScope::GLOBAL) {
            return Err(TxError::InvalidState(format!(
                "signer {} has the Global scope, `{field}` cannot be added",
                self.account
            )));
        }
        if len >= MAX_SUBITEMS {
            return Err(TxError::TooManyItems {
                field,
                max: MAX_SUBITEMS,
            });
        }
        Ok(())
    }

    /// Serialized size: account and scope byte, then each section its scope
    /// bit enables.
    pub fn size(&self) -> usize {
        let mut size = UInt160::LENGTH + 1;
        if self.has_scope(WitnessScope::CUSTOM_CONTRACTS) {
            size += var_size(self.allowed_contracts.len() as u64)
                + self.allowed_contracts.len() * UInt160::LENGTH;
        }
        if self.has_scope(WitnessScope::CUSTOM_GROUPS) {
            size += var_size(self.allowed_groups.len() as u64)
                + self
                    .allowed_groups
                    .iter()
                    .map(NeoEncode::encoded_size)
                    .sum::<usize>();
        }
        if self.has_scope(WitnessScope::WITNESS_RULES) {
            size += var_size(self.rules.len() as u64)
                + self.rules.iter().map(NeoEncode::encoded_size).sum::<usize>();
        }
        size
    }
}

fn check_scopes(scopes: WitnessScope) -> Result<(), &'static str> {
    if !WitnessScope::is_valid_bits(scopes.bits()) {
        if scopes.contains(WitnessScope::GLOBAL) {
            return Err("Global cannot be combined with other scopes");
        }
        return Err("undefined scope bits");
    }
    Ok(())
}

fn check_section(field: &'static str, len: usize, scopes: WitnessScope, bit: WitnessScope) -> TxResult<()> {
    if len > MAX_SUBITEMS {
        return Err(TxError::TooManyItems {
            field,
            max: MAX_SUBITEMS,
        });
    }
    if len > 0 && !scopes.contains(bit) {
        return Err(TxError::invalid_argument(
            field,
            format!("entries require the {bit} scope"),
        ));
    }
    Ok(())
}

impl NeoEncode for Signer {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        self.account.neo_encode(writer);
        writer.write_u8(self.scopes.bits());
        if self.has_scope(WitnessScope::CUSTOM_CONTRACTS) {
            self.allowed_contracts.neo_encode(writer);
        }
        if self.has_scope(WitnessScope::CUSTOM_GROUPS) {
            self.allowed_groups.neo_encode(writer);
        }
        if self.has_scope(WitnessScope::WITNESS_RULES) {
            self.rules.neo_encode(writer);
        }
    }

    #[inline]
    fn encoded_size(&self) -> usize {
        self.size()
    }
}

impl NeoDecode for Signer {
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        let account = UInt160::neo_decode(reader)?;
        let bits = reader.read_u8()?;
        if !WitnessScope::is_valid_bits(bits) {
            return Err(DecodeError::InvalidFormat("witness scope"));
        }
        let scopes = WitnessScope::from_bits_retain(bits);

        let allowed_contracts = if scopes.contains(WitnessScope::CUSTOM_CONTRACTS) {
            read_array(reader, MAX_SUBITEMS)?
        } else {
            Vec::new()
        };
        let allowed_groups = if scopes.contains(WitnessScope::CUSTOM_GROUPS) {
            read_array(reader, MAX_SUBITEMS)?
        } else {
            Vec::new()
        };
        let rules = if scopes.contains(WitnessScope::WITNESS_RULES) {
            read_array(reader, MAX_SUBITEMS)?
        } else {
            Vec::new()
        };

        Ok(Self {
            account,
            scopes,
            allowed_contracts,
            allowed_groups,
            rules,
        })
    }
}

fn is_empty<T>(items: &&[T]) -> bool {
    items.is_empty()
}

#[derive(Serialize)]
struct SignerRef<'a> {
    account: &'a UInt160,
    scopes: WitnessScope,
    #[serde(rename = "allowedcontracts", skip_serializing_if = "is_empty")]
    allowed_contracts: &'a [UInt160],
    #[serde(rename = "allowedgroups", skip_serializing_if = "is_empty")]
    allowed_groups: &'a [PublicKey],
    #[serde(skip_serializing_if = "is_empty")]
    rules: &'a [WitnessRule],
}

#[derive(Deserialize)]
struct SignerDto {
    account: UInt160,
    scopes: WitnessScope,
    #[serde(rename = "allowedcontracts", default)]
    allowed_contracts: Vec<UInt160>,
    #[serde(rename = "allowedgroups", default)]
    allowed_groups: Vec<PublicKey>,
    #[serde(default)]
    rules: Vec<WitnessRule>,
}

impl Serialize for Signer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        SignerRef {
            account: &self.account,
            scopes: self.scopes,
            allowed_contracts: &self.allowed_contracts,
            allowed_groups: &self.allowed_groups,
            rules: &self.rules,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Signer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dto = SignerDto::deserialize(deserializer)?;
        Signer::from_parts(
            dto.account,
            dto.scopes,
            dto.allowed_contracts,
            dto.allowed_groups,
            dto.rules,
        )
        .map_err(serde::de::Error::custom)
    }
}
