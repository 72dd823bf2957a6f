// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! The built transaction: an immutable body plus accumulated witnesses.

mod codec;


use std::collections::HashSet;

use neo_base::{
    encoding::{decode_hex, DecodeError, NeoDecode, NeoEncode, ToHex},
    UInt160, UInt256,
};
use serde::{Serialize, Serializer};

use super::{
    Signer, TransactionAttribute, TransactionAttributeType, Witness, MAX_SCRIPT_SIZE,
    MAX_TRANSACTION_ATTRIBUTES, MAX_TRANSACTION_SIZE,
};
use crate::{TxError, TxResult};

/// A Neo N3 transaction. Everything except the witness list is fixed once
/// the value exists, so the hash never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    version: u8,
    nonce: u32,
    system_fee: u64,
    network_fee: u64,
    valid_until_block: u32,
    signers: Vec<Signer>,
    attributes: Vec<TransactionAttribute>,
    script: Vec<u8>,
    witnesses: Vec<Witness>,
}

impl Transaction {
    /// Assembles a transaction whose body has already passed [`check_body`].
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        version: u8,
        nonce: u32,
        system_fee: u64,
        network_fee: u64,
        valid_until_block: u32,
        signers: Vec<Signer>,
        attributes: Vec<TransactionAttribute>,
        script: Vec<u8>,
    ) -> Self {
        Self {
            version,
            nonce,
            system_fee,
            network_fee,
            valid_until_block,
            signers,
            attributes,
            script,
            witnesses: Vec::new(),
        }
    }

    #[inline]
    pub fn version(&self) -> u8 {
        self.version
    }

    #[inline]
    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    #[inline]
    pub fn system_fee(&self) -> u64 {
        self.system_fee
    }

    #[inline]
    pub fn network_fee(&self) -> u64 {
        self.network_fee
    }

    #[inline]
    pub fn valid_until_block(&self) -> u32 {
        self.valid_until_block
    }

    #[inline]
    pub fn signers(&self) -> &[Signer] {
        &self.signers
    }

    #[inline]
    pub fn attributes(&self) -> &[TransactionAttribute] {
        &self.attributes
    }

    #[inline]
    pub fn script(&self) -> &[u8] {
        &self.script
    }

    #[inline]
    pub fn witnesses(&self) -> &[Witness] {
        &self.witnesses
    }

    /// The fee payer, i.e. the first signer.
    #[inline]
    pub fn sender(&self) -> Option<UInt160> {
        self.signers.first().map(Signer::account)
    }

    /// The attribute of the given kind, if present.
    pub fn attribute(&self, ty: TransactionAttributeType) -> Option<&TransactionAttribute> {
        self.attributes.iter().find(|attr| attr.attribute_type() == ty)
    }

    /// Serialization of every field except the witnesses.
    pub fn hash_data(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.unsigned_size());
        self.encode_unsigned(&mut buf);
        buf
    }

    /// Double SHA-256 of [`Self::hash_data`], computed on every call.
    #[inline]
    pub fn hash(&self) -> UInt256 {
        UInt256::hash_of(&self.hash_data())
    }

    /// The message accounts sign: network magic (LE) followed by the hash.
    pub fn sign_data(&self, network: u32) -> Vec<u8> {
        let mut data = Vec::with_capacity(4 + UInt256::LENGTH);
        data.extend_from_slice(&network.to_le_bytes());
        data.extend_from_slice(self.hash().as_bytes());
        data
    }

    /// Appends a witness. Witnesses sit outside the hashed body.
    pub fn add_witness(&mut self, witness: Witness) {
        self.witnesses.push(witness);
    }

    /// Full serialized size, witnesses included.
    #[inline]
    pub fn size(&self) -> usize {
        self.encoded_size()
    }

    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        NeoEncode::to_vec(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> TxResult<Self> {
        if bytes.len() > MAX_TRANSACTION_SIZE {
            return Err(TxError::SizeExceeded {
                what: "transaction",
                max: MAX_TRANSACTION_SIZE,
            });
        }
        Ok(Self::from_neo_bytes(bytes)?)
    }

    #[inline]
    pub fn to_hex(&self) -> String {
        self.to_bytes().to_hex_lower()
    }

    pub fn from_hex(value: &str) -> TxResult<Self> {
        let bytes = decode_hex(value).map_err(|err| TxError::invalid_argument("hex", err.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

/// A broken transaction limit, reported as a `TxError` by the builder and as
/// a `DecodeError` by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    NoSigner,
    TooManySigners,
    DuplicateSigner(UInt160),
    TooManyAttributes,
    DuplicateAttribute,
    EmptyScript,
    ScriptTooLarge,
}

/// Checks the limits shared by every way of producing a transaction body.
pub(crate) fn check_body(
    signers: &[Signer],
    attributes: &[TransactionAttribute],
    script: &[u8],
) -> Result<(), Violation> {
    if signers.is_empty() {
        return Err(Violation::NoSigner);
    }
    if signers.len() > MAX_TRANSACTION_ATTRIBUTES {
        return Err(Violation::TooManySigners);
    }
    let mut accounts = HashSet::with_capacity(signers.len());
    if let Some(dup) = signers.iter().find(|signer| !accounts.insert(signer.account())) {
        return Err(Violation::DuplicateSigner(dup.account()));
    }

    if signers.len() + attributes.len() > MAX_TRANSACTION_ATTRIBUTES {
        return Err(Violation::TooManyAttributes);
    }
    let mut kinds = HashSet::with_capacity(attributes.len());
    let duplicated = attributes
        .iter()
        .filter(|attr| !attr.allow_multiple())
        .any(|attr| !kinds.insert(attr.attribute_type()));
    if duplicated {
        return Err(Violation::DuplicateAttribute);
    }

    if script.is_empty() {
        return Err(Violation::EmptyScript);
    }
    if script.len() > MAX_SCRIPT_SIZE {
        return Err(Violation::ScriptTooLarge);
    }
    Ok(())
}

impl From<Violation> for TxError {
    fn from(violation: Violation) -> Self {
        match violation {
            Violation::NoSigner => TxError::NoSigner,
            Violation::TooManySigners => TxError::TooManyItems {
                field: "signers",
                max: MAX_TRANSACTION_ATTRIBUTES,
            },
            Violation::DuplicateSigner(account) => TxError::DuplicateSigner(account),
            Violation::TooManyAttributes => TxError::TooManyItems {
                field: "attributes",
                max: MAX_TRANSACTION_ATTRIBUTES,
            },
            Violation::DuplicateAttribute => {
                TxError::invalid_argument("attributes", "only Conflicts may appear more than once")
            }
            Violation::EmptyScript => TxError::invalid_argument("script", "script is empty"),
            Violation::ScriptTooLarge => TxError::SizeExceeded {
                what: "script",
                max: MAX_SCRIPT_SIZE,
            },
        }
    }
}

impl From<Violation> for DecodeError {
    fn from(violation: Violation) -> Self {
        match violation {
            Violation::NoSigner => DecodeError::InvalidFormat("transaction without signers"),
            Violation::TooManySigners | Violation::TooManyAttributes => DecodeError::LengthOutOfRange {
                len: (MAX_TRANSACTION_ATTRIBUTES + 1) as u64,
                max: MAX_TRANSACTION_ATTRIBUTES as u64,
            },
            Violation::DuplicateSigner(_) => DecodeError::InvalidFormat("duplicate signer"),
            Violation::DuplicateAttribute => DecodeError::InvalidFormat("duplicate attribute"),
            Violation::EmptyScript => DecodeError::InvalidFormat("empty script"),
            Violation::ScriptTooLarge => DecodeError::LengthOutOfRange {
                len: (MAX_SCRIPT_SIZE + 1) as u64,
                max: MAX_SCRIPT_SIZE as u64,
            },
        }
    }
}

fn as_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// The JSON shape node RPC uses for transactions.
#[derive(Serialize)]
struct TransactionJson<'a> {
    hash: UInt256,
    size: usize,
    version: u8,
    nonce: u32,
    #[serde(serialize_with = "as_string")]
    sysfee: u64,
    #[serde(serialize_with = "as_string")]
    netfee: u64,
    validuntilblock: u32,
    signers: &'a [Signer],
    attributes: &'a [TransactionAttribute],
    #[serde(serialize_with = "super::b64::serialize")]
    script: &'a [u8],
    witnesses: &'a [Witness],
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        TransactionJson {
            hash: self.hash(),
            size: self.size(),
            version: self.version,
            nonce: self.nonce,
            sysfee: self.system_fee,
            netfee: self.network_fee,
            validuntilblock: self.valid_until_block,
            signers: &self.signers,
            attributes: &self.attributes,
            script: &self.script,
            witnesses: &self.witnesses,
        }
        .serialize(serializer)
    }
}
