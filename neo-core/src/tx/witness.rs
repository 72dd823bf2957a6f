// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use neo_base::{
    encoding::{DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite},
    UInt160,
};
use neo_crypto::Signature;
use serde::{Deserialize, Serialize};

use crate::script::parse_invocation_script;

/// Largest invocation script a witness may carry.
pub const MAX_INVOCATION_SCRIPT: usize = 1024;

/// Largest verification script a witness may carry.
pub const MAX_VERIFICATION_SCRIPT: usize = 1024;

/// Invocation script (signature pushes) plus the verification script whose
/// hash names the signing account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Witness {
    #[serde(rename = "invocation", with = "super::b64")]
    pub invocation_script: Vec<u8>,
    #[serde(rename = "verification", with = "super::b64")]
    pub verification_script: Vec<u8>,
}

impl Witness {
    pub fn new(invocation_script: Vec<u8>, verification_script: Vec<u8>) -> Self {
        Self {
            invocation_script,
            verification_script,
        }
    }

    /// A witness with only the verification script, as used for fee estimation.
    pub fn verification_only(verification_script: Vec<u8>) -> Self {
        Self::new(Vec::new(), verification_script)
    }

    #[inline]
    pub fn script_hash(&self) -> UInt160 {
        UInt160::from_script(&self.verification_script)
    }

    /// Signatures pushed by the invocation script, in push order.
    pub fn signatures(&self) -> Result<Vec<Signature>, DecodeError> {
        parse_invocation_script(&self.invocation_script)
    }
}

impl NeoEncode for Witness {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_var_bytes(&self.invocation_script);
        writer.write_var_bytes(&self.verification_script);
    }
}

impl NeoDecode for Witness {
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        let invocation_script = reader.read_var_bytes(MAX_INVOCATION_SCRIPT as u64)?;
        let verification_script = reader.read_var_bytes(MAX_VERIFICATION_SCRIPT as u64)?;
        Ok(Self {
            invocation_script,
            verification_script,
        })
    }
}
