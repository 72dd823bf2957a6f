// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use neo_base::encoding::{read_array, var_size, DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite};

use super::{check_body, Transaction};
use crate::tx::{
    Signer, TransactionAttribute, Witness, HEADER_SIZE, MAX_SCRIPT_SIZE, MAX_TRANSACTION_ATTRIBUTES,
    MAX_TRANSACTION_SIZE,
};

// Wire layout: version, nonce, system fee, network fee, valid-until-block,
// signers, attributes, script, then the witnesses outside the hashed part.
impl Transaction {
    pub(crate) fn encode_unsigned<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_u8(self.version);
        writer.write_u32(self.nonce);
        writer.write_u64(self.system_fee);
        writer.write_u64(self.network_fee);
        writer.write_u32(self.valid_until_block);
        self.signers.neo_encode(writer);
        self.attributes.neo_encode(writer);
        writer.write_var_bytes(&self.script);
    }

    pub(crate) fn unsigned_size(&self) -> usize {
        HEADER_SIZE
            + self.signers.encoded_size()
            + self.attributes.encoded_size()
            + var_size(self.script.len() as u64)
            + self.script.len()
    }
}

impl NeoEncode for Transaction {
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        self.encode_unsigned(writer);
        self.witnesses.neo_encode(writer);
    }

    fn encoded_size(&self) -> usize {
        self.unsigned_size() + self.witnesses.encoded_size()
    }
}

fn read_fee<R: NeoRead>(reader: &mut R) -> Result<u64, DecodeError> {
    let fee = reader.read_u64()?;
    if fee > i64::MAX as u64 {
        return Err(DecodeError::InvalidFormat("fee out of range"));
    }
    Ok(fee)
}

impl NeoDecode for Transaction {
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        let version = reader.read_u8()?;
        if version != 0 {
            return Err(DecodeError::InvalidFormat("transaction version"));
        }
        let nonce = reader.read_u32()?;
        let system_fee = read_fee(reader)?;
        let network_fee = read_fee(reader)?;
        let valid_until_block = reader.read_u32()?;

        let signers: Vec<Signer> = read_array(reader, MAX_TRANSACTION_ATTRIBUTES)?;
        let attributes: Vec<TransactionAttribute> = read_array(reader, MAX_TRANSACTION_ATTRIBUTES.saturating_sub(signers.len()))?;
        let script = reader.read_var_bytes(MAX_SCRIPT_SIZE as u64)?;
        check_body(&signers, &attributes, &script)?;

        // an unsigned transaction carries no witnesses, a signed one at most one per signer
        let witnesses: Vec<Witness> = read_array(reader, signers.len())?;

        let tx = Self {
            version,
            nonce,
            system_fee,
            network_fee,
            valid_until_block,
            signers,
            attributes,
            script,
            witnesses,
        };
        if tx.size() > MAX_TRANSACTION_SIZE {
            return Err(DecodeError::SizeExceeded {
                ty: "transaction",
                max: MAX_TRANSACTION_SIZE,
            });
        }
        Ok(tx)
    }
}
