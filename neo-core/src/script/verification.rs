// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use neo_base::encoding::DecodeError;
use neo_crypto::{ecc256::PUBLIC_KEY_SIZE, signature::SIGNATURE_SIZE, PublicKey, Signature};

use super::{interop_hash, opcode, ScriptBuilder, CHECK_MULTISIG, CHECK_SIG};
use crate::{tx::MAX_VERIFICATION_SCRIPT, TxError, TxResult};

/// Most participants a standard multi-signature script may list.
pub const MAX_MULTISIG_KEYS: usize = 1024;

/// `PUSHDATA1 <33-byte key> SYSCALL System.Crypto.CheckSig`
pub fn signature_redeem_script(key: &PublicKey) -> Vec<u8> {
    let mut sb = ScriptBuilder::new();
    sb.emit_push(&key.to_compressed()).emit_syscall(CHECK_SIG);
    sb.into_bytes()
}

/// `PUSH m, PUSHDATA1 key.. (ascending), PUSH n, SYSCALL System.Crypto.CheckMultisig`
pub fn multi_sig_redeem_script(threshold: usize, keys: &[PublicKey]) -> TxResult<Vec<u8>> {
    if keys.is_empty() || keys.len() > MAX_MULTISIG_KEYS {
        return Err(TxError::invalid_argument(
            "public_keys",
            format!("expected 1..={MAX_MULTISIG_KEYS} keys, got {}", keys.len()),
        ));
    }
    if threshold == 0 || threshold > keys.len() {
        return Err(TxError::invalid_argument(
            "threshold",
            format!("expected 1..={}, got {threshold}", keys.len()),
        ));
    }

    let mut sorted = keys.to_vec();
    sorted.sort();
    if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
        return Err(TxError::invalid_argument("public_keys", "duplicate key"));
    }

    let mut sb = ScriptBuilder::new();
    sb.emit_push_int(threshold as i64);
    for key in &sorted {
        sb.emit_push(&key.to_compressed());
    }
    sb.emit_push_int(sorted.len() as i64).emit_syscall(CHECK_MULTISIG);
    if sb.len() > MAX_VERIFICATION_SCRIPT {
        return Err(TxError::SizeExceeded {
            what: "verification script",
            max: MAX_VERIFICATION_SCRIPT,
        });
    }
    Ok(sb.into_bytes())
}

/// Reads the key back out of a standard single-signature script.
pub fn parse_signature_script(script: &[u8]) -> Option<PublicKey> {
    if script.len() != 2 + PUBLIC_KEY_SIZE + 5
        || script[0] != opcode::PUSHDATA1
        || script[1] != PUBLIC_KEY_SIZE as u8
        || script[35] != opcode::SYSCALL
        || script[36..] != interop_hash(CHECK_SIG)
    {
        return None;
    }
    PublicKey::from_sec1_bytes(&script[2..35]).ok()
}

/// Reads `(threshold, keys)` back out of a standard multi-signature script.
pub fn parse_multi_sig_script(script: &[u8]) -> Option<(usize, Vec<PublicKey>)> {
    let mut cursor = script;
    let threshold = read_small_int(&mut cursor)?;

    let mut keys = Vec::new();
    while cursor.len() > 2 && cursor[0] == opcode::PUSHDATA1 && cursor[1] == PUBLIC_KEY_SIZE as u8 {
        let key = cursor.get(2..2 + PUBLIC_KEY_SIZE)?;
        keys.push(PublicKey::from_sec1_bytes(key).ok()?);
        cursor = &cursor[2 + PUBLIC_KEY_SIZE..];
    }

    let count = read_small_int(&mut cursor)?;
    if count != keys.len() || threshold == 0 || threshold > count {
        return None;
    }
    if cursor.len() != 5 || cursor[0] != opcode::SYSCALL || cursor[1..] != interop_hash(CHECK_MULTISIG) {
        return None;
    }
    Some((threshold, keys))
}

fn read_small_int(cursor: &mut &[u8]) -> Option<usize> {
    let (value, used) = match *cursor.first()? {
        op @ opcode::PUSH1..=opcode::PUSH16 => ((op - opcode::PUSH0) as usize, 1),
        opcode::PUSHINT8 => (usize::try_from(*cursor.get(1)? as i8).ok()?, 2),
        opcode::PUSHINT16 => {
            let bytes = cursor.get(1..3)?;
            (usize::try_from(i16::from_le_bytes([bytes[0], bytes[1]])).ok()?, 3)
        }
        _ => return None,
    };
    *cursor = &cursor[used..];
    Some(value)
}

/// Pushes each 64-byte signature in order.
pub fn invocation_script(signatures: &[Signature]) -> Vec<u8> {
    let mut sb = ScriptBuilder::new();
    for signature in signatures {
        sb.emit_push(&signature.to_bytes());
    }
    sb.into_bytes()
}

/// Splits an invocation script made only of 64-byte signature pushes.
pub fn parse_invocation_script(script: &[u8]) -> Result<Vec<Signature>, DecodeError> {
    let mut signatures = Vec::new();
    let mut cursor = script;
    while !cursor.is_empty() {
        if cursor.len() < 2 + SIGNATURE_SIZE {
            return Err(DecodeError::Truncated {
                needed: 2 + SIGNATURE_SIZE,
                remaining: cursor.len(),
            });
        }
        if cursor[0] != opcode::PUSHDATA1 || cursor[1] != SIGNATURE_SIZE as u8 {
            return Err(DecodeError::InvalidFormat("signature push"));
        }
        let signature = Signature::from_bytes(&cursor[2..2 + SIGNATURE_SIZE])
            .map_err(|_| DecodeError::InvalidFormat("signature"))?;
        signatures.push(signature);
        cursor = &cursor[2 + SIGNATURE_SIZE..];
    }
    Ok(signatures)
}
