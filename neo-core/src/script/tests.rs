// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use hex_literal::hex;
use neo_crypto::{Keypair, PrivateKey, PublicKey, Signature};

use super::*;
use crate::TxError;

fn key(seed: u8) -> PublicKey {
    Keypair::from_private(PrivateKey::new([seed; 32]))
        .unwrap()
        .public_key
}

#[test]
fn interop_hashes() {
    assert_eq!(interop_hash(CHECK_SIG), hex!("56e7b327"));
    assert_eq!(interop_hash(CHECK_MULTISIG), hex!("9ed0dc3a"));
}

#[test]
fn push_int_forms() {
    let cases: [(i64, &[u8]); 8] = [
        (-1, &hex!("0f")),
        (0, &hex!("10")),
        (16, &hex!("20")),
        (17, &hex!("0011")),
        (-2, &hex!("00fe")),
        (1024, &hex!("010004")),
        (70_000, &hex!("0270110100")),
        (i64::MAX, &hex!("03ffffffffffffff7f")),
    ];
    for (value, expected) in cases {
        let mut sb = ScriptBuilder::new();
        sb.emit_push_int(value);
        assert_eq!(sb.into_bytes(), expected, "value {value}");
    }
}

#[test]
fn push_data_forms() {
    let mut sb = ScriptBuilder::new();
    sb.emit_push(&[0xAA; 3]);
    assert_eq!(sb.to_bytes(), hex!("0c03aaaaaa"));

    let mut sb = ScriptBuilder::new();
    sb.emit_push(&[0u8; 256]);
    assert_eq!(&sb.to_bytes()[..3], &hex!("0d0001"));
    assert_eq!(sb.len(), 3 + 256);
}

#[test]
fn single_sig_script_layout() {
    let pk = key(1);
    let script = signature_redeem_script(&pk);
    assert_eq!(script.len(), 40);
    assert_eq!(&script[..2], &hex!("0c21"));
    assert_eq!(&script[2..35], &pk.to_compressed());
    assert_eq!(&script[35..], &hex!("4156e7b327"));
    assert_eq!(parse_signature_script(&script), Some(pk));
    assert_eq!(parse_signature_script(&script[..39]), None);
}

#[test]
fn multi_sig_script_sorts_keys_and_records_threshold() {
    let keys = [key(3), key(1), key(2)];
    let script = multi_sig_redeem_script(2, &keys).unwrap();

    assert_eq!(script[0], opcode::PUSH0 + 2);
    assert_eq!(script[script.len() - 6], opcode::PUSH0 + 3);
    assert_eq!(&script[script.len() - 5..], &hex!("419ed0dc3a"));

    let (threshold, parsed) = parse_multi_sig_script(&script).unwrap();
    let mut sorted = keys.to_vec();
    sorted.sort();
    assert_eq!(threshold, 2);
    assert_eq!(parsed, sorted);

    // key order does not change the script
    let reordered = multi_sig_redeem_script(2, &[key(2), key(3), key(1)]).unwrap();
    assert_eq!(reordered, script);
}

#[test]
fn multi_sig_script_rejects_bad_parameters() {
    let keys = [key(1), key(2)];
    assert!(multi_sig_redeem_script(0, &keys).is_err());
    assert!(multi_sig_redeem_script(3, &keys).is_err());
    assert!(multi_sig_redeem_script(1, &[]).is_err());
    assert!(multi_sig_redeem_script(1, &[key(1), key(1)]).is_err());
    assert_eq!(parse_multi_sig_script(&signature_redeem_script(&key(1))), None);
}

#[test]
fn multi_sig_script_fits_a_witness() {
    let keys: Vec<_> = (1..=30).map(key).collect();

    let widest = multi_sig_redeem_script(1, &keys[..29]).unwrap();
    assert_eq!(widest.len(), 1023);
    assert_eq!(parse_multi_sig_script(&widest).map(|(m, keys)| (m, keys.len())), Some((1, 29)));

    assert!(matches!(
        multi_sig_redeem_script(1, &keys),
        Err(TxError::SizeExceeded {
            what: "verification script",
            max: 1024
        })
    ));
}

#[test]
fn invocation_script_roundtrip() {
    let sigs = [
        Signature::from_rs([1u8; 32], [2u8; 32]),
        Signature::from_rs([3u8; 32], [4u8; 32]),
    ];
    let script = invocation_script(&sigs);
    assert_eq!(script.len(), 2 * 66);
    assert_eq!(&script[..2], &hex!("0c40"));
    assert_eq!(parse_invocation_script(&script).unwrap(), sigs);
    assert!(parse_invocation_script(&script[..70]).is_err());
    assert!(parse_invocation_script(&[]).unwrap().is_empty());
}
