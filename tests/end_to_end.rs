// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Build, sign, serialize and parse back whole transactions across crates.

use neo_sdk::base::encoding::NeoEncode;
use neo_sdk::core::script::{parse_invocation_script, parse_multi_sig_script};
use neo_sdk::crypto::Secp256r1Verify;
use neo_sdk::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn account(seed: u8) -> KeyPairAccount {
    KeyPairAccount::from_private_key(PrivateKey::new([seed; 32])).unwrap()
}

#[tokio::test]
async fn single_signer_roundtrip() {
    init_tracing();
    let signer = account(1);
    let settings = ProtocolSettings::testnet();

    let mut builder = TransactionBuilder::new(settings.clone());
    builder
        .set_script(vec![0x11])
        .add_signer(Signer::called_by_entry(signer.script_hash()))
        .unwrap()
        .set_valid_until_block(1000)
        .unwrap();

    let tx = builder.build_and_sign(&[&signer]).await.unwrap();
    assert_eq!(tx.witnesses().len(), 1);

    let bytes = tx.to_bytes();
    assert_eq!(bytes.len(), tx.encoded_size());
    let decoded = Transaction::from_bytes(&bytes).unwrap();
    assert_eq!(decoded.hash(), tx.hash());
    assert_eq!(decoded, tx);

    let signature = decoded.witnesses()[0].signatures().unwrap()[0];
    signer
        .public_key()
        .unwrap()
        .secp256r1_verify(decoded.sign_data(settings.network), &signature)
        .unwrap();
}

#[tokio::test]
async fn extra_witness_keeps_the_hash() {
    let signer = account(2);
    let mut builder = TransactionBuilder::default();
    builder
        .set_script(vec![0x11])
        .add_signer(Signer::called_by_entry(signer.script_hash()))
        .unwrap()
        .set_valid_until_block(1000)
        .unwrap();

    let mut tx = builder.build_and_sign(&[&signer]).await.unwrap();
    let hash = tx.hash();
    tx.add_witness(Witness::new(Vec::new(), vec![0x11]));
    assert_eq!(tx.hash(), hash);
    assert_eq!(tx.witnesses().len(), 2);
}

#[tokio::test]
async fn two_of_three_multi_sig() {
    init_tracing();
    let participants = [account(3), account(4), account(5)];
    let keys: Vec<PublicKey> = participants.iter().filter_map(|p| p.public_key()).collect();
    let multi = MultiSigAccount::new(2, &keys).unwrap();

    let mut builder = TransactionBuilder::new(ProtocolSettings::mainnet());
    builder
        .set_script(vec![0x11])
        .add_signer(Signer::called_by_entry(multi.script_hash()))
        .unwrap()
        .set_valid_until_block(500)
        .unwrap();

    let accounts: [&dyn Account; 4] = [&multi, &participants[0], &participants[1], &participants[2]];
    let tx = builder.build_and_sign(&accounts).await.unwrap();
    let witness = &tx.witnesses()[0];

    let (threshold, script_keys) = parse_multi_sig_script(&witness.verification_script).unwrap();
    assert_eq!(threshold, 2);
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(script_keys, sorted);

    // exactly two 64-byte pushes, signed by the two lowest keys
    let signatures = parse_invocation_script(&witness.invocation_script).unwrap();
    assert_eq!(signatures.len(), 2);
    assert_eq!(witness.invocation_script.len(), 2 * 66);
    let message = tx.sign_data(ProtocolSettings::mainnet().network);
    for (signature, key) in signatures.iter().zip(&sorted) {
        key.secp256r1_verify(&message, signature).unwrap();
    }
}

#[tokio::test]
async fn witness_rules_survive_the_wire() {
    let signer = account(6);
    let group = account(7).public_key().unwrap();

    let condition = WitnessCondition::and(vec![
        WitnessCondition::called_by_entry(),
        WitnessCondition::not(WitnessCondition::called_by_group(group)).unwrap(),
    ])
    .unwrap();
    let mut rule_signer = Signer::new(signer.script_hash(), WitnessScope::NONE).unwrap();
    rule_signer
        .add_rule(WitnessRule::new(WitnessRuleAction::Allow, condition))
        .unwrap()
        .add_allowed_contract(UInt160::from_script(&[0x42]))
        .unwrap();

    let mut builder = TransactionBuilder::default();
    builder
        .set_script(vec![0x11])
        .add_signer(rule_signer.clone())
        .unwrap()
        .add_attribute(TransactionAttribute::Conflicts {
            hash: UInt256::hash_of(b"earlier"),
        })
        .unwrap()
        .set_high_priority(true)
        .unwrap()
        .set_valid_until_block(42)
        .unwrap();

    let tx = builder.build_and_sign(&[&signer]).await.unwrap();
    let decoded = Transaction::from_hex(&tx.to_hex()).unwrap();
    assert_eq!(decoded.signers(), &[rule_signer]);
    assert_eq!(decoded.attributes().len(), 2);

    let json = serde_json::to_value(&decoded).unwrap();
    assert_eq!(json["signers"][0]["scopes"], "CustomContracts, WitnessRules");
    assert_eq!(json["signers"][0]["rules"][0]["condition"]["type"], "And");
    assert_eq!(json["attributes"][1]["type"], "HighPriority");
}
