// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use neo_base::UInt160;
use neo_config::ProtocolSettings;
use neo_crypto::{signature::ORDER, PrivateKey, Secp256r1Verify, Signature};

use super::*;
use crate::{
    account::{AccountError, KeyPairAccount, MultiSigAccount},
    rpc::{RpcError, RpcResult},
    tx::WitnessScope,
};

#[derive(Default)]
struct MockRpc {
    block_count: u32,
    network_fee: u64,
    requests: Mutex<Vec<Vec<u8>>>,
}

#[async_trait]
impl RpcProvider for MockRpc {
    async fn get_block_count(&self) -> RpcResult<u32> {
        Ok(self.block_count)
    }

    async fn calculate_network_fee(&self, tx: &[u8]) -> RpcResult<u64> {
        self.requests.lock().unwrap().push(tx.to_vec());
        Ok(self.network_fee)
    }
}

struct UnreachableRpc;

#[async_trait]
impl RpcProvider for UnreachableRpc {
    async fn get_block_count(&self) -> RpcResult<u32> {
        Err(RpcError::Timeout)
    }

    async fn calculate_network_fee(&self, _tx: &[u8]) -> RpcResult<u64> {
        Err(RpcError::Transport("connection refused".into()))
    }
}

/// Never answers within any sane timeout.
struct SlowAccount(KeyPairAccount);

#[async_trait]
impl Account for SlowAccount {
    fn script_hash(&self) -> UInt160 {
        self.0.script_hash()
    }

    fn verification_script(&self) -> &[u8] {
        self.0.verification_script()
    }

    async fn sign(&self, message: &[u8]) -> Result<Signature, AccountError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        self.0.sign(message).await
    }
}

/// Returns the high-S twin of a valid signature.
struct HighSAccount(KeyPairAccount);

#[async_trait]
impl Account for HighSAccount {
    fn script_hash(&self) -> UInt160 {
        self.0.script_hash()
    }

    fn verification_script(&self) -> &[u8] {
        self.0.verification_script()
    }

    fn public_key(&self) -> Option<PublicKey> {
        self.0.public_key()
    }

    async fn sign(&self, message: &[u8]) -> Result<Signature, AccountError> {
        let signature = self.0.sign(message).await?;
        Ok(Signature::from_rs(*signature.r(), order_minus(signature.s())))
    }
}

struct BrokenAccount(KeyPairAccount);

#[async_trait]
impl Account for BrokenAccount {
    fn script_hash(&self) -> UInt160 {
        self.0.script_hash()
    }

    fn verification_script(&self) -> &[u8] {
        self.0.verification_script()
    }

    async fn sign(&self, _message: &[u8]) -> Result<Signature, AccountError> {
        Err(AccountError::Backend("device unplugged".into()))
    }
}

fn order_minus(s: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut borrow = 0i16;
    for i in (0..32).rev() {
        let mut digit = ORDER[i] as i16 - s[i] as i16 - borrow;
        borrow = 0;
        if digit < 0 {
            digit += 256;
            borrow = 1;
        }
        out[i] = digit as u8;
    }
    out
}

fn account(seed: u8) -> KeyPairAccount {
    KeyPairAccount::from_private_key(PrivateKey::new([seed; 32])).unwrap()
}

fn ready_builder(signer: UInt160) -> TransactionBuilder {
    let mut builder = TransactionBuilder::new(ProtocolSettings::mainnet());
    builder
        .set_script(vec![0x11])
        .set_nonce(7)
        .add_signer(Signer::called_by_entry(signer))
        .unwrap()
        .set_valid_until_block(1000)
        .unwrap();
    builder
}

#[test]
fn build_requires_signer_and_valid_until_block() {
    let mut builder = TransactionBuilder::default();
    builder.set_script(vec![0x11]);
    assert!(matches!(builder.build(), Err(TxError::NoSigner)));

    builder.add_signer(Signer::called_by_entry(UInt160::ZERO)).unwrap();
    assert!(matches!(
        builder.build(),
        Err(TxError::InvalidArgument {
            field: "valid_until_block",
            ..
        })
    ));

    builder.set_valid_until_block(10).unwrap();
    let tx = builder.build().unwrap();
    assert_eq!(tx.valid_until_block(), 10);
    assert!(tx.witnesses().is_empty());
    assert_eq!(tx.sender(), Some(UInt160::ZERO));
}

#[test]
fn valid_until_block_bounds() {
    let mut builder = ready_builder(UInt160::ZERO);
    assert!(matches!(
        builder.set_valid_until_block(0),
        Err(TxError::InvalidArgument { .. })
    ));
    assert!(matches!(
        builder.set_valid_until_block(u32::MAX as u64 + 1),
        Err(TxError::InvalidArgument { .. })
    ));
    // failed setters keep the previous value
    assert_eq!(builder.build().unwrap().valid_until_block(), 1000);

    builder.set_valid_until_block(u32::MAX as u64).unwrap();
    assert_eq!(builder.build().unwrap().valid_until_block(), u32::MAX);
}

#[test]
fn builder_is_reusable_after_errors() {
    let mut builder = ready_builder(UInt160::ZERO);
    builder.set_script(Vec::new());
    assert!(matches!(
        builder.build(),
        Err(TxError::InvalidArgument { field: "script", .. })
    ));
    builder.set_script(vec![0x11]);
    let first = builder.build().unwrap();
    let second = builder.build().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.nonce(), 7);
}

#[test]
fn signers_must_be_unique() {
    let mut builder = ready_builder(UInt160::ZERO);
    assert!(matches!(
        builder.add_signer(Signer::global(UInt160::ZERO)),
        Err(TxError::DuplicateSigner(account)) if account == UInt160::ZERO
    ));
    assert_eq!(builder.signers().len(), 1);
}

#[test]
fn signers_and_attributes_share_a_cap() {
    let mut builder = ready_builder(UInt160::ZERO);
    for i in 1..16u8 {
        builder
            .add_signer(Signer::called_by_entry(UInt160::from_script(&[i])))
            .unwrap();
    }
    assert!(matches!(
        builder.add_attribute(TransactionAttribute::HighPriority),
        Err(TxError::TooManyItems { field: "attributes", max: 16 })
    ));
    assert!(matches!(
        builder.add_signer(Signer::called_by_entry(UInt160::from_script(&[0xFF]))),
        Err(TxError::TooManyItems { field: "signers", max: 16 })
    ));
    assert_eq!(builder.build().unwrap().signers().len(), 16);
}

#[test]
fn high_priority_toggles() {
    let mut builder = ready_builder(UInt160::ZERO);
    builder.set_high_priority(true).unwrap();
    builder.set_high_priority(true).unwrap();
    assert_eq!(builder.attributes(), &[TransactionAttribute::HighPriority]);
    assert!(matches!(
        builder.add_attribute(TransactionAttribute::HighPriority),
        Err(TxError::InvalidArgument { field: "attributes", .. })
    ));

    builder.set_high_priority(false).unwrap();
    assert!(builder.attributes().is_empty());
    assert!(builder.build().unwrap().attributes().is_empty());
}

#[test]
fn fee_adjustments_are_additive() {
    let mut builder = ready_builder(UInt160::ZERO);
    builder.set_system_fee(100).set_network_fee(1000);
    builder.add_system_fee(5).unwrap().add_system_fee(5).unwrap();
    builder.add_network_fee(1).unwrap();

    let tx = builder.build().unwrap();
    assert_eq!(tx.system_fee(), 110);
    assert_eq!(tx.network_fee(), 1001);

    builder.apply_fees(FeeEstimate {
        network_fee: 2000,
        system_fee: 0,
    });
    assert_eq!(
        builder.fees().unwrap(),
        FeeEstimate {
            network_fee: 2001,
            system_fee: 10
        }
    );

    builder.set_system_fee(i64::MAX as u64);
    assert!(matches!(
        builder.build(),
        Err(TxError::InvalidArgument { field: "system_fee", .. })
    ));
}

#[tokio::test]
async fn valid_until_block_from_rpc() {
    let rpc = MockRpc {
        block_count: 1000,
        ..Default::default()
    };
    let mut builder = ready_builder(UInt160::ZERO);

    builder.set_valid_until_block_from_rpc(&rpc, None).await.unwrap();
    assert_eq!(builder.build().unwrap().valid_until_block(), 999 + 5760);

    builder.set_valid_until_block_from_rpc(&rpc, Some(10)).await.unwrap();
    assert_eq!(builder.build().unwrap().valid_until_block(), 1009);

    // the chain is now known to be at 999
    builder.set_valid_until_block(999).unwrap();
    assert!(matches!(
        builder.build(),
        Err(TxError::InvalidArgument {
            field: "valid_until_block",
            ..
        })
    ));

    assert!(matches!(
        builder.set_valid_until_block_from_rpc(&rpc, Some(0)).await,
        Err(TxError::InvalidArgument { field: "increment", .. })
    ));
}

#[tokio::test]
async fn failed_rpc_leaves_builder_unchanged() {
    let mut builder = ready_builder(UInt160::ZERO);
    assert!(matches!(
        builder.set_valid_until_block_from_rpc(&UnreachableRpc, None).await,
        Err(TxError::Rpc(RpcError::Timeout))
    ));
    assert_eq!(builder.build().unwrap().valid_until_block(), 1000);

    assert!(matches!(
        builder.calculate_fees(&UnreachableRpc, &[]).await,
        Err(TxError::Rpc(RpcError::Transport(_)))
    ));
}

#[tokio::test]
async fn calculate_fees_sends_verification_witnesses() {
    let signer = account(1);
    let rpc = MockRpc {
        network_fee: 1_234_560,
        ..Default::default()
    };
    let mut builder = ready_builder(signer.script_hash());
    builder.set_system_fee(42);
    let before = builder.build().unwrap();

    let estimate = builder.calculate_fees(&rpc, &[&signer]).await.unwrap();
    assert_eq!(
        estimate,
        FeeEstimate {
            network_fee: 1_234_560,
            system_fee: 42
        }
    );
    assert_eq!(builder.build().unwrap(), before);

    let requests = rpc.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let snapshot = Transaction::from_bytes(&requests[0]).unwrap();
    assert_eq!(snapshot.witnesses().len(), 1);
    assert!(snapshot.witnesses()[0].invocation_script.is_empty());
    assert_eq!(
        snapshot.witnesses()[0].verification_script,
        signer.verification_script()
    );
    drop(requests);

    builder.apply_fees(estimate);
    assert_eq!(builder.build().unwrap().network_fee(), 1_234_560);
}

#[tokio::test]
async fn sign_attaches_verifiable_witness() {
    let signer = account(1);
    let builder = ready_builder(signer.script_hash());
    let mut tx = builder.build().unwrap();
    let hash = tx.hash();

    builder.sign(&mut tx, &[&signer]).await.unwrap();
    assert_eq!(tx.hash(), hash);
    assert_eq!(tx.witnesses().len(), 1);

    let witness = &tx.witnesses()[0];
    assert_eq!(witness.verification_script, signer.verification_script());
    assert_eq!(witness.script_hash(), signer.script_hash());
    let signatures = witness.signatures().unwrap();
    assert_eq!(signatures.len(), 1);
    let message = tx.sign_data(ProtocolSettings::mainnet().network);
    signer
        .public_key()
        .unwrap()
        .secp256r1_verify(&message, &signatures[0])
        .unwrap();

    assert!(matches!(
        builder.sign(&mut tx, &[&signer]).await,
        Err(TxError::InvalidState(_))
    ));
}

#[tokio::test]
async fn witnesses_follow_signer_order() {
    let first = account(1);
    let second = account(2);
    let mut builder = ready_builder(second.script_hash());
    builder
        .add_signer(Signer::new(first.script_hash(), WitnessScope::NONE).unwrap())
        .unwrap();

    let tx = builder.build_and_sign(&[&first, &second]).await.unwrap();
    let hashes: Vec<_> = tx.witnesses().iter().map(Witness::script_hash).collect();
    assert_eq!(hashes, vec![second.script_hash(), first.script_hash()]);
}

#[tokio::test]
async fn missing_account_is_not_found() {
    let signer = account(1);
    let stranger = account(2);
    let builder = ready_builder(signer.script_hash());
    let mut tx = builder.build().unwrap();
    assert!(matches!(
        builder.sign(&mut tx, &[&stranger]).await,
        Err(TxError::NotFound(_))
    ));
    assert!(tx.witnesses().is_empty());
}

#[tokio::test]
async fn multi_sig_collects_threshold_signatures_in_key_order() {
    let participants = [account(1), account(2), account(3)];
    let keys: Vec<_> = participants.iter().filter_map(|p| p.public_key()).collect();
    let multi = MultiSigAccount::new(2, &keys).unwrap();
    let builder = ready_builder(multi.script_hash());

    let only_one: [&dyn Account; 2] = [&multi, &participants[0]];
    assert!(matches!(
        builder.build_and_sign(&only_one).await,
        Err(TxError::NotFound(_))
    ));

    let all: [&dyn Account; 4] = [&participants[2], &participants[1], &multi, &participants[0]];
    let tx = builder.build_and_sign(&all).await.unwrap();
    let witness = &tx.witnesses()[0];
    assert_eq!(witness.verification_script, multi.verification_script());

    let signatures = witness.signatures().unwrap();
    assert_eq!(signatures.len(), 2);
    let message = tx.sign_data(ProtocolSettings::mainnet().network);
    for (signature, key) in signatures.iter().zip(multi.public_keys()) {
        key.secp256r1_verify(&message, signature).unwrap();
    }
}

#[tokio::test]
async fn two_of_three_signs_with_any_two_participants() {
    let participants = [account(1), account(2), account(3)];
    let keys: Vec<_> = participants.iter().filter_map(|p| p.public_key()).collect();
    let multi = MultiSigAccount::new(2, &keys).unwrap();
    let sorted = multi.public_keys();
    let holder = |key: &PublicKey| {
        participants
            .iter()
            .find(|p| p.public_key().as_ref() == Some(key))
            .unwrap()
    };

    // the lowest and highest key, supplied highest first
    let accounts: [&dyn Account; 3] = [&multi, holder(&sorted[2]), holder(&sorted[0])];
    let builder = ready_builder(multi.script_hash());
    let tx = builder.build_and_sign(&accounts).await.unwrap();

    let signatures = tx.witnesses()[0].signatures().unwrap();
    assert_eq!(signatures.len(), 2);
    let message = tx.sign_data(ProtocolSettings::mainnet().network);
    sorted[0].secp256r1_verify(&message, &signatures[0]).unwrap();
    sorted[2].secp256r1_verify(&message, &signatures[1]).unwrap();
}

#[tokio::test]
async fn oversized_invocation_script_is_refused() {
    let participants: Vec<_> = (1..=16).map(account).collect();
    let keys: Vec<_> = participants.iter().filter_map(|p| p.public_key()).collect();
    let multi = MultiSigAccount::new(16, &keys).unwrap();
    let mut accounts: Vec<&dyn Account> = vec![&multi];
    accounts.extend(participants.iter().map(|p| p as &dyn Account));

    let builder = ready_builder(multi.script_hash());
    let mut tx = builder.build().unwrap();
    assert!(matches!(
        builder.sign(&mut tx, &accounts).await,
        Err(TxError::SizeExceeded {
            what: "invocation script",
            max: MAX_INVOCATION_SCRIPT
        })
    ));
    assert!(tx.witnesses().is_empty());

    // fifteen signatures still fit
    let fifteen = MultiSigAccount::new(15, &keys).unwrap();
    let mut accounts: Vec<&dyn Account> = vec![&fifteen];
    accounts.extend(participants.iter().map(|p| p as &dyn Account));
    let tx = ready_builder(fifteen.script_hash())
        .build_and_sign(&accounts)
        .await
        .unwrap();
    assert_eq!(tx.witnesses()[0].invocation_script.len(), 15 * 66);
    assert_eq!(Transaction::from_bytes(&tx.to_bytes()).unwrap(), tx);
}

#[tokio::test(start_paused = true)]
async fn slow_account_times_out() {
    let slow = SlowAccount(account(1));
    let builder = ready_builder(slow.script_hash());
    let mut tx = builder.build().unwrap();

    let err = builder.sign(&mut tx, &[&slow]).await.unwrap_err();
    assert!(matches!(
        err,
        TxError::SigningTimeout { timeout, .. } if timeout == Duration::from_secs(30)
    ));
    assert!(tx.witnesses().is_empty());
}

#[tokio::test]
async fn high_s_signatures_are_normalized() {
    let account = HighSAccount(account(1));
    let builder = ready_builder(account.script_hash());
    let tx = builder.build_and_sign(&[&account]).await.unwrap();

    let signature = tx.witnesses()[0].signatures().unwrap()[0];
    assert!(signature.is_canonical());
    let message = tx.sign_data(ProtocolSettings::mainnet().network);
    account
        .public_key()
        .unwrap()
        .secp256r1_verify(&message, &signature)
        .unwrap();
}

#[tokio::test]
async fn account_failures_carry_the_account() {
    let broken = BrokenAccount(account(1));
    let builder = ready_builder(broken.script_hash());
    assert!(matches!(
        builder.build_and_sign(&[&broken]).await,
        Err(TxError::Account { account, .. }) if account == broken.script_hash()
    ));
}
