// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Signing accounts consumed by the transaction builder.

use async_trait::async_trait;
use neo_base::UInt160;
use neo_crypto::{KeyError, Keypair, PrivateKey, PublicKey, Secp256r1Sign, SignError, Signature};

use crate::{
    script::{multi_sig_redeem_script, parse_multi_sig_script, signature_redeem_script},
    TxError, TxResult,
};

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("signing failed: {0}")]
    Sign(#[from] SignError),

    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A remote signer or hardware device reported an error.
    #[error("signing backend: {0}")]
    Backend(String),
}

/// Threshold and sorted participants of an m-of-n account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSigInfo {
    pub threshold: usize,
    pub public_keys: Vec<PublicKey>,
}

/// An account able to authorize transactions. Signing is async since keys may
/// live behind a remote signer or a hardware device.
#[async_trait]
pub trait Account: Send + Sync {
    fn script_hash(&self) -> UInt160;

    fn verification_script(&self) -> &[u8];

    /// The signing key of a single-signature account.
    fn public_key(&self) -> Option<PublicKey> {
        None
    }

    fn multi_sig(&self) -> Option<MultiSigInfo> {
        None
    }

    #[inline]
    fn is_multi_sig(&self) -> bool {
        self.multi_sig().is_some()
    }

    /// Signs `message` (SHA-256 is applied by the signer).
    async fn sign(&self, message: &[u8]) -> Result<Signature, AccountError>;
}

/// A single-signature account backed by an in-memory key pair.
#[derive(Debug, Clone)]
pub struct KeyPairAccount {
    keypair: Keypair,
    verification_script: Vec<u8>,
    script_hash: UInt160,
}

impl KeyPairAccount {
    pub fn new(keypair: Keypair) -> Self {
        let verification_script = signature_redeem_script(&keypair.public_key);
        let script_hash = UInt160::from_script(&verification_script);
        Self {
            keypair,
            verification_script,
            script_hash,
        }
    }

    pub fn from_private_key(private_key: PrivateKey) -> Result<Self, KeyError> {
        Keypair::from_private(private_key).map(Self::new)
    }

    #[inline]
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

#[async_trait]
impl Account for KeyPairAccount {
    #[inline]
    fn script_hash(&self) -> UInt160 {
        self.script_hash
    }

    #[inline]
    fn verification_script(&self) -> &[u8] {
        &self.verification_script
    }

    #[inline]
    fn public_key(&self) -> Option<PublicKey> {
        Some(self.keypair.public_key)
    }

    async fn sign(&self, message: &[u8]) -> Result<Signature, AccountError> {
        Ok(self.keypair.secp256r1_sign(message)?)
    }
}

/// An m-of-n account. It holds no keys: the builder collects signatures from
/// participant accounts supplied at signing time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiSigAccount {
    info: MultiSigInfo,
    verification_script: Vec<u8>,
    script_hash: UInt160,
}

impl MultiSigAccount {
    pub fn new(threshold: usize, public_keys: &[PublicKey]) -> TxResult<Self> {
        let verification_script = multi_sig_redeem_script(threshold, public_keys)?;
        Self::from_verification_script(verification_script)
    }

    /// Wraps an existing standard multi-signature verification script.
    pub fn from_verification_script(verification_script: Vec<u8>) -> TxResult<Self> {
        let (threshold, public_keys) = parse_multi_sig_script(&verification_script).ok_or_else(|| {
            TxError::invalid_argument("verification_script", "not a standard multi-signature script")
        })?;
        let script_hash = UInt160::from_script(&verification_script);
        Ok(Self {
            info: MultiSigInfo {
                threshold,
                public_keys,
            },
            verification_script,
            script_hash,
        })
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.info.threshold
    }

    #[inline]
    pub fn public_keys(&self) -> &[PublicKey] {
        &self.info.public_keys
    }
}

#[async_trait]
impl Account for MultiSigAccount {
    #[inline]
    fn script_hash(&self) -> UInt160 {
        self.script_hash
    }

    #[inline]
    fn verification_script(&self) -> &[u8] {
        &self.verification_script
    }

    fn multi_sig(&self) -> Option<MultiSigInfo> {
        Some(self.info.clone())
    }

    async fn sign(&self, _message: &[u8]) -> Result<Signature, AccountError> {
        Err(AccountError::Unsupported(
            "a multi-signature account signs through its participants".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use neo_crypto::Secp256r1Verify;

    use super::*;

    fn account(seed: u8) -> KeyPairAccount {
        KeyPairAccount::from_private_key(PrivateKey::new([seed; 32])).unwrap()
    }

    #[tokio::test]
    async fn key_pair_account_signs_verifiably() {
        let account = account(1);
        let key = account.public_key().unwrap();
        assert_eq!(account.verification_script(), signature_redeem_script(&key).as_slice());
        assert_eq!(
            account.script_hash(),
            UInt160::from_script(account.verification_script())
        );
        assert!(!account.is_multi_sig());

        let signature = account.sign(b"message").await.unwrap();
        assert!(signature.is_canonical());
        key.secp256r1_verify(b"message", &signature).unwrap();
    }

    #[tokio::test]
    async fn multi_sig_account_reports_sorted_participants() {
        let keys: Vec<_> = (1..=3u8).map(|seed| account(seed).public_key().unwrap()).collect();
        let multi = MultiSigAccount::new(2, &keys).unwrap();

        let info = multi.multi_sig().unwrap();
        assert_eq!(info.threshold, 2);
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(info.public_keys, sorted);
        assert!(multi.is_multi_sig());
        assert!(multi.public_key().is_none());
        assert_eq!(
            MultiSigAccount::from_verification_script(multi.verification_script().to_vec()).unwrap(),
            multi
        );

        assert!(matches!(
            multi.sign(b"message").await,
            Err(AccountError::Unsupported(_))
        ));
    }

    #[test]
    fn multi_sig_account_rejects_bad_parameters() {
        let keys = [account(1).public_key().unwrap()];
        assert!(MultiSigAccount::new(2, &keys).is_err());
        assert!(MultiSigAccount::new(0, &keys).is_err());
        assert!(matches!(
            MultiSigAccount::from_verification_script(vec![0x11]),
            Err(TxError::InvalidArgument {
                field: "verification_script",
                ..
            })
        ));
    }
}
