// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use p256::ecdsa::signature::{Signer, Verifier as P256Verifier};
use p256::ecdsa::{Signature as P256Signature, SigningKey, VerifyingKey};

use crate::{ecc256, signature::Signature};

pub trait Secp256r1Sign {
    type Sign;
    type Error;

    fn secp256r1_sign<T: AsRef<[u8]>>(&self, message: T) -> Result<Self::Sign, Self::Error>;
}

pub trait Secp256r1Verify {
    type Sign;
    type Error;

    fn secp256r1_verify<T: AsRef<[u8]>>(
        &self,
        message: T,
        sign: &Self::Sign,
    ) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignError {
    #[error("ecdsa: invalid private key")]
    InvalidKey,

    #[error("ecdsa: signing failed")]
    Failed,
}

/// SHA-256 of the message, RFC 6979 nonce, low-S output.
impl Secp256r1Sign for ecc256::PrivateKey {
    type Sign = Signature;
    type Error = SignError;

    fn secp256r1_sign<T: AsRef<[u8]>>(&self, message: T) -> Result<Self::Sign, Self::Error> {
        let sk: SigningKey = p256::SecretKey::from_slice(self.as_be_bytes())
            .map(|key| key.into())
            .map_err(|_err| SignError::InvalidKey)?;

        let sign: P256Signature = sk
            .try_sign(message.as_ref())
            .map_err(|_err| SignError::Failed)?;
        let sign = sign.normalize_s().unwrap_or(sign);

        let (r, s) = sign.split_bytes();
        Ok(Signature::from_rs(r.into(), s.into()))
    }
}

impl Secp256r1Sign for ecc256::Keypair {
    type Sign = Signature;
    type Error = SignError;

    #[inline]
    fn secp256r1_sign<T: AsRef<[u8]>>(&self, message: T) -> Result<Self::Sign, Self::Error> {
        self.private_key.secp256r1_sign(message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("ecdsa: invalid public key")]
    InvalidKey,

    #[error("ecdsa: non-canonical (high-S) signature")]
    NonCanonical,

    #[error("ecdsa: invalid sign")]
    InvalidSign,
}

/// Rejects high-S signatures before checking the curve equation.
impl Secp256r1Verify for ecc256::PublicKey {
    type Sign = Signature;
    type Error = VerifyError;

    fn secp256r1_verify<T: AsRef<[u8]>>(
        &self,
        message: T,
        sign: &Self::Sign,
    ) -> Result<(), Self::Error> {
        if !sign.is_canonical() {
            return Err(VerifyError::NonCanonical);
        }
        let inner = P256Signature::from_scalars(*sign.r(), *sign.s())
            .map_err(|_err| VerifyError::InvalidSign)?;
        let public = self.to_p256().map_err(|_err| VerifyError::InvalidKey)?;
        VerifyingKey::from(public)
            .verify(message.as_ref(), &inner)
            .map_err(|_err| VerifyError::InvalidSign)
    }
}
