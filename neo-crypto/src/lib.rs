// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! secp256r1 key material and the signature engine used by transaction
//! witnesses: fixed-width (R, S) signatures, strict DER transcoding and the
//! low-S canonical form the network requires.

pub mod ecc256;
pub mod ecdsa;
pub mod signature;

pub use ecc256::{KeyError, Keypair, PrivateKey, PublicKey};
pub use ecdsa::{Secp256r1Sign, Secp256r1Verify, SignError, VerifyError};
pub use signature::{Signature, SignatureError};
