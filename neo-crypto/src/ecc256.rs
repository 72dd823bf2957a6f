// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use core::fmt::{self, Debug, Display, Formatter};
use core::str::FromStr;

use neo_base::{
    encoding::{decode_hex, DecodeError, NeoDecode, NeoEncode, NeoRead, NeoWrite, ToHex},
};
use p256::{
    elliptic_curve::{
        rand_core::{CryptoRng, RngCore},
        sec1::ToEncodedPoint,
    },
    EncodedPoint, PublicKey as P256PublicKey, SecretKey as P256SecretKey,
};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

pub const KEY_SIZE: usize = 32;

/// Length of a compressed SEC1 public key.
pub const PUBLIC_KEY_SIZE: usize = 33;

#[derive(Clone)]
pub struct PrivateKey {
    key: Zeroizing<[u8; KEY_SIZE]>,
}

impl PrivateKey {
    #[inline]
    pub fn new(bytes: [u8; KEY_SIZE]) -> Self {
        Self {
            key: Zeroizing::new(bytes),
        }
    }

    #[inline]
    pub fn from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; KEY_SIZE] = slice
            .try_into()
            .map_err(|_| KeyError::InvalidPrivateKeyLength)?;
        Ok(Self::new(bytes))
    }

    #[inline]
    pub fn as_be_bytes(&self) -> &[u8] {
        self.key.as_slice()
    }
}

impl Debug for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey").field(&"***").finish()
    }
}

impl Eq for PrivateKey {}

impl PartialEq for PrivateKey {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.key.as_slice().ct_eq(other.key.as_slice()).into()
    }
}

/// A point on secp256r1. Ordered by X then Y, the order multi-signature
/// verification scripts list their keys in.
#[derive(Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct PublicKey {
    gx: [u8; KEY_SIZE],
    gy: [u8; KEY_SIZE],
}

impl PublicKey {
    fn from_encoded(encoded: &EncodedPoint) -> Result<Self, KeyError> {
        let (x, y) = match (encoded.x(), encoded.y()) {
            (Some(x), Some(y)) => (x, y),
            _ => return Err(KeyError::InvalidPublicKey),
        };
        let mut gx = [0u8; KEY_SIZE];
        let mut gy = [0u8; KEY_SIZE];
        gx.copy_from_slice(x.as_ref());
        gy.copy_from_slice(y.as_ref());
        Ok(Self { gx, gy })
    }

    /// Accepts compressed or uncompressed SEC1 encodings of a point on the curve.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let public = P256PublicKey::from_sec1_bytes(bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::from_encoded(&public.to_encoded_point(false))
    }

    #[inline]
    pub fn to_uncompressed(&self) -> [u8; 65] {
        let mut buf = [0u8; 65];
        buf[0] = 0x04;
        buf[1..33].copy_from_slice(&self.gx);
        buf[33..].copy_from_slice(&self.gy);
        buf
    }

    #[inline]
    pub fn to_compressed(&self) -> [u8; PUBLIC_KEY_SIZE] {
        let mut buf = [0u8; PUBLIC_KEY_SIZE];
        buf[0] = 0x02 + (self.gy[KEY_SIZE - 1] & 0x01);
        buf[1..].copy_from_slice(&self.gx);
        buf
    }

    /// Writes the 33-byte compressed form without a length prefix.
    #[inline]
    pub fn write_compressed<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_bytes(&self.to_compressed());
    }

    /// Reads a 33-byte compressed key without a length prefix.
    pub fn read_compressed<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        let bytes = reader.read_array::<PUBLIC_KEY_SIZE>()?;
        Self::from_compressed_wire(&bytes)
    }

    fn from_compressed_wire(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != PUBLIC_KEY_SIZE || !matches!(bytes[0], 0x02 | 0x03) {
            return Err(DecodeError::InvalidFormat("compressed public key"));
        }
        Self::from_sec1_bytes(bytes).map_err(|_| DecodeError::InvalidFormat("public key"))
    }

    pub(crate) fn to_p256(self) -> Result<P256PublicKey, KeyError> {
        P256PublicKey::from_sec1_bytes(&self.to_uncompressed()).map_err(|_| KeyError::InvalidPublicKey)
    }
}

impl Debug for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey")
            .field(&self.to_compressed().to_hex_lower())
            .finish()
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_compressed().to_hex_lower())
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s).map_err(|_| KeyError::InvalidPublicKey)?;
        Self::from_sec1_bytes(&bytes)
    }
}

/// Length-prefixed compressed key, as carried in signer group lists.
impl NeoEncode for PublicKey {
    #[inline]
    fn neo_encode<W: NeoWrite>(&self, writer: &mut W) {
        writer.write_var_bytes(&self.to_compressed());
    }

    #[inline]
    fn encoded_size(&self) -> usize {
        1 + PUBLIC_KEY_SIZE
    }
}

impl NeoDecode for PublicKey {
    fn neo_decode<R: NeoRead>(reader: &mut R) -> Result<Self, DecodeError> {
        let bytes = reader.read_var_bytes(PUBLIC_KEY_SIZE as u64)?;
        Self::from_compressed_wire(&bytes)
    }
}

impl serde::Serialize for PublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for PublicKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = <String as serde::Deserialize>::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Clone)]
pub struct Keypair {
    pub private_key: PrivateKey,
    pub public_key: PublicKey,
}

impl Keypair {
    pub fn from_private(private_key: PrivateKey) -> Result<Self, KeyError> {
        let secret = P256SecretKey::from_slice(private_key.as_be_bytes())
            .map_err(|_| KeyError::InvalidPrivateKey)?;
        let public_key = PublicKey::from_encoded(&secret.public_key().to_encoded_point(false))?;
        Ok(Self {
            private_key,
            public_key,
        })
    }

    pub fn generate<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        loop {
            let secret = P256SecretKey::random(&mut *rng);
            if let Ok(keypair) = Self::from_private(PrivateKey::new(secret.to_bytes().into())) {
                return keypair;
            }
        }
    }
}

impl Debug for Keypair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    #[error("ecc256: invalid private key length")]
    InvalidPrivateKeyLength,

    #[error("ecc256: private key is not a valid scalar")]
    InvalidPrivateKey,

    #[error("ecc256: invalid public key encoding")]
    InvalidPublicKey,
}
