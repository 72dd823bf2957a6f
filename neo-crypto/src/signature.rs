// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use core::fmt::{self, Debug, Formatter};

use neo_base::encoding::ToHex;

pub const SIGNATURE_SIZE: usize = 64;

/// Order `n` of the secp256r1 group, big-endian.
pub const ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xbc, 0xe6, 0xfa, 0xad, 0xa7, 0x17, 0x9e, 0x84, 0xf3, 0xb9, 0xca, 0xc2, 0xfc, 0x63, 0x25, 0x51,
];

/// `n / 2` rounded down; the largest S a canonical signature may carry.
pub const HALF_ORDER: [u8; 32] = [
    0x7f, 0xff, 0xff, 0xff, 0x80, 0x00, 0x00, 0x00, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xde, 0x73, 0x7d, 0x56, 0xd3, 0x8b, 0xcf, 0x42, 0x79, 0xdc, 0xe5, 0x61, 0x7e, 0x31, 0x92, 0xa8,
];

const SEQUENCE_TAG: u8 = 0x30;
const INTEGER_TAG: u8 = 0x02;

/// An ECDSA signature as two 32-byte big-endian integers.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    r: [u8; 32],
    s: [u8; 32],
}

impl Signature {
    #[inline]
    pub const fn from_rs(r: [u8; 32], s: [u8; 32]) -> Self {
        Self { r, s }
    }

    /// Parses the 64-byte `r || s` form carried in invocation scripts.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        if bytes.len() != SIGNATURE_SIZE {
            return Err(SignatureError::InvalidLength {
                expected: SIGNATURE_SIZE,
                actual: bytes.len(),
            });
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(Self { r, s })
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut out = [0u8; SIGNATURE_SIZE];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    #[inline]
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    #[inline]
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// Low-S check: `S <= n / 2`. Big-endian arrays compare numerically.
    #[inline]
    pub fn is_canonical(&self) -> bool {
        self.s <= HALF_ORDER
    }

    /// Returns the low-S twin `(R, n - S)` of a high-S signature. Signatures
    /// that are already canonical, or whose scalars are out of range, are
    /// returned unchanged.
    pub fn normalize_s(&self) -> Self {
        if self.is_canonical() {
            return *self;
        }
        let Ok(inner) = p256::ecdsa::Signature::from_scalars(self.r, self.s) else {
            return *self;
        };
        match inner.normalize_s() {
            Some(low) => {
                let (r, s) = low.split_bytes();
                Self {
                    r: r.into(),
                    s: s.into(),
                }
            }
            None => *self,
        }
    }

    /// Minimal DER: `SEQUENCE { INTEGER r, INTEGER s }`.
    pub fn to_der(&self) -> Vec<u8> {
        let r = der_integer(&self.r);
        let s = der_integer(&self.s);

        let mut out = Vec::with_capacity(2 + r.len() + s.len());
        out.push(SEQUENCE_TAG);
        out.push((r.len() + s.len()) as u8);
        out.extend_from_slice(&r);
        out.extend_from_slice(&s);
        out
    }

    /// Strict DER parsing: definite short-form lengths, minimal non-negative
    /// integers and no trailing bytes.
    pub fn from_der(der: &[u8]) -> Result<Self, SignatureError> {
        if der.len() < 2 || der[0] != SEQUENCE_TAG {
            return Err(SignatureError::InvalidFormat("missing sequence tag"));
        }
        let body_len = der[1] as usize;
        if der[1] & 0x80 != 0 {
            return Err(SignatureError::InvalidFormat("long-form sequence length"));
        }
        if body_len != der.len() - 2 {
            return Err(SignatureError::InvalidFormat("sequence length mismatch"));
        }

        let body = &der[2..];
        let (r, rest) = parse_integer(body)?;
        let (s, rest) = parse_integer(rest)?;
        if !rest.is_empty() {
            return Err(SignatureError::InvalidFormat("trailing bytes in sequence"));
        }
        Ok(Self { r, s })
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signature")
            .field("r", &self.r.to_hex_lower())
            .field("s", &self.s.to_hex_lower())
            .finish()
    }
}

impl From<Signature> for [u8; SIGNATURE_SIZE] {
    #[inline]
    fn from(value: Signature) -> Self {
        value.to_bytes()
    }
}

fn der_integer(value: &[u8; 32]) -> Vec<u8> {
    let start = value.iter().position(|b| *b != 0).unwrap_or(31);
    let digits = &value[start..];
    let pad = digits[0] & 0x80 != 0;

    let mut out = Vec::with_capacity(3 + digits.len());
    out.push(INTEGER_TAG);
    out.push((digits.len() + pad as usize) as u8);
    if pad {
        out.push(0x00);
    }
    out.extend_from_slice(digits);
    out
}

fn parse_integer(input: &[u8]) -> Result<([u8; 32], &[u8]), SignatureError> {
    if input.len() < 2 || input[0] != INTEGER_TAG {
        return Err(SignatureError::InvalidFormat("missing integer tag"));
    }
    let len = input[1] as usize;
    if len == 0 || len > 33 {
        return Err(SignatureError::InvalidFormat("integer length out of range"));
    }
    if input.len() < 2 + len {
        return Err(SignatureError::InvalidFormat("integer truncated"));
    }

    let content = &input[2..2 + len];
    if content[0] & 0x80 != 0 {
        return Err(SignatureError::InvalidFormat("negative integer"));
    }
    if len > 1 && content[0] == 0 && content[1] & 0x80 == 0 {
        return Err(SignatureError::InvalidFormat("non-minimal integer"));
    }

    let digits = if content[0] == 0 && len > 1 { &content[1..] } else { content };
    if digits.len() > 32 {
        return Err(SignatureError::InvalidFormat("integer wider than 32 bytes"));
    }

    let mut value = [0u8; 32];
    value[32 - digits.len()..].copy_from_slice(digits);
    Ok((value, &input[2 + len..]))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("signature: invalid DER, {0}")]
    InvalidFormat(&'static str),

    #[error("signature: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    fn order_minus(k: u8) -> [u8; 32] {
        let mut v = ORDER;
        v[31] -= k;
        v
    }

    fn one() -> [u8; 32] {
        let mut v = [0u8; 32];
        v[31] = 1;
        v
    }

    #[test]
    fn canonical_bounds() {
        assert!(!Signature::from_rs(one(), order_minus(1)).is_canonical());
        assert!(Signature::from_rs(one(), one()).is_canonical());
        assert!(Signature::from_rs(one(), HALF_ORDER).is_canonical());

        let mut above_half = HALF_ORDER;
        above_half[31] += 1;
        assert!(!Signature::from_rs(one(), above_half).is_canonical());
    }

    #[test]
    fn normalize_flips_high_s() {
        let high = Signature::from_rs(one(), order_minus(1));
        let low = high.normalize_s();
        assert_eq!(low.s(), &one());
        assert_eq!(low.r(), high.r());
        assert!(low.is_canonical());

        let already = Signature::from_rs(one(), one());
        assert_eq!(already.normalize_s(), already);
    }

    #[test]
    fn der_pads_high_bit() {
        let mut r = [0u8; 32];
        r[0] = 0x80;
        let sig = Signature::from_rs(r, one());
        let der = sig.to_der();
        assert_eq!(&der[..5], &hex!("3026022100"));
        assert_eq!(der[4 + 33], 0x02);
        assert_eq!(&der[der.len() - 3..], &hex!("020101"));
        assert_eq!(Signature::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn der_zero_is_single_byte() {
        let sig = Signature::from_rs([0u8; 32], one());
        assert_eq!(sig.to_der(), hex!("3006020100020101").to_vec());
        assert_eq!(Signature::from_der(&hex!("3006020100020101")).unwrap(), sig);
    }

    #[test]
    fn der_rejects_malformed_input() {
        let cases: [(&[u8], &str); 9] = [
            (&hex!(""), "missing sequence tag"),
            (&hex!("3106020101020101"), "missing sequence tag"),
            (&hex!("3007020101020101"), "sequence length mismatch"),
            (&hex!("3006030101020101"), "missing integer tag"),
            (&hex!("3006020181020101"), "negative integer"),
            (&hex!("300702020001020101"), "non-minimal integer"),
            (&hex!("3005020101020100ff"), "sequence length mismatch"),
            (&hex!("3008020101020101ffff"), "trailing bytes in sequence"),
            (&hex!("30040200020101"), "sequence length mismatch"),
        ];
        for (der, reason) in cases {
            assert_eq!(
                Signature::from_der(der),
                Err(SignatureError::InvalidFormat(reason)),
                "input {}",
                der.to_hex_lower()
            );
        }
    }

    #[test]
    fn der_rejects_oversized_integer() {
        let mut der = vec![0x30, 2 + 34 + 3, 0x02, 34, 0x00];
        der.extend_from_slice(&[0x80; 33]);
        der.extend_from_slice(&hex!("020101"));
        assert_eq!(
            Signature::from_der(&der),
            Err(SignatureError::InvalidFormat("integer length out of range"))
        );

        let mut der = vec![0x30, 2 + 33 + 3, 0x02, 33, 0x7f];
        der.extend_from_slice(&[0x11; 32]);
        der.extend_from_slice(&hex!("020101"));
        assert_eq!(
            Signature::from_der(&der),
            Err(SignatureError::InvalidFormat("integer wider than 32 bytes"))
        );
    }

    #[test]
    fn fixed_width_roundtrip() {
        let sig = Signature::from_rs([0x11; 32], [0x22; 32]);
        assert_eq!(Signature::from_bytes(&sig.to_bytes()).unwrap(), sig);
        assert_eq!(
            Signature::from_bytes(&[0u8; 63]),
            Err(SignatureError::InvalidLength {
                expected: 64,
                actual: 63
            })
        );
    }
}
