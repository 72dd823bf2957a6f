// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use sha2::Digest;

pub trait Sha256 {
    fn sha256(&self) -> [u8; 32];
}

impl<T: AsRef<[u8]>> Sha256 for T {
    #[inline]
    fn sha256(&self) -> [u8; 32] {
        let mut h = sha2::Sha256::new();
        h.update(self);
        h.finalize().into()
    }
}

pub trait SlicesSha256 {
    fn slices_sha256(self) -> [u8; 32];
}

impl<T: Iterator> SlicesSha256 for T
where
    <T as Iterator>::Item: AsRef<[u8]>,
{
    #[inline]
    fn slices_sha256(self) -> [u8; 32] {
        let mut h = sha2::Sha256::new();
        self.for_each(|s| h.update(s));
        h.finalize().into()
    }
}

pub trait Ripemd160 {
    fn ripemd160(&self) -> [u8; 20];
}

impl<T: AsRef<[u8]>> Ripemd160 for T {
    #[inline]
    fn ripemd160(&self) -> [u8; 20] {
        let mut h = ripemd::Ripemd160::new();
        h.update(self);
        h.finalize().into()
    }
}

/// SHA-256 applied twice; the digest behind transaction hashes.
#[inline]
pub fn hash256<T: AsRef<[u8]>>(data: T) -> [u8; 32] {
    data.sha256().sha256()
}

/// RIPEMD-160 of SHA-256; the digest behind script hashes.
#[inline]
pub fn hash160<T: AsRef<[u8]>>(data: T) -> [u8; 20] {
    data.sha256().ripemd160()
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;

    #[test]
    fn known_digests() {
        assert_eq!(
            b"abc".sha256(),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
        assert_eq!(
            b"".ripemd160(),
            hex!("9c1185a5c5e9fc54612808977ee8f548b2258d31")
        );
        assert_eq!(hash256(b"abc"), b"abc".sha256().sha256());
        assert_eq!(
            [b"a".as_slice(), b"bc".as_slice()].iter().slices_sha256(),
            b"abc".sha256()
        );
    }
}
