// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use crate::hash::hash256;

/// Neo's 256-bit hash, used for transaction identifiers.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct UInt256(pub(super) [u8; 32]);

super::impl_uint!(UInt256, 32);

impl UInt256 {
    /// Double SHA-256 of `data`.
    #[inline]
    pub fn hash_of(data: &[u8]) -> Self {
        Self(hash256(data))
    }
}
