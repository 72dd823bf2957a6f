// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use crate::hash::hash160;

/// Neo's 160-bit script hash.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct UInt160(pub(super) [u8; 20]);

super::impl_uint!(UInt160, 20);

impl UInt160 {
    /// Script hash of a verification or contract script.
    #[inline]
    pub fn from_script(script: &[u8]) -> Self {
        Self(hash160(script))
    }
}
