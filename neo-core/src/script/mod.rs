// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Just enough of the NeoVM script format to build and recognise witness
//! scripts.

mod builder;
mod verification;

#[cfg(test)]
mod tests;

pub use builder::ScriptBuilder;
pub use verification::*;

use neo_base::hash::Sha256;

/// Opcodes emitted by witness scripts.
pub mod opcode {
    pub const PUSHINT8: u8 = 0x00;
    pub const PUSHINT16: u8 = 0x01;
    pub const PUSHINT32: u8 = 0x02;
    pub const PUSHINT64: u8 = 0x03;
    pub const PUSHDATA1: u8 = 0x0C;
    pub const PUSHDATA2: u8 = 0x0D;
    pub const PUSHDATA4: u8 = 0x0E;
    pub const PUSHM1: u8 = 0x0F;
    pub const PUSH0: u8 = 0x10;
    pub const PUSH1: u8 = 0x11;
    pub const PUSH16: u8 = 0x20;
    pub const SYSCALL: u8 = 0x41;
}

pub const CHECK_SIG: &str = "System.Crypto.CheckSig";
pub const CHECK_MULTISIG: &str = "System.Crypto.CheckMultisig";

/// Syscall identifier: the first four bytes of SHA-256 over the ASCII name.
#[inline]
pub fn interop_hash(name: &str) -> [u8; 4] {
    let digest = name.as_bytes().sha256();
    [digest[0], digest[1], digest[2], digest[3]]
}
