// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use super::{interop_hash, opcode};

/// Helps construct VM scripts programmatically.
#[derive(Debug, Default, Clone)]
pub struct ScriptBuilder {
    script: Vec<u8>,
}

impl ScriptBuilder {
    #[inline]
    pub fn new() -> Self {
        Self { script: Vec::new() }
    }

    #[inline]
    pub fn emit(&mut self, op: u8) -> &mut Self {
        self.script.push(op);
        self
    }

    /// Emits a push of `data` with the smallest PUSHDATA form that fits.
    pub fn emit_push(&mut self, data: &[u8]) -> &mut Self {
        let len = data.len();
        if len <= 0xFF {
            self.emit(opcode::PUSHDATA1);
            self.script.push(len as u8);
        } else if len <= 0xFFFF {
            self.emit(opcode::PUSHDATA2);
            self.script.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.emit(opcode::PUSHDATA4);
            self.script.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.script.extend_from_slice(data);
        self
    }

    /// Emits a push of an integer: PUSHM1/PUSH0..PUSH16 for small values,
    /// otherwise the narrowest fixed-width PUSHINT.
    pub fn emit_push_int(&mut self, value: i64) -> &mut Self {
        match value {
            -1 => self.emit(opcode::PUSHM1),
            0..=16 => self.emit(opcode::PUSH0 + value as u8),
            _ if i8::try_from(value).is_ok() => {
                self.emit(opcode::PUSHINT8);
                self.script.push(value as i8 as u8);
                self
            }
            _ if i16::try_from(value).is_ok() => {
                self.emit(opcode::PUSHINT16);
                self.script.extend_from_slice(&(value as i16).to_le_bytes());
                self
            }
            _ if i32::try_from(value).is_ok() => {
                self.emit(opcode::PUSHINT32);
                self.script.extend_from_slice(&(value as i32).to_le_bytes());
                self
            }
            _ => {
                self.emit(opcode::PUSHINT64);
                self.script.extend_from_slice(&value.to_le_bytes());
                self
            }
        }
    }

    pub fn emit_syscall(&mut self, name: &str) -> &mut Self {
        self.emit(opcode::SYSCALL);
        self.script.extend_from_slice(&interop_hash(name));
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.script.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }

    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.script.clone()
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.script
    }
}
