// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Leaf layer of the transaction stack: the Neo binary wire codec (var-size
//! integers, length-prefixed byte strings, bounded collections), hashing
//! primitives and the fixed-size `UInt160`/`UInt256` identifiers.

pub mod encoding;
pub mod hash;
pub mod uint;

pub use uint::{UInt160, UInt256};
