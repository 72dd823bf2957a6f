// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

mod bin;
mod hex;

pub use self::bin::*;
pub use self::hex::*;
