// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Network type and configuration

use serde::{Deserialize, Serialize};

/// Neo network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Neo `MainNet` (network magic: 860833102)
    #[default]
    MainNet,
    /// Neo `TestNet` T5 (network magic: 894710606)
    TestNet,
    /// Private/local network
    Private,
}

impl NetworkType {
    /// Get the network magic number
    #[must_use]
    pub const fn magic(&self) -> u32 {
        match self {
            Self::MainNet => 860833102,  // 0x334F454E "NEO3" LE
            Self::TestNet => 894710606,  // T5 testnet
            Self::Private => 0x01020304, // Default private
        }
    }

    /// Reverse lookup from a magic number.
    #[must_use]
    pub const fn from_magic(magic: u32) -> Self {
        match magic {
            860833102 => Self::MainNet,
            894710606 => Self::TestNet,
            _ => Self::Private,
        }
    }
}
