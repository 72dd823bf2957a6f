// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Protocol settings for Neo N3 transaction construction
//!
//! Only the parameters a client needs to build and sign transactions: the
//! network magic mixed into every signature, the validity window policy and
//! the timeouts applied to external collaborators.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{ConfigError, NetworkType};

/// Neo N3 protocol settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolSettings {
    /// Network identifier (magic number), prepended to the hash when signing
    #[serde(default = "default_network")]
    pub network: u32,

    /// Address version byte for address encoding
    #[serde(default = "default_address_version")]
    pub address_version: u8,

    /// Milliseconds per block
    #[serde(default = "default_ms_per_block")]
    pub ms_per_block: u64,

    /// Maximum time for transaction validity (in blocks)
    #[serde(default = "default_max_valid_until_block_increment")]
    pub max_valid_until_block_increment: u32,

    /// Upper bound on one account signing call
    #[serde(default = "default_sign_timeout_ms")]
    pub sign_timeout_ms: u64,

    /// HTTP timeout of RPC requests
    #[serde(default = "default_rpc_timeout_ms")]
    pub rpc_timeout_ms: u64,
}

// Default value functions
fn default_network() -> u32 {
    NetworkType::MainNet.magic()
}

fn default_address_version() -> u8 {
    0x35 // 'N' prefix for Neo addresses
}

fn default_ms_per_block() -> u64 {
    15000 // 15 seconds
}

fn default_max_valid_until_block_increment() -> u32 {
    5760 // ~24 hours at 15 sec/block
}

fn default_sign_timeout_ms() -> u64 {
    30_000
}

fn default_rpc_timeout_ms() -> u64 {
    10_000
}

impl Default for ProtocolSettings {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl ProtocolSettings {
    /// MainNet protocol settings
    pub fn mainnet() -> Self {
        Self::for_network(NetworkType::MainNet.magic())
    }

    /// TestNet protocol settings
    pub fn testnet() -> Self {
        Self::for_network(NetworkType::TestNet.magic())
    }

    /// Private network protocol settings
    pub fn private(network_magic: u32) -> Self {
        Self {
            ms_per_block: 1000, // Faster for testing
            ..Self::for_network(network_magic)
        }
    }

    fn for_network(network: u32) -> Self {
        Self {
            network,
            address_version: default_address_version(),
            ms_per_block: default_ms_per_block(),
            max_valid_until_block_increment: default_max_valid_until_block_increment(),
            sign_timeout_ms: default_sign_timeout_ms(),
            rpc_timeout_ms: default_rpc_timeout_ms(),
        }
    }

    pub fn network_type(&self) -> NetworkType {
        NetworkType::from_magic(self.network)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file. Missing keys take MainNet defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            network = settings.network,
            "loaded protocol settings"
        );
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_valid_until_block_increment == 0 {
            return Err(ConfigError::Invalid {
                field: "max_valid_until_block_increment",
                reason: "must be positive",
            });
        }
        if self.sign_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "sign_timeout_ms",
                reason: "must be positive",
            });
        }
        if self.rpc_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "rpc_timeout_ms",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Calculate time span for a given number of blocks
    pub fn time_per_block(&self) -> Duration {
        Duration::from_millis(self.ms_per_block)
    }

    pub fn sign_timeout(&self) -> Duration {
        Duration::from_millis(self.sign_timeout_ms)
    }

    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_millis(self.rpc_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_network_presets() {
        assert_eq!(ProtocolSettings::mainnet().network, 860833102);
        assert_eq!(ProtocolSettings::testnet().network, 894710606);
        assert_eq!(ProtocolSettings::testnet().network_type(), NetworkType::TestNet);
        assert_eq!(ProtocolSettings::private(7).network_type(), NetworkType::Private);
        assert_eq!(ProtocolSettings::default(), ProtocolSettings::mainnet());
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let settings = ProtocolSettings::from_toml_str(
            "network = 894710606\nsign_timeout_ms = 500\n",
        )
        .unwrap();
        assert_eq!(settings.network, 894710606);
        assert_eq!(settings.sign_timeout(), Duration::from_millis(500));
        assert_eq!(settings.max_valid_until_block_increment, 5760);
        assert_eq!(settings.address_version, 0x35);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = ProtocolSettings::from_toml_str("max_valid_until_block_increment = 0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "max_valid_until_block_increment",
                ..
            }
        ));
        assert!(matches!(
            ProtocolSettings::from_toml_str("network = \"main\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "network = 1234").unwrap();
        writeln!(file, "rpc_timeout_ms = 2500").unwrap();

        let settings = ProtocolSettings::load(file.path()).unwrap();
        assert_eq!(settings.network, 1234);
        assert_eq!(settings.rpc_timeout(), Duration::from_millis(2500));

        assert!(matches!(
            ProtocolSettings::load("/nonexistent/neo-settings.toml"),
            Err(ConfigError::Io { .. })
        ));
    }
}
