// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use std::path::PathBuf;

/// Errors raised while loading or validating settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config: cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config: parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config: invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
