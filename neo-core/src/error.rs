// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

use std::time::Duration;

use neo_base::{encoding::DecodeError, UInt160};

use crate::rpc::RpcError;

pub type TxResult<T> = Result<T, TxError>;

/// Failures of transaction construction, validation and signing. Every
/// variant names the offending field or bound.
#[derive(Debug, thiserror::Error)]
pub enum TxError {
    #[error("invalid argument `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("too many items in `{field}`, at most {max} allowed")]
    TooManyItems { field: &'static str, max: usize },

    #[error("duplicate signer {0}")]
    DuplicateSigner(UInt160),

    #[error("transaction has no signer")]
    NoSigner,

    #[error("witness condition nesting exceeds {max}")]
    MaxDepthExceeded { max: usize },

    #[error("{what} exceeds {max} bytes")]
    SizeExceeded { what: &'static str, max: usize },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("account {account}: {reason}")]
    Account { account: UInt160, reason: String },

    #[error("account {account} did not sign within {timeout:?}")]
    SigningTimeout { account: UInt160, timeout: Duration },

    #[error(transparent)]
    Rpc(#[from] RpcError),
}

impl TxError {
    pub(crate) fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}
