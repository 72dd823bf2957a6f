// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! The node queries the transaction builder depends on.

use async_trait::async_trait;

pub type RpcResult<T> = Result<T, RpcError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    #[error("rpc transport: {0}")]
    Transport(String),

    #[error("rpc request timed out")]
    Timeout,

    #[error("rpc server error {code}: {message}")]
    Server { code: i64, message: String },

    #[error("invalid rpc response: {0}")]
    InvalidResponse(String),
}

/// Chain queries needed to finish a transaction. Implemented by the HTTP
/// JSON-RPC client and by in-process test doubles.
#[async_trait]
pub trait RpcProvider: Send + Sync {
    /// Number of blocks in the chain, i.e. the current height plus one.
    async fn get_block_count(&self) -> RpcResult<u32>;

    /// Network fee a node computes for the serialized transaction, witnesses
    /// included.
    async fn calculate_network_fee(&self, tx: &[u8]) -> RpcResult<u64>;
}
