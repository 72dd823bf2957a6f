// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! HTTP JSON-RPC client for the node queries a transaction builder needs.
//!
//! [`RpcClient`] implements [`neo_core::RpcProvider`], so it can be handed to
//! `TransactionBuilder::set_valid_until_block_from_rpc` and
//! `TransactionBuilder::calculate_fees` directly.

mod client;
mod models;

pub use client::{RpcClient, RpcClientBuilder, DEFAULT_HTTP_TIMEOUT};
pub use models::{RpcErrorObject, RpcRequest, RpcResponse};
pub use neo_core::{RpcError, RpcResult};
