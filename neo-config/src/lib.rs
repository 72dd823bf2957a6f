// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Settings consumed by the transaction builder: which network a transaction
//! is signed for and how long the builder waits on its collaborators.

mod error;
mod network;
mod protocol;

pub use error::ConfigError;
pub use network::NetworkType;
pub use protocol::ProtocolSettings;
