// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Transaction construction and signing for Neo N3.
//!
//! The [`tx`] module holds the wire types (witness conditions and rules,
//! signers, attributes, witnesses and the transaction itself), [`script`]
//! builds the verification and invocation scripts that go into witnesses, and
//! [`builder::TransactionBuilder`] ties them together with the external
//! [`account::Account`] and [`rpc::RpcProvider`] collaborators.

pub mod account;
pub mod builder;
pub mod error;
pub mod rpc;
pub mod script;
pub mod tx;

pub use account::{Account, AccountError, KeyPairAccount, MultiSigAccount, MultiSigInfo};
pub use builder::{FeeEstimate, TransactionBuilder};
pub use error::{TxError, TxResult};
pub use rpc::{RpcError, RpcProvider, RpcResult};
pub use tx::*;

pub use neo_base::{UInt160, UInt256};
pub use neo_crypto::{PublicKey, Signature};
