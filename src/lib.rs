// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! # neo-sdk: Neo N3 transaction construction and signing
//!
//! Builds Neo N3 transactions, estimates their fees through a node and signs
//! them with local or external accounts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use neo_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ProtocolSettings::testnet();
//!     let client = RpcClient::new("http://127.0.0.1:20332", &settings)?;
//!     let account = KeyPairAccount::new(Keypair::generate(&mut rand::thread_rng()));
//!
//!     let mut builder = TransactionBuilder::new(settings);
//!     builder
//!         .set_script(vec![0x11])
//!         .add_signer(Signer::called_by_entry(account.script_hash()))?;
//!     builder.set_valid_until_block_from_rpc(&client, None).await?;
//!     let fees = builder.calculate_fees(&client, &[&account]).await?;
//!     builder.apply_fees(fees);
//!
//!     let tx = builder.build_and_sign(&[&account]).await?;
//!     let hash = client.send_raw_transaction(&tx).await?;
//!     println!("relayed {hash}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`base`] - wire codec, hashing, `UInt160`/`UInt256`
//! - [`crypto`] - secp256r1 keys and signatures
//! - [`config`] - protocol settings
//! - [`core`] - witness conditions and rules, signers, transactions, builder
//! - `rpc_client` - JSON-RPC client (feature `rpc`)

pub use neo_base as base;
pub use neo_config as config;
pub use neo_core as core;
pub use neo_crypto as crypto;

#[cfg(feature = "rpc")]
pub use neo_rpc_client as rpc_client;

/// The types most callers need.
pub mod prelude {
    pub use crate::base::{UInt160, UInt256};
    pub use crate::config::ProtocolSettings;
    pub use crate::core::{
        Account, FeeEstimate, KeyPairAccount, MultiSigAccount, RpcProvider, Signer, Transaction,
        TransactionAttribute, TransactionBuilder, TxError, TxResult, Witness, WitnessCondition,
        WitnessRule, WitnessRuleAction, WitnessScope,
    };
    pub use crate::crypto::{Keypair, PrivateKey, PublicKey, Signature};

    #[cfg(feature = "rpc")]
    pub use crate::rpc_client::RpcClient;
}
