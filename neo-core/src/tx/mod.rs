// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Wire types of a Neo N3 transaction.

mod attr;
mod b64;
mod condition;
mod rule;
mod scope;
mod signer;
mod transaction;
mod witness;

pub use attr::{OracleResponseCode, TransactionAttribute, TransactionAttributeType};
pub use condition::{WitnessCondition, WitnessConditionType, MAX_CONDITION_SIZE, MAX_NESTING_DEPTH};
pub use rule::{WitnessRule, WitnessRuleAction};
pub use scope::WitnessScope;
pub use signer::Signer;
pub use transaction::Transaction;
pub(crate) use transaction::check_body;
pub use witness::{Witness, MAX_INVOCATION_SCRIPT, MAX_VERIFICATION_SCRIPT};

/// Largest serialized transaction the network relays.
pub const MAX_TRANSACTION_SIZE: usize = 102_400;

/// Cap on signers plus attributes.
pub const MAX_TRANSACTION_ATTRIBUTES: usize = 16;

/// Cap on the entries of each signer list and of each `And`/`Or` condition.
pub const MAX_SUBITEMS: usize = 16;

pub const MAX_SCRIPT_SIZE: usize = u16::MAX as usize;

/// version + nonce + system fee + network fee + valid-until-block
pub const HEADER_SIZE: usize = 1 + 4 + 8 + 8 + 4;
