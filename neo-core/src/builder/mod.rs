// Copyright @ 2025 - present, R3E Network
// All Rights Reserved

//! Assembles, fee-estimates and signs transactions.
//!
//! A [`TransactionBuilder`] collects the transaction body through setters,
//! produces an unsigned [`Transaction`] with [`TransactionBuilder::build`] and
//! attaches one witness per signer with [`TransactionBuilder::sign`]. Builder
//! methods that fail leave the builder untouched, so a caller can fix the
//! offending value and retry.

#[cfg(test)]
mod tests;

use neo_base::UInt160;
use neo_config::ProtocolSettings;
use neo_crypto::{PublicKey, Secp256r1Verify, Signature};
use tracing::{debug, trace, warn};

use crate::{
    account::Account,
    rpc::RpcProvider,
    script::invocation_script,
    tx::{
        check_body, Signer, Transaction, TransactionAttribute, TransactionAttributeType, Witness,
        MAX_INVOCATION_SCRIPT, MAX_TRANSACTION_ATTRIBUTES, MAX_TRANSACTION_SIZE, MAX_VERIFICATION_SCRIPT,
    },
    TxError, TxResult,
};

/// Fees a transaction pays, in GAS fractions (10^-8).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeEstimate {
    pub network_fee: u64,
    pub system_fee: u64,
}

#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    settings: ProtocolSettings,
    version: u8,
    nonce: Option<u32>,
    valid_until_block: Option<u32>,
    // height observed by the last RPC query
    known_height: Option<u32>,
    script: Vec<u8>,
    signers: Vec<Signer>,
    attributes: Vec<TransactionAttribute>,
    system_fee: u64,
    network_fee: u64,
    additional_system_fee: u64,
    additional_network_fee: u64,
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new(ProtocolSettings::default())
    }
}

impl TransactionBuilder {
    pub fn new(settings: ProtocolSettings) -> Self {
        Self {
            settings,
            version: 0,
            nonce: None,
            valid_until_block: None,
            known_height: None,
            script: Vec::new(),
            signers: Vec::new(),
            attributes: Vec::new(),
            system_fee: 0,
            network_fee: 0,
            additional_system_fee: 0,
            additional_network_fee: 0,
        }
    }

    #[inline]
    pub fn settings(&self) -> &ProtocolSettings {
        &self.settings
    }

    /// Only version 0 exists on Neo N3.
    pub fn set_version(&mut self, version: u8) -> TxResult<&mut Self> {
        if version != 0 {
            return Err(TxError::invalid_argument(
                "version",
                format!("unsupported transaction version {version}"),
            ));
        }
        self.version = version;
        Ok(self)
    }

    pub fn set_nonce(&mut self, nonce: u32) -> &mut Self {
        self.nonce = Some(nonce);
        self
    }

    /// Takes a `u64` so out-of-range heights from callers are reported rather
    /// than truncated.
    pub fn set_valid_until_block(&mut self, height: u64) -> TxResult<&mut Self> {
        if height == 0 {
            return Err(TxError::invalid_argument("valid_until_block", "must be positive"));
        }
        let height = u32::try_from(height).map_err(|_| {
            TxError::invalid_argument("valid_until_block", format!("{height} does not fit in 32 bits"))
        })?;
        self.valid_until_block = Some(height);
        Ok(self)
    }

    /// Queries the chain height and sets the valid-until-block to
    /// `height + increment`, the increment defaulting to the protocol maximum.
    /// Nothing changes unless the query succeeds.
    pub async fn set_valid_until_block_from_rpc<C>(
        &mut self,
        client: &C,
        increment: Option<u32>,
    ) -> TxResult<&mut Self>
    where
        C: RpcProvider + ?Sized,
    {
        let max = self.settings.max_valid_until_block_increment;
        let increment = increment.unwrap_or(max);
        if increment == 0 || increment > max {
            return Err(TxError::invalid_argument(
                "increment",
                format!("expected 1..={max}, got {increment}"),
            ));
        }

        let count = client.get_block_count().await?;
        let height = count.saturating_sub(1);
        let valid_until_block = height.checked_add(increment).ok_or_else(|| {
            TxError::invalid_argument("valid_until_block", "height plus increment overflows 32 bits")
        })?;

        debug!(height, valid_until_block, "resolved valid-until-block");
        self.known_height = Some(height);
        self.valid_until_block = Some(valid_until_block);
        Ok(self)
    }

    pub fn set_script(&mut self, script: Vec<u8>) -> &mut Self {
        self.script = script;
        self
    }

    /// Appends a signer. The first signer pays the fees.
    pub fn add_signer(&mut self, signer: Signer) -> TxResult<&mut Self> {
        if self.signers.iter().any(|s| s.account() == signer.account()) {
            return Err(TxError::DuplicateSigner(signer.account()));
        }
        self.ensure_room("signers")?;
        self.signers.push(signer);
        Ok(self)
    }

    #[inline]
    pub fn signers(&self) -> &[Signer] {
        &self.signers
    }

    pub fn add_attribute(&mut self, attribute: TransactionAttribute) -> TxResult<&mut Self> {
        if !attribute.allow_multiple() && self.has_attribute(attribute.attribute_type()) {
            return Err(TxError::invalid_argument(
                "attributes",
                format!("{:?} may appear only once", attribute.attribute_type()),
            ));
        }
        self.ensure_room("attributes")?;
        self.attributes.push(attribute);
        Ok(self)
    }

    #[inline]
    pub fn attributes(&self) -> &[TransactionAttribute] {
        &self.attributes
    }

    /// Adds or removes the `HighPriority` attribute.
    pub fn set_high_priority(&mut self, high_priority: bool) -> TxResult<&mut Self> {
        let present = self.has_attribute(TransactionAttributeType::HighPriority);
        if high_priority && !present {
            self.add_attribute(TransactionAttribute::HighPriority)?;
        } else if !high_priority && present {
            self.attributes
                .retain(|attr| attr.attribute_type() != TransactionAttributeType::HighPriority);
        }
        Ok(self)
    }

    fn has_attribute(&self, ty: TransactionAttributeType) -> bool {
        self.attributes.iter().any(|attr| attr.attribute_type() == ty)
    }

    fn ensure_room(&self, field: &'static str) -> TxResult<()> {
        if self.signers.len() + self.attributes.len() >= MAX_TRANSACTION_ATTRIBUTES {
            return Err(TxError::TooManyItems {
                field,
                max: MAX_TRANSACTION_ATTRIBUTES,
            });
        }
        Ok(())
    }

    pub fn set_system_fee(&mut self, fee: u64) -> &mut Self {
        self.system_fee = fee;
        self
    }

    pub fn set_network_fee(&mut self, fee: u64) -> &mut Self {
        self.network_fee = fee;
        self
    }

    /// Adds to the system fee on top of the configured or estimated one.
    pub fn add_system_fee(&mut self, fee: u64) -> TxResult<&mut Self> {
        self.additional_system_fee = self
            .additional_system_fee
            .checked_add(fee)
            .ok_or_else(|| TxError::invalid_argument("system_fee", "adjustment overflows"))?;
        Ok(self)
    }

    /// Adds to the network fee on top of the configured or estimated one.
    pub fn add_network_fee(&mut self, fee: u64) -> TxResult<&mut Self> {
        self.additional_network_fee = self
            .additional_network_fee
            .checked_add(fee)
            .ok_or_else(|| TxError::invalid_argument("network_fee", "adjustment overflows"))?;
        Ok(self)
    }

    /// Uses an estimate as the base fees. Additive adjustments still apply.
    pub fn apply_fees(&mut self, estimate: FeeEstimate) -> &mut Self {
        self.system_fee = estimate.system_fee;
        self.network_fee = estimate.network_fee;
        self
    }

    /// Fees `build` will put into the transaction: base plus adjustments.
    pub fn fees(&self) -> TxResult<FeeEstimate> {
        let system_fee = total_fee("system_fee", self.system_fee, self.additional_system_fee)?;
        let network_fee = total_fee("network_fee", self.network_fee, self.additional_network_fee)?;
        Ok(FeeEstimate {
            network_fee,
            system_fee,
        })
    }

    /// Asks the node what network fee the configured transaction needs. Each
    /// signer whose account is in `accounts` gets a verification-only witness
    /// so the node can price its verification. The builder is not modified.
    pub async fn calculate_fees<C>(&self, client: &C, accounts: &[&dyn Account]) -> TxResult<FeeEstimate>
    where
        C: RpcProvider + ?Sized,
    {
        check_body(&self.signers, &self.attributes, &self.script)?;

        let fees = self.fees()?;
        let mut snapshot = Transaction::from_parts(
            self.version,
            self.nonce.unwrap_or_default(),
            fees.system_fee,
            fees.network_fee,
            self.valid_until_block.unwrap_or_default(),
            self.signers.clone(),
            self.attributes.clone(),
            self.script.clone(),
        );
        for signer in &self.signers {
            if let Some(account) = find_account(accounts, signer.account()) {
                snapshot.add_witness(Witness::verification_only(account.verification_script().to_vec()));
            }
        }

        let network_fee = client.calculate_network_fee(&snapshot.to_bytes()).await?;
        debug!(network_fee, system_fee = self.system_fee, "fetched fee estimate");
        Ok(FeeEstimate {
            network_fee,
            system_fee: self.system_fee,
        })
    }

    /// Copies the configured state into an unsigned transaction. A missing
    /// nonce is drawn at random.
    pub fn build(&self) -> TxResult<Transaction> {
        if self.signers.is_empty() {
            return Err(TxError::NoSigner);
        }
        let valid_until_block = self.check_valid_until_block()?;
        check_body(&self.signers, &self.attributes, &self.script)?;

        let fees = self.fees()?;
        let nonce = self.nonce.unwrap_or_else(rand::random);
        let tx = Transaction::from_parts(
            self.version,
            nonce,
            fees.system_fee,
            fees.network_fee,
            valid_until_block,
            self.signers.clone(),
            self.attributes.clone(),
            self.script.clone(),
        );
        if tx.size() > MAX_TRANSACTION_SIZE {
            return Err(TxError::SizeExceeded {
                what: "transaction",
                max: MAX_TRANSACTION_SIZE,
            });
        }

        debug!(hash = %tx.hash(), nonce, valid_until_block, size = tx.size(), "built transaction");
        Ok(tx)
    }

    fn check_valid_until_block(&self) -> TxResult<u32> {
        let valid_until_block = self
            .valid_until_block
            .ok_or_else(|| TxError::invalid_argument("valid_until_block", "not set"))?;
        if let Some(height) = self.known_height {
            if valid_until_block <= height {
                return Err(TxError::invalid_argument(
                    "valid_until_block",
                    format!("{valid_until_block} is not above the chain height {height}"),
                ));
            }
            let max = self.settings.max_valid_until_block_increment;
            if valid_until_block - height > max {
                return Err(TxError::invalid_argument(
                    "valid_until_block",
                    format!("{valid_until_block} is more than {max} blocks above height {height}"),
                ));
            }
        }
        Ok(valid_until_block)
    }

    /// Attaches one witness per signer, in signer order. A multi-signature
    /// signer is signed by its participants found among `accounts`, in key
    /// order, until the threshold is met. On error `tx` is left unchanged.
    pub async fn sign(&self, tx: &mut Transaction, accounts: &[&dyn Account]) -> TxResult<()> {
        if !tx.witnesses().is_empty() {
            return Err(TxError::InvalidState(format!(
                "transaction {} already carries witnesses",
                tx.hash()
            )));
        }

        let message = tx.sign_data(self.settings.network);
        let mut signed = tx.clone();
        for signer in tx.signers() {
            let account = find_account(accounts, signer.account())
                .ok_or_else(|| TxError::NotFound(format!("account for signer {}", signer.account())))?;

            let signatures = match account.multi_sig() {
                Some(info) => {
                    let mut signatures = Vec::with_capacity(info.threshold);
                    for key in &info.public_keys {
                        if signatures.len() == info.threshold {
                            break;
                        }
                        if let Some(participant) = find_participant(accounts, key) {
                            signatures.push(self.sign_with(participant, &message).await?);
                        }
                    }
                    if signatures.len() < info.threshold {
                        return Err(TxError::NotFound(format!(
                            "{} of {} participant accounts for multi-signature signer {}",
                            signatures.len(),
                            info.threshold,
                            signer.account()
                        )));
                    }
                    signatures
                }
                None => vec![self.sign_with(account, &message).await?],
            };

            let witness = Witness::new(
                invocation_script(&signatures),
                account.verification_script().to_vec(),
            );
            check_witness_size(&witness)?;
            signed.add_witness(witness);
            debug!(account = %signer.account(), signatures = signatures.len(), "attached witness");
        }

        if signed.size() > MAX_TRANSACTION_SIZE {
            return Err(TxError::SizeExceeded {
                what: "transaction",
                max: MAX_TRANSACTION_SIZE,
            });
        }
        *tx = signed;
        Ok(())
    }

    pub async fn build_and_sign(&self, accounts: &[&dyn Account]) -> TxResult<Transaction> {
        let mut tx = self.build()?;
        self.sign(&mut tx, accounts).await?;
        Ok(tx)
    }

    /// One signing call bounded by the configured timeout. High-S results are
    /// normalized; results that do not verify under the account key are rejected.
    async fn sign_with(&self, account: &dyn Account, message: &[u8]) -> TxResult<Signature> {
        let timeout = self.settings.sign_timeout();
        let script_hash = account.script_hash();
        let signature = match tokio::time::timeout(timeout, account.sign(message)).await {
            Ok(Ok(signature)) => signature,
            Ok(Err(err)) => {
                return Err(TxError::Account {
                    account: script_hash,
                    reason: err.to_string(),
                })
            }
            Err(_elapsed) => {
                return Err(TxError::SigningTimeout {
                    account: script_hash,
                    timeout,
                })
            }
        };

        let signature = if signature.is_canonical() {
            signature
        } else {
            warn!(account = %script_hash, "account returned a high-S signature, normalizing");
            signature.normalize_s()
        };

        if let Some(key) = account.public_key() {
            key.secp256r1_verify(message, &signature)
                .map_err(|err| TxError::Account {
                    account: script_hash,
                    reason: format!("signature does not verify: {err}"),
                })?;
        }
        trace!(account = %script_hash, signature = ?signature, "signed");
        Ok(signature)
    }
}

/// Nodes refuse witnesses whose scripts exceed the decoder limits.
fn check_witness_size(witness: &Witness) -> TxResult<()> {
    if witness.invocation_script.len() > MAX_INVOCATION_SCRIPT {
        return Err(TxError::SizeExceeded {
            what: "invocation script",
            max: MAX_INVOCATION_SCRIPT,
        });
    }
    if witness.verification_script.len() > MAX_VERIFICATION_SCRIPT {
        return Err(TxError::SizeExceeded {
            what: "verification script",
            max: MAX_VERIFICATION_SCRIPT,
        });
    }
    Ok(())
}

fn total_fee(field: &'static str, base: u64, adjustment: u64) -> TxResult<u64> {
    base.checked_add(adjustment)
        .filter(|fee| *fee <= i64::MAX as u64)
        .ok_or_else(|| TxError::invalid_argument(field, "fee exceeds the 64-bit signed range"))
}

fn find_account<'a>(accounts: &[&'a dyn Account], script_hash: UInt160) -> Option<&'a dyn Account> {
    accounts
        .iter()
        .copied()
        .find(|account| account.script_hash() == script_hash)
}

fn find_participant<'a>(accounts: &[&'a dyn Account], key: &PublicKey) -> Option<&'a dyn Account> {
    accounts
        .iter()
        .copied()
        .find(|account| account.public_key().as_ref() == Some(key))
}
