//! Upgrade an earlier temporary-privacy transfer to a permanent
//! commitment.
//!
//! This is the one place the wallet must not take the server's word for
//! anything: before re-signing against the new commitment, the action
//! independently proves that the original commitment is contained in the
//! merkle tree the server claims. A proof that fails — by even one byte —
//! kills the action with a typed error; the server's value is never
//! silently substituted.

use chain_sol::{CommitmentAccounts, SolanaTransaction, TransactionBuilder};
use wallet_core::{verify_contained, Hash, KeyPair, PublicKey};

use crate::accounts::AccountCluster;
use crate::actions::{required_configs, wire::WireAction};
use crate::error::IntentError;
use crate::kin::Kin;
use crate::server_parameter::{Parameter, ServerParameter};

#[derive(Debug, Clone)]
pub struct ActionPrivacyUpgrade {
    pub id: u32,
    pub server_parameter: Option<ServerParameter>,
    pub signer: Option<KeyPair>,

    pub source: AccountCluster,
    pub original_action_id: u32,
    pub original_commitment: PublicKey,
    pub original_amount: Kin,
    pub original_nonce: PublicKey,
    pub original_recent_blockhash: Hash,
    pub treasury: PublicKey,
}

impl ActionPrivacyUpgrade {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: AccountCluster,
        original_action_id: u32,
        original_commitment: PublicKey,
        original_amount: Kin,
        original_nonce: PublicKey,
        original_recent_blockhash: Hash,
        treasury: PublicKey,
    ) -> Self {
        ActionPrivacyUpgrade {
            id: 0,
            server_parameter: None,
            signer: Some(source.authority.clone()),
            source,
            original_action_id,
            original_commitment,
            original_amount,
            original_nonce,
            original_recent_blockhash,
            treasury,
        }
    }

    pub fn transactions(&self) -> Result<Vec<SolanaTransaction>, IntentError> {
        let parameter = required_configs(&self.server_parameter)?;

        let Some(Parameter::PrivacyUpgrade {
            new_commitment_transcript,
            new_commitment_destination,
            new_commitment_amount,
            merkle_root,
            merkle_proof,
            ..
        }) = &parameter.parameter
        else {
            return Err(IntentError::MissingParameterPayload);
        };

        // Prove the original commitment sits under the declared root
        // before trusting anything else in the payload.
        let proof_is_valid = verify_contained(
            self.original_commitment.as_ref(),
            merkle_root,
            merkle_proof,
        );
        if !proof_is_valid {
            return Err(IntentError::InvalidMerkleProof);
        }

        let commitment = CommitmentAccounts::new(
            self.treasury,
            *new_commitment_destination,
            *merkle_root,
            *new_commitment_transcript,
            new_commitment_amount.quarks(),
        )?;

        // The server may echo a nonce and blockhash here, but only the
        // values the original transaction used are acceptable.
        Ok(vec![TransactionBuilder::transfer(
            &self.source.timelock,
            commitment.vault.public_key,
            self.original_amount.quarks(),
            self.original_nonce,
            self.original_recent_blockhash,
        )])
    }

    pub fn wire(&self) -> WireAction {
        WireAction::PermanentPrivacyUpgrade {
            id: self.id,
            original_action_id: self.original_action_id,
        }
    }
}
