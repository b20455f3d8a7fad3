//! Move funds between wallet accounts, privately or not.

use chain_sol::{CommitmentAccounts, SolanaTransaction, TransactionBuilder};
use wallet_core::{KeyPair, PublicKey};

use crate::accounts::AccountCluster;
use crate::actions::{required_configs, wire::WireAction};
use crate::error::IntentError;
use crate::kin::Kin;
use crate::server_parameter::{Parameter, ServerParameter};

/// The three transfer shapes share one layout and differ only in where
/// the destination points.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransferKind {
    /// Bucket → outgoing through a splitter commitment.
    TempPrivacyTransfer,
    /// Bucket → bucket through a splitter commitment.
    TempPrivacyExchange,
    /// Direct transfer with no privacy re-derivation.
    NoPrivacyTransfer,
}

#[derive(Debug, Clone)]
pub struct ActionTransfer {
    pub id: u32,
    pub server_parameter: Option<ServerParameter>,
    pub signer: Option<KeyPair>,

    pub kind: TransferKind,
    pub intent_id: PublicKey,
    pub amount: Kin,
    pub source: AccountCluster,
    pub destination: PublicKey,
}

impl ActionTransfer {
    pub fn new(
        kind: TransferKind,
        intent_id: PublicKey,
        amount: Kin,
        source: AccountCluster,
        destination: PublicKey,
    ) -> Self {
        ActionTransfer {
            id: 0,
            server_parameter: None,
            signer: Some(source.authority.clone()),
            kind,
            intent_id,
            amount,
            source,
            destination,
        }
    }

    pub fn transactions(&self) -> Result<Vec<SolanaTransaction>, IntentError> {
        let parameter = required_configs(&self.server_parameter)?;

        // Temporary-privacy legs don't pay the stated destination directly:
        // the real destination is the commitment vault derived from the
        // server's treasury context and this action's transcript.
        let resolved_destination = match &parameter.parameter {
            Some(Parameter::TempPrivacy {
                treasury,
                recent_root,
            }) => {
                let commitment = CommitmentAccounts::from_transfer(
                    self.source.vault_public_key(),
                    self.destination,
                    self.amount.quarks(),
                    *treasury,
                    *recent_root,
                    self.intent_id,
                    self.id,
                )?;
                commitment.vault.public_key
            }
            _ => self.destination,
        };

        Ok(parameter
            .configs
            .iter()
            .map(|config| {
                TransactionBuilder::transfer(
                    &self.source.timelock,
                    resolved_destination,
                    self.amount.quarks(),
                    config.nonce,
                    config.blockhash,
                )
            })
            .collect())
    }

    pub fn wire(&self) -> WireAction {
        let source = self.source.vault_public_key();
        let authority = self.source.authority_public_key();

        match self.kind {
            TransferKind::TempPrivacyTransfer => WireAction::TemporaryPrivacyTransfer {
                id: self.id,
                source,
                destination: self.destination,
                authority,
                amount: self.amount,
            },
            TransferKind::TempPrivacyExchange => WireAction::TemporaryPrivacyExchange {
                id: self.id,
                source,
                destination: self.destination,
                authority,
                amount: self.amount,
            },
            TransferKind::NoPrivacyTransfer => WireAction::NoPrivacyTransfer {
                id: self.id,
                source,
                destination: self.destination,
                authority,
                amount: self.amount,
            },
        }
    }
}
