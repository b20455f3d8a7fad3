//! Withdrawals: dismantling a dormant account, or paying out an exact
//! amount without privacy.

use chain_sol::{SolanaTransaction, TransactionBuilder};
use wallet_core::{KeyPair, PublicKey};

use crate::accounts::{AccountCluster, AccountType};
use crate::actions::{required_configs, wire::WireAction};
use crate::error::IntentError;
use crate::kin::Kin;
use crate::server_parameter::ServerParameter;

#[derive(Debug, Clone, PartialEq)]
pub enum WithdrawKind {
    /// Fully dismantle a rotated temp account, sweeping whatever is left
    /// to the destination.
    CloseDormantAccount(AccountType),
    /// Pay out a known amount. `should_close` controls whether the server
    /// also closes the source afterwards or leaves it open.
    NoPrivacyWithdraw { amount: Kin, should_close: bool },
}

#[derive(Debug, Clone)]
pub struct ActionWithdraw {
    pub id: u32,
    pub server_parameter: Option<ServerParameter>,
    pub signer: Option<KeyPair>,

    pub kind: WithdrawKind,
    pub cluster: AccountCluster,
    pub destination: PublicKey,
}

impl ActionWithdraw {
    pub fn new(kind: WithdrawKind, cluster: AccountCluster, destination: PublicKey) -> Self {
        ActionWithdraw {
            id: 0,
            server_parameter: None,
            signer: Some(cluster.authority.clone()),
            kind,
            cluster,
            destination,
        }
    }

    pub fn transactions(&self) -> Result<Vec<SolanaTransaction>, IntentError> {
        let parameter = required_configs(&self.server_parameter)?;

        let transactions = parameter
            .configs
            .iter()
            .map(|config| match &self.kind {
                WithdrawKind::CloseDormantAccount(_) => TransactionBuilder::close_dormant_account(
                    self.cluster.authority_public_key(),
                    &self.cluster.timelock,
                    self.destination,
                    config.nonce,
                    config.blockhash,
                ),
                WithdrawKind::NoPrivacyWithdraw { amount, .. } => TransactionBuilder::transfer(
                    &self.cluster.timelock,
                    self.destination,
                    amount.quarks(),
                    config.nonce,
                    config.blockhash,
                ),
            })
            .collect();

        Ok(transactions)
    }

    pub fn wire(&self) -> WireAction {
        match &self.kind {
            WithdrawKind::CloseDormantAccount(account_type) => WireAction::CloseDormantAccount {
                id: self.id,
                account_type: *account_type,
                authority: self.cluster.authority_public_key(),
                token: self.cluster.vault_public_key(),
                destination: self.destination,
            },
            WithdrawKind::NoPrivacyWithdraw {
                amount,
                should_close,
            } => WireAction::NoPrivacyWithdraw {
                id: self.id,
                source: self.cluster.vault_public_key(),
                destination: self.destination,
                authority: self.cluster.authority_public_key(),
                amount: *amount,
                should_close: *should_close,
            },
        }
    }
}
