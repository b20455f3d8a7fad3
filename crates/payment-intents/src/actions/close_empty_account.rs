//! Close a rotated account that should be empty, burning any dust.

use chain_sol::{SolanaTransaction, TransactionBuilder};
use wallet_core::KeyPair;

use crate::accounts::{AccountCluster, AccountType};
use crate::actions::{required_configs, wire::WireAction};
use crate::error::IntentError;
use crate::kin::Kin;
use crate::server_parameter::ServerParameter;

/// Residual balances below one whole kin are burned rather than moved.
const MAX_DUST: Kin = Kin::from_kin(1);

#[derive(Debug, Clone)]
pub struct ActionCloseEmptyAccount {
    pub id: u32,
    pub server_parameter: Option<ServerParameter>,
    pub signer: Option<KeyPair>,

    pub account_type: AccountType,
    pub cluster: AccountCluster,
}

impl ActionCloseEmptyAccount {
    pub fn new(account_type: AccountType, cluster: AccountCluster) -> Self {
        ActionCloseEmptyAccount {
            id: 0,
            server_parameter: None,
            signer: Some(cluster.authority.clone()),
            account_type,
            cluster,
        }
    }

    pub fn transactions(&self) -> Result<Vec<SolanaTransaction>, IntentError> {
        let parameter = required_configs(&self.server_parameter)?;

        Ok(parameter
            .configs
            .iter()
            .map(|config| {
                TransactionBuilder::close_empty_account(
                    &self.cluster.timelock,
                    MAX_DUST.quarks(),
                    config.nonce,
                    config.blockhash,
                )
            })
            .collect())
    }

    pub fn wire(&self) -> WireAction {
        WireAction::CloseEmptyAccount {
            id: self.id,
            account_type: self.account_type,
            authority: self.cluster.authority_public_key(),
            token: self.cluster.vault_public_key(),
        }
    }
}
