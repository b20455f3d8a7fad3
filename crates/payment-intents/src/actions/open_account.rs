//! Open a timelock account.
//!
//! The server constructs and funds the actual open, so this action carries
//! no transactions and produces no signatures; instead the authority's
//! proof-of-ownership signature is embedded directly in the wire payload.

use wallet_core::{KeyPair, PublicKey};

use crate::accounts::{AccountCluster, AccountType};
use crate::actions::wire::WireAction;
use crate::error::IntentError;
use crate::server_parameter::ServerParameter;

#[derive(Debug, Clone)]
pub struct ActionOpenAccount {
    pub id: u32,
    pub server_parameter: Option<ServerParameter>,
    pub signer: Option<KeyPair>,

    pub owner: PublicKey,
    pub account_type: AccountType,
    pub cluster: AccountCluster,
}

impl ActionOpenAccount {
    pub fn new(owner: PublicKey, account_type: AccountType, cluster: AccountCluster) -> Self {
        ActionOpenAccount {
            id: 0,
            server_parameter: None,
            signer: Some(cluster.authority.clone()),
            owner,
            account_type,
            cluster,
        }
    }

    pub fn wire(&self) -> Result<WireAction, IntentError> {
        let signer = self.signer.as_ref().ok_or(IntentError::MissingSigner)?;

        // The authority proves control by signing the vault address it is
        // asking the server to open.
        let token = self.cluster.vault_public_key();
        let authority_signature = signer.sign(token.as_ref());

        Ok(WireAction::OpenAccount {
            id: self.id,
            account_type: self.account_type,
            owner: self.owner,
            authority: self.cluster.authority_public_key(),
            token,
            index: self.cluster.index,
            authority_signature,
        })
    }
}
