//! Fee payments out of the outgoing account.

use chain_sol::{SolanaTransaction, TransactionBuilder};
use wallet_core::{KeyPair, PublicKey};

use crate::accounts::AccountCluster;
use crate::actions::{required_configs, wire::WireAction};
use crate::error::IntentError;
use crate::kin::Kin;
use crate::server_parameter::{Parameter, ServerParameter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeeKind {
    /// The platform fee; its destination arrives with the server
    /// parameter.
    Code,
    /// A third-party fee with a destination fixed at composition time.
    ThirdParty(PublicKey),
}

#[derive(Debug, Clone)]
pub struct ActionFeePayment {
    pub id: u32,
    pub server_parameter: Option<ServerParameter>,
    pub signer: Option<KeyPair>,

    pub kind: FeeKind,
    pub cluster: AccountCluster,
    pub amount: Kin,
}

impl ActionFeePayment {
    pub fn new(kind: FeeKind, cluster: AccountCluster, amount: Kin) -> Self {
        ActionFeePayment {
            id: 0,
            server_parameter: None,
            signer: Some(cluster.authority.clone()),
            kind,
            cluster,
            amount,
        }
    }

    fn destination(&self) -> Result<PublicKey, IntentError> {
        match &self.kind {
            FeeKind::ThirdParty(destination) => Ok(*destination),
            FeeKind::Code => {
                let parameter = required_configs(&self.server_parameter)?;
                match &parameter.parameter {
                    Some(Parameter::FeePayment {
                        code_destination: Some(destination),
                    }) => Ok(*destination),
                    _ => Err(IntentError::MissingFeeDestination),
                }
            }
        }
    }

    pub fn transactions(&self) -> Result<Vec<SolanaTransaction>, IntentError> {
        let parameter = required_configs(&self.server_parameter)?;
        let destination = self.destination()?;

        Ok(parameter
            .configs
            .iter()
            .map(|config| {
                TransactionBuilder::transfer(
                    &self.cluster.timelock,
                    destination,
                    self.amount.quarks(),
                    config.nonce,
                    config.blockhash,
                )
            })
            .collect())
    }

    pub fn wire(&self) -> WireAction {
        WireAction::FeePayment {
            id: self.id,
            source: self.cluster.vault_public_key(),
            authority: self.cluster.authority_public_key(),
            amount: self.amount,
            destination: match &self.kind {
                FeeKind::Code => None,
                FeeKind::ThirdParty(destination) => Some(*destination),
            },
        }
    }
}
