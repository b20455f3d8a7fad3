//! The closed set of low-level actions an intent is built from.
//!
//! Every action follows one contract: it produces zero or more signable
//! transaction pre-images (one per server-provided nonce config), signs
//! exactly those pre-images on demand, and maps to a tagged wire record
//! for submission. The set is fixed — adding a kind means updating every
//! match below, which is the point.

mod close_empty_account;
mod fee_payment;
mod open_account;
mod privacy_upgrade;
mod transfer;
mod wire;
mod withdraw;

pub use close_empty_account::ActionCloseEmptyAccount;
pub use fee_payment::{ActionFeePayment, FeeKind};
pub use open_account::ActionOpenAccount;
pub use privacy_upgrade::ActionPrivacyUpgrade;
pub use transfer::{ActionTransfer, TransferKind};
pub use wire::WireAction;
pub use withdraw::{ActionWithdraw, WithdrawKind};

use chain_sol::SolanaTransaction;
use wallet_core::{KeyPair, Signature};

use crate::error::IntentError;
use crate::server_parameter::ServerParameter;

#[derive(Debug, Clone)]
pub enum Action {
    OpenAccount(ActionOpenAccount),
    Transfer(ActionTransfer),
    Withdraw(ActionWithdraw),
    FeePayment(ActionFeePayment),
    CloseEmptyAccount(ActionCloseEmptyAccount),
    PrivacyUpgrade(ActionPrivacyUpgrade),
}

impl Action {
    pub fn id(&self) -> u32 {
        match self {
            Action::OpenAccount(action) => action.id,
            Action::Transfer(action) => action.id,
            Action::Withdraw(action) => action.id,
            Action::FeePayment(action) => action.id,
            Action::CloseEmptyAccount(action) => action.id,
            Action::PrivacyUpgrade(action) => action.id,
        }
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        match self {
            Action::OpenAccount(action) => action.id = id,
            Action::Transfer(action) => action.id = id,
            Action::Withdraw(action) => action.id = id,
            Action::FeePayment(action) => action.id = id,
            Action::CloseEmptyAccount(action) => action.id = id,
            Action::PrivacyUpgrade(action) => action.id = id,
        }
    }

    pub fn server_parameter(&self) -> Option<&ServerParameter> {
        match self {
            Action::OpenAccount(action) => action.server_parameter.as_ref(),
            Action::Transfer(action) => action.server_parameter.as_ref(),
            Action::Withdraw(action) => action.server_parameter.as_ref(),
            Action::FeePayment(action) => action.server_parameter.as_ref(),
            Action::CloseEmptyAccount(action) => action.server_parameter.as_ref(),
            Action::PrivacyUpgrade(action) => action.server_parameter.as_ref(),
        }
    }

    pub fn set_server_parameter(&mut self, parameter: ServerParameter) {
        match self {
            Action::OpenAccount(action) => action.server_parameter = Some(parameter),
            Action::Transfer(action) => action.server_parameter = Some(parameter),
            Action::Withdraw(action) => action.server_parameter = Some(parameter),
            Action::FeePayment(action) => action.server_parameter = Some(parameter),
            Action::CloseEmptyAccount(action) => action.server_parameter = Some(parameter),
            Action::PrivacyUpgrade(action) => action.server_parameter = Some(parameter),
        }
    }

    pub fn signer(&self) -> Option<&KeyPair> {
        match self {
            Action::OpenAccount(action) => action.signer.as_ref(),
            Action::Transfer(action) => action.signer.as_ref(),
            Action::Withdraw(action) => action.signer.as_ref(),
            Action::FeePayment(action) => action.signer.as_ref(),
            Action::CloseEmptyAccount(action) => action.signer.as_ref(),
            Action::PrivacyUpgrade(action) => action.signer.as_ref(),
        }
    }

    /// How many nonce configs the server must provide before this action
    /// can sign. Fixed per kind.
    pub fn config_count_requirement(&self) -> usize {
        match self {
            Action::OpenAccount(_) => 0,
            Action::Transfer(_)
            | Action::Withdraw(_)
            | Action::FeePayment(_)
            | Action::CloseEmptyAccount(_)
            | Action::PrivacyUpgrade(_) => 1,
        }
    }

    /// Build the transactions this action stands for, one per server
    /// config.
    pub fn transactions(&self) -> Result<Vec<SolanaTransaction>, IntentError> {
        match self {
            Action::OpenAccount(_) => Ok(Vec::new()),
            Action::Transfer(action) => action.transactions(),
            Action::Withdraw(action) => action.transactions(),
            Action::FeePayment(action) => action.transactions(),
            Action::CloseEmptyAccount(action) => action.transactions(),
            Action::PrivacyUpgrade(action) => action.transactions(),
        }
    }

    /// The signable pre-image of each transaction.
    pub fn compact_messages(&self) -> Result<Vec<Vec<u8>>, IntentError> {
        Ok(self
            .transactions()?
            .iter()
            .map(|transaction| transaction.message.encode())
            .collect())
    }

    /// Sign every pre-image.
    ///
    /// Returns no signatures when the kind requires no configs; otherwise
    /// fails typed when the signer or server parameter is missing.
    pub fn signatures(&self) -> Result<Vec<Signature>, IntentError> {
        if self.config_count_requirement() == 0 {
            return Ok(Vec::new());
        }

        let signer = self.signer().ok_or(IntentError::MissingSigner)?;
        let messages = self.compact_messages()?;
        Ok(messages
            .iter()
            .map(|message| signer.sign(message))
            .collect())
    }

    /// The tagged wire record submitted to the server.
    pub fn wire(&self) -> Result<WireAction, IntentError> {
        match self {
            Action::OpenAccount(action) => action.wire(),
            Action::Transfer(action) => Ok(action.wire()),
            Action::Withdraw(action) => Ok(action.wire()),
            Action::FeePayment(action) => Ok(action.wire()),
            Action::CloseEmptyAccount(action) => Ok(action.wire()),
            Action::PrivacyUpgrade(action) => Ok(action.wire()),
        }
    }

}

/// Shared helper: the configs from a server parameter, or the typed
/// absence error.
pub(crate) fn required_configs(
    parameter: &Option<ServerParameter>,
) -> Result<&ServerParameter, IntentError> {
    parameter.as_ref().ok_or(IntentError::MissingServerParameter)
}
