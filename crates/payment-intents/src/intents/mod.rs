//! Intent composition: ordered, numbered action groups with balance
//! invariants enforced before any network interaction.

mod receive;
mod remote_send;
mod transfer;

pub use receive::IntentReceive;
pub use remote_send::IntentRemoteSend;
pub use transfer::{Fee, IntentTransfer};

use serde::{Deserialize, Serialize};
use wallet_core::{KeyPair, PublicKey, Signature};

use crate::actions::{Action, ActionTransfer, TransferKind, WireAction};
use crate::error::IntentError;
use crate::kin::Kin;
use crate::server_parameter::ServerParameter;
use crate::tray::{Exchange, Tray};
use crate::AccountType;

/// An ordered group of actions representing one atomic intent.
///
/// Ids are assigned 0..n-1 exactly once, at construction; they stay fixed
/// through parameter application, signing and submission, and they feed
/// into the signed pre-images (commitment transcripts embed the action
/// id), so renumbering after the fact would invalidate signatures.
#[derive(Debug, Clone)]
pub struct ActionGroup {
    actions: Vec<Action>,
}

impl ActionGroup {
    pub fn new(actions: Vec<Action>) -> ActionGroup {
        let mut actions = actions;
        for (index, action) in actions.iter_mut().enumerate() {
            action.set_id(index as u32);
        }
        ActionGroup { actions }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Attach one server parameter per action, positionally, verifying the
    /// ids line up.
    pub fn apply_parameters(
        &mut self,
        parameters: Vec<ServerParameter>,
    ) -> Result<(), IntentError> {
        if parameters.len() != self.actions.len() {
            return Err(IntentError::InvalidParameterCount {
                expected: self.actions.len(),
                actual: parameters.len(),
            });
        }

        for (action, parameter) in self.actions.iter_mut().zip(parameters) {
            if action.id() != parameter.action_id {
                return Err(IntentError::ActionParameterMismatch {
                    action: action.id(),
                    parameter: parameter.action_id,
                });
            }
            action.set_server_parameter(parameter);
        }

        Ok(())
    }

    /// All signatures, in action order.
    pub fn signatures(&self) -> Result<Vec<Signature>, IntentError> {
        let mut signatures = Vec::new();
        for action in &self.actions {
            signatures.extend(action.signatures()?);
        }
        Ok(signatures)
    }

    pub fn wire_actions(&self) -> Result<Vec<WireAction>, IntentError> {
        self.actions.iter().map(|action| action.wire()).collect()
    }
}

/// Kind-specific intent metadata submitted alongside the actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IntentMetadata {
    SendPrivatePayment {
        destination: PublicKey,
        amount: Kin,
        is_withdrawal: bool,
        is_remote_send: bool,
    },
    ReceivePaymentsPrivately {
        source: PublicKey,
        amount: Kin,
        is_deposit: bool,
    },
}

/// The complete submission payload for one intent.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitIntentRequest {
    pub intent_id: PublicKey,
    pub owner: PublicKey,
    pub metadata: IntentMetadata,
    pub actions: Vec<WireAction>,
    pub signatures: Vec<Signature>,
    pub owner_signature: Signature,
}

/// The shared surface of every intent kind.
pub trait Intent {
    fn id(&self) -> PublicKey;
    fn action_group(&self) -> &ActionGroup;
    fn action_group_mut(&mut self) -> &mut ActionGroup;
    fn metadata(&self) -> IntentMetadata;

    /// The resulting tray once this intent lands; committed by the caller
    /// only after a successful submission.
    fn result_tray(&self) -> &Tray;

    /// Sign and assemble the full submission payload.
    fn submittable(&self, owner: &KeyPair) -> Result<SubmitIntentRequest, IntentError> {
        let actions = self.action_group().wire_actions()?;
        let signatures = self.action_group().signatures()?;

        // The owner endorses the id, metadata and action list as one unit.
        #[derive(Serialize)]
        struct Endorsement<'a> {
            intent_id: &'a PublicKey,
            metadata: &'a IntentMetadata,
            actions: &'a [WireAction],
        }
        let metadata = self.metadata();
        let endorsement = serde_json::to_vec(&Endorsement {
            intent_id: &self.id(),
            metadata: &metadata,
            actions: &actions,
        })
        .expect("wire records always serialize");

        Ok(SubmitIntentRequest {
            intent_id: self.id(),
            owner: owner.public_key(),
            metadata,
            actions,
            signatures,
            owner_signature: owner.sign(&endorsement),
        })
    }
}

/// Map one planned bucket exchange to its transfer action. Moves between
/// buckets are internal exchanges; anything else drains to the outgoing
/// account.
pub(crate) fn transfer_action_for(tray: &Tray, intent_id: PublicKey, exchange: &Exchange) -> Action {
    let source = tray.cluster(exchange.from).clone();
    match exchange.to {
        Some(AccountType::Bucket(slot_type)) => Action::Transfer(ActionTransfer::new(
            TransferKind::TempPrivacyExchange,
            intent_id,
            exchange.kin,
            source,
            tray.slot(slot_type).cluster.vault_public_key(),
        )),
        _ => Action::Transfer(ActionTransfer::new(
            TransferKind::TempPrivacyTransfer,
            intent_id,
            exchange.kin,
            source,
            tray.outgoing().cluster.vault_public_key(),
        )),
    }
}
