//! Per-action parameters supplied by the server before signing.

use serde::{Deserialize, Serialize};
use wallet_core::{Hash, PublicKey};

use crate::kin::Kin;

/// A durable nonce and the blockhash it was observed at — one per
/// transaction the action will produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceConfig {
    pub nonce: PublicKey,
    pub blockhash: Hash,
}

/// Kind-specific payloads attached to certain actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Parameter {
    /// Treasury context for temporary-privacy transfers: the commitment
    /// destination re-derives under this treasury and recent root.
    TempPrivacy {
        treasury: PublicKey,
        recent_root: Hash,
    },
    /// Everything needed to re-point an earlier private transfer at a
    /// permanent commitment, including the inclusion proof the client
    /// verifies independently.
    PrivacyUpgrade {
        new_commitment: PublicKey,
        new_commitment_transcript: Hash,
        new_commitment_destination: PublicKey,
        new_commitment_amount: Kin,
        merkle_root: Hash,
        merkle_proof: Vec<Hash>,
    },
    /// Destination for a code fee payment. Absent for third-party fees,
    /// which carry their own destination.
    FeePayment { code_destination: Option<PublicKey> },
}

/// The full server response for one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerParameter {
    pub action_id: u32,
    pub configs: Vec<NonceConfig>,
    pub parameter: Option<Parameter>,
}

impl ServerParameter {
    pub fn basic(action_id: u32, configs: Vec<NonceConfig>) -> ServerParameter {
        ServerParameter {
            action_id,
            configs,
            parameter: None,
        }
    }
}
