//! Tagged wire records for intent submission.
//!
//! One record per action, in action order; amounts travel as quarks and
//! every account identifier as Base58.

use serde::{Deserialize, Serialize};
use wallet_core::{PublicKey, Signature};

use crate::accounts::AccountType;
use crate::kin::Kin;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireAction {
    OpenAccount {
        id: u32,
        account_type: AccountType,
        owner: PublicKey,
        authority: PublicKey,
        token: PublicKey,
        index: u32,
        authority_signature: Signature,
    },
    TemporaryPrivacyTransfer {
        id: u32,
        source: PublicKey,
        destination: PublicKey,
        authority: PublicKey,
        amount: Kin,
    },
    TemporaryPrivacyExchange {
        id: u32,
        source: PublicKey,
        destination: PublicKey,
        authority: PublicKey,
        amount: Kin,
    },
    NoPrivacyTransfer {
        id: u32,
        source: PublicKey,
        destination: PublicKey,
        authority: PublicKey,
        amount: Kin,
    },
    NoPrivacyWithdraw {
        id: u32,
        source: PublicKey,
        destination: PublicKey,
        authority: PublicKey,
        amount: Kin,
        should_close: bool,
    },
    CloseDormantAccount {
        id: u32,
        account_type: AccountType,
        authority: PublicKey,
        token: PublicKey,
        destination: PublicKey,
    },
    CloseEmptyAccount {
        id: u32,
        account_type: AccountType,
        authority: PublicKey,
        token: PublicKey,
    },
    FeePayment {
        id: u32,
        source: PublicKey,
        authority: PublicKey,
        amount: Kin,
        destination: Option<PublicKey>,
    },
    PermanentPrivacyUpgrade {
        id: u32,
        original_action_id: u32,
    },
}

impl WireAction {
    pub fn id(&self) -> u32 {
        match self {
            WireAction::OpenAccount { id, .. }
            | WireAction::TemporaryPrivacyTransfer { id, .. }
            | WireAction::TemporaryPrivacyExchange { id, .. }
            | WireAction::NoPrivacyTransfer { id, .. }
            | WireAction::NoPrivacyWithdraw { id, .. }
            | WireAction::CloseDormantAccount { id, .. }
            | WireAction::CloseEmptyAccount { id, .. }
            | WireAction::FeePayment { id, .. }
            | WireAction::PermanentPrivacyUpgrade { id, .. } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tag_shape() {
        let wire = WireAction::PermanentPrivacyUpgrade {
            id: 7,
            original_action_id: 2,
        };
        let json = serde_json::to_string(&wire).unwrap();
        assert_eq!(
            json,
            r#"{"type":"permanent_privacy_upgrade","id":7,"original_action_id":2}"#
        );
    }

    #[test]
    fn round_trip() {
        let wire = WireAction::NoPrivacyWithdraw {
            id: 3,
            source: PublicKey::new([1; 32]),
            destination: PublicKey::new([2; 32]),
            authority: PublicKey::new([3; 32]),
            amount: Kin::from_kin(10),
            should_close: true,
        };
        let json = serde_json::to_string(&wire).unwrap();
        let back: WireAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wire);
        assert_eq!(back.id(), 3);
    }
}
