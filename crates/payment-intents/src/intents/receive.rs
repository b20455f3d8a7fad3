//! Sweep received funds from the incoming account into the buckets.

use wallet_core::{KeyPair, PublicKey};

use crate::accounts::AccountType;
use crate::actions::{
    Action, ActionCloseEmptyAccount, ActionOpenAccount, ActionTransfer, ActionWithdraw,
    TransferKind, WithdrawKind,
};
use crate::error::IntentError;
use crate::intents::{transfer_action_for, ActionGroup, Intent, IntentMetadata};
use crate::kin::Kin;
use crate::tray::Tray;

pub struct IntentReceive {
    id: PublicKey,
    source: PublicKey,
    amount: Kin,
    action_group: ActionGroup,
    result_tray: Tray,
}

impl IntentReceive {
    pub fn new(tray: &Tray, amount: Kin) -> Result<IntentReceive, IntentError> {
        let intent_id = KeyPair::generate().public_key();
        let source = tray.incoming().cluster.vault_public_key();

        let start_slot_balance = tray.slots_balance();
        let start_incoming_balance = tray.available_incoming_balance();

        // 1. Move everything from the incoming account into buckets.
        let (next, deposits) = tray.receive(AccountType::Incoming, amount)?;
        let mut actions: Vec<Action> = deposits
            .iter()
            .map(|exchange| {
                let destination = match exchange.to {
                    Some(account_type) => next.cluster(account_type).vault_public_key(),
                    None => next.outgoing().cluster.vault_public_key(),
                };
                Action::Transfer(ActionTransfer::new(
                    TransferKind::TempPrivacyTransfer,
                    intent_id,
                    exchange.kin,
                    next.cluster(exchange.from).clone(),
                    destination,
                ))
            })
            .collect();

        // 2. Rebalance for future transfers.
        let (next, redistributions) = next.redistribute();
        actions.extend(
            redistributions
                .iter()
                .map(|exchange| transfer_action_for(&next, intent_id, exchange)),
        );

        // 3. Rotate the incoming account.
        let old_incoming = next.incoming().cluster.clone();
        let next = next.increment_incoming()?;

        actions.push(Action::CloseEmptyAccount(ActionCloseEmptyAccount::new(
            AccountType::Incoming,
            old_incoming,
        )));
        actions.push(Action::OpenAccount(ActionOpenAccount::new(
            next.owner().cluster.authority_public_key(),
            AccountType::Incoming,
            next.incoming().cluster.clone(),
        )));
        actions.push(Action::Withdraw(ActionWithdraw::new(
            WithdrawKind::CloseDormantAccount(AccountType::Incoming),
            next.incoming().cluster.clone(),
            next.owner().cluster.vault_public_key(),
        )));

        // Slots must have gained exactly what the incoming account lost.
        if next.slots_balance() - start_slot_balance != amount {
            return Err(IntentError::BalanceMismatch);
        }
        if start_incoming_balance - next.available_incoming_balance() != amount {
            return Err(IntentError::BalanceMismatch);
        }

        Ok(IntentReceive {
            id: intent_id,
            source,
            amount,
            action_group: ActionGroup::new(actions),
            result_tray: next,
        })
    }

    pub fn amount(&self) -> Kin {
        self.amount
    }
}

impl Intent for IntentReceive {
    fn id(&self) -> PublicKey {
        self.id
    }

    fn action_group(&self) -> &ActionGroup {
        &self.action_group
    }

    fn action_group_mut(&mut self) -> &mut ActionGroup {
        &mut self.action_group
    }

    fn metadata(&self) -> IntentMetadata {
        IntentMetadata::ReceivePaymentsPrivately {
            source: self.source,
            amount: self.amount,
            is_deposit: false,
        }
    }

    fn result_tray(&self) -> &Tray {
        &self.result_tray
    }
}
