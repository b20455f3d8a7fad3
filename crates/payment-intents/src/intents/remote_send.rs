//! Send to someone who isn't on the network yet: funds park in a
//! self-contained gift card account whose authority travels with the
//! card.

use wallet_core::PublicKey;

use crate::accounts::{AccountType, GiftCardAccount};
use crate::actions::{Action, ActionOpenAccount, ActionWithdraw, WithdrawKind};
use crate::error::IntentError;
use crate::intents::{transfer_action_for, ActionGroup, Intent, IntentMetadata};
use crate::kin::Kin;
use crate::tray::Tray;

pub struct IntentRemoteSend {
    id: PublicKey,
    gift_card_vault: PublicKey,
    amount: Kin,
    action_group: ActionGroup,
    result_tray: Tray,
}

impl IntentRemoteSend {
    pub fn new(
        rendezvous: PublicKey,
        tray: &Tray,
        gift_card: &GiftCardAccount,
        amount: Kin,
    ) -> Result<IntentRemoteSend, IntentError> {
        let start_balance = tray.slots_balance();

        // 1. Open the gift card account.
        let mut actions: Vec<Action> = vec![Action::OpenAccount(ActionOpenAccount::new(
            gift_card.cluster.authority_public_key(),
            AccountType::RemoteSend,
            gift_card.cluster.clone(),
        ))];

        // 2. Drain the buckets into the outgoing account.
        let (next, transfers) = tray.transfer(amount)?;
        actions.extend(
            transfers
                .iter()
                .map(|exchange| transfer_action_for(&next, rendezvous, exchange)),
        );

        // 3. Move the collected funds onto the gift card.
        actions.push(Action::Withdraw(ActionWithdraw::new(
            WithdrawKind::NoPrivacyWithdraw {
                amount,
                should_close: true,
            },
            next.outgoing().cluster.clone(),
            gift_card.cluster.vault_public_key(),
        )));

        // 4. Rebalance the remaining buckets.
        let (next, redistributions) = next.redistribute();
        actions.extend(
            redistributions
                .iter()
                .map(|exchange| transfer_action_for(&next, rendezvous, exchange)),
        );

        // 5. Rotate the outgoing account.
        let next = next.increment_outgoing()?;
        actions.push(Action::OpenAccount(ActionOpenAccount::new(
            next.owner().cluster.authority_public_key(),
            AccountType::Outgoing,
            next.outgoing().cluster.clone(),
        )));
        actions.push(Action::Withdraw(ActionWithdraw::new(
            WithdrawKind::CloseDormantAccount(AccountType::Outgoing),
            next.outgoing().cluster.clone(),
            next.owner().cluster.vault_public_key(),
        )));

        // 6. Reclaim the gift card if it is never redeemed.
        actions.push(Action::Withdraw(ActionWithdraw::new(
            WithdrawKind::CloseDormantAccount(AccountType::RemoteSend),
            gift_card.cluster.clone(),
            next.owner().cluster.vault_public_key(),
        )));

        if start_balance - next.slots_balance() != amount {
            return Err(IntentError::BalanceMismatch);
        }

        Ok(IntentRemoteSend {
            id: rendezvous,
            gift_card_vault: gift_card.cluster.vault_public_key(),
            amount,
            action_group: ActionGroup::new(actions),
            result_tray: next,
        })
    }

    pub fn amount(&self) -> Kin {
        self.amount
    }
}

impl Intent for IntentRemoteSend {
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
        IntentMetadata::SendPrivatePayment {
            destination: self.gift_card_vault,
            amount: self.amount,
            is_withdrawal: false,
            is_remote_send: true,
        }
    }

    fn result_tray(&self) -> &Tray {
        &self.result_tray
    }
}
