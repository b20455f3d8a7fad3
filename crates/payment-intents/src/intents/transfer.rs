//! A private transfer to a destination, with optional fees.

use wallet_core::PublicKey;

use crate::accounts::AccountType;
use crate::actions::{
    Action, ActionFeePayment, ActionOpenAccount, ActionWithdraw, FeeKind, WithdrawKind,
};
use crate::error::IntentError;
use crate::intents::{transfer_action_for, ActionGroup, Intent, IntentMetadata};
use crate::kin::Kin;
use crate::tray::Tray;

/// A third-party fee taken in basis points of the gross amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fee {
    pub destination: PublicKey,
    pub bps: u16,
}

/// Sends `amount` privately: drain buckets into the outgoing account, pay
/// fees, withdraw the net to the destination, rebalance, and rotate the
/// outgoing account.
pub struct IntentTransfer {
    id: PublicKey,
    destination: PublicKey,
    gross_amount: Kin,
    net_amount: Kin,
    is_withdrawal: bool,
    action_group: ActionGroup,
    result_tray: Tray,
}

impl IntentTransfer {
    pub fn new(
        rendezvous: PublicKey,
        tray: &Tray,
        destination: PublicKey,
        amount: Kin,
        fee: Kin,
        additional_fees: &[Fee],
        is_withdrawal: bool,
    ) -> Result<IntentTransfer, IntentError> {
        // The fee comes out of the amount, so it can never exceed it.
        if fee >= amount {
            return Err(IntentError::InvalidFee);
        }

        // All fees are computed on the gross amount, and together they
        // must leave a positive net.
        let concrete_fees: Vec<(Kin, PublicKey)> = additional_fees
            .iter()
            .map(|f| (amount.calculate_fee(f.bps), f.destination))
            .collect();

        let mut net_amount = amount - fee;
        for (fee_amount, _) in &concrete_fees {
            net_amount = net_amount
                .checked_sub(*fee_amount)
                .ok_or(IntentError::InvalidFee)?;
        }
        if net_amount == Kin::ZERO {
            return Err(IntentError::InvalidFee);
        }

        let start_balance = tray.slots_balance();

        // 1. Drain the buckets into the outgoing account.
        let (tray, transfers) = tray.transfer(amount)?;
        let mut actions: Vec<Action> = transfers
            .iter()
            .map(|exchange| transfer_action_for(&tray, rendezvous, exchange))
            .collect();

        // 2. Fees out of the collected funds.
        if fee > Kin::ZERO {
            actions.push(Action::FeePayment(ActionFeePayment::new(
                FeeKind::Code,
                tray.outgoing().cluster.clone(),
                fee,
            )));
        }
        for (fee_amount, fee_destination) in &concrete_fees {
            actions.push(Action::FeePayment(ActionFeePayment::new(
                FeeKind::ThirdParty(*fee_destination),
                tray.outgoing().cluster.clone(),
                *fee_amount,
            )));
        }

        // 3. The net amount leaves for the destination.
        actions.push(Action::Withdraw(ActionWithdraw::new(
            WithdrawKind::NoPrivacyWithdraw {
                amount: net_amount,
                should_close: true,
            },
            tray.outgoing().cluster.clone(),
            destination,
        )));

        // 4. Rebalance the remaining buckets for the next spend.
        let (tray, redistributions) = tray.redistribute();
        actions.extend(
            redistributions
                .iter()
                .map(|exchange| transfer_action_for(&tray, rendezvous, exchange)),
        );

        // 5. Rotate the outgoing account.
        let tray = tray.increment_outgoing()?;
        actions.push(Action::OpenAccount(ActionOpenAccount::new(
            tray.owner().cluster.authority_public_key(),
            AccountType::Outgoing,
            tray.outgoing().cluster.clone(),
        )));
        actions.push(Action::Withdraw(ActionWithdraw::new(
            WithdrawKind::CloseDormantAccount(AccountType::Outgoing),
            tray.outgoing().cluster.clone(),
            tray.owner().cluster.vault_public_key(),
        )));

        // The buckets must have lost exactly the gross amount; anything
        // else is a planner defect and aborts composition.
        if start_balance - tray.slots_balance() != amount {
            return Err(IntentError::BalanceMismatch);
        }

        Ok(IntentTransfer {
            id: rendezvous,
            destination,
            gross_amount: amount,
            net_amount,
            is_withdrawal,
            action_group: ActionGroup::new(actions),
            result_tray: tray,
        })
    }

    pub fn gross_amount(&self) -> Kin {
        self.gross_amount
    }

    pub fn net_amount(&self) -> Kin {
        self.net_amount
    }
}

impl Intent for IntentTransfer {
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
            destination: self.destination,
            amount: self.gross_amount,
            is_withdrawal: self.is_withdrawal,
            is_remote_send: false,
        }
    }

    fn result_tray(&self) -> &Tray {
        &self.result_tray
    }
}
