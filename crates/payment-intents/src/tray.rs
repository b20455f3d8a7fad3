//! The bucket planner.
//!
//! The tray holds the owner's funds split across fixed-denomination bucket
//! accounts plus rotating incoming/outgoing accounts, and plans the
//! exchanges that compose a payment amount without revealing the full
//! balance. Planning never mutates in place: every operation takes the
//! current tray by reference and returns the successor tray alongside the
//! exchanges it decided on, so composition stays deterministic and
//! property-testable.

use std::collections::HashMap;

use wallet_core::MnemonicPhrase;

use crate::accounts::{AccountCluster, AccountType, SlotType};
use crate::error::IntentError;
use crate::kin::Kin;

/// Never move more than nine bills of one denomination in a single
/// exchange, so any observer sees amounts indistinguishable from ordinary
/// payments.
const MAX_BILLS_PER_EXCHANGE: u64 = 9;

/// One planned movement of funds. `to` is `None` when funds leave the
/// bucket system (into the outgoing account).
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub from: AccountType,
    pub to: Option<AccountType>,
    pub kin: Kin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PartialAccount {
    pub cluster: AccountCluster,
    pub balance: Kin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub slot_type: SlotType,
    pub cluster: AccountCluster,
    pub balance: Kin,
}

impl Slot {
    /// Denomination in whole kin.
    fn bill_value(&self) -> u64 {
        self.slot_type.bill_value()
    }

    /// How many bills of this denomination the slot currently holds.
    fn bill_count(&self) -> u64 {
        self.balance.truncated_kin_value() / self.bill_value()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tray {
    owner: PartialAccount,
    incoming: PartialAccount,
    outgoing: PartialAccount,
    slots: Vec<Slot>,
    mnemonic: MnemonicPhrase,
}

impl Tray {
    pub fn new(mnemonic: &MnemonicPhrase) -> Result<Tray, IntentError> {
        let slots = SlotType::ALL
            .iter()
            .map(|&slot_type| {
                Ok(Slot {
                    slot_type,
                    cluster: AccountCluster::bucket(slot_type, mnemonic)?,
                    balance: Kin::ZERO,
                })
            })
            .collect::<Result<Vec<Slot>, IntentError>>()?;

        Ok(Tray {
            owner: PartialAccount {
                cluster: AccountCluster::primary(mnemonic)?,
                balance: Kin::ZERO,
            },
            incoming: PartialAccount {
                cluster: AccountCluster::incoming(0, mnemonic)?,
                balance: Kin::ZERO,
            },
            outgoing: PartialAccount {
                cluster: AccountCluster::outgoing(0, mnemonic)?,
                balance: Kin::ZERO,
            },
            slots,
            mnemonic: mnemonic.clone(),
        })
    }

    // ─── Balances & accounts ─────────────────────────────────────────

    pub fn slots_balance(&self) -> Kin {
        self.slots.iter().map(|slot| slot.balance).sum()
    }

    pub fn available_balance(&self) -> Kin {
        self.slots_balance() + self.owner.balance + self.incoming.balance
    }

    pub fn available_incoming_balance(&self) -> Kin {
        self.incoming.balance
    }

    pub fn owner(&self) -> &PartialAccount {
        &self.owner
    }

    pub fn incoming(&self) -> &PartialAccount {
        &self.incoming
    }

    pub fn outgoing(&self) -> &PartialAccount {
        &self.outgoing
    }

    pub fn slot(&self, slot_type: SlotType) -> &Slot {
        &self.slots[slot_type.index()]
    }

    pub fn cluster(&self, account_type: AccountType) -> &AccountCluster {
        match account_type {
            AccountType::Primary => &self.owner.cluster,
            AccountType::Incoming => &self.incoming.cluster,
            AccountType::Outgoing => &self.outgoing.cluster,
            AccountType::Bucket(slot_type) => &self.slots[slot_type.index()].cluster,
            AccountType::RemoteSend => {
                unreachable!("remote send accounts are not tray accounts")
            }
        }
    }

    pub fn partial_balance(&self, account_type: AccountType) -> Kin {
        match account_type {
            AccountType::Primary => self.owner.balance,
            AccountType::Incoming => self.incoming.balance,
            AccountType::Outgoing => self.outgoing.balance,
            AccountType::Bucket(slot_type) => self.slots[slot_type.index()].balance,
            AccountType::RemoteSend => Kin::ZERO,
        }
    }

    pub fn all_accounts(&self) -> Vec<(AccountType, &AccountCluster)> {
        let mut accounts = vec![
            (AccountType::Primary, &self.owner.cluster),
            (AccountType::Incoming, &self.incoming.cluster),
            (AccountType::Outgoing, &self.outgoing.cluster),
        ];
        for slot in &self.slots {
            accounts.push((AccountType::Bucket(slot.slot_type), &slot.cluster));
        }
        accounts
    }

    /// Replace balances wholesale, as reported by the server at session
    /// start.
    pub fn set_balances(&mut self, balances: &HashMap<AccountType, Kin>) {
        for (&account_type, &balance) in balances {
            match account_type {
                AccountType::Primary => self.owner.balance = balance,
                AccountType::Incoming => self.incoming.balance = balance,
                AccountType::Outgoing => self.outgoing.balance = balance,
                AccountType::Bucket(slot_type) => {
                    self.slots[slot_type.index()].balance = balance;
                }
                AccountType::RemoteSend => {}
            }
        }
    }

    // ─── Temp account rotation ───────────────────────────────────────

    pub fn increment_incoming(&self) -> Result<Tray, IntentError> {
        let mut next = self.clone();
        let index = self.incoming.cluster.index + 1;
        next.incoming = PartialAccount {
            cluster: AccountCluster::incoming(index, &self.mnemonic)?,
            balance: Kin::ZERO,
        };
        Ok(next)
    }

    pub fn increment_outgoing(&self) -> Result<Tray, IntentError> {
        let mut next = self.clone();
        let index = self.outgoing.cluster.index + 1;
        next.outgoing = PartialAccount {
            cluster: AccountCluster::outgoing(index, &self.mnemonic)?,
            balance: Kin::ZERO,
        };
        Ok(next)
    }

    pub fn set_incoming_index(&self, index: u32) -> Result<Tray, IntentError> {
        let mut next = self.clone();
        next.incoming = PartialAccount {
            cluster: AccountCluster::incoming(index, &self.mnemonic)?,
            balance: next.incoming.balance,
        };
        Ok(next)
    }

    // ─── Transfer planning ───────────────────────────────────────────

    /// Plan moving `amount` out of the buckets into the outgoing account.
    ///
    /// Tries the naive largest-first strategy, and when the bucket shape
    /// cannot cover the amount that way, falls back to the dynamic
    /// strategy that splits a larger bill downwards.
    pub fn transfer(&self, amount: Kin) -> Result<(Tray, Vec<Exchange>), IntentError> {
        if amount == Kin::ZERO {
            return Err(IntentError::InvalidAmount);
        }
        if self.slots_balance() < amount {
            return Err(IntentError::InsufficientTrayBalance);
        }

        let mut naive = self.clone();
        match naive.withdraw_naively(amount) {
            Ok(exchanges) => Ok((naive, exchanges)),
            Err(_) => {
                let mut dynamic = self.clone();
                let exchanges = dynamic.withdraw_dynamically(amount)?;
                Ok((dynamic, exchanges))
            }
        }
    }

    /// Plan depositing `amount` from a receiving account into the buckets,
    /// largest denominations first.
    pub fn receive(
        &self,
        from: AccountType,
        amount: Kin,
    ) -> Result<(Tray, Vec<Exchange>), IntentError> {
        if self.partial_balance(from) < amount {
            return Err(IntentError::InvalidSlotBalance);
        }

        let mut next = self.clone();
        let mut exchanges = Vec::new();
        let mut remaining = amount;

        for index in (0..next.slots.len()).rev() {
            let bill_value = next.slots[index].bill_value();
            let how_many_fit = remaining.truncated_kin_value() / bill_value;
            if how_many_fit == 0 {
                continue;
            }

            let slot_type = next.slots[index].slot_type;
            let to_deposit = Kin::from_kin(how_many_fit * bill_value);

            normalize(slot_type, to_deposit, |sub_amount| {
                exchanges.push(Exchange {
                    from,
                    to: Some(AccountType::Bucket(slot_type)),
                    kin: sub_amount,
                });
            });

            next.decrement(from, to_deposit);
            next.increment(AccountType::Bucket(slot_type), to_deposit);
            remaining = remaining - to_deposit;
        }

        Ok((next, exchanges))
    }

    /// Rebalance the buckets for future spends using the default policy.
    pub fn redistribute(&self) -> (Tray, Vec<Exchange>) {
        GreedyLevelling.rebalance(self)
    }

    // ─── Internal balance bookkeeping ────────────────────────────────

    fn increment(&mut self, account_type: AccountType, kin: Kin) {
        match account_type {
            AccountType::Primary => self.owner.balance = self.owner.balance + kin,
            AccountType::Incoming => self.incoming.balance = self.incoming.balance + kin,
            AccountType::Outgoing => self.outgoing.balance = self.outgoing.balance + kin,
            AccountType::Bucket(slot_type) => {
                let slot = &mut self.slots[slot_type.index()];
                slot.balance = slot.balance + kin;
            }
            AccountType::RemoteSend => {}
        }
    }

    fn decrement(&mut self, account_type: AccountType, kin: Kin) {
        match account_type {
            AccountType::Primary => self.owner.balance = self.owner.balance - kin,
            AccountType::Incoming => self.incoming.balance = self.incoming.balance - kin,
            AccountType::Outgoing => self.outgoing.balance = self.outgoing.balance - kin,
            AccountType::Bucket(slot_type) => {
                let slot = &mut self.slots[slot_type.index()];
                slot.balance = slot.balance - kin;
            }
            AccountType::RemoteSend => {}
        }
    }

    // ─── Naive strategy ──────────────────────────────────────────────

    /// Largest-first: take as many whole bills as fit from each slot going
    /// down. Fails when the bucket shape leaves a remainder.
    fn withdraw_naively(&mut self, amount: Kin) -> Result<Vec<Exchange>, IntentError> {
        if amount == Kin::ZERO {
            return Err(IntentError::InvalidAmount);
        }

        let mut exchanges = Vec::new();
        let mut remaining = amount;

        for index in (0..self.slots.len()).rev() {
            let slot = &self.slots[index];
            if slot.balance == Kin::ZERO {
                continue;
            }

            let bill_value = slot.bill_value();
            let slot_type = slot.slot_type;
            let balance = slot.balance;

            let how_many_fit = remaining.truncated_kin_value() / bill_value;
            let to_send = balance.min(Kin::from_kin(how_many_fit * bill_value));
            if to_send == Kin::ZERO {
                continue;
            }

            let source = AccountType::Bucket(slot_type);
            normalize(slot_type, to_send, |sub_amount| {
                exchanges.push(Exchange {
                    from: source,
                    to: None,
                    kin: sub_amount,
                });
            });

            self.decrement(source, to_send);
            self.increment(AccountType::Outgoing, to_send);
            remaining = remaining - to_send;
        }

        if remaining.has_whole_kin() {
            return Err(IntentError::InvalidSlotBalance);
        }

        Ok(exchanges)
    }

    // ─── Dynamic strategy ────────────────────────────────────────────

    /// Two-step fallback: drain slots smallest-first up to the amount,
    /// then split one larger bill downwards to cover the remainder.
    fn withdraw_dynamically(&mut self, amount: Kin) -> Result<Vec<Exchange>, IntentError> {
        if amount == Kin::ZERO {
            return Err(IntentError::InvalidAmount);
        }
        if self.slots_balance() < amount {
            return Err(IntentError::InsufficientTrayBalance);
        }

        let (remaining, split_index, mut exchanges) = self.withdraw_dynamically_step_1(amount)?;
        exchanges.extend(self.withdraw_dynamically_step_2(remaining, split_index)?);
        Ok(exchanges)
    }

    /// Drain every slot, smallest to largest, until a slot's denomination
    /// exceeds what is left. Returns the remainder and the slot index that
    /// step 2 should split (0 means nothing left to split).
    fn withdraw_dynamically_step_1(
        &mut self,
        amount: Kin,
    ) -> Result<(Kin, usize, Vec<Exchange>), IntentError> {
        let mut exchanges = Vec::new();
        let mut remaining = amount;

        for index in 0..self.slots.len() {
            let slot = &self.slots[index];
            if slot.balance == Kin::ZERO {
                continue;
            }
            if !remaining.has_whole_kin() {
                break;
            }
            if remaining.truncated_kin_value() < slot.bill_value() {
                // A larger bill needs to be broken downwards first.
                break;
            }

            let bill_value = slot.bill_value();
            let slot_type = slot.slot_type;
            let balance = slot.balance;

            let how_many_fit = remaining.truncated_kin_value() / bill_value;
            let to_send = balance.min(Kin::from_kin(how_many_fit * bill_value));
            if to_send == Kin::ZERO {
                continue;
            }

            normalize(slot_type, to_send, |sub_amount| {
                exchanges.push(Exchange {
                    from: AccountType::Bucket(slot_type),
                    to: None,
                    kin: sub_amount,
                });
            });

            self.decrement(AccountType::Bucket(slot_type), to_send);
            self.increment(AccountType::Outgoing, to_send);
            remaining = remaining - to_send;
        }

        let split_index = self.slots.iter().position(|slot| {
            slot.bill_value() > remaining.truncated_kin_value() && slot.bill_count() > 0
        });

        match split_index {
            None if remaining.has_whole_kin() => Err(IntentError::InvalidStepIndex),
            None => Ok((remaining, 0, exchanges)),
            Some(index) => Ok((remaining, index, exchanges)),
        }
    }

    /// Break one bill at `split_index` downwards, cascading a single bill
    /// of each denomination, and pay out the remainder on the way down.
    fn withdraw_dynamically_step_2(
        &mut self,
        remaining: Kin,
        split_index: usize,
    ) -> Result<Vec<Exchange>, IntentError> {
        if split_index == 0 || split_index >= self.slots.len() {
            return Ok(Vec::new());
        }
        if !remaining.has_whole_kin() {
            return Ok(Vec::new());
        }

        if self.slots[split_index].bill_count() == 0 {
            return Err(IntentError::SlotAtIndexEmpty);
        }

        let mut exchanges = Vec::new();
        let mut remaining = remaining;

        // Break the starting bill into the slot below.
        let from_type = self.slots[split_index].slot_type;
        let to_type = self.slots[split_index - 1].slot_type;
        let split_amount = Kin::from_kin(self.slots[split_index].bill_value());
        exchanges.push(Exchange {
            from: AccountType::Bucket(from_type),
            to: Some(AccountType::Bucket(to_type)),
            kin: split_amount,
        });
        self.decrement(AccountType::Bucket(from_type), split_amount);
        self.increment(AccountType::Bucket(to_type), split_amount);

        for index in (0..split_index).rev() {
            let slot_type = self.slots[index].slot_type;
            let bill_value = self.slots[index].bill_value();

            // Cascade one bill further down so every level below has
            // change available.
            if index > 0 {
                let lower_type = self.slots[index - 1].slot_type;
                let split_amount = Kin::from_kin(bill_value);
                exchanges.push(Exchange {
                    from: AccountType::Bucket(slot_type),
                    to: Some(AccountType::Bucket(lower_type)),
                    kin: split_amount,
                });
                self.decrement(AccountType::Bucket(slot_type), split_amount);
                self.increment(AccountType::Bucket(lower_type), split_amount);
            }

            let how_many_fit = remaining.truncated_kin_value() / bill_value;
            if how_many_fit == 0 {
                continue;
            }
            if self.slots[index].bill_count() < how_many_fit {
                return Err(IntentError::InvalidSlotBalance);
            }

            let to_send = Kin::from_kin(how_many_fit * bill_value);
            exchanges.push(Exchange {
                from: AccountType::Bucket(slot_type),
                to: None,
                kin: to_send,
            });
            self.decrement(AccountType::Bucket(slot_type), to_send);
            self.increment(AccountType::Outgoing, to_send);
            remaining = remaining - to_send;
        }

        Ok(exchanges)
    }
}

/// Split an amount into exchanges of at most nine bills of one slot's
/// denomination.
fn normalize(slot_type: SlotType, amount: Kin, mut emit: impl FnMut(Kin)) {
    let bill_value = slot_type.bill_value();
    let mut how_many_fit = amount.truncated_kin_value() / bill_value;
    while how_many_fit > 0 {
        let bills_to_move = how_many_fit.min(MAX_BILLS_PER_EXCHANGE);
        emit(Kin::from_kin(bill_value * bills_to_move));
        how_many_fit -= bills_to_move;
    }
}

/// Split an amount across denominations, largest first, nine bills at a
/// time.
fn normalize_largest(amount: Kin, mut emit: impl FnMut(SlotType, Kin)) {
    let mut remaining = amount;
    for slot_type in SlotType::ALL.iter().rev() {
        let bill_value = slot_type.bill_value();
        let mut how_many_fit = remaining.truncated_kin_value() / bill_value;
        while how_many_fit > 0 {
            let bills_to_move = how_many_fit.min(MAX_BILLS_PER_EXCHANGE);
            let move_amount = Kin::from_kin(bill_value * bills_to_move);
            emit(*slot_type, move_amount);
            remaining = remaining - move_amount;
            how_many_fit -= bills_to_move;
        }
    }
}

/// The bucket-rebalancing heuristic, behind a trait so the tie-breaking
/// rules can be swapped without touching the planner.
pub trait RebalancePolicy {
    fn rebalance(&self, tray: &Tray) -> (Tray, Vec<Exchange>);
}

/// The default policy.
///
/// First exchanges larger bills for smaller ones until no consecutive slot
/// gaps remain, then folds excess small bills upwards, keeping at most one
/// bill short of a full next-denomination set in each slot. Nine pennies
/// cover any payment, so anything beyond that is consolidation.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyLevelling;

impl RebalancePolicy for GreedyLevelling {
    fn rebalance(&self, tray: &Tray) -> (Tray, Vec<Exchange>) {
        let mut next = tray.clone();
        let mut exchanges = Vec::new();
        exchange_large_to_small(&mut next, &mut exchanges);
        exchange_small_to_large(&mut next, &mut exchanges);
        (next, exchanges)
    }
}

/// Break large bills into smaller ones until every slot below a funded
/// slot has change available.
fn exchange_large_to_small(tray: &mut Tray, exchanges: &mut Vec<Exchange>) {
    for index in (1..tray.slots.len()).rev() {
        let current_type = tray.slots[index].slot_type;
        let smaller_type = tray.slots[index - 1].slot_type;

        if tray.slots[index].bill_count() == 0 {
            continue;
        }

        let how_many_fit = tray.slots[index].bill_value() / tray.slots[index - 1].bill_value();
        if tray.slots[index - 1].bill_count() >= how_many_fit - 1 {
            // The smaller slot already has enough bills for most payments.
            continue;
        }

        let amount = Kin::from_kin(tray.slots[index].bill_value());
        tray.decrement(AccountType::Bucket(current_type), amount);
        tray.increment(AccountType::Bucket(smaller_type), amount);
        exchanges.push(Exchange {
            from: AccountType::Bucket(current_type),
            to: Some(AccountType::Bucket(smaller_type)),
            kin: amount,
        });

        exchange_large_to_small(tray, exchanges);
    }
}

/// Fold excess small bills into the next denomination up.
fn exchange_small_to_large(tray: &mut Tray, exchanges: &mut Vec<Exchange>) {
    for index in 0..tray.slots.len() - 1 {
        let current_type = tray.slots[index].slot_type;
        let larger_type = tray.slots[index + 1].slot_type;

        let how_many_fit = tray.slots[index + 1].bill_value() / tray.slots[index].bill_value();
        let how_many_we_have = tray.slots[index].bill_count();
        let how_many_to_leave = (how_many_fit - 1).min(how_many_we_have);

        if how_many_we_have < how_many_fit * 2 - 1 {
            // Folding now would leave too little change for small amounts.
            continue;
        }

        let to_exchange = (how_many_we_have - how_many_to_leave) / how_many_fit * how_many_fit;
        let amount = Kin::from_kin(to_exchange * tray.slots[index].bill_value());

        normalize_largest(amount, |_, partial_amount| {
            exchanges.push(Exchange {
                from: AccountType::Bucket(current_type),
                to: Some(AccountType::Bucket(larger_type)),
                kin: partial_amount,
            });
        });

        tray.decrement(AccountType::Bucket(current_type), amount);
        tray.increment(AccountType::Bucket(larger_type), amount);

        exchange_small_to_large(tray, exchanges);
    }
}
