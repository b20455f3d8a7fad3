//! Canonical transaction shapes.
//!
//! Every wallet transaction pays fees through the fixed subsidizer
//! authority and advances a pre-reserved durable nonce instead of relying
//! on a short-lived recent blockhash, so transactions remain valid across
//! asynchronous signing and submission latency. The swap flow is the one
//! exception: it is time-sensitive, submitted best-effort, and uses a
//! recent blockhash.

use wallet_core::{Hash, PublicKey};

use crate::account_meta::AccountMeta;
use crate::consts::{APP_INDEX, MINT, SUBSIDIZER, TIME_AUTHORITY};
use crate::derive::{PreSwapStateAccount, TimelockDerivedAccounts};
use crate::error::SolError;
use crate::instruction::Instruction;
use crate::programs::compute_budget::{SetComputeUnitLimit, SetComputeUnitPrice};
use crate::programs::memo::{TransferMemo, TransferType};
use crate::programs::swap_validator::{PostSwap, PreSwap};
use crate::programs::system::AdvanceNonce;
use crate::programs::timelock;
use crate::programs::TypedInstruction;
use crate::transaction::SolanaTransaction;

/// Server-provided configuration for a best-effort swap.
#[derive(Debug, Clone)]
pub struct SwapParameters {
    pub payer: PublicKey,
    pub blockhash: Hash,
    pub nonce: PublicKey,
    pub compute_unit_limit: u32,
    pub compute_unit_price: u64,
    pub max_to_send: u64,
    pub min_to_receive: u64,
    pub swap_program: PublicKey,
    pub swap_accounts: Vec<AccountMeta>,
    pub swap_data: Vec<u8>,
}

pub struct TransactionBuilder;

impl TransactionBuilder {
    /// AdvanceNonce → Memo → TransferWithAuthority.
    pub fn transfer(
        timelock_accounts: &TimelockDerivedAccounts,
        destination: PublicKey,
        quarks: u64,
        nonce: PublicKey,
        recent_blockhash: Hash,
    ) -> SolanaTransaction {
        SolanaTransaction::new(
            SUBSIDIZER,
            Some(recent_blockhash),
            vec![
                AdvanceNonce {
                    nonce,
                    authority: SUBSIDIZER,
                }
                .instruction(),
                TransferMemo::new(TransferType::P2p, APP_INDEX).instruction(),
                timelock::TransferWithAuthority {
                    timelock: timelock_accounts.state.public_key,
                    vault: timelock_accounts.vault.public_key,
                    vault_owner: timelock_accounts.owner,
                    time_authority: TIME_AUTHORITY,
                    destination,
                    payer: SUBSIDIZER,
                    bump: timelock_accounts.state.bump,
                    quarks,
                }
                .instruction(),
            ],
        )
    }

    /// AdvanceNonce → BurnDustWithAuthority → CloseAccounts.
    pub fn close_empty_account(
        timelock_accounts: &TimelockDerivedAccounts,
        max_dust_quarks: u64,
        nonce: PublicKey,
        recent_blockhash: Hash,
    ) -> SolanaTransaction {
        SolanaTransaction::new(
            SUBSIDIZER,
            Some(recent_blockhash),
            vec![
                AdvanceNonce {
                    nonce,
                    authority: SUBSIDIZER,
                }
                .instruction(),
                timelock::BurnDustWithAuthority {
                    timelock: timelock_accounts.state.public_key,
                    vault: timelock_accounts.vault.public_key,
                    vault_owner: timelock_accounts.owner,
                    time_authority: TIME_AUTHORITY,
                    mint: MINT,
                    payer: SUBSIDIZER,
                    bump: timelock_accounts.state.bump,
                    max_quarks: max_dust_quarks,
                }
                .instruction(),
                timelock::CloseAccounts {
                    timelock: timelock_accounts.state.public_key,
                    vault: timelock_accounts.vault.public_key,
                    close_authority: SUBSIDIZER,
                    payer: SUBSIDIZER,
                    bump: timelock_accounts.state.bump,
                }
                .instruction(),
            ],
        )
    }

    /// AdvanceNonce → Memo → RevokeLockWithAuthority → Deactivate →
    /// Withdraw → CloseAccounts.
    pub fn close_dormant_account(
        authority: PublicKey,
        timelock_accounts: &TimelockDerivedAccounts,
        destination: PublicKey,
        nonce: PublicKey,
        recent_blockhash: Hash,
    ) -> SolanaTransaction {
        SolanaTransaction::new(
            SUBSIDIZER,
            Some(recent_blockhash),
            vec![
                AdvanceNonce {
                    nonce,
                    authority: SUBSIDIZER,
                }
                .instruction(),
                TransferMemo::new(TransferType::P2p, APP_INDEX).instruction(),
                timelock::RevokeLockWithAuthority {
                    timelock: timelock_accounts.state.public_key,
                    vault: timelock_accounts.vault.public_key,
                    close_authority: SUBSIDIZER,
                    payer: SUBSIDIZER,
                    bump: timelock_accounts.state.bump,
                }
                .instruction(),
                timelock::Deactivate {
                    timelock: timelock_accounts.state.public_key,
                    vault_owner: authority,
                    payer: SUBSIDIZER,
                    bump: timelock_accounts.state.bump,
                }
                .instruction(),
                timelock::Withdraw {
                    timelock: timelock_accounts.state.public_key,
                    vault: timelock_accounts.vault.public_key,
                    vault_owner: authority,
                    destination,
                    payer: SUBSIDIZER,
                    bump: timelock_accounts.state.bump,
                }
                .instruction(),
                timelock::CloseAccounts {
                    timelock: timelock_accounts.state.public_key,
                    vault: timelock_accounts.vault.public_key,
                    close_authority: SUBSIDIZER,
                    payer: SUBSIDIZER,
                    bump: timelock_accounts.state.bump,
                }
                .instruction(),
            ],
        )
    }

    /// SetComputeUnitLimit → SetComputeUnitPrice → PreSwap → dynamic swap
    /// instruction → PostSwap.
    ///
    /// Swaps are submitted best-effort against a recent blockhash and sit
    /// outside the intent system.
    pub fn swap(
        user_authority: PublicKey,
        source_vault: PublicKey,
        destination: PublicKey,
        parameters: &SwapParameters,
    ) -> Result<SolanaTransaction, SolError> {
        let state = PreSwapStateAccount::new(source_vault, destination, parameters.nonce)?;

        // Snapshot every writable or signing swap account except the ones
        // the validator already tracks.
        let remaining_accounts: Vec<AccountMeta> = parameters
            .swap_accounts
            .iter()
            .filter(|meta| {
                (meta.is_signer || meta.is_writable)
                    && meta.public_key != user_authority
                    && meta.public_key != source_vault
                    && meta.public_key != destination
            })
            .copied()
            .collect();

        Ok(SolanaTransaction::new(
            parameters.payer,
            Some(parameters.blockhash),
            vec![
                SetComputeUnitLimit {
                    limit: parameters.compute_unit_limit,
                }
                .instruction(),
                SetComputeUnitPrice {
                    micro_lamports: parameters.compute_unit_price,
                }
                .instruction(),
                PreSwap {
                    pre_swap_state: state.state.public_key,
                    user: user_authority,
                    source: source_vault,
                    destination,
                    nonce: parameters.nonce,
                    payer: parameters.payer,
                    remaining_accounts,
                }
                .instruction(),
                Instruction::new(
                    parameters.swap_program,
                    parameters.swap_accounts.clone(),
                    parameters.swap_data.clone(),
                ),
                PostSwap {
                    state_bump: state.state.bump,
                    max_to_send: parameters.max_to_send,
                    min_to_receive: parameters.min_to_receive,
                    pre_swap_state: state.state.public_key,
                    source: source_vault,
                    destination,
                    payer: parameters.payer,
                }
                .instruction(),
            ],
        ))
    }
}
