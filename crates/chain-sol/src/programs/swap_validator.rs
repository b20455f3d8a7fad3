//! Swap validator program instructions.
//!
//! The validator brackets a dynamic third-party swap instruction: `PreSwap`
//! snapshots balances into a state account, `PostSwap` verifies the swap
//! stayed within bounds and closes it.

use wallet_core::PublicKey;

use crate::account_meta::AccountMeta;
use crate::consts::{RENT_SYSVAR, SWAP_VALIDATOR_PROGRAM, SYSTEM_PROGRAM};
use crate::error::SolError;
use crate::instruction::Instruction;
use crate::programs::{account_key, parse, read_u8, read_u64_le, TypedInstruction};

const PRE_SWAP: [u8; 8] = [0xb7, 0xdd, 0xc7, 0x8a, 0xcf, 0x49, 0x7f, 0x71];
const POST_SWAP: [u8; 8] = [0x9f, 0xd5, 0xb7, 0x39, 0xb3, 0x8a, 0x75, 0xa1];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreSwap {
    pub pre_swap_state: PublicKey,
    pub user: PublicKey,
    pub source: PublicKey,
    pub destination: PublicKey,
    pub nonce: PublicKey,
    pub payer: PublicKey,
    /// Accounts touched by the bracketed swap, snapshotted for validation.
    pub remaining_accounts: Vec<AccountMeta>,
}

impl TypedInstruction for PreSwap {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        // Account count is dynamic; the fixed prefix is 8 accounts.
        parse(instruction, &SWAP_VALIDATOR_PROGRAM, &PRE_SWAP, None)?;
        if instruction.accounts.len() < 8 {
            return Err(SolError::UnexpectedAccountCount {
                expected: 8,
                actual: instruction.accounts.len(),
            });
        }
        Ok(PreSwap {
            pre_swap_state: account_key(instruction, 0)?,
            user: account_key(instruction, 1)?,
            source: account_key(instruction, 2)?,
            destination: account_key(instruction, 3)?,
            nonce: account_key(instruction, 4)?,
            payer: account_key(instruction, 5)?,
            remaining_accounts: instruction.accounts[8..].to_vec(),
        })
    }

    fn instruction(&self) -> Instruction {
        let mut accounts = vec![
            AccountMeta::writable(self.pre_swap_state),
            AccountMeta::readonly(self.user),
            AccountMeta::readonly(self.source),
            AccountMeta::readonly(self.destination),
            AccountMeta::readonly(self.nonce),
            AccountMeta::writable_signer(self.payer),
            AccountMeta::readonly(SYSTEM_PROGRAM),
            AccountMeta::readonly(RENT_SYSVAR),
        ];
        accounts.extend(
            self.remaining_accounts
                .iter()
                .map(|meta| AccountMeta::readonly(meta.public_key)),
        );

        Instruction::new(SWAP_VALIDATOR_PROGRAM, accounts, PRE_SWAP.to_vec())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSwap {
    pub state_bump: u8,
    pub max_to_send: u64,
    pub min_to_receive: u64,
    pub pre_swap_state: PublicKey,
    pub source: PublicKey,
    pub destination: PublicKey,
    pub payer: PublicKey,
}

impl TypedInstruction for PostSwap {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        let data = parse(instruction, &SWAP_VALIDATOR_PROGRAM, &POST_SWAP, Some(4))?;
        Ok(PostSwap {
            state_bump: read_u8(data, 0)?,
            max_to_send: read_u64_le(data, 1)?,
            min_to_receive: read_u64_le(data, 9)?,
            pre_swap_state: account_key(instruction, 0)?,
            source: account_key(instruction, 1)?,
            destination: account_key(instruction, 2)?,
            payer: account_key(instruction, 3)?,
        })
    }

    fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(25);
        data.extend_from_slice(&POST_SWAP);
        data.push(self.state_bump);
        data.extend_from_slice(&self.max_to_send.to_le_bytes());
        data.extend_from_slice(&self.min_to_receive.to_le_bytes());

        Instruction::new(
            SWAP_VALIDATOR_PROGRAM,
            vec![
                AccountMeta::writable(self.pre_swap_state),
                AccountMeta::readonly(self.source),
                AccountMeta::readonly(self.destination),
                AccountMeta::writable_signer(self.payer),
            ],
            data,
        )
    }
}
