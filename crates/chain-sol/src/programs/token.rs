//! SPL-style token program instructions.

use wallet_core::PublicKey;

use crate::account_meta::AccountMeta;
use crate::consts::{RENT_SYSVAR, TOKEN_PROGRAM};
use crate::error::SolError;
use crate::instruction::Instruction;
use crate::programs::{account_key, parse, read_u64_le, TypedInstruction};

const INITIALIZE_ACCOUNT: [u8; 1] = [1];
const TRANSFER: [u8; 1] = [3];

/// Move `quarks` base units between token accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub source: PublicKey,
    pub destination: PublicKey,
    pub owner: PublicKey,
    pub quarks: u64,
}

impl TypedInstruction for Transfer {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        let data = parse(instruction, &TOKEN_PROGRAM, &TRANSFER, Some(3))?;
        Ok(Transfer {
            source: account_key(instruction, 0)?,
            destination: account_key(instruction, 1)?,
            owner: account_key(instruction, 2)?,
            quarks: read_u64_le(data, 0)?,
        })
    }

    fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(9);
        data.extend_from_slice(&TRANSFER);
        data.extend_from_slice(&self.quarks.to_le_bytes());

        Instruction::new(
            TOKEN_PROGRAM,
            vec![
                AccountMeta::writable(self.source),
                AccountMeta::writable(self.destination),
                AccountMeta::writable_signer(self.owner),
            ],
            data,
        )
    }
}

/// Initialize a token account for a mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializeAccount {
    pub account: PublicKey,
    pub mint: PublicKey,
    pub owner: PublicKey,
}

impl TypedInstruction for InitializeAccount {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        parse(instruction, &TOKEN_PROGRAM, &INITIALIZE_ACCOUNT, Some(4))?;
        Ok(InitializeAccount {
            account: account_key(instruction, 0)?,
            mint: account_key(instruction, 1)?,
            owner: account_key(instruction, 2)?,
        })
    }

    fn instruction(&self) -> Instruction {
        Instruction::new(
            TOKEN_PROGRAM,
            vec![
                AccountMeta::writable_signer(self.account),
                AccountMeta::readonly(self.mint),
                AccountMeta::readonly(self.owner),
                AccountMeta::readonly(RENT_SYSVAR),
            ],
            INITIALIZE_ACCOUNT.to_vec(),
        )
    }
}
