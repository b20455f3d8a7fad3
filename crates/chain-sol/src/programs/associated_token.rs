//! Associated token account program instructions.

use wallet_core::PublicKey;

use crate::account_meta::AccountMeta;
use crate::consts::{ASSOCIATED_TOKEN_PROGRAM, RENT_SYSVAR, SYSTEM_PROGRAM, TOKEN_PROGRAM};
use crate::error::SolError;
use crate::instruction::Instruction;
use crate::programs::{account_key, parse, TypedInstruction};

const CREATE_IDEMPOTENT: [u8; 1] = [1];

/// Create the associated token account for (owner, mint); succeeds even if
/// it already exists.
///
/// Account layout:
/// 0. `[writable, signer]` funding account
/// 1. `[writable]` the associated token account address
/// 2. `[]` wallet owner
/// 3. `[]` token mint
/// 4. `[]` system program
/// 5. `[]` token program
/// 6. `[]` rent sysvar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIdempotent {
    pub subsidizer: PublicKey,
    pub address: PublicKey,
    pub owner: PublicKey,
    pub mint: PublicKey,
}

impl TypedInstruction for CreateIdempotent {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        parse(
            instruction,
            &ASSOCIATED_TOKEN_PROGRAM,
            &CREATE_IDEMPOTENT,
            Some(7),
        )?;
        Ok(CreateIdempotent {
            subsidizer: account_key(instruction, 0)?,
            address: account_key(instruction, 1)?,
            owner: account_key(instruction, 2)?,
            mint: account_key(instruction, 3)?,
        })
    }

    fn instruction(&self) -> Instruction {
        Instruction::new(
            ASSOCIATED_TOKEN_PROGRAM,
            vec![
                AccountMeta::writable_signer(self.subsidizer),
                AccountMeta::writable(self.address),
                AccountMeta::readonly(self.owner),
                AccountMeta::readonly(self.mint),
                AccountMeta::readonly(SYSTEM_PROGRAM),
                AccountMeta::readonly(TOKEN_PROGRAM),
                AccountMeta::readonly(RENT_SYSVAR),
            ],
            CREATE_IDEMPOTENT.to_vec(),
        )
    }
}
