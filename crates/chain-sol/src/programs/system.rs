//! System program instructions.

use wallet_core::PublicKey;

use crate::account_meta::AccountMeta;
use crate::consts::{RECENT_BLOCKHASHES_SYSVAR, SYSTEM_PROGRAM};
use crate::error::SolError;
use crate::instruction::Instruction;
use crate::programs::{account_key, parse, read_u64_le, TypedInstruction};

const CREATE_ACCOUNT: [u8; 4] = 0u32.to_le_bytes();
const ADVANCE_NONCE: [u8; 4] = 4u32.to_le_bytes();

/// Advance a durable nonce account so the transaction stays valid across
/// asynchronous signing and submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceNonce {
    pub nonce: PublicKey,
    pub authority: PublicKey,
}

impl TypedInstruction for AdvanceNonce {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        parse(instruction, &SYSTEM_PROGRAM, &ADVANCE_NONCE, Some(3))?;
        Ok(AdvanceNonce {
            nonce: account_key(instruction, 0)?,
            authority: account_key(instruction, 2)?,
        })
    }

    fn instruction(&self) -> Instruction {
        Instruction::new(
            SYSTEM_PROGRAM,
            vec![
                AccountMeta::writable(self.nonce),
                AccountMeta::readonly(RECENT_BLOCKHASHES_SYSVAR),
                AccountMeta::readonly_signer(self.authority),
            ],
            ADVANCE_NONCE.to_vec(),
        )
    }
}

/// Create a new system account funded by the subsidizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccount {
    pub subsidizer: PublicKey,
    pub address: PublicKey,
    pub owner: PublicKey,
    pub lamports: u64,
    pub size: u64,
}

impl TypedInstruction for CreateAccount {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        let data = parse(instruction, &SYSTEM_PROGRAM, &CREATE_ACCOUNT, Some(2))?;
        let lamports = read_u64_le(data, 0)?;
        let size = read_u64_le(data, 8)?;
        let owner = PublicKey::from_slice(
            data.get(16..48)
                .ok_or(SolError::InvalidData("missing owner key"))?,
        )
        .map_err(|_| SolError::InvalidData("bad owner key"))?;

        Ok(CreateAccount {
            subsidizer: account_key(instruction, 0)?,
            address: account_key(instruction, 1)?,
            owner,
            lamports,
            size,
        })
    }

    fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(52);
        data.extend_from_slice(&CREATE_ACCOUNT);
        data.extend_from_slice(&self.lamports.to_le_bytes());
        data.extend_from_slice(&self.size.to_le_bytes());
        data.extend_from_slice(self.owner.as_ref());

        Instruction::new(
            SYSTEM_PROGRAM,
            vec![
                AccountMeta::writable_signer(self.subsidizer),
                AccountMeta::writable_signer(self.address),
            ],
            data,
        )
    }
}
