//! Typed instruction encoders and decoders, one module per program.
//!
//! Account order is part of each program's on-chain ABI and must match the
//! deployed program exactly; any layout change here requires a coordinated
//! client/server/program deployment.

pub mod associated_token;
pub mod compute_budget;
pub mod memo;
pub mod swap_validator;
pub mod system;
pub mod timelock;
pub mod token;

use wallet_core::PublicKey;

use crate::error::SolError;
use crate::instruction::Instruction;

/// A typed view over a raw [`Instruction`].
pub trait TypedInstruction: Sized {
    /// Decode the raw instruction, verifying program id, discriminator and
    /// account count.
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError>;

    /// Encode back into a raw instruction.
    fn instruction(&self) -> Instruction;
}

/// Verify program id and account count, returning the instruction data with
/// the given discriminator stripped.
pub(crate) fn parse<'a>(
    instruction: &'a Instruction,
    program: &PublicKey,
    discriminator: &[u8],
    expected_accounts: Option<usize>,
) -> Result<&'a [u8], SolError> {
    if instruction.program != *program {
        return Err(SolError::UnexpectedProgram);
    }
    if let Some(expected) = expected_accounts {
        if instruction.accounts.len() != expected {
            return Err(SolError::UnexpectedAccountCount {
                expected,
                actual: instruction.accounts.len(),
            });
        }
    }
    let data = instruction
        .data
        .get(..discriminator.len())
        .ok_or(SolError::InvalidData("instruction data too short"))?;
    if data != discriminator {
        return Err(SolError::UnexpectedDiscriminator);
    }
    Ok(&instruction.data[discriminator.len()..])
}

pub(crate) fn read_u8(data: &[u8], offset: usize) -> Result<u8, SolError> {
    data.get(offset)
        .copied()
        .ok_or(SolError::InvalidData("expected u8 argument"))
}

pub(crate) fn read_u32_le(data: &[u8], offset: usize) -> Result<u32, SolError> {
    let bytes = data
        .get(offset..offset + 4)
        .ok_or(SolError::InvalidData("expected u32 argument"))?;
    Ok(u32::from_le_bytes(bytes.try_into().expect("4-byte slice")))
}

pub(crate) fn read_u64_le(data: &[u8], offset: usize) -> Result<u64, SolError> {
    let bytes = data
        .get(offset..offset + 8)
        .ok_or(SolError::InvalidData("expected u64 argument"))?;
    Ok(u64::from_le_bytes(bytes.try_into().expect("8-byte slice")))
}

pub(crate) fn account_key(instruction: &Instruction, index: usize) -> Result<PublicKey, SolError> {
    instruction
        .accounts
        .get(index)
        .map(|meta| meta.public_key)
        .ok_or(SolError::AccountIndexOutOfBounds(index))
}
