//! Compute budget instructions.

use crate::account_meta::AccountMeta;
use crate::consts::COMPUTE_BUDGET_PROGRAM;
use crate::error::SolError;
use crate::instruction::Instruction;
use crate::programs::{parse, read_u32_le, read_u64_le, TypedInstruction};

const SET_COMPUTE_UNIT_LIMIT: [u8; 1] = [2];
const SET_COMPUTE_UNIT_PRICE: [u8; 1] = [3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetComputeUnitLimit {
    pub limit: u32,
}

impl TypedInstruction for SetComputeUnitLimit {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        let data = parse(
            instruction,
            &COMPUTE_BUDGET_PROGRAM,
            &SET_COMPUTE_UNIT_LIMIT,
            Some(0),
        )?;
        Ok(SetComputeUnitLimit {
            limit: read_u32_le(data, 0)?,
        })
    }

    fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(5);
        data.extend_from_slice(&SET_COMPUTE_UNIT_LIMIT);
        data.extend_from_slice(&self.limit.to_le_bytes());
        Instruction::new(COMPUTE_BUDGET_PROGRAM, Vec::<AccountMeta>::new(), data)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetComputeUnitPrice {
    pub micro_lamports: u64,
}

impl TypedInstruction for SetComputeUnitPrice {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        let data = parse(
            instruction,
            &COMPUTE_BUDGET_PROGRAM,
            &SET_COMPUTE_UNIT_PRICE,
            Some(0),
        )?;
        Ok(SetComputeUnitPrice {
            micro_lamports: read_u64_le(data, 0)?,
        })
    }

    fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(9);
        data.extend_from_slice(&SET_COMPUTE_UNIT_PRICE);
        data.extend_from_slice(&self.micro_lamports.to_le_bytes());
        Instruction::new(COMPUTE_BUDGET_PROGRAM, Vec::<AccountMeta>::new(), data)
    }
}
