//! Instructions before and after compilation into a message.

use wallet_core::PublicKey;

use crate::account_meta::AccountMeta;
use crate::error::SolError;
use crate::shortvec;

/// An instruction with full account metadata, as produced by the program
/// encoders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub program: PublicKey,
    pub accounts: Vec<AccountMeta>,
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn new(program: PublicKey, accounts: Vec<AccountMeta>, data: Vec<u8>) -> Instruction {
        Instruction {
            program,
            accounts,
            data,
        }
    }

    /// Replace account references with indices into `message_accounts`.
    pub fn compile(&self, message_accounts: &[PublicKey]) -> Result<CompiledInstruction, SolError> {
        let position = |key: &PublicKey| {
            message_accounts
                .iter()
                .position(|k| k == key)
                .ok_or_else(|| SolError::AccountNotInAccountList(key.to_base58()))
        };

        let program_index = position(&self.program)? as u8;
        let account_indexes = self
            .accounts
            .iter()
            .map(|meta| position(&meta.public_key).map(|i| i as u8))
            .collect::<Result<Vec<u8>, SolError>>()?;

        Ok(CompiledInstruction {
            program_index,
            account_indexes,
            data: self.data.clone(),
        })
    }
}

/// An instruction whose account references are u8 indices into the
/// message's combined account list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_index: u8,
    pub account_indexes: Vec<u8>,
    pub data: Vec<u8>,
}

impl CompiledInstruction {
    /// Serialized length, used to advance the decode cursor.
    pub fn byte_len(&self) -> usize {
        1 + shortvec::encode_len(self.account_indexes.len() as u16).len()
            + self.account_indexes.len()
            + shortvec::encode_len(self.data.len() as u16).len()
            + self.data.len()
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        out.push(self.program_index);
        out.extend_from_slice(&shortvec::encode_len(self.account_indexes.len() as u16));
        out.extend_from_slice(&self.account_indexes);
        out.extend_from_slice(&shortvec::encode_len(self.data.len() as u16));
        out.extend_from_slice(&self.data);
        out
    }

    /// Decode one compiled instruction from the front of `data`.
    pub fn decode(data: &[u8]) -> Result<CompiledInstruction, SolError> {
        let program_index = *data
            .first()
            .ok_or(SolError::InvalidData("instruction truncated"))?;
        let mut cursor = 1usize;

        let (account_count, consumed) = shortvec::decode_len(&data[cursor..])?;
        cursor += consumed;
        let account_end = cursor + account_count as usize;
        let account_indexes = data
            .get(cursor..account_end)
            .ok_or(SolError::InvalidData("instruction accounts truncated"))?
            .to_vec();
        cursor = account_end;

        let (data_len, consumed) = shortvec::decode_len(&data[cursor..])?;
        cursor += consumed;
        let data_end = cursor + data_len as usize;
        let instruction_data = data
            .get(cursor..data_end)
            .ok_or(SolError::InvalidData("instruction data truncated"))?
            .to_vec();

        Ok(CompiledInstruction {
            program_index,
            account_indexes,
            data: instruction_data,
        })
    }

    /// Resolve indices back into account metadata.
    pub fn decompile(&self, accounts: &[AccountMeta]) -> Result<Instruction, SolError> {
        let program = accounts
            .get(self.program_index as usize)
            .ok_or(SolError::AccountIndexOutOfBounds(self.program_index as usize))?
            .public_key;

        let instruction_accounts = self
            .account_indexes
            .iter()
            .map(|&index| {
                accounts
                    .get(index as usize)
                    .copied()
                    .ok_or(SolError::AccountIndexOutOfBounds(index as usize))
            })
            .collect::<Result<Vec<AccountMeta>, SolError>>()?;

        Ok(Instruction {
            program,
            accounts: instruction_accounts,
            data: self.data.clone(),
        })
    }
}
