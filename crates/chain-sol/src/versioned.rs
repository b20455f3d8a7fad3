//! Versioned (v0) messages with address lookup tables.

use wallet_core::{Hash, PublicKey};

use crate::error::SolError;
use crate::instruction::CompiledInstruction;
use crate::message::{MessageHeader, MESSAGE_VERSION_OFFSET};
use crate::shortvec;

/// An on-chain lookup table: its address plus the addresses it stores.
/// Input to the v0 compiler; only the referenced indexes go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressLookupTable {
    pub address: PublicKey,
    pub addresses: Vec<PublicKey>,
}

/// The wire form of one table reference inside a v0 message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageAddressTableLookup {
    pub address: PublicKey,
    pub writable_indexes: Vec<u8>,
    pub readonly_indexes: Vec<u8>,
}

impl MessageAddressTableLookup {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(32 + 2 + self.writable_indexes.len() + self.readonly_indexes.len());
        out.extend_from_slice(self.address.as_ref());
        out.extend_from_slice(&shortvec::encode_len(self.writable_indexes.len() as u16));
        out.extend_from_slice(&self.writable_indexes);
        out.extend_from_slice(&shortvec::encode_len(self.readonly_indexes.len() as u16));
        out.extend_from_slice(&self.readonly_indexes);
        out
    }
}

/// A v0 message: legacy layout plus a trailing lookup-table section, with a
/// version marker byte up front.
///
/// Indices beyond the static key count resolve through the lookup tables in
/// list order — every table's writable indexes first, then every table's
/// read-only indexes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct V0Message {
    pub header: MessageHeader,
    pub static_account_keys: Vec<PublicKey>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
    pub address_table_lookups: Vec<MessageAddressTableLookup>,
}

impl V0Message {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(256);
        out.push(MESSAGE_VERSION_OFFSET);
        out.extend_from_slice(&self.header.encode());
        shortvec::encode_items(&mut out, &self.static_account_keys);
        out.extend_from_slice(self.recent_blockhash.as_ref());

        out.extend_from_slice(&shortvec::encode_len(self.instructions.len() as u16));
        for instruction in &self.instructions {
            out.extend_from_slice(&instruction.encode());
        }

        out.extend_from_slice(&shortvec::encode_len(self.address_table_lookups.len() as u16));
        for lookup in &self.address_table_lookups {
            out.extend_from_slice(&lookup.encode());
        }

        out
    }

    pub fn decode(data: &[u8]) -> Result<V0Message, SolError> {
        let version = *data.first().ok_or(SolError::InvalidData("empty message"))?;
        if version != MESSAGE_VERSION_OFFSET {
            return Err(SolError::InvalidData("not a v0 message"));
        }
        let mut cursor = 1usize;

        let header = MessageHeader::decode(
            data.get(cursor..)
                .ok_or(SolError::InvalidData("header truncated"))?,
        )?;
        cursor += MessageHeader::LEN;

        let (key_count, consumed) = shortvec::decode_len(
            data.get(cursor..)
                .ok_or(SolError::InvalidData("key count truncated"))?,
        )?;
        cursor += consumed;
        let mut static_account_keys = Vec::with_capacity(key_count as usize);
        for _ in 0..key_count {
            let end = cursor + PublicKey::LEN;
            let slice = data
                .get(cursor..end)
                .ok_or(SolError::InvalidData("static keys truncated"))?;
            static_account_keys.push(
                PublicKey::from_slice(slice)
                    .map_err(|_| SolError::InvalidData("bad account key"))?,
            );
            cursor = end;
        }

        let end = cursor + Hash::LEN;
        let recent_blockhash = Hash::from_slice(
            data.get(cursor..end)
                .ok_or(SolError::InvalidData("blockhash truncated"))?,
        )
        .map_err(|_| SolError::InvalidData("bad blockhash"))?;
        cursor = end;

        let (instruction_count, consumed) = shortvec::decode_len(&data[cursor..])?;
        cursor += consumed;
        let mut instructions = Vec::with_capacity(instruction_count as usize);
        for _ in 0..instruction_count {
            let instruction = CompiledInstruction::decode(&data[cursor..])?;
            cursor += instruction.byte_len();
            instructions.push(instruction);
        }

        let (lookup_count, consumed) = shortvec::decode_len(&data[cursor..])?;
        cursor += consumed;
        let mut address_table_lookups = Vec::with_capacity(lookup_count as usize);
        for _ in 0..lookup_count {
            let end = cursor + PublicKey::LEN;
            let address = PublicKey::from_slice(
                data.get(cursor..end)
                    .ok_or(SolError::InvalidData("lookup address truncated"))?,
            )
            .map_err(|_| SolError::InvalidData("bad lookup address"))?;
            cursor = end;

            let (writable_len, consumed) = shortvec::decode_len(&data[cursor..])?;
            cursor += consumed;
            let writable_end = cursor + writable_len as usize;
            let writable_indexes = data
                .get(cursor..writable_end)
                .ok_or(SolError::InvalidData("writable indexes truncated"))?
                .to_vec();
            cursor = writable_end;

            let (readonly_len, consumed) = shortvec::decode_len(&data[cursor..])?;
            cursor += consumed;
            let readonly_end = cursor + readonly_len as usize;
            let readonly_indexes = data
                .get(cursor..readonly_end)
                .ok_or(SolError::InvalidData("readonly indexes truncated"))?
                .to_vec();
            cursor = readonly_end;

            address_table_lookups.push(MessageAddressTableLookup {
                address,
                writable_indexes,
                readonly_indexes,
            });
        }

        Ok(V0Message {
            header,
            static_account_keys,
            recent_blockhash,
            instructions,
            address_table_lookups,
        })
    }
}
