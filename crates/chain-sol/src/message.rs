//! Legacy message layout and the version-dispatching `Message` enum.

use wallet_core::{Hash, PublicKey};

use crate::account_meta::{filter_unique_accounts, AccountMeta};
use crate::error::SolError;
use crate::instruction::{CompiledInstruction, Instruction};
use crate::shortvec;
use crate::versioned::V0Message;

/// First-byte marker distinguishing versioned messages from legacy ones.
/// Legacy messages start with the required-signature count, which is always
/// below 0x80; versioned messages set the high bit and carry the version in
/// the low bits.
pub const MESSAGE_VERSION_OFFSET: u8 = 0x80;

/// The three-byte message header.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub required_signatures: u8,
    pub readonly_signers: u8,
    pub readonly: u8,
}

impl MessageHeader {
    pub const LEN: usize = 3;

    pub fn encode(&self) -> [u8; 3] {
        [
            self.required_signatures,
            self.readonly_signers,
            self.readonly,
        ]
    }

    pub fn decode(data: &[u8]) -> Result<MessageHeader, SolError> {
        if data.len() < Self::LEN {
            return Err(SolError::InvalidData("header truncated"));
        }
        Ok(MessageHeader {
            required_signatures: data[0],
            readonly_signers: data[1],
            readonly: data[2],
        })
    }
}

/// A legacy (pre-versioned) message.
///
/// `accounts` keeps full metadata so instructions can be decompiled;
/// `encode` serializes the stored order verbatim, which is what makes
/// decode-then-encode byte-exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyMessage {
    pub header: MessageHeader,
    pub accounts: Vec<AccountMeta>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<Instruction>,
}

impl LegacyMessage {
    /// Build a message from raw account metas, deduplicating and sorting
    /// into the canonical order, then deriving the header counts.
    pub fn new(
        accounts: Vec<AccountMeta>,
        recent_blockhash: Hash,
        instructions: Vec<Instruction>,
    ) -> LegacyMessage {
        let mut unique = filter_unique_accounts(&accounts);
        unique.sort();

        let signers = unique.iter().filter(|a| a.is_signer).count();
        let readonly_signers = unique
            .iter()
            .filter(|a| a.is_signer && !a.is_writable)
            .count();
        let readonly = unique
            .iter()
            .filter(|a| !a.is_signer && !a.is_writable)
            .count();

        LegacyMessage {
            header: MessageHeader {
                required_signatures: signers as u8,
                readonly_signers: readonly_signers as u8,
                readonly: readonly as u8,
            },
            accounts: unique,
            recent_blockhash,
            instructions,
        }
    }

    pub fn account_keys(&self) -> Vec<PublicKey> {
        self.accounts.iter().map(|a| a.public_key).collect()
    }

    pub fn encode(&self) -> Vec<u8> {
        let keys = self.account_keys();

        let mut out = Vec::with_capacity(256);
        out.extend_from_slice(&self.header.encode());
        shortvec::encode_items(&mut out, &keys);
        out.extend_from_slice(self.recent_blockhash.as_ref());

        let compiled: Vec<Vec<u8>> = self
            .instructions
            .iter()
            .filter_map(|ix| ix.compile(&keys).ok())
            .map(|ix| ix.encode())
            .collect();
        out.extend_from_slice(&shortvec::encode_len(compiled.len() as u16));
        for bytes in compiled {
            out.extend_from_slice(&bytes);
        }

        out
    }

    pub fn decode(data: &[u8]) -> Result<LegacyMessage, SolError> {
        let header = MessageHeader::decode(data)?;
        let mut cursor = MessageHeader::LEN;

        // Account keys.
        let (account_count, consumed) = shortvec::decode_len(&data[cursor..])?;
        cursor += consumed;
        let mut keys = Vec::with_capacity(account_count as usize);
        for _ in 0..account_count {
            let end = cursor + PublicKey::LEN;
            let slice = data
                .get(cursor..end)
                .ok_or(SolError::InvalidData("account keys truncated"))?;
            keys.push(
                PublicKey::from_slice(slice)
                    .map_err(|_| SolError::InvalidData("bad account key"))?,
            );
            cursor = end;
        }

        // Recent blockhash.
        let end = cursor + Hash::LEN;
        let recent_blockhash = Hash::from_slice(
            data.get(cursor..end)
                .ok_or(SolError::InvalidData("blockhash truncated"))?,
        )
        .map_err(|_| SolError::InvalidData("bad blockhash"))?;
        cursor = end;

        // Instructions.
        let (instruction_count, consumed) = shortvec::decode_len(&data[cursor..])?;
        cursor += consumed;
        let mut compiled = Vec::with_capacity(instruction_count as usize);
        for _ in 0..instruction_count {
            let instruction = CompiledInstruction::decode(&data[cursor..])?;
            if (instruction.program_index as usize) >= keys.len() {
                return Err(SolError::AccountIndexOutOfBounds(
                    instruction.program_index as usize,
                ));
            }
            cursor += instruction.byte_len();
            compiled.push(instruction);
        }

        // Reconstruct account metadata from the header regions.
        let required = header.required_signatures as usize;
        let readonly_signed = header.readonly_signers as usize;
        let readonly_unsigned = header.readonly as usize;
        if required < readonly_signed || keys.len() < required + readonly_unsigned {
            return Err(SolError::InvalidData("header counts inconsistent"));
        }

        let accounts: Vec<AccountMeta> = keys
            .iter()
            .enumerate()
            .map(|(index, &key)| {
                let signer = index < required;
                let writable = if signer {
                    index < required - readonly_signed
                } else {
                    index < keys.len() - readonly_unsigned
                };
                AccountMeta {
                    public_key: key,
                    is_signer: signer,
                    is_writable: writable,
                    is_payer: index == 0,
                    is_program: false,
                }
            })
            .collect();

        let instructions = compiled
            .iter()
            .map(|ix| ix.decompile(&accounts))
            .collect::<Result<Vec<Instruction>, SolError>>()?;

        Ok(LegacyMessage {
            header,
            accounts,
            recent_blockhash,
            instructions,
        })
    }
}

/// A message in either wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Legacy(LegacyMessage),
    V0(V0Message),
}

impl Message {
    pub fn header(&self) -> MessageHeader {
        match self {
            Message::Legacy(message) => message.header,
            Message::V0(message) => message.header,
        }
    }

    /// The static account keys (the full list for legacy messages).
    pub fn account_keys(&self) -> Vec<PublicKey> {
        match self {
            Message::Legacy(message) => message.account_keys(),
            Message::V0(message) => message.static_account_keys.clone(),
        }
    }

    pub fn recent_blockhash(&self) -> Hash {
        match self {
            Message::Legacy(message) => message.recent_blockhash,
            Message::V0(message) => message.recent_blockhash,
        }
    }

    pub fn set_recent_blockhash(&mut self, hash: Hash) {
        match self {
            Message::Legacy(message) => message.recent_blockhash = hash,
            Message::V0(message) => message.recent_blockhash = hash,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Message::Legacy(message) => message.encode(),
            Message::V0(message) => message.encode(),
        }
    }

    /// Sniff the version from the first byte and decode accordingly.
    pub fn decode(data: &[u8]) -> Result<Message, SolError> {
        let first = *data.first().ok_or(SolError::InvalidData("empty message"))?;

        if first < MESSAGE_VERSION_OFFSET {
            return Ok(Message::Legacy(LegacyMessage::decode(data)?));
        }
        if first == MESSAGE_VERSION_OFFSET {
            return Ok(Message::V0(V0Message::decode(data)?));
        }
        Err(SolError::InvalidData("unsupported message version"))
    }
}
