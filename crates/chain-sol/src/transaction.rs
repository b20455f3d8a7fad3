//! Whole transactions: signatures plus a message, and the compilers that
//! turn instructions into messages.

use wallet_core::{Hash, KeyPair, PublicKey, Signature};

use crate::account_meta::{filter_unique_accounts, AccountMeta};
use crate::error::SolError;
use crate::instruction::Instruction;
use crate::message::{LegacyMessage, Message, MessageHeader};
use crate::programs::TypedInstruction;
use crate::shortvec;
use crate::versioned::{AddressLookupTable, MessageAddressTableLookup, V0Message};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolanaTransaction {
    pub signatures: Vec<Signature>,
    pub message: Message,
}

impl SolanaTransaction {
    /// Compile instructions into a legacy message with `payer` as the fee
    /// payer. A `None` blockhash leaves the field zeroed for later fill-in.
    pub fn new(
        payer: PublicKey,
        recent_blockhash: Option<Hash>,
        instructions: Vec<Instruction>,
    ) -> SolanaTransaction {
        let mut accounts = vec![AccountMeta::payer(payer)];
        for instruction in &instructions {
            accounts.push(AccountMeta::program(instruction.program));
            accounts.extend_from_slice(&instruction.accounts);
        }

        let message = LegacyMessage::new(
            accounts,
            recent_blockhash.unwrap_or(Hash::ZERO),
            instructions,
        );

        let required = message.header.required_signatures as usize;
        SolanaTransaction {
            signatures: vec![Signature::ZERO; required],
            message: Message::Legacy(message),
        }
    }

    /// Compile instructions into a v0 message, moving every account that is
    /// neither payer, signer nor program into the lookup tables that carry
    /// it. Tables are consulted in address order; each contributes its
    /// writable indexes first, then its read-only indexes.
    pub fn new_v0(
        payer: PublicKey,
        recent_blockhash: Option<Hash>,
        lookup_tables: Vec<AddressLookupTable>,
        instructions: Vec<Instruction>,
    ) -> Result<SolanaTransaction, SolError> {
        let mut metas = vec![AccountMeta::payer(payer)];
        for instruction in &instructions {
            metas.push(AccountMeta::program(instruction.program));
            metas.extend_from_slice(&instruction.accounts);
        }
        let mut metas = filter_unique_accounts(&metas);
        metas.sort();

        let mut tables = lookup_tables;
        tables.sort_by(|a, b| a.address.cmp(&b.address));

        let mut writable_indexes: Vec<Vec<u8>> = vec![Vec::new(); tables.len()];
        let mut readonly_indexes: Vec<Vec<u8>> = vec![Vec::new(); tables.len()];
        let mut static_account_keys: Vec<PublicKey> = Vec::new();
        let mut header = MessageHeader {
            required_signatures: 0,
            readonly_signers: 0,
            readonly: 0,
        };

        for meta in &metas {
            let mut dynamically_loaded = false;

            if !(meta.is_payer || meta.is_signer || meta.is_program) {
                for (table_index, table) in tables.iter().enumerate() {
                    if let Some(address_index) =
                        table.addresses.iter().position(|a| *a == meta.public_key)
                    {
                        dynamically_loaded = true;
                        if meta.is_writable {
                            writable_indexes[table_index].push(address_index as u8);
                        } else {
                            readonly_indexes[table_index].push(address_index as u8);
                        }
                        break;
                    }
                }
            }

            if !dynamically_loaded {
                static_account_keys.push(meta.public_key);
                if meta.is_signer {
                    header.required_signatures += 1;
                    if !meta.is_writable {
                        header.readonly_signers += 1;
                    }
                } else if !meta.is_writable {
                    header.readonly += 1;
                }
            }
        }

        // The combined index space for instruction compilation: static keys,
        // then every table's writable loads, then every table's read-only
        // loads, matching the on-chain resolution order.
        let mut all_accounts = static_account_keys.clone();
        for (table_index, table) in tables.iter().enumerate() {
            for &address_index in &writable_indexes[table_index] {
                all_accounts.push(table.addresses[address_index as usize]);
            }
        }
        for (table_index, table) in tables.iter().enumerate() {
            for &address_index in &readonly_indexes[table_index] {
                all_accounts.push(table.addresses[address_index as usize]);
            }
        }

        let address_table_lookups = tables
            .iter()
            .enumerate()
            .filter(|(i, _)| !writable_indexes[*i].is_empty() || !readonly_indexes[*i].is_empty())
            .map(|(i, table)| MessageAddressTableLookup {
                address: table.address,
                writable_indexes: writable_indexes[i].clone(),
                readonly_indexes: readonly_indexes[i].clone(),
            })
            .collect();

        let instructions = instructions
            .iter()
            .map(|ix| ix.compile(&all_accounts))
            .collect::<Result<Vec<_>, SolError>>()?;

        let required = header.required_signatures as usize;
        Ok(SolanaTransaction {
            signatures: vec![Signature::ZERO; required],
            message: Message::V0(V0Message {
                header,
                static_account_keys,
                recent_blockhash: recent_blockhash.unwrap_or(Hash::ZERO),
                instructions,
                address_table_lookups,
            }),
        })
    }

    /// The transaction id: its first signature.
    pub fn id(&self) -> Option<Signature> {
        self.signatures.first().copied()
    }

    pub fn recent_blockhash(&self) -> Hash {
        self.message.recent_blockhash()
    }

    /// Sign with each keypair, placing every signature at the index of that
    /// key within the required-signer region. Unsigned slots stay zeroed.
    ///
    /// Returns the new signatures in keypair order.
    pub fn sign(&mut self, key_pairs: &[&KeyPair]) -> Result<Vec<Signature>, SolError> {
        let required = self.message.header().required_signatures as usize;
        if key_pairs.len() > required {
            return Err(SolError::TooManySigners);
        }

        let message_data = self.message.encode();
        let account_keys = self.message.account_keys();

        let mut signatures = vec![Signature::ZERO; required];
        for (index, signature) in self.signatures.iter().enumerate().take(required) {
            signatures[index] = *signature;
        }

        let mut new_signatures = Vec::with_capacity(key_pairs.len());
        for key_pair in key_pairs {
            let public_key = key_pair.public_key();
            let index = account_keys
                .iter()
                .position(|k| *k == public_key)
                .ok_or_else(|| SolError::AccountNotInAccountList(public_key.to_base58()))?;
            if index >= required {
                return Err(SolError::NotASigner(public_key.to_base58()));
            }

            let signature = key_pair.sign(&message_data);
            signatures[index] = signature;
            new_signatures.push(signature);
        }

        self.signatures = signatures;
        Ok(new_signatures)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64 * self.signatures.len() + 256);
        shortvec::encode_items(&mut out, &self.signatures);
        out.extend_from_slice(&self.message.encode());
        out
    }

    pub fn decode(data: &[u8]) -> Result<SolanaTransaction, SolError> {
        let (signature_count, consumed) = shortvec::decode_len(data)?;
        let mut cursor = consumed;

        let mut signatures = Vec::with_capacity(signature_count as usize);
        for _ in 0..signature_count {
            let end = cursor + Signature::LEN;
            let slice = data
                .get(cursor..end)
                .ok_or(SolError::InvalidData("signatures truncated"))?;
            signatures.push(
                Signature::from_slice(slice).map_err(|_| SolError::InvalidData("bad signature"))?,
            );
            cursor = end;
        }

        let message = Message::decode(&data[cursor..])?;
        Ok(SolanaTransaction {
            signatures,
            message,
        })
    }

    /// Find the first instruction in a legacy message that decodes as `T`.
    pub fn find_instruction<T: TypedInstruction>(&self) -> Option<T> {
        let Message::Legacy(message) = &self.message else {
            return None;
        };
        message
            .instructions
            .iter()
            .find_map(|ix| T::try_decode(ix).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallet_core::Seed32;

    fn key_pair(byte: u8) -> KeyPair {
        KeyPair::from_seed(Seed32::new([byte; 32]))
    }

    fn simple_transaction(payer: &KeyPair) -> SolanaTransaction {
        let program = PublicKey::new([9; 32]);
        let destination = PublicKey::new([7; 32]);
        SolanaTransaction::new(
            payer.public_key(),
            Some(Hash::new([0xAB; 32])),
            vec![Instruction::new(
                program,
                vec![
                    AccountMeta::writable_signer(payer.public_key()),
                    AccountMeta::writable(destination),
                ],
                vec![1, 2, 3],
            )],
        )
    }

    #[test]
    fn unsigned_slots_are_zero_filled() {
        let payer = key_pair(1);
        let tx = simple_transaction(&payer);
        assert_eq!(tx.signatures, vec![Signature::ZERO]);
    }

    #[test]
    fn sign_places_signature_at_payer_slot() {
        let payer = key_pair(1);
        let mut tx = simple_transaction(&payer);
        let produced = tx.sign(&[&payer]).unwrap();

        assert_eq!(produced.len(), 1);
        assert_eq!(tx.signatures[0], produced[0]);
        assert!(payer.verify(&produced[0], &tx.message.encode()));
    }

    #[test]
    fn sign_rejects_unknown_key() {
        let payer = key_pair(1);
        let stranger = key_pair(2);
        let mut tx = simple_transaction(&payer);
        assert!(matches!(
            tx.sign(&[&stranger]),
            Err(SolError::AccountNotInAccountList(_))
        ));
    }

    #[test]
    fn sign_rejects_non_signer_account() {
        let payer = key_pair(1);
        let destination = key_pair(7);
        let program = PublicKey::new([9; 32]);
        let mut tx = SolanaTransaction::new(
            payer.public_key(),
            None,
            vec![Instruction::new(
                program,
                vec![
                    AccountMeta::writable_signer(payer.public_key()),
                    AccountMeta::writable(destination.public_key()),
                ],
                vec![],
            )],
        );
        assert!(matches!(
            tx.sign(&[&destination]),
            Err(SolError::NotASigner(_))
        ));
    }

    #[test]
    fn sign_rejects_too_many_signers() {
        let payer = key_pair(1);
        let mut tx = simple_transaction(&payer);
        let extra = key_pair(3);
        assert!(matches!(
            tx.sign(&[&payer, &extra]),
            Err(SolError::TooManySigners)
        ));
    }

    #[test]
    fn encode_decode_round_trip() {
        let payer = key_pair(1);
        let mut tx = simple_transaction(&payer);
        tx.sign(&[&payer]).unwrap();

        let encoded = tx.encode();
        let decoded = SolanaTransaction::decode(&encoded).unwrap();
        assert_eq!(decoded.encode(), encoded);
        assert_eq!(decoded.signatures, tx.signatures);
    }

    #[test]
    fn decode_truncated_signature_fails() {
        let payer = key_pair(1);
        let tx = simple_transaction(&payer);
        let encoded = tx.encode();
        assert!(SolanaTransaction::decode(&encoded[..40]).is_err());
        assert!(SolanaTransaction::decode(&[]).is_err());
    }

    #[test]
    fn id_is_first_signature() {
        let payer = key_pair(1);
        let mut tx = simple_transaction(&payer);
        tx.sign(&[&payer]).unwrap();
        assert_eq!(tx.id(), Some(tx.signatures[0]));
    }
}
