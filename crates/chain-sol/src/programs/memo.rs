//! Transfer memos.
//!
//! The attribution service reads a packed binary memo out of every
//! transfer. Fields are packed LSB-first into 256 bits:
//!
//! ```text
//! magic byte indicator   2 bits  | less than 4
//! version                3 bits  | less than 8
//! transfer type          5 bits  | less than 32
//! app index             16 bits  | less than 65,536
//! foreign key          230 bits  | often a hash, opaque here
//! ```
//!
//! The memo program itself takes UTF-8 text, so the packed bytes travel
//! base64-encoded inside the instruction data.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::account_meta::AccountMeta;
use crate::consts::MEMO_PROGRAM;
use crate::error::SolError;
use crate::instruction::Instruction;
use crate::programs::TypedInstruction;

const FOREIGN_KEY_LEN: usize = 230 / 8;
const PACKED_LEN: usize = 32;
pub const DEFAULT_MAGIC_BYTE: u8 = 1;
pub const DEFAULT_VERSION: u8 = 1;

/// Classification of a transfer for the attribution service.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransferType {
    /// When none of the other types fit.
    None,
    /// Payment to a user for some performed action.
    Earn,
    /// Payment for a purchase.
    Spend,
    /// Peer-to-peer movement that is neither an earn nor a spend.
    P2p,
}

impl TransferType {
    fn to_bits(self) -> u8 {
        match self {
            TransferType::None => 0,
            TransferType::Earn => 1,
            TransferType::Spend => 2,
            TransferType::P2p => 3,
        }
    }

    fn from_bits(bits: u8) -> Option<TransferType> {
        match bits {
            0 => Some(TransferType::None),
            1 => Some(TransferType::Earn),
            2 => Some(TransferType::Spend),
            3 => Some(TransferType::P2p),
            _ => None,
        }
    }
}

/// A packed transfer memo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferMemo {
    pub magic_byte: u8,
    pub version: u8,
    pub transfer_type: TransferType,
    pub app_index: u16,
    pub foreign_key: [u8; FOREIGN_KEY_LEN],
}

impl TransferMemo {
    pub fn new(transfer_type: TransferType, app_index: u16) -> TransferMemo {
        TransferMemo {
            magic_byte: DEFAULT_MAGIC_BYTE,
            version: DEFAULT_VERSION,
            transfer_type,
            app_index,
            foreign_key: [0u8; FOREIGN_KEY_LEN],
        }
    }

    /// Pack into the 32-byte binary layout.
    pub fn pack(&self) -> [u8; PACKED_LEN] {
        let mut out = [0u8; PACKED_LEN];
        let transfer_type = self.transfer_type.to_bits();
        let app = self.app_index;
        let fk = &self.foreign_key;

        out[0] = self.magic_byte & 0x3;
        out[0] |= self.version << 2;
        out[0] |= (transfer_type & 0x7) << 5;

        out[1] = (transfer_type & 0x1c) >> 2;
        out[1] |= ((app & 0x3f) as u8) << 2;

        out[2] = ((app & 0x3fc0) >> 6) as u8;

        out[3] = ((app & 0xc000) >> 14) as u8;
        out[3] |= (fk[0] & 0x3f) << 2;

        // Each output byte carries the top 2 bits of one foreign-key byte
        // and the low 6 bits of the next.
        for i in 4..(3 + FOREIGN_KEY_LEN) {
            out[i] = (fk[i - 4] >> 6) & 0x3;
            out[i] |= (fk[i - 3] & 0x3f) << 2;
        }
        out[3 + FOREIGN_KEY_LEN] = (fk[FOREIGN_KEY_LEN - 1] >> 6) & 0x3;

        out
    }

    /// Unpack from the 32-byte binary layout.
    pub fn unpack(content: &[u8]) -> Result<TransferMemo, SolError> {
        if content.len() < PACKED_LEN {
            return Err(SolError::InvalidData("memo too short"));
        }

        let header = u32::from_le_bytes([content[0], content[1], content[2], content[3]]);
        let magic_byte = (header & 0x3) as u8;
        let version = ((header & 0x1c) >> 2) as u8;
        let transfer_bits = ((header & 0x3e0) >> 5) as u8;
        let app_index = ((header & 0x3ff_fc00) >> 10) as u16;

        if magic_byte == 0 {
            return Err(SolError::InvalidData("bad memo magic byte"));
        }
        let transfer_type = TransferType::from_bits(transfer_bits)
            .ok_or(SolError::InvalidData("unknown memo transfer type"))?;

        let mut foreign_key = [0u8; FOREIGN_KEY_LEN];
        for (i, byte) in foreign_key.iter_mut().enumerate() {
            *byte = (content[i + 3] >> 2) & 0x3f;
            *byte |= (content[i + 4] & 0x3) << 6;
        }

        Ok(TransferMemo {
            magic_byte,
            version,
            transfer_type,
            app_index,
            foreign_key,
        })
    }

    /// The UTF-8 memo text as carried on the wire.
    pub fn to_wire_text(&self) -> String {
        BASE64.encode(self.pack())
    }
}

impl TypedInstruction for TransferMemo {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        if instruction.program != MEMO_PROGRAM {
            return Err(SolError::UnexpectedProgram);
        }
        let text = std::str::from_utf8(&instruction.data)
            .map_err(|_| SolError::InvalidData("memo is not utf-8"))?;
        let content = BASE64
            .decode(text)
            .map_err(|_| SolError::InvalidData("memo is not base64"))?;
        TransferMemo::unpack(&content)
    }

    fn instruction(&self) -> Instruction {
        Instruction::new(
            MEMO_PROGRAM,
            Vec::<AccountMeta>::new(),
            self.to_wire_text().into_bytes(),
        )
    }
}
