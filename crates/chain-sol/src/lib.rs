//! Binary transaction codec and program encoders for the ledger.
//!
//! We build transactions entirely by hand — no chain SDK dependency. The
//! wire format is the standard compact binary layout:
//!
//! ```text
//! Transaction:
//!   signatures              short_vec<[64]byte>
//!   message:
//!     header                3 bytes (required sigs, ro signed, ro unsigned)
//!     account_keys          short_vec<[32]byte>
//!     recent_blockhash      [32]byte
//!     instructions          short_vec<CompiledInstruction>
//!     address_table_lookups short_vec<Lookup>   (v0 only, version byte 0x80)
//!
//! CompiledInstruction:
//!   program_index           byte
//!   account_indexes         short_vec<byte>
//!   data                    short_vec<byte>
//! ```
//!
//! Every variable-length field uses the compact-u16 ("short vec") length
//! prefix. Decoding is total: truncated or malformed input yields a typed
//! error, never a panic.

pub mod account_meta;
pub mod builder;
pub mod consts;
pub mod derive;
pub mod error;
pub mod instruction;
pub mod message;
pub mod programs;
pub mod shortvec;
pub mod transaction;
pub mod versioned;

pub use account_meta::AccountMeta;
pub use builder::TransactionBuilder;
pub use derive::{
    find_program_address, AssociatedTokenAccount, CommitmentAccounts, PreSwapStateAccount,
    ProgramDerivedAccount, TimelockDerivedAccounts, Transcript,
};
pub use error::SolError;
pub use instruction::{CompiledInstruction, Instruction};
pub use message::{LegacyMessage, Message, MessageHeader};
pub use programs::TypedInstruction;
pub use transaction::SolanaTransaction;
pub use versioned::{AddressLookupTable, MessageAddressTableLookup, V0Message};
