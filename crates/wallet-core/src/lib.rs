//! Key material for the payments wallet.
//!
//! This crate owns everything below the transaction layer: fixed-size
//! key/hash/signature values with their Base58 string forms, Ed25519
//! keypairs, BIP-39 mnemonics, SLIP-0010 hierarchical derivation, and
//! merkle inclusion proof verification. Everything here is pure and
//! synchronous — no I/O, no shared mutable state.

pub mod base58;
pub mod derivation;
pub mod error;
pub mod keypair;
pub mod merkle;
pub mod mnemonic;
pub mod types;

pub use derivation::{derive_key_pair, derive_path, master_key, DerivePath};
pub use error::WalletError;
pub use keypair::KeyPair;
pub use merkle::verify_contained;
pub use mnemonic::{generate_mnemonic, mnemonic_to_seed, validate_mnemonic, MnemonicPhrase};
pub use types::{Hash, PublicKey, Seed32, Signature};
