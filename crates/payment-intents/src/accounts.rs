//! Account roles and their derived key clusters.

use chain_sol::TimelockDerivedAccounts;
use serde::{Deserialize, Serialize};
use wallet_core::{DerivePath, KeyPair, MnemonicPhrase, PublicKey};

use crate::error::IntentError;

/// The seven fixed-denomination bucket slots, smallest first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotType {
    Bucket1,
    Bucket10,
    Bucket100,
    Bucket1k,
    Bucket10k,
    Bucket100k,
    Bucket1m,
}

impl SlotType {
    pub const ALL: [SlotType; 7] = [
        SlotType::Bucket1,
        SlotType::Bucket10,
        SlotType::Bucket100,
        SlotType::Bucket1k,
        SlotType::Bucket10k,
        SlotType::Bucket100k,
        SlotType::Bucket1m,
    ];

    /// Denomination in whole kin.
    pub const fn bill_value(self) -> u64 {
        match self {
            SlotType::Bucket1 => 1,
            SlotType::Bucket10 => 10,
            SlotType::Bucket100 => 100,
            SlotType::Bucket1k => 1_000,
            SlotType::Bucket10k => 10_000,
            SlotType::Bucket100k => 100_000,
            SlotType::Bucket1m => 1_000_000,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            SlotType::Bucket1 => 0,
            SlotType::Bucket10 => 1,
            SlotType::Bucket100 => 2,
            SlotType::Bucket1k => 3,
            SlotType::Bucket10k => 4,
            SlotType::Bucket100k => 5,
            SlotType::Bucket1m => 6,
        }
    }
}

/// The role an account plays in the wallet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// The long-lived deposit account.
    Primary,
    /// Rotating account that receives payments before they are swept into
    /// buckets.
    Incoming,
    /// Rotating account that collects bucket funds on their way out.
    Outgoing,
    /// A fixed-denomination bucket.
    Bucket(SlotType),
    /// A self-contained gift card for remote sends.
    RemoteSend,
}

/// An authority keypair together with the timelock accounts it controls.
///
/// Clusters are derived once per (owner, role, index) and read-only after
/// that.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountCluster {
    pub index: u32,
    pub authority: KeyPair,
    pub timelock: TimelockDerivedAccounts,
}

impl AccountCluster {
    pub fn new(index: u32, authority: KeyPair) -> Result<AccountCluster, IntentError> {
        let timelock = TimelockDerivedAccounts::new(authority.public_key())?;
        Ok(AccountCluster {
            index,
            authority,
            timelock,
        })
    }

    pub fn primary(mnemonic: &MnemonicPhrase) -> Result<AccountCluster, IntentError> {
        let authority = wallet_core::derive_key_pair(&DerivePath::primary(), mnemonic)?;
        AccountCluster::new(0, authority)
    }

    pub fn bucket(slot: SlotType, mnemonic: &MnemonicPhrase) -> Result<AccountCluster, IntentError> {
        let path = DerivePath::bucket(slot.index() as u32);
        let authority = wallet_core::derive_key_pair(&path, mnemonic)?;
        AccountCluster::new(0, authority)
    }

    pub fn incoming(index: u32, mnemonic: &MnemonicPhrase) -> Result<AccountCluster, IntentError> {
        let authority = wallet_core::derive_key_pair(&DerivePath::incoming(index), mnemonic)?;
        AccountCluster::new(index, authority)
    }

    pub fn outgoing(index: u32, mnemonic: &MnemonicPhrase) -> Result<AccountCluster, IntentError> {
        let authority = wallet_core::derive_key_pair(&DerivePath::outgoing(index), mnemonic)?;
        AccountCluster::new(index, authority)
    }

    pub fn authority_public_key(&self) -> PublicKey {
        self.authority.public_key()
    }

    /// The vault address holding this cluster's funds.
    pub fn vault_public_key(&self) -> PublicKey {
        self.timelock.vault.public_key
    }
}

/// A remote-send gift card: a throwaway cluster whose authority travels
/// with the card itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GiftCardAccount {
    pub cluster: AccountCluster,
}

impl GiftCardAccount {
    pub fn generate() -> Result<GiftCardAccount, IntentError> {
        Ok(GiftCardAccount {
            cluster: AccountCluster::new(0, KeyPair::generate())?,
        })
    }

    pub fn from_key_pair(authority: KeyPair) -> Result<GiftCardAccount, IntentError> {
        Ok(GiftCardAccount {
            cluster: AccountCluster::new(0, authority)?,
        })
    }
}
