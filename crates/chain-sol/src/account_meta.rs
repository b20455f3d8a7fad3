//! Account references and their canonical message ordering.

use std::cmp::Ordering;

use wallet_core::PublicKey;

/// One account referenced by an instruction, with its permission bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AccountMeta {
    pub public_key: PublicKey,
    pub is_signer: bool,
    pub is_writable: bool,
    pub is_payer: bool,
    pub is_program: bool,
}

impl AccountMeta {
    pub fn new(public_key: PublicKey, signer: bool, writable: bool) -> AccountMeta {
        AccountMeta {
            public_key,
            is_signer: signer,
            is_writable: writable,
            is_payer: false,
            is_program: false,
        }
    }

    /// The fee payer: always a writable signer and always first.
    pub fn payer(public_key: PublicKey) -> AccountMeta {
        AccountMeta {
            public_key,
            is_signer: true,
            is_writable: true,
            is_payer: true,
            is_program: false,
        }
    }

    pub fn writable(public_key: PublicKey) -> AccountMeta {
        AccountMeta::new(public_key, false, true)
    }

    pub fn writable_signer(public_key: PublicKey) -> AccountMeta {
        AccountMeta::new(public_key, true, true)
    }

    pub fn readonly(public_key: PublicKey) -> AccountMeta {
        AccountMeta::new(public_key, false, false)
    }

    pub fn readonly_signer(public_key: PublicKey) -> AccountMeta {
        AccountMeta::new(public_key, true, false)
    }

    /// An invoked program id: read-only, non-signer, ordered last.
    pub fn program(public_key: PublicKey) -> AccountMeta {
        AccountMeta {
            public_key,
            is_signer: false,
            is_writable: false,
            is_payer: false,
            is_program: true,
        }
    }
}

/// Canonical ordering:
/// 1. the payer,
/// 2. signers before non-signers, writable before read-only within each,
/// 3. invoked programs last,
/// 4. ties broken by account bytes.
impl Ord for AccountMeta {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_payer != other.is_payer {
            return if self.is_payer {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        if self.is_program != other.is_program {
            return if self.is_program {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }
        if self.is_signer != other.is_signer {
            return if self.is_signer {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        if self.is_writable != other.is_writable {
            return if self.is_writable {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        self.public_key.cmp(&other.public_key)
    }
}

impl PartialOrd for AccountMeta {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Deduplicate by public key, merging permission bits upward — a key that
/// appears anywhere as signer/writable/payer/program keeps that bit.
pub fn filter_unique_accounts(accounts: &[AccountMeta]) -> Vec<AccountMeta> {
    let mut unique: Vec<AccountMeta> = Vec::with_capacity(accounts.len());

    for account in accounts {
        if let Some(existing) = unique
            .iter_mut()
            .find(|e| e.public_key == account.public_key)
        {
            existing.is_signer |= account.is_signer;
            existing.is_writable |= account.is_writable;
            existing.is_payer |= account.is_payer;
            existing.is_program |= account.is_program;
        } else {
            unique.push(*account);
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> PublicKey {
        PublicKey::new([byte; 32])
    }

    #[test]
    fn payer_sorts_first() {
        let mut accounts = vec![
            AccountMeta::writable_signer(key(1)),
            AccountMeta::payer(key(9)),
        ];
        accounts.sort();
        assert!(accounts[0].is_payer);
    }

    #[test]
    fn programs_sort_last() {
        let mut accounts = vec![
            AccountMeta::program(key(1)),
            AccountMeta::readonly(key(2)),
            AccountMeta::writable(key(3)),
        ];
        accounts.sort();
        assert_eq!(accounts[0].public_key, key(3));
        assert_eq!(accounts[1].public_key, key(2));
        assert!(accounts[2].is_program);
    }

    #[test]
    fn signers_before_non_signers_writable_first() {
        let mut accounts = vec![
            AccountMeta::readonly(key(4)),
            AccountMeta::readonly_signer(key(3)),
            AccountMeta::writable(key(2)),
            AccountMeta::writable_signer(key(1)),
        ];
        accounts.sort();
        let order: Vec<PublicKey> = accounts.iter().map(|a| a.public_key).collect();
        assert_eq!(order, vec![key(1), key(3), key(2), key(4)]);
    }

    #[test]
    fn ties_break_lexicographically() {
        let mut accounts = vec![AccountMeta::readonly(key(2)), AccountMeta::readonly(key(1))];
        accounts.sort();
        assert_eq!(accounts[0].public_key, key(1));
    }

    #[test]
    fn dedupe_merges_permissions_upward() {
        let merged = filter_unique_accounts(&[
            AccountMeta::readonly(key(1)),
            AccountMeta::writable(key(1)),
            AccountMeta::readonly_signer(key(1)),
        ]);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].is_signer);
        assert!(merged[0].is_writable);
    }

    #[test]
    fn dedupe_never_downgrades() {
        let merged = filter_unique_accounts(&[
            AccountMeta::writable_signer(key(1)),
            AccountMeta::readonly(key(1)),
        ]);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].is_signer);
        assert!(merged[0].is_writable);
    }

    #[test]
    fn dedupe_keeps_first_occurrence_order() {
        let merged = filter_unique_accounts(&[
            AccountMeta::readonly(key(3)),
            AccountMeta::readonly(key(1)),
            AccountMeta::readonly(key(3)),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].public_key, key(3));
    }
}
