//! Timelock program instructions.
//!
//! The timelock program holds user funds in program-controlled vaults that
//! release only under authority/time conditions. Discriminators follow the
//! Anchor convention: the first 8 bytes of `SHA-256("global:<name>")`.

use wallet_core::PublicKey;

use crate::account_meta::AccountMeta;
use crate::consts::{RENT_SYSVAR, SYSTEM_PROGRAM, TIMELOCK_PROGRAM, TOKEN_PROGRAM};
use crate::error::SolError;
use crate::instruction::Instruction;
use crate::programs::{account_key, parse, read_u8, read_u64_le, TypedInstruction};

const INITIALIZE: [u8; 8] = [0xaf, 0xaf, 0x6d, 0x1f, 0x0d, 0x98, 0x9b, 0xed];
const TRANSFER_WITH_AUTHORITY: [u8; 8] = [0x44, 0x80, 0xde, 0xc0, 0x81, 0x45, 0x47, 0xa5];
const REVOKE_LOCK_WITH_AUTHORITY: [u8; 8] = [0xe5, 0xb5, 0x3a, 0xf2, 0xab, 0x08, 0xc9, 0x90];
const DEACTIVATE: [u8; 8] = [0x2c, 0x70, 0x21, 0xac, 0x71, 0x1c, 0x8e, 0x0d];
const WITHDRAW: [u8; 8] = [0xb7, 0x12, 0x46, 0x9c, 0x94, 0x6d, 0xa1, 0x22];
const CLOSE_ACCOUNTS: [u8; 8] = [0xab, 0xde, 0x5e, 0xe9, 0x22, 0xfa, 0xca, 0x01];
const BURN_DUST_WITH_AUTHORITY: [u8; 8] = [0x27, 0x2a, 0xff, 0xda, 0x0e, 0x7c, 0x4e, 0x2d];

/// Create and activate a timelock state/vault pair for an owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Initialize {
    pub timelock: PublicKey,
    pub vault: PublicKey,
    pub vault_owner: PublicKey,
    pub mint: PublicKey,
    pub time_authority: PublicKey,
    pub payer: PublicKey,
    /// Lock duration in seconds.
    pub unlock_duration: u64,
}

impl TypedInstruction for Initialize {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        let data = parse(instruction, &TIMELOCK_PROGRAM, &INITIALIZE, Some(10))?;
        Ok(Initialize {
            timelock: account_key(instruction, 1)?,
            vault: account_key(instruction, 2)?,
            vault_owner: account_key(instruction, 3)?,
            mint: account_key(instruction, 4)?,
            time_authority: account_key(instruction, 5)?,
            payer: account_key(instruction, 6)?,
            unlock_duration: read_u64_le(data, 0)?,
        })
    }

    fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(16);
        data.extend_from_slice(&INITIALIZE);
        data.extend_from_slice(&self.unlock_duration.to_le_bytes());

        Instruction::new(
            TIMELOCK_PROGRAM,
            vec![
                AccountMeta::readonly(SYSTEM_PROGRAM),
                AccountMeta::writable(self.timelock),
                AccountMeta::writable(self.vault),
                AccountMeta::readonly(self.vault_owner),
                AccountMeta::readonly(self.mint),
                AccountMeta::readonly_signer(self.time_authority),
                AccountMeta::writable_signer(self.payer),
                AccountMeta::readonly(TOKEN_PROGRAM),
                AccountMeta::readonly(SYSTEM_PROGRAM),
                AccountMeta::readonly(RENT_SYSVAR),
            ],
            data,
        )
    }
}

/// Transfer out of a locked vault with the time authority co-signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferWithAuthority {
    pub timelock: PublicKey,
    pub vault: PublicKey,
    pub vault_owner: PublicKey,
    pub time_authority: PublicKey,
    pub destination: PublicKey,
    pub payer: PublicKey,
    pub bump: u8,
    pub quarks: u64,
}

impl TypedInstruction for TransferWithAuthority {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        let data = parse(
            instruction,
            &TIMELOCK_PROGRAM,
            &TRANSFER_WITH_AUTHORITY,
            Some(8),
        )?;
        Ok(TransferWithAuthority {
            timelock: account_key(instruction, 0)?,
            vault: account_key(instruction, 1)?,
            vault_owner: account_key(instruction, 2)?,
            time_authority: account_key(instruction, 3)?,
            destination: account_key(instruction, 4)?,
            payer: account_key(instruction, 5)?,
            bump: read_u8(data, 0)?,
            quarks: read_u64_le(data, 1)?,
        })
    }

    fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(17);
        data.extend_from_slice(&TRANSFER_WITH_AUTHORITY);
        data.push(self.bump);
        data.extend_from_slice(&self.quarks.to_le_bytes());

        Instruction::new(
            TIMELOCK_PROGRAM,
            vec![
                AccountMeta::readonly(self.timelock),
                AccountMeta::writable(self.vault),
                AccountMeta::readonly_signer(self.vault_owner),
                AccountMeta::readonly_signer(self.time_authority),
                AccountMeta::writable(self.destination),
                AccountMeta::writable_signer(self.payer),
                AccountMeta::readonly(TOKEN_PROGRAM),
                AccountMeta::readonly(SYSTEM_PROGRAM),
            ],
            data,
        )
    }
}

/// Revoke the lock so the close authority can dismantle the account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokeLockWithAuthority {
    pub timelock: PublicKey,
    pub vault: PublicKey,
    pub close_authority: PublicKey,
    pub payer: PublicKey,
    pub bump: u8,
}

impl TypedInstruction for RevokeLockWithAuthority {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        let data = parse(
            instruction,
            &TIMELOCK_PROGRAM,
            &REVOKE_LOCK_WITH_AUTHORITY,
            Some(6),
        )?;
        Ok(RevokeLockWithAuthority {
            timelock: account_key(instruction, 0)?,
            vault: account_key(instruction, 1)?,
            close_authority: account_key(instruction, 2)?,
            payer: account_key(instruction, 3)?,
            bump: read_u8(data, 0)?,
        })
    }

    fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(9);
        data.extend_from_slice(&REVOKE_LOCK_WITH_AUTHORITY);
        data.push(self.bump);

        Instruction::new(
            TIMELOCK_PROGRAM,
            vec![
                AccountMeta::writable(self.timelock),
                AccountMeta::writable(self.vault),
                AccountMeta::readonly_signer(self.close_authority),
                AccountMeta::writable_signer(self.payer),
                AccountMeta::readonly(TOKEN_PROGRAM),
                AccountMeta::readonly(SYSTEM_PROGRAM),
            ],
            data,
        )
    }
}

/// Deactivate the lock on behalf of the vault owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deactivate {
    pub timelock: PublicKey,
    pub vault_owner: PublicKey,
    pub payer: PublicKey,
    pub bump: u8,
}

impl TypedInstruction for Deactivate {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        let data = parse(instruction, &TIMELOCK_PROGRAM, &DEACTIVATE, Some(3))?;
        Ok(Deactivate {
            timelock: account_key(instruction, 0)?,
            vault_owner: account_key(instruction, 1)?,
            payer: account_key(instruction, 2)?,
            bump: read_u8(data, 0)?,
        })
    }

    fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(9);
        data.extend_from_slice(&DEACTIVATE);
        data.push(self.bump);

        Instruction::new(
            TIMELOCK_PROGRAM,
            vec![
                AccountMeta::writable(self.timelock),
                AccountMeta::readonly_signer(self.vault_owner),
                AccountMeta::writable_signer(self.payer),
            ],
            data,
        )
    }
}

/// Withdraw the full vault balance to a destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdraw {
    pub timelock: PublicKey,
    pub vault: PublicKey,
    pub vault_owner: PublicKey,
    pub destination: PublicKey,
    pub payer: PublicKey,
    pub bump: u8,
}

impl TypedInstruction for Withdraw {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        let data = parse(instruction, &TIMELOCK_PROGRAM, &WITHDRAW, Some(7))?;
        Ok(Withdraw {
            timelock: account_key(instruction, 0)?,
            vault: account_key(instruction, 1)?,
            vault_owner: account_key(instruction, 2)?,
            destination: account_key(instruction, 3)?,
            payer: account_key(instruction, 4)?,
            bump: read_u8(data, 0)?,
        })
    }

    fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(9);
        data.extend_from_slice(&WITHDRAW);
        data.push(self.bump);

        Instruction::new(
            TIMELOCK_PROGRAM,
            vec![
                AccountMeta::writable(self.timelock),
                AccountMeta::writable(self.vault),
                AccountMeta::readonly_signer(self.vault_owner),
                AccountMeta::writable(self.destination),
                AccountMeta::writable_signer(self.payer),
                AccountMeta::readonly(TOKEN_PROGRAM),
                AccountMeta::readonly(SYSTEM_PROGRAM),
            ],
            data,
        )
    }
}

/// Close the state/vault pair once it is empty and unlocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseAccounts {
    pub timelock: PublicKey,
    pub vault: PublicKey,
    pub close_authority: PublicKey,
    pub payer: PublicKey,
    pub bump: u8,
}

impl TypedInstruction for CloseAccounts {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        let data = parse(instruction, &TIMELOCK_PROGRAM, &CLOSE_ACCOUNTS, Some(6))?;
        Ok(CloseAccounts {
            timelock: account_key(instruction, 0)?,
            vault: account_key(instruction, 1)?,
            close_authority: account_key(instruction, 2)?,
            payer: account_key(instruction, 3)?,
            bump: read_u8(data, 0)?,
        })
    }

    fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(9);
        data.extend_from_slice(&CLOSE_ACCOUNTS);
        data.push(self.bump);

        Instruction::new(
            TIMELOCK_PROGRAM,
            vec![
                AccountMeta::writable(self.timelock),
                AccountMeta::writable(self.vault),
                AccountMeta::readonly_signer(self.close_authority),
                AccountMeta::writable_signer(self.payer),
                AccountMeta::readonly(TOKEN_PROGRAM),
                AccountMeta::readonly(SYSTEM_PROGRAM),
            ],
            data,
        )
    }
}

/// Burn residual dust (up to `max_quarks`) before closing an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BurnDustWithAuthority {
    pub timelock: PublicKey,
    pub vault: PublicKey,
    pub vault_owner: PublicKey,
    pub time_authority: PublicKey,
    pub mint: PublicKey,
    pub payer: PublicKey,
    pub bump: u8,
    pub max_quarks: u64,
}

impl TypedInstruction for BurnDustWithAuthority {
    fn try_decode(instruction: &Instruction) -> Result<Self, SolError> {
        let data = parse(
            instruction,
            &TIMELOCK_PROGRAM,
            &BURN_DUST_WITH_AUTHORITY,
            Some(8),
        )?;
        Ok(BurnDustWithAuthority {
            timelock: account_key(instruction, 0)?,
            vault: account_key(instruction, 1)?,
            vault_owner: account_key(instruction, 2)?,
            time_authority: account_key(instruction, 3)?,
            mint: account_key(instruction, 4)?,
            payer: account_key(instruction, 5)?,
            bump: read_u8(data, 0)?,
            max_quarks: read_u64_le(data, 1)?,
        })
    }

    fn instruction(&self) -> Instruction {
        let mut data = Vec::with_capacity(17);
        data.extend_from_slice(&BURN_DUST_WITH_AUTHORITY);
        data.push(self.bump);
        data.extend_from_slice(&self.max_quarks.to_le_bytes());

        Instruction::new(
            TIMELOCK_PROGRAM,
            vec![
                AccountMeta::writable(self.timelock),
                AccountMeta::writable(self.vault),
                AccountMeta::readonly_signer(self.vault_owner),
                AccountMeta::readonly_signer(self.time_authority),
                AccountMeta::writable(self.mint),
                AccountMeta::writable_signer(self.payer),
                AccountMeta::readonly(TOKEN_PROGRAM),
                AccountMeta::readonly(SYSTEM_PROGRAM),
            ],
            data,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha2::{Digest, Sha256};

    fn key(byte: u8) -> PublicKey {
        PublicKey::new([byte; 32])
    }

    fn anchor_discriminator(name: &str) -> [u8; 8] {
        let digest = Sha256::digest(format!("global:{name}"));
        digest[..8].try_into().unwrap()
    }

    #[test]
    fn discriminators_follow_anchor_convention() {
        assert_eq!(INITIALIZE, anchor_discriminator("initialize"));
        assert_eq!(
            TRANSFER_WITH_AUTHORITY,
            anchor_discriminator("transfer_with_authority")
        );
        assert_eq!(
            REVOKE_LOCK_WITH_AUTHORITY,
            anchor_discriminator("revoke_lock_with_authority")
        );
        assert_eq!(DEACTIVATE, anchor_discriminator("deactivate"));
        assert_eq!(WITHDRAW, anchor_discriminator("withdraw"));
        assert_eq!(CLOSE_ACCOUNTS, anchor_discriminator("close_accounts"));
        assert_eq!(
            BURN_DUST_WITH_AUTHORITY,
            anchor_discriminator("burn_dust_with_authority")
        );
    }

    #[test]
    fn transfer_with_authority_layout() {
        let ix = TransferWithAuthority {
            timelock: key(1),
            vault: key(2),
            vault_owner: key(3),
            time_authority: key(4),
            destination: key(5),
            payer: key(6),
            bump: 255,
            quarks: 200_000,
        }
        .instruction();

        assert_eq!(ix.data.len(), 17);
        assert_eq!(&ix.data[..8], &TRANSFER_WITH_AUTHORITY);
        assert_eq!(ix.data[8], 255);
        assert_eq!(&ix.data[9..], &200_000u64.to_le_bytes());
        assert_eq!(ix.accounts.len(), 8);
        assert!(ix.accounts[2].is_signer); // vault owner
        assert!(ix.accounts[3].is_signer); // time authority
        assert!(ix.accounts[1].is_writable && ix.accounts[4].is_writable);
    }

    #[test]
    fn transfer_with_authority_round_trip() {
        let original = TransferWithAuthority {
            timelock: key(1),
            vault: key(2),
            vault_owner: key(3),
            time_authority: key(4),
            destination: key(5),
            payer: key(6),
            bump: 254,
            quarks: 42,
        };
        let decoded = TransferWithAuthority::try_decode(&original.instruction()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn burn_dust_round_trip() {
        let original = BurnDustWithAuthority {
            timelock: key(1),
            vault: key(2),
            vault_owner: key(3),
            time_authority: key(4),
            mint: key(5),
            payer: key(6),
            bump: 255,
            max_quarks: 100_000,
        };
        let decoded = BurnDustWithAuthority::try_decode(&original.instruction()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn close_sequence_round_trips() {
        let revoke = RevokeLockWithAuthority {
            timelock: key(1),
            vault: key(2),
            close_authority: key(3),
            payer: key(4),
            bump: 251,
        };
        assert_eq!(
            RevokeLockWithAuthority::try_decode(&revoke.instruction()).unwrap(),
            revoke
        );

        let deactivate = Deactivate {
            timelock: key(1),
            vault_owner: key(2),
            payer: key(3),
            bump: 250,
        };
        assert_eq!(
            Deactivate::try_decode(&deactivate.instruction()).unwrap(),
            deactivate
        );

        let withdraw = Withdraw {
            timelock: key(1),
            vault: key(2),
            vault_owner: key(3),
            destination: key(4),
            payer: key(5),
            bump: 249,
        };
        assert_eq!(Withdraw::try_decode(&withdraw.instruction()).unwrap(), withdraw);

        let close = CloseAccounts {
            timelock: key(1),
            vault: key(2),
            close_authority: key(3),
            payer: key(4),
            bump: 248,
        };
        assert_eq!(CloseAccounts::try_decode(&close.instruction()).unwrap(), close);
    }

    #[test]
    fn initialize_round_trip() {
        let original = Initialize {
            timelock: key(1),
            vault: key(2),
            vault_owner: key(3),
            mint: key(4),
            time_authority: key(5),
            payer: key(6),
            unlock_duration: 1_814_400,
        };
        let decoded = Initialize::try_decode(&original.instruction()).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn wrong_account_count_rejected() {
        let mut ix = Deactivate {
            timelock: key(1),
            vault_owner: key(2),
            payer: key(3),
            bump: 1,
        }
        .instruction();
        ix.accounts.pop();
        assert!(matches!(
            Deactivate::try_decode(&ix),
            Err(SolError::UnexpectedAccountCount { .. })
        ));
    }

    #[test]
    fn cross_decoding_rejected() {
        let withdraw = Withdraw {
            timelock: key(1),
            vault: key(2),
            vault_owner: key(3),
            destination: key(4),
            payer: key(5),
            bump: 1,
        }
        .instruction();
        assert!(TransferWithAuthority::try_decode(&withdraw).is_err());
    }
}
