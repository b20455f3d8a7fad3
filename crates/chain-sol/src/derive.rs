//! Program-derived address search and the wallet's fixed seed recipes.

use sha2::{Digest, Sha256};
use wallet_core::{Hash, PublicKey};

use crate::consts::{
    ASSOCIATED_TOKEN_PROGRAM, MINT, SPLITTER_PROGRAM, SWAP_VALIDATOR_PROGRAM, TIMELOCK_PROGRAM,
    TIME_AUTHORITY, TOKEN_PROGRAM,
};
use crate::error::SolError;

const MAX_SEEDS: usize = 16;
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// An address derived from program seeds, with the bump that produced it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ProgramDerivedAccount {
    pub public_key: PublicKey,
    pub bump: u8,
}

/// Compute `SHA-256(seeds ∥ program ∥ "ProgramDerivedAddress")`, rejecting
/// digests that land on the Ed25519 curve.
///
/// Returns `None` when the digest is a valid curve point — callers retry
/// with a different bump seed.
pub fn derive_program_address(program: &PublicKey, seeds: &[&[u8]]) -> Option<PublicKey> {
    if seeds.len() > MAX_SEEDS {
        return None;
    }

    let mut hasher = Sha256::new();
    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(program.as_ref());
    hasher.update(PDA_MARKER);

    let candidate = PublicKey::new(hasher.finalize().into());
    if candidate.is_on_curve() {
        return None;
    }
    Some(candidate)
}

/// Search bump seeds 255 down to 0 for the first off-curve address.
///
/// The search failing for all 256 bumps is possible in principle but never
/// observed in practice; it is surfaced as a derivation error rather than a
/// panic.
pub fn find_program_address(
    program: &PublicKey,
    seeds: &[&[u8]],
) -> Result<ProgramDerivedAccount, SolError> {
    if seeds.len() >= MAX_SEEDS {
        return Err(SolError::TooManySeeds);
    }

    for bump in (0u8..=255).rev() {
        let bump_seed = [bump];
        let mut candidate_seeds: Vec<&[u8]> = seeds.to_vec();
        candidate_seeds.push(&bump_seed);

        if let Some(public_key) = derive_program_address(program, &candidate_seeds) {
            return Ok(ProgramDerivedAccount { public_key, bump });
        }
    }

    Err(SolError::DerivationFailed)
}

/// The timelock state/vault pair controlling one owner's funds.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimelockDerivedAccounts {
    pub owner: PublicKey,
    pub state: ProgramDerivedAccount,
    pub vault: ProgramDerivedAccount,
}

impl TimelockDerivedAccounts {
    pub const LOCKOUT_IN_DAYS: u8 = 21;
    pub const DATA_VERSION: u8 = 3;

    pub fn new(owner: PublicKey) -> Result<TimelockDerivedAccounts, SolError> {
        let state = Self::derive_state(&owner, Self::LOCKOUT_IN_DAYS)?;
        let vault = Self::derive_vault(&state.public_key, Self::DATA_VERSION)?;
        Ok(TimelockDerivedAccounts {
            owner,
            state,
            vault,
        })
    }

    fn derive_state(owner: &PublicKey, lockout: u8) -> Result<ProgramDerivedAccount, SolError> {
        find_program_address(
            &TIMELOCK_PROGRAM,
            &[
                b"timelock_state",
                MINT.as_ref(),
                TIME_AUTHORITY.as_ref(),
                owner.as_ref(),
                &[lockout],
            ],
        )
    }

    fn derive_vault(state: &PublicKey, version: u8) -> Result<ProgramDerivedAccount, SolError> {
        find_program_address(
            &TIMELOCK_PROGRAM,
            &[b"timelock_vault", state.as_ref(), &[version]],
        )
    }
}

/// The canonical receipt string hashed into a splitter commitment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    pub intent_id: PublicKey,
    pub action_id: u32,
    pub quarks: u64,
    pub source: PublicKey,
    pub destination: PublicKey,
}

impl Transcript {
    pub fn description(&self) -> String {
        format!(
            "receipt[{}, {}]: transfer {} quarks from {} to {}",
            self.intent_id, self.action_id, self.quarks, self.source, self.destination
        )
    }

    pub fn hash(&self) -> Hash {
        Hash::new(Sha256::digest(self.description()).into())
    }
}

/// Splitter commitment state/vault for one privacy-preserving transfer leg.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CommitmentAccounts {
    pub treasury: PublicKey,
    pub destination: PublicKey,
    pub recent_root: Hash,
    pub transcript: Hash,
    pub state: ProgramDerivedAccount,
    pub vault: ProgramDerivedAccount,
}

impl CommitmentAccounts {
    pub fn new(
        treasury: PublicKey,
        destination: PublicKey,
        recent_root: Hash,
        transcript: Hash,
        quarks: u64,
    ) -> Result<CommitmentAccounts, SolError> {
        let state = find_program_address(
            &SPLITTER_PROGRAM,
            &[
                b"commitment_state",
                treasury.as_ref(),
                recent_root.as_ref(),
                transcript.as_ref(),
                destination.as_ref(),
                &quarks.to_le_bytes(),
            ],
        )?;
        let vault = find_program_address(
            &SPLITTER_PROGRAM,
            &[
                b"commitment_vault",
                treasury.as_ref(),
                state.public_key.as_ref(),
            ],
        )?;

        Ok(CommitmentAccounts {
            treasury,
            destination,
            recent_root,
            transcript,
            state,
            vault,
        })
    }

    /// Derive from the transfer context, hashing the transcript in place.
    #[allow(clippy::too_many_arguments)]
    pub fn from_transfer(
        source_vault: PublicKey,
        destination: PublicKey,
        quarks: u64,
        treasury: PublicKey,
        recent_root: Hash,
        intent_id: PublicKey,
        action_id: u32,
    ) -> Result<CommitmentAccounts, SolError> {
        let transcript = Transcript {
            intent_id,
            action_id,
            quarks,
            source: source_vault,
            destination,
        };
        CommitmentAccounts::new(treasury, destination, recent_root, transcript.hash(), quarks)
    }
}

/// The associated token account for an (owner, mint) pair.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct AssociatedTokenAccount {
    pub owner: PublicKey,
    pub ata: ProgramDerivedAccount,
}

impl AssociatedTokenAccount {
    pub fn new(owner: PublicKey, mint: PublicKey) -> Result<AssociatedTokenAccount, SolError> {
        let ata = find_program_address(
            &ASSOCIATED_TOKEN_PROGRAM,
            &[owner.as_ref(), TOKEN_PROGRAM.as_ref(), mint.as_ref()],
        )?;
        Ok(AssociatedTokenAccount { owner, ata })
    }
}

/// The swap validator's per-swap state account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PreSwapStateAccount {
    pub state: ProgramDerivedAccount,
}

impl PreSwapStateAccount {
    pub fn new(
        source: PublicKey,
        destination: PublicKey,
        nonce: PublicKey,
    ) -> Result<PreSwapStateAccount, SolError> {
        let state = find_program_address(
            &SWAP_VALIDATOR_PROGRAM,
            &[
                b"pre_swap_state",
                source.as_ref(),
                destination.as_ref(),
                nonce.as_ref(),
            ],
        )?;
        Ok(PreSwapStateAccount { state })
    }
}
