//! Ed25519 keypairs.

use ed25519_dalek::{Signer, SigningKey};

use crate::types::{PublicKey, Seed32, Signature};

/// An Ed25519 keypair derived from a 32-byte seed.
///
/// Signing is deterministic (RFC 8032), so rebuilding the same action from
/// the same inputs always produces identical signatures — which is what
/// makes resubmitting an intent after a network failure safe.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
    public_key: PublicKey,
}

impl KeyPair {
    /// Generate a keypair from a fresh random seed.
    pub fn generate() -> KeyPair {
        KeyPair::from_seed(Seed32::generate())
    }

    pub fn from_seed(seed: Seed32) -> KeyPair {
        let signing_key = SigningKey::from_bytes(seed.bytes());
        let public_key = PublicKey::new(signing_key.verifying_key().to_bytes());
        KeyPair {
            signing_key,
            public_key,
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    pub fn seed(&self) -> Seed32 {
        Seed32::new(self.signing_key.to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::new(self.signing_key.sign(message).to_bytes())
    }

    pub fn verify(&self, signature: &Signature, message: &[u8]) -> bool {
        self.public_key.verify(signature, message)
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key
    }
}

impl Eq for KeyPair {}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the private half.
        write!(f, "KeyPair({})", self.public_key)
    }
}
