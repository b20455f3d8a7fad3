//! Fixed-size value types: public keys, hashes, signatures, seeds.
//!
//! All four are opaque, immutable byte arrays. The Base58 string form is
//! the only human-facing serialization, so `Display`, `FromStr` and the
//! serde impls all go through Base58.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::base58;
use crate::error::WalletError;

macro_rules! fixed_bytes {
    ($name:ident, $len:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            pub const LEN: usize = $len;
            pub const ZERO: $name = $name([0u8; $len]);

            pub const fn new(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            pub fn from_slice(slice: &[u8]) -> Result<Self, WalletError> {
                let bytes: [u8; $len] =
                    slice.try_into().map_err(|_| WalletError::InvalidLength {
                        expected: $len,
                        actual: slice.len(),
                    })?;
                Ok(Self(bytes))
            }

            /// Decode from a Base58 string; fails on bad characters or a
            /// wrong-length payload.
            pub fn from_base58(string: &str) -> Result<Self, WalletError> {
                let bytes = base58::to_bytes(string);
                if bytes.is_empty() && !string.is_empty() {
                    return Err(WalletError::InvalidBase58);
                }
                Self::from_slice(&bytes)
            }

            pub fn to_base58(&self) -> String {
                base58::from_bytes(&self.0)
            }

            pub fn bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn to_bytes(self) -> [u8; $len] {
                self.0
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.to_base58())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.to_base58())
            }
        }

        impl FromStr for $name {
            type Err = WalletError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_base58(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_base58())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let string = String::deserialize(deserializer)?;
                Self::from_base58(&string).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(PublicKey, 32, "A 32-byte Ed25519 public key or account address.");
fixed_bytes!(Hash, 32, "A 32-byte hash (blockhash, merkle node, transcript).");
fixed_bytes!(Signature, 64, "A 64-byte Ed25519 signature.");
fixed_bytes!(Seed32, 32, "A 32-byte Ed25519 seed.");

impl PublicKey {
    /// Whether these bytes decompress to a valid Edwards point.
    ///
    /// Program-derived addresses must be *off* the curve so no private key
    /// can exist for them.
    pub fn is_on_curve(&self) -> bool {
        curve25519_dalek::edwards::CompressedEdwardsY(self.0)
            .decompress()
            .is_some()
    }

    /// Strictly verify an Ed25519 signature over `message`.
    pub fn verify(&self, signature: &Signature, message: &[u8]) -> bool {
        let Ok(key) = ed25519_dalek::VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let signature = ed25519_dalek::Signature::from_bytes(signature.bytes());
        key.verify_strict(message, &signature).is_ok()
    }
}

impl Hash {
    /// Interpret a public key's bytes as a hash (nonce values and merkle
    /// leaves arrive as account addresses).
    pub fn from_public_key(key: &PublicKey) -> Hash {
        Hash(*key.bytes())
    }
}

impl Seed32 {
    /// Generate a fresh random seed from the OS rng.
    pub fn generate() -> Seed32 {
        use rand::RngCore;
        let mut bytes = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Seed32(bytes)
    }
}

impl zeroize::Zeroize for Seed32 {
    fn zeroize(&mut self) {
        zeroize::Zeroize::zeroize(&mut self.0);
    }
}
