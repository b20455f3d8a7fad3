//! SLIP-0010 hierarchical key derivation for Ed25519.
//!
//! The master key is `HMAC-SHA512(key = "ed25519 seed", data = seed)`;
//! children are always hardened (`0x00 || key || index|0x80000000`). Path
//! strings use the familiar `m/44'/501'/...` notation; a component without
//! a `'` suffix is rejected because Ed25519 has no non-hardened scheme.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::Zeroize;

use crate::error::WalletError;
use crate::keypair::KeyPair;
use crate::mnemonic::MnemonicPhrase;
use crate::types::Seed32;

type HmacSha512 = Hmac<Sha512>;

const MASTER_KEY: &[u8] = b"ed25519 seed";
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A parsed derivation path of hardened components.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivePath {
    components: Vec<u32>,
}

impl DerivePath {
    /// Parse a path string like `m/44'/501'/0'/0'`.
    ///
    /// Every component must carry the hardened marker (`'` or `h`).
    pub fn parse(path: &str) -> Result<DerivePath, WalletError> {
        let rest = path
            .strip_prefix("m/")
            .ok_or_else(|| WalletError::DerivationFailed("path must start with m/".into()))?;

        let components = rest
            .split('/')
            .map(|component| {
                let index = component
                    .strip_suffix('\'')
                    .or_else(|| component.strip_suffix('h'))
                    .ok_or_else(|| {
                        WalletError::DerivationFailed(format!(
                            "component {component:?} is not hardened"
                        ))
                    })?;
                index.parse::<u32>().map_err(|e| {
                    WalletError::DerivationFailed(format!("bad path component: {e}"))
                })
            })
            .collect::<Result<Vec<u32>, WalletError>>()?;

        Ok(DerivePath { components })
    }

    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// Owner authority: `m/44'/501'/0'/0'`.
    pub fn primary() -> DerivePath {
        DerivePath {
            components: vec![44, 501, 0, 0],
        }
    }

    /// Fixed-denomination bucket slot: `m/44'/501'/0'/0'/{slot}'`.
    pub fn bucket(slot: u32) -> DerivePath {
        DerivePath {
            components: vec![44, 501, 0, 0, slot],
        }
    }

    /// Rotating temporary incoming account: `m/44'/501'/0'/0'/{index}'/1'`.
    pub fn incoming(index: u32) -> DerivePath {
        DerivePath {
            components: vec![44, 501, 0, 0, index, 1],
        }
    }

    /// Rotating temporary outgoing account: `m/44'/501'/0'/0'/{index}'/2'`.
    pub fn outgoing(index: u32) -> DerivePath {
        DerivePath {
            components: vec![44, 501, 0, 0, index, 2],
        }
    }
}

impl std::fmt::Display for DerivePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "m")?;
        for component in &self.components {
            write!(f, "/{component}'")?;
        }
        Ok(())
    }
}

/// Derive the SLIP-0010 master key and chain code from a BIP-39 seed.
pub fn master_key(seed: &[u8]) -> ([u8; 32], [u8; 32]) {
    let mut mac = HmacSha512::new_from_slice(MASTER_KEY).expect("hmac accepts any key length");
    mac.update(seed);
    let digest = mac.finalize().into_bytes();

    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&digest[..32]);
    chain_code.copy_from_slice(&digest[32..]);
    (key, chain_code)
}

/// Derive a keypair and chain code at `path` from a seed.
pub fn derive_path(path: &DerivePath, seed: &[u8]) -> Result<(KeyPair, [u8; 32]), WalletError> {
    let (mut key, mut chain_code) = master_key(seed);

    for &index in path.components() {
        let mut mac = HmacSha512::new_from_slice(&chain_code)
            .map_err(|e| WalletError::DerivationFailed(e.to_string()))?;
        mac.update(&[0x00]);
        mac.update(&key);
        mac.update(&(index | HARDENED_OFFSET).to_be_bytes());
        let digest = mac.finalize().into_bytes();

        key.copy_from_slice(&digest[..32]);
        chain_code.copy_from_slice(&digest[32..]);
    }

    let pair = KeyPair::from_seed(Seed32::new(key));
    key.zeroize();
    Ok((pair, chain_code))
}

/// Derive a keypair at `path` from a mnemonic (empty BIP-39 password).
pub fn derive_key_pair(path: &DerivePath, mnemonic: &MnemonicPhrase) -> Result<KeyPair, WalletError> {
    let mut seed = mnemonic.to_seed("");
    let (pair, _) = derive_path(path, &seed)?;
    seed.zeroize();
    Ok(pair)
}
