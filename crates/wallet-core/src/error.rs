use thiserror::Error;

/// Key and derivation errors.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("invalid base58 string")]
    InvalidBase58,

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}
