use thiserror::Error;

/// Codec and derivation errors.
#[derive(Debug, Error)]
pub enum SolError {
    #[error("truncated or malformed data: {0}")]
    InvalidData(&'static str),

    #[error("instruction belongs to a different program")]
    UnexpectedProgram,

    #[error("unexpected instruction discriminator")]
    UnexpectedDiscriminator,

    #[error("expected {expected} instruction accounts, got {actual}")]
    UnexpectedAccountCount { expected: usize, actual: usize },

    #[error("account index {0} out of bounds")]
    AccountIndexOutOfBounds(usize),

    #[error("account not present in the message account list: {0}")]
    AccountNotInAccountList(String),

    #[error("account is not a required signer: {0}")]
    NotASigner(String),

    #[error("more signers than required signature slots")]
    TooManySigners,

    #[error("too many seeds for program address derivation")]
    TooManySeeds,

    #[error("could not find an off-curve program address")]
    DerivationFailed,
}
