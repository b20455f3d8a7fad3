use thiserror::Error;

/// Failures during intent composition and action signing. All of these
/// surface synchronously, before any network call.
#[derive(Debug, Error)]
pub enum IntentError {
    #[error("requested amount must be greater than zero")]
    InvalidAmount,

    #[error("insufficient bucket balance for the requested amount")]
    InsufficientTrayBalance,

    #[error("bucket balance cannot cover the planned exchange")]
    InvalidSlotBalance,

    #[error("no bucket can be split to cover the remaining amount")]
    InvalidStepIndex,

    #[error("bucket selected for splitting is empty")]
    SlotAtIndexEmpty,

    #[error("fee must be less than the amount being sent")]
    InvalidFee,

    #[error("composed actions do not balance against the requested amount")]
    BalanceMismatch,

    #[error("action is missing its server parameter")]
    MissingServerParameter,

    #[error("server parameter is missing the expected payload")]
    MissingParameterPayload,

    #[error("action is missing its signer")]
    MissingSigner,

    #[error("merkle proof does not contain the original commitment")]
    InvalidMerkleProof,

    #[error("fee payment has no destination")]
    MissingFeeDestination,

    #[error("expected {expected} server parameters, got {actual}")]
    InvalidParameterCount { expected: usize, actual: usize },

    #[error("server parameter id {parameter} does not match action id {action}")]
    ActionParameterMismatch { action: u32, parameter: u32 },

    #[error(transparent)]
    Derivation(#[from] chain_sol::SolError),

    #[error(transparent)]
    Key(#[from] wallet_core::WalletError),
}

/// Failures at the service boundary. Terminal for the current intent;
/// local bucket-planning state is never corrupted by them.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("intent status polling hit the attempt limit")]
    PollLimitReached,

    #[error("transfer was already submitted")]
    DuplicateTransfer,

    #[error("destination signature is invalid")]
    InvalidDestinationSignature,

    #[error("server denied the intent: {0}")]
    Denied(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error(transparent)]
    Intent(#[from] IntentError),
}
