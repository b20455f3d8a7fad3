//! Well-known program and authority addresses.
//!
//! Base58 decoding is not const, so the byte arrays are pre-computed; the
//! tests below pin each one to its Base58 form.

use wallet_core::PublicKey;

/// The system program: 32 zero bytes.
/// Base58: `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM: PublicKey = PublicKey::new([0u8; 32]);

/// `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`
pub const TOKEN_PROGRAM: PublicKey = PublicKey::new([
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79,
    0xac, 0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff,
    0x00, 0xa9,
]);

/// `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`
pub const ASSOCIATED_TOKEN_PROGRAM: PublicKey = PublicKey::new([
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1, 0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e, 0x0d,
    0x83, 0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84, 0x04, 0x8e, 0x7b, 0xd8, 0xdb, 0xe9,
    0xf8, 0x59,
]);

/// `Memo1UhkJRfHyvLMcVucJwxXeuD728EqVDDwQDxFMNo`
pub const MEMO_PROGRAM: PublicKey = PublicKey::new([
    0x05, 0x4a, 0x53, 0x50, 0xf8, 0x5d, 0xc8, 0x82, 0xd6, 0x14, 0xa5, 0x56, 0x72, 0x78, 0x8a,
    0x29, 0x6d, 0xdf, 0x1e, 0xab, 0xab, 0xd0, 0xa6, 0x06, 0x78, 0x88, 0x49, 0x32, 0xf4, 0xee,
    0xf6, 0xa0,
]);

/// `time2Z2SCnn3qYg3ULKVtdkh8YmZ5jFdKicnA1W2YnJ`
pub const TIMELOCK_PROGRAM: PublicKey = PublicKey::new([
    0x0d, 0x3f, 0xd9, 0xaf, 0x4d, 0x8b, 0x3f, 0x30, 0xfa, 0xc5, 0xbe, 0x4d, 0x7f, 0x6c, 0x78,
    0xf9, 0x1d, 0x27, 0xef, 0x05, 0x89, 0xc8, 0xa0, 0x1f, 0x6a, 0x1e, 0x80, 0xc8, 0x09, 0x56,
    0x5c, 0x57,
]);

/// `spLit2eb13Tz93if6aJM136nUWki5PVUsoEjcUjwpwW`
pub const SPLITTER_PROGRAM: PublicKey = PublicKey::new([
    0x0d, 0x04, 0x91, 0x68, 0x9f, 0x71, 0x9c, 0x75, 0x57, 0xd0, 0xd8, 0x5f, 0x14, 0x65, 0xf3,
    0x5e, 0x74, 0x51, 0x91, 0xbb, 0x53, 0x1d, 0x69, 0xae, 0x62, 0x1b, 0xa4, 0xeb, 0xfb, 0x82,
    0xd3, 0xa5,
]);

/// `sWvA66HNNvgamibZe88v3NN5nQwE8tp3KitfViFjukA`
pub const SWAP_VALIDATOR_PROGRAM: PublicKey = PublicKey::new([
    0x0c, 0xf0, 0xdd, 0xfd, 0x04, 0xf1, 0x6b, 0x20, 0xcc, 0x96, 0xdd, 0x08, 0x4a, 0x29, 0x9d,
    0x25, 0x78, 0xa3, 0xd6, 0x90, 0xe5, 0xca, 0xf1, 0x03, 0xf5, 0x1f, 0xfe, 0xc8, 0xaf, 0xe6,
    0xd0, 0x27,
]);

/// `ComputeBudget111111111111111111111111111111`
pub const COMPUTE_BUDGET_PROGRAM: PublicKey = PublicKey::new([
    0x03, 0x06, 0x46, 0x6f, 0xe5, 0x21, 0x17, 0x32, 0xff, 0xec, 0xad, 0xba, 0x72, 0xc3, 0x9b,
    0xe7, 0xbc, 0x8c, 0xe5, 0xbb, 0xc5, 0xf7, 0x12, 0x6b, 0x2c, 0x43, 0x9b, 0x3a, 0x40, 0x00,
    0x00, 0x00,
]);

/// `SysvarRecentB1ockHashes11111111111111111111`
pub const RECENT_BLOCKHASHES_SYSVAR: PublicKey = PublicKey::new([
    0x06, 0xa7, 0xd5, 0x17, 0x19, 0x2c, 0x56, 0x8e, 0xe0, 0x8a, 0x84, 0x5f, 0x73, 0xd2, 0x97,
    0x88, 0xcf, 0x03, 0x5c, 0x31, 0x45, 0xb2, 0x1a, 0xb3, 0x44, 0xd8, 0x06, 0x2e, 0xa9, 0x40,
    0x00, 0x00,
]);

/// `SysvarRent111111111111111111111111111111111`
pub const RENT_SYSVAR: PublicKey = PublicKey::new([
    0x06, 0xa7, 0xd5, 0x17, 0x19, 0x2c, 0x5c, 0x51, 0x21, 0x8c, 0xc9, 0x4c, 0x3d, 0x4a, 0xf1,
    0x7f, 0x58, 0xda, 0xee, 0x08, 0x9b, 0xa1, 0xfd, 0x44, 0xe3, 0xdb, 0xd9, 0x8a, 0x00, 0x00,
    0x00, 0x00,
]);

/// The fee-paying authority for all wallet transactions.
/// `codeHy87wGD5oMRLG75qKqsSi1vWE3oxNyYmXo5F9YR`
pub const SUBSIDIZER: PublicKey = PublicKey::new([
    0x09, 0x2c, 0x0e, 0x16, 0xb8, 0xaa, 0x61, 0xef, 0x0c, 0xb9, 0x46, 0x41, 0x77, 0x76, 0x72,
    0x36, 0xff, 0x3c, 0x34, 0x7b, 0x52, 0x85, 0xa4, 0x2e, 0x28, 0xcd, 0x9a, 0x7c, 0x27, 0x3b,
    0x59, 0xee,
]);

/// The timelock program's time authority. Same key as the subsidizer in the
/// current deployment, kept separate because the on-chain roles differ.
pub const TIME_AUTHORITY: PublicKey = SUBSIDIZER;

/// The token mint all vaults hold.
/// `kinXdEcpDQeHPEuQnqmUgtYykqKGVFq6CeVX5iAHJq6`
pub const MINT: PublicKey = PublicKey::new([
    0x0b, 0x33, 0x38, 0xa0, 0xab, 0x2c, 0xc8, 0x41, 0xd5, 0xb0, 0x14, 0xbc, 0x6a, 0x3c, 0xf7,
    0x56, 0x29, 0x18, 0x74, 0xb3, 0x19, 0xc9, 0x51, 0x7d, 0x9b, 0xbf, 0xa9, 0xe4, 0xe9, 0x66,
    0x1e, 0xf9,
]);

/// App index stamped into transfer memos for attribution.
pub const APP_INDEX: u16 = 268;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_round_trip_to_base58() {
        let expectations = [
            (SYSTEM_PROGRAM, "11111111111111111111111111111111"),
            (TOKEN_PROGRAM, "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"),
            (
                ASSOCIATED_TOKEN_PROGRAM,
                "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL",
            ),
            (MEMO_PROGRAM, "Memo1UhkJRfHyvLMcVucJwxXeuD728EqVDDwQDxFMNo"),
            (TIMELOCK_PROGRAM, "time2Z2SCnn3qYg3ULKVtdkh8YmZ5jFdKicnA1W2YnJ"),
            (SPLITTER_PROGRAM, "spLit2eb13Tz93if6aJM136nUWki5PVUsoEjcUjwpwW"),
            (
                SWAP_VALIDATOR_PROGRAM,
                "sWvA66HNNvgamibZe88v3NN5nQwE8tp3KitfViFjukA",
            ),
            (
                COMPUTE_BUDGET_PROGRAM,
                "ComputeBudget111111111111111111111111111111",
            ),
            (
                RECENT_BLOCKHASHES_SYSVAR,
                "SysvarRecentB1ockHashes11111111111111111111",
            ),
            (RENT_SYSVAR, "SysvarRent111111111111111111111111111111111"),
            (SUBSIDIZER, "codeHy87wGD5oMRLG75qKqsSi1vWE3oxNyYmXo5F9YR"),
            (MINT, "kinXdEcpDQeHPEuQnqmUgtYykqKGVFq6CeVX5iAHJq6"),
        ];

        for (key, base58) in expectations {
            assert_eq!(key.to_base58(), base58);
            assert_eq!(PublicKey::from_base58(base58).unwrap(), key);
        }
    }
}
