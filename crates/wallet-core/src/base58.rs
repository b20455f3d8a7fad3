//! Base58 string conversion for all public identifiers.
//!
//! The alphabet is the standard Bitcoin one (no `0 O I l`), provided by the
//! `bs58` crate. Leading zero bytes map one-to-one to leading `'1'`
//! characters. Decoding a string with any character outside the alphabet
//! returns an empty vector — callers treat empty as "invalid", never as a
//! zero-length value.

/// Encode arbitrary bytes as a Base58 string.
pub fn from_bytes(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decode a Base58 string into bytes.
///
/// Returns an empty vector if the string contains characters outside the
/// alphabet.
pub fn to_bytes(string: &str) -> Vec<u8> {
    bs58::decode(string).into_vec().unwrap_or_default()
}
