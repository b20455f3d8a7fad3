//! BIP-39 mnemonic phrases.

use bip39::{Language, Mnemonic};
use rand::RngCore;
use zeroize::Zeroize;

use crate::error::WalletError;

/// Number of words in a generated phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseLength {
    Twelve,
    TwentyFour,
}

/// Generate a new BIP-39 mnemonic with the given word count.
pub fn generate_mnemonic(length: PhraseLength) -> Result<String, WalletError> {
    let entropy_len = match length {
        PhraseLength::Twelve => 16,
        PhraseLength::TwentyFour => 32,
    };
    let mut entropy = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut entropy[..entropy_len]);
    let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy[..entropy_len])
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
    entropy.zeroize();
    Ok(mnemonic.to_string())
}

/// Validate a mnemonic phrase (word list membership + checksum).
pub fn validate_mnemonic(phrase: &str) -> bool {
    Mnemonic::parse_in_normalized(Language::English, phrase).is_ok()
}

/// Derive the 64-byte BIP-39 seed from a phrase and optional password.
///
/// Caller must zeroize the returned seed when done with it.
pub fn mnemonic_to_seed(phrase: &str, password: &str) -> Result<[u8; 64], WalletError> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_seed(password))
}

/// Word list for autocomplete.
pub fn word_list() -> &'static [&'static str] {
    Language::English.word_list()
}

/// A validated mnemonic phrase.
#[derive(Clone)]
pub struct MnemonicPhrase {
    mnemonic: Mnemonic,
}

impl PartialEq for MnemonicPhrase {
    fn eq(&self, other: &Self) -> bool {
        self.phrase() == other.phrase()
    }
}

impl Eq for MnemonicPhrase {}

impl MnemonicPhrase {
    pub fn new(phrase: &str) -> Result<Self, WalletError> {
        let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
            .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
        Ok(MnemonicPhrase { mnemonic })
    }

    pub fn words(&self) -> Vec<&'static str> {
        self.mnemonic.words().collect()
    }

    pub fn phrase(&self) -> String {
        self.mnemonic.to_string()
    }

    pub fn to_seed(&self, password: &str) -> [u8; 64] {
        self.mnemonic.to_seed(password)
    }
}

impl std::fmt::Debug for MnemonicPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MnemonicPhrase({} words)", self.mnemonic.word_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PHRASE: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn generate_twelve_words() {
        let phrase = generate_mnemonic(PhraseLength::Twelve).unwrap();
        assert_eq!(phrase.split_whitespace().count(), 12);
        assert!(validate_mnemonic(&phrase));
    }

    #[test]
    fn generate_twenty_four_words() {
        let phrase = generate_mnemonic(PhraseLength::TwentyFour).unwrap();
        assert_eq!(phrase.split_whitespace().count(), 24);
        assert!(validate_mnemonic(&phrase));
    }

    #[test]
    fn validate_rejects_garbage() {
        assert!(!validate_mnemonic("not a real phrase at all"));
        assert!(!validate_mnemonic(""));
    }

    #[test]
    fn seed_is_deterministic() {
        let a = mnemonic_to_seed(TEST_PHRASE, "").unwrap();
        let b = mnemonic_to_seed(TEST_PHRASE, "").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn password_changes_seed() {
        let plain = mnemonic_to_seed(TEST_PHRASE, "").unwrap();
        let salted = mnemonic_to_seed(TEST_PHRASE, "password").unwrap();
        assert_ne!(plain, salted);
    }

    /// Trezor reference vectors (password "TREZOR").
    #[test]
    fn trezor_vectors() {
        let vectors = [
            (
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
                "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04",
            ),
            (
                "legal winner thank year wave sausage worth useful legal winner thank yellow",
                "2e8905819b8723fe2c1d161860e5ee1830318dbf49a83bd451cfb8440c28bd6fa457fe1296106559a3c80937a1c1069be3a3a5bd381ee6260e8d9739fce1f607",
            ),
            (
                "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
                "ac27495480225222079d7be181583751e86f571027b0497b5b5d11218e0a8a13332572917f0f8e5a589620c6f15b11c61dee327651a14c34e18231052e48c069",
            ),
            (
                "vessel ladder alter error federal sibling chat ability sun glass valve picture",
                "2aaa9242daafcee6aa9d7269f17d4efe271e1b9a529178d7dc139cd18747090bf9d60295d0ce74309a78852a9caadf0af48aae1c6253839624076224374bc63f",
            ),
        ];

        for (phrase, seed_hex) in vectors {
            let seed = mnemonic_to_seed(phrase, "TREZOR").unwrap();
            assert_eq!(hex::encode(seed), seed_hex, "vector {phrase:?}");
        }
    }

    #[test]
    fn phrase_wrapper_validates() {
        assert!(MnemonicPhrase::new(TEST_PHRASE).is_ok());
        assert!(MnemonicPhrase::new("twelve bogus words that fail the checksum and word list test").is_err());
    }

    #[test]
    fn phrase_wrapper_seed_matches_free_function() {
        let wrapper = MnemonicPhrase::new(TEST_PHRASE).unwrap();
        assert_eq!(wrapper.to_seed(""), mnemonic_to_seed(TEST_PHRASE, "").unwrap());
    }

    #[test]
    fn word_list_has_2048_entries() {
        assert_eq!(word_list().len(), 2048);
    }
}
