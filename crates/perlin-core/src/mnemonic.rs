//! BIP-39 mnemonic phrases and seeds
//!
//! Wordlist and checksum validation are delegated to the `bip39` crate. The
//! phrase is normalised before validation (trimmed, whitespace collapsed,
//! lowercased) so that phrases copied from config files or environment
//! variables validate the same way wallet tooling does.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{CoreError, Result};

/// Length of a BIP-39 seed in bytes
pub const SEED_LEN: usize = 64;

/// A validated BIP-39 mnemonic (English wordlist)
///
/// Treated as a secret: `Debug` never prints the words and the normalised
/// phrase is zeroized on drop.
#[derive(Clone)]
pub struct Mnemonic {
    inner: bip39::Mnemonic,
    phrase: Zeroizing<String>,
}

impl Mnemonic {
    /// Parse and validate a mnemonic phrase
    pub fn parse(phrase: &str) -> Result<Self> {
        let normalized = Zeroizing::new(normalize_phrase(phrase));
        if normalized.is_empty() {
            return Err(CoreError::InvalidMnemonic("empty phrase".to_string()));
        }

        let inner = bip39::Mnemonic::parse_in_normalized(bip39::Language::English, &normalized)
            .map_err(|e| CoreError::InvalidMnemonic(e.to_string()))?;

        Ok(Self {
            inner,
            phrase: normalized,
        })
    }

    /// Number of words in the phrase
    pub fn word_count(&self) -> usize {
        self.phrase.split(' ').count()
    }

    /// Normalised phrase (single-space separated, lowercase)
    ///
    /// Callers must treat the returned value as a secret.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Stretch the mnemonic into a 64-byte seed
    ///
    /// PBKDF2-HMAC-SHA512 with 2048 rounds and salt `"mnemonic" || passphrase`.
    /// The passphrase is used as given; non-ASCII passphrases must already be
    /// NFKD-normalised.
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        Seed(self.inner.to_seed_normalized(passphrase))
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mnemonic")
            .field("words", &self.word_count())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Mnemonic {
    fn eq(&self, other: &Self) -> bool {
        *self.phrase == *other.phrase
    }
}

impl Eq for Mnemonic {}

impl std::str::FromStr for Mnemonic {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// BIP-39 seed, root input to BIP-32 master key generation
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    /// Wrap raw seed bytes
    pub fn new(bytes: [u8; SEED_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the seed bytes
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for Seed {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed([REDACTED])")
    }
}

fn normalize_phrase(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
