//! Error types for HD account derivation

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while deriving accounts
///
/// Every variant is terminal for the call that produced it: the inputs are
/// wrong, and retrying with the same inputs yields the same error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Phrase is not a valid BIP-39 mnemonic (unknown word, bad word count, checksum)
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Account index outside 0..2^31
    #[error("Invalid derivation index: {0} (must be in 0..2147483648)")]
    InvalidDerivationIndex(i64),

    /// A derivation path or path template segment could not be parsed or applied
    #[error("Unsupported path segment: {0}")]
    UnsupportedPathSegment(String),

    /// Child key derivation produced an invalid key
    #[error("Key derivation failed: {0}")]
    KeyDerivation(String),

    /// Malformed hex address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
