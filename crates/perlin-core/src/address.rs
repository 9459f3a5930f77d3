//! Ethereum addresses with EIP-55 checksum encoding

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha3::{Digest, Keccak256};

use crate::error::{CoreError, Result};

/// 20-byte account address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Create an address from raw bytes
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Address of an uncompressed SEC1 public key (65 bytes, 0x04 prefix)
    ///
    /// Last 20 bytes of Keccak-256 over the 64-byte X || Y encoding.
    pub fn from_public_key(uncompressed: &[u8; 65]) -> Self {
        let hash = Keccak256::digest(&uncompressed[1..]);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash[12..]);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Lowercase hex with `0x` prefix
    pub fn to_lower_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// EIP-55 mixed-case checksum encoding with `0x` prefix
    pub fn to_checksum(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Whether a hex address string carries a valid EIP-55 checksum
    ///
    /// All-lowercase and all-uppercase strings carry no checksum and are
    /// reported valid; malformed strings are reported invalid.
    pub fn is_checksum_valid(s: &str) -> bool {
        let Ok(address) = s.parse::<Address>() else {
            return false;
        };
        let body = strip_prefix(s.trim());
        let has_lower = body.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = body.chars().any(|c| c.is_ascii_uppercase());
        if !(has_lower && has_upper) {
            return true;
        }
        address.to_checksum()[2..] == *body
    }
}

fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_checksum())
    }
}

impl FromStr for Address {
    type Err = CoreError;

    /// Parse a `0x`-prefixed 40-digit hex address, any case
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| CoreError::InvalidAddress(format!("missing 0x prefix: {}", s)))?;

        if body.len() != 40 {
            return Err(CoreError::InvalidAddress(format!(
                "expected 40 hex digits, got {}: {}",
                body.len(),
                s
            )));
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(body, &mut bytes)
            .map_err(|e| CoreError::InvalidAddress(format!("{}: {}", e, s)))?;
        Ok(Self(bytes))
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_checksum())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // EIP-55 reference addresses
    const CHECKSUMMED: [&str; 4] = [
        "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
    ];

    #[test]
    fn test_checksum_encoding() {
        for expected in CHECKSUMMED {
            let address: Address = expected.to_lowercase().parse().unwrap();
            assert_eq!(address.to_checksum(), expected);
            assert_eq!(address.to_string(), expected);
        }
    }

    #[test]
    fn test_checksum_validation() {
        for s in CHECKSUMMED {
            assert!(Address::is_checksum_valid(s));
            assert!(Address::is_checksum_valid(&s.to_lowercase()));
        }
        // Flip the case of one letter
        assert!(!Address::is_checksum_valid(
            "0x5AAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        ));
        assert!(!Address::is_checksum_valid("0x1234"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse::<Address>(),
            Err(CoreError::InvalidAddress(_))
        ));
        assert!(matches!(
            "0x5aAeb6053F".parse::<Address>(),
            Err(CoreError::InvalidAddress(_))
        ));
        assert!(matches!(
            "0xzzAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse::<Address>(),
            Err(CoreError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_lower_hex() {
        let address: Address = CHECKSUMMED[0].parse().unwrap();
        assert_eq!(address.to_lower_hex(), CHECKSUMMED[0].to_lowercase());
    }

    #[test]
    fn test_serde_roundtrip() {
        let address: Address = CHECKSUMMED[1].parse().unwrap();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", CHECKSUMMED[1]));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
