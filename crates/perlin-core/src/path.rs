//! Derivation paths and path templates
//!
//! Paths use the usual BIP-32 text form: `m/44'/60'/0'/0/0`. A segment suffixed
//! with `'` (or `h`) is hardened. A [`PathTemplate`] is a path with exactly one
//! `{index}` slot that is filled with an [`AccountIndex`] per request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};

/// Offset added to an index for hardened derivation
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// Maximum path depth (BIP-32 serialises depth as a single byte)
pub const MAX_DEPTH: usize = 255;

/// Placeholder substituted with the account index in a [`PathTemplate`]
pub const INDEX_SLOT: &str = "{index}";

/// One segment of a derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildNumber {
    index: u32,
    hardened: bool,
}

impl ChildNumber {
    /// Create a normal (non-hardened) child number
    pub fn normal(index: u32) -> Result<Self> {
        Self::new(index, false)
    }

    /// Create a hardened child number
    pub fn hardened(index: u32) -> Result<Self> {
        Self::new(index, true)
    }

    fn new(index: u32, hardened: bool) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            return Err(CoreError::UnsupportedPathSegment(format!(
                "index {} out of range",
                index
            )));
        }
        Ok(Self { index, hardened })
    }

    /// Index without the hardened offset
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// Value fed to child key derivation (adds 2^31 for hardened)
    pub fn value(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for ChildNumber {
    type Err = CoreError;

    fn from_str(segment: &str) -> Result<Self> {
        let (digits, hardened) = match segment.strip_suffix('\'').or_else(|| segment.strip_suffix('h')) {
            Some(rest) => (rest, true),
            None => (segment, false),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::UnsupportedPathSegment(segment.to_string()));
        }

        let index: u32 = digits
            .parse()
            .map_err(|_| CoreError::UnsupportedPathSegment(segment.to_string()))?;

        Self::new(index, hardened)
            .map_err(|_| CoreError::UnsupportedPathSegment(segment.to_string()))
    }
}

/// Ordered list of child numbers identifying a node in the key tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath {
    components: Vec<ChildNumber>,
}

impl DerivationPath {
    /// Create a path from components
    pub fn new(components: Vec<ChildNumber>) -> Result<Self> {
        if components.len() > MAX_DEPTH {
            return Err(CoreError::UnsupportedPathSegment(format!(
                "path depth {} exceeds {}",
                components.len(),
                MAX_DEPTH
            )));
        }
        Ok(Self { components })
    }

    /// BIP-44 Ethereum path: m/44'/60'/0'/0/index
    pub fn ethereum(index: AccountIndex) -> Self {
        Self {
            components: vec![
                ChildNumber { index: 44, hardened: true }, // purpose
                ChildNumber { index: 60, hardened: true }, // coin type (ETH)
                ChildNumber { index: 0, hardened: true },  // account
                ChildNumber { index: 0, hardened: false }, // change
                ChildNumber { index: index.get(), hardened: false },
            ],
        }
    }

    pub fn components(&self) -> &[ChildNumber] {
        &self.components
    }

    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// True for the bare master path `m`
    pub fn is_master(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for component in &self.components {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = CoreError;

    fn from_str(path: &str) -> Result<Self> {
        let mut parts = path.trim().split('/');

        match parts.next() {
            Some("m") | Some("M") => {}
            other => {
                return Err(CoreError::UnsupportedPathSegment(format!(
                    "path must start with 'm', got '{}'",
                    other.unwrap_or_default()
                )))
            }
        }

        let components = parts
            .map(ChildNumber::from_str)
            .collect::<Result<Vec<_>>>()?;

        Self::new(components)
    }
}

impl Serialize for DerivationPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Validated account index: 0 <= index < 2^31
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AccountIndex(u32);

impl AccountIndex {
    /// Validate a raw index
    pub fn new(index: i64) -> Result<Self> {
        if (0..HARDENED_OFFSET as i64).contains(&index) {
            Ok(Self(index as u32))
        } else {
            Err(CoreError::InvalidDerivationIndex(index))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for AccountIndex {
    type Error = CoreError;

    fn try_from(index: i64) -> Result<Self> {
        Self::new(index)
    }
}

impl TryFrom<u32> for AccountIndex {
    type Error = CoreError;

    fn try_from(index: u32) -> Result<Self> {
        Self::new(i64::from(index))
    }
}

impl fmt::Display for AccountIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derivation path with one `{index}` substitution slot
///
/// The slot must occupy a whole segment, optionally hardened:
/// `m/44'/60'/0'/0/{index}` or `m/44'/60'/{index}'/0/0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    template: String,
    fixed: Vec<Option<ChildNumber>>,
    slot_hardened: bool,
}

impl PathTemplate {
    /// Template used for Ethereum deployer accounts
    pub const ETHEREUM: &'static str = "m/44'/60'/0'/0/{index}";

    /// Parse a template string
    pub fn parse(template: &str) -> Result<Self> {
        let template = template.trim();
        let mut parts = template.split('/');

        match parts.next() {
            Some("m") | Some("M") => {}
            _ => {
                return Err(CoreError::UnsupportedPathSegment(format!(
                    "template must start with 'm': {}",
                    template
                )))
            }
        }

        let mut fixed = Vec::new();
        let mut slot = None;

        for segment in parts {
            let slot_here = match segment {
                s if s == INDEX_SLOT => Some(false),
                s if s.strip_suffix('\'').or_else(|| s.strip_suffix('h')) == Some(INDEX_SLOT) => {
                    Some(true)
                }
                s if s.contains('{') || s.contains('}') => {
                    return Err(CoreError::UnsupportedPathSegment(s.to_string()))
                }
                _ => None,
            };

            match slot_here {
                Some(hardened) => {
                    if slot.is_some() {
                        return Err(CoreError::UnsupportedPathSegment(format!(
                            "template has more than one {} slot: {}",
                            INDEX_SLOT, template
                        )));
                    }
                    slot = Some(hardened);
                    fixed.push(None);
                }
                None => fixed.push(Some(segment.parse::<ChildNumber>()?)),
            }
        }

        let slot_hardened = slot.ok_or_else(|| {
            CoreError::UnsupportedPathSegment(format!(
                "template has no {} slot: {}",
                INDEX_SLOT, template
            ))
        })?;

        if fixed.len() > MAX_DEPTH {
            return Err(CoreError::UnsupportedPathSegment(format!(
                "template depth {} exceeds {}",
                fixed.len(),
                MAX_DEPTH
            )));
        }

        Ok(Self {
            template: template.to_string(),
            fixed,
            slot_hardened,
        })
    }

    /// Substitute the slot, producing a concrete path
    pub fn resolve(&self, index: AccountIndex) -> DerivationPath {
        let components = self
            .fixed
            .iter()
            .map(|component| {
                component.unwrap_or(ChildNumber {
                    index: index.get(),
                    hardened: self.slot_hardened,
                })
            })
            .collect();

        DerivationPath { components }
    }

    /// Whether the substituted segment is hardened
    pub fn slot_is_hardened(&self) -> bool {
        self.slot_hardened
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl Default for PathTemplate {
    fn default() -> Self {
        let hardened = |index| Some(ChildNumber { index, hardened: true });
        Self {
            template: Self::ETHEREUM.to_string(),
            fixed: vec![
                hardened(44),
                hardened(60),
                hardened(0),
                Some(ChildNumber { index: 0, hardened: false }),
                None,
            ],
            slot_hardened: false,
        }
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

impl FromStr for PathTemplate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for PathTemplate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.template)
    }
}

impl<'de> Deserialize<'de> for PathTemplate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
