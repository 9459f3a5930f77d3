//! Deployment configuration
//!
//! Network, contract name, dependency token addresses, owner selection and
//! the mnemonic source are all injected here instead of living as globals in
//! the deploy script. Files are TOML.

use std::path::{Path, PathBuf};

use perlin_core::{AccountIndex, Address, Mnemonic, PathTemplate};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::error::{DeployError, Result};

/// Environment variable holding the development mnemonic by default
pub const DEFAULT_MNEMONIC_ENV: &str = "DEV_MNEMONIC";

/// Contract deployed by this tool
pub const DEFAULT_CONTRACT: &str = "PerlinRoboAdvisorV1";

/// Kovan addresses used by the first advisor deployment
///
/// The `*_ADDRESS` byte constants must stay in sync with the strings.
pub mod kovan {
    use perlin_core::Address;

    pub const NETWORK: &str = "kovan";
    pub const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";
    pub const RDAI: &str = "0x261b45D85cCFeAbb11F022eBa346ee8D1cd488c0";
    pub const OWNER: &str = "0x02201cdA77BDaD815984460b38BC4BbDa5ebfA17";

    pub const DAI_ADDRESS: Address = Address::new([
        0x6b, 0x17, 0x54, 0x74, 0xe8, 0x90, 0x94, 0xc4, 0x4d, 0xa9, 0x8b, 0x95, 0x4e, 0xed, 0xea,
        0xc4, 0x95, 0x27, 0x1d, 0x0f,
    ]);
    pub const RDAI_ADDRESS: Address = Address::new([
        0x26, 0x1b, 0x45, 0xd8, 0x5c, 0xcf, 0xea, 0xbb, 0x11, 0xf0, 0x22, 0xeb, 0xa3, 0x46, 0xee,
        0x8d, 0x1c, 0xd4, 0x88, 0xc0,
    ]);
    pub const OWNER_ADDRESS: Address = Address::new([
        0x02, 0x20, 0x1c, 0xda, 0x77, 0xbd, 0xad, 0x81, 0x59, 0x84, 0x46, 0x0b, 0x38, 0xbc, 0x4b,
        0xbd, 0xa5, 0xeb, 0xfa, 0x17,
    ]);
}

/// Deployment configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Target network name (informational; no node connection is made)
    pub network: String,

    /// Contract artifact name
    #[serde(default = "default_contract")]
    pub contract: String,

    /// Dependency token addresses passed to the constructor
    pub tokens: TokenAddresses,

    /// How the owner address is chosen
    pub owner: OwnerSource,

    /// Where to read the mnemonic from when the owner is derived
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<MnemonicSource>,
}

/// Token contracts the advisor depends on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAddresses {
    /// DAI token
    #[serde(deserialize_with = "checked_address")]
    pub dai: Address,

    /// rDAI (redeemable DAI) token
    #[serde(deserialize_with = "checked_address")]
    pub rdai: Address,
}

/// Owner address selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum OwnerSource {
    /// Fixed address
    Literal {
        #[serde(deserialize_with = "checked_address")]
        address: Address,
    },

    /// Account derived from the configured mnemonic
    Derived {
        #[serde(default)]
        index: i64,
        #[serde(default)]
        path_template: PathTemplate,
    },
}

/// Where the mnemonic phrase comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MnemonicSource {
    /// Environment variable name
    Env(String),

    /// Plain-text file containing the phrase
    File(PathBuf),
}

impl MnemonicSource {
    /// Read and validate the mnemonic
    pub fn load(&self) -> Result<Mnemonic> {
        let phrase = Zeroizing::new(match self {
            MnemonicSource::Env(var) => std::env::var(var).map_err(|_| {
                DeployError::MnemonicUnavailable(format!(
                    "environment variable {} is not set",
                    var
                ))
            })?,
            MnemonicSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
                DeployError::MnemonicUnavailable(format!("{}: {}", path.display(), e))
            })?,
        });

        Ok(Mnemonic::parse(&phrase)?)
    }

    /// Human-readable description (never includes the phrase)
    pub fn describe(&self) -> String {
        match self {
            MnemonicSource::Env(var) => format!("env:{}", var),
            MnemonicSource::File(path) => format!("file:{}", path.display()),
        }
    }
}

impl Default for MnemonicSource {
    fn default() -> Self {
        MnemonicSource::Env(DEFAULT_MNEMONIC_ENV.to_string())
    }
}

impl DeployConfig {
    /// Kovan defaults with a literal owner
    pub fn kovan() -> Self {
        Self {
            network: kovan::NETWORK.to_string(),
            contract: DEFAULT_CONTRACT.to_string(),
            tokens: TokenAddresses {
                dai: kovan::DAI_ADDRESS,
                rdai: kovan::RDAI_ADDRESS,
            },
            owner: OwnerSource::Literal {
                address: kovan::OWNER_ADDRESS,
            },
            mnemonic: Some(MnemonicSource::default()),
        }
    }

    /// Parse from a TOML string and validate
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(
            path = %path.display(),
            network = %config.network,
            contract = %config.contract,
            "Loaded deployment config"
        );
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values that parse but cannot produce a sensible deployment
    pub fn validate(&self) -> Result<()> {
        if self.network.trim().is_empty() {
            return Err(DeployError::InvalidConfig("network is empty".to_string()));
        }
        if self.contract.trim().is_empty() {
            return Err(DeployError::InvalidConfig("contract is empty".to_string()));
        }
        if self.tokens.dai == self.tokens.rdai {
            return Err(DeployError::InvalidConfig(format!(
                "dai and rdai share address {}",
                self.tokens.dai
            )));
        }

        match &self.owner {
            OwnerSource::Literal { address } => {
                if address.as_bytes() == &[0u8; 20] {
                    return Err(DeployError::InvalidConfig(
                        "owner is the zero address".to_string(),
                    ));
                }
            }
            OwnerSource::Derived { index, .. } => {
                AccountIndex::new(*index)?;
            }
        }

        Ok(())
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self::kovan()
    }
}

fn default_contract() -> String {
    DEFAULT_CONTRACT.to_string()
}

/// Parse an address, warning when a mixed-case string fails EIP-55
///
/// Only the textual form can carry a bad checksum, so the check lives here
/// rather than in [`DeployConfig::validate`].
fn checked_address<'de, D>(deserializer: D) -> std::result::Result<Address, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let address: Address = s.parse().map_err(serde::de::Error::custom)?;
    if !Address::is_checksum_valid(&s) {
        warn!(
            given = %s,
            expected = %address,
            "Address checksum mismatch, check for typos"
        );
    }
    Ok(address)
}
