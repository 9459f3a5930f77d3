//! Deployment plan resolution
//!
//! Resolves a [`DeployConfig`] into the concrete constructor arguments for
//! the advisor contract. Nothing is signed or sent; the plan is handed to the
//! deployment framework (or an operator) as JSON.

use perlin_core::{Address, DerivationPath, HdAccountDeriver, Mnemonic};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{DeployConfig, OwnerSource};
use crate::error::{DeployError, Result};

/// Constructor arguments, in constructor order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorArgs {
    pub owner: Address,
    pub dai: Address,
    pub rdai: Address,
}

impl ConstructorArgs {
    /// Positional arguments: owner, dai, rdai
    pub fn to_vec(&self) -> Vec<Address> {
        vec![self.owner, self.dai, self.rdai]
    }
}

/// How the owner address was obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OwnerOrigin {
    Literal,
    Derived { index: u32, path: DerivationPath },
}

/// Fully resolved deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    pub network: String,
    pub contract: String,
    pub constructor_args: ConstructorArgs,
    pub owner_origin: OwnerOrigin,
}

impl DeploymentPlan {
    /// Resolve a plan, loading the mnemonic only if the owner is derived
    pub fn resolve(config: &DeployConfig) -> Result<Self> {
        match &config.owner {
            OwnerSource::Literal { .. } => Self::build(config, None),
            OwnerSource::Derived { .. } => {
                let source = config.mnemonic.as_ref().ok_or_else(|| {
                    DeployError::MnemonicUnavailable(
                        "owner is derived but no [mnemonic] source is configured".to_string(),
                    )
                })?;
                info!(source = %source.describe(), "Loading mnemonic for owner derivation");
                let mnemonic = source.load()?;
                Self::build(config, Some(&mnemonic))
            }
        }
    }

    /// Resolve a plan with an already loaded mnemonic
    pub fn resolve_with_mnemonic(config: &DeployConfig, mnemonic: &Mnemonic) -> Result<Self> {
        Self::build(config, Some(mnemonic))
    }

    fn build(config: &DeployConfig, mnemonic: Option<&Mnemonic>) -> Result<Self> {
        config.validate()?;

        let (owner, owner_origin) = match &config.owner {
            OwnerSource::Literal { address } => (*address, OwnerOrigin::Literal),
            OwnerSource::Derived {
                index,
                path_template,
            } => {
                let mnemonic = mnemonic.ok_or_else(|| {
                    DeployError::MnemonicUnavailable("no mnemonic supplied".to_string())
                })?;
                let account = HdAccountDeriver::new(path_template.clone()).derive(mnemonic, *index)?;
                (
                    account.address(),
                    OwnerOrigin::Derived {
                        index: account.index().get(),
                        path: account.path().clone(),
                    },
                )
            }
        };

        let plan = Self {
            network: config.network.clone(),
            contract: config.contract.clone(),
            constructor_args: ConstructorArgs {
                owner,
                dai: config.tokens.dai,
                rdai: config.tokens.rdai,
            },
            owner_origin,
        };

        info!("{}", plan.summary());
        Ok(plan)
    }

    /// One-line operator summary
    pub fn summary(&self) -> String {
        let origin = match &self.owner_origin {
            OwnerOrigin::Literal => "literal".to_string(),
            OwnerOrigin::Derived { path, .. } => format!("derived at {}", path),
        };
        format!(
            "{} on {}: owner {} ({}), dai {}, rdai {}",
            self.contract,
            self.network,
            self.constructor_args.owner,
            origin,
            self.constructor_args.dai,
            self.constructor_args.rdai
        )
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
