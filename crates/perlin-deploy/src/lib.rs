//! Perlin Deploy - deployment planning for PerlinRoboAdvisorV1
//!
//! This crate provides the configuration side of the advisor deployment:
//! - Loading network, token and owner settings from TOML
//! - Reading the deployer mnemonic from an environment variable or file
//! - Resolving the owner (literal or HD-derived) into constructor arguments
//!
//! Compiling, signing and broadcasting are left to the deployment framework.

pub mod accounts;
pub mod config;
pub mod error;
pub mod plan;

pub use accounts::AccountRecord;
pub use config::{DeployConfig, MnemonicSource, OwnerSource, TokenAddresses};
pub use error::{DeployError, Result};
pub use plan::{ConstructorArgs, DeploymentPlan, OwnerOrigin};
