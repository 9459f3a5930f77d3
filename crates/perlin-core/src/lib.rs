//! Perlin Core - HD account derivation for contract deployment
//!
//! This crate turns a BIP-39 mnemonic and an account index into an Ethereum
//! address and private key, following the BIP-32/BIP-44 derivation used by
//! common wallet tooling (`m/44'/60'/0'/0/{index}`).
//!
//! ```no_run
//! let account = perlin_core::derive(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     0,
//!     perlin_core::PathTemplate::ETHEREUM,
//! )?;
//! println!("{}", account.address());
//! # Ok::<(), perlin_core::CoreError>(())
//! ```

pub mod address;
pub mod deriver;
pub mod error;
pub mod hd;
pub mod mnemonic;
pub mod path;

pub use address::Address;
pub use deriver::{derive, DerivedAccount, HdAccountDeriver};
pub use error::{CoreError, Result};
pub use hd::ExtendedPrivateKey;
pub use mnemonic::{Mnemonic, Seed};
pub use path::{AccountIndex, ChildNumber, DerivationPath, PathTemplate, HARDENED_OFFSET};

/// BIP-44 purpose field
pub const BIP44_PURPOSE: u32 = 44;

/// SLIP-44 coin type for Ethereum
pub const ETHEREUM_COIN_TYPE: u32 = 60;
