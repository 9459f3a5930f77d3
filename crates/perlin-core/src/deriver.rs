//! HD account deriver
//!
//! Turns a mnemonic and an account index into an (address, private key) pair:
//! mnemonic → seed → master key → path from the template → address.
//! Stateless and side-effect free; safe to share across threads.

use std::fmt;

use tracing::debug;
use zeroize::Zeroizing;

use crate::address::Address;
use crate::error::Result;
use crate::hd::ExtendedPrivateKey;
use crate::mnemonic::Mnemonic;
use crate::path::{AccountIndex, DerivationPath, PathTemplate};

/// Key pair derived for one account
#[derive(Clone)]
pub struct DerivedAccount {
    index: AccountIndex,
    path: DerivationPath,
    address: Address,
    private_key: Zeroizing<String>,
}

impl DerivedAccount {
    pub fn index(&self) -> AccountIndex {
        self.index
    }

    pub fn path(&self) -> &DerivationPath {
        &self.path
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Private key as lowercase hex without `0x`
    ///
    /// Secret: callers must not log or persist it.
    pub fn private_key_hex(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for DerivedAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedAccount")
            .field("index", &self.index)
            .field("path", &self.path.to_string())
            .field("address", &self.address.to_checksum())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// Derives accounts along a fixed path template
#[derive(Clone, Default)]
pub struct HdAccountDeriver {
    template: PathTemplate,
    passphrase: Zeroizing<String>,
}

impl fmt::Debug for HdAccountDeriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HdAccountDeriver")
            .field("template", &self.template.as_str())
            .field("passphrase", &!self.passphrase.is_empty())
            .finish()
    }
}

impl HdAccountDeriver {
    /// Create a deriver for the given path template
    pub fn new(template: PathTemplate) -> Self {
        Self {
            template,
            passphrase: Zeroizing::new(String::new()),
        }
    }

    /// Use a BIP-39 passphrase when stretching the mnemonic (default: empty)
    pub fn with_passphrase(mut self, passphrase: &str) -> Self {
        self.passphrase = Zeroizing::new(passphrase.to_string());
        self
    }

    pub fn template(&self) -> &PathTemplate {
        &self.template
    }

    /// Derive the account at `account_index`
    ///
    /// Fails with `InvalidDerivationIndex` unless 0 <= index < 2^31.
    pub fn derive(&self, mnemonic: &Mnemonic, account_index: i64) -> Result<DerivedAccount> {
        let index = AccountIndex::new(account_index)?;
        let master = ExtendedPrivateKey::from_seed(&mnemonic.to_seed(&self.passphrase))?;
        self.derive_from_master(&master, index)
    }

    /// Derive accounts `start..start + count`, stretching the mnemonic once
    pub fn derive_range(
        &self,
        mnemonic: &Mnemonic,
        start: i64,
        count: u32,
    ) -> Result<Vec<DerivedAccount>> {
        // Validate both ends before the expensive seed stretch
        AccountIndex::new(start)?;
        if count > 0 {
            AccountIndex::new(start + i64::from(count) - 1)?;
        }

        let master = ExtendedPrivateKey::from_seed(&mnemonic.to_seed(&self.passphrase))?;
        (start..start + i64::from(count))
            .map(|i| self.derive_from_master(&master, AccountIndex::new(i)?))
            .collect()
    }

    fn derive_from_master(
        &self,
        master: &ExtendedPrivateKey,
        index: AccountIndex,
    ) -> Result<DerivedAccount> {
        let path = self.template.resolve(index);
        debug!(index = index.get(), path = %path, "Deriving account");

        let key = master.derive_path(&path)?;
        Ok(DerivedAccount {
            index,
            address: key.address(),
            private_key: key.private_key_hex(),
            path,
        })
    }
}

/// Derive the account at `account_index` along `path_template`
///
/// Convenience wrapper validating all three inputs:
/// `InvalidMnemonic`, `UnsupportedPathSegment`, then `InvalidDerivationIndex`.
pub fn derive(mnemonic: &str, account_index: i64, path_template: &str) -> Result<DerivedAccount> {
    let mnemonic = Mnemonic::parse(mnemonic)?;
    let template = PathTemplate::parse(path_template)?;
    HdAccountDeriver::new(template).derive(&mnemonic, account_index)
}
