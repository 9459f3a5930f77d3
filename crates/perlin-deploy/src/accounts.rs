//! Account listings for operators

use std::fmt;

use perlin_core::{Address, DerivedAccount, DerivationPath};
use serde::Serialize;
use zeroize::Zeroizing;

/// One derived account as printed by the CLI
///
/// The private key is only present when the operator explicitly asked for it,
/// and is wiped when the record is dropped.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AccountRecord {
    pub index: u32,
    pub path: DerivationPath,
    pub address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<Zeroizing<String>>,
}

impl AccountRecord {
    pub fn new(account: &DerivedAccount, reveal_private_key: bool) -> Self {
        Self {
            index: account.index().get(),
            path: account.path().clone(),
            address: account.address(),
            private_key: reveal_private_key
                .then(|| Zeroizing::new(account.private_key_hex().to_string())),
        }
    }
}

impl fmt::Debug for AccountRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountRecord")
            .field("index", &self.index)
            .field("path", &self.path)
            .field("address", &self.address)
            .field(
                "private_key",
                &self.private_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perlin_core::PathTemplate;

    const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon abandon abandon about";
    const TEST_PRIVATE_KEY: &str =
        "1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727";

    #[test]
    fn test_private_key_hidden_by_default() {
        let account = perlin_core::derive(TEST_MNEMONIC, 0, PathTemplate::ETHEREUM).unwrap();
        let record = AccountRecord::new(&account, false);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("private_key"));
        assert!(json.contains("0x9858EfFD232B4033E47d90003D41EC34EcaEda94"));
    }

    #[test]
    fn test_private_key_revealed_on_request() {
        let account = perlin_core::derive(TEST_MNEMONIC, 0, PathTemplate::ETHEREUM).unwrap();
        let record = AccountRecord::new(&account, true);
        assert_eq!(
            record.private_key.as_ref().map(|key| key.as_str()),
            Some(TEST_PRIVATE_KEY)
        );

        // Serialized as a plain string field
        let value: serde_json::Value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["private_key"], TEST_PRIVATE_KEY);
    }

    #[test]
    fn test_debug_redacts_revealed_key() {
        let account = perlin_core::derive(TEST_MNEMONIC, 0, PathTemplate::ETHEREUM).unwrap();
        let record = AccountRecord::new(&account, true);
        let dbg = format!("{:?}", record);
        assert!(dbg.contains("[REDACTED]"));
        assert!(!dbg.contains(TEST_PRIVATE_KEY));
    }
}
