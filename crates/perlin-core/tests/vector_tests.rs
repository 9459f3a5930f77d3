//! Known-vector tests for HD account derivation
//!
//! Reference values are the widely published results for the BIP-39 test
//! mnemonic derived along the BIP-44 Ethereum path.

use perlin_core::{derive, CoreError, HdAccountDeriver, Mnemonic, PathTemplate};

const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
                             abandon abandon abandon abandon abandon about";

#[test]
fn test_reference_account_zero() {
    let account = derive(TEST_MNEMONIC, 0, PathTemplate::ETHEREUM).unwrap();

    assert_eq!(account.path().to_string(), "m/44'/60'/0'/0/0");
    assert_eq!(
        account.address().to_string(),
        "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
    );
    assert_eq!(
        account.private_key_hex(),
        "1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727"
    );
}

#[test]
fn test_reference_account_one() {
    let account = derive(TEST_MNEMONIC, 1, PathTemplate::ETHEREUM).unwrap();

    assert_eq!(account.path().to_string(), "m/44'/60'/0'/0/1");
    assert_eq!(
        account.address().to_string(),
        "0x6Fac4D18c912343BF86fa7049364Dd4E424Ab9C0"
    );
}

#[test]
fn test_slot_substitution_yields_distinct_pairs() {
    let mnemonic = Mnemonic::parse(TEST_MNEMONIC).unwrap();
    let deriver = HdAccountDeriver::default();

    let first = deriver.derive(&mnemonic, 0).unwrap();
    let second = deriver.derive(&mnemonic, 1).unwrap();

    assert_ne!(first.address(), second.address());
    assert_ne!(first.private_key_hex(), second.private_key_hex());
    assert_eq!(first.private_key_hex().len(), 64);
    assert_eq!(second.private_key_hex().len(), 64);
}

#[test]
fn test_altered_checksum_word_is_rejected() {
    // Same entropy bits as "about", different checksum bits
    let altered = TEST_MNEMONIC.replace("about", "able");
    let err = derive(&altered, 0, PathTemplate::ETHEREUM).unwrap_err();
    assert!(matches!(err, CoreError::InvalidMnemonic(_)), "{:?}", err);
}

#[test]
fn test_index_out_of_range() {
    assert_eq!(
        derive(TEST_MNEMONIC, -1, PathTemplate::ETHEREUM).unwrap_err(),
        CoreError::InvalidDerivationIndex(-1)
    );
    assert_eq!(
        derive(TEST_MNEMONIC, 1 << 31, PathTemplate::ETHEREUM).unwrap_err(),
        CoreError::InvalidDerivationIndex(1 << 31)
    );
    assert!(derive(TEST_MNEMONIC, (1 << 31) - 1, PathTemplate::ETHEREUM).is_ok());
}

#[test]
fn test_malformed_template() {
    for template in ["m/44'/60'/0'/0/x", "44'/60'/0'/0/{index}", "m/44'/60'/0'/0"] {
        let err = derive(TEST_MNEMONIC, 0, template).unwrap_err();
        assert!(
            matches!(err, CoreError::UnsupportedPathSegment(_)),
            "{}: {:?}",
            template,
            err
        );
    }
}

#[test]
fn test_hardened_slot_differs_from_normal() {
    let normal = derive(TEST_MNEMONIC, 0, "m/44'/60'/0'/0/{index}").unwrap();
    let hardened = derive(TEST_MNEMONIC, 0, "m/44'/60'/0'/0/{index}'").unwrap();
    assert_ne!(normal.address(), hardened.address());
    assert_eq!(hardened.path().to_string(), "m/44'/60'/0'/0/0'");
}
