//! End-to-end workflow tests for deployment planning
//!
//! These tests go from a config file on disk through mnemonic loading and
//! owner derivation to the plan JSON handed to the deployment framework.

use std::fs;

use perlin_core::{Address, HdAccountDeriver, Mnemonic, PathTemplate};
use perlin_deploy::{
    config::kovan, DeployConfig, DeployError, DeploymentPlan, MnemonicSource, OwnerOrigin,
    OwnerSource,
};

const TEST_MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon \
                             abandon abandon abandon abandon abandon about";

#[test]
fn test_derived_owner_workflow() {
    let dir = tempfile::tempdir().unwrap();

    // ==========================================
    // STEP 1: Operator stores the mnemonic and writes a config
    // ==========================================
    let mnemonic_path = dir.path().join("DEV_MNEMONIC");
    fs::write(&mnemonic_path, format!("{}\n", TEST_MNEMONIC)).unwrap();

    let config_path = dir.path().join("deploy.toml");
    let config = DeployConfig {
        owner: OwnerSource::Derived {
            index: 0,
            path_template: PathTemplate::default(),
        },
        mnemonic: Some(MnemonicSource::File(mnemonic_path.clone())),
        ..DeployConfig::kovan()
    };
    config.save(&config_path).unwrap();

    // ==========================================
    // STEP 2: Load and resolve
    // ==========================================
    let loaded = DeployConfig::load(&config_path).unwrap();
    assert_eq!(loaded, config);

    let plan = DeploymentPlan::resolve(&loaded).unwrap();
    assert_eq!(
        plan.constructor_args.owner.to_string(),
        "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
    );
    assert_eq!(plan.constructor_args.dai.to_string(), kovan::DAI);
    assert_eq!(plan.constructor_args.rdai.to_string(), kovan::RDAI);

    // ==========================================
    // STEP 3: Owner matches what the deriver reports for the same index
    // ==========================================
    let mnemonic = Mnemonic::parse(&fs::read_to_string(&mnemonic_path).unwrap()).unwrap();
    let account = HdAccountDeriver::default().derive(&mnemonic, 0).unwrap();
    assert_eq!(account.address(), plan.constructor_args.owner);
    assert_eq!(
        plan.owner_origin,
        OwnerOrigin::Derived {
            index: 0,
            path: account.path().clone(),
        }
    );

    // ==========================================
    // STEP 4: Plan JSON never carries secrets
    // ==========================================
    let json = plan.to_json().unwrap();
    assert!(!json.contains(account.private_key_hex()));
    assert!(!json.contains("abandon"));
    assert_eq!(DeploymentPlan::from_json(&json).unwrap(), plan);
}

#[test]
fn test_literal_owner_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("deploy.toml");
    DeployConfig::kovan().save(&config_path).unwrap();

    let plan = DeploymentPlan::resolve(&DeployConfig::load(&config_path).unwrap()).unwrap();
    assert_eq!(plan.owner_origin, OwnerOrigin::Literal);
    assert_eq!(
        plan.constructor_args.owner,
        kovan::OWNER.parse::<Address>().unwrap()
    );
    assert_eq!(plan.contract, "PerlinRoboAdvisorV1");
    assert_eq!(plan.network, "kovan");

    let value: serde_json::Value = serde_json::from_str(&plan.to_json().unwrap()).unwrap();
    assert_eq!(value["owner_origin"]["kind"], "literal");
    assert_eq!(value["constructor_args"]["dai"], kovan::DAI);
}

#[test]
fn test_hand_written_config() {
    let dir = tempfile::tempdir().unwrap();
    let mnemonic_path = dir.path().join("phrase.txt");
    fs::write(&mnemonic_path, TEST_MNEMONIC).unwrap();

    let config_path = dir.path().join("deploy.toml");
    fs::write(
        &config_path,
        format!(
            r#"
network = "kovan"
contract = "PerlinRoboAdvisorV1"

[tokens]
dai = "0x6b175474e89094c44da98b954eedeac495271d0f"
rdai = "0x261b45d85ccfeabb11f022eba346ee8d1cd488c0"

[owner]
source = "derived"
index = 1
path_template = "m/44'/60'/0'/0/{{index}}"

[mnemonic]
file = "{}"
"#,
            mnemonic_path.display()
        ),
    )
    .unwrap();

    let plan = DeploymentPlan::resolve(&DeployConfig::load(&config_path).unwrap()).unwrap();
    assert_eq!(
        plan.constructor_args.owner.to_string(),
        "0x6Fac4D18c912343BF86fa7049364Dd4E424Ab9C0"
    );
    // Lowercase input is re-encoded with the EIP-55 checksum
    assert_eq!(plan.constructor_args.dai.to_string(), kovan::DAI);
}

#[test]
fn test_bad_mnemonic_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mnemonic_path = dir.path().join("DEV_MNEMONIC");
    fs::write(&mnemonic_path, TEST_MNEMONIC.replace("about", "able")).unwrap();

    let config = DeployConfig {
        owner: OwnerSource::Derived {
            index: 0,
            path_template: PathTemplate::default(),
        },
        mnemonic: Some(MnemonicSource::File(mnemonic_path)),
        ..DeployConfig::kovan()
    };

    assert!(matches!(
        DeploymentPlan::resolve(&config),
        Err(DeployError::Core(perlin_core::CoreError::InvalidMnemonic(_)))
    ));
}
