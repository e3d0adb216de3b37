//! Configuration loading from disk

use assert_matches::assert_matches;
use registry_core::{OrgId, RegistryConfig, RegistryError};
use std::io::Write;

#[test]
fn loads_and_validates_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[records]
range_start = "PERSON0"
range_end = "PERSON5"

[access.rules]
restrictedMethod = ["AdminMSP"]
queryAllPersons = ["Org1MSP", "Org2MSP"]

[identity.members]
admin = "AdminMSP"
"#
    )
    .unwrap();

    let config = RegistryConfig::load_from_file(file.path()).unwrap();
    config.validate().unwrap();
    assert_eq!(config.records.range_end, "PERSON5");
    assert_eq!(config.access.rules.len(), 2);
    assert_eq!(config.identity.members["admin"], OrgId::new("AdminMSP"));
}

#[test]
fn missing_file_is_invalid_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let result = RegistryConfig::load_from_file(&dir.path().join("absent.toml"));
    assert_matches!(result, Err(RegistryError::Invalid { .. }));
}

#[test]
fn malformed_toml_is_rejected() {
    let result = RegistryConfig::from_toml_str("[records\nrange_start = 1");
    assert_matches!(result, Err(RegistryError::Invalid { .. }));
}

#[test]
fn empty_allow_list_fails_validation() {
    let config = RegistryConfig::from_toml_str(
        r#"
[access.rules]
restrictedMethod = []
"#,
    )
    .unwrap();
    assert_matches!(config.validate(), Err(RegistryError::Invalid { .. }));
}
