//! CLI commands against a snapshot file in a temporary directory.

use registry_cli::commands::{common, config, history, invoke};
use registry_cli::CliContext;
use registry_core::{OrgId, RegistryConfig};

fn context(dir: &tempfile::TempDir) -> CliContext {
    let mut config = RegistryConfig::default();
    config
        .identity
        .members
        .insert("admin".to_string(), OrgId::new("AdminMSP"));
    config
        .identity
        .members
        .insert("alice".to_string(), OrgId::new("Org1MSP"));
    CliContext::new(config, dir.path().join("state.json"))
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn test_state_persists_between_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);

    invoke::run(&ctx, "alice", "initLedger", &[]).unwrap();
    assert!(ctx.state.exists());

    let payload = invoke::run(&ctx, "alice", "queryPerson", &strings(&["PERSON1"])).unwrap();
    let person: serde_json::Value = serde_json::from_slice(&payload).unwrap();
    assert_eq!(person["name"], "Jane Smith");
}

#[test]
fn test_failed_invocation_reports_message_and_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);

    let err = invoke::run(&ctx, "alice", "restrictedMethod", &[]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Permission denied. Only users with 'admin' role can invoke this method."
    );
    assert!(!ctx.state.exists());

    invoke::run(&ctx, "admin", "restrictedMethod", &[]).unwrap();
}

#[test]
fn test_history_is_pretty_json() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(&dir);
    invoke::run(
        &ctx,
        "alice",
        "createPerson",
        &strings(&["p1", "John Doe", "1990-01-01", "123 Main St", "555-1234"]),
    )
    .unwrap();

    let text = history::run(&ctx, "alice", "p1").unwrap();
    assert!(text.contains("\n  {"));
    assert!(text.contains("\"IsDelete\": \"false\""));
}

#[test]
fn test_config_command_and_missing_file_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = common::load_config(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(loaded.partitions, RegistryConfig::default().partitions);

    let text = config::run(&context(&dir)).unwrap();
    assert!(text.contains("collectionPanCardDetailsOrg1"));
    assert!(text.contains("restrictedMethod"));
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.toml");
    std::fs::write(&path, "[records]\nrange_start = \"Z\"\nrange_end = \"A\"\n").unwrap();
    assert!(common::load_config(&path).is_err());
}
