//! Common fixtures: sample records, principals and a standard directory.

use chrono::{Duration, TimeZone, Utc};
use registry_core::{OrgId, PanCardDetails, Person, Principal, RegistryConfig};
use registry_effects::{DirectoryIdentity, MemoryLedger};

/// Principal enrolled in the admin organization
pub const ADMIN: &str = "admin";
/// Principal enrolled in Org1
pub const ORG1_USER: &str = "alice";
/// Principal enrolled in Org2
pub const ORG2_USER: &str = "bob";
/// Principal the standard directory does not know
pub const STRANGER: &str = "mallory";

/// A distinct, valid person derived from `n`
pub fn person_fixture(n: usize) -> Person {
    Person::new(
        format!("Person {n}"),
        format!("19{:02}-01-01", n % 100),
        format!("{n} Test Lane"),
        format!("555-{:04}", n % 10_000),
    )
}

/// PAN card details derived from `n`
pub fn pan_fixture(n: usize) -> PanCardDetails {
    PanCardDetails::new(format!("{}", 100_000 + n), format!("PAN{n:06}"))
}

/// The admin principal
pub fn admin_principal() -> Principal {
    Principal::new(ADMIN)
}

/// An ordinary Org1 principal
pub fn org1_principal() -> Principal {
    Principal::new(ORG1_USER)
}

/// Directory with one admin and one member of each organization
pub fn standard_directory() -> DirectoryIdentity {
    DirectoryIdentity::new()
        .with_member(ADMIN, OrgId::new("AdminMSP"))
        .with_member(ORG1_USER, OrgId::new("Org1MSP"))
        .with_member(ORG2_USER, OrgId::new("Org2MSP"))
}

/// Default configuration, validated
pub fn test_config() -> RegistryConfig {
    let config = RegistryConfig::default();
    config.validate().unwrap();
    config
}

/// Empty ledger whose commits are stamped one second apart from 2024-01-01
pub fn test_ledger() -> MemoryLedger {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    MemoryLedger::new().with_stepped_clock(start, Duration::seconds(1))
}
