//! Registry configuration
//!
//! Loaded from TOML, overlaid with `REGISTRY_*` environment variables, then
//! validated. Every section has defaults matching the deployed contract, so
//! an empty file is a valid configuration.
//!
//! ```toml
//! [records]
//! range_start = "PERSON0"
//! range_end = "PERSON999"
//!
//! [partitions]
//! org1 = "collectionPanCardDetailsOrg1"
//! org2 = "collectionPanCardDetailsOrg2"
//!
//! [access.rules]
//! restrictedMethod = ["AdminMSP"]
//! queryPanCardDetailsOrg1 = ["Org1MSP"]
//! queryPanCardDetailsOrg2 = ["Org2MSP"]
//!
//! [access.denials]
//! restrictedMethod = "Only users with 'admin' role can invoke this method."
//!
//! [identity.members]
//! admin = "AdminMSP"
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::errors::{RegistryError, Result};
use crate::types::{OrgId, Organization};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "REGISTRY_";

/// Key range enumerated by `queryAllPersons`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    /// First key of the scan, inclusive
    pub range_start: String,
    /// End of the scan, exclusive
    pub range_end: String,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            range_start: "PERSON0".to_string(),
            range_end: "PERSON999".to_string(),
        }
    }
}

/// Private collection name per organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    /// Collection holding Org1's copy
    pub org1: String,
    /// Collection holding Org2's copy
    pub org2: String,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self {
            org1: "collectionPanCardDetailsOrg1".to_string(),
            org2: "collectionPanCardDetailsOrg2".to_string(),
        }
    }
}

impl PartitionConfig {
    /// Collection name for `organization`
    pub fn collection_for(&self, organization: Organization) -> &str {
        match organization {
            Organization::Org1 => &self.org1,
            Organization::Org2 => &self.org2,
        }
    }
}

/// Operation name → organizations permitted to invoke it.
///
/// Operations absent from `rules` are not gated. Each private partition read
/// is gated to the organization owning the partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Gated operations and their allow-lists
    pub rules: BTreeMap<String, BTreeSet<OrgId>>,
    /// Message returned when a gated operation is refused
    pub denials: BTreeMap<String, String>,
}

impl Default for AccessConfig {
    fn default() -> Self {
        let rules = BTreeMap::from([
            (
                "restrictedMethod".to_string(),
                BTreeSet::from([OrgId::new("AdminMSP")]),
            ),
            (
                "queryPanCardDetailsOrg1".to_string(),
                BTreeSet::from([OrgId::new("Org1MSP")]),
            ),
            (
                "queryPanCardDetailsOrg2".to_string(),
                BTreeSet::from([OrgId::new("Org2MSP")]),
            ),
        ]);
        let denials = BTreeMap::from([(
            "restrictedMethod".to_string(),
            "Only users with 'admin' role can invoke this method.".to_string(),
        )]);
        Self { rules, denials }
    }
}

/// Principal → organization directory used by the directory identity handler
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Known principals
    pub members: BTreeMap<String, OrgId>,
}

/// Logging settings, consumed by binaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Complete registry configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Enumeration range
    pub records: RecordsConfig,
    /// Private collection names
    pub partitions: PartitionConfig,
    /// Access-control policy
    pub access: AccessConfig,
    /// Identity directory
    pub identity: IdentityConfig,
    /// Logging
    pub logging: LoggingConfig,
}

impl RegistryConfig {
    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RegistryError::invalid(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| RegistryError::serialization(e.to_string()))
    }

    /// Overlay `REGISTRY_*` variables from the process environment
    pub fn merge_with_env(&mut self) {
        self.merge_with_vars(std::env::vars());
    }

    /// Overlay `REGISTRY_*` variables from `vars`
    pub fn merge_with_vars<I, K, V>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let Some(name) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name {
                "LOG_LEVEL" => self.logging.level = value.into(),
                "RANGE_START" => self.records.range_start = value.into(),
                "RANGE_END" => self.records.range_end = value.into(),
                _ => {}
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.records.range_start >= self.records.range_end {
            return Err(RegistryError::invalid(format!(
                "records.range_start ({}) must sort before records.range_end ({})",
                self.records.range_start, self.records.range_end
            )));
        }

        let partitions = &self.partitions;
        if partitions.org1.is_empty() || partitions.org2.is_empty() {
            return Err(RegistryError::invalid("partition names must not be empty"));
        }
        if partitions.org1 == partitions.org2 {
            return Err(RegistryError::invalid(
                "each organization needs its own partition",
            ));
        }

        if let Some((operation, _)) = self.access.rules.iter().find(|(_, orgs)| orgs.is_empty()) {
            return Err(RegistryError::invalid(format!(
                "access rule for {operation} permits no organization"
            )));
        }

        Ok(())
    }
}
