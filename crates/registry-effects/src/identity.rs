//! Directory-backed identity handler.

use registry_core::config::IdentityConfig;
use registry_core::{IdentityEffects, IdentityError, OrgId, Principal};
use std::collections::BTreeMap;

/// Resolves principals from a static membership directory
#[derive(Debug, Clone, Default)]
pub struct DirectoryIdentity {
    members: BTreeMap<Principal, OrgId>,
}

impl DirectoryIdentity {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a directory from configuration
    pub fn from_config(config: &IdentityConfig) -> Self {
        let members = config
            .members
            .iter()
            .map(|(principal, org)| (Principal::new(principal.as_str()), org.clone()))
            .collect();
        Self { members }
    }

    /// Add or replace a member
    pub fn with_member(mut self, principal: impl Into<String>, org: impl Into<OrgId>) -> Self {
        self.members.insert(Principal::new(principal), org.into());
        self
    }

    /// Number of known principals
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the directory is empty
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl IdentityEffects for DirectoryIdentity {
    fn organization_of(&self, principal: &Principal) -> Result<OrgId, IdentityError> {
        self.members
            .get(principal)
            .cloned()
            .ok_or_else(|| IdentityError::UnknownPrincipal {
                principal: principal.to_string(),
            })
    }
}
