//! Operation access policy
//!
//! Maps operation names to the organizations permitted to invoke them. The
//! policy is data, built from `[access.rules]` and handed to
//! [`AccessControl`](crate::AccessControl) at construction. Operations with
//! no rule are open to every caller.

use registry_core::config::AccessConfig;
use registry_core::OrgId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of an access check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessDecision {
    /// The caller may proceed
    Allow,
    /// The caller is refused
    Deny {
        /// Organization the caller resolved to
        organization: OrgId,
        /// Operation that was refused
        operation: String,
    },
}

impl AccessDecision {
    /// Whether the decision permits the invocation
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }
}

/// Operation name → permitted organizations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessPolicy {
    rules: BTreeMap<String, BTreeSet<OrgId>>,
    denials: BTreeMap<String, String>,
}

impl AccessPolicy {
    /// Policy with no gated operations
    pub fn open() -> Self {
        Self::default()
    }

    /// Build from configuration
    pub fn from_config(config: &AccessConfig) -> Self {
        Self {
            rules: config.rules.clone(),
            denials: config.denials.clone(),
        }
    }

    /// Gate `operation` to `organizations`, replacing any existing rule
    pub fn with_rule<I, O>(mut self, operation: impl Into<String>, organizations: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<OrgId>,
    {
        self.rules.insert(
            operation.into(),
            organizations.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Use `message` when `operation` is refused
    pub fn with_denial(mut self, operation: impl Into<String>, message: impl Into<String>) -> Self {
        self.denials.insert(operation.into(), message.into());
        self
    }

    /// Whether `operation` needs an identity check at all
    pub fn is_gated(&self, operation: &str) -> bool {
        self.rules.contains_key(operation)
    }

    /// Decide for a caller already resolved to `organization`
    pub fn evaluate(&self, organization: &OrgId, operation: &str) -> AccessDecision {
        match self.rules.get(operation) {
            Some(permitted) if !permitted.contains(organization) => AccessDecision::Deny {
                organization: organization.clone(),
                operation: operation.to_string(),
            },
            _ => AccessDecision::Allow,
        }
    }

    /// Gated operation names
    pub fn gated_operations(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Caller-facing text for a refusal of `operation` to `organization`
    pub fn denial_message(&self, organization: &OrgId, operation: &str) -> String {
        match self.denials.get(operation) {
            Some(message) => message.clone(),
            None => format!("Organization {organization} may not invoke {operation}."),
        }
    }
}
