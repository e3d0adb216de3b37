//! Identity-backed access gate.

use registry_core::{IdentityEffects, OrgId, Principal, RegistryError, Result};

use crate::policy::{AccessDecision, AccessPolicy};

/// Gates operations by the caller's organization
#[derive(Debug, Clone)]
pub struct AccessControl<I> {
    policy: AccessPolicy,
    identity: I,
}

impl<I: IdentityEffects> AccessControl<I> {
    /// Create a gate over `policy`, resolving callers through `identity`
    pub fn new(policy: AccessPolicy, identity: I) -> Self {
        Self { policy, identity }
    }

    /// Decide whether `principal` may invoke `operation`.
    ///
    /// Ungated operations are allowed without consulting the identity
    /// service. For gated ones an unresolvable principal is an error, not a
    /// denial.
    pub fn authorize(&self, principal: &Principal, operation: &str) -> Result<AccessDecision> {
        if !self.policy.is_gated(operation) {
            return Ok(AccessDecision::Allow);
        }

        let organization: OrgId = self.identity.organization_of(principal).map_err(|err| {
            tracing::error!(principal = %principal, error = %err, "Identity resolution failed");
            RegistryError::from(err)
        })?;

        let decision = self.policy.evaluate(&organization, operation);
        match &decision {
            AccessDecision::Allow => {
                tracing::debug!(principal = %principal, %organization, operation, "Access granted");
            }
            AccessDecision::Deny { .. } => {
                tracing::warn!(principal = %principal, %organization, operation, "Access denied");
            }
        }
        Ok(decision)
    }

    /// Like [`authorize`](Self::authorize), turning a denial into
    /// `PermissionDenied` carrying the policy's message for the operation
    pub fn require(&self, principal: &Principal, operation: &str) -> Result<()> {
        match self.authorize(principal, operation)? {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Deny {
                organization,
                operation,
            } => Err(RegistryError::permission_denied(
                self.policy.denial_message(&organization, &operation),
            )),
        }
    }
}
