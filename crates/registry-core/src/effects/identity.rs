//! Identity Effect Trait
//!
//! Contract over the external credential service that authenticates callers.
//! The registry only ever asks one question of it: which organization does
//! this principal belong to.

use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;
use crate::types::{OrgId, Principal};

/// Error type for identity resolution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum IdentityError {
    /// The principal is not known to the credential service
    #[error("unknown principal: {principal}")]
    UnknownPrincipal {
        /// Principal that failed to resolve
        principal: String,
    },

    /// The principal's credential lacks a required attribute
    #[error("credential for {principal} has no {attribute} attribute")]
    MissingAttribute {
        /// Principal whose credential is incomplete
        principal: String,
        /// Name of the missing attribute
        attribute: String,
    },
}

impl From<IdentityError> for RegistryError {
    fn from(err: IdentityError) -> Self {
        RegistryError::identity_unavailable(format!("Error getting MSP ID: {err}"))
    }
}

/// Identity effects
pub trait IdentityEffects {
    /// Resolve the organization membership identifier of `principal`
    fn organization_of(&self, principal: &Principal) -> Result<OrgId, IdentityError>;
}

impl<T: IdentityEffects + ?Sized> IdentityEffects for std::sync::Arc<T> {
    fn organization_of(&self, principal: &Principal) -> Result<OrgId, IdentityError> {
        (**self).organization_of(principal)
    }
}
