//! # Registry Core - Layer 1: Foundation
//!
//! **Purpose**: Define the record model, the contracts of the external
//! collaborators, the unified error type and configuration.
//!
//! # Architecture Constraints
//!
//! **Layer 1 depends on no other registry crate.**
//! - YES Record types (`Person`, `PanCardDetails`) and identifiers
//! - YES Effect traits for the ledger substrate and identity service
//! - YES Response envelope and unified errors
//! - NO substrate implementations (that's `registry-effects`)
//! - NO business logic (that's `registry-store` / `registry-authorization`)
//!
//! Everything here is synchronous: an invocation runs to completion inside
//! one substrate transaction and the registry has no suspension points.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Registry configuration
pub mod config;

/// Effect traits for external collaborators
pub mod effects;

/// Unified error type
pub mod errors;

/// Invocation response envelope
pub mod response;

/// Record model and identifiers
pub mod types;

pub use config::RegistryConfig;
pub use effects::{
    HistoryIterator, IdentityEffects, IdentityError, KeyModification, KeyValue, LedgerEffects,
    LedgerError, ResultsCursor, ResultsIterator, StateIterator, VecCursor,
};
pub use errors::{ErrorKind, RegistryError, Result};
pub use response::{Response, Status};
pub use types::{OrgId, Organization, PanCardDetails, Person, Principal};
