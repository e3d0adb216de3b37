//! # Registry Authorization - Layer 2: Domain
//!
//! **Purpose**: Gate operations by the organization membership of the caller.
//!
//! # Architecture Constraints
//!
//! **Layer 2 depends only on registry-core.**
//! - YES Policy evaluation (operation → permitted organizations)
//! - YES Identity resolution through `IdentityEffects`
//! - NO credential verification (the identity service owns that)
//! - NO storage access
//!
//! The policy is injected at construction; nothing here holds process-wide
//! state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Access gate over an identity handler
pub mod access_control;

/// Operation policies
pub mod policy;

pub use access_control::AccessControl;
pub use policy::{AccessDecision, AccessPolicy};
