//! # Registry Effects - Layer 3: Implementations
//!
//! **Purpose**: Concrete handlers for the effect traits declared in
//! `registry-core`.
//!
//! # Architecture Constraints
//!
//! **Layer 3 depends only on registry-core.**
//! - YES In-memory versioned ledger with private collections and history
//! - YES Per-invocation transactions with atomic commit
//! - YES Directory identity resolution
//! - NO record semantics (that's `registry-store`)
//! - NO access decisions (that's `registry-authorization`)
//!
//! [`MemoryLedger`] is the substrate used by the CLI and by tests. Its
//! snapshots can be written to disk so state survives between CLI runs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Directory identity handler
pub mod identity;

/// In-memory ledger handler
pub mod ledger;

/// Rich-query selector evaluation
pub mod selector;

pub use identity::DirectoryIdentity;
pub use ledger::{CommitReceipt, LedgerSnapshot, LedgerTransaction, MemoryLedger};
pub use selector::Selector;
