//! # Registry Contract - Layer 4: Application
//!
//! **Purpose**: The invocation surface of the person registry.
//!
//! # Architecture Constraints
//!
//! **Layer 4 composes the domain crates.**
//! - YES Decoding `(function, args)` into a typed [`Operation`]
//! - YES Access gating before any business logic runs
//! - YES Mapping results and errors into the [`Response`](registry_core::Response) envelope
//! - NO substrate implementation or commit decisions (the host owns those)
//!
//! ```rust,no_run
//! use registry_contract::{Dispatcher, Invocation};
//! use registry_core::RegistryConfig;
//! use registry_effects::{DirectoryIdentity, MemoryLedger};
//!
//! let ledger = MemoryLedger::new();
//! let dispatcher = Dispatcher::new(RegistryConfig::default(), DirectoryIdentity::new());
//! let invocation = Invocation::new("alice", "initLedger", Vec::<String>::new());
//! let response = ledger.execute(|tx| dispatcher.dispatch(tx, &invocation));
//! assert!(response.is_success());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Invocation dispatcher
pub mod dispatcher;

/// Operation decoding
pub mod operation;

/// `initLedger` seed data
pub mod seed;

pub use dispatcher::Dispatcher;
pub use operation::{arity_of, Invocation, Operation, OPERATION_TABLE};
pub use seed::{demo_persons, seed_ledger};
