//! Registry Testing Infrastructure
//!
//! Shared fixtures, proptest strategies and ledger wrappers for the registry
//! crates' tests.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! registry-testkit = { path = "../registry-testkit" }
//! ```
//!
//! ```rust,no_run
//! use registry_core::LedgerEffects;
//! use registry_testkit::*;
//!
//! let ledger = test_ledger();
//! let tx = ledger.begin();
//! let counting = CountingLedger::new(&tx);
//! counting.get_state("PERSON0").unwrap();
//! assert_eq!(counting.counts().state_reads, 1);
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod fixtures;
pub mod ledger;
pub mod strategies;

pub use fixtures::*;
pub use ledger::{AccessCounts, CountingLedger, FailingLedger};
pub use strategies::*;
