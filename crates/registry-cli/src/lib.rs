//! Registry CLI Library
//!
//! Command implementations behind the `registry` binary. Each command loads
//! the effective configuration, restores the ledger from its snapshot file,
//! runs through the contract dispatcher and writes the snapshot back when
//! something was committed.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Command handlers
pub mod commands;

pub use commands::common::CliContext;
