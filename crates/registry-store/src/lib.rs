//! # Registry Store - Layer 2: Domain
//!
//! **Purpose**: Person record lifecycle, organization-private partitions and
//! provenance reconstruction over the ledger substrate.
//!
//! # Architecture Constraints
//!
//! **Layer 2 depends only on registry-core.**
//! - YES Record create/read/update/enumerate/query
//! - YES Private-collection writes and reads for PAN card details
//! - YES History replay with an existence gate
//! - NO substrate implementation (that's `registry-effects`)
//! - NO operation routing or access control
//!
//! Every component borrows a `&dyn LedgerEffects` for one invocation and
//! holds no state between invocations. Failures are returned on first error;
//! nothing here retries.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// JSON list encodings for responses
pub mod encoding;

/// Organization-private partitions
pub mod partition;

/// Provenance queries
pub mod provenance;

/// Public record store
pub mod records;

mod results;

pub use encoding::{encode_history, encode_records, format_timestamp, raw_json};
pub use partition::PrivacyPartition;
pub use provenance::{HistoryEntry, ProvenanceQuery};
pub use records::RecordStore;
