//! Effect traits for the external collaborators of the registry
//!
//! - [`LedgerEffects`]: versioned key-value substrate with range, rich-query,
//!   history and private-collection access
//! - [`IdentityEffects`]: credential service resolving a caller's organization
//!
//! Implementations live in `registry-effects`; test doubles in `registry-testkit`.

pub mod identity;
pub mod ledger;

pub use identity::{IdentityEffects, IdentityError};
pub use ledger::{
    HistoryIterator, KeyModification, KeyValue, LedgerEffects, LedgerError, ResultsCursor,
    ResultsIterator, StateIterator, VecCursor,
};
