//! Ledger Effect Trait
//!
//! Contract over the external versioned key-value substrate. The registry
//! never persists anything itself; every read and write goes through
//! [`LedgerEffects`], which a host binds to one invocation (one transaction).
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `registry-effects` (in-memory substrate)
//! - **Usage**: RecordStore, PrivacyPartition, ProvenanceQuery
//!
//! Range scans, rich queries and history replays hand out a
//! [`ResultsIterator`], which owns a substrate cursor. The cursor is released
//! by [`ResultsIterator::close`] or, on every other exit path, by `Drop`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;

/// Error type for ledger substrate operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum LedgerError {
    /// Read operation failed
    #[error("ledger read failed: {0}")]
    ReadFailed(String),

    /// Write operation failed
    #[error("ledger write failed: {0}")]
    WriteFailed(String),

    /// The substrate has no rich-query (secondary index) capability
    #[error("rich queries are not supported by this ledger: {0}")]
    QueryUnsupported(String),

    /// Rich-query selector could not be interpreted
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Key rejected by the substrate
    #[error("invalid key: {reason}")]
    InvalidKey {
        /// Reason why the key is invalid
        reason: String,
    },

    /// Cursor used after release
    #[error("iterator already closed")]
    IteratorClosed,
}

impl From<LedgerError> for RegistryError {
    fn from(err: LedgerError) -> Self {
        RegistryError::storage(err.to_string())
    }
}

/// One entry of a range scan or rich query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Ledger key
    pub key: String,
    /// Raw stored bytes
    pub value: Vec<u8>,
}

impl KeyValue {
    /// Create a new key/value pair
    pub fn new(key: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// One entry of a key's modification log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyModification {
    /// Transaction that produced this version
    pub tx_id: String,
    /// Value written, empty for deletions
    pub value: Vec<u8>,
    /// Commit time of the transaction
    pub timestamp: DateTime<Utc>,
    /// Whether this version deleted the key
    pub is_delete: bool,
}

/// Substrate-side cursor backing a [`ResultsIterator`]
pub trait ResultsCursor<T> {
    /// Produce the next result, or `None` when exhausted
    fn next_result(&mut self) -> Option<Result<T, LedgerError>>;

    /// Release the substrate resource held by this cursor
    fn close(&mut self) -> Result<(), LedgerError>;
}

/// Scoped iterator over substrate results.
///
/// Finite and non-restartable. Releases its cursor exactly once: explicitly
/// through [`close`](Self::close), or implicitly on drop.
pub struct ResultsIterator<'a, T> {
    cursor: Box<dyn ResultsCursor<T> + 'a>,
    closed: bool,
}

/// Iterator over `(key, bytes)` pairs
pub type StateIterator<'a> = ResultsIterator<'a, KeyValue>;

/// Iterator over a key's modification log
pub type HistoryIterator<'a> = ResultsIterator<'a, KeyModification>;

impl<'a, T> ResultsIterator<'a, T> {
    /// Wrap a substrate cursor
    pub fn new(cursor: impl ResultsCursor<T> + 'a) -> Self {
        Self {
            cursor: Box::new(cursor),
            closed: false,
        }
    }

    /// Release the cursor, reporting any substrate error
    pub fn close(mut self) -> Result<(), LedgerError> {
        self.release()
    }

    fn release(&mut self) -> Result<(), LedgerError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.cursor.close()
    }
}

impl<T> Iterator for ResultsIterator<'_, T> {
    type Item = Result<T, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.closed {
            return None;
        }
        self.cursor.next_result()
    }
}

impl<T> Drop for ResultsIterator<'_, T> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            tracing::warn!(error = %err, "Failed to release ledger iterator");
        }
    }
}

/// Cursor over results already materialised by the substrate.
///
/// The optional release hook runs once when the cursor is closed.
pub struct VecCursor<'a, T> {
    items: std::vec::IntoIter<T>,
    on_close: Option<Box<dyn FnOnce() + 'a>>,
}

impl<'a, T> VecCursor<'a, T> {
    /// Create a cursor over `items`
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into_iter(),
            on_close: None,
        }
    }

    /// Run `hook` when the cursor is released
    pub fn on_close(mut self, hook: impl FnOnce() + 'a) -> Self {
        self.on_close = Some(Box::new(hook));
        self
    }
}

impl<T> ResultsCursor<T> for VecCursor<'_, T> {
    fn next_result(&mut self) -> Option<Result<T, LedgerError>> {
        self.items.next().map(Ok)
    }

    fn close(&mut self) -> Result<(), LedgerError> {
        if let Some(hook) = self.on_close.take() {
            hook();
        }
        Ok(())
    }
}

/// Ledger effects for one invocation.
///
/// Absent keys read as `Ok(None)`, never as an error. Writes are
/// last-write-wins per key; the substrate decides when they become durable.
pub trait LedgerEffects {
    /// Read the current value of a public key
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write a public key
    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Scan public keys in `[start_key, end_key)` in lexical order
    fn state_by_range(&self, start_key: &str, end_key: &str)
        -> Result<StateIterator<'_>, LedgerError>;

    /// Run a rich-query selector over public records
    fn query_result(&self, selector: &str) -> Result<StateIterator<'_>, LedgerError>;

    /// Replay the modification log of a public key, oldest first
    fn history_for_key(&self, key: &str) -> Result<HistoryIterator<'_>, LedgerError>;

    /// Read a key from a private collection
    fn get_private_data(&self, collection: &str, key: &str)
        -> Result<Option<Vec<u8>>, LedgerError>;

    /// Write a key into a private collection
    fn put_private_data(
        &self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), LedgerError>;
}
