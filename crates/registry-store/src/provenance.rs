//! Provenance queries over a key's modification log.

use chrono::{DateTime, Utc};
use registry_core::{KeyModification, LedgerEffects, RegistryError, Result};
use serde::{Deserialize, Serialize};

use crate::results::drain;

/// One historical version of a key.
///
/// Derived on demand from the substrate log and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Transaction that wrote this version
    pub tx_id: String,
    /// Raw record bytes, empty for a deletion
    pub value: Vec<u8>,
    /// Commit time
    pub timestamp: DateTime<Utc>,
    /// Whether this version deleted the key
    pub is_delete: bool,
}

impl From<KeyModification> for HistoryEntry {
    fn from(modification: KeyModification) -> Self {
        Self {
            tx_id: modification.tx_id,
            value: modification.value,
            timestamp: modification.timestamp,
            is_delete: modification.is_delete,
        }
    }
}

/// Audit-trail reader
pub struct ProvenanceQuery<'a> {
    ledger: &'a dyn LedgerEffects,
}

impl<'a> ProvenanceQuery<'a> {
    /// Bind to a ledger view
    pub fn new(ledger: &'a dyn LedgerEffects) -> Self {
        Self { ledger }
    }

    /// Full history of `key` in the order the substrate delivers it.
    ///
    /// Only keys that currently resolve to a record have a history here; a
    /// key whose log survives its deletion reports `NotFound`.
    pub fn history_for(&self, key: &str) -> Result<Vec<HistoryEntry>> {
        if self.ledger.get_state(key)?.is_none() {
            tracing::warn!(key, "History requested for absent person");
            return Err(RegistryError::not_found("Person not found"));
        }

        let iter = self.ledger.history_for_key(key)?;
        let entries: Vec<HistoryEntry> = drain(iter)?.into_iter().map(HistoryEntry::from).collect();
        tracing::debug!(key, versions = entries.len(), "Replayed key history");
        Ok(entries)
    }
}
