//! Public Person record lifecycle.
//!
//! Keys are caller-supplied and share one namespace with anything else on the
//! ledger; no collision or uniqueness check is made. Stored bytes are returned
//! untouched, never re-validated against [`Person`].

use registry_core::config::{PartitionConfig, RecordsConfig};
use registry_core::{KeyValue, LedgerEffects, PanCardDetails, Person, RegistryError, Result};
use serde_json::json;

use crate::partition::PrivacyPartition;
use crate::results::drain;

/// Public record store bound to one ledger view
pub struct RecordStore<'a> {
    ledger: &'a dyn LedgerEffects,
    records: &'a RecordsConfig,
    partition: PrivacyPartition<'a>,
}

impl<'a> RecordStore<'a> {
    /// Create a store over `ledger`
    pub fn new(
        ledger: &'a dyn LedgerEffects,
        records: &'a RecordsConfig,
        partitions: &'a PartitionConfig,
    ) -> Self {
        Self {
            ledger,
            records,
            partition: PrivacyPartition::new(ledger, partitions),
        }
    }

    /// Raw bytes stored at `key`, `None` when absent
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.ledger
            .get_state(key)
            .map_err(|err| RegistryError::from(err).with_storage_context("Failed to get person"))
    }

    /// Store `person` at `key`, overwriting any existing value.
    ///
    /// Returns the bytes written.
    pub fn create(&self, key: &str, person: &Person) -> Result<Vec<u8>> {
        let bytes = person.to_bytes()?;
        self.ledger.put_state(key, bytes.clone())?;
        tracing::debug!(key, "Stored person record");
        Ok(bytes)
    }

    /// Replace the public fields of an existing person and write the PAN card
    /// details into every organization partition.
    pub fn update(&self, key: &str, person: &Person, details: &PanCardDetails) -> Result<()> {
        if self.get(key)?.is_none() {
            tracing::warn!(key, "Update of unknown person");
            return Err(RegistryError::not_found(format!(
                "This person does not exist: {key}"
            )));
        }

        self.ledger.put_state(key, person.to_bytes()?)?;
        self.partition.write_both(key, details)?;
        tracing::debug!(key, "Updated person and private details");
        Ok(())
    }

    /// Every record in the configured key range, in lexical key order.
    ///
    /// The whole range is materialised; it must fit in one response.
    pub fn enumerate_all(&self) -> Result<Vec<KeyValue>> {
        let iter = self
            .ledger
            .state_by_range(&self.records.range_start, &self.records.range_end)?;
        let items = drain(iter)?;
        tracing::debug!(count = items.len(), "Enumerated person records");
        Ok(items)
    }

    /// Records whose `address` equals `address`.
    ///
    /// Needs a substrate with rich-query support; otherwise fails with a
    /// storage error.
    pub fn query_by_address(&self, address: &str) -> Result<Vec<KeyValue>> {
        let selector = json!({ "selector": { "address": address } }).to_string();
        let iter = self.ledger.query_result(&selector)?;
        let items = drain(iter)?;
        tracing::debug!(count = items.len(), "Rich query matched records");
        Ok(items)
    }

    /// The partition this store writes PAN card details through
    pub fn partition(&self) -> &PrivacyPartition<'a> {
        &self.partition
    }
}
