//! Organization-private partitions for PAN card details
//!
//! One logical [`PanCardDetails`] per person key is materialised once per
//! organization, each copy in that organization's own collection. Isolation
//! is structural: a read names exactly one organization and only ever
//! touches that organization's collection.

use registry_core::config::PartitionConfig;
use registry_core::{LedgerEffects, Organization, PanCardDetails, RegistryError, Result};

/// Writer/reader for organization-exclusive partitions
pub struct PrivacyPartition<'a> {
    ledger: &'a dyn LedgerEffects,
    partitions: &'a PartitionConfig,
}

impl<'a> PrivacyPartition<'a> {
    /// Bind to a ledger view and the configured collection names
    pub fn new(ledger: &'a dyn LedgerEffects, partitions: &'a PartitionConfig) -> Self {
        Self { ledger, partitions }
    }

    /// Write `details` under `key` into every organization's partition.
    ///
    /// Writes are sequential, Org1 then Org2. The first failure aborts the
    /// remaining writes; the caller must fail the whole invocation.
    pub fn write_both(&self, key: &str, details: &PanCardDetails) -> Result<()> {
        for organization in Organization::ALL {
            let bytes = details.to_bytes()?;
            let collection = self.partitions.collection_for(organization);
            self.ledger
                .put_private_data(collection, key, bytes)
                .map_err(|err| {
                    tracing::error!(
                        key,
                        organization = %organization,
                        error = %err,
                        "Private write failed"
                    );
                    RegistryError::from(err).with_storage_context(&format!(
                        "Failed to put PAN card details for {organization}"
                    ))
                })?;
            tracing::debug!(key, organization = %organization, "Wrote PAN card details");
        }
        Ok(())
    }

    /// Read `key` from `organization`'s partition only
    pub fn read_for(&self, organization: Organization, key: &str) -> Result<Vec<u8>> {
        let collection = self.partitions.collection_for(organization);
        let bytes = self
            .ledger
            .get_private_data(collection, key)
            .map_err(|err| {
                RegistryError::from(err).with_storage_context(&format!(
                    "Failed to get PAN card details from {organization}"
                ))
            })?;

        bytes.ok_or_else(|| {
            tracing::warn!(key, organization = %organization, "PAN card details missing");
            RegistryError::not_found(format!(
                "PAN card details not found in {organization} for: {key}"
            ))
        })
    }
}
