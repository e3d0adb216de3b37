//! Record model and strongly typed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::Result;

/// Public identity record.
///
/// Field order is the serialized order; stored bytes are the compact JSON
/// encoding of this struct. Dates and phone numbers are not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Full name
    pub name: String,
    /// Birth date, conventionally ISO `YYYY-MM-DD`
    pub birthdate: String,
    /// Postal address, the attribute used by rich queries
    pub address: String,
    /// Phone number
    pub phone: String,
}

impl Person {
    /// Create a new person record
    pub fn new(
        name: impl Into<String>,
        birthdate: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            birthdate: birthdate.into(),
            address: address.into(),
            phone: phone.into(),
        }
    }

    /// Compact JSON encoding as stored on the ledger
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode stored bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Sensitive sub-record kept only in organization partitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanCardDetails {
    /// Declared yearly income
    #[serde(rename = "yearlyIncome")]
    pub yearly_income: String,
    /// PAN card identifier
    #[serde(rename = "panCardID")]
    pub pan_card_id: String,
}

impl PanCardDetails {
    /// Create new PAN card details
    pub fn new(yearly_income: impl Into<String>, pan_card_id: impl Into<String>) -> Self {
        Self {
            yearly_income: yearly_income.into(),
            pan_card_id: pan_card_id.into(),
        }
    }

    /// Compact JSON encoding as stored in a partition
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Decode stored bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Organizations that hold a private copy of PAN card details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Organization {
    /// First organization
    Org1,
    /// Second organization
    Org2,
}

impl Organization {
    /// Every organization, in write order
    pub const ALL: [Organization; 2] = [Organization::Org1, Organization::Org2];

    /// Short label used in messages
    pub fn label(self) -> &'static str {
        match self {
            Organization::Org1 => "Org1",
            Organization::Org2 => "Org2",
        }
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Organization membership identifier (MSP id) of a caller.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(String);

impl OrgId {
    /// Create a new organization identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrgId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for OrgId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated calling principal, as presented by the transport layer.
///
/// Transient: derived per invocation and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Create a new principal
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Principal {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Principal {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
