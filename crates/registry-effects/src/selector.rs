//! Rich-query selector evaluation for the in-memory ledger.
//!
//! Supports the equality subset of the document-store selector language:
//! `{"selector": {"field": <scalar>, ...}}`. Every listed top-level field must
//! be present in the record with an equal value. Records that are not JSON
//! objects never match.

use registry_core::LedgerError;
use serde_json::{Map, Value};

/// Parsed equality selector
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    fields: Map<String, Value>,
}

impl Selector {
    /// Parse a selector document
    pub fn parse(text: &str) -> Result<Self, LedgerError> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| LedgerError::InvalidQuery(format!("selector is not JSON: {e}")))?;

        let fields = document
            .get("selector")
            .and_then(Value::as_object)
            .ok_or_else(|| {
                LedgerError::InvalidQuery("expected an object under \"selector\"".to_string())
            })?;

        if let Some((field, _)) = fields
            .iter()
            .find(|(_, value)| value.is_object() || value.is_array())
        {
            return Err(LedgerError::InvalidQuery(format!(
                "operator expressions are not supported (field {field})"
            )));
        }

        Ok(Self {
            fields: fields.clone(),
        })
    }

    /// Whether the stored record matches
    pub fn matches(&self, record: &[u8]) -> bool {
        let Ok(Value::Object(document)) = serde_json::from_slice::<Value>(record) else {
            return false;
        };
        self.fields
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}
