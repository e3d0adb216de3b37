//! JSON list encodings returned by enumeration, rich queries and history.
//!
//! Stored bytes are embedded verbatim so callers get back exactly what was
//! written. Bytes that are not valid JSON are embedded as a JSON string and
//! empty values (deletions) as `null`.

use chrono::{DateTime, Timelike, Utc};
use registry_core::{KeyValue, Result};
use serde::Serialize;
use serde_json::value::RawValue;

use crate::provenance::HistoryEntry;

/// Render a commit time as `2024-01-01 00:00:00.5 +0000 UTC`.
///
/// Sub-second digits are printed only as far as the last non-zero one and
/// are omitted entirely for whole seconds.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    let mut text = timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
    let nanos = timestamp.nanosecond() % 1_000_000_000;
    if nanos != 0 {
        let fraction = format!("{nanos:09}");
        text.push('.');
        text.push_str(fraction.trim_end_matches('0'));
    }
    text.push_str(&timestamp.format(" %z UTC").to_string());
    text
}

/// `{"Key": ..., "Record": ...}` element of a record listing
#[derive(Debug, Serialize)]
pub struct RecordEntry {
    /// Ledger key
    #[serde(rename = "Key")]
    pub key: String,
    /// Stored record, embedded as JSON
    #[serde(rename = "Record")]
    pub record: Box<RawValue>,
}

/// `{"TxnID", "Value", "Timestamp", "IsDelete"}` element of a history listing
#[derive(Debug, Serialize)]
pub struct HistoryRecord {
    /// Transaction id
    #[serde(rename = "TxnID")]
    pub tx_id: String,
    /// Value at that version, embedded as JSON
    #[serde(rename = "Value")]
    pub value: Box<RawValue>,
    /// Commit time
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    /// `"true"` or `"false"`
    #[serde(rename = "IsDelete")]
    pub is_delete: String,
}

/// Embed raw stored bytes as a JSON value
pub fn raw_json(bytes: &[u8]) -> Result<Box<RawValue>> {
    if bytes.is_empty() {
        return Ok(RawValue::from_string("null".to_string())?);
    }
    if let Some(raw) = std::str::from_utf8(bytes)
        .ok()
        .and_then(|text| RawValue::from_string(text.to_string()).ok())
    {
        return Ok(raw);
    }
    let quoted = serde_json::to_string(&String::from_utf8_lossy(bytes))?;
    Ok(RawValue::from_string(quoted)?)
}

/// Encode `(key, record)` pairs as a JSON array
pub fn encode_records(items: &[KeyValue]) -> Result<Vec<u8>> {
    let entries = items
        .iter()
        .map(|kv| {
            Ok(RecordEntry {
                key: kv.key.clone(),
                record: raw_json(&kv.value)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(serde_json::to_vec(&entries)?)
}

/// Encode history entries as a JSON array
pub fn encode_history(entries: &[HistoryEntry]) -> Result<Vec<u8>> {
    let records = entries
        .iter()
        .map(|entry| {
            Ok(HistoryRecord {
                tx_id: entry.tx_id.clone(),
                value: raw_json(&entry.value)?,
                timestamp: format_timestamp(&entry.timestamp),
                is_delete: entry.is_delete.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(serde_json::to_vec(&records)?)
}
