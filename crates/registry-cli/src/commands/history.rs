//! `registry history`: pretty-printed audit trail of one person.

use anyhow::{Context, Result};
use serde_json::Value;

use super::common::CliContext;
use super::invoke;

/// History of `key` as indented JSON
pub fn run(ctx: &CliContext, principal: &str, key: &str) -> Result<String> {
    let payload = invoke::run(ctx, principal, "getHistoryForPerson", &[key.to_string()])?;
    let history: Value =
        serde_json::from_slice(&payload).context("history payload is not JSON")?;
    Ok(serde_json::to_string_pretty(&history)?)
}
