//! `registry config`: print the effective configuration.

use anyhow::Result;

use super::common::CliContext;

/// Effective configuration as TOML
pub fn run(ctx: &CliContext) -> Result<String> {
    Ok(ctx.config.to_toml_string()?)
}
