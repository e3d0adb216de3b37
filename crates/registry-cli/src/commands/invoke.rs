//! `registry invoke`: run one contract function.

use anyhow::{bail, Result};
use registry_contract::Invocation;

use super::common::CliContext;

/// Invoke `function` as `principal`, returning the payload on success
pub fn run(ctx: &CliContext, principal: &str, function: &str, args: &[String]) -> Result<Vec<u8>> {
    let invocation = Invocation::new(principal, function, args.iter().cloned());
    let response = ctx.run(&invocation)?;
    if !response.is_success() {
        bail!("{}", response.message);
    }
    Ok(response.payload)
}
