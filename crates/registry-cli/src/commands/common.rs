//! Shared command plumbing: configuration, ledger state and dispatch.

use anyhow::{Context, Result};
use registry_contract::{Dispatcher, Invocation};
use registry_core::{RegistryConfig, Response};
use registry_effects::{DirectoryIdentity, MemoryLedger};
use std::path::{Path, PathBuf};

/// Load configuration from `path` (defaults when the file is absent), apply
/// `REGISTRY_*` overrides and validate
pub fn load_config(path: &Path) -> Result<RegistryConfig> {
    let mut config = if path.exists() {
        RegistryConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?
    } else {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        RegistryConfig::default()
    };
    config.merge_with_env();
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Everything a command needs
#[derive(Debug, Clone)]
pub struct CliContext {
    /// Effective configuration
    pub config: RegistryConfig,
    /// Ledger snapshot file
    pub state: PathBuf,
}

impl CliContext {
    /// Create a context
    pub fn new(config: RegistryConfig, state: impl Into<PathBuf>) -> Self {
        Self {
            config,
            state: state.into(),
        }
    }

    /// Restore the ledger from the snapshot file, or start empty
    pub fn open_ledger(&self) -> Result<MemoryLedger> {
        if !self.state.exists() {
            tracing::debug!(path = %self.state.display(), "No ledger snapshot, starting empty");
            return Ok(MemoryLedger::new());
        }
        MemoryLedger::load_snapshot(&self.state)
            .with_context(|| format!("restoring ledger from {}", self.state.display()))
    }

    /// Run `invocation` in one transaction, persisting the ledger on success
    pub fn run(&self, invocation: &Invocation) -> Result<Response> {
        let ledger = self.open_ledger()?;
        let identity = DirectoryIdentity::from_config(&self.config.identity);
        let dispatcher = Dispatcher::new(self.config.clone(), identity);

        let response = ledger.execute(|tx| dispatcher.dispatch(tx, invocation));
        if response.is_success() {
            ledger
                .save_snapshot(&self.state)
                .with_context(|| format!("saving ledger to {}", self.state.display()))?;
        }
        Ok(response)
    }
}
