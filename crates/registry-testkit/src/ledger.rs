//! Ledger wrappers for observing and perturbing substrate access.
//!
//! Both wrappers borrow the `&dyn LedgerEffects` handed to an invocation, so
//! they slot in between `MemoryLedger::execute` and the code under test.

use parking_lot::Mutex;
use registry_core::{HistoryIterator, LedgerEffects, LedgerError, StateIterator};

/// Substrate calls observed by a [`CountingLedger`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessCounts {
    /// Public reads
    pub state_reads: usize,
    /// Public writes
    pub state_writes: usize,
    /// Private reads
    pub private_reads: usize,
    /// Private writes
    pub private_writes: usize,
    /// Range scans, rich queries and history replays
    pub iterators: usize,
}

impl AccessCounts {
    /// Total number of substrate calls
    pub fn total(&self) -> usize {
        self.state_reads + self.state_writes + self.private_reads + self.private_writes + self.iterators
    }
}

/// Forwards every call and counts it
pub struct CountingLedger<'a> {
    inner: &'a dyn LedgerEffects,
    counts: Mutex<AccessCounts>,
}

impl<'a> CountingLedger<'a> {
    /// Wrap `inner`
    pub fn new(inner: &'a dyn LedgerEffects) -> Self {
        Self {
            inner,
            counts: Mutex::new(AccessCounts::default()),
        }
    }

    /// Calls observed so far
    pub fn counts(&self) -> AccessCounts {
        *self.counts.lock()
    }

    fn record(&self, bump: impl FnOnce(&mut AccessCounts)) {
        bump(&mut self.counts.lock());
    }
}

impl LedgerEffects for CountingLedger<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.record(|c| c.state_reads += 1);
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.record(|c| c.state_writes += 1);
        self.inner.put_state(key, value)
    }

    fn state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<StateIterator<'_>, LedgerError> {
        self.record(|c| c.iterators += 1);
        self.inner.state_by_range(start_key, end_key)
    }

    fn query_result(&self, selector: &str) -> Result<StateIterator<'_>, LedgerError> {
        self.record(|c| c.iterators += 1);
        self.inner.query_result(selector)
    }

    fn history_for_key(&self, key: &str) -> Result<HistoryIterator<'_>, LedgerError> {
        self.record(|c| c.iterators += 1);
        self.inner.history_for_key(key)
    }

    fn get_private_data(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        self.record(|c| c.private_reads += 1);
        self.inner.get_private_data(collection, key)
    }

    fn put_private_data(
        &self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), LedgerError> {
        self.record(|c| c.private_writes += 1);
        self.inner.put_private_data(collection, key, value)
    }
}

/// Forwards calls, failing the ones its rules select
pub struct FailingLedger<'a> {
    inner: &'a dyn LedgerEffects,
    writes_allowed: Option<usize>,
    failing_collection: Option<String>,
    fail_reads: bool,
    writes_seen: Mutex<usize>,
}

impl<'a> FailingLedger<'a> {
    /// Wrap `inner` with no failure rules
    pub fn new(inner: &'a dyn LedgerEffects) -> Self {
        Self {
            inner,
            writes_allowed: None,
            failing_collection: None,
            fail_reads: false,
            writes_seen: Mutex::new(0),
        }
    }

    /// Let the first `n` writes (public or private) through, fail the rest
    pub fn fail_writes_after(mut self, n: usize) -> Self {
        self.writes_allowed = Some(n);
        self
    }

    /// Fail every private write to `collection`
    pub fn fail_collection(mut self, collection: impl Into<String>) -> Self {
        self.failing_collection = Some(collection.into());
        self
    }

    /// Fail every public and private point read
    pub fn fail_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    fn check_write(&self, target: &str) -> Result<(), LedgerError> {
        let mut seen = self.writes_seen.lock();
        if self.writes_allowed.is_some_and(|allowed| *seen >= allowed) {
            tracing::debug!(target, "Injecting write failure");
            return Err(LedgerError::WriteFailed(format!("injected failure writing {target}")));
        }
        *seen += 1;
        Ok(())
    }

    fn check_read(&self, target: &str) -> Result<(), LedgerError> {
        if self.fail_reads {
            return Err(LedgerError::ReadFailed(format!("injected failure reading {target}")));
        }
        Ok(())
    }
}

impl LedgerEffects for FailingLedger<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.check_read(key)?;
        self.inner.get_state(key)
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.check_write(key)?;
        self.inner.put_state(key, value)
    }

    fn state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<StateIterator<'_>, LedgerError> {
        self.inner.state_by_range(start_key, end_key)
    }

    fn query_result(&self, selector: &str) -> Result<StateIterator<'_>, LedgerError> {
        self.inner.query_result(selector)
    }

    fn history_for_key(&self, key: &str) -> Result<HistoryIterator<'_>, LedgerError> {
        self.inner.history_for_key(key)
    }

    fn get_private_data(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        self.check_read(key)?;
        self.inner.get_private_data(collection, key)
    }

    fn put_private_data(
        &self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), LedgerError> {
        if self.failing_collection.as_deref() == Some(collection) {
            return Err(LedgerError::WriteFailed(format!(
                "injected failure writing {collection}"
            )));
        }
        self.check_write(key)?;
        self.inner.put_private_data(collection, key, value)
    }
}
