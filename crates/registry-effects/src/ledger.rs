//! In-memory versioned ledger substrate
//!
//! Stands in for the replicated ledger the registry is deployed against:
//! committed world state in lexical key order, private collections, and a
//! per-key modification log.
//!
//! Invocations run inside a [`LedgerTransaction`]. Reads observe committed
//! state only; writes are staged and applied together by
//! [`LedgerTransaction::commit`] under a single transaction id and timestamp.
//! Dropping a transaction without committing discards every staged write, so a
//! failed invocation leaves no partial update behind.

use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};
use registry_core::{
    HistoryIterator, KeyModification, KeyValue, LedgerEffects, LedgerError, RegistryError,
    Response, ResultsIterator, StateIterator, VecCursor,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::selector::Selector;

/// Serializable image of the committed ledger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Public world state
    pub state: BTreeMap<String, Vec<u8>>,
    /// Private collections: collection → key → value
    pub private: BTreeMap<String, BTreeMap<String, Vec<u8>>>,
    /// Modification log per public key, oldest first
    pub history: BTreeMap<String, Vec<KeyModification>>,
}

/// Result of a successful commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    /// Transaction id assigned at commit
    pub tx_id: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Number of keys written (public and private)
    pub writes: usize,
}

#[derive(Debug)]
enum Clock {
    System,
    Stepped {
        next: Mutex<DateTime<Utc>>,
        step: Duration,
    },
}

impl Clock {
    fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Stepped { next, step } => {
                let mut next = next.lock();
                let now = *next;
                *next = now + *step;
                now
            }
        }
    }
}

/// In-memory ledger
#[derive(Debug)]
pub struct MemoryLedger {
    world: RwLock<LedgerSnapshot>,
    rich_queries: bool,
    clock: Clock,
    open_iterators: Arc<AtomicUsize>,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLedger {
    /// Create an empty ledger with rich-query support
    pub fn new() -> Self {
        Self::from_snapshot(LedgerSnapshot::default())
    }

    /// Create a ledger from a previously captured snapshot
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> Self {
        Self {
            world: RwLock::new(snapshot),
            rich_queries: true,
            clock: Clock::System,
            open_iterators: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Disable rich queries, modelling a plain key-value state database
    pub fn without_rich_queries(mut self) -> Self {
        self.rich_queries = false;
        self
    }

    /// Use a deterministic clock starting at `start`, advancing `step` per commit
    pub fn with_stepped_clock(mut self, start: DateTime<Utc>, step: Duration) -> Self {
        self.clock = Clock::Stepped {
            next: Mutex::new(start),
            step,
        };
        self
    }

    /// Start a transaction for one invocation
    pub fn begin(&self) -> LedgerTransaction<'_> {
        LedgerTransaction {
            ledger: self,
            staged: Mutex::new(Vec::new()),
        }
    }

    /// Run one invocation in its own transaction.
    ///
    /// Staged writes are committed only when `invocation` returns a successful
    /// response; otherwise they are discarded. Read-only invocations commit
    /// nothing and do not advance the clock.
    pub fn execute<F>(&self, invocation: F) -> Response
    where
        F: FnOnce(&dyn LedgerEffects) -> Response,
    {
        let tx = self.begin();
        let view: &dyn LedgerEffects = &tx;
        let response = invocation(view);
        if !response.is_success() {
            tracing::debug!(staged = tx.staged_writes(), "Discarding failed invocation");
            return response;
        }
        if tx.staged_writes() == 0 {
            return response;
        }
        match tx.commit() {
            Ok(receipt) => {
                tracing::debug!(tx_id = %receipt.tx_id, writes = receipt.writes, "Committed");
                response
            }
            Err(err) => {
                tracing::error!(error = %err, "Commit failed");
                Response::error(RegistryError::from(err).to_string())
            }
        }
    }

    /// Delete a public key as a substrate-level maintenance action.
    ///
    /// Commits immediately and appends a deletion entry to the key's log.
    /// Returns whether the key existed.
    pub fn delete_state(&self, key: &str) -> Result<bool, LedgerError> {
        let mut world = self.world.write();
        let existed = world.state.remove(key).is_some();
        if existed {
            let modification = KeyModification {
                tx_id: new_tx_id(),
                value: Vec::new(),
                timestamp: self.clock.now(),
                is_delete: true,
            };
            world
                .history
                .entry(key.to_string())
                .or_default()
                .push(modification);
        }
        Ok(existed)
    }

    /// Number of iterators handed out and not yet released
    pub fn open_iterators(&self) -> usize {
        self.open_iterators.load(Ordering::SeqCst)
    }

    /// Number of committed public keys
    pub fn len(&self) -> usize {
        self.world.read().state.len()
    }

    /// Whether no public key is committed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the committed state
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.world.read().clone()
    }

    /// Replace the committed state with `snapshot`
    pub fn restore(&self, snapshot: LedgerSnapshot) {
        *self.world.write() = snapshot;
    }

    /// Write the committed state to `path` as JSON
    pub fn save_snapshot(&self, path: &Path) -> Result<(), RegistryError> {
        let bytes = serde_json::to_vec_pretty(&self.snapshot())?;
        std::fs::write(path, bytes)?;
        tracing::debug!(path = %path.display(), "Saved ledger snapshot");
        Ok(())
    }

    /// Load a ledger from a JSON snapshot at `path`
    pub fn load_snapshot(path: &Path) -> Result<Self, RegistryError> {
        let bytes = std::fs::read(path)?;
        let snapshot: LedgerSnapshot = serde_json::from_slice(&bytes)?;
        tracing::debug!(path = %path.display(), keys = snapshot.state.len(), "Loaded ledger snapshot");
        Ok(Self::from_snapshot(snapshot))
    }

    fn track<'a, T: 'a>(&'a self, items: Vec<T>) -> ResultsIterator<'a, T> {
        let counter = Arc::clone(&self.open_iterators);
        counter.fetch_add(1, Ordering::SeqCst);
        ResultsIterator::new(VecCursor::new(items).on_close(move || {
            counter.fetch_sub(1, Ordering::SeqCst);
        }))
    }

    fn commit_staged(&self, staged: Vec<StagedWrite>) -> CommitReceipt {
        let mut public: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        let mut private: BTreeMap<(String, String), Vec<u8>> = BTreeMap::new();
        for write in staged {
            match write {
                StagedWrite::Public { key, value } => {
                    public.insert(key, value);
                }
                StagedWrite::Private {
                    collection,
                    key,
                    value,
                } => {
                    private.insert((collection, key), value);
                }
            }
        }

        let tx_id = new_tx_id();
        let mut world = self.world.write();
        let timestamp = self.clock.now();
        let writes = public.len() + private.len();

        for (key, value) in public {
            world
                .history
                .entry(key.clone())
                .or_default()
                .push(KeyModification {
                    tx_id: tx_id.clone(),
                    value: value.clone(),
                    timestamp,
                    is_delete: false,
                });
            world.state.insert(key, value);
        }
        for ((collection, key), value) in private {
            world.private.entry(collection).or_default().insert(key, value);
        }

        CommitReceipt {
            tx_id,
            timestamp,
            writes,
        }
    }
}

fn new_tx_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn check_key(key: &str) -> Result<(), LedgerError> {
    if key.is_empty() {
        return Err(LedgerError::InvalidKey {
            reason: "Key cannot be empty".to_string(),
        });
    }
    Ok(())
}

#[derive(Debug)]
enum StagedWrite {
    Public {
        key: String,
        value: Vec<u8>,
    },
    Private {
        collection: String,
        key: String,
        value: Vec<u8>,
    },
}

/// One invocation's view of a [`MemoryLedger`]
#[derive(Debug)]
pub struct LedgerTransaction<'a> {
    ledger: &'a MemoryLedger,
    staged: Mutex<Vec<StagedWrite>>,
}

impl LedgerTransaction<'_> {
    /// Number of writes staged so far
    pub fn staged_writes(&self) -> usize {
        self.staged.lock().len()
    }

    /// Apply every staged write atomically.
    ///
    /// A transaction with no staged writes commits nothing and leaves no
    /// history.
    pub fn commit(self) -> Result<CommitReceipt, LedgerError> {
        let staged = std::mem::take(&mut *self.staged.lock());
        Ok(self.ledger.commit_staged(staged))
    }
}

impl LedgerEffects for LedgerTransaction<'_> {
    fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        check_key(key)?;
        Ok(self.ledger.world.read().state.get(key).cloned())
    }

    fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        check_key(key)?;
        self.staged.lock().push(StagedWrite::Public {
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    fn state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<StateIterator<'_>, LedgerError> {
        let world = self.ledger.world.read();
        let items: Vec<KeyValue> = if end_key.is_empty() {
            world
                .state
                .range(start_key.to_string()..)
                .map(|(k, v)| KeyValue::new(k.clone(), v.clone()))
                .collect()
        } else if start_key < end_key {
            world
                .state
                .range(start_key.to_string()..end_key.to_string())
                .map(|(k, v)| KeyValue::new(k.clone(), v.clone()))
                .collect()
        } else {
            Vec::new()
        };
        drop(world);
        Ok(self.ledger.track(items))
    }

    fn query_result(&self, selector: &str) -> Result<StateIterator<'_>, LedgerError> {
        if !self.ledger.rich_queries {
            return Err(LedgerError::QueryUnsupported(
                "state database has no rich-query index".to_string(),
            ));
        }
        let selector = Selector::parse(selector)?;
        let items: Vec<KeyValue> = self
            .ledger
            .world
            .read()
            .state
            .iter()
            .filter(|(_, value)| selector.matches(value))
            .map(|(k, v)| KeyValue::new(k.clone(), v.clone()))
            .collect();
        Ok(self.ledger.track(items))
    }

    fn history_for_key(&self, key: &str) -> Result<HistoryIterator<'_>, LedgerError> {
        check_key(key)?;
        let entries = self
            .ledger
            .world
            .read()
            .history
            .get(key)
            .cloned()
            .unwrap_or_default();
        Ok(self.ledger.track(entries))
    }

    fn get_private_data(
        &self,
        collection: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        check_key(key)?;
        Ok(self
            .ledger
            .world
            .read()
            .private
            .get(collection)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    fn put_private_data(
        &self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), LedgerError> {
        check_key(key)?;
        if collection.is_empty() {
            return Err(LedgerError::InvalidKey {
                reason: "Collection name cannot be empty".to_string(),
            });
        }
        self.staged.lock().push(StagedWrite::Private {
            collection: collection.to_string(),
            key: key.to_string(),
            value,
        });
        Ok(())
    }
}
