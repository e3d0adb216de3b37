//! Invocation dispatcher
//!
//! One transition per invocation: decode, gate, execute, wrap. The dispatcher
//! holds configuration and the access gate but no ledger state; the ledger
//! view for the invocation is passed in by the host, which decides whether
//! to commit based on the returned [`Response`].

use registry_authorization::{AccessControl, AccessPolicy};
use registry_core::{IdentityEffects, LedgerEffects, RegistryConfig, Response, Result};
use registry_store::{encode_history, encode_records, ProvenanceQuery, RecordStore};

use crate::operation::{Invocation, Operation};
use crate::seed::seed_ledger;

/// Routes invocations to the record components
#[derive(Debug, Clone)]
pub struct Dispatcher<I> {
    config: RegistryConfig,
    access: AccessControl<I>,
}

impl<I: IdentityEffects> Dispatcher<I> {
    /// Build a dispatcher whose access policy comes from `config`
    pub fn new(config: RegistryConfig, identity: I) -> Self {
        let policy = AccessPolicy::from_config(&config.access);
        Self {
            config,
            access: AccessControl::new(policy, identity),
        }
    }

    /// Configuration in force
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Handle one invocation against `ledger`
    pub fn dispatch(&self, ledger: &dyn LedgerEffects, invocation: &Invocation) -> Response {
        tracing::info!("Function name is: {}", invocation.function);
        tracing::info!("Args length is: {}", invocation.args.len());

        let result = self.handle(ledger, invocation);
        if let Err(err) = &result {
            tracing::warn!(
                function = %invocation.function,
                kind = ?err.kind(),
                error = %err,
                "Invocation failed"
            );
        }
        Response::from_result(result)
    }

    fn handle(&self, ledger: &dyn LedgerEffects, invocation: &Invocation) -> Result<Vec<u8>> {
        let operation = Operation::decode(&invocation.function, &invocation.args)?;
        self.access.require(&invocation.principal, operation.name())?;
        self.execute(ledger, operation)
    }

    /// Run an already decoded and authorized operation
    pub fn execute(&self, ledger: &dyn LedgerEffects, operation: Operation) -> Result<Vec<u8>> {
        let store = RecordStore::new(ledger, &self.config.records, &self.config.partitions);

        match operation {
            Operation::InitLedger => {
                seed_ledger(&store)?;
                Ok(Vec::new())
            }
            Operation::CreatePerson { key, person } => store.create(&key, &person),
            Operation::QueryPerson { key } => Ok(store.get(&key)?.unwrap_or_default()),
            Operation::QueryAllPersons => encode_records(&store.enumerate_all()?),
            Operation::UpdateAllOrganizations {
                key,
                person,
                details,
            } => {
                store.update(&key, &person, &details)?;
                Ok(Vec::new())
            }
            Operation::QueryPanCardDetails { organization, key } => {
                store.partition().read_for(organization, &key)
            }
            Operation::GetHistoryForPerson { key } => {
                let history = ProvenanceQuery::new(ledger).history_for(&key)?;
                encode_history(&history)
            }
            Operation::QueryPersonsByAddress { address } => {
                encode_records(&store.query_by_address(&address)?)
            }
            Operation::RestrictedMethod => Ok(Vec::new()),
        }
    }
}
