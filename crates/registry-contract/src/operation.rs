//! Invocation decoding
//!
//! The boundary hands the contract a function name and positional string
//! arguments. They are decoded exactly once into an [`Operation`], which
//! carries typed arguments; nothing past this module looks at raw names or
//! argument vectors again.

use registry_core::{Organization, PanCardDetails, Person, Principal, RegistryError, Result};
use serde::{Deserialize, Serialize};

/// Raw invocation as delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Operation name
    pub function: String,
    /// Positional arguments
    pub args: Vec<String>,
    /// Authenticated caller
    pub principal: Principal,
}

impl Invocation {
    /// Create an invocation
    pub fn new<I, S>(principal: impl Into<Principal>, function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
            principal: principal.into(),
        }
    }
}

/// Operation name → positional arity
pub const OPERATION_TABLE: [(&str, usize); 10] = [
    ("initLedger", 0),
    ("createPerson", 5),
    ("queryPerson", 1),
    ("queryAllPersons", 0),
    ("updateAllOrganizations", 7),
    ("queryPanCardDetailsOrg1", 1),
    ("queryPanCardDetailsOrg2", 1),
    ("getHistoryForPerson", 1),
    ("queryPersonsByAddress", 1),
    ("restrictedMethod", 0),
];

/// Declared arity of `name`, `None` for unknown operations
pub fn arity_of(name: &str) -> Option<usize> {
    OPERATION_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, arity)| *arity)
}

/// A decoded operation with typed arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Seed the demonstration records
    InitLedger,
    /// Store a person, overwriting any existing record
    CreatePerson {
        /// Record key
        key: String,
        /// Public fields
        person: Person,
    },
    /// Read one record
    QueryPerson {
        /// Record key
        key: String,
    },
    /// Enumerate the configured key range
    QueryAllPersons,
    /// Update an existing person and both organizations' private details
    UpdateAllOrganizations {
        /// Record key
        key: String,
        /// New public fields
        person: Person,
        /// New private details
        details: PanCardDetails,
    },
    /// Read one organization's private details
    QueryPanCardDetails {
        /// Partition to read
        organization: Organization,
        /// Record key
        key: String,
    },
    /// Audit trail of a person
    GetHistoryForPerson {
        /// Record key
        key: String,
    },
    /// Rich query by address
    QueryPersonsByAddress {
        /// Address to match exactly
        address: String,
    },
    /// Admin-gated operation with no body
    RestrictedMethod,
}

impl Operation {
    /// Decode `function` and `args`.
    ///
    /// Fails with `UnknownOperation` for names outside the table and with
    /// `Arity` when the argument count differs from the declared one.
    pub fn decode(function: &str, args: &[String]) -> Result<Self> {
        let expected =
            arity_of(function).ok_or_else(|| RegistryError::unknown_operation(function))?;
        if args.len() != expected {
            return Err(RegistryError::arity(function, expected, args.len()));
        }

        let arg = |i: usize| args[i].clone();
        let person_at = |i: usize| Person::new(arg(i), arg(i + 1), arg(i + 2), arg(i + 3));

        let operation = match function {
            "initLedger" => Operation::InitLedger,
            "createPerson" => Operation::CreatePerson {
                key: arg(0),
                person: person_at(1),
            },
            "queryPerson" => Operation::QueryPerson { key: arg(0) },
            "queryAllPersons" => Operation::QueryAllPersons,
            "updateAllOrganizations" => Operation::UpdateAllOrganizations {
                key: arg(0),
                person: person_at(1),
                details: PanCardDetails::new(arg(5), arg(6)),
            },
            "queryPanCardDetailsOrg1" => Operation::QueryPanCardDetails {
                organization: Organization::Org1,
                key: arg(0),
            },
            "queryPanCardDetailsOrg2" => Operation::QueryPanCardDetails {
                organization: Organization::Org2,
                key: arg(0),
            },
            "getHistoryForPerson" => Operation::GetHistoryForPerson { key: arg(0) },
            "queryPersonsByAddress" => Operation::QueryPersonsByAddress { address: arg(0) },
            "restrictedMethod" => Operation::RestrictedMethod,
            other => return Err(RegistryError::unknown_operation(other)),
        };
        Ok(operation)
    }

    /// Wire name of the operation
    pub fn name(&self) -> &'static str {
        match self {
            Operation::InitLedger => "initLedger",
            Operation::CreatePerson { .. } => "createPerson",
            Operation::QueryPerson { .. } => "queryPerson",
            Operation::QueryAllPersons => "queryAllPersons",
            Operation::UpdateAllOrganizations { .. } => "updateAllOrganizations",
            Operation::QueryPanCardDetails {
                organization: Organization::Org1,
                ..
            } => "queryPanCardDetailsOrg1",
            Operation::QueryPanCardDetails {
                organization: Organization::Org2,
                ..
            } => "queryPanCardDetailsOrg2",
            Operation::GetHistoryForPerson { .. } => "getHistoryForPerson",
            Operation::QueryPersonsByAddress { .. } => "queryPersonsByAddress",
            Operation::RestrictedMethod => "restrictedMethod",
        }
    }

    /// Declared positional arity
    pub fn arity(&self) -> usize {
        arity_of(self.name()).unwrap_or_default()
    }
}
