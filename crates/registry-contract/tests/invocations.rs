//! End-to-end invocations through the dispatcher and the memory ledger.

use assert_matches::assert_matches;
use registry_contract::{Dispatcher, Invocation, Operation};
use registry_core::{LedgerEffects, RegistryError, Response, Status};
use registry_effects::{DirectoryIdentity, MemoryLedger};
use registry_testkit::{
    standard_directory, test_config, test_ledger, CountingLedger, FailingLedger, ADMIN, ORG1_USER,
    ORG2_USER, STRANGER,
};
use serde_json::{json, Value};

struct Harness {
    ledger: MemoryLedger,
    dispatcher: Dispatcher<DirectoryIdentity>,
}

impl Harness {
    fn new() -> Self {
        Self::with_ledger(test_ledger())
    }

    fn with_ledger(ledger: MemoryLedger) -> Self {
        Self {
            ledger,
            dispatcher: Dispatcher::new(test_config(), standard_directory()),
        }
    }

    fn invoke_as(&self, principal: &str, function: &str, args: &[&str]) -> Response {
        let invocation = Invocation::new(principal, function, args.iter().copied());
        self.ledger
            .execute(|tx| self.dispatcher.dispatch(tx, &invocation))
    }

    fn invoke(&self, function: &str, args: &[&str]) -> Response {
        self.invoke_as(ORG1_USER, function, args)
    }

    fn ok(&self, function: &str, args: &[&str]) -> Vec<u8> {
        let response = self.invoke(function, args);
        assert!(response.is_success(), "{function} failed: {}", response.message);
        response.payload
    }

    fn json(&self, function: &str, args: &[&str]) -> Value {
        serde_json::from_slice(&self.ok(function, args)).unwrap()
    }

    fn json_as(&self, principal: &str, function: &str, args: &[&str]) -> Value {
        let response = self.invoke_as(principal, function, args);
        assert!(response.is_success(), "{function} failed: {}", response.message);
        serde_json::from_slice(&response.payload).unwrap()
    }
}

const JOHN: [&str; 5] = ["p1", "John Doe", "1990-01-01", "123 Main St", "555-1234"];

#[test]
fn test_create_then_query_returns_fields() {
    let h = Harness::new();
    let created = h.ok("createPerson", &JOHN);
    let queried = h.ok("queryPerson", &["p1"]);
    assert_eq!(created, queried);
    assert_eq!(
        serde_json::from_slice::<Value>(&queried).unwrap(),
        json!({
            "name": "John Doe",
            "birthdate": "1990-01-01",
            "address": "123 Main St",
            "phone": "555-1234"
        })
    );
}

#[test]
fn test_query_absent_person_is_empty_success() {
    let h = Harness::new();
    let response = h.invoke("queryPerson", &["nobody"]);
    assert_eq!(response.status, Status::Ok);
    assert!(response.payload.is_empty());
}

#[test]
fn test_init_ledger_seeds_two_records() {
    let h = Harness::new();
    assert!(h.ok("initLedger", &[]).is_empty());
    let all = h.json("queryAllPersons", &[]);
    assert_eq!(
        all,
        json!([
            {"Key": "PERSON0", "Record": {"name": "John Doe", "birthdate": "1990-01-01", "address": "123 Main St", "phone": "555-1234"}},
            {"Key": "PERSON1", "Record": {"name": "Jane Smith", "birthdate": "1985-05-15", "address": "456 Oak Ave", "phone": "555-5678"}}
        ])
    );
}

#[test]
fn test_query_all_in_range_scan_order() {
    let h = Harness::new();
    h.ok("createPerson", &["PERSON2", "B", "1990-01-01", "x", "1"]);
    h.ok("createPerson", &["PERSON10", "A", "1990-01-01", "y", "2"]);
    h.ok("createPerson", &["OTHER", "C", "1990-01-01", "z", "3"]);

    let all = h.json("queryAllPersons", &[]);
    let keys: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["Key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["PERSON10", "PERSON2"]);
}

#[test]
fn test_update_requires_existing_person() {
    let h = Harness::new();
    let response = h.invoke(
        "updateAllOrganizations",
        &["ghost", "N", "B", "A", "P", "1000", "PAN1"],
    );
    assert_eq!(response.status, Status::Error);
    assert_eq!(response.message, "This person does not exist: ghost");
    assert!(h.ledger.is_empty());
}

#[test]
fn test_update_writes_both_partitions() {
    let h = Harness::new();
    h.ok("createPerson", &JOHN);
    h.ok(
        "updateAllOrganizations",
        &["p1", "John Q Doe", "1990-01-01", "9 Elm St", "555-0000", "250000", "ABCDE1234F"],
    );

    let expected = json!({"yearlyIncome": "250000", "panCardID": "ABCDE1234F"});
    assert_eq!(h.json("queryPanCardDetailsOrg1", &["p1"]), expected);
    assert_eq!(
        h.json_as(ORG2_USER, "queryPanCardDetailsOrg2", &["p1"]),
        expected
    );
    assert_eq!(h.json("queryPerson", &["p1"])["address"], "9 Elm St");
}

#[test]
fn test_private_details_absent_before_update() {
    let h = Harness::new();
    h.ok("createPerson", &JOHN);
    let response = h.invoke_as(ORG2_USER, "queryPanCardDetailsOrg2", &["p1"]);
    assert_eq!(response.message, "PAN card details not found in Org2 for: p1");
}

#[test]
fn test_org2_member_cannot_read_org1_details() {
    let h = Harness::new();
    h.ok("createPerson", &JOHN);
    h.ok("updateAllOrganizations", &["p1", "N", "B", "A", "P", "999", "SECRET"]);

    let refused = h.invoke_as(ORG2_USER, "queryPanCardDetailsOrg1", &["p1"]);
    assert_eq!(refused.status, Status::Error);
    assert_eq!(
        refused.message,
        "Permission denied. Organization Org2MSP may not invoke queryPanCardDetailsOrg1."
    );
    assert!(refused.payload.is_empty());

    let refused = h.invoke_as(ORG1_USER, "queryPanCardDetailsOrg2", &["p1"]);
    assert!(refused.message.starts_with("Permission denied. "));
    assert!(!h.invoke_as(ADMIN, "queryPanCardDetailsOrg1", &["p1"]).is_success());
    assert!(!h.invoke_as(STRANGER, "queryPanCardDetailsOrg2", &["p1"]).is_success());

    let own = h.json_as(ORG2_USER, "queryPanCardDetailsOrg2", &["p1"]);
    assert_eq!(own, json!({"yearlyIncome": "999", "panCardID": "SECRET"}));
}

#[test]
fn test_partitions_are_isolated() {
    let h = Harness::new();
    h.ok("createPerson", &JOHN);
    h.ok("updateAllOrganizations", &["p1", "N", "B", "A", "P", "1", "ID1"]);

    let snapshot = h.ledger.snapshot();
    assert_eq!(snapshot.private.len(), 2);
    assert!(snapshot.private["collectionPanCardDetailsOrg1"].contains_key("p1"));
    assert!(snapshot.private["collectionPanCardDetailsOrg2"].contains_key("p1"));
    assert!(!String::from_utf8_lossy(&snapshot.state["p1"]).contains("ID1"));
}

#[test]
fn test_failed_private_write_leaves_no_partial_update() {
    let h = Harness::new();
    h.ok("createPerson", &JOHN);
    let before = h.ledger.snapshot();

    let invocation = Invocation::new(
        ORG1_USER,
        "updateAllOrganizations",
        ["p1", "N", "B", "A", "P", "1", "ID1"],
    );
    let response = h.ledger.execute(|tx| {
        let failing = FailingLedger::new(tx).fail_collection("collectionPanCardDetailsOrg2");
        h.dispatcher.dispatch(&failing, &invocation)
    });

    assert!(!response.is_success());
    assert!(response
        .message
        .starts_with("Failed to put PAN card details for Org2: "));
    assert_eq!(h.ledger.snapshot(), before);
}

#[test]
fn test_history_after_create_and_two_updates() {
    let h = Harness::new();
    h.ok("createPerson", &JOHN);
    h.ok("updateAllOrganizations", &["p1", "V2", "B", "A", "P", "1", "ID"]);
    h.ok("updateAllOrganizations", &["p1", "V3", "B", "A", "P", "2", "ID"]);

    let history = h.json("getHistoryForPerson", &["p1"]);
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["Value"]["name"], "John Doe");
    assert_eq!(entries[2]["Value"]["name"], "V3");
    assert_eq!(entries[2]["IsDelete"], "false");
    assert_eq!(entries[0]["Timestamp"], "2024-01-01 00:00:00 +0000 UTC");
    assert_eq!(entries[2]["Timestamp"], "2024-01-01 00:00:02 +0000 UTC");
    assert_ne!(entries[0]["TxnID"], entries[1]["TxnID"]);
}

#[test]
fn test_history_gate_ignores_stray_log_entries() {
    let h = Harness::new();
    h.ok("createPerson", &JOHN);
    h.ledger.delete_state("p1").unwrap();

    let response = h.invoke("getHistoryForPerson", &["p1"]);
    assert_eq!(response.message, "Person not found");

    let response = h.invoke("getHistoryForPerson", &["never"]);
    assert_eq!(response.message, "Person not found");
}

#[test]
fn test_query_by_address() {
    let h = Harness::new();
    h.ok("initLedger", &[]);
    h.ok("createPerson", &["p9", "Other", "2000-01-01", "123 Main St", "1"]);

    let matches = h.json("queryPersonsByAddress", &["123 Main St"]);
    let keys: Vec<&str> = matches
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["Key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["PERSON0", "p9"]);

    assert_eq!(h.json("queryPersonsByAddress", &["Nowhere"]), json!([]));
}

#[test]
fn test_query_by_address_without_rich_queries() {
    let h = Harness::with_ledger(MemoryLedger::new().without_rich_queries());
    let response = h.invoke("queryPersonsByAddress", &["123 Main St"]);
    assert_eq!(response.status, Status::Error);
    assert!(response.message.contains("rich queries are not supported"));
}

#[test]
fn test_address_with_quotes_is_not_spliced() {
    let h = Harness::new();
    h.ok("createPerson", &["p1", "N", "B", r#"1 "Quoted" Rd"#, "P"]);
    let matches = h.json("queryPersonsByAddress", &[r#"1 "Quoted" Rd"#]);
    assert_eq!(matches.as_array().unwrap().len(), 1);
}

#[test]
fn test_restricted_method_gate() {
    let h = Harness::new();
    assert!(h.invoke_as(ADMIN, "restrictedMethod", &[]).is_success());

    let denied = h.invoke_as(ORG1_USER, "restrictedMethod", &[]);
    assert_eq!(
        denied.message,
        "Permission denied. Only users with 'admin' role can invoke this method."
    );

    let unknown = h.invoke_as(STRANGER, "restrictedMethod", &[]);
    assert!(unknown.message.starts_with("Error getting MSP ID: "));
}

#[test]
fn test_arity_checked_before_storage_access() {
    let h = Harness::new();
    let invocation = Invocation::new(ORG1_USER, "createPerson", JOHN[..4].iter().copied());
    let tx = h.ledger.begin();
    let counting = CountingLedger::new(&tx);
    let response = h.dispatcher.dispatch(&counting, &invocation);

    assert_eq!(response.message, "Incorrect number of arguments. Expecting 5");
    assert!(response.payload.is_empty());
    assert_eq!(counting.counts().total(), 0);
}

#[test]
fn test_unknown_operation() {
    let h = Harness::new();
    let response = h.invoke("deletePerson", &["p1"]);
    assert_eq!(response.status, Status::Error);
    assert_eq!(response.message, "Invalid Smart Contract function name.");
    assert_matches!(
        Operation::decode("deletePerson", &[]),
        Err(RegistryError::UnknownOperation { name }) if name == "deletePerson"
    );
}

#[test]
fn test_iterators_released_after_every_query() {
    let h = Harness::new();
    h.ok("initLedger", &[]);
    h.ok("queryAllPersons", &[]);
    h.ok("queryPersonsByAddress", &["456 Oak Ave"]);
    h.ok("getHistoryForPerson", &["PERSON1"]);
    assert_eq!(h.ledger.open_iterators(), 0);
}

#[test]
fn test_execute_decoded_operation_directly() {
    let h = Harness::new();
    let tx = h.ledger.begin();
    let result = h.dispatcher.execute(&tx, Operation::QueryAllPersons).unwrap();
    assert_eq!(result, b"[]".to_vec());

    let err = h
        .dispatcher
        .execute(
            &tx,
            Operation::GetHistoryForPerson {
                key: "p1".to_string(),
            },
        )
        .unwrap_err();
    assert_matches!(err, RegistryError::NotFound { .. });
    assert_eq!(tx.get_state("p1").unwrap(), None);
}
