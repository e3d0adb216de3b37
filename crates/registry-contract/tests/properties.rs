//! Property tests for record round-trips and overwrite semantics.

use proptest::prelude::*;
use registry_contract::{Dispatcher, Invocation};
use registry_core::{PanCardDetails, Person};
use registry_effects::{DirectoryIdentity, MemoryLedger};
use registry_testkit::{
    arb_field, arb_pan_details, arb_person, arb_person_key, standard_directory, test_config,
    ORG1_USER, ORG2_USER,
};

fn create_args(key: &str, person: &Person) -> Vec<String> {
    vec![
        key.to_string(),
        person.name.clone(),
        person.birthdate.clone(),
        person.address.clone(),
        person.phone.clone(),
    ]
}

fn invoke(
    ledger: &MemoryLedger,
    dispatcher: &Dispatcher<DirectoryIdentity>,
    function: &str,
    args: Vec<String>,
) -> Vec<u8> {
    invoke_as(ledger, dispatcher, ORG1_USER, function, args)
}

fn invoke_as(
    ledger: &MemoryLedger,
    dispatcher: &Dispatcher<DirectoryIdentity>,
    principal: &str,
    function: &str,
    args: Vec<String>,
) -> Vec<u8> {
    let invocation = Invocation::new(principal, function, args);
    let response = ledger.execute(|tx| dispatcher.dispatch(tx, &invocation));
    assert!(response.is_success(), "{}", response.message);
    response.payload
}

proptest! {
    #[test]
    fn prop_created_bytes_read_back(key in arb_person_key(), person in arb_person()) {
        let ledger = MemoryLedger::new();
        let dispatcher = Dispatcher::new(test_config(), standard_directory());

        let created = invoke(&ledger, &dispatcher, "createPerson", create_args(&key, &person));
        let queried = invoke(&ledger, &dispatcher, "queryPerson", vec![key]);
        prop_assert_eq!(&created, &queried);
        prop_assert_eq!(Person::from_bytes(&queried).unwrap(), person);
    }

    #[test]
    fn prop_last_create_wins(key in "[a-z]{1,8}", first in arb_person(), second in arb_person()) {
        let ledger = MemoryLedger::new();
        let dispatcher = Dispatcher::new(test_config(), standard_directory());

        invoke(&ledger, &dispatcher, "createPerson", create_args(&key, &first));
        let second_bytes = invoke(&ledger, &dispatcher, "createPerson", create_args(&key, &second));
        prop_assert_eq!(invoke(&ledger, &dispatcher, "queryPerson", vec![key]), second_bytes);
    }

    #[test]
    fn prop_update_discloses_same_details_to_both_organizations(
        key in arb_person_key(),
        person in arb_person(),
        details in arb_pan_details(),
    ) {
        let ledger = MemoryLedger::new();
        let dispatcher = Dispatcher::new(test_config(), standard_directory());

        invoke(&ledger, &dispatcher, "createPerson", create_args(&key, &person));
        let mut args = create_args(&key, &person);
        args.push(details.yearly_income.clone());
        args.push(details.pan_card_id.clone());
        invoke(&ledger, &dispatcher, "updateAllOrganizations", args);

        let org1 = invoke_as(&ledger, &dispatcher, ORG1_USER, "queryPanCardDetailsOrg1", vec![key.clone()]);
        let org2 = invoke_as(&ledger, &dispatcher, ORG2_USER, "queryPanCardDetailsOrg2", vec![key]);
        prop_assert_eq!(&org1, &org2);
        prop_assert_eq!(PanCardDetails::from_bytes(&org1).unwrap(), details);
    }

    #[test]
    fn prop_wrong_arity_never_writes(extra in prop::collection::vec(arb_field(), 0..9)) {
        prop_assume!(extra.len() != 5);
        let ledger = MemoryLedger::new();
        let dispatcher = Dispatcher::new(test_config(), standard_directory());

        let invocation = Invocation::new(ORG1_USER, "createPerson", extra);
        let response = ledger.execute(|tx| dispatcher.dispatch(tx, &invocation));
        prop_assert!(!response.is_success());
        prop_assert_eq!(response.message, "Incorrect number of arguments. Expecting 5");
        prop_assert!(ledger.is_empty());
    }
}
