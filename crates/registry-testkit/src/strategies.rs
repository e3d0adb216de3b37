//! Proptest strategies for registry records and keys.

use proptest::prelude::*;
use registry_core::{PanCardDetails, Person};

/// Keys inside the default enumeration range (`PERSON0`..`PERSON999`)
pub fn arb_person_key() -> impl Strategy<Value = String> {
    (0u32..999).prop_map(|n| format!("PERSON{n}"))
}

/// Free-text field: printable, may contain quotes and backslashes
pub fn arb_field() -> impl Strategy<Value = String> {
    "[ -~]{0,24}"
}

/// Arbitrary person record
pub fn arb_person() -> impl Strategy<Value = Person> {
    (arb_field(), arb_field(), arb_field(), arb_field())
        .prop_map(|(name, birthdate, address, phone)| Person::new(name, birthdate, address, phone))
}

/// Arbitrary PAN card details
pub fn arb_pan_details() -> impl Strategy<Value = PanCardDetails> {
    (arb_field(), arb_field()).prop_map(|(income, id)| PanCardDetails::new(income, id))
}
