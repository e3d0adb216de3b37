//! Demonstration records written by `initLedger`.

use registry_core::{Person, Result};
use registry_store::RecordStore;

/// Records seeded at `PERSON0`, `PERSON1`, ...
pub fn demo_persons() -> Vec<Person> {
    vec![
        Person::new("John Doe", "1990-01-01", "123 Main St", "555-1234"),
        Person::new("Jane Smith", "1985-05-15", "456 Oak Ave", "555-5678"),
    ]
}

/// Write the demonstration records, overwriting existing ones.
///
/// Returns the number of records written.
pub fn seed_ledger(store: &RecordStore<'_>) -> Result<usize> {
    let persons = demo_persons();
    for (index, person) in persons.iter().enumerate() {
        store.create(&format!("PERSON{index}"), person)?;
    }
    tracing::info!(count = persons.len(), "Seeded ledger");
    Ok(persons.len())
}
