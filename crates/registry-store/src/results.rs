//! Draining substrate iterators into a single response.

use registry_core::{Result, ResultsIterator};

/// Materialise every result of `iter`, then release it.
///
/// On the first failing entry the iterator is dropped, which releases the
/// cursor before the error propagates.
pub(crate) fn drain<T>(mut iter: ResultsIterator<'_, T>) -> Result<Vec<T>> {
    let mut items = Vec::new();
    for item in iter.by_ref() {
        items.push(item?);
    }
    iter.close()?;
    Ok(items)
}
