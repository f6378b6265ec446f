//! Record collection logic: lookup, filtering, sorting and mutation over an
//! in-memory collection of one record kind.
//!
//! Nothing here touches storage. Callers load a [`Document`](crate::Document),
//! run these functions on one of its collections and persist the result.

use crate::schema::{Matcher, Record, SortField};

/// Linear scan for the first record with the given identifier.
pub fn find_by_id<K: Record>(records: &[K], id: u64) -> Option<&K> {
    records.iter().find(|r| r.id() == id)
}

/// Keep the records matching every predicate, preserving their relative order.
/// An empty predicate list keeps everything.
pub fn filter<K: Record>(records: Vec<K>, predicates: &[K::Predicate]) -> Vec<K> {
    if predicates.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|r| predicates.iter().all(|p| p.matches(r)))
        .collect()
}

/// Stable sort by a single field. `descending` uses the reversed comparison.
pub fn sort_by<K: Record>(records: &mut [K], field: K::Field, descending: bool) {
    if descending {
        records.sort_by(|a, b| field.compare(a, b).reverse());
    } else {
        records.sort_by(|a, b| field.compare(a, b));
    }
}

/// Identifier for the next record: one past the current maximum, or 1.
/// `None` once the maximum is `u64::MAX`.
pub fn next_id<K: Record>(records: &[K]) -> Option<u64> {
    match records.iter().map(Record::id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Assign a fresh identifier, append the record and return the stored copy.
/// Returns `None` and leaves the collection unchanged when no identifier is left.
pub fn insert<K: Record>(records: &mut Vec<K>, new: K::New) -> Option<K> {
    let record = K::from_new(next_id(records)?, new);
    records.push(record.clone());
    Some(record)
}

/// Overlay the patch on the record with the given identifier.
/// Returns the merged record, or `None` when no record matches.
pub fn update<K: Record>(records: &mut [K], id: u64, patch: K::Patch) -> Option<K> {
    let record = records.iter_mut().find(|r| r.id() == id)?;
    record.apply_patch(patch);
    Some(record.clone())
}

/// Remove the first record with the given identifier.
pub fn delete<K: Record>(records: &mut Vec<K>, id: u64) -> bool {
    match records.iter().position(|r| r.id() == id) {
        Some(index) => {
            records.remove(index);
            true
        }
        None => false,
    }
}
