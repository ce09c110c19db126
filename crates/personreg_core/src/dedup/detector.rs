//! Exact-signal duplicate detector.
//!
//! # Responsibility
//! - Find the existing record that plausibly represents the same individual
//!   as a submitted field set.
//!
//! # Invariants
//! - The identity signal is an exact match on (first_name, birth_date);
//!   no fuzzy matching, no phonetic encoding, no edit distance.
//! - The first matching record in the caller-supplied order wins, so callers
//!   must provide a deterministically ordered snapshot.

use crate::model::person::{PersonFields, PersonId, PersonRecord};

/// Finds a candidate duplicate for `candidate` in `existing`.
///
/// Scans `existing` in order for the first record sharing the candidate's
/// `first_name` and `birth_date`, skipping `exclude_id` (the candidate's own
/// id on update, to avoid self-matching).
///
/// The match is only reported as a duplicate when it differs from the
/// candidate in `surname`, `address` or `city`. A first match that is
/// identical in all fields ends the scan with `None`: fully identical records
/// are treated as already consistent and raise no conflict.
pub fn find_duplicate<'a>(
    candidate: &PersonFields,
    existing: &'a [PersonRecord],
    exclude_id: Option<PersonId>,
) -> Option<&'a PersonRecord> {
    let found = existing.iter().find(|record| {
        record.fields.first_name == candidate.first_name
            && record.fields.birth_date == candidate.birth_date
            && exclude_id != Some(record.id)
    })?;

    let differs = found.fields.surname != candidate.surname
        || found.fields.address != candidate.address
        || found.fields.city != candidate.city;

    differs.then_some(found)
}
