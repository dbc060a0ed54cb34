//! Key property inference.

use crate::metadata::KeyCandidate;

/// Pick the key properties for a table.
///
/// Candidates are considered in a fixed order: the declared primary key,
/// then each unique index in introspection order. The first candidate wins;
/// candidates are never re-ranked by width or name, so the same schema
/// always yields the same key.
pub fn infer_key_properties(
    primary_key: Option<&KeyCandidate>,
    unique_indexes: &[KeyCandidate],
) -> Option<KeyCandidate> {
    primary_key
        .into_iter()
        .chain(unique_indexes)
        .find(|candidate| !candidate.columns().is_empty())
        .cloned()
}
