//! Equality filter evaluation against in-memory documents.

use bson::{Bson, Document};

use docmapper_core::query::Filter;

/// Returns whether `document` satisfies every constraint of `filter`.
///
/// A constraint on a key the document does not carry never matches.
pub(crate) fn matches(document: &Document, filter: &Filter) -> bool {
    filter
        .iter()
        .all(|(field, expected)| {
            document
                .get(field)
                .is_some_and(|actual| values_equal(actual, expected))
        })
}

/// Value equality with numeric normalization: Int32, Int64 and Double
/// compare by numeric value so a stored `Int32(25)` matches a queried
/// `Int64(25)`.
fn values_equal(left: &Bson, right: &Bson) -> bool {
    match (as_number(left), as_number(right)) {
        (Some(a), Some(b)) => a == b,
        _ => left == right,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}
