//! Dynamic finder resolution: `find_by_<field>[_and_<field>]*` selectors.
//!
//! The resolver is a fallback for operation names that match no statically
//! known operation. It parses and validates the whole name before anything
//! executes: any malformed or unknown part yields the [`NotAFinder`]
//! sentinel so the caller can continue to its own unrecognized-operation
//! path. A malformed name never partially executes a query.

use bson::Bson;

use crate::{query::Filter, schema::{ID_FIELD, Schema}};

const PREFIX: &str = "find_by_";
const SEPARATOR: &str = "_and_";

/// Sentinel outcome: the selector is not a dynamic finder.
///
/// Deliberately not an error type; the caller decides what an unrecognized
/// operation means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotAFinder;

/// Interprets a selector name as a dynamic finder over `schema`.
///
/// The name must be `find_by_` followed by one or more registered field
/// names joined with `_and_`; the literal token `id` normalizes to the
/// identifier field. Field tokens are zipped 1:1 with `args` to build an
/// equality filter. Unknown fields, an empty field list or an arity
/// mismatch all yield [`NotAFinder`].
pub fn parse(selector: &str, schema: &Schema, args: &[Bson]) -> Result<Filter, NotAFinder> {
    let rest = selector.strip_prefix(PREFIX).ok_or(NotAFinder)?;
    if rest.is_empty() {
        return Err(NotAFinder);
    }

    let fields: Vec<&str> = rest
        .split(SEPARATOR)
        .map(|token| if token == "id" { ID_FIELD } else { token })
        .collect();

    if fields.len() != args.len() {
        return Err(NotAFinder);
    }

    if fields.iter().any(|field| !schema.has_field(field)) {
        return Err(NotAFinder);
    }

    Ok(fields
        .into_iter()
        .map(str::to_string)
        .zip(args.iter().cloned())
        .collect())
}
