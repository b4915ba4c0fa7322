//! Conversion between typed instances and flat store documents.
//!
//! `to_document` projects a record field by field in registration order, nil
//! values included explicitly. `from_document` rebuilds an instance by
//! driving every incoming key through the normal setter dispatch, so
//! load-time values are validated again and unknown keys fail with the
//! unknown-accessor error instead of being silently dropped.

use bson::Document;

use crate::{error::MapperResult, model::Model, record::Record};

/// Projects a record into its flat document representation.
pub fn to_document(record: &Record) -> Document {
    let mut document = Document::new();

    for (name, value) in record.entries() {
        document.insert(name, value.clone());
    }

    document
}

/// Constructs an instance of `M` from a stored document.
///
/// Every key is applied through the record's validated setter; after all
/// keys are applied the type's populate hook runs exactly once.
///
/// # Errors
///
/// [`MapperError::UnknownField`](crate::error::MapperError::UnknownField)
/// for keys not in the registry, or any validation failure for the stored
/// values. A failing key aborts construction.
pub fn from_document<M: Model>(document: Document) -> MapperResult<M> {
    let mut record = Record::new(M::schema());

    for (key, value) in document {
        record.set(&key, value)?;
    }

    let mut instance = M::from_record(record);
    instance.on_populate();

    Ok(instance)
}
