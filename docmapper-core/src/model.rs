//! The host-type seam: the trait every mapped type implements.
//!
//! A host type declares its fields once (the [`document!`] macro in the
//! facade crate generates the boilerplate) and gains the persistence protocol
//! of [`DocumentStore`](crate::store::DocumentStore) for free. The lifecycle
//! hooks are provided methods: override `before_save`/`after_save` to wrap
//! persistence and `on_populate` for post-load side effects.
//!
//! [`document!`]: https://docs.rs/docmapper

use crate::{codec, error::MapperResult, record::Record, schema::Schema};

/// A type mapped onto a document collection.
pub trait Model: Sized {
    /// The type's field registry. Built once, process lifetime.
    fn schema() -> &'static Schema;

    /// The instance's field storage.
    fn record(&self) -> &Record;

    /// Mutable access to the instance's field storage.
    fn record_mut(&mut self) -> &mut Record;

    /// Wraps a populated record into an instance.
    fn from_record(record: Record) -> Self;

    /// Projects the instance into its flat document form, every field in
    /// registration order, nils included.
    fn to_document(&self) -> bson::Document {
        codec::to_document(self.record())
    }

    /// Runs before `save` does anything. A failure here aborts the whole
    /// save: no identifier is generated and nothing is written.
    fn before_save(&mut self) -> MapperResult<()> {
        Ok(())
    }

    /// Runs after the insert has committed. A failure propagates to the
    /// caller of `save` but does not undo the insert.
    fn after_save(&mut self) -> MapperResult<()> {
        Ok(())
    }

    /// Runs once on every instance freshly constructed from a stored
    /// document, after all fields are populated.
    fn on_populate(&mut self) {}
}
