//! Convenient re-exports of commonly used types from docmapper.
//!
//! Import this prelude module to quickly access the most frequently used
//! types and traits without needing to import from multiple sub-modules:
//!
//! ```ignore
//! use docmapper::prelude::*;
//! ```

pub use docmapper_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    error::{MapperError, MapperResult},
    field::{FieldDescriptor, FieldType},
    finder::NotAFinder,
    model::Model,
    query::Filter,
    record::Record,
    schema::{Schema, SchemaBuilder},
    store::DocumentStore,
    validate::{Rule, register_rule},
};

pub use docmapper_macros::document;
