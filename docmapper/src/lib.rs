//! Main docmapper crate providing a minimal object-document mapper.
//!
//! This crate is the primary entry point for users of the docmapper
//! framework. A host type declares its fields once and gains persistence
//! operations (save, update, remove, count, find), lifecycle hooks and
//! declarative per-field validation against a schemaless document store.
//!
//! # Features
//!
//! - **Declarative host types** - The [`document!`] macro turns field
//!   metadata into validated accessors and a per-type registry
//! - **Validator chain** - Declared-type checks plus an extensible rule
//!   table (built-in `required`), run on every field mutation
//! - **Dynamic finders** - `find_by_<field>[_and_<field>]*` selectors parsed
//!   into equality filters over the registry
//! - **Pluggable backends** - The persistence protocol is generic over a
//!   small `StoreBackend` boundary; an in-memory backend ships in [`memory`]
//!
//! # Quick Start
//!
//! ```ignore
//! use docmapper::{document, memory::MemoryStore, prelude::*};
//! use futures::executor::block_on;
//!
//! document! {
//!     pub struct User in "users" {
//!         name: String { required: true },
//!         age: Int,
//!     }
//! }
//!
//! let store = DocumentStore::new(MemoryStore::new());
//!
//! let mut user = User::new();
//! user.set_name("Alice")?;
//! user.set_age(30)?;
//! block_on(store.save(&mut user))?;
//!
//! let found: Vec<User> =
//!     block_on(store.find_by("find_by_name", vec!["Alice".into()]))?;
//! assert_eq!(found.len(), 1);
//! # Ok::<(), docmapper::error::MapperError>(())
//! ```
//!
//! # Lifecycle hooks
//!
//! A trailing `impl` block inside [`document!`] overrides the `Model` hook
//! defaults: `before_save` runs before anything is written (a failure aborts
//! the save entirely), `after_save` runs once the insert has committed, and
//! `on_populate` runs once on every instance loaded from the store.
//!
//! # Backends
//!
//! - [`memory`] - Fast in-memory storage for development and testing

#[allow(unused_extern_crates)]
extern crate self as docmapper;

pub mod prelude;

pub use docmapper_core::{
    backend, codec, error, field, finder, model, query, record, schema, store, validate,
};

// Re-export BSON types for convenience
pub use bson;

pub use docmapper_macros::document;

/// In-memory storage backend implementations.
pub mod memory {
    pub use docmapper_memory::{MemoryStore, MemoryStoreBuilder};
}
