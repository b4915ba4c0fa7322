//! A minimal object-document mapper: declarative field metadata turned into runtime behavior.
//!
//! This crate is the core of the docmapper project and provides:
//!
//! - **Field registry** ([`schema`]) - Per-type declarative field metadata with an implicit `_id`
//! - **Validator chain** ([`validate`]) - Composable, extensible per-field validation rules
//! - **Instance state** ([`record`]) - Registry-driven field storage with validated assignment
//! - **Document codec** ([`codec`]) - Conversion between instances and flat BSON documents
//! - **Dynamic finders** ([`finder`]) - `find_by_<field>[_and_<field>]*` selector parsing
//! - **Persistence protocol** ([`store`]) - save / update / remove / count / find with hooks
//! - **Store backend abstraction** ([`backend`]) - The interface consumed from a document store
//! - **Error handling** ([`error`]) - Crate-wide error and result types
//!
//! # Example
//!
//! ```ignore
//! use docmapper_core::{model::Model, schema::Schema, field::FieldType, record::Record};
//!
//! pub struct User {
//!     record: Record,
//! }
//!
//! impl Model for User {
//!     fn schema() -> &'static Schema {
//!         static SCHEMA: std::sync::LazyLock<Schema> = std::sync::LazyLock::new(|| {
//!             Schema::builder("User")
//!                 .field("name", FieldType::String, vec![("required", true.into())])
//!                 .field("age", FieldType::Int, vec![])
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//!
//!     fn record(&self) -> &Record {
//!         &self.record
//!     }
//!
//!     fn record_mut(&mut self) -> &mut Record {
//!         &mut self.record
//!     }
//!
//!     fn from_record(record: Record) -> Self {
//!         Self { record }
//!     }
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as docmapper_core;

pub mod backend;
pub mod codec;
pub mod error;
pub mod field;
pub mod finder;
pub mod model;
pub mod query;
pub mod record;
pub mod schema;
pub mod store;
pub mod validate;
