//! In-memory document storage backend for docmapper.
//!
//! This crate provides a thread-safe, in-memory implementation of the
//! `StoreBackend` trait. Documents live in HashMaps behind an async-aware
//! read-write lock, which makes the store ideal for tests and small embedded
//! deployments.
//!
//! # Quick Start
//!
//! ```ignore
//! use docmapper::{store::DocumentStore, memory::MemoryStore};
//!
//! let store = DocumentStore::new(MemoryStore::new());
//! let mut user = User::new();
//! user.set_name("Alice")?;
//! store.save(&mut user).await?;
//! ```

#[allow(unused_extern_crates)]
extern crate self as docmapper_memory;

pub mod evaluator;
pub mod store;

pub use store::{MemoryStore, MemoryStoreBuilder};
