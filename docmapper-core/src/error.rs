//! Error types and result types for mapper operations.
//!
//! This module provides error handling for all mapper operations. Use
//! [`MapperResult<T>`] as the return type for fallible operations. All errors
//! propagate synchronously to the immediate caller; there is no retry or
//! suppression layer inside the core.

use bson::error::Error as BsonError;
use thiserror::Error;

/// Represents all possible errors raised by the mapping layer or its backend.
///
/// This enum covers field validation failures, accessor dispatch failures,
/// persistence lifecycle misuse, and backend-specific errors.
#[derive(Error, Debug)]
pub enum MapperError {
    /// A value's runtime type does not match the field's declared type.
    /// The assignment did not take effect.
    #[error("field {field} expects {expected}, got {actual}")]
    FieldType {
        /// The field whose assignment was rejected.
        field: String,
        /// The declared field type.
        expected: String,
        /// The runtime type of the rejected value.
        actual: String,
    },
    /// A field declared `required` was assigned a nil value.
    #[error("required field {0} is not set")]
    RequiredField(String),
    /// A document key or accessor name does not correspond to any registered field.
    #[error("unknown field: {0}")]
    UnknownField(String),
    /// A field references a validation rule that is not in the rule table.
    #[error("unknown validation rule: {0}")]
    UnknownRule(String),
    /// A custom validation rule rejected the assigned value.
    #[error("field {field} violates rule {rule}")]
    RuleViolation {
        /// The field whose assignment was rejected.
        field: String,
        /// The name of the violated rule.
        rule: String,
    },
    /// The operation requires a persisted instance but the identifier is nil.
    #[error("instance has no identifier; save it first")]
    MissingIdentifier,
    /// A requested operation name is neither statically known nor a valid dynamic finder.
    #[error("unrecognized selector: {0}")]
    UnrecognizedSelector(String),
    /// A `before_save` or `after_save` hook signalled failure.
    #[error("hook failed: {0}")]
    Hook(String),
    /// The document violates structural constraints (e.g. missing `_id`).
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    /// Serialization/deserialization error when converting document values.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// A document with the given identifier already exists in the collection.
    #[error("document {0} already exists in collection {1}")]
    DocumentAlreadyExists(String, String),
    /// The requested document was not found in the collection.
    #[error("document not found {0} in collection {1}")]
    DocumentNotFound(String, String),
    /// The requested collection does not exist in the store.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),
    /// An error occurred in the underlying storage backend.
    #[error("backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for mapper operations.
pub type MapperResult<T> = Result<T, MapperError>;

impl MapperError {
    /// Convenience constructor for hook failures signalled from user hooks.
    pub fn hook(message: impl Into<String>) -> Self {
        MapperError::Hook(message.into())
    }
}

impl From<BsonError> for MapperError {
    fn from(err: BsonError) -> Self {
        MapperError::Serialization(err.to_string())
    }
}
