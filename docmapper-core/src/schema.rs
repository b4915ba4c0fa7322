//! Per-type field registry and collection binding.
//!
//! A [`Schema`] is the definition-time state of one host type: an ordered set
//! of [`FieldDescriptor`]s (the identifier field `_id` always first) and the
//! name of the backing collection. A schema is built once per type, lives for
//! the process lifetime of that type and is read-only afterwards, so
//! concurrent instance use needs no synchronization here.

use bson::Bson;

use crate::field::{FieldDescriptor, FieldType};

/// Name of the implicit identifier field present in every registry.
pub const ID_FIELD: &str = "_id";

/// The field registry and collection binding of one host type.
#[derive(Debug)]
pub struct Schema {
    type_name: String,
    collection: String,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Starts building a schema for the named host type.
    ///
    /// The identifier field `_id` is registered first, before any declared
    /// field, with no type constraint.
    pub fn builder(type_name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            type_name: type_name.into(),
            collection: None,
            fields: vec![FieldDescriptor::new(ID_FIELD, FieldType::Any, Vec::new())],
        }
    }

    /// The host type name this schema was declared for.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The resolved backing collection name. Fixed for the process lifetime.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The registered descriptors, in registration order (`_id` first).
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The registered field names, in registration order (`_id` first).
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(FieldDescriptor::name).collect()
    }

    /// Returns whether `name` is a registered field.
    pub fn has_field(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Looks up the descriptor registered under `name`.
    pub fn descriptor(&self, name: &str) -> Option<&FieldDescriptor> {
        self.index_of(name).map(|idx| &self.fields[idx])
    }

    /// Position of `name` in registration order.
    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }
}

/// Builder for [`Schema`], the definition-time surface of a host type.
///
/// `field` is idempotent (first registration wins) and `collection` may be
/// given at most once; once `build` resolves the binding it never changes.
#[derive(Debug)]
pub struct SchemaBuilder {
    type_name: String,
    collection: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    /// Registers a field if `name` is new; re-registration is a no-op.
    pub fn field(
        mut self,
        name: &str,
        field_type: FieldType,
        rules: Vec<(&str, Bson)>,
    ) -> Self {
        if !self.fields.iter().any(|field| field.name() == name) {
            self.fields.push(FieldDescriptor::new(
                name,
                field_type,
                rules
                    .into_iter()
                    .map(|(rule, arg)| (rule.to_string(), arg))
                    .collect(),
            ));
        }
        self
    }

    /// Binds an explicit collection name instead of the pluralized default.
    pub fn collection(mut self, name: &str) -> Self {
        self.collection = Some(name.to_string());
        self
    }

    /// Resolves the collection binding and returns the finished registry.
    pub fn build(self) -> Schema {
        let collection = self
            .collection
            .unwrap_or_else(|| default_collection_name(&self.type_name));

        Schema {
            type_name: self.type_name,
            collection,
            fields: self.fields,
        }
    }
}

/// Default collection binding: lower-case the first letter of the type name
/// and append `s` (`Persona` becomes `personas`).
pub fn default_collection_name(type_name: &str) -> String {
    let mut chars = type_name.chars();
    match chars.next() {
        Some(first) => format!("{}{}s", first.to_lowercase(), chars.as_str()),
        None => "s".to_string(),
    }
}
