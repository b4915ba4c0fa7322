//! Registry-driven instance state.
//!
//! A [`Record`] holds one BSON slot per descriptor of its type's
//! [`Schema`](crate::schema::Schema), defaulting to nil. All field access is
//! keyed by name and every mutation runs through the validator chain before
//! it is committed, so a rejected assignment leaves the prior value
//! untouched. Accessing an unregistered name is the unknown-accessor failure.

use bson::{Bson, oid::ObjectId};
use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    error::{MapperError, MapperResult},
    schema::{ID_FIELD, Schema},
    validate,
};

const NIL: Bson = Bson::Null;

/// Per-instance field storage for one host type.
#[derive(Debug, Clone)]
pub struct Record {
    schema: &'static Schema,
    values: Vec<Bson>,
}

impl Record {
    /// Creates a blank record: every field of the schema is nil.
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            values: vec![Bson::Null; schema.fields().len()],
        }
    }

    /// The registry this record is keyed by.
    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// Returns the current value of a registered field.
    ///
    /// # Errors
    ///
    /// [`MapperError::UnknownField`] when `name` is not registered.
    pub fn get(&self, name: &str) -> MapperResult<&Bson> {
        self.schema
            .index_of(name)
            .map(|idx| &self.values[idx])
            .ok_or_else(|| MapperError::UnknownField(name.to_string()))
    }

    /// Infallible lookup for generated wrapper accessors, which only name
    /// fields the registry is known to hold. Unknown names read as nil.
    pub fn value(&self, name: &str) -> &Bson {
        self.schema
            .index_of(name)
            .map(|idx| &self.values[idx])
            .unwrap_or(&NIL)
    }

    /// Assigns a value to a registered field.
    ///
    /// The candidate runs through the validator chain with the field's
    /// declared type and rules; on rejection nothing is stored.
    ///
    /// # Errors
    ///
    /// [`MapperError::UnknownField`] for unregistered names, or the specific
    /// validation failure.
    pub fn set(&mut self, name: &str, value: Bson) -> MapperResult<()> {
        let idx = self
            .schema
            .index_of(name)
            .ok_or_else(|| MapperError::UnknownField(name.to_string()))?;

        validate::validate(&value, &self.schema.fields()[idx])?;
        self.values[idx] = value;

        Ok(())
    }

    /// The current identifier value (nil until first persisted).
    pub fn id(&self) -> &Bson {
        self.value(ID_FIELD)
    }

    /// Returns whether this record has never been assigned an identifier.
    pub fn is_transient(&self) -> bool {
        matches!(self.id(), Bson::Null)
    }

    /// Assigns a freshly generated identifier.
    pub fn assign_id(&mut self, id: ObjectId) -> MapperResult<()> {
        self.set(ID_FIELD, Bson::ObjectId(id))
    }

    /// Clears the identifier, returning the record to the transient state.
    pub fn clear_id(&mut self) -> MapperResult<()> {
        self.set(ID_FIELD, Bson::Null)
    }

    /// Iterates `(field name, current value)` in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Bson)> {
        self.schema
            .fields()
            .iter()
            .map(|field| field.name())
            .zip(self.values.iter())
    }
}

impl Serialize for Record {
    /// A record serializes as its flat document projection, nils included.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;

        for (name, value) in self.entries() {
            map.serialize_entry(name, value)?;
        }

        map.end()
    }
}
