//! Field metadata: declared type tags and per-field descriptors.
//!
//! A [`FieldDescriptor`] is the declarative unit of the mapper: a name, a
//! declared type tag and a set of validation rules. Descriptors are immutable
//! once registered in a [`Schema`](crate::schema::Schema).

use bson::Bson;

/// Type tag for a declared field.
///
/// The tag is checked against the runtime BSON representation of a candidate
/// value before any assignment takes effect. `Any` accepts every value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// No type constraint.
    Any,
    /// UTF-8 string.
    String,
    /// 32-bit or 64-bit integer.
    Int,
    /// 64-bit floating point number.
    Double,
    /// Boolean.
    Bool,
    /// 12-byte object identifier.
    ObjectId,
    /// Ordered array of values.
    Array,
    /// Nested document.
    Document,
    /// UTC datetime.
    DateTime,
}

impl FieldType {
    /// Returns whether a runtime value is an instance of this declared type.
    ///
    /// Nil values are always accepted here; nil-ness is the concern of the
    /// `required` rule, not of the type check.
    pub fn accepts(&self, value: &Bson) -> bool {
        match self {
            FieldType::Any => true,
            FieldType::String => matches!(value, Bson::Null | Bson::String(_)),
            FieldType::Int => matches!(value, Bson::Null | Bson::Int32(_) | Bson::Int64(_)),
            FieldType::Double => matches!(value, Bson::Null | Bson::Double(_)),
            FieldType::Bool => matches!(value, Bson::Null | Bson::Boolean(_)),
            FieldType::ObjectId => matches!(value, Bson::Null | Bson::ObjectId(_)),
            FieldType::Array => matches!(value, Bson::Null | Bson::Array(_)),
            FieldType::Document => matches!(value, Bson::Null | Bson::Document(_)),
            FieldType::DateTime => matches!(value, Bson::Null | Bson::DateTime(_)),
        }
    }

    /// Human-readable name of this type tag, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Any => "Any",
            FieldType::String => "String",
            FieldType::Int => "Int",
            FieldType::Double => "Double",
            FieldType::Bool => "Bool",
            FieldType::ObjectId => "ObjectId",
            FieldType::Array => "Array",
            FieldType::Document => "Document",
            FieldType::DateTime => "DateTime",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Human-readable name of a runtime value's BSON type, used in error messages.
pub fn value_type_name(value: &Bson) -> &'static str {
    match value {
        Bson::Null => "Null",
        Bson::String(_) => "String",
        Bson::Int32(_) | Bson::Int64(_) => "Int",
        Bson::Double(_) => "Double",
        Bson::Boolean(_) => "Bool",
        Bson::ObjectId(_) => "ObjectId",
        Bson::Array(_) => "Array",
        Bson::Document(_) => "Document",
        Bson::DateTime(_) => "DateTime",
        _ => "other",
    }
}

/// Declarative metadata for one persisted attribute.
///
/// Rules are stored as `(rule name, rule argument)` pairs; the behavior
/// behind a rule name is resolved through the process-wide rule table at
/// validation time (see [`validate`](crate::validate)).
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    field_type: FieldType,
    rules: Vec<(String, Bson)>,
}

impl FieldDescriptor {
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        rules: Vec<(String, Bson)>,
    ) -> Self {
        Self { name: name.into(), field_type, rules }
    }

    /// The field's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type tag.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// The validation rules bound to this field, in declaration order.
    pub fn rules(&self) -> &[(String, Bson)] {
        &self.rules
    }
}
