//! The validator chain: declared-type checking plus an extensible rule table.
//!
//! Validation runs synchronously on the calling thread on every field
//! mutation, before the mutation is committed. It is pure: the only effect of
//! a failing check is the returned error. Rule behaviors live in a
//! process-wide table keyed by rule name, so new rules can be registered
//! without touching the chain itself.

use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, PoisonError, RwLock},
};

use bson::Bson;

use crate::{
    error::{MapperError, MapperResult},
    field::{FieldDescriptor, value_type_name},
};

/// A named validation rule bound to a per-field argument.
///
/// Implementations inspect a candidate value against the field's declared
/// metadata and either accept it or signal a specific failure.
pub trait Rule: Send + Sync {
    /// Checks `value` under this rule with the field's declared argument.
    fn check(&self, arg: &Bson, value: &Bson, field: &FieldDescriptor) -> MapperResult<()>;
}

/// Built-in `required` rule: rejects nil assignments when its argument is true.
struct Required;

impl Rule for Required {
    fn check(&self, arg: &Bson, value: &Bson, field: &FieldDescriptor) -> MapperResult<()> {
        if matches!(arg, Bson::Boolean(true)) && matches!(value, Bson::Null) {
            return Err(MapperError::RequiredField(field.name().to_string()));
        }

        Ok(())
    }
}

type RuleTable = HashMap<String, Arc<dyn Rule>>;

static RULES: LazyLock<RwLock<RuleTable>> = LazyLock::new(|| {
    let mut table: RuleTable = HashMap::new();
    table.insert("required".to_string(), Arc::new(Required));

    RwLock::new(table)
});

/// Registers a rule behavior under `name` in the process-wide rule table.
///
/// Registration is intended for definition time, before instances of the
/// types using the rule are mutated. Re-registering a name replaces the
/// previous behavior.
pub fn register_rule(name: impl Into<String>, rule: Arc<dyn Rule>) {
    RULES
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name.into(), rule);
}

/// Validates a candidate value against a field's declared type and rules.
///
/// The type check runs first: a non-nil value whose runtime type is not an
/// instance of the declared type fails with [`MapperError::FieldType`]. Each
/// rule bound to the field is then resolved in the rule table and invoked in
/// declaration order; an unregistered rule name fails with
/// [`MapperError::UnknownRule`].
pub fn validate(value: &Bson, field: &FieldDescriptor) -> MapperResult<()> {
    if !field.field_type().accepts(value) {
        return Err(MapperError::FieldType {
            field: field.name().to_string(),
            expected: field.field_type().name().to_string(),
            actual: value_type_name(value).to_string(),
        });
    }

    // Resolve all rule behaviors up front so no lock is held while they run.
    let rules = {
        let table = RULES.read().unwrap_or_else(PoisonError::into_inner);

        field
            .rules()
            .iter()
            .map(|(name, arg)| {
                table
                    .get(name)
                    .cloned()
                    .map(|rule| (rule, arg))
                    .ok_or_else(|| MapperError::UnknownRule(name.clone()))
            })
            .collect::<MapperResult<Vec<_>>>()?
    };

    for (rule, arg) in rules {
        rule.check(arg, value, field)?;
    }

    Ok(())
}
