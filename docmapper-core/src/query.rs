//! Equality filters for selecting documents.
//!
//! A [`Filter`] is an ordered mapping from field name to required value. It
//! is the only predicate shape the persistence protocol needs: explicit
//! queries build one with [`Filter::eq`], and the dynamic finder resolver
//! produces one from a parsed selector name.
//!
//! # Example
//!
//! ```ignore
//! use docmapper::query::Filter;
//!
//! let filter = Filter::new()
//!     .eq("status", "active")
//!     .eq("age", 30);
//! ```

use bson::{Bson, Document};

/// An ordered equality predicate over document fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    entries: Vec<(String, Bson)>,
}

impl Filter {
    /// Creates an empty filter (matches every document).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality constraint on `field`.
    ///
    /// A repeated field name overwrites the earlier constraint.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Bson>) -> Self {
        let field = field.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }

        self
    }

    /// Returns whether this filter has no constraints.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of constrained fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The required value for `field`, if constrained.
    pub fn get(&self, field: &str) -> Option<&Bson> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Iterates the constraints in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bson)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Converts this filter into its flat document form.
    pub fn into_document(self) -> Document {
        let mut document = Document::new();

        for (field, value) in self.entries {
            document.insert(field, value);
        }

        document
    }
}

impl From<Filter> for Document {
    fn from(filter: Filter) -> Document {
        filter.into_document()
    }
}

impl std::fmt::Display for Filter {
    /// Renders the constraints as `field=value` pairs, for error messages.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
        }

        Ok(())
    }
}

impl FromIterator<(String, Bson)> for Filter {
    fn from_iter<I: IntoIterator<Item = (String, Bson)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Filter::new(), |filter, (field, value)| filter.eq(field, value))
    }
}
