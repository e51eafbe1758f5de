//! Typed instances with open field maps.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::value::{SharedInstance, Value};

/// A typed graph node: a type-name tag plus an open set of named fields.
///
/// Fields are an open map rather than a fixed struct so the decoder can
/// assign any field a document carries, including fields the current schema
/// no longer declares. Which fields actually *persist* is decided elsewhere,
/// by the schema registry — an instance itself accepts anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    type_name: String,
    fields: BTreeMap<String, Value>,
}

impl Instance {
    /// Creates an instance with no fields.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Returns the type-name tag.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Sets a field, replacing any previous value.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Sets a field, builder style.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns a field's value, if set.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the field is set.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterates over all set fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of set fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no fields are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Wraps the instance in a shared handle.
    #[must_use]
    pub fn into_shared(self) -> SharedInstance {
        Rc::new(RefCell::new(self))
    }
}
