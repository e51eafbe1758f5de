//! The dynamic value type the codec traverses.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::instance::Instance;

/// A shared, mutable handle to a typed instance.
pub type SharedInstance = Rc<RefCell<Instance>>;

/// A shared, mutable handle to a plain (schema-less) record.
pub type SharedMap = Rc<RefCell<BTreeMap<String, Value>>>;

/// One position in an object graph.
///
/// `Instance` and `Map` are shared handles: cloning a [`Value`] holding one
/// clones the handle, not the contents, so sharing and cycles survive. All
/// other variants are owned data copied by value.
///
/// The derived [`PartialEq`] is structural and does not terminate on graphs
/// that contain reference cycles; use [`Value::ptr_eq`] for identity
/// comparisons. The same caveat applies to the derived [`Debug`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Map(SharedMap),
    Instance(SharedInstance),
}

impl Value {
    /// Creates an empty shared plain record.
    #[must_use]
    pub fn new_map() -> SharedMap {
        Rc::new(RefCell::new(BTreeMap::new()))
    }

    /// Creates a plain-record value from entries.
    #[must_use]
    pub fn map_from<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        let map: BTreeMap<String, Self> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        Self::Map(Rc::new(RefCell::new(map)))
    }

    /// Returns `true` if this value is `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer payload, if any.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the numeric payload widened to `f64`, if any.
    ///
    /// Integers widen lossily above 2^53, like the JSON number line they
    /// round-trip through.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the array elements, if any.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Returns the shared plain-record handle, if any.
    #[must_use]
    pub const fn as_map(&self) -> Option<&SharedMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the shared instance handle, if any.
    #[must_use]
    pub const fn as_instance(&self) -> Option<&SharedInstance> {
        match self {
            Self::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Returns `true` if both values are the *same* shared instance or
    /// record.
    ///
    /// Owned variants are never identical to anything, including themselves.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Instance(a), Self::Instance(b)) => Rc::ptr_eq(a, b),
            (Self::Map(a), Self::Map(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::Array(values)
    }
}

impl From<SharedInstance> for Value {
    fn from(instance: SharedInstance) -> Self {
        Self::Instance(instance)
    }
}

impl From<SharedMap> for Value {
    fn from(map: SharedMap) -> Self {
        Self::Map(map)
    }
}
