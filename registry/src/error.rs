//! Registry configuration and lookup errors.

use std::fmt;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors raised while building or querying a registry.
///
/// Everything except `UnknownType` is a configuration error surfaced by
/// [`RegistryBuilder::build`](crate::RegistryBuilder::build), before any
/// encode or decode can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two descriptors registered the same type name.
    DuplicateTypeName { type_name: String },

    /// A type name is empty.
    InvalidTypeName { type_name: String },

    /// A field name is empty or collides with the reserved `@` prefix.
    InvalidFieldName { type_name: String, field: String },

    /// A constructor produced an instance tagged with a different type name.
    ConstructorMismatch { type_name: String, produced: String },

    /// No type was registered under this name.
    UnknownType { type_name: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateTypeName { type_name } => {
                write!(f, "type {type_name:?} registered twice")
            }
            Self::InvalidTypeName { type_name } => {
                write!(f, "invalid type name {type_name:?}")
            }
            Self::InvalidFieldName { type_name, field } => {
                write!(f, "invalid field name {field:?} on type {type_name:?}")
            }
            Self::ConstructorMismatch {
                type_name,
                produced,
            } => {
                write!(
                    f,
                    "constructor for {type_name:?} produced an instance tagged {produced:?}"
                )
            }
            Self::UnknownType { type_name } => {
                write!(f, "unknown type {type_name:?}")
            }
        }
    }
}

impl std::error::Error for RegistryError {}
