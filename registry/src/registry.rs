//! Registry construction and frozen lookups.

use std::collections::HashMap;

use crate::error::{RegistryError, RegistryResult};
use crate::types::{Constructor, TypeDef};

/// The frozen, read-only set of registered types.
///
/// Built once at startup via [`SchemaRegistry::builder`] and borrowed by
/// every encode/decode call afterwards.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    types: HashMap<String, TypeDef>,
    order: Vec<String>,
}

impl SchemaRegistry {
    /// Creates a registry builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder { types: Vec::new() }
    }

    /// Looks up a descriptor by type name.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&TypeDef> {
        self.types.get(type_name)
    }

    /// Returns `true` if the type name is registered.
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    /// Resolves a type name to its construction function.
    pub fn resolve_constructor(&self, type_name: &str) -> RegistryResult<Constructor> {
        self.get(type_name)
            .map(TypeDef::constructor)
            .ok_or_else(|| RegistryError::UnknownType {
                type_name: type_name.to_owned(),
            })
    }

    /// Persistent field names for a type, in declaration order.
    ///
    /// Empty for types registered without fields and for unknown names;
    /// distinguishing those cases is [`SchemaRegistry::get`]'s job.
    #[must_use]
    pub fn fields_of(&self, type_name: &str) -> &[String] {
        self.get(type_name).map_or(&[], TypeDef::fields)
    }

    /// Registered type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Builder for [`SchemaRegistry`]: the registration phase.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    types: Vec<TypeDef>,
}

impl RegistryBuilder {
    /// Adds a type descriptor.
    #[must_use]
    pub fn register(mut self, def: TypeDef) -> Self {
        self.types.push(def);
        self
    }

    /// Validates all descriptors and freezes the registry.
    pub fn build(self) -> RegistryResult<SchemaRegistry> {
        let mut types = HashMap::with_capacity(self.types.len());
        let mut order = Vec::with_capacity(self.types.len());

        for def in self.types {
            validate(&def)?;
            let type_name = def.type_name().to_owned();
            if types.insert(type_name.clone(), def).is_some() {
                return Err(RegistryError::DuplicateTypeName { type_name });
            }
            order.push(type_name);
        }

        Ok(SchemaRegistry { types, order })
    }
}

fn validate(def: &TypeDef) -> RegistryResult<()> {
    let type_name = def.type_name();
    if type_name.is_empty() {
        return Err(RegistryError::InvalidTypeName {
            type_name: type_name.to_owned(),
        });
    }

    for field in def.fields() {
        if field.is_empty() || field.starts_with('@') {
            return Err(RegistryError::InvalidFieldName {
                type_name: type_name.to_owned(),
                field: field.clone(),
            });
        }
    }

    let produced = def.construct();
    if produced.type_name() != type_name {
        return Err(RegistryError::ConstructorMismatch {
            type_name: type_name.to_owned(),
            produced: produced.type_name().to_owned(),
        });
    }

    Ok(())
}
