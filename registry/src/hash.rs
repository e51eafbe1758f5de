//! Deterministic registry hashing.

use blake3::Hasher;

use crate::registry::SchemaRegistry;

/// Computes a deterministic hash over the registered schemas.
///
/// Two registries hash equal exactly when they declare the same type names
/// with the same persistent fields in the same orders. Constructors and
/// post-restore hooks are behavior, not wire shape, and do not participate.
/// Callers can stamp save files with this value to detect schema drift.
#[must_use]
pub fn registry_hash(registry: &SchemaRegistry) -> u64 {
    let mut hasher = Hasher::new();
    write_u32(&mut hasher, registry.len() as u32);

    for type_name in registry.type_names() {
        write_str(&mut hasher, type_name);
        let fields = registry.fields_of(type_name);
        write_u32(&mut hasher, fields.len() as u32);
        for field in fields {
            write_str(&mut hasher, field);
        }
    }

    let hash = hasher.finalize();
    let bytes = hash.as_bytes();
    u64::from_le_bytes(bytes[0..8].try_into().expect("hash is at least 8 bytes"))
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}
