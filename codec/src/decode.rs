//! Document decoding: instance construction and reference resolution.

use std::collections::HashMap;

use graph::Value;
use registry::SchemaRegistry;
use wire::{parse_document, Limits, NodeId, WireNode};

use crate::error::{CodecError, CodecResult};

/// Per-call decoder state: ids already bound to reconstructed values.
///
/// Lives for exactly one decode call, threaded through the recursion.
struct DecodeState {
    instances: HashMap<NodeId, Value>,
}

impl DecodeState {
    fn new() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }

    /// Binds an id to a freshly constructed value.
    ///
    /// Must happen before the node's fields decode; that ordering is what
    /// lets a field reference back to its own, still-empty ancestor.
    fn bind(&mut self, id: NodeId, value: Value) -> CodecResult<()> {
        if self.instances.insert(id, value).is_some() {
            return Err(CodecError::DuplicateId { id });
        }
        Ok(())
    }

    fn resolve(&self, id: NodeId) -> CodecResult<Value> {
        self.instances
            .get(&id)
            .cloned()
            .ok_or(CodecError::DanglingReference { id })
    }
}

/// Decodes document text into a fresh graph.
///
/// Fails atomically: on any error the partially reconstructed graph is
/// dropped before returning, so callers never observe it and can keep their
/// prior in-memory state.
pub fn decode(registry: &SchemaRegistry, text: &str, limits: &Limits) -> CodecResult<Value> {
    let node = parse_document(text, limits)?;
    decode_node(registry, &node)
}

/// Decodes an already-parsed wire-node tree.
pub fn decode_node(registry: &SchemaRegistry, node: &WireNode) -> CodecResult<Value> {
    let mut state = DecodeState::new();
    decode_value(registry, &mut state, node)
}

fn decode_value(
    registry: &SchemaRegistry,
    state: &mut DecodeState,
    node: &WireNode,
) -> CodecResult<Value> {
    match node {
        WireNode::Null => Ok(Value::Null),
        WireNode::Bool(flag) => Ok(Value::Bool(*flag)),
        WireNode::Int(int) => Ok(Value::Int(*int)),
        WireNode::Float(float) => Ok(Value::Float(*float)),
        WireNode::String(text) => Ok(Value::String(text.clone())),
        WireNode::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(decode_value(registry, state, item)?);
            }
            Ok(Value::Array(values))
        }
        WireNode::Ref(id) => state.resolve(*id),
        WireNode::Plain { id, entries } => {
            let map = Value::new_map();
            // An identified plain record binds before its entries decode,
            // mirroring the instance ordering invariant.
            if let Some(id) = *id {
                state.bind(id, Value::Map(map.clone()))?;
            }
            for (key, entry) in entries {
                let value = decode_value(registry, state, entry)?;
                map.borrow_mut().insert(key.clone(), value);
            }
            Ok(Value::Map(map))
        }
        WireNode::Instance {
            id,
            type_name,
            fields,
        } => {
            let Some(def) = registry.get(type_name) else {
                return Err(CodecError::UnknownType {
                    type_name: type_name.clone(),
                });
            };

            let instance = def.construct().into_shared();
            state.bind(*id, Value::Instance(instance.clone()))?;

            // Every field the document carries is assigned, declared or not;
            // stale documents load with their extra fields intact.
            for (name, field) in fields {
                let value = decode_value(registry, state, field)?;
                instance.borrow_mut().set(name.clone(), value);
            }

            if let Some(hook) = def.post_restore_hook() {
                hook(&instance);
            }

            Ok(Value::Instance(instance))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph::{Instance, SharedInstance};
    use registry::TypeDef;

    fn waypoint() -> Instance {
        Instance::new("Waypoint")
            .with("x", 0)
            .with("y", 0)
            .with("next", Value::Null)
    }

    fn test_registry() -> SchemaRegistry {
        SchemaRegistry::builder()
            .register(
                TypeDef::new("Waypoint", waypoint)
                    .field("x")
                    .field("y")
                    .field("next"),
            )
            .build()
            .unwrap()
    }

    fn decode_text(registry: &SchemaRegistry, text: &str) -> CodecResult<Value> {
        decode(registry, text, &Limits::default())
    }

    #[test]
    fn primitives_decode_directly() {
        let registry = test_registry();
        assert_eq!(decode_text(&registry, "null").unwrap(), Value::Null);
        assert_eq!(decode_text(&registry, "3").unwrap(), Value::Int(3));
        assert_eq!(decode_text(&registry, "2.5").unwrap(), Value::Float(2.5));
        assert_eq!(
            decode_text(&registry, "\"s\"").unwrap(),
            Value::from("s")
        );
    }

    #[test]
    fn instance_node_constructs_and_assigns() {
        let registry = test_registry();
        let value =
            decode_text(&registry, r#"{"@id": 1, "@type": "Waypoint", "x": 4}"#).unwrap();
        let instance = value.as_instance().unwrap().borrow();
        assert_eq!(instance.type_name(), "Waypoint");
        assert_eq!(instance.get("x"), Some(&Value::Int(4)));
        // Untouched declared fields keep constructor defaults.
        assert_eq!(instance.get("y"), Some(&Value::Int(0)));
    }

    #[test]
    fn undeclared_document_fields_are_still_assigned() {
        let registry = test_registry();
        let value = decode_text(
            &registry,
            r#"{"@id": 1, "@type": "Waypoint", "legacy_field": true}"#,
        )
        .unwrap();
        let instance = value.as_instance().unwrap().borrow();
        assert_eq!(instance.get("legacy_field"), Some(&Value::Bool(true)));
    }

    #[test]
    fn unknown_type_fails() {
        let registry = test_registry();
        let err = decode_text(&registry, r#"{"@id": 1, "@type": "Ghost"}"#).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownType {
                type_name: "Ghost".to_owned()
            }
        );
    }

    #[test]
    fn dangling_reference_fails() {
        let registry = test_registry();
        let err = decode_text(&registry, r#"{"@ref": 7}"#).unwrap_err();
        assert_eq!(err, CodecError::DanglingReference { id: 7 });
    }

    #[test]
    fn duplicate_id_fails() {
        let registry = test_registry();
        let text = r#"[
            {"@id": 1, "@type": "Waypoint"},
            {"@id": 1, "@type": "Waypoint"}
        ]"#;
        let err = decode_text(&registry, text).unwrap_err();
        assert_eq!(err, CodecError::DuplicateId { id: 1 });
    }

    #[test]
    fn self_cycle_resolves_before_fields_finish() {
        let registry = test_registry();
        let value = decode_text(
            &registry,
            r#"{"@id": 1, "@type": "Waypoint", "next": {"@ref": 1}}"#,
        )
        .unwrap();
        let instance: &SharedInstance = value.as_instance().unwrap();
        let next = instance.borrow().get("next").unwrap().clone();
        assert!(value.ptr_eq(&next), "next points back at the instance");
    }

    #[test]
    fn identified_plain_record_is_referenceable() {
        let registry = test_registry();
        let value = decode_text(
            &registry,
            r#"{"@id": 5, "label": "spawn", "again": {"@ref": 5}}"#,
        )
        .unwrap();
        let map = value.as_map().unwrap();
        let again = map.borrow().get("again").unwrap().clone();
        assert!(Value::Map(map.clone()).ptr_eq(&again));
    }

    #[test]
    fn unidentified_plain_record_decodes_structurally() {
        let registry = test_registry();
        let value = decode_text(&registry, r#"{"a": 1, "b": [true, null]}"#).unwrap();
        let map = value.as_map().unwrap().borrow();
        assert_eq!(map.get("a"), Some(&Value::Int(1)));
        assert_eq!(
            map.get("b"),
            Some(&Value::Array(vec![Value::Bool(true), Value::Null]))
        );
    }

    #[test]
    fn reference_to_plain_id_from_sibling() {
        let registry = test_registry();
        let value = decode_text(&registry, r#"[{"@id": 2, "k": 1}, {"@ref": 2}]"#).unwrap();
        let items = value.as_array().unwrap();
        assert!(items[0].ptr_eq(&items[1]));
    }

    #[test]
    fn post_restore_hook_runs_after_fields() {
        fn flagged() -> Instance {
            Instance::new("Flagged")
        }
        fn hook(instance: &SharedInstance) {
            let x = instance.borrow().get("x").cloned();
            // Hook sees the decoded field, proving it ran after assignment.
            instance
                .borrow_mut()
                .set("saw_x", x.unwrap_or(Value::Null));
        }

        let registry = SchemaRegistry::builder()
            .register(TypeDef::new("Flagged", flagged).field("x").post_restore(hook))
            .build()
            .unwrap();

        let value =
            decode_text(&registry, r#"{"@id": 1, "@type": "Flagged", "x": 9}"#).unwrap();
        let instance = value.as_instance().unwrap().borrow();
        assert_eq!(instance.get("saw_x"), Some(&Value::Int(9)));
    }

    #[test]
    fn error_in_nested_field_aborts_whole_decode() {
        let registry = test_registry();
        let text = r#"{"@id": 1, "@type": "Waypoint", "next": {"@ref": 99}}"#;
        let err = decode_text(&registry, text).unwrap_err();
        assert_eq!(err, CodecError::DanglingReference { id: 99 });
    }
}
