//! Graph encoding: depth-first traversal with lazy identity assignment.

use std::collections::HashMap;
use std::rc::Rc;

use graph::{SharedInstance, Value};
use registry::SchemaRegistry;
use wire::{emit_document, emit_document_pretty, NodeId, WireNode};

use crate::error::{CodecError, CodecResult};

/// Per-call encoder state: the identity map and the id counter.
///
/// Lives for exactly one encode call, threaded through the recursion, so
/// concurrent encodes can never see each other's identities.
struct EncodeState {
    ids: HashMap<usize, NodeId>,
    next_id: NodeId,
}

impl EncodeState {
    fn new() -> Self {
        Self {
            ids: HashMap::new(),
            next_id: 1,
        }
    }

    fn lookup(&self, instance: &SharedInstance) -> Option<NodeId> {
        self.ids.get(&identity(instance)).copied()
    }

    /// Assigns the next unused id to an instance.
    ///
    /// Must happen before the encoder descends into the instance's fields;
    /// that ordering is what lets a descendant reference its own ancestor.
    fn assign(&mut self, instance: &SharedInstance) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(identity(instance), id);
        id
    }
}

// The graph is borrowed for the whole call, so every encountered instance
// stays alive and addresses cannot be reused mid-traversal.
fn identity(instance: &SharedInstance) -> usize {
    Rc::as_ptr(instance) as usize
}

/// Encodes a graph as compact document text.
///
/// The document contains exactly one instance node per registered instance
/// reachable from `root`; every later encounter is a reference node.
pub fn encode(registry: &SchemaRegistry, root: &Value) -> CodecResult<String> {
    let node = encode_to_node(registry, root)?;
    emit_document(&node).map_err(CodecError::from)
}

/// Encodes a graph as indented document text.
pub fn encode_pretty(registry: &SchemaRegistry, root: &Value) -> CodecResult<String> {
    let node = encode_to_node(registry, root)?;
    emit_document_pretty(&node).map_err(CodecError::from)
}

/// Encodes a graph into a wire-node tree without rendering text.
pub fn encode_to_node(registry: &SchemaRegistry, root: &Value) -> CodecResult<WireNode> {
    let mut state = EncodeState::new();
    encode_value(registry, &mut state, root)
}

fn encode_value(
    registry: &SchemaRegistry,
    state: &mut EncodeState,
    value: &Value,
) -> CodecResult<WireNode> {
    match value {
        Value::Null => Ok(WireNode::Null),
        Value::Bool(flag) => Ok(WireNode::Bool(*flag)),
        Value::Int(int) => Ok(WireNode::Int(*int)),
        Value::Float(float) => Ok(WireNode::Float(*float)),
        Value::String(text) => Ok(WireNode::String(text.clone())),
        Value::Array(items) => {
            let mut nodes = Vec::with_capacity(items.len());
            for item in items {
                nodes.push(encode_value(registry, state, item)?);
            }
            Ok(WireNode::Array(nodes))
        }
        // Plain records are copied structurally: no identity, no dedup. An
        // aliased record encodes once per encounter, and a cycle routed
        // purely through plain records recurses without bound.
        Value::Map(map) => {
            let map = map.borrow();
            let mut entries = Vec::with_capacity(map.len());
            for (key, item) in map.iter() {
                entries.push((key.clone(), encode_value(registry, state, item)?));
            }
            Ok(WireNode::plain(entries))
        }
        Value::Instance(instance) => encode_instance(registry, state, instance),
    }
}

fn encode_instance(
    registry: &SchemaRegistry,
    state: &mut EncodeState,
    instance: &SharedInstance,
) -> CodecResult<WireNode> {
    if let Some(id) = state.lookup(instance) {
        return Ok(WireNode::Ref(id));
    }

    let type_name = instance.borrow().type_name().to_owned();
    let Some(def) = registry.get(&type_name) else {
        return Err(CodecError::UnknownType { type_name });
    };

    let id = state.assign(instance);

    let borrowed = instance.borrow();
    let mut fields = Vec::with_capacity(def.fields().len());
    for name in def.fields() {
        // A declared field the live instance never set is omitted, matching
        // the schema-drift tolerance on the decode side.
        let Some(value) = borrowed.get(name) else {
            continue;
        };
        fields.push((name.clone(), encode_value(registry, state, value)?));
    }

    Ok(WireNode::instance(id, type_name, fields))
}
