//! Parsing and emitting document text.

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::{DecodeError, EncodeError, LimitKind};
use crate::limits::Limits;
use crate::node::{WireNode, ID_KEY, REF_KEY, TYPE_KEY};
use crate::{NodeId, WireResult};

/// Parses a complete document into a wire-node tree.
pub fn parse_document(text: &str, limits: &Limits) -> WireResult<WireNode> {
    if text.len() > limits.max_document_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::DocumentBytes,
            limit: limits.max_document_bytes,
            actual: text.len(),
        });
    }

    let value: JsonValue = serde_json::from_str(text).map_err(|err| DecodeError::Syntax {
        line: err.line(),
        column: err.column(),
        message: err.to_string(),
    })?;

    node_from_json(&value, 1, limits)
}

/// Emits a wire-node tree as compact document text.
pub fn emit_document(node: &WireNode) -> Result<String, EncodeError> {
    let value = json_from_node(node)?;
    Ok(render(&value))
}

/// Emits a wire-node tree as indented document text.
pub fn emit_document_pretty(node: &WireNode) -> Result<String, EncodeError> {
    let value = json_from_node(node)?;
    Ok(render_pretty(&value))
}

fn render(value: &JsonValue) -> String {
    // Serializing an in-memory JSON value cannot fail
    serde_json::to_string(value).expect("rendering a JSON value is infallible")
}

fn render_pretty(value: &JsonValue) -> String {
    serde_json::to_string_pretty(value).expect("rendering a JSON value is infallible")
}

fn node_from_json(value: &JsonValue, depth: usize, limits: &Limits) -> WireResult<WireNode> {
    if depth > limits.max_depth {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::Depth,
            limit: limits.max_depth,
            actual: depth,
        });
    }

    match value {
        JsonValue::Null => Ok(WireNode::Null),
        JsonValue::Bool(flag) => Ok(WireNode::Bool(*flag)),
        JsonValue::Number(number) => number.as_i64().map_or_else(
            || {
                number
                    .as_f64()
                    .map(WireNode::Float)
                    .ok_or_else(|| DecodeError::InvalidNumber {
                        found: number.to_string(),
                    })
            },
            |int| Ok(WireNode::Int(int)),
        ),
        JsonValue::String(text) => Ok(WireNode::String(text.clone())),
        JsonValue::Array(items) => {
            let mut nodes = Vec::with_capacity(items.len());
            for item in items {
                nodes.push(node_from_json(item, depth + 1, limits)?);
            }
            Ok(WireNode::Array(nodes))
        }
        JsonValue::Object(record) => record_from_json(record, depth, limits),
    }
}

fn record_from_json(
    record: &JsonMap<String, JsonValue>,
    depth: usize,
    limits: &Limits,
) -> WireResult<WireNode> {
    if let Some(raw) = record.get(REF_KEY) {
        if record.len() != 1 {
            return Err(DecodeError::RefWithExtraKeys {
                extra: record.len() - 1,
            });
        }
        let id = parse_node_id(raw).ok_or_else(|| DecodeError::InvalidRef {
            found: raw.to_string(),
        })?;
        return Ok(WireNode::Ref(id));
    }

    let id = match record.get(ID_KEY) {
        Some(raw) => Some(parse_node_id(raw).ok_or_else(|| DecodeError::InvalidId {
            found: raw.to_string(),
        })?),
        None => None,
    };

    let type_name = match record.get(TYPE_KEY) {
        Some(JsonValue::String(name)) => Some(name.clone()),
        Some(other) => {
            return Err(DecodeError::InvalidTypeName {
                found: other.to_string(),
            })
        }
        None => None,
    };

    let mut entries = Vec::with_capacity(record.len());
    for (key, value) in record {
        if key == ID_KEY || key == TYPE_KEY {
            continue;
        }
        if key.starts_with('@') {
            return Err(DecodeError::ReservedKey { key: key.clone() });
        }
        entries.push((key.clone(), node_from_json(value, depth + 1, limits)?));
    }

    match (id, type_name) {
        (Some(id), Some(type_name)) => Ok(WireNode::Instance {
            id,
            type_name,
            fields: entries,
        }),
        (None, Some(type_name)) => Err(DecodeError::TypeWithoutId { type_name }),
        (id, None) => Ok(WireNode::Plain { id, entries }),
    }
}

fn parse_node_id(value: &JsonValue) -> Option<NodeId> {
    value.as_u64().filter(|id| *id > 0)
}

fn json_from_node(node: &WireNode) -> Result<JsonValue, EncodeError> {
    match node {
        WireNode::Null => Ok(JsonValue::Null),
        WireNode::Bool(flag) => Ok(JsonValue::Bool(*flag)),
        WireNode::Int(int) => Ok(JsonValue::from(*int)),
        WireNode::Float(float) => serde_json::Number::from_f64(*float)
            .map(JsonValue::Number)
            .ok_or(EncodeError::NonFiniteNumber { value: *float }),
        WireNode::String(text) => Ok(JsonValue::String(text.clone())),
        WireNode::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(json_from_node(item)?);
            }
            Ok(JsonValue::Array(values))
        }
        WireNode::Plain { id, entries } => {
            let mut record = JsonMap::with_capacity(entries.len() + 1);
            if let Some(id) = id {
                record.insert(ID_KEY.to_owned(), JsonValue::from(*id));
            }
            insert_entries(&mut record, entries)?;
            Ok(JsonValue::Object(record))
        }
        WireNode::Instance {
            id,
            type_name,
            fields,
        } => {
            let mut record = JsonMap::with_capacity(fields.len() + 2);
            record.insert(ID_KEY.to_owned(), JsonValue::from(*id));
            record.insert(TYPE_KEY.to_owned(), JsonValue::String(type_name.clone()));
            insert_entries(&mut record, fields)?;
            Ok(JsonValue::Object(record))
        }
        WireNode::Ref(id) => {
            let mut record = JsonMap::with_capacity(1);
            record.insert(REF_KEY.to_owned(), JsonValue::from(*id));
            Ok(JsonValue::Object(record))
        }
    }
}

fn insert_entries(
    record: &mut JsonMap<String, JsonValue>,
    entries: &[(String, WireNode)],
) -> Result<(), EncodeError> {
    for (key, value) in entries {
        if key.starts_with('@') {
            return Err(EncodeError::ReservedEntryKey { key: key.clone() });
        }
        record.insert(key.clone(), json_from_node(value)?);
    }
    Ok(())
}
