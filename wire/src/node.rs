//! Wire node model and reserved keys.

use crate::NodeId;

/// Reserved key carrying a node's identity.
pub const ID_KEY: &str = "@id";

/// Reserved key carrying an instance node's type name.
pub const TYPE_KEY: &str = "@type";

/// Reserved key of a reference node.
pub const REF_KEY: &str = "@ref";

/// One serialized unit in a document.
///
/// Records are classified by their reserved keys: a record whose only key is
/// [`REF_KEY`] is a reference, a record with [`TYPE_KEY`] (and therefore
/// [`ID_KEY`]) is an instance, and anything else is a plain record that may
/// optionally carry an [`ID_KEY`] to be reference-target-eligible.
///
/// Entry and field orderings are significant: they are preserved from the
/// document on parse and written back in order on emit.
#[derive(Debug, Clone, PartialEq)]
pub enum WireNode {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<WireNode>),

    /// A record with no type tag, optionally identified.
    Plain {
        id: Option<NodeId>,
        entries: Vec<(String, WireNode)>,
    },

    /// The canonical, first appearance of a persistent instance.
    Instance {
        id: NodeId,
        type_name: String,
        fields: Vec<(String, WireNode)>,
    },

    /// A later appearance of an already-identified node.
    Ref(NodeId),
}

impl WireNode {
    /// Creates an instance node.
    #[must_use]
    pub fn instance(
        id: NodeId,
        type_name: impl Into<String>,
        fields: Vec<(String, Self)>,
    ) -> Self {
        Self::Instance {
            id,
            type_name: type_name.into(),
            fields,
        }
    }

    /// Creates an unidentified plain record node.
    #[must_use]
    pub fn plain(entries: Vec<(String, Self)>) -> Self {
        Self::Plain { id: None, entries }
    }

    /// Creates an identified plain record node.
    #[must_use]
    pub fn identified_plain(id: NodeId, entries: Vec<(String, Self)>) -> Self {
        Self::Plain {
            id: Some(id),
            entries,
        }
    }

    /// Creates a string node.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// The identity this node declares, if any.
    #[must_use]
    pub fn id(&self) -> Option<NodeId> {
        match self {
            Self::Instance { id, .. } => Some(*id),
            Self::Plain { id, .. } => *id,
            _ => None,
        }
    }

    /// Coarse classification, used by inspection tooling.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Null | Self::Bool(_) | Self::Int(_) | Self::Float(_) | Self::String(_) => {
                NodeKind::Primitive
            }
            Self::Array(_) => NodeKind::Array,
            Self::Plain { .. } => NodeKind::Plain,
            Self::Instance { .. } => NodeKind::Instance,
            Self::Ref(_) => NodeKind::Ref,
        }
    }
}

/// The coarse kinds a wire node can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NodeKind {
    Primitive,
    Array,
    Plain,
    Instance,
    Ref,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        let node = WireNode::instance(1, "Waypoint", vec![("x".to_owned(), WireNode::Int(3))]);
        assert_eq!(node.id(), Some(1));
        assert_eq!(node.kind(), NodeKind::Instance);

        let node = WireNode::identified_plain(9, vec![]);
        assert_eq!(node.id(), Some(9));
        assert_eq!(node.kind(), NodeKind::Plain);

        assert_eq!(WireNode::plain(vec![]).id(), None);
        assert_eq!(WireNode::string("s"), WireNode::String("s".to_owned()));
    }

    #[test]
    fn kinds() {
        assert_eq!(WireNode::Null.kind(), NodeKind::Primitive);
        assert_eq!(WireNode::Bool(true).kind(), NodeKind::Primitive);
        assert_eq!(WireNode::Int(1).kind(), NodeKind::Primitive);
        assert_eq!(WireNode::Float(1.0).kind(), NodeKind::Primitive);
        assert_eq!(WireNode::string("s").kind(), NodeKind::Primitive);
        assert_eq!(WireNode::Array(vec![]).kind(), NodeKind::Array);
        assert_eq!(WireNode::Ref(1).kind(), NodeKind::Ref);
    }

    #[test]
    fn primitives_have_no_id() {
        assert_eq!(WireNode::Null.id(), None);
        assert_eq!(WireNode::Ref(7).id(), None);
        assert_eq!(WireNode::Array(vec![]).id(), None);
    }
}
