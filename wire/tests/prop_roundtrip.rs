use proptest::prelude::*;
use wire::{emit_document, emit_document_pretty, parse_document, Limits, WireNode};

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,6}"
}

fn leaf_strategy() -> impl Strategy<Value = WireNode> {
    prop_oneof![
        Just(WireNode::Null),
        any::<bool>().prop_map(WireNode::Bool),
        any::<i64>().prop_map(WireNode::Int),
        (-1.0e15..1.0e15f64).prop_map(WireNode::Float),
        "[ -~]{0,12}".prop_map(WireNode::String),
        (1u64..1000).prop_map(WireNode::Ref),
    ]
}

fn node_strategy() -> impl Strategy<Value = WireNode> {
    leaf_strategy().prop_recursive(4, 32, 4, |inner| {
        let entries = prop::collection::btree_map(key_strategy(), inner.clone(), 0..4)
            .prop_map(|map| map.into_iter().collect::<Vec<_>>())
            .boxed();
        prop_oneof![
            prop::collection::vec(inner, 0..4).prop_map(WireNode::Array),
            entries.clone().prop_map(WireNode::plain),
            (1u64..1000, entries.clone())
                .prop_map(|(id, entries)| WireNode::identified_plain(id, entries)),
            (1u64..1000, "[A-Z][a-z]{0,7}", entries)
                .prop_map(|(id, name, fields)| WireNode::instance(id, name, fields)),
        ]
    })
}

proptest! {
    #[test]
    fn prop_emit_parse_roundtrip(node in node_strategy()) {
        let text = emit_document(&node).unwrap();
        let reparsed = parse_document(&text, &Limits::default()).unwrap();
        prop_assert_eq!(reparsed, node);
    }

    #[test]
    fn prop_pretty_and_compact_parse_identically(node in node_strategy()) {
        let compact = emit_document(&node).unwrap();
        let pretty = emit_document_pretty(&node).unwrap();
        let from_compact = parse_document(&compact, &Limits::default()).unwrap();
        let from_pretty = parse_document(&pretty, &Limits::default()).unwrap();
        prop_assert_eq!(from_compact, from_pretty);
    }

    #[test]
    fn prop_emitted_text_is_valid_json(node in node_strategy()) {
        let text = emit_document(&node).unwrap();
        let value: Result<serde_json::Value, _> = serde_json::from_str(&text);
        prop_assert!(value.is_ok());
    }
}
