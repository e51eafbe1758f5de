use codec::{decode, encode, CodecError};
use graph::{Instance, SharedInstance, Value};
use registry::{SchemaRegistry, TypeDef};
use wire::Limits;

fn waypoint() -> Instance {
    Instance::new("Waypoint")
        .with("x", 0)
        .with("y", 0)
        .with("next", Value::Null)
}

fn marker() -> Instance {
    Instance::new("Marker")
}

fn waypoint_registry() -> SchemaRegistry {
    SchemaRegistry::builder()
        .register(
            TypeDef::new("Waypoint", waypoint)
                .field("x")
                .field("y")
                .field("next"),
        )
        .register(TypeDef::new("Marker", marker))
        .build()
        .unwrap()
}

fn roundtrip(registry: &SchemaRegistry, root: &Value) -> Value {
    let text = encode(registry, root).unwrap();
    decode(registry, &text, &Limits::default()).unwrap()
}

#[test]
fn primitive_and_plain_data_roundtrips_by_value() {
    let registry = waypoint_registry();
    let root = Value::from(vec![
        Value::Null,
        Value::Bool(true),
        Value::Int(-12),
        Value::Float(0.25),
        Value::from("text"),
        Value::map_from([("k", Value::Int(1)), ("nested", Value::from(vec![]))]),
    ]);
    assert_eq!(roundtrip(&registry, &root), root);
}

#[test]
fn persistent_fields_roundtrip() {
    let registry = waypoint_registry();
    let instance = waypoint().with("x", 17).with("y", -3).into_shared();

    let restored = roundtrip(&registry, &Value::from(instance));
    let restored = restored.as_instance().unwrap().borrow();
    assert_eq!(restored.get("x"), Some(&Value::Int(17)));
    assert_eq!(restored.get("y"), Some(&Value::Int(-3)));
    assert_eq!(restored.get("next"), Some(&Value::Null));
}

#[test]
fn non_persistent_fields_reset_to_defaults() {
    fn counter() -> Instance {
        Instance::new("Counter").with("kept", 0).with("scratch", 100)
    }
    let registry = SchemaRegistry::builder()
        .register(TypeDef::new("Counter", counter).field("kept"))
        .build()
        .unwrap();

    let live = counter().with("kept", 5).with("scratch", 999).into_shared();
    let text = encode(&registry, &Value::from(live)).unwrap();
    assert!(
        !text.contains("scratch"),
        "undeclared field must not reach the document"
    );

    let restored = decode(&registry, &text, &Limits::default()).unwrap();
    let restored = restored.as_instance().unwrap().borrow();
    assert_eq!(restored.get("kept"), Some(&Value::Int(5)));
    assert_eq!(
        restored.get("scratch"),
        Some(&Value::Int(100)),
        "resets to the constructor default, not the live value"
    );
}

#[test]
fn shared_instance_keeps_identity() {
    let registry = waypoint_registry();
    let shared = waypoint().with("x", 1).into_shared();
    let root = Value::from(vec![Value::from(shared.clone()), Value::from(shared)]);

    let restored = roundtrip(&registry, &root);
    let items = restored.as_array().unwrap();
    assert!(
        items[0].ptr_eq(&items[1]),
        "both slots point at the same reconstructed instance"
    );
}

#[test]
fn two_instance_cycle_roundtrips() {
    let registry = waypoint_registry();
    let a = waypoint().with("x", 1).into_shared();
    let b = waypoint().with("x", 2).into_shared();
    a.borrow_mut().set("next", Value::from(b.clone()));
    b.borrow_mut().set("next", Value::from(a.clone()));

    let restored = roundtrip(&registry, &Value::from(a));
    let restored_a: &SharedInstance = restored.as_instance().unwrap();

    let restored_b = restored_a.borrow().get("next").unwrap().clone();
    let back = restored_b
        .as_instance()
        .unwrap()
        .borrow()
        .get("next")
        .unwrap()
        .clone();
    assert!(restored.ptr_eq(&back), "next.next is the root again");

    assert_eq!(restored_a.borrow().get("x"), Some(&Value::Int(1)));
    assert_eq!(
        restored_b.as_instance().unwrap().borrow().get("x"),
        Some(&Value::Int(2))
    );
}

#[test]
fn self_cycle_roundtrips() {
    let registry = waypoint_registry();
    let lone = waypoint().into_shared();
    lone.borrow_mut().set("next", Value::from(lone.clone()));

    let restored = roundtrip(&registry, &Value::from(lone));
    let next = restored
        .as_instance()
        .unwrap()
        .borrow()
        .get("next")
        .unwrap()
        .clone();
    assert!(restored.ptr_eq(&next));
}

#[test]
fn fieldless_type_roundtrips_with_identity_only() {
    let registry = waypoint_registry();
    let m = marker().into_shared();
    let root = Value::from(vec![Value::from(m.clone()), Value::from(m)]);

    let restored = roundtrip(&registry, &root);
    let items = restored.as_array().unwrap();
    assert!(items[0].ptr_eq(&items[1]));
    assert_eq!(
        items[0].as_instance().unwrap().borrow().type_name(),
        "Marker"
    );
}

#[test]
fn aliased_plain_data_duplicates_instead_of_sharing() {
    let registry = waypoint_registry();
    let map = Value::new_map();
    map.borrow_mut().insert("k".to_owned(), Value::Int(1));
    let root = Value::from(vec![Value::Map(map.clone()), Value::Map(map)]);

    let restored = roundtrip(&registry, &root);
    let items = restored.as_array().unwrap();
    assert_eq!(items[0], items[1], "equal contents");
    assert!(
        !items[0].ptr_eq(&items[1]),
        "aliasing through plain records is not preserved"
    );
}

#[test]
fn instances_inside_plain_containers_keep_identity() {
    let registry = waypoint_registry();
    let shared = waypoint().into_shared();
    let root = Value::map_from([
        ("first", Value::from(shared.clone())),
        ("second", Value::from(shared)),
    ]);

    let restored = roundtrip(&registry, &root);
    let map = restored.as_map().unwrap().borrow();
    assert!(map.get("first").unwrap().ptr_eq(map.get("second").unwrap()));
}

#[test]
fn list_of_roots_roundtrips() {
    let registry = waypoint_registry();
    let roots = Value::from(vec![
        Value::from(waypoint().with("x", 1).into_shared()),
        Value::from(waypoint().with("x", 2).into_shared()),
    ]);
    let restored = roundtrip(&registry, &roots);
    let items = restored.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(
        items[1].as_instance().unwrap().borrow().get("x"),
        Some(&Value::Int(2))
    );
}

#[test]
fn decode_failure_leaves_no_observable_graph() {
    let registry = waypoint_registry();
    let text = r#"[{"@id": 1, "@type": "Waypoint", "x": 1}, {"@id": 2, "@type": "Ghost"}]"#;
    let err = decode(&registry, text, &Limits::default()).unwrap_err();
    assert_eq!(
        err,
        CodecError::UnknownType {
            type_name: "Ghost".to_owned()
        }
    );
}

#[test]
fn decode_respects_wire_limits() {
    let registry = waypoint_registry();
    let instance = waypoint().into_shared();
    let text = encode(&registry, &Value::from(instance)).unwrap();

    let tight = Limits {
        max_document_bytes: 8,
        max_depth: 128,
    };
    let err = decode(&registry, &text, &tight).unwrap_err();
    assert!(matches!(err, CodecError::Wire(_)));
}
