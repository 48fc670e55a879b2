use super::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn build_ok(value: Value) -> SchemaNode {
    build(&value).unwrap_or_else(|err| panic!("schema {value} should build: {err}"))
}

fn object(node: &SchemaNode) -> &ObjectSchema {
    node.as_object()
        .unwrap_or_else(|| panic!("expected object, got {}", node.kind()))
}

#[test]
fn person_example_sorts_and_marks_required() {
    let node = build_ok(json!({
        "name": "Person",
        "properties": {
            "name": {"type": "string", "description": "full name"},
            "age": {"type": "integer"},
            "role": {"anyOf": ["admin", "user", "guest"]}
        },
        "required": ["name"]
    }));

    let person = object(&node);
    assert_eq!(person.name, "Person");
    assert_eq!(person.property_names(), ["age", "name", "role"]);

    let name = person.property("name").unwrap();
    assert!(!name.optional);
    assert_eq!(name.description.as_deref(), Some("full name"));
    assert_eq!(name.schema, SchemaNode::Primitive(PrimitiveKind::String));

    assert!(person.property("age").unwrap().optional);
    let role = person.property("role").unwrap();
    assert!(role.optional);
    let enumeration = role.schema.as_enumeration().unwrap();
    assert_eq!(enumeration.name, "role");
    assert_eq!(enumeration.variants, ["admin", "user", "guest"]);
}

#[test]
fn missing_required_makes_every_property_optional() {
    let node = build_ok(json!({"properties": {"b": {}, "a": {}}}));
    let root = object(&node);
    assert_eq!(root.name, "Root");
    assert_eq!(root.property_names(), ["a", "b"]);
    assert!(root.properties.iter().all(|property| property.optional));
}

#[test]
fn listed_required_property_is_not_optional() {
    let node = build_ok(json!({"properties": {"a": {}}, "required": ["a"]}));
    assert!(!object(&node).properties[0].optional);
}

#[test]
fn required_that_is_not_a_string_array_is_ignored() {
    let node = build_ok(json!({"properties": {"a": {}}, "required": "a"}));
    assert!(object(&node).properties[0].optional);
}

#[test]
fn any_of_keeps_input_order() {
    let node = build_ok(json!({"anyOf": ["x", "y"]}));
    let enumeration = node.as_enumeration().unwrap();
    assert_eq!(enumeration.name, "Root");
    assert_eq!(enumeration.variants, ["x", "y"]);
}

#[test]
fn any_of_wins_over_other_keywords() {
    let node = build_ok(json!({
        "anyOf": ["only"],
        "items": {"type": "string"},
        "properties": {"a": {}},
        "type": "integer"
    }));
    assert_eq!(node.kind(), "enumeration");
}

#[test]
fn enum_keyword_is_a_string_enumeration() {
    let node = build_ok(json!({
        "name": "Status",
        "type": "string",
        "enum": ["active", "inactive", "pending"]
    }));
    assert_eq!(
        node.as_enumeration().unwrap().variants,
        ["active", "inactive", "pending"]
    );
}

#[test]
fn mixed_any_of_falls_through() {
    let node = build_ok(json!({"anyOf": ["x", 1], "type": "number"}));
    assert_eq!(node, SchemaNode::Primitive(PrimitiveKind::Number));
}

#[test]
fn items_become_array_with_bounds() {
    let node = build_ok(json!({"items": {"type": "string"}, "minItems": 1, "maxItems": 3}));
    let array = node.as_array().unwrap();
    assert_eq!(*array.element, SchemaNode::Primitive(PrimitiveKind::String));
    assert_eq!(array.min_elements, Some(1));
    assert_eq!(array.max_elements, Some(3));
}

#[test]
fn inverted_bounds_are_accepted() {
    let node = build_ok(json!({"items": {}, "minItems": 5, "maxItems": 2}));
    let array = node.as_array().unwrap();
    assert_eq!((array.min_elements, array.max_elements), (Some(5), Some(2)));
}

#[test]
fn items_wins_over_properties() {
    let node = build_ok(json!({"items": {"type": "boolean"}, "properties": {"a": {}}}));
    assert_eq!(node.kind(), "array");
}

#[test]
fn primitive_types() {
    for (type_name, kind) in [
        ("string", PrimitiveKind::String),
        ("integer", PrimitiveKind::Integer),
        ("number", PrimitiveKind::Number),
        ("boolean", PrimitiveKind::Boolean),
    ] {
        assert_eq!(build_ok(json!({"type": type_name})), SchemaNode::Primitive(kind));
    }
}

#[test]
fn unknown_type_falls_through_to_leaf() {
    let node = build_ok(json!({"type": "date", "name": "When", "description": "a day"}));
    assert_eq!(
        node,
        SchemaNode::Leaf(LeafSchema {
            name: "When".to_string(),
            description: Some("a day".to_string()),
        })
    );
}

#[test]
fn empty_object_is_root_leaf() {
    assert_eq!(
        build_ok(json!({})),
        SchemaNode::Leaf(LeafSchema {
            name: "Root".to_string(),
            description: None,
        })
    );
}

#[test]
fn property_key_names_unnamed_sub_schemas() {
    let node = build_ok(json!({
        "properties": {
            "address": {
                "properties": {"street": {"description": "Street name"}}
            },
            "owner": {"name": "Person", "properties": {}}
        }
    }));
    let root = object(&node);

    let address = object(&root.property("address").unwrap().schema);
    assert_eq!(address.name, "address");
    assert_eq!(
        address.property("street").unwrap().schema.name(),
        Some("street")
    );

    let owner = object(&root.property("owner").unwrap().schema);
    assert_eq!(owner.name, "Person");
}

#[test]
fn non_object_root_is_rejected() {
    let err = build(&json!([1, 2, 3])).unwrap_err();
    assert!(matches!(err, SchemaError::RootNotObject));
    assert!(compile_slice(b"\"text\"").is_err());
}

#[test]
fn non_object_property_names_the_key() {
    let err = build(&json!({"properties": {"a": "not-an-object"}})).unwrap_err();
    match &err {
        SchemaError::InvalidProperty { key } => assert_eq!(key, "a"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("'a'"));
}

#[test]
fn nested_invalid_property_fails_whole_compile() {
    let err = compile(&json!({
        "properties": {"outer": {"properties": {"inner": 3}}}
    }))
    .unwrap_err();
    assert!(matches!(err, SchemaError::InvalidProperty { ref key } if key == "inner"));
}

#[test]
fn malformed_bytes_are_parse_errors() {
    let err = compile_slice(b"not valid json {{{").unwrap_err();
    assert!(matches!(err, SchemaError::Parse(_)));
    assert!(err.to_string().starts_with("Invalid JSON in schema file"));
}

#[test]
fn compiling_twice_is_identical() {
    let input = json!({
        "name": "Order",
        "properties": {
            "lines": {"items": {"properties": {"sku": {"type": "string"}}}, "maxItems": 10},
            "status": {"anyOf": ["open", "closed"]}
        },
        "required": ["lines"]
    });
    let first = compile(&input).unwrap();
    let second = compile(&input).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json_string(false), second.to_json_string(false));
}

#[test]
fn compiled_document_mirrors_tree() {
    let compiled = compile(&json!({
        "name": "Person",
        "description": "A person record",
        "properties": {
            "name": {"type": "string", "description": "full name"},
            "tags": {"items": {"type": "string"}, "minItems": 1},
            "role": {"anyOf": ["admin", "user"]},
            "notes": {}
        },
        "required": ["name", "tags"]
    }))
    .unwrap();

    assert_eq!(compiled.name(), "Person");
    assert_eq!(
        compiled.document(),
        &json!({
            "type": "object",
            "title": "Person",
            "description": "A person record",
            "additionalProperties": false,
            "required": ["name", "tags"],
            "properties": {
                "name": {"type": "string", "description": "full name"},
                "notes": {"title": "notes"},
                "role": {"type": "string", "title": "role", "enum": ["admin", "user"]},
                "tags": {"type": "array", "items": {"type": "string"}, "minItems": 1}
            }
        })
    );
}

#[test]
fn empty_enumeration_cannot_be_finalized() {
    let err = compile(&json!({"anyOf": []})).unwrap_err();
    assert!(matches!(err, SchemaError::Unrepresentable(_)));
}

#[test]
fn load_schema_file_reads_and_compiles() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("schema.json");
    fs::write(&path, r#"{"anyOf": ["red", "green", "blue"], "name": "Color"}"#).unwrap();

    let compiled = load_schema_file(path.to_str().unwrap()).unwrap();
    assert_eq!(compiled.name(), "Color");
}

#[test]
fn load_schema_file_maps_io_and_parse_failures() {
    let err = load_schema_file("/nonexistent/path/schema.json").unwrap_err();
    assert!(matches!(err, AppError::FileError(_)));

    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("bad.json");
    fs::write(&path, "[1, 2, 3]").unwrap();
    let err = load_schema_file(path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, AppError::Schema(SchemaError::RootNotObject)));
}
