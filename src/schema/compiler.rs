//! Recursive-descent conversion of a JSON description into a [`SchemaNode`].
//!
//! Each JSON object is classified by the first recognized keyword, in this
//! order: `anyOf` (or `enum`), `items`, `properties`, `type`. Anything else
//! becomes an unconstrained leaf.

use serde_json::{Map, Value};
use tracing::debug;

use super::compiled::{finalize, CompiledSchema};
use super::node::{
    ArraySchema, EnumerationSchema, LeafSchema, ObjectSchema, PrimitiveKind, Property, SchemaNode,
};
use super::SchemaError;

/// Name given to the root node when the description has none.
pub const DEFAULT_ROOT_NAME: &str = "Root";

/// Compile a parsed JSON description into an engine-ready schema.
pub fn compile(value: &Value) -> Result<CompiledSchema, SchemaError> {
    let root = build(value)?;
    let compiled = finalize(root)?;
    debug!(root = compiled.name(), "compiled schema");
    Ok(compiled)
}

/// Parse `bytes` as JSON and compile it.
pub fn compile_slice(bytes: &[u8]) -> Result<CompiledSchema, SchemaError> {
    let value: Value = serde_json::from_slice(bytes).map_err(SchemaError::Parse)?;
    compile(&value)
}

/// Build the intermediate tree without finalizing it.
pub fn build(value: &Value) -> Result<SchemaNode, SchemaError> {
    let root = value.as_object().ok_or(SchemaError::RootNotObject)?;
    build_node(root, DEFAULT_ROOT_NAME)
}

fn build_node(object: &Map<String, Value>, default_name: &str) -> Result<SchemaNode, SchemaError> {
    let name = object
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(default_name)
        .to_string();
    let description = object
        .get("description")
        .and_then(Value::as_str)
        .map(str::to_string);

    if let Some(variants) = string_array(object, "anyOf").or_else(|| string_array(object, "enum")) {
        return Ok(SchemaNode::Enumeration(EnumerationSchema {
            name,
            description,
            variants,
        }));
    }

    if let Some(items) = object.get("items").and_then(Value::as_object) {
        let element = build_node(items, &name)?;
        return Ok(SchemaNode::Array(ArraySchema {
            element: Box::new(element),
            min_elements: object.get("minItems").and_then(Value::as_u64),
            max_elements: object.get("maxItems").and_then(Value::as_u64),
        }));
    }

    if let Some(properties) = object.get("properties").and_then(Value::as_object) {
        let required = string_array(object, "required");
        return Ok(SchemaNode::Object(ObjectSchema {
            name,
            description,
            properties: build_properties(properties, required.as_deref())?,
        }));
    }

    if let Some(kind) = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(PrimitiveKind::from_type_name)
    {
        return Ok(SchemaNode::Primitive(kind));
    }

    Ok(SchemaNode::Leaf(LeafSchema { name, description }))
}

/// Properties are optional unless listed in `required`; with no `required`
/// array at all, every property is optional.
fn build_properties(
    properties: &Map<String, Value>,
    required: Option<&[String]>,
) -> Result<Vec<Property>, SchemaError> {
    let mut entries: Vec<(&String, &Value)> = properties.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    entries
        .into_iter()
        .map(|(key, value)| {
            let sub = value
                .as_object()
                .ok_or_else(|| SchemaError::InvalidProperty { key: key.clone() })?;
            let optional = !required.is_some_and(|required| required.iter().any(|r| r == key));
            Ok(Property {
                name: key.clone(),
                description: sub
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                schema: build_node(sub, key)?,
                optional,
            })
        })
        .collect()
}

/// `key` as a list of strings, or `None` if absent or not all strings.
fn string_array(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    object
        .get(key)?
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}
