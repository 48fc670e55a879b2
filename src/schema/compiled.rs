//! Finalized schema handed to the generation engine.

use serde_json::{json, Map, Value};

use super::node::{ArraySchema, EnumerationSchema, LeafSchema, ObjectSchema, SchemaNode};
use super::SchemaError;

/// Immutable, engine-ready schema.
///
/// Wraps the intermediate tree together with its JSON Schema rendering; the
/// engine consumes the document, diagnostics use the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledSchema {
    root: SchemaNode,
    document: Value,
}

impl CompiledSchema {
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Name of the root node, or the default root name for unnamed kinds.
    pub fn name(&self) -> &str {
        self.root
            .name()
            .unwrap_or(super::compiler::DEFAULT_ROOT_NAME)
    }

    pub fn to_json_string(&self, pretty: bool) -> String {
        if pretty {
            serde_json::to_string_pretty(&self.document).unwrap_or_default()
        } else {
            self.document.to_string()
        }
    }
}

/// Translate a tree node-for-node into its JSON Schema form.
pub fn finalize(root: SchemaNode) -> Result<CompiledSchema, SchemaError> {
    let document = render(&root)?;
    if !jsonschema::meta::is_valid(&document) {
        return Err(SchemaError::Unrepresentable(
            "compiled document is not a valid JSON Schema".to_string(),
        ));
    }
    Ok(CompiledSchema { root, document })
}

fn render(node: &SchemaNode) -> Result<Value, SchemaError> {
    match node {
        SchemaNode::Object(object) => render_object(object),
        SchemaNode::Array(array) => render_array(array),
        SchemaNode::Enumeration(enumeration) => render_enumeration(enumeration),
        SchemaNode::Primitive(kind) => Ok(json!({ "type": kind.type_name() })),
        SchemaNode::Leaf(leaf) => Ok(render_leaf(leaf)),
    }
}

fn render_object(object: &ObjectSchema) -> Result<Value, SchemaError> {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for property in &object.properties {
        let mut rendered = render(&property.schema)?;
        if let (Some(description), Some(fields)) =
            (property.description.as_ref(), rendered.as_object_mut())
        {
            fields
                .entry("description")
                .or_insert_with(|| Value::String(description.clone()));
        }
        properties.insert(property.name.clone(), rendered);
        if !property.optional {
            required.push(Value::String(property.name.clone()));
        }
    }

    let mut fields = Map::new();
    fields.insert("type".into(), "object".into());
    fields.insert("title".into(), object.name.clone().into());
    if let Some(description) = &object.description {
        fields.insert("description".into(), description.clone().into());
    }
    fields.insert("properties".into(), Value::Object(properties));
    fields.insert("required".into(), Value::Array(required));
    fields.insert("additionalProperties".into(), false.into());
    Ok(Value::Object(fields))
}

fn render_array(array: &ArraySchema) -> Result<Value, SchemaError> {
    let mut fields = Map::new();
    fields.insert("type".into(), "array".into());
    fields.insert("items".into(), render(&array.element)?);
    if let Some(min) = array.min_elements {
        fields.insert("minItems".into(), min.into());
    }
    if let Some(max) = array.max_elements {
        fields.insert("maxItems".into(), max.into());
    }
    Ok(Value::Object(fields))
}

fn render_enumeration(enumeration: &EnumerationSchema) -> Result<Value, SchemaError> {
    if enumeration.variants.is_empty() {
        return Err(SchemaError::Unrepresentable(format!(
            "enumeration '{}' has no variants",
            enumeration.name
        )));
    }

    let mut fields = Map::new();
    fields.insert("type".into(), "string".into());
    fields.insert("title".into(), enumeration.name.clone().into());
    if let Some(description) = &enumeration.description {
        fields.insert("description".into(), description.clone().into());
    }
    fields.insert(
        "enum".into(),
        enumeration.variants.iter().cloned().map(Value::String).collect(),
    );
    Ok(Value::Object(fields))
}

fn render_leaf(leaf: &LeafSchema) -> Value {
    let mut fields = Map::new();
    fields.insert("title".into(), leaf.name.clone().into());
    if let Some(description) = &leaf.description {
        fields.insert("description".into(), description.clone().into());
    }
    Value::Object(fields)
}
