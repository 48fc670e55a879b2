//! Intermediate schema tree produced by the compiler.

use std::fmt;

/// One node of a schema description.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Object(ObjectSchema),
    Array(ArraySchema),
    Enumeration(EnumerationSchema),
    Primitive(PrimitiveKind),
    /// Placeholder with no shape constraint.
    Leaf(LeafSchema),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    pub name: String,
    pub description: Option<String>,
    /// Always sorted by property name.
    pub properties: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub description: Option<String>,
    pub schema: SchemaNode,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub element: Box<SchemaNode>,
    pub min_elements: Option<u64>,
    pub max_elements: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumerationSchema {
    pub name: String,
    pub description: Option<String>,
    pub variants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeafSchema {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl PrimitiveKind {
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(PrimitiveKind::String),
            "integer" => Some(PrimitiveKind::Integer),
            "number" => Some(PrimitiveKind::Number),
            "boolean" => Some(PrimitiveKind::Boolean),
            _ => None,
        }
    }

    pub fn type_name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Number => "number",
            PrimitiveKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl SchemaNode {
    /// Name carried by the node, if its kind has one.
    pub fn name(&self) -> Option<&str> {
        match self {
            SchemaNode::Object(object) => Some(&object.name),
            SchemaNode::Enumeration(enumeration) => Some(&enumeration.name),
            SchemaNode::Leaf(leaf) => Some(&leaf.name),
            SchemaNode::Array(_) | SchemaNode::Primitive(_) => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            SchemaNode::Object(object) => object.description.as_deref(),
            SchemaNode::Enumeration(enumeration) => enumeration.description.as_deref(),
            SchemaNode::Leaf(leaf) => leaf.description.as_deref(),
            SchemaNode::Array(_) | SchemaNode::Primitive(_) => None,
        }
    }

    /// Short kind label used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaNode::Object(_) => "object",
            SchemaNode::Array(_) => "array",
            SchemaNode::Enumeration(_) => "enumeration",
            SchemaNode::Primitive(_) => "primitive",
            SchemaNode::Leaf(_) => "leaf",
        }
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            SchemaNode::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySchema> {
        match self {
            SchemaNode::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_enumeration(&self) -> Option<&EnumerationSchema> {
        match self {
            SchemaNode::Enumeration(enumeration) => Some(enumeration),
            _ => None,
        }
    }
}

impl ObjectSchema {
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties
            .binary_search_by(|property| property.name.as_str().cmp(name))
            .ok()
            .map(|index| &self.properties[index])
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .map(|property| property.name.as_str())
            .collect()
    }
}
