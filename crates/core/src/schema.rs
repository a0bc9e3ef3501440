//! Normalized schema model.
//!
//! YAPI stores request and response bodies as JSON-schema-like documents
//! embedded in strings. Their shape is loose: `type` may be missing, a string,
//! or an array of strings, and `properties`/`items` may be absent or
//! malformed. Everything is normalized here into [`SchemaNode`] so the
//! resolver never has to look at raw JSON.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::error::SchemaError;

/// Maximum nesting depth followed by normalization and resolution.
pub const MAX_SCHEMA_DEPTH: usize = 64;

/// Primitive type names understood by YAPI schemas.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `string`
    String,
    /// `number`
    Number,
    /// `integer`
    Integer,
    /// `boolean`
    Boolean,
    /// `array` without an item schema
    Array,
    /// `object` without declared properties
    Object,
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// Any type name this crate does not map
    Other(String),
}

impl PrimitiveKind {
    /// Parse a type name, case-insensitively.
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "string" => Self::String,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            "object" => Self::Object,
            "null" => Self::Null,
            "undefined" => Self::Undefined,
            _ => Self::Other(name.to_string()),
        }
    }
}

/// A named property of an object schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaProperty {
    /// Property key
    pub name: String,
    /// Property schema
    pub node: SchemaNode,
    /// `description`, when it is a string
    pub description: Option<String>,
}

/// Wire-format-independent description of a value's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// A single type name, or an array/object with nothing declared inside
    Primitive(PrimitiveKind),
    /// Array with an item schema
    Array(Box<SchemaNode>),
    /// Object with declared properties
    Object {
        /// Properties in declaration order
        properties: Vec<SchemaProperty>,
        /// Names listed in `required`
        required: BTreeSet<String>,
    },
    /// `type` given as a list of names
    Union(Vec<PrimitiveKind>),
    /// Anything that is not a recognizable schema
    Unknown,
}

impl SchemaNode {
    /// Parse an embedded schema string.
    ///
    /// Fails only when the text is not JSON at all. Any JSON value normalizes
    /// to some node.
    pub fn parse(text: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    /// Normalize a raw JSON schema value.
    pub fn from_value(value: &Value) -> Self {
        normalize(value, 0)
    }

    /// Object properties, if this is an object node.
    pub fn properties(&self) -> Option<&[SchemaProperty]> {
        match self {
            SchemaNode::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }
}

fn normalize(value: &Value, depth: usize) -> SchemaNode {
    if depth > MAX_SCHEMA_DEPTH {
        return SchemaNode::Unknown;
    }

    let map = match value {
        Value::String(name) => return SchemaNode::Primitive(PrimitiveKind::parse(name)),
        Value::Object(map) => map,
        _ => return SchemaNode::Unknown,
    };

    // A missing `type` means object
    let kind = match map.get("type") {
        None => PrimitiveKind::Object,
        Some(Value::String(name)) => PrimitiveKind::parse(name),
        Some(Value::Array(names)) => {
            return SchemaNode::Union(
                names
                    .iter()
                    .map(|n| match n {
                        Value::String(name) => PrimitiveKind::parse(name),
                        other => PrimitiveKind::Other(other.to_string()),
                    })
                    .collect(),
            );
        }
        Some(_) => return SchemaNode::Unknown,
    };

    match kind {
        PrimitiveKind::Array => match map.get("items") {
            Some(items) if !items.is_null() => {
                SchemaNode::Array(Box::new(normalize(items, depth + 1)))
            }
            _ => SchemaNode::Primitive(PrimitiveKind::Array),
        },
        PrimitiveKind::Object => match map.get("properties") {
            Some(Value::Object(props)) => SchemaNode::Object {
                properties: props
                    .iter()
                    .map(|(name, prop)| SchemaProperty {
                        name: name.clone(),
                        node: normalize(prop, depth + 1),
                        description: prop
                            .get("description")
                            .and_then(Value::as_str)
                            .map(str::to_string),
                    })
                    .collect(),
                required: required_names(map.get("required")),
            },
            _ => SchemaNode::Primitive(PrimitiveKind::Object),
        },
        other => SchemaNode::Primitive(other),
    }
}

fn required_names(value: Option<&Value>) -> BTreeSet<String> {
    match value {
        Some(Value::Array(names)) => names
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => BTreeSet::new(),
    }
}
