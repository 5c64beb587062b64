//! # Schema Nodes
//!
//! The unit of contract definition. A node is either typed directly
//! (`"type": "string"`) or delegates to a named definition through
//! `"$ref": "#/Name"`. After reference resolution every node carries a
//! concrete type, and the reference name is kept so that consumers can
//! still tell a `Guid` string from any other string.

use std::str::FromStr;

use creg_core::identity::is_guid_reference;
use creg_core::CiKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix every `$ref` must carry.
pub const REFERENCE_PREFIX: &str = "#/";

/// Child nodes of an object, keyed case-insensitively in declared order.
pub type Properties = IndexMap<CiKey, SchemaNode>;

/// The closed set of node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl FromStr for SchemaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" => Ok(Self::String),
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            other => Err(format!("unknown schema type {other:?}")),
        }
    }
}

impl TryFrom<String> for SchemaType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Refinement of a type. Only meaningful together with the node type;
/// unrecognized formats are kept for display and otherwise ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SchemaFormat {
    Int32,
    Int64,
    Float,
    Double,
    DateTime,
    Uuid,
    Other(String),
}

impl SchemaFormat {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::Double => "double",
            Self::DateTime => "date-time",
            Self::Uuid => "uuid",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for SchemaFormat {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "float" => Self::Float,
            "double" => Self::Double,
            "date-time" => Self::DateTime,
            "uuid" => Self::Uuid,
            _ => Self::Other(s),
        }
    }
}

impl From<SchemaFormat> for String {
    fn from(f: SchemaFormat) -> Self {
        f.as_str().to_string()
    }
}

impl std::fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One type definition within a contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SchemaFormat>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Raw `$ref` text, e.g. `#/Guid`.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: Properties,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

impl SchemaNode {
    /// A node of the given type with nothing else set.
    pub fn typed(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    /// The node's type, falling back to `object` for an untyped node.
    pub fn kind(&self) -> SchemaType {
        self.schema_type.unwrap_or(SchemaType::Object)
    }

    /// The bare definition name this node references, if the `$ref` is
    /// well formed.
    pub fn reference_name(&self) -> Option<&str> {
        self.reference.as_deref().and_then(parse_reference_name)
    }

    /// Whether values of this node must read as a Guid.
    pub fn is_guid(&self) -> bool {
        self.kind() == SchemaType::String
            && (self.reference_name().is_some_and(is_guid_reference)
                || self.format == Some(SchemaFormat::Uuid))
    }

    /// Whether values of this node must read as a date/time.
    pub fn is_date_time(&self) -> bool {
        self.kind() == SchemaType::String && self.format == Some(SchemaFormat::DateTime)
    }

    /// Lower array bound; zero means unbounded.
    pub fn min_bound(&self) -> Option<usize> {
        self.min_items.filter(|n| *n > 0)
    }

    /// Upper array bound; zero means unbounded.
    pub fn max_bound(&self) -> Option<usize> {
        self.max_items.filter(|n| *n > 0)
    }

    /// Take type information from a referenced definition.
    ///
    /// Type, format and pattern always come from the target. The example is
    /// taken only when this node has none of its own. Structure (properties,
    /// items, bounds) is copied only where this node declares none.
    pub(crate) fn inherit_from(&mut self, target: &SchemaNode) {
        self.schema_type = target.schema_type;
        self.format = target.format.clone();
        self.pattern = target.pattern.clone();
        if self.example.is_none() {
            self.example = target.example.clone();
        }
        if self.description.is_none() {
            self.description = target.description.clone();
        }
        if self.properties.is_empty() {
            self.properties = target.properties.clone();
        }
        if self.items.is_none() {
            self.items = target.items.clone();
        }
        if self.min_items.is_none() {
            self.min_items = target.min_items;
        }
        if self.max_items.is_none() {
            self.max_items = target.max_items;
        }
    }
}

/// Strip the `#/` prefix from a reference, returning the bare name.
///
/// Returns `None` for anything that does not carry exactly that prefix
/// followed by a non-empty name; no other JSON Pointer syntax is supported.
pub fn parse_reference_name(reference: &str) -> Option<&str> {
    reference
        .strip_prefix(REFERENCE_PREFIX)
        .filter(|name| !name.is_empty())
}
