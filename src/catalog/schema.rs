//! JSON-Schema-like type tree for stream schemas.
//!
//! Only the keywords discovery produces are modelled as fields; any other
//! keyword found in a supplied catalog is kept in `extra` and written back
//! unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Primitive JSON Schema type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Object,
    Array,
}

/// The `type` keyword: a single name or a union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(JsonType),
    Union(Vec<JsonType>),
}

impl SchemaType {
    pub fn contains(&self, json_type: JsonType) -> bool {
        match self {
            SchemaType::Single(t) => *t == json_type,
            SchemaType::Union(types) => types.contains(&json_type),
        }
    }
}

/// Property map preserving column order.
pub type Properties = IndexMap<String, Schema>;

/// A schema node.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "maxLength", default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Schema {
    /// A node typed as the union of `types`.
    pub fn of(types: impl IntoIterator<Item = JsonType>) -> Self {
        Self {
            schema_type: Some(SchemaType::Union(types.into_iter().collect())),
            ..Self::default()
        }
    }

    /// An object node with the given properties. `required` is omitted when
    /// empty.
    pub fn object(properties: Properties, required: Vec<String>) -> Self {
        Self {
            schema_type: Some(SchemaType::Single(JsonType::Object)),
            properties: Some(properties),
            required: if required.is_empty() {
                None
            } else {
                Some(required)
            },
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_max_length(mut self, max_length: u64) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Add `"null"` to the type union. A single type becomes a union.
    pub fn nullable(mut self) -> Self {
        self.schema_type = match self.schema_type.take() {
            Some(SchemaType::Single(t)) if t == JsonType::Null => Some(SchemaType::Single(t)),
            Some(SchemaType::Single(t)) => Some(SchemaType::Union(vec![t, JsonType::Null])),
            Some(SchemaType::Union(mut types)) => {
                if !types.contains(&JsonType::Null) {
                    types.push(JsonType::Null);
                }
                Some(SchemaType::Union(types))
            }
            // Untyped nodes already accept null.
            None => None,
        };
        self
    }

    /// Whether a value of `json_type` is allowed by this node's type.
    pub fn allows(&self, json_type: JsonType) -> bool {
        self.schema_type
            .as_ref()
            .map_or(true, |t| t.contains(json_type))
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }

    /// Property names in declaration order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .flat_map(|p| p.keys().map(String::as_str))
    }
}
