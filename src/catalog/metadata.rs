//! Stream and property metadata.
//!
//! Metadata is a list of `{breadcrumb, metadata}` pairs. The empty
//! breadcrumb addresses the stream itself; `["properties", <column>]`
//! addresses one column. Downstream tooling reads `selected`,
//! `selected-by-default` and `inclusion` to decide what to extract.

use serde::{Deserialize, Serialize};

use super::entry::ReplicationMethod;
use super::schema::Schema;

/// How a stream or property takes part in extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inclusion {
    /// Always extracted.
    Automatic,
    /// Extracted when selected.
    Available,
    /// Never extracted.
    Unsupported,
}

/// Metadata values for one breadcrumb.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusion: Option<Inclusion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_by_default: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_key_properties: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_replication_method: Option<ReplicationMethod>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_replication_keys: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Metadata {
    /// Whether the breadcrumb is selected, falling back to its default.
    pub fn is_selected(&self) -> bool {
        match self.inclusion {
            Some(Inclusion::Automatic) => true,
            Some(Inclusion::Unsupported) => false,
            _ => self.selected.or(self.selected_by_default).unwrap_or(false),
        }
    }
}

/// One `{breadcrumb, metadata}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub breadcrumb: Vec<String>,
    pub metadata: Metadata,
}

/// Inputs for [`MetadataMapping::standard`].
#[derive(Debug, Clone)]
pub struct StandardMetadata<'a> {
    pub schema_name: &'a str,
    pub schema: &'a Schema,
    pub replication_method: ReplicationMethod,
    pub key_properties: Option<&'a [String]>,
    /// Not known at discovery time; supplied by the user later.
    pub valid_replication_keys: Option<&'a [String]>,
}

/// Ordered metadata for one stream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataMapping(Vec<MetadataEntry>);

impl MetadataMapping {
    pub fn new(entries: Vec<MetadataEntry>) -> Self {
        Self(entries)
    }

    /// Derive the standard metadata for a discovered stream.
    ///
    /// The stream breadcrumb comes first, followed by one breadcrumb per
    /// property in schema order. Key properties and valid replication keys
    /// are `automatic`; everything else is `available`.
    pub fn standard(input: StandardMetadata<'_>) -> Self {
        let mut entries = vec![MetadataEntry {
            breadcrumb: Vec::new(),
            metadata: Metadata {
                inclusion: Some(Inclusion::Available),
                selected_by_default: Some(true),
                table_key_properties: input.key_properties.map(<[String]>::to_vec),
                forced_replication_method: Some(input.replication_method),
                valid_replication_keys: input.valid_replication_keys.map(<[String]>::to_vec),
                schema_name: Some(input.schema_name.to_string()),
                ..Metadata::default()
            },
        }];

        let is_in = |list: Option<&[String]>, name: &str| {
            list.is_some_and(|l| l.iter().any(|k| k == name))
        };

        for name in input.schema.property_names() {
            let automatic =
                is_in(input.key_properties, name) || is_in(input.valid_replication_keys, name);
            entries.push(MetadataEntry {
                breadcrumb: vec!["properties".to_string(), name.to_string()],
                metadata: Metadata {
                    inclusion: Some(if automatic {
                        Inclusion::Automatic
                    } else {
                        Inclusion::Available
                    }),
                    selected_by_default: Some(true),
                    ..Metadata::default()
                },
            });
        }

        Self(entries)
    }

    pub fn entries(&self) -> &[MetadataEntry] {
        &self.0
    }

    pub fn get(&self, breadcrumb: &[&str]) -> Option<&Metadata> {
        self.0
            .iter()
            .find(|e| e.breadcrumb.iter().map(String::as_str).eq(breadcrumb.iter().copied()))
            .map(|e| &e.metadata)
    }

    pub fn get_mut(&mut self, breadcrumb: &[&str]) -> Option<&mut Metadata> {
        self.0
            .iter_mut()
            .find(|e| e.breadcrumb.iter().map(String::as_str).eq(breadcrumb.iter().copied()))
            .map(|e| &mut e.metadata)
    }

    /// Stream-level metadata.
    pub fn root(&self) -> Option<&Metadata> {
        self.get(&[])
    }

    /// Metadata for one property.
    pub fn property(&self, name: &str) -> Option<&Metadata> {
        self.get(&["properties", name])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
