//! Catalog entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::metadata::MetadataMapping;
use super::schema::Schema;

/// Strategy used to extract a stream's rows.
///
/// Catalogs written by other tools may carry values outside the known set
/// (including an empty string); those are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReplicationMethod {
    /// Reload the whole table on every run.
    FullTable,
    /// Extract rows past a bookmark on a user-chosen replication key.
    Incremental,
    /// Read changes from the database log.
    LogBased,
    Other(String),
}

impl ReplicationMethod {
    pub fn is_known(&self) -> bool {
        !matches!(self, ReplicationMethod::Other(_))
    }
}

impl From<String> for ReplicationMethod {
    fn from(s: String) -> Self {
        match s.as_str() {
            "FULL_TABLE" => ReplicationMethod::FullTable,
            "INCREMENTAL" => ReplicationMethod::Incremental,
            "LOG_BASED" => ReplicationMethod::LogBased,
            _ => ReplicationMethod::Other(s),
        }
    }
}

impl From<ReplicationMethod> for String {
    fn from(method: ReplicationMethod) -> Self {
        match method {
            ReplicationMethod::Other(s) => s,
            known => known.to_string(),
        }
    }
}

impl fmt::Display for ReplicationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplicationMethod::FullTable => write!(f, "FULL_TABLE"),
            ReplicationMethod::Incremental => write!(f, "INCREMENTAL"),
            ReplicationMethod::LogBased => write!(f, "LOG_BASED"),
            ReplicationMethod::Other(s) => f.write_str(s),
        }
    }
}

/// One discoverable stream.
///
/// Field order matches the persisted catalog format. `replication_key` is
/// never filled in by discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub tap_stream_id: String,
    pub stream: String,
    pub table: String,
    #[serde(default)]
    pub key_properties: Option<Vec<String>>,
    pub schema: Schema,
    #[serde(default)]
    pub is_view: bool,
    #[serde(default)]
    pub replication_method: Option<ReplicationMethod>,
    #[serde(default)]
    pub metadata: MetadataMapping,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub row_count: Option<u64>,
    #[serde(default)]
    pub stream_alias: Option<String>,
    #[serde(default)]
    pub replication_key: Option<String>,
}

impl CatalogEntry {
    /// Source schema, as recorded in the stream-level metadata.
    pub fn schema_name(&self) -> Option<&str> {
        self.metadata.root()?.schema_name.as_deref()
    }

    /// Key properties, empty when the stream has none.
    pub fn key_properties(&self) -> &[String] {
        self.key_properties.as_deref().unwrap_or_default()
    }

    /// Whether the stream is selected for extraction.
    pub fn is_selected(&self) -> bool {
        self.metadata.root().is_some_and(|m| m.is_selected())
    }
}
