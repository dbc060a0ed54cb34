//! Catalog model.
//!
//! A [`Catalog`] is the ordered list of discoverable streams. It is built
//! fresh by discovery, or read back from a previously persisted catalog and
//! passed through untouched. The serialized form is:
//!
//! ```text
//! {"streams": [
//!   {"tap_stream_id", "stream", "table", "key_properties", "schema",
//!    "is_view", "replication_method", "metadata", "database",
//!    "row_count", "stream_alias", "replication_key"},
//!   ...
//! ]}
//! ```

mod builder;
mod entry;
mod keys;
mod metadata;
mod schema;
mod stream_id;

pub use builder::{CatalogEntryBuilder, ReplicationPolicy, FIXED_ENTRY_REPLICATION_METHOD};
pub use entry::{CatalogEntry, ReplicationMethod};
pub use keys::infer_key_properties;
pub use metadata::{Inclusion, Metadata, MetadataEntry, MetadataMapping, StandardMetadata};
pub use schema::{JsonType, Properties, Schema, SchemaType};
pub use stream_id::{split_stream_id, stream_id, STREAM_ID_DELIMITER};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error reading or writing a catalog document.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered collection of catalog entries.
///
/// A catalog read with [`Catalog::from_json`] or [`Catalog::load`] remembers
/// its source document. As long as the entries are left untouched,
/// [`Catalog::to_json`] writes that document back instead of re-rendering
/// it, so keys this crate does not model, explicit nulls and absent fields
/// all survive a pass-through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub streams: Vec<CatalogEntry>,

    #[serde(skip)]
    source: Option<SourceDocument>,
}

#[derive(Debug, Clone)]
struct SourceDocument {
    streams: Vec<CatalogEntry>,
    document: serde_json::Value,
}

impl PartialEq for Catalog {
    fn eq(&self, other: &Self) -> bool {
        self.streams == other.streams
    }
}

impl Catalog {
    pub fn new(streams: Vec<CatalogEntry>) -> Self {
        Self {
            streams,
            source: None,
        }
    }

    /// Parse a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        let mut catalog: Catalog = serde_json::from_value(document.clone())?;
        catalog.source = Some(SourceDocument {
            streams: catalog.streams.clone(),
            document,
        });
        Ok(catalog)
    }

    /// Read a catalog document from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        match &self.source {
            Some(source) if source.streams == self.streams => {
                Ok(serde_json::to_string_pretty(&source.document)?)
            }
            _ => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Look up an entry by stream id.
    pub fn get(&self, tap_stream_id: &str) -> Option<&CatalogEntry> {
        self.streams
            .iter()
            .find(|entry| entry.tap_stream_id == tap_stream_id)
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}
