//! Catalog entry builder.
//!
//! Turns the introspection results for one table or view into a
//! self-contained [`CatalogEntry`].

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::entry::{CatalogEntry, ReplicationMethod};
use super::keys::infer_key_properties;
use super::metadata::{MetadataMapping, StandardMetadata};
use super::schema::{Properties, Schema};
use super::stream_id::stream_id;
use crate::metadata::TableIntrospection;
use crate::typemap::to_jsonschema_type;

/// Replication method recorded on entries when the computed method is not
/// used.
pub const FIXED_ENTRY_REPLICATION_METHOD: ReplicationMethod = ReplicationMethod::Incremental;

/// How the replication method of a discovered stream is chosen.
///
/// The computed method is the last of `[FULL_TABLE, additional_methods...]`,
/// so methods enabled later override the default. The computed method
/// always goes into the stream metadata as `forced-replication-method`.
/// With `use_computed_method = false` the entry itself records
/// [`FIXED_ENTRY_REPLICATION_METHOD`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplicationPolicy {
    pub use_computed_method: bool,
    pub additional_methods: Vec<ReplicationMethod>,
}

impl Default for ReplicationPolicy {
    fn default() -> Self {
        Self {
            use_computed_method: true,
            additional_methods: Vec::new(),
        }
    }
}

impl ReplicationPolicy {
    pub fn computed_method(&self) -> ReplicationMethod {
        self.additional_methods
            .last()
            .cloned()
            .unwrap_or(ReplicationMethod::FullTable)
    }

    pub fn entry_method(&self) -> ReplicationMethod {
        if self.use_computed_method {
            self.computed_method()
        } else {
            FIXED_ENTRY_REPLICATION_METHOD
        }
    }
}

/// Builds one catalog entry per discovered object.
#[derive(Debug, Clone, Default)]
pub struct CatalogEntryBuilder {
    policy: ReplicationPolicy,
}

impl CatalogEntryBuilder {
    pub fn new(policy: ReplicationPolicy) -> Self {
        Self { policy }
    }

    /// Build the catalog entry for one table or view.
    ///
    /// An object with no columns still yields an entry, with an empty
    /// property map.
    pub fn build(&self, table: TableIntrospection) -> CatalogEntry {
        let TableIntrospection {
            schema_name,
            table_name,
            is_view,
            columns,
            primary_key,
            unique_indexes,
        } = table;

        let id = stream_id(&schema_name, &table_name);

        let key_properties = infer_key_properties(primary_key.as_ref(), &unique_indexes)
            .map(|key| key.into_columns());

        let mut properties = Properties::with_capacity(columns.len());
        let mut required = Vec::new();
        for column in columns {
            let node = to_jsonschema_type(&column.native_type);
            let node = if column.nullable {
                node.nullable()
            } else {
                required.push(column.name.clone());
                node
            };
            properties.insert(column.name, node);
        }
        let schema = Schema::object(properties, required);

        if let Some(keys) = &key_properties {
            for key in keys {
                if schema.property(key).is_none() {
                    warn!(stream = %id, column = %key, "key column not found among table columns");
                }
            }
        }

        let metadata = MetadataMapping::standard(StandardMetadata {
            schema_name: &schema_name,
            schema: &schema,
            replication_method: self.policy.computed_method(),
            key_properties: key_properties.as_deref(),
            valid_replication_keys: None,
        });

        CatalogEntry {
            tap_stream_id: id.clone(),
            stream: id,
            table: table_name,
            key_properties,
            schema,
            is_view,
            replication_method: Some(self.policy.entry_method()),
            metadata,
            database: None,
            row_count: None,
            stream_alias: None,
            replication_key: None,
        }
    }
}
