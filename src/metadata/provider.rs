//! Introspection collaborator traits.
//!
//! [`ConnectionProvider`] hands out a live [`Inspector`] for a validated
//! connection target. The worker-backed implementation lives in
//! [`worker_provider`](super::worker_provider); tests substitute in-memory
//! fakes.

use std::sync::Arc;

use async_trait::async_trait;

use super::types::*;
use crate::config::ConnectionConfig;
use crate::worker::WorkerError;

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, WorkerError>;

/// Structural metadata queries against one database.
///
/// Implementations are not required to be safe for overlapping calls from
/// several tasks; discovery issues them one at a time.
#[async_trait]
pub trait Inspector: Send + Sync {
    /// List all schemas in the database, in backend order.
    async fn list_schemas(&self) -> MetadataResult<Vec<String>>;

    /// List tables and views in a schema, in backend order.
    async fn list_objects(&self, schema: &str) -> MetadataResult<Vec<ObjectInfo>>;

    /// Columns of a table or view, in ordinal order.
    async fn get_columns(&self, table: &str, schema: &str)
        -> MetadataResult<Vec<ColumnDescriptor>>;

    /// The declared primary key, if any.
    async fn get_primary_key(&self, table: &str, schema: &str)
        -> MetadataResult<Option<KeyCandidate>>;

    /// All indexes of a table, in backend order.
    async fn get_indexes(&self, table: &str, schema: &str) -> MetadataResult<Vec<IndexInfo>>;

    /// Column lists of the unique, non-primary indexes, in backend order.
    async fn get_unique_indexes(
        &self,
        table: &str,
        schema: &str,
    ) -> MetadataResult<Vec<KeyCandidate>> {
        let indexes = self.get_indexes(table, schema).await?;
        Ok(indexes
            .into_iter()
            .filter(|index| index.is_unique && !index.is_primary_key)
            .filter_map(|index| KeyCandidate::new(index.columns))
            .collect())
    }

    /// Gather everything the catalog entry builder needs for one object.
    async fn introspect_object(
        &self,
        schema: &str,
        object: &ObjectInfo,
    ) -> MetadataResult<TableIntrospection> {
        let primary_key = self.get_primary_key(&object.name, schema).await?;
        let unique_indexes = self.get_unique_indexes(&object.name, schema).await?;
        let columns = self.get_columns(&object.name, schema).await?;

        Ok(TableIntrospection {
            schema_name: schema.to_string(),
            table_name: object.name.clone(),
            is_view: object.is_view,
            columns,
            primary_key,
            unique_indexes,
        })
    }
}

/// Source of inspector handles.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Open a connection to the target and return an inspector bound to it.
    async fn create_connection(
        &self,
        connection: &ConnectionConfig,
    ) -> MetadataResult<Arc<dyn Inspector>>;
}
