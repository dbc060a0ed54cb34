//! Worker-backed connection provider and inspector.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::provider::{ConnectionProvider, Inspector, MetadataResult};
use super::types::{ColumnDescriptor, IndexInfo, KeyCandidate, ObjectInfo};
use crate::config::ConnectionConfig;
use crate::worker::protocol::{self, methods, ConnectionParams};
use crate::worker::WorkerClient;

/// [`ConnectionProvider`] that routes introspection through a worker process.
///
/// # Example
///
/// ```ignore
/// use tap_redshift::metadata::WorkerConnectionProvider;
/// use tap_redshift::worker::WorkerClient;
///
/// let client = WorkerClient::spawn_with_settings(&config.worker).await?;
/// let provider = WorkerConnectionProvider::with_client(client);
/// let inspector = provider.create_connection(&connection).await?;
/// ```
pub struct WorkerConnectionProvider {
    client: Arc<WorkerClient>,
}

impl WorkerConnectionProvider {
    pub fn new(client: Arc<WorkerClient>) -> Self {
        Self { client }
    }

    /// Convenience constructor that wraps an owned client in an `Arc`.
    pub fn with_client(client: WorkerClient) -> Self {
        Self::new(Arc::new(client))
    }
}

#[async_trait]
impl ConnectionProvider for WorkerConnectionProvider {
    async fn create_connection(
        &self,
        connection: &ConnectionConfig,
    ) -> MetadataResult<Arc<dyn Inspector>> {
        let inspector = WorkerInspector::new(
            self.client.clone(),
            connection.driver_name(),
            connection.to_connection_string(),
        );

        // Fail fast on unreachable targets before enumeration starts.
        let info: protocol::GetDatabaseInfoResponse = inspector
            .client
            .request(
                methods::GET_DATABASE_INFO,
                protocol::DatabaseParams {
                    connection: inspector.connection_params(),
                },
            )
            .await?;
        debug!(
            product = %info.database.product_name,
            version = %info.database.product_version,
            database = %info.database.database_name,
            "connected"
        );

        Ok(Arc::new(inspector))
    }
}

/// [`Inspector`] implementation that uses the [`WorkerClient`].
pub struct WorkerInspector {
    client: Arc<WorkerClient>,
    /// Cached connection parameters sent with every request.
    connection: ConnectionParams,
}

impl WorkerInspector {
    /// Create a new inspector.
    ///
    /// * `driver` - Database driver name (e.g., "redshift").
    /// * `connection_string` - Driver-specific connection string.
    pub fn new(
        client: Arc<WorkerClient>,
        driver: impl Into<String>,
        connection_string: impl Into<String>,
    ) -> Self {
        Self {
            client,
            connection: ConnectionParams {
                driver: driver.into(),
                connection_string: connection_string.into(),
            },
        }
    }

    #[inline]
    fn connection_params(&self) -> ConnectionParams {
        self.connection.clone()
    }

    fn table_params(&self, table: &str, schema: &str) -> protocol::TableParams {
        protocol::TableParams {
            connection: self.connection_params(),
            schema: schema.to_string(),
            table: table.to_string(),
        }
    }
}

#[async_trait]
impl Inspector for WorkerInspector {
    async fn list_schemas(&self) -> MetadataResult<Vec<String>> {
        let response: protocol::ListSchemasResponse = self
            .client
            .request(
                methods::LIST_SCHEMAS,
                protocol::DatabaseParams {
                    connection: self.connection_params(),
                },
            )
            .await?;

        Ok(response.schemas.into_iter().map(|s| s.name).collect())
    }

    async fn list_objects(&self, schema: &str) -> MetadataResult<Vec<ObjectInfo>> {
        let response: protocol::ListTablesResponse = self
            .client
            .request(
                methods::LIST_TABLES,
                protocol::ListTablesParams {
                    connection: self.connection_params(),
                    schema: schema.to_string(),
                },
            )
            .await?;

        Ok(response.tables.into_iter().map(Into::into).collect())
    }

    async fn get_columns(
        &self,
        table: &str,
        schema: &str,
    ) -> MetadataResult<Vec<ColumnDescriptor>> {
        let response: protocol::GetColumnsResponse = self
            .client
            .request(methods::GET_COLUMNS, self.table_params(table, schema))
            .await?;

        Ok(response.columns.into_iter().map(Into::into).collect())
    }

    async fn get_primary_key(
        &self,
        table: &str,
        schema: &str,
    ) -> MetadataResult<Option<KeyCandidate>> {
        let response: protocol::GetPrimaryKeyResponse = self
            .client
            .request(methods::GET_PRIMARY_KEY, self.table_params(table, schema))
            .await?;

        Ok(response
            .primary_key
            .and_then(|pk| KeyCandidate::new(pk.columns)))
    }

    async fn get_indexes(&self, table: &str, schema: &str) -> MetadataResult<Vec<IndexInfo>> {
        let response: protocol::GetIndexesResponse = self
            .client
            .request(methods::GET_INDEXES, self.table_params(table, schema))
            .await?;

        Ok(response.indexes.into_iter().map(Into::into).collect())
    }
}
