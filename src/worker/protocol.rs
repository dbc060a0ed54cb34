//! Protocol types for worker communication.
//!
//! One JSON object per line in each direction. Every request carries the
//! connection parameters so the worker can pool connections per target.

use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Envelope
// ============================================================================

/// Request envelope sent to the worker.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    /// Unique request ID for correlation.
    pub id: String,
    /// Method name (e.g., "metadata.list_schemas").
    pub method: String,
    /// Method-specific parameters.
    pub params: serde_json::Value,
}

/// Response envelope received from the worker.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    /// Request ID this response corresponds to.
    pub id: String,
    /// Whether the request succeeded.
    pub success: bool,
    /// Result data (present if success = true).
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    /// Error information (present if success = false).
    #[serde(default)]
    pub error: Option<ErrorInfo>,
}

/// Error information in a failed response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

// ============================================================================
// Request Parameters
// ============================================================================

/// Database connection parameters, included in all requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionParams {
    /// Database driver name (e.g., "redshift").
    pub driver: String,
    /// Driver-specific connection string.
    pub connection_string: String,
}

/// Parameters for requests scoped to the whole database.
#[derive(Debug, Clone, Serialize)]
pub struct DatabaseParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
}

/// Parameters for `metadata.list_tables`.
#[derive(Debug, Clone, Serialize)]
pub struct ListTablesParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    pub schema: String,
}

/// Parameters for requests scoped to one table or view.
#[derive(Debug, Clone, Serialize)]
pub struct TableParams {
    #[serde(flatten)]
    pub connection: ConnectionParams,
    pub schema: String,
    pub table: String,
}

// ============================================================================
// Metadata Response Types
// ============================================================================

/// Schema information.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaInfo {
    pub name: String,
}

/// Response from `metadata.list_schemas`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListSchemasResponse {
    pub schemas: Vec<SchemaInfo>,
}

/// Basic table or view information.
#[derive(Debug, Clone, Deserialize)]
pub struct TableInfo {
    /// Table name.
    pub name: String,
    /// Table type ("TABLE", "VIEW", "MATERIALIZED_VIEW").
    #[serde(rename = "type")]
    pub table_type: String,
}

impl TableInfo {
    /// Whether the object is a view (plain or materialized).
    pub fn is_view(&self) -> bool {
        self.table_type.to_ascii_uppercase().contains("VIEW")
    }
}

/// Response from `metadata.list_tables`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListTablesResponse {
    pub tables: Vec<TableInfo>,
}

/// Column information, in ordinal order.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    /// Database-specific type name.
    pub data_type: String,
    pub is_nullable: bool,
    /// Maximum length for string and binary types.
    #[serde(default)]
    pub max_length: Option<i32>,
    #[serde(default)]
    pub numeric_precision: Option<i32>,
    #[serde(default)]
    pub numeric_scale: Option<i32>,
}

/// Response from `metadata.get_columns`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetColumnsResponse {
    pub columns: Vec<ColumnInfo>,
}

/// Primary key information.
#[derive(Debug, Clone, Deserialize)]
pub struct PrimaryKeyInfo {
    #[serde(default)]
    pub name: Option<String>,
    /// Columns in the primary key (ordered).
    pub columns: Vec<String>,
}

/// Response from `metadata.get_primary_key`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetPrimaryKeyResponse {
    #[serde(default)]
    pub primary_key: Option<PrimaryKeyInfo>,
}

/// Index column information.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexColumnInfo {
    pub name: String,
    /// Whether this is an included (non-key) column.
    #[serde(default)]
    pub is_included: bool,
}

/// Index information.
#[derive(Debug, Clone, Deserialize)]
pub struct IndexInfo {
    pub name: String,
    /// Columns in the index (ordered).
    pub columns: Vec<IndexColumnInfo>,
    pub is_unique: bool,
    /// Whether this backs the primary key.
    #[serde(default)]
    pub is_primary_key: bool,
}

/// Response from `metadata.get_indexes`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetIndexesResponse {
    pub indexes: Vec<IndexInfo>,
}

/// Database information.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseInfo {
    pub product_name: String,
    pub product_version: String,
    pub database_name: String,
}

/// Response from `metadata.get_database_info`.
#[derive(Debug, Clone, Deserialize)]
pub struct GetDatabaseInfoResponse {
    pub database: DatabaseInfo,
}

// ============================================================================
// Method Names
// ============================================================================

/// Worker method names.
pub mod methods {
    pub const GET_DATABASE_INFO: &str = "metadata.get_database_info";
    pub const LIST_SCHEMAS: &str = "metadata.list_schemas";
    pub const LIST_TABLES: &str = "metadata.list_tables";
    pub const GET_COLUMNS: &str = "metadata.get_columns";
    pub const GET_PRIMARY_KEY: &str = "metadata.get_primary_key";
    pub const GET_INDEXES: &str = "metadata.get_indexes";
}
