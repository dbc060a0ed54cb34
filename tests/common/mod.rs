//! In-memory introspection backend shared by the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tap_redshift::config::{ConnectionConfig, TapConfig};
use tap_redshift::metadata::{
    ColumnDescriptor, ConnectionProvider, IndexInfo, Inspector, KeyCandidate, MetadataResult,
    NativeType, ObjectInfo,
};
use tap_redshift::worker::WorkerError;

#[derive(Debug, Clone)]
pub struct FakeTable {
    pub name: String,
    pub is_view: bool,
    pub columns: Vec<ColumnDescriptor>,
    pub primary_key: Option<Vec<String>>,
    pub indexes: Vec<IndexInfo>,
}

impl FakeTable {
    pub fn table(name: &str) -> Self {
        Self {
            name: name.to_string(),
            is_view: false,
            columns: Vec::new(),
            primary_key: None,
            indexes: Vec::new(),
        }
    }

    pub fn view(name: &str) -> Self {
        Self {
            is_view: true,
            ..Self::table(name)
        }
    }

    pub fn column(mut self, name: &str, native_type: NativeType, nullable: bool) -> Self {
        self.columns
            .push(ColumnDescriptor::new(name, native_type, nullable));
        self
    }

    pub fn primary_key(mut self, columns: &[&str]) -> Self {
        self.primary_key = Some(columns.iter().map(|c| c.to_string()).collect());
        self.indexes.push(IndexInfo {
            name: format!("{}_pkey", self.name),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            is_unique: true,
            is_primary_key: true,
        });
        self
    }

    pub fn unique_index(mut self, name: &str, columns: &[&str]) -> Self {
        self.indexes.push(IndexInfo {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            is_unique: true,
            is_primary_key: false,
        });
        self
    }

    pub fn index(mut self, name: &str, columns: &[&str]) -> Self {
        self.indexes.push(IndexInfo {
            name: name.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            is_unique: false,
            is_primary_key: false,
        });
        self
    }
}

/// Schemas and their objects, in "backend" order.
#[derive(Debug, Clone, Default)]
pub struct FakeDatabase {
    schemas: Vec<(String, Vec<FakeTable>)>,
    denied: Option<String>,
}

impl FakeDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schema(mut self, name: &str) -> Self {
        if self.find(name).is_none() {
            self.schemas.push((name.to_string(), Vec::new()));
        }
        self
    }

    pub fn with(mut self, schema: &str, table: FakeTable) -> Self {
        self = self.schema(schema);
        if let Some((_, tables)) = self
            .schemas
            .iter_mut()
            .find(|(s, _)| s.eq_ignore_ascii_case(schema))
        {
            tables.push(table);
        }
        self
    }

    /// Reject column queries for this table with a permission error.
    pub fn deny_columns(mut self, table: &str) -> Self {
        self.denied = Some(table.to_string());
        self
    }

    // Identifiers fold case the way Redshift does.
    fn find(&self, schema: &str) -> Option<&Vec<FakeTable>> {
        self.schemas
            .iter()
            .find(|(s, _)| s.eq_ignore_ascii_case(schema))
            .map(|(_, t)| t)
    }

    fn table(&self, table: &str, schema: &str) -> Option<&FakeTable> {
        self.find(schema)?.iter().find(|t| t.name == table)
    }
}

/// Inspector over a [`FakeDatabase`] counting every call.
pub struct FakeInspector {
    db: FakeDatabase,
    calls: Arc<AtomicUsize>,
    log: Arc<Mutex<Vec<String>>>,
}

impl FakeInspector {
    fn record(&self, call: String) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut log) = self.log.lock() {
            log.push(call);
        }
    }
}

#[async_trait]
impl Inspector for FakeInspector {
    async fn list_schemas(&self) -> MetadataResult<Vec<String>> {
        self.record("list_schemas".to_string());
        Ok(self.db.schemas.iter().map(|(s, _)| s.clone()).collect())
    }

    async fn list_objects(&self, schema: &str) -> MetadataResult<Vec<ObjectInfo>> {
        self.record(format!("list_objects {schema}"));
        Ok(self
            .db
            .find(schema)
            .map(|tables| {
                tables
                    .iter()
                    .map(|t| ObjectInfo {
                        name: t.name.clone(),
                        is_view: t.is_view,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_columns(
        &self,
        table: &str,
        schema: &str,
    ) -> MetadataResult<Vec<ColumnDescriptor>> {
        self.record(format!("get_columns {schema}.{table}"));
        if self.db.denied.as_deref() == Some(table) {
            return Err(WorkerError::PermissionDenied(format!(
                "permission denied for relation {table}"
            )));
        }
        Ok(self
            .db
            .table(table, schema)
            .map(|t| t.columns.clone())
            .unwrap_or_default())
    }

    async fn get_primary_key(
        &self,
        table: &str,
        schema: &str,
    ) -> MetadataResult<Option<KeyCandidate>> {
        self.record(format!("get_primary_key {schema}.{table}"));
        Ok(self
            .db
            .table(table, schema)
            .and_then(|t| t.primary_key.clone())
            .and_then(KeyCandidate::new))
    }

    async fn get_indexes(&self, table: &str, schema: &str) -> MetadataResult<Vec<IndexInfo>> {
        self.record(format!("get_indexes {schema}.{table}"));
        Ok(self
            .db
            .table(table, schema)
            .map(|t| t.indexes.clone())
            .unwrap_or_default())
    }
}

/// Connection provider handing out [`FakeInspector`]s.
///
/// The first `failures` connection attempts fail with a connection error.
pub struct FakeProvider {
    db: FakeDatabase,
    failures: AtomicUsize,
    connections: AtomicUsize,
    calls: Arc<AtomicUsize>,
    log: Arc<Mutex<Vec<String>>>,
}

impl FakeProvider {
    pub fn new(db: FakeDatabase) -> Arc<Self> {
        Self::failing(db, 0)
    }

    pub fn failing(db: FakeDatabase, failures: usize) -> Arc<Self> {
        Arc::new(Self {
            db,
            failures: AtomicUsize::new(failures),
            connections: AtomicUsize::new(0),
            calls: Arc::new(AtomicUsize::new(0)),
            log: Arc::new(Mutex::new(Vec::new())),
        })
    }

    /// Connection attempts, successful or not.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Introspection calls across every inspector handed out.
    pub fn introspection_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn call_log(&self) -> Vec<String> {
        self.log.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ConnectionProvider for FakeProvider {
    async fn create_connection(
        &self,
        _connection: &ConnectionConfig,
    ) -> MetadataResult<Arc<dyn Inspector>> {
        self.connections.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(WorkerError::ConnectionFailed(
                "could not connect to server: Connection refused".to_string(),
            ));
        }
        Ok(Arc::new(FakeInspector {
            db: self.db.clone(),
            calls: Arc::clone(&self.calls),
            log: Arc::clone(&self.log),
        }))
    }
}

/// A complete discrete configuration.
pub fn config() -> TapConfig {
    TapConfig {
        host: Some("example.redshift.amazonaws.com".to_string()),
        username: Some("loader".to_string()),
        password: Some("secret".to_string()),
        database: Some("analytics".to_string()),
        ..TapConfig::default()
    }
}

pub fn config_with_tables(tables: &[&str]) -> TapConfig {
    TapConfig {
        tables: tables.iter().map(|t| t.to_string()).collect(),
        ..config()
    }
}

pub fn connection() -> ConnectionConfig {
    ConnectionConfig::Discrete {
        host: "example.redshift.amazonaws.com".to_string(),
        port: 5439,
        database: "analytics".to_string(),
        username: "loader".to_string(),
        password: "secret".to_string(),
    }
}

pub fn int() -> NativeType {
    NativeType::new("integer")
}

pub fn varchar(length: u32) -> NativeType {
    NativeType::new("character varying").with_length(length)
}
