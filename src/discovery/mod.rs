//! Discovery orchestrator.
//!
//! Walks the database through an [`Inspector`] and assembles a [`Catalog`]:
//!
//! ```text
//! ┌───────────┐  supplied?  ┌──────────────────┐
//! │ Discovery │────────────▶│ input catalog    │  (returned verbatim)
//! └─────┬─────┘             └──────────────────┘
//!       │ cached?           ┌──────────────────┐
//!       ├──────────────────▶│ OnceCell<Catalog>│
//!       │                   └──────────────────┘
//!       ▼
//! Connector ─▶ Inspector ─▶ schemas ─▶ objects ─▶ CatalogEntryBuilder
//! ```
//!
//! Calls are issued one at a time; nothing is fetched concurrently.

mod error;
mod filter;

pub use error::{DiscoveryError, DiscoveryResult};
pub use filter::{TableFilter, TableRef};

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::catalog::{Catalog, CatalogEntryBuilder};
use crate::connector::Connector;
use crate::metadata::Inspector;

/// System catalog schema, skipped when no allow-list is configured.
pub const SYSTEM_SCHEMA: &str = "information_schema";

/// Builds the catalog for one connector.
pub struct Discovery {
    connector: Arc<Connector>,
    builder: CatalogEntryBuilder,
    filter: Option<TableFilter>,
    input_catalog: Option<Catalog>,
    cache: OnceCell<Catalog>,
}

impl Discovery {
    pub fn new(connector: Arc<Connector>) -> Self {
        Self {
            connector,
            builder: CatalogEntryBuilder::default(),
            filter: None,
            input_catalog: None,
            cache: OnceCell::new(),
        }
    }

    pub fn with_filter(mut self, filter: Option<TableFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_builder(mut self, builder: CatalogEntryBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Use a previously produced catalog instead of introspecting.
    pub fn with_input_catalog(mut self, catalog: Catalog) -> Self {
        self.input_catalog = Some(catalog);
        self
    }

    /// Return the catalog, discovering it on first use.
    ///
    /// A supplied catalog is returned as-is, without touching the database
    /// and without applying the allow-list. Otherwise the first successful
    /// discovery is cached for the lifetime of this instance. A failed pass
    /// caches nothing.
    pub async fn discover(&self) -> DiscoveryResult<&Catalog> {
        if let Some(catalog) = &self.input_catalog {
            debug!(streams = catalog.len(), "using supplied catalog");
            return Ok(catalog);
        }
        self.cache.get_or_try_init(|| self.run()).await
    }

    async fn run(&self) -> DiscoveryResult<Catalog> {
        let inspector = self
            .connector
            .inspector()
            .await
            .map_err(DiscoveryError::Connection)?;

        let schemas = self.target_schemas(inspector.as_ref()).await?;
        info!(schemas = schemas.len(), "discovering streams");

        let mut streams = Vec::new();
        for schema in &schemas {
            let objects = inspector
                .list_objects(schema)
                .await
                .map_err(|e| DiscoveryError::introspection(schema.as_str(), e))?;

            for object in objects {
                if let Some(filter) = &self.filter {
                    if !filter.allows(schema, &object.name) {
                        continue;
                    }
                }

                let introspection = inspector
                    .introspect_object(schema, &object)
                    .await
                    .map_err(|e| {
                        DiscoveryError::introspection(format!("{schema}.{}", object.name), e)
                    })?;
                debug!(
                    schema = %schema,
                    table = %object.name,
                    is_view = object.is_view,
                    columns = introspection.columns.len(),
                    "discovered stream"
                );
                streams.push(self.builder.build(introspection));
            }
        }

        info!(streams = streams.len(), "discovery complete");
        Ok(Catalog::new(streams))
    }

    async fn target_schemas(&self, inspector: &dyn Inspector) -> DiscoveryResult<Vec<String>> {
        if let Some(filter) = &self.filter {
            return Ok(filter.schema_names().into_iter().map(String::from).collect());
        }

        let schemas = inspector
            .list_schemas()
            .await
            .map_err(|e| DiscoveryError::introspection("schemas", e))?;
        Ok(schemas
            .into_iter()
            .filter(|s| !s.eq_ignore_ascii_case(SYSTEM_SCHEMA))
            .collect())
    }
}
