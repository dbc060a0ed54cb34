//! Tap entry point.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogEntryBuilder};
use crate::config::{ConfigError, TapConfig};
use crate::connector::Connector;
use crate::discovery::{Discovery, DiscoveryResult};
use crate::metadata::ConnectionProvider;
use crate::streams::{self, Stream};

/// A configured tap: validated settings, the shared connector and the
/// discovery orchestrator.
pub struct Tap {
    config: TapConfig,
    connector: Arc<Connector>,
    discovery: Discovery,
}

impl Tap {
    pub const NAME: &'static str = "tap-redshift";

    /// Validate `config` and wire up discovery.
    ///
    /// Fails before any database I/O when the configuration is incomplete.
    pub fn new(
        config: TapConfig,
        provider: Arc<dyn ConnectionProvider>,
    ) -> Result<Self, ConfigError> {
        let connection = config.validate()?;
        let filter = config.table_filter()?;
        let connector = Arc::new(Connector::new(connection, provider));
        let discovery = Discovery::new(Arc::clone(&connector))
            .with_filter(filter)
            .with_builder(CatalogEntryBuilder::new(config.replication.clone()));

        Ok(Self {
            config,
            connector,
            discovery,
        })
    }

    pub fn with_input_catalog(mut self, catalog: Catalog) -> Self {
        self.discovery = self.discovery.with_input_catalog(catalog);
        self
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    pub fn connector(&self) -> &Arc<Connector> {
        &self.connector
    }

    pub async fn catalog(&self) -> DiscoveryResult<&Catalog> {
        self.discovery.discover().await
    }

    pub async fn discover_streams(&self) -> DiscoveryResult<Vec<Stream>> {
        let catalog = self.catalog().await?;
        Ok(streams::instantiate(catalog, &self.connector))
    }
}
