//! Stream handles.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogEntry};
use crate::connector::Connector;

/// One catalog entry bound to the shared connector.
#[derive(Debug, Clone)]
pub struct Stream {
    entry: CatalogEntry,
    connector: Arc<Connector>,
}

impl Stream {
    pub fn new(entry: CatalogEntry, connector: Arc<Connector>) -> Self {
        Self { entry, connector }
    }

    pub fn tap_stream_id(&self) -> &str {
        &self.entry.tap_stream_id
    }

    pub fn entry(&self) -> &CatalogEntry {
        &self.entry
    }

    pub fn connector(&self) -> &Arc<Connector> {
        &self.connector
    }
}

/// One stream per catalog entry, in catalog order, all sharing `connector`.
pub fn instantiate(catalog: &Catalog, connector: &Arc<Connector>) -> Vec<Stream> {
    catalog
        .streams
        .iter()
        .map(|entry| Stream::new(entry.clone(), Arc::clone(connector)))
        .collect()
}
