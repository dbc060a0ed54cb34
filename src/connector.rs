//! Shared database connector.
//!
//! One [`Connector`] serves the discovery pass and every stream built from
//! its catalog. The inspector handle is opened on first use and reused
//! afterwards.

use std::fmt;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use crate::config::ConnectionConfig;
use crate::metadata::{ConnectionProvider, Inspector, MetadataResult};

pub struct Connector {
    connection: ConnectionConfig,
    provider: Arc<dyn ConnectionProvider>,
    inspector: OnceCell<Arc<dyn Inspector>>,
}

impl Connector {
    pub fn new(connection: ConnectionConfig, provider: Arc<dyn ConnectionProvider>) -> Self {
        Self {
            connection,
            provider,
            inspector: OnceCell::new(),
        }
    }

    pub fn connection(&self) -> &ConnectionConfig {
        &self.connection
    }

    /// The inspector for this connection, opening it if needed.
    ///
    /// A failed attempt is not remembered; the next call tries again.
    pub async fn inspector(&self) -> MetadataResult<Arc<dyn Inspector>> {
        let inspector = self
            .inspector
            .get_or_try_init(|| async {
                info!(connection = %self.connection, "connecting");
                self.provider.create_connection(&self.connection).await
            })
            .await?;
        Ok(Arc::clone(inspector))
    }

    pub fn is_connected(&self) -> bool {
        self.inspector.initialized()
    }
}

impl fmt::Debug for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connector")
            .field("connection", &self.connection)
            .field("connected", &self.is_connected())
            .finish()
    }
}
