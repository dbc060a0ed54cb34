//! Discovery errors.

use thiserror::Error;

use crate::config::ConfigError;
use crate::worker::WorkerError;

pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Errors that abort a discovery pass.
///
/// No partial catalog survives any of these.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("connection error: {0}")]
    Connection(#[source] WorkerError),

    #[error("failed to introspect {object}: {source}")]
    Introspection {
        object: String,
        #[source]
        source: WorkerError,
    },
}

impl DiscoveryError {
    /// Classify a failure raised while introspecting `object`.
    ///
    /// Connection-class failures stay connection errors regardless of which
    /// call surfaced them.
    pub fn introspection(object: impl Into<String>, source: WorkerError) -> Self {
        if source.is_connection_failure() {
            Self::Connection(source)
        } else {
            Self::Introspection {
                object: object.into(),
                source,
            }
        }
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}
