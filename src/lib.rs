//! # tap-redshift
//!
//! Catalog discovery for Amazon Redshift.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              TapConfig (JSON / TOML settings)            │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [validate]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Connector (ConnectionConfig + ConnectionProvider)      │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [Inspector]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Discovery: schemas → tables/views → columns + keys     │
//! │   (type mapping, key inference, standard metadata)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │        Catalog {"streams": [...]}  →  Stream handles     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The worker-backed provider in [`metadata`] talks to a database worker
//! process over NDJSON; any other [`metadata::ConnectionProvider`] can be
//! plugged in instead.

pub mod catalog;
pub mod config;
pub mod connector;
pub mod discovery;
pub mod metadata;
pub mod streams;
pub mod tap;
pub mod typemap;
pub mod worker;

pub use tap::Tap;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::catalog::{
        Catalog, CatalogEntry, CatalogEntryBuilder, MetadataMapping, ReplicationMethod,
        ReplicationPolicy, Schema,
    };
    pub use crate::config::{ConfigError, ConnectionConfig, TapConfig};
    pub use crate::connector::Connector;
    pub use crate::discovery::{Discovery, DiscoveryError, DiscoveryResult, TableFilter};
    pub use crate::metadata::{
        ColumnDescriptor, ConnectionProvider, Inspector, KeyCandidate, MetadataResult,
        NativeType, ObjectInfo,
    };
    pub use crate::streams::Stream;
    pub use crate::tap::Tap;
    pub use crate::worker::WorkerError;
}
