//! Metadata provider module.
//!
//! Abstractions for introspecting a live database: the data model produced by
//! introspection and the collaborator traits discovery calls into.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │ ConnectionProvider::create_connection(&ConnectionConfig)        │
//! │                              │                                  │
//! │                              ▼                                  │
//! │ Inspector                                                       │
//! │  - list_schemas()            - get_primary_key()                │
//! │  - list_objects()            - get_indexes()                    │
//! │  - get_columns()             - get_unique_indexes()  (derived)  │
//! │                              - introspect_object()   (derived)  │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 WorkerClient (NDJSON over stdin/stdout)         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod provider;
mod types;
mod worker_provider;

pub use provider::{ConnectionProvider, Inspector, MetadataResult};
pub use types::*;
pub use worker_provider::{WorkerConnectionProvider, WorkerInspector};
