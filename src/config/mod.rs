//! Configuration module for the tap.
//!
//! Handles the typed configuration surface, environment variable expansion,
//! and the validated connection target.

mod connection;
mod settings;

pub use connection::{ConnectionConfig, Driver, REDSHIFT_DRIVER_SCHEME};
pub use settings::{
    expand_env_vars, ConfigError, TapConfig, WorkerSettings, CONFIG_ENV_VAR, DEFAULT_PORT,
};
