//! Tap configuration.
//!
//! Supports a JSON config file (the Singer convention) or a TOML file, with
//! environment variable expansion for secrets.
//!
//! Example configuration:
//! ```toml
//! host = "examplecluster.abc123xyz789.us-west-1.redshift.amazonaws.com"
//! port = 5439
//! username = "awsuser"
//! password = "${REDSHIFT_PASSWORD}"
//! database = "dev"
//! tables = ["sales.orders", "sales.customers"]
//!
//! [replication]
//! use_computed_method = true
//! additional_methods = []
//!
//! [worker]
//! path = "./tap-redshift-worker"
//! timeout_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::connection::ConnectionConfig;
use crate::catalog::ReplicationPolicy;
use crate::discovery::TableFilter;

/// Default Redshift port.
pub const DEFAULT_PORT: u16 = 5439;

/// Environment variable pointing at a config file.
pub const CONFIG_ENV_VAR: &str = "TAP_REDSHIFT_CONFIG";

/// Error type for configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to parse JSON config: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error(
        "Need either sqlalchemy_url or host, port, database, username and password \
         (missing: {})",
        .0.join(", ")
    )]
    MissingConnection(Vec<&'static str>),

    #[error("Invalid table filter entry '{0}': expected 'schema.table'")]
    InvalidTableFilter(String),

    #[error("Unsupported driver: {0}. Supported: redshift, postgres")]
    UnsupportedDriver(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TapConfig {
    /// Cluster hostname. Ignored when `sqlalchemy_url` is set.
    pub host: Option<String>,

    /// Cluster port. Ignored when `sqlalchemy_url` is set.
    pub port: u16,

    /// User name. Ignored when `sqlalchemy_url` is set.
    #[serde(alias = "user")]
    pub username: Option<String>,

    /// Password (supports ${ENV_VAR} expansion).
    pub password: Option<String>,

    /// Database name. Ignored when `sqlalchemy_url` is set.
    pub database: Option<String>,

    /// Full connection URL (supports ${ENV_VAR} expansion).
    /// Overrides all discrete connection fields.
    pub sqlalchemy_url: Option<String>,

    /// Allow-list of `schema.table` entries restricting discovery.
    pub tables: Vec<String>,

    /// Replication method policy applied to discovered streams.
    pub replication: ReplicationPolicy,

    /// Worker process settings.
    pub worker: WorkerSettings,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: DEFAULT_PORT,
            username: None,
            password: None,
            database: None,
            sqlalchemy_url: None,
            tables: Vec::new(),
            replication: ReplicationPolicy::default(),
            worker: WorkerSettings::default(),
        }
    }
}

/// Worker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerSettings {
    /// Path to the worker binary.
    pub path: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            path: None,
            timeout_secs: 30,
        }
    }
}

impl TapConfig {
    /// Load configuration from a file.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&content)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// Parse configuration from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load configuration from the default locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `TAP_REDSHIFT_CONFIG`
    /// 2. `./tap-redshift.toml`
    /// 3. `~/.config/tap-redshift/config.toml`
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("tap-redshift.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tap-redshift").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(TapConfig::default())
    }

    /// Validate the configuration and resolve the connection target.
    ///
    /// Runs once at startup, before any I/O against the database.
    pub fn validate(&self) -> Result<ConnectionConfig, ConfigError> {
        self.table_filter()?;

        if let Some(method) = self
            .replication
            .additional_methods
            .iter()
            .find(|m| !m.is_known())
        {
            return Err(ConfigError::InvalidConfig(format!(
                "unknown replication method '{}'",
                method
            )));
        }

        if let Some(url) = non_empty(&self.sqlalchemy_url) {
            return ConnectionConfig::from_url(expand_env_vars(url)?);
        }

        let mut missing = Vec::new();
        if non_empty(&self.host).is_none() {
            missing.push("host");
        }
        if self.port == 0 {
            missing.push("port");
        }
        if non_empty(&self.database).is_none() {
            missing.push("database");
        }
        if non_empty(&self.username).is_none() {
            missing.push("username");
        }
        if self.password.is_none() {
            missing.push("password");
        }

        match (&self.host, &self.database, &self.username, &self.password) {
            (Some(host), Some(database), Some(username), Some(password)) if missing.is_empty() => {
                Ok(ConnectionConfig::Discrete {
                    host: host.clone(),
                    port: self.port,
                    database: database.clone(),
                    username: username.clone(),
                    password: expand_env_vars(password)?,
                })
            }
            _ => Err(ConfigError::MissingConnection(missing)),
        }
    }

    /// Build the table allow-list, if one is configured.
    pub fn table_filter(&self) -> Result<Option<TableFilter>, ConfigError> {
        if self.tables.is_empty() {
            return Ok(None);
        }
        TableFilter::parse(&self.tables).map(Some)
    }

    /// JSON schema describing the recognized configuration keys.
    pub fn json_schema() -> serde_json::Value {
        let ignored = "Note if sqlalchemy_url is set this will be ignored.";
        serde_json::json!({
            "type": "object",
            "properties": {
                "host": {
                    "type": ["string"],
                    "description": format!("Hostname for the Redshift cluster. {ignored}"),
                },
                "port": {
                    "type": ["integer"],
                    "default": DEFAULT_PORT,
                    "description": format!("The port on which Redshift is awaiting connection. {ignored}"),
                },
                "username": {
                    "type": ["string"],
                    "description": format!("User name used to authenticate. {ignored}"),
                },
                "password": {
                    "type": ["string"],
                    "secret": true,
                    "description": format!("Password used to authenticate. {ignored}"),
                },
                "database": {
                    "type": ["string"],
                    "description": format!("Database name. {ignored}"),
                },
                "sqlalchemy_url": {
                    "type": ["string"],
                    "secret": true,
                    "description": "Connection URL. Overrides host, port, username, password \
                                    and database. Special characters in the password must be \
                                    percent-escaped.",
                },
                "tables": {
                    "type": ["array"],
                    "items": {"type": ["string"]},
                    "description": "Restrict discovery to these 'schema.table' entries.",
                },
            },
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Expand environment variables in a string.
///
/// Only the braced `${VAR}` form is expanded. A bare `$` is kept as-is, so
/// passwords such as `pa$$word` pass through unchanged, and so does an
/// unterminated `${`.
pub fn expand_env_vars(s: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + 2 + len];
        let value =
            env::var(var_name).map_err(|_| ConfigError::MissingEnvVar(var_name.to_string()))?;
        result.push_str(&value);
        rest = &rest[start + 3 + len..];
    }
    result.push_str(rest);

    Ok(result)
}
