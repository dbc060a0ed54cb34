//! tap-redshift CLI - Discover Redshift catalogs
//!
//! Usage:
//!   tap-redshift discover --config <config.json> [--catalog <catalog.json>]
//!   tap-redshift about
//!
//! Examples:
//!   tap-redshift discover --config config.json > catalog.json
//!   tap-redshift --log-level debug discover --config tap-redshift.toml

use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tap_redshift::catalog::Catalog;
use tap_redshift::config::{ConnectionConfig, TapConfig};
use tap_redshift::metadata::{
    ConnectionProvider, Inspector, MetadataResult, WorkerConnectionProvider,
};
use tap_redshift::worker::{WorkerClient, WorkerError};
use tap_redshift::Tap;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tap-redshift")]
#[command(about = "tap-redshift - Discover streams in an Amazon Redshift database")]
#[command(version)]
struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Log output format
    #[arg(long, global = true, default_value = "text")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover the catalog and print it to stdout
    Discover {
        /// Path to the config file (.json or .toml); falls back to the usual search path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Previously produced catalog to pass through instead of discovering
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Print the tap name and its configuration schema
    About,
}

#[derive(Clone, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level, &cli.log_format);

    match cli.command {
        Commands::Discover { config, catalog } => cmd_discover(config, catalog).await,
        Commands::About => cmd_about(),
    }
}

fn setup_logging(level: &str, format: &LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}

async fn cmd_discover(config: Option<PathBuf>, catalog: Option<PathBuf>) -> ExitCode {
    let settings = match config {
        Some(path) => TapConfig::from_file(&path),
        None => TapConfig::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Validate before spawning anything.
    if let Err(e) = settings.validate() {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    let input_catalog = match catalog.map(Catalog::load).transpose() {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let provider = match input_catalog {
        // A supplied catalog never touches the database, so no worker is needed.
        Some(_) => None,
        None => match WorkerClient::spawn_with_settings(&settings.worker).await {
            Ok(client) => Some(WorkerConnectionProvider::with_client(client)),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let tap = match provider {
        Some(provider) => Tap::new(settings, Arc::new(provider)),
        None => Tap::new(settings, Arc::new(OfflineProvider)),
    };
    let mut tap = match tap {
        Ok(t) => t,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(c) = input_catalog {
        tap = tap.with_input_catalog(c);
    }

    let catalog = match tap.catalog().await {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match catalog.to_json() {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_about() -> ExitCode {
    let about = serde_json::json!({
        "name": Tap::NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "settings": TapConfig::json_schema(),
    });
    match serde_json::to_string_pretty(&about) {
        Ok(s) => {
            println!("{}", s);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Provider used when a supplied catalog is passed through.
struct OfflineProvider;

#[async_trait]
impl ConnectionProvider for OfflineProvider {
    async fn create_connection(
        &self,
        _connection: &ConnectionConfig,
    ) -> MetadataResult<Arc<dyn Inspector>> {
        Err(WorkerError::ConnectionFailed(
            "no connection is opened when a catalog is supplied".to_string(),
        ))
    }
}
