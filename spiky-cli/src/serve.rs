//! `serve` command: open the city database and run the HTTP server.

use std::{
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use spiky_core::{PointsService, SqliteCityStore};
use tokio::net::TcpListener;

use crate::{ARG_DATABASE, ARG_LISTEN, CliError, ENV_DATABASE};

/// Database file used when none is configured.
pub(crate) const DEFAULT_DATABASE: &str = "frontend.db";

/// Listen address used when none is configured.
pub(crate) const DEFAULT_LISTEN: SocketAddr = SocketAddr::new(
    std::net::IpAddr::V4(Ipv4Addr::LOCALHOST),
    3000,
);

/// CLI arguments for the `serve` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "serve",
    long_about = "Serve normalised city popularity points over HTTP. The \
                 database path and listen address can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Serve city popularity points"
)]
#[ortho_config(prefix = "SPIKY")]
pub(crate) struct ServeArgs {
    /// Path to the SQLite database holding the `cities` table.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Socket address to listen on (e.g. "127.0.0.1:3000").
    #[arg(long = ARG_LISTEN, value_name = "addr")]
    #[serde(default)]
    pub(crate) listen: Option<SocketAddr>,
}

impl ServeArgs {
    pub(crate) fn into_config(self) -> Result<ServeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        Ok(ServeConfig::from(merged))
    }
}

/// Resolved `serve` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServeConfig {
    /// Path to the SQLite city database.
    pub(crate) database: Utf8PathBuf,
    /// Address the HTTP server binds to.
    pub(crate) listen: SocketAddr,
}

impl ServeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.database, ARG_DATABASE, ENV_DATABASE)
    }

    fn require_existing(
        path: &Utf8Path,
        field: &'static str,
        env: &'static str,
    ) -> Result<(), CliError> {
        match path.metadata() {
            Ok(metadata) if metadata.is_file() => Ok(()),
            Ok(_) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    env,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl From<ServeArgs> for ServeConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            database: args
                .database
                .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE)),
            listen: args.listen.unwrap_or(DEFAULT_LISTEN),
        }
    }
}

pub(crate) fn resolve_serve_config(args: ServeArgs) -> Result<ServeConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(super) fn run_serve(args: ServeArgs) -> Result<(), CliError> {
    let config = resolve_serve_config(args)?;
    let runtime = tokio::runtime::Runtime::new().map_err(CliError::Runtime)?;
    runtime.block_on(serve_points(config))
}

async fn serve_points(config: ServeConfig) -> Result<(), CliError> {
    let store = Arc::new(SqliteCityStore::open(config.database.as_std_path())?);
    info!("reading cities from {}", config.database);
    let listener = TcpListener::bind(config.listen)
        .await
        .map_err(|source| CliError::Bind {
            addr: config.listen,
            source,
        })?;
    let app = spiky_server::router(PointsService::new(Arc::clone(&store)));
    spiky_server::serve(listener, app, shutdown_signal()).await?;

    match Arc::try_unwrap(store) {
        Ok(store) => store.close().map_err(CliError::CloseStore),
        Err(_) => {
            warn!("city store still shared at shutdown; leaving it to drop");
            Ok(())
        }
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            warn!("failed to listen for ctrl-c, serving until killed: {err}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ServeConfig, CliError> {
    let merged = ServeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    Ok(ServeConfig::from(merged))
}
