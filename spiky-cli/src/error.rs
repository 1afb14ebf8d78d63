//! Error types emitted by the Spiky CLI.

use std::{net::SocketAddr, sync::Arc};

use camino::Utf8PathBuf;
use spiky_core::SqliteCityStoreError;
use spiky_server::ServeError;
use thiserror::Error;

/// Errors emitted by the Spiky CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The database path does not exist.
    #[error("{field} path {path:?} does not exist (set --{field} or {env})")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Environment variable naming the path.
        env: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// The database path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// The database path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Opening the city store failed.
    #[error(transparent)]
    OpenStore(#[from] SqliteCityStoreError),
    /// Closing the city store at shutdown failed.
    #[error("failed to close city store: {0}")]
    CloseStore(#[source] SqliteCityStoreError),
    /// The Tokio runtime could not be started.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Binding the listen address failed.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested listen address.
        addr: SocketAddr,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The HTTP server stopped with an error.
    #[error(transparent)]
    Serve(#[from] ServeError),
}
