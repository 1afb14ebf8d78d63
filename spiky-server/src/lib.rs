//! HTTP surface for the Spiky points service.
//!
//! [`router`] exposes `GET /api/points` and `GET /healthz`; [`serve`] runs a
//! router on a bound listener until a shutdown signal resolves.

#![forbid(unsafe_code)]

use std::{future::Future, io, net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use log::info;
use spiky_core::{CityStore, PointsService};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

mod handlers;

pub use handlers::status_for;

/// Path serving the normalised point set.
pub const POINTS_PATH: &str = "/api/points";

/// Liveness probe path.
pub const HEALTHZ_PATH: &str = "/healthz";

/// Errors raised while running the HTTP server.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The listener's local address could not be read.
    #[error("failed to read listener address")]
    LocalAddr(#[source] io::Error),
    /// The server stopped with an I/O failure.
    #[error("HTTP server failed")]
    Serve(#[source] io::Error),
}

/// Build the application router around `service`.
///
/// The store is shared between requests; each request to
/// [`POINTS_PATH`] re-reads it on a blocking worker thread.
#[must_use]
pub fn router<S>(service: PointsService<S>) -> Router
where
    S: CityStore + 'static,
{
    Router::new()
        .route(POINTS_PATH, get(handlers::get_points::<S>))
        .route(HEALTHZ_PATH, get(handlers::healthz))
        .with_state(Arc::new(service))
        .layer(TraceLayer::new_for_http())
}

/// Serve `router` on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish before this returns.
///
/// # Errors
///
/// Returns [`ServeError`] when the listener address cannot be read or the
/// server hits an I/O failure.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr: SocketAddr = listener.local_addr().map_err(ServeError::LocalAddr)?;
    info!("serving points on http://{addr}{POINTS_PATH}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServeError::Serve)?;
    info!("server on {addr} shut down");
    Ok(())
}
