//! Facade crate for the Spiky city popularity globe.
//!
//! This crate re-exports the core city and point types and exposes the HTTP
//! server and view layers behind feature flags.

#![forbid(unsafe_code)]

pub use spiky_core::{
    CityRecord, CityRecordError, CityStore, EmptyDatasetError, Point, PointsError, PointsService,
    StoreUnavailableError, normalise_popularity,
};

#[cfg(feature = "store-sqlite")]
pub use spiky_core::{SqliteCityStore, SqliteCityStoreError};

#[cfg(feature = "server")]
pub use spiky_server as server;

#[cfg(feature = "view")]
pub use spiky_view as view;
