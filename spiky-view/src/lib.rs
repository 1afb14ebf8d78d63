//! Client tier of the Spiky globe.
//!
//! [`PointsClient`] fetches points from a server, [`ViewController`] decides
//! what the page shows, and the [`globe`] and [`ranking`] modules turn loaded
//! points into renderer markers and the "Top Cities" table.
//! [`ViewSession`] ties a controller to a points source on a single task.

#![forbid(unsafe_code)]

pub mod client;
pub mod controller;
pub mod globe;
pub mod ramp;
pub mod ranking;
pub mod session;

pub use client::{ClientBuildError, FetchFailedError, PointsClient, PointsClientConfig, PointsSource};
pub use controller::{
    Coords, FailurePrompt, FetchTicket, LoadPhase, OverlayContent, PointOfView, ViewController,
    ViewEffect, ViewEvent, ViewState,
};
pub use globe::{GlobeClick, GlobeMarker, GlobeScene, encode_points};
pub use ramp::{Rgb, warm_ramp};
pub use ranking::{RankingRow, RankingTable, rank_points};
pub use session::ViewSession;
