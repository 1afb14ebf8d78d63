//! View state machine for the globe page.
//!
//! [`ViewController::handle`] consumes one [`ViewEvent`] at a time and returns
//! the [`ViewEffect`]s the host must carry out. Fetches are identified by a
//! [`FetchTicket`]; a completion whose ticket does not match the current retry
//! token is stale and dropped, so an abandoned request can never overwrite
//! newer data.
//!
//! | Event | Guard | Outcome |
//! | --- | --- | --- |
//! | `Mounted` | `Idle` | `Loading`, fetch |
//! | `FetchCompleted` | current ticket, `Loading` | `Loaded`, or `Failed` with prompt |
//! | `RetryAccepted` | `Failed`, prompt open | prompt closed, token bumped, fetch |
//! | `RetryDeclined` | prompt open | prompt closed, stays `Failed` |
//! | `PointClicked` | `Loaded` | selection stored, camera moved |
//! | `OverlayOpened` / `OverlayClosed` | any | overlay shown or hidden |

use std::time::Duration;

use log::{debug, warn};
use spiky_core::Point;

use crate::{
    client::FetchFailedError,
    globe::{GlobeClick, GlobeMarker, encode_points},
    ranking::{RankingTable, rank_points},
};

/// Degrees subtracted from the clicked latitude and longitude when
/// recentring, so the selected spike sits off-centre.
pub const RECENTER_OFFSET_DEGREES: f64 = 7.0;

/// Duration of the recentring camera animation.
pub const RECENTER_TRANSITION: Duration = Duration::from_millis(1000);

/// Loading lifecycle of the point data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Points are available.
    Loaded,
    /// The last fetch failed.
    Failed,
}

/// A latitude and longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// Identifies one fetch so its completion can be matched to the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    token: u64,
}

impl FetchTicket {
    /// Ticket carrying `token`.
    #[must_use]
    pub const fn new(token: u64) -> Self {
        Self { token }
    }

    /// Retry token the fetch was issued under.
    #[must_use]
    pub const fn token(self) -> u64 {
        self.token
    }
}

/// Camera move requested from the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOfView {
    /// Target latitude.
    pub lat: f64,
    /// Target longitude.
    pub lng: f64,
    /// Animation length.
    pub transition: Duration,
}

/// Modal shown when a fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailurePrompt {
    /// Heading.
    pub title: &'static str,
    /// Question put to the user.
    pub body: &'static str,
    /// Label of the action that keeps the failure.
    pub decline: &'static str,
    /// Label of the action that retries.
    pub accept: &'static str,
}

impl FailurePrompt {
    /// The retrieval failure prompt.
    pub const RETRIEVAL: Self = Self {
        title: "Unable to retrieve data.",
        body: "Try again?",
        decline: "No",
        accept: "Yes",
    };
}

/// Content of the side overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayContent {
    /// Overlay hidden.
    #[default]
    None,
    /// The "Top Cities" ranking.
    TopCities,
}

/// Observable state of the view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    /// Loading lifecycle.
    pub phase: LoadPhase,
    /// Last successfully loaded points, if any.
    pub points: Option<Vec<Point>>,
    /// Whether the overlay is visible.
    pub overlay_visible: bool,
    /// What the overlay shows.
    pub overlay_content: OverlayContent,
    /// Coordinates of the last clicked point.
    pub selected_coords: Option<Coords>,
    /// Whether the failure prompt is on screen.
    pub failure_prompt_open: bool,
    /// Token of the fetch whose completion is currently accepted.
    pub retry_token: u64,
}

/// Inputs to the view state machine.
#[derive(Debug)]
pub enum ViewEvent {
    /// The page became visible.
    Mounted,
    /// A fetch finished.
    FetchCompleted {
        /// Ticket the fetch was issued with.
        ticket: FetchTicket,
        /// Fetched points or the failure.
        result: Result<Vec<Point>, FetchFailedError>,
    },
    /// The user chose to retry.
    RetryAccepted,
    /// The user dismissed the failure prompt.
    RetryDeclined,
    /// A marker on the globe was clicked.
    PointClicked(GlobeClick),
    /// The overlay was opened.
    OverlayOpened,
    /// The overlay was closed.
    OverlayClosed,
}

/// Side effects the host must perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEffect {
    /// Start a fetch and report it back with this ticket.
    Fetch(FetchTicket),
    /// Display the failure prompt.
    ShowFailurePrompt(FailurePrompt),
    /// Remove the failure prompt.
    CloseFailurePrompt,
    /// Move the camera.
    PointOfView(PointOfView),
}

/// Drives [`ViewState`] through its transitions.
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    /// Controller in the `Idle` phase with no data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        &self.state
    }

    /// Ticket for the fetch the controller currently expects.
    #[must_use]
    pub const fn current_ticket(&self) -> FetchTicket {
        FetchTicket::new(self.state.retry_token)
    }

    /// Ranking derived from the loaded points; empty when none are loaded.
    #[must_use]
    pub fn ranking(&self) -> RankingTable {
        rank_points(self.state.points.as_deref())
    }

    /// Markers derived from the loaded points.
    #[must_use]
    pub fn globe_markers(&self) -> Vec<GlobeMarker> {
        encode_points(self.state.points.as_deref())
    }

    /// Apply `event` and return the effects to perform, in order.
    pub fn handle(&mut self, event: ViewEvent) -> Vec<ViewEffect> {
        match event {
            ViewEvent::Mounted => self.on_mounted(),
            ViewEvent::FetchCompleted { ticket, result } => self.on_fetch_completed(ticket, result),
            ViewEvent::RetryAccepted => self.on_retry_accepted(),
            ViewEvent::RetryDeclined => self.on_retry_declined(),
            ViewEvent::PointClicked(click) => self.on_point_clicked(click),
            ViewEvent::OverlayOpened => {
                self.state.overlay_visible = true;
                self.state.overlay_content = OverlayContent::TopCities;
                Vec::new()
            }
            ViewEvent::OverlayClosed => {
                self.state.overlay_visible = false;
                self.state.overlay_content = OverlayContent::None;
                Vec::new()
            }
        }
    }

    fn on_mounted(&mut self) -> Vec<ViewEffect> {
        if self.state.phase != LoadPhase::Idle {
            debug!("ignoring mount in phase {:?}", self.state.phase);
            return Vec::new();
        }
        self.state.phase = LoadPhase::Loading;
        vec![ViewEffect::Fetch(self.current_ticket())]
    }

    fn on_fetch_completed(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Point>, FetchFailedError>,
    ) -> Vec<ViewEffect> {
        if ticket != self.current_ticket() {
            warn!(
                "dropping stale fetch completion (token {}, current {})",
                ticket.token(),
                self.state.retry_token
            );
            return Vec::new();
        }
        if self.state.phase != LoadPhase::Loading {
            warn!(
                "dropping fetch completion received in phase {:?}",
                self.state.phase
            );
            return Vec::new();
        }
        match result {
            Ok(points) => {
                debug!("loaded {} points", points.len());
                self.state.points = Some(points);
                self.state.phase = LoadPhase::Loaded;
                Vec::new()
            }
            Err(err) => {
                warn!("fetching points failed: {err}");
                self.state.phase = LoadPhase::Failed;
                self.state.failure_prompt_open = true;
                vec![ViewEffect::ShowFailurePrompt(FailurePrompt::RETRIEVAL)]
            }
        }
    }

    fn on_retry_accepted(&mut self) -> Vec<ViewEffect> {
        if self.state.phase != LoadPhase::Failed || !self.state.failure_prompt_open {
            debug!("ignoring retry outside an open failure prompt");
            return Vec::new();
        }
        self.state.failure_prompt_open = false;
        self.state.retry_token = self.state.retry_token.wrapping_add(1);
        self.state.phase = LoadPhase::Loading;
        vec![
            ViewEffect::CloseFailurePrompt,
            ViewEffect::Fetch(self.current_ticket()),
        ]
    }

    fn on_retry_declined(&mut self) -> Vec<ViewEffect> {
        if !self.state.failure_prompt_open {
            debug!("ignoring decline without an open failure prompt");
            return Vec::new();
        }
        self.state.failure_prompt_open = false;
        vec![ViewEffect::CloseFailurePrompt]
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "recentring offsets the clicked coordinates"
    )]
    fn on_point_clicked(&mut self, click: GlobeClick) -> Vec<ViewEffect> {
        if self.state.phase != LoadPhase::Loaded {
            debug!("ignoring click in phase {:?}", self.state.phase);
            return Vec::new();
        }
        self.state.selected_coords = Some(Coords {
            lat: click.lat,
            lng: click.lng,
        });
        vec![ViewEffect::PointOfView(PointOfView {
            lat: click.lat - RECENTER_OFFSET_DEGREES,
            lng: click.lng - RECENTER_OFFSET_DEGREES,
            transition: RECENTER_TRANSITION,
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use spiky_core::CityRecord;

    fn points() -> Vec<Point> {
        vec![
            Point::new(
                CityRecord::new("nyc", "New York", "United States", 40.0, -74.0, 10)
                    .expect("valid"),
                1.0,
            )
            .expect("valid"),
        ]
    }

    fn failure() -> FetchFailedError {
        FetchFailedError::Status {
            url: "http://127.0.0.1:3000/api/points".to_owned(),
            status: 503,
        }
    }

    fn complete(
        controller: &mut ViewController,
        token: u64,
        result: Result<Vec<Point>, FetchFailedError>,
    ) -> Vec<ViewEffect> {
        controller.handle(ViewEvent::FetchCompleted {
            ticket: FetchTicket::new(token),
            result,
        })
    }

    #[fixture]
    fn loading() -> ViewController {
        let mut controller = ViewController::new();
        controller.handle(ViewEvent::Mounted);
        controller
    }

    #[fixture]
    fn failed(mut loading: ViewController) -> ViewController {
        complete(&mut loading, 0, Err(failure()));
        loading
    }

    #[fixture]
    fn loaded(mut loading: ViewController) -> ViewController {
        complete(&mut loading, 0, Ok(points()));
        loading
    }

    #[rstest]
    fn mount_starts_the_first_fetch() {
        let mut controller = ViewController::new();

        let effects = controller.handle(ViewEvent::Mounted);

        assert_eq!(effects, vec![ViewEffect::Fetch(FetchTicket::new(0))]);
        assert_eq!(controller.state().phase, LoadPhase::Loading);
    }

    #[rstest]
    fn second_mount_is_ignored(mut loading: ViewController) {
        assert!(loading.handle(ViewEvent::Mounted).is_empty());
    }

    #[rstest]
    fn success_loads_points(loaded: ViewController) {
        assert_eq!(loaded.state().phase, LoadPhase::Loaded);
        assert_eq!(loaded.state().points.as_deref(), Some(points().as_slice()));
        assert_eq!(loaded.globe_markers().len(), 1);
    }

    #[rstest]
    fn failure_opens_the_prompt(mut loading: ViewController) {
        let effects = complete(&mut loading, 0, Err(failure()));

        assert_eq!(
            effects,
            vec![ViewEffect::ShowFailurePrompt(FailurePrompt::RETRIEVAL)]
        );
        assert_eq!(loading.state().phase, LoadPhase::Failed);
        assert!(loading.state().failure_prompt_open);
    }

    #[rstest]
    fn declining_keeps_the_failure(mut failed: ViewController) {
        let effects = failed.handle(ViewEvent::RetryDeclined);

        assert_eq!(effects, vec![ViewEffect::CloseFailurePrompt]);
        assert_eq!(failed.state().phase, LoadPhase::Failed);
        assert!(!failed.state().failure_prompt_open);
        assert_eq!(failed.state().points, None);
        assert!(failed.ranking().is_empty());
    }

    #[rstest]
    fn accepting_closes_the_prompt_before_refetching(mut failed: ViewController) {
        let effects = failed.handle(ViewEvent::RetryAccepted);

        assert_eq!(
            effects,
            vec![
                ViewEffect::CloseFailurePrompt,
                ViewEffect::Fetch(FetchTicket::new(1)),
            ]
        );
        assert_eq!(failed.state().phase, LoadPhase::Loading);
        assert_eq!(failed.state().retry_token, 1);

        complete(&mut failed, 1, Ok(points()));
        assert_eq!(failed.state().phase, LoadPhase::Loaded);
    }

    #[rstest]
    fn retry_is_ignored_once_declined(mut failed: ViewController) {
        failed.handle(ViewEvent::RetryDeclined);
        assert!(failed.handle(ViewEvent::RetryAccepted).is_empty());
        assert_eq!(failed.state().retry_token, 0);
    }

    #[rstest]
    fn stale_completion_is_dropped(mut failed: ViewController) {
        failed.handle(ViewEvent::RetryAccepted);
        complete(&mut failed, 1, Ok(points()));

        let effects = complete(&mut failed, 0, Err(failure()));

        assert!(effects.is_empty());
        assert_eq!(failed.state().phase, LoadPhase::Loaded);
        assert!(failed.state().points.is_some());
    }

    #[rstest]
    fn stale_success_does_not_replace_newer_points(mut failed: ViewController) {
        failed.handle(ViewEvent::RetryAccepted);
        complete(&mut failed, 1, Ok(points()));
        let stale = vec![
            Point::new(
                CityRecord::new("lon", "London", "United Kingdom", 51.5, -0.1, 3)
                    .expect("valid"),
                1.0,
            )
            .expect("valid"),
        ];

        let effects = complete(&mut failed, 0, Ok(stale));

        assert!(effects.is_empty());
        assert_eq!(failed.state().phase, LoadPhase::Loaded);
        assert_eq!(failed.state().points.as_deref(), Some(points().as_slice()));
    }

    #[rstest]
    fn click_recentres_with_offset(mut loaded: ViewController) {
        let effects = loaded.handle(ViewEvent::PointClicked(GlobeClick {
            lat: 40.0,
            lng: -74.0,
            altitude: 0.8,
        }));

        assert_eq!(
            effects,
            vec![ViewEffect::PointOfView(PointOfView {
                lat: 33.0,
                lng: -81.0,
                transition: Duration::from_millis(1000),
            })]
        );
        assert_eq!(
            loaded.state().selected_coords,
            Some(Coords {
                lat: 40.0,
                lng: -74.0
            })
        );
    }

    #[rstest]
    fn click_before_load_is_ignored(mut loading: ViewController) {
        let effects = loading.handle(ViewEvent::PointClicked(GlobeClick {
            lat: 1.0,
            lng: 2.0,
            altitude: 0.0,
        }));
        assert!(effects.is_empty());
        assert_eq!(loading.state().selected_coords, None);
    }

    #[rstest]
    fn overlay_toggles_without_data() {
        let mut controller = ViewController::new();

        controller.handle(ViewEvent::OverlayOpened);
        assert!(controller.state().overlay_visible);
        assert_eq!(controller.state().overlay_content, OverlayContent::TopCities);
        assert!(controller.ranking().is_empty());

        controller.handle(ViewEvent::OverlayClosed);
        assert!(!controller.state().overlay_visible);
        assert_eq!(controller.state().overlay_content, OverlayContent::None);
    }
}
