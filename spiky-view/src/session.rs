//! Single-task driver tying a [`ViewController`] to a [`PointsSource`].

use std::collections::VecDeque;

use crate::{
    client::PointsSource,
    controller::{ViewController, ViewEffect, ViewEvent, ViewState},
    globe::GlobeMarker,
};

/// Runs the view state machine, performing fetches on the caller's task.
///
/// Every method returns the effects the controller emitted, in order, so the
/// host can render prompts and camera moves. `Fetch` effects are carried out
/// before the method returns.
#[derive(Debug)]
pub struct ViewSession<S> {
    controller: ViewController,
    source: S,
}

impl<S: PointsSource> ViewSession<S> {
    /// Session over `source` with a fresh controller.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            controller: ViewController::new(),
            source,
        }
    }

    /// The underlying controller.
    #[must_use]
    pub const fn controller(&self) -> &ViewController {
        &self.controller
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        self.controller.state()
    }

    /// Mount the view and perform the initial fetch.
    pub async fn mount(&mut self) -> Vec<ViewEffect> {
        self.send(ViewEvent::Mounted).await
    }

    /// Accept the failure prompt and fetch again.
    pub async fn accept_retry(&mut self) -> Vec<ViewEffect> {
        self.send(ViewEvent::RetryAccepted).await
    }

    /// Dismiss the failure prompt.
    pub fn decline_retry(&mut self) -> Vec<ViewEffect> {
        self.controller.handle(ViewEvent::RetryDeclined)
    }

    /// Report a click on `marker`.
    pub fn click(&mut self, marker: &GlobeMarker) -> Vec<ViewEffect> {
        self.controller.handle(ViewEvent::PointClicked(marker.click()))
    }

    /// Show the ranking overlay.
    pub fn open_overlay(&mut self) -> Vec<ViewEffect> {
        self.controller.handle(ViewEvent::OverlayOpened)
    }

    /// Hide the ranking overlay.
    pub fn close_overlay(&mut self) -> Vec<ViewEffect> {
        self.controller.handle(ViewEvent::OverlayClosed)
    }

    /// Feed `event` and run any fetches it triggers to completion.
    pub async fn send(&mut self, event: ViewEvent) -> Vec<ViewEffect> {
        let mut pending = VecDeque::from([event]);
        let mut emitted = Vec::new();
        while let Some(next) = pending.pop_front() {
            for effect in self.controller.handle(next) {
                if let ViewEffect::Fetch(ticket) = effect {
                    let result = self.source.fetch_points().await;
                    pending.push_back(ViewEvent::FetchCompleted { ticket, result });
                }
                emitted.push(effect);
            }
        }
        emitted
    }
}
