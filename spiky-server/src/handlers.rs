//! Request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use spiky_core::{CityStore, PointsError, PointsService};

/// Status code reported for a failed points request.
#[must_use]
pub const fn status_for(error: &PointsError) -> StatusCode {
    match error {
        PointsError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        PointsError::EmptyDataset(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) async fn get_points<S>(State(service): State<Arc<PointsService<S>>>) -> Response
where
    S: CityStore + 'static,
{
    match tokio::task::spawn_blocking(move || service.get_points()).await {
        Ok(Ok(points)) => Json(points).into_response(),
        Ok(Err(err)) => {
            error!("points request failed: {err}");
            (status_for(&err), "points unavailable").into_response()
        }
        Err(err) => {
            error!("points task did not complete: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "points unavailable").into_response()
        }
    }
}

pub(crate) async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HEALTHZ_PATH, POINTS_PATH, router};
    use axum::{body::Body, http::Request};
    use rstest::rstest;
    use spiky_core::{
        CityRecord, EmptyDatasetError, StoreUnavailableError,
        test_support::{FailingStore, MemoryStore},
    };
    use tower::ServiceExt;

    async fn call(app: axum::Router, path: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::get(path).body(Body::empty()).expect("request"))
            .await
            .expect("router is infallible");
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, body.to_vec())
    }

    #[rstest]
    #[tokio::test]
    async fn points_are_served_as_json() {
        let store = MemoryStore::with_cities(vec![
            CityRecord::new("par", "Paris", "France", 48.86, 2.35, 8).expect("valid"),
            CityRecord::new("lyo", "Lyon", "France", 45.76, 4.84, 2).expect("valid"),
        ]);

        let (status, body) = call(router(PointsService::new(store)), POINTS_PATH).await;

        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value[0]["countryName"], "France");
        assert_eq!(value[0]["popularityIndex"], 1.0);
        assert_eq!(value[1]["popularityIndex"], 0.25);
    }

    #[rstest]
    #[tokio::test]
    async fn unavailable_store_maps_to_503() {
        let (status, body) =
            call(router(PointsService::new(FailingStore)), POINTS_PATH).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, b"points unavailable");
    }

    #[rstest]
    #[tokio::test]
    async fn empty_store_maps_to_500() {
        let (status, _) =
            call(router(PointsService::new(MemoryStore::default())), POINTS_PATH).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[rstest]
    #[tokio::test]
    async fn healthz_reports_ok() {
        let (status, body) =
            call(router(PointsService::new(MemoryStore::default())), HEALTHZ_PATH).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }

    #[rstest]
    #[case(
        PointsError::StoreUnavailable(StoreUnavailableError::Backend(Box::new(
            std::io::Error::other("down")
        ))),
        StatusCode::SERVICE_UNAVAILABLE
    )]
    #[case(PointsError::EmptyDataset(EmptyDatasetError), StatusCode::INTERNAL_SERVER_ERROR)]
    fn errors_map_to_non_success_statuses(#[case] error: PointsError, #[case] expected: StatusCode) {
        assert_eq!(status_for(&error), expected);
    }
}
