//! Read-side service that turns stored cities into normalised points.

use log::{debug, error};
use thiserror::Error;

use crate::{
    CityStore, Point, StoreUnavailableError,
    popularity::{EmptyDatasetError, normalise_popularity},
};

/// Failures produced while answering a points request.
#[derive(Debug, Error)]
pub enum PointsError {
    /// The city store could not be read.
    #[error("city store is unavailable")]
    StoreUnavailable(#[from] StoreUnavailableError),
    /// The store held no cities, so nothing could be normalised.
    #[error("city store holds no cities")]
    EmptyDataset(#[from] EmptyDatasetError),
}

/// Produces the full list of popularity-annotated points on every call.
///
/// Nothing is cached; each call re-reads the store.
#[derive(Debug, Clone)]
pub struct PointsService<S> {
    store: S,
}

impl<S: CityStore> PointsService<S> {
    /// Wrap a city store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consume the service and return its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Read every city and attach its popularity index.
    ///
    /// Points come back in store order; the most mentioned cities carry an
    /// index of exactly `1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`PointsError::StoreUnavailable`] when the store fails and
    /// [`PointsError::EmptyDataset`] when it holds no cities.
    pub fn get_points(&self) -> Result<Vec<Point>, PointsError> {
        let records = self.store.list_cities().inspect_err(|err| {
            error!("failed to list cities: {err}");
        })?;
        let points = normalise_popularity(records).inspect_err(|_| {
            error!("city store returned no cities");
        })?;
        debug!("normalised popularity for {} cities", points.len());
        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CityRecord;
    use crate::test_support::{FailingStore, MemoryStore};
    use rstest::rstest;

    fn record(id: &str, mentions: u64) -> CityRecord {
        CityRecord::new(id, id.to_uppercase(), "Country", 1.0, 2.0, mentions).expect("valid record")
    }

    #[rstest]
    fn returns_every_city_with_an_index() {
        let service = PointsService::new(MemoryStore::with_cities(vec![
            record("a", 10),
            record("b", 5),
            record("c", 0),
        ]));

        let points = service.get_points().expect("points");

        let summary: Vec<_> = points
            .iter()
            .map(|point| (point.record.id.as_str(), point.popularity_index))
            .collect();
        assert_eq!(summary, vec![("a", 1.0), ("b", 0.5), ("c", 0.0)]);
    }

    #[rstest]
    fn empty_store_is_an_error() {
        let service = PointsService::new(MemoryStore::default());
        assert!(matches!(
            service.get_points(),
            Err(PointsError::EmptyDataset(EmptyDatasetError))
        ));
    }

    #[rstest]
    fn store_failure_propagates() {
        let service = PointsService::new(FailingStore::default());
        assert!(matches!(
            service.get_points(),
            Err(PointsError::StoreUnavailable(_))
        ));
    }

    #[rstest]
    fn store_is_reread_on_every_call() {
        let service = PointsService::new(MemoryStore::with_cities(vec![record("a", 1)]));

        let first = service.get_points().expect("first call");
        service.store().replace(vec![record("a", 1), record("b", 4)]);
        let second = service.get_points().expect("second call");

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(second[1].popularity_index, 1.0);
    }
}
