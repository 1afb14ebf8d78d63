//! Core domain types for the Spiky city popularity globe.
//!
//! City records are read from a [`CityStore`], normalised into [`Point`]s by
//! [`normalise_popularity`] and served by [`PointsService`]. Constructors
//! return `Result` so invalid rows are rejected at the edge rather than
//! leaking into the visualisation.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use thiserror::Error;

pub mod popularity;
pub mod service;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(feature = "serde")]
mod wire;

pub use popularity::{EmptyDatasetError, normalise_popularity};
pub use service::{PointsError, PointsService};
pub use store::{CityStore, StoreUnavailableError};

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteCityStore, SqliteCityStoreError};

/// A geolocated city together with its raw mention count.
///
/// Coordinates are WGS84 degrees.
///
/// # Examples
///
/// ```
/// use spiky_core::CityRecord;
///
/// # fn main() -> Result<(), spiky_core::CityRecordError> {
/// let city = CityRecord::new("nyc", "New York", "United States", 40.7, -74.0, 12)?;
/// assert_eq!(city.mentions, 12);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CityRecord {
    /// Stable, unique identifier.
    pub id: String,
    /// Display name of the city.
    pub city: String,
    /// Display name of the country.
    pub country_name: String,
    /// Latitude in `[-90, 90]`.
    pub lat: f64,
    /// Longitude in `[-180, 180]`.
    pub lng: f64,
    /// Raw mention count.
    pub mentions: u64,
}

/// Errors returned by [`CityRecord::new`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CityRecordError {
    /// The identifier was empty.
    #[error("city record must have a non-empty id")]
    EmptyId,
    /// Latitude was non-finite or outside `[-90, 90]`.
    #[error("latitude {lat} is outside [-90, 90]")]
    LatitudeOutOfRange {
        /// Offending latitude.
        lat: f64,
    },
    /// Longitude was non-finite or outside `[-180, 180]`.
    #[error("longitude {lng} is outside [-180, 180]")]
    LongitudeOutOfRange {
        /// Offending longitude.
        lng: f64,
    },
    /// A stored mention count was negative.
    #[error("mention count {raw} is negative")]
    NegativeMentions {
        /// Raw value read from the source.
        raw: i64,
    },
    /// A popularity index was non-finite or outside `[0, 1]`.
    #[error("popularity index {value} is outside [0, 1]")]
    PopularityOutOfRange {
        /// Offending index.
        value: f64,
    },
}

impl CityRecord {
    /// Validates and constructs a [`CityRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`CityRecordError`] when the id is empty or a coordinate is
    /// out of range.
    pub fn new(
        id: impl Into<String>,
        city: impl Into<String>,
        country_name: impl Into<String>,
        lat: f64,
        lng: f64,
        mentions: u64,
    ) -> Result<Self, CityRecordError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CityRecordError::EmptyId);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CityRecordError::LatitudeOutOfRange { lat });
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CityRecordError::LongitudeOutOfRange { lng });
        }
        Ok(Self {
            id,
            city: city.into(),
            country_name: country_name.into(),
            lat,
            lng,
            mentions,
        })
    }

    /// Label shown next to the city, `"{city}, {country}"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.country_name)
    }
}

/// A city record augmented with a normalised popularity score.
///
/// On the wire a point is a flat camelCase object:
/// `id`, `city`, `countryName`, `lat`, `lng`, `mentions`, `popularityIndex`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "wire::PointWire", try_from = "wire::PointWire")
)]
pub struct Point {
    /// The underlying city record.
    pub record: CityRecord,
    /// Mentions divided by the maximum mentions of the loaded set.
    pub popularity_index: f64,
}

impl Point {
    /// Attach a popularity index to a record.
    ///
    /// # Errors
    ///
    /// Returns [`CityRecordError::PopularityOutOfRange`] when the index is
    /// non-finite or outside `[0, 1]`.
    pub fn new(record: CityRecord, popularity_index: f64) -> Result<Self, CityRecordError> {
        if !(0.0..=1.0).contains(&popularity_index) {
            return Err(CityRecordError::PopularityOutOfRange {
                value: popularity_index,
            });
        }
        Ok(Self {
            record,
            popularity_index,
        })
    }
}
