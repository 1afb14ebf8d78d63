//! JSON wire shape for [`Point`].
//!
//! Points travel as flat camelCase objects. Decoding goes through
//! [`CityRecord::new`] and [`Point::new`] so malformed payloads fail loudly.

use serde::{Deserialize, Serialize};

use crate::{CityRecord, CityRecordError, Point};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct PointWire {
    id: String,
    city: String,
    country_name: String,
    lat: f64,
    lng: f64,
    mentions: u64,
    popularity_index: f64,
}

impl From<Point> for PointWire {
    fn from(point: Point) -> Self {
        let Point {
            record,
            popularity_index,
        } = point;
        Self {
            id: record.id,
            city: record.city,
            country_name: record.country_name,
            lat: record.lat,
            lng: record.lng,
            mentions: record.mentions,
            popularity_index,
        }
    }
}

impl TryFrom<PointWire> for Point {
    type Error = CityRecordError;

    fn try_from(wire: PointWire) -> Result<Self, Self::Error> {
        let record = CityRecord::new(
            wire.id,
            wire.city,
            wire.country_name,
            wire.lat,
            wire.lng,
            wire.mentions,
        )?;
        Self::new(record, wire.popularity_index)
    }
}
