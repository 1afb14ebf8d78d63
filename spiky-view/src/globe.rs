//! Encoding of points into globe markers.
//!
//! The renderer is opaque: it receives [`GlobeMarker`]s and reports clicks
//! back as [`GlobeClick`]s.

use spiky_core::Point;

/// Factor applied to the popularity index to obtain marker altitude.
pub const ALTITUDE_SCALE: f64 = 0.8;

/// Colour shared by every marker.
pub const POINT_COLOUR: &str = "#00ff9f";

/// Default globe surface texture.
pub const EARTH_NIGHT_IMAGE: &str = "//unpkg.com/three-globe/example/img/earth-night.jpg";

/// Default scene background texture.
pub const NIGHT_SKY_IMAGE: &str = "//unpkg.com/three-globe/example/img/night-sky.png";

/// One renderable spike on the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeMarker {
    /// Identifier of the source city.
    pub id: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Spike height, `popularity_index * ALTITUDE_SCALE`.
    pub altitude: f64,
    /// Marker colour.
    pub colour: &'static str,
    /// Hover label, `"{city}, {country}"`.
    pub label: String,
}

impl GlobeMarker {
    /// Click payload the renderer reports for this marker.
    #[must_use]
    pub const fn click(&self) -> GlobeClick {
        GlobeClick {
            lat: self.lat,
            lng: self.lng,
            altitude: self.altitude,
        }
    }
}

impl From<&Point> for GlobeMarker {
    #[expect(
        clippy::float_arithmetic,
        reason = "altitude is a scaled popularity index"
    )]
    fn from(point: &Point) -> Self {
        Self {
            id: point.record.id.clone(),
            lat: point.record.lat,
            lng: point.record.lng,
            altitude: point.popularity_index * ALTITUDE_SCALE,
            colour: POINT_COLOUR,
            label: point.record.label(),
        }
    }
}

/// Raw coordinates of a clicked marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobeClick {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Altitude of the clicked marker.
    pub altitude: f64,
}

/// Static scene imagery handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobeScene {
    /// Texture wrapped around the globe.
    pub globe_image_url: String,
    /// Background texture.
    pub background_image_url: String,
}

impl Default for GlobeScene {
    fn default() -> Self {
        Self {
            globe_image_url: EARTH_NIGHT_IMAGE.to_owned(),
            background_image_url: NIGHT_SKY_IMAGE.to_owned(),
        }
    }
}

/// Encode points as markers, preserving order. `None` yields no markers.
#[must_use]
pub fn encode_points(points: Option<&[Point]>) -> Vec<GlobeMarker> {
    points
        .unwrap_or_default()
        .iter()
        .map(GlobeMarker::from)
        .collect()
}
