//! Point type used throughout the encoder
//!
//! Coordinates are kept in raw degrees. The encoder never projects them and
//! never checks that they are within valid latitude/longitude bounds.

/// A single latitude/longitude pair in degrees
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLon {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl LatLon {
    #[inline]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Euclidean distance in degree units (no great-circle correction)
    #[inline]
    pub fn planar_distance(self, other: LatLon) -> f64 {
        let d_lat = self.lat - other.lat;
        let d_lon = self.lon - other.lon;
        (d_lat * d_lat + d_lon * d_lon).sqrt()
    }
}

/// Latitude first, matching the order used by map APIs
impl From<(f64, f64)> for LatLon {
    #[inline]
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl From<LatLon> for (f64, f64) {
    #[inline]
    fn from(point: LatLon) -> Self {
        (point.lat, point.lon)
    }
}

/// `geo` stores longitude in `x` and latitude in `y`
impl From<geo::Coord<f64>> for LatLon {
    #[inline]
    fn from(coord: geo::Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<geo::Point<f64>> for LatLon {
    #[inline]
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<&gpx::Waypoint> for LatLon {
    #[inline]
    fn from(waypoint: &gpx::Waypoint) -> Self {
        let point = waypoint.point();
        Self::new(point.y(), point.x())
    }
}
