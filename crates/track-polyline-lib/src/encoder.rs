//! PolylineEncoder - Top-level encoding of point sequences
//!
//! Combines the simplifier, the level table and the codec into the two
//! strings consumed by web map APIs: the encoded points and the encoded
//! zoom levels of those points.

use crate::level::ZoomLevels;
use crate::simplify::{ImportanceArray, importance_with_sentinel};
use crate::{Config, EncodeError, LatLon, Result, codec};

use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of encoding one polyline
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncodedPolyline {
    /// Delta-encoded coordinates: lat0, lon0, lat1, lon1, ...
    pub points: String,
    /// One level code per retained point
    pub levels: String,
    /// Zoom factor the levels were computed with
    pub zoom_factor: u32,
    /// Number of levels the codes in `levels` range over
    pub num_levels: u32,
    /// Number of points kept after simplification
    pub retained: usize,
}

impl EncodedPolyline {
    /// Split into the `(points, levels)` pair
    pub fn into_parts(self) -> (String, String) {
        (self.points, self.levels)
    }
}

impl From<EncodedPolyline> for (String, String) {
    fn from(encoded: EncodedPolyline) -> Self {
        encoded.into_parts()
    }
}

/// Encoder for a fixed configuration
///
/// Immutable once built, so a single encoder can be shared between threads.
#[derive(Debug, Clone)]
pub struct PolylineEncoder {
    config: Config,
    levels: ZoomLevels,
    sentinel: f64,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl PolylineEncoder {
    /// Create an encoder, rejecting configurations without a usable level table
    pub fn new(config: Config) -> Result<Self> {
        let levels = ZoomLevels::new(&config)?;
        let sentinel = config.sentinel_distance()?;
        Ok(Self {
            config,
            levels,
            sentinel,
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn levels(&self) -> &ZoomLevels {
        &self.levels
    }

    /// Importance of every point under this encoder's configuration
    pub fn importance(&self, points: &[LatLon]) -> ImportanceArray {
        importance_with_sentinel(points, self.config.threshold, self.sentinel)
    }

    /// Encode a polyline
    ///
    /// # Errors
    /// `InvalidInput` if `points` is empty, or if a retained coordinate is
    /// not finite or too large to encode.
    pub fn encode(&self, points: &[LatLon]) -> Result<EncodedPolyline> {
        #[cfg(feature = "profiling")]
        profiling::scope!("encoder::encode");

        if points.is_empty() {
            return Err(EncodeError::InvalidInput(
                "cannot encode a polyline without points".to_string(),
            ));
        }

        let importance = self.importance(points);

        let mut encoded_points = String::new();
        let mut encoded_levels = String::new();
        let mut lat_prev = 0;
        let mut lon_prev = 0;
        let mut retained = 0;

        for (i, distance) in importance.significant() {
            let point = points[i];
            lat_prev = codec::write_coordinate(point.lat, lat_prev, &mut encoded_points)?;
            lon_prev = codec::write_coordinate(point.lon, lon_prev, &mut encoded_points)?;
            self.levels.write_level(distance, &mut encoded_levels);
            retained += 1;
        }

        tracing::debug!(
            "Encoded polyline: {} of {} points retained, {} chars",
            retained,
            points.len(),
            encoded_points.len()
        );

        Ok(EncodedPolyline {
            points: encoded_points,
            levels: encoded_levels,
            zoom_factor: self.config.zoom_factor,
            num_levels: self.levels.num_levels(),
            retained,
        })
    }

    /// Encode latitude-first `(lat, lon)` pairs
    pub fn encode_pairs(&self, pairs: &[(f64, f64)]) -> Result<EncodedPolyline> {
        let points: Vec<LatLon> = pairs.iter().copied().map(LatLon::from).collect();
        self.encode(&points)
    }

    /// Encode a `geo` line string (`x` is longitude, `y` is latitude)
    pub fn encode_line_string(&self, line: &geo::LineString<f64>) -> Result<EncodedPolyline> {
        let points: Vec<LatLon> = line.coords().copied().map(LatLon::from).collect();
        self.encode(&points)
    }

    /// Encode every track segment of parsed GPX data
    ///
    /// Produces one polyline per non-empty segment, in track and segment
    /// order. Segments are encoded in parallel.
    pub fn encode_gpx(&self, gpx_data: &gpx::Gpx) -> Result<Vec<EncodedPolyline>> {
        #[cfg(feature = "profiling")]
        profiling::scope!("encoder::encode_gpx");

        let mut segments: Vec<Vec<LatLon>> = Vec::new();
        for (track_index, track) in gpx_data.tracks.iter().enumerate() {
            for (segment_index, segment) in track.segments.iter().enumerate() {
                if segment.points.is_empty() {
                    tracing::warn!(
                        "Skipping empty segment {} of track {}",
                        segment_index,
                        track_index
                    );
                    continue;
                }
                segments.push(segment.points.iter().map(LatLon::from).collect());
            }
        }

        if segments.is_empty() {
            return Err(EncodeError::InvalidInput(
                "GPX data contains no track points".to_string(),
            ));
        }

        self.encode_many(&segments)
    }

    /// Encode independent polylines in parallel
    ///
    /// Output order matches input order. Fails if any polyline is empty.
    pub fn encode_many<P>(&self, polylines: &[P]) -> Result<Vec<EncodedPolyline>>
    where
        P: AsRef<[LatLon]> + Sync,
    {
        #[cfg(feature = "profiling")]
        profiling::scope!("encoder::encode_many");

        polylines
            .par_iter()
            .map(|points| self.encode(points.as_ref()))
            .collect()
    }
}

/// Encode latitude-first pairs with the default configuration
///
/// # Example
/// ```
/// let encoded = track_polyline_lib::encode_pairs(&[(38.5, -120.2)]).unwrap();
/// assert_eq!(encoded.points, "_p~iF~ps|U");
/// assert_eq!(encoded.levels, "B");
/// ```
pub fn encode_pairs(pairs: &[(f64, f64)]) -> Result<EncodedPolyline> {
    PolylineEncoder::new(Config::default())?.encode_pairs(pairs)
}
