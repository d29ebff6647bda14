//! Douglas-Peucker importance computation
//!
//! Instead of returning a simplified polyline, the simplifier records for each
//! retained point how far it was from the segment it was tested against. The
//! encoder turns that distance into a zoom level.

use crate::{Config, LatLon, Result};
use smallvec::SmallVec;

/// Per-point importance, aligned with the input points
///
/// `None` marks a point that was not retained. The first and last points
/// always carry the sentinel distance of the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportanceArray {
    distances: Vec<Option<f64>>,
}

impl ImportanceArray {
    #[inline]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.distances.get(index).copied().flatten()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Option<f64>] {
        &self.distances
    }

    /// Retained points as `(index, distance)`, in input order
    pub fn significant(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.distances
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.map(|d| (i, d)))
    }

    /// Indices of the retained points, in input order
    pub fn significant_indices(&self) -> Vec<usize> {
        self.significant().map(|(i, _)| i).collect()
    }

    pub fn into_inner(self) -> Vec<Option<f64>> {
        self.distances
    }
}

/// Compute the importance of every point of a polyline
///
/// Returns an empty array for an empty input.
pub fn compute_importance(points: &[LatLon], config: &Config) -> Result<ImportanceArray> {
    config.validate()?;
    Ok(importance_with_sentinel(
        points,
        config.threshold,
        config.sentinel_distance()?,
    ))
}

/// Iterative Douglas-Peucker over an explicit stack of index ranges
///
/// Each pushed range is strictly smaller than the one it came from, so the
/// loop terminates.
pub(crate) fn importance_with_sentinel(
    points: &[LatLon],
    threshold: f64,
    sentinel: f64,
) -> ImportanceArray {
    #[cfg(feature = "profiling")]
    profiling::scope!("simplify::importance");

    let n = points.len();
    let mut distances = vec![None; n];
    if n == 0 {
        return ImportanceArray { distances };
    }
    distances[0] = Some(sentinel);
    distances[n - 1] = Some(sentinel);

    if n < 3 {
        return ImportanceArray { distances };
    }

    let mut stack: SmallVec<[(usize, usize); 32]> = SmallVec::new();
    stack.push((0, n - 1));

    while let Some((a, b)) = stack.pop() {
        let mut max_dist = 0.0;
        let mut max_index = None;
        for (offset, &point) in points[a + 1..b].iter().enumerate() {
            let dist = distance(point, points[a], points[b]);
            if dist > max_dist {
                max_dist = dist;
                max_index = Some(a + 1 + offset);
            }
        }

        match max_index {
            Some(i) if max_dist > threshold => {
                tracing::trace!("Retained point {} in range {}..{} at {}", i, a, b, max_dist);
                distances[i] = Some(max_dist);
                stack.push((a, i));
                stack.push((i, b));
            }
            _ => {}
        }
    }

    ImportanceArray { distances }
}

/// Distance from `point` to the segment `a`-`b`, in degree units
///
/// Falls back to the distance to the nearest endpoint when the projection
/// lands outside the segment, and to the distance to `b` when the segment is
/// degenerate.
pub fn distance(point: LatLon, a: LatLon, b: LatLon) -> f64 {
    if a == b {
        return point.planar_distance(b);
    }

    let d_lat = b.lat - a.lat;
    let d_lon = b.lon - a.lon;
    let u = ((point.lat - a.lat) * d_lat + (point.lon - a.lon) * d_lon)
        / (d_lat * d_lat + d_lon * d_lon);

    if u <= 0.0 {
        point.planar_distance(a)
    } else if u >= 1.0 {
        point.planar_distance(b)
    } else {
        point.planar_distance(LatLon::new(a.lat + u * d_lat, a.lon + u * d_lon))
    }
}
