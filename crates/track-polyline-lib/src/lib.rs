//! Track Polyline Library - Encoded Polylines with Zoom Levels
//!
//! This library turns GPS tracks into the compact printable strings used by
//! web map APIs to embed polylines in URLs. Points are first ranked with a
//! Douglas-Peucker pass; only significant points are encoded, each with the
//! coarsest zoom level at which it still has to be drawn.
//!
//! # Architecture
//!
//! - **[`LatLon`]**: Latitude/longitude point in raw degrees
//! - **[`compute_importance`]**: Douglas-Peucker importance per point
//! - **[`ZoomLevels`]**: Distance breaks mapping importance to zoom levels
//! - **[`codec`]**: Delta, zig-zag and 5-bit chunk encoding of integers
//! - **[`PolylineEncoder`]**: Ties the above together for one [`Config`]
//!
//! # Performance Characteristics
//!
//! - **Simplification**: O(N log N) typical, O(N²) worst case
//! - **Encoding**: O(K) in the number of retained points
//! - **Batches**: polylines are encoded in parallel with rayon

pub mod codec;
mod config;
mod encoder;
mod level;
mod point;
mod simplify;

// Public API exports
pub use config::{Config, NUM_LEVELS, THRESHOLD, ZOOM_FACTOR};
pub use encoder::{EncodedPolyline, PolylineEncoder, encode_pairs};
pub use level::ZoomLevels;
pub use point::LatLon;
pub use simplify::{ImportanceArray, compute_importance, distance};

/// Error types for polyline encoding
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EncodeError>;
