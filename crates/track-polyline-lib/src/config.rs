//! Encoder configuration
//!
//! The defaults are the constants used by the web map polyline format: points
//! closer than [`THRESHOLD`] degrees to the simplified line are dropped, and
//! retained points are spread over [`NUM_LEVELS`] zoom levels, each one
//! [`ZOOM_FACTOR`] times coarser than the next.

use crate::{EncodeError, Result};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default simplification tolerance in degrees
pub const THRESHOLD: f64 = 0.00001;

/// Default number of zoom levels
pub const NUM_LEVELS: u32 = 4;

/// Default scale between consecutive zoom levels
pub const ZOOM_FACTOR: u32 = 32;

/// Configuration for the polyline encoder
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Minimum distance (in degrees) for a point to be kept.
    /// Default: 0.00001
    pub threshold: f64,
    /// Number of zoom levels the retained points are spread over.
    /// Default: 4
    pub num_levels: u32,
    /// Ratio between the distance breaks of two consecutive levels.
    /// Default: 32
    pub zoom_factor: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: THRESHOLD,
            num_levels: NUM_LEVELS,
            zoom_factor: ZOOM_FACTOR,
        }
    }
}

impl Config {
    /// Check that the configuration describes a usable level table
    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(EncodeError::InvalidConfig(format!(
                "threshold must be a positive finite number, got {}",
                self.threshold
            )));
        }
        if self.num_levels == 0 {
            return Err(EncodeError::InvalidConfig(
                "num_levels must be at least 1".to_string(),
            ));
        }
        if self.zoom_factor < 2 {
            return Err(EncodeError::InvalidConfig(format!(
                "zoom_factor must be at least 2, got {}",
                self.zoom_factor
            )));
        }
        self.zoom_factor_pow(self.num_levels)?;
        Ok(())
    }

    /// Importance assigned to the first and last point of every polyline
    ///
    /// `threshold * zoom_factor^num_levels`, larger than every level break.
    pub fn sentinel_distance(&self) -> Result<f64> {
        Ok(self.threshold * self.zoom_factor_pow(self.num_levels)?)
    }

    /// `zoom_factor^exp` computed in integers so powers stay exact
    pub(crate) fn zoom_factor_pow(&self, exp: u32) -> Result<f64> {
        u64::from(self.zoom_factor)
            .checked_pow(exp)
            .filter(|&value| value <= (1u64 << f64::MANTISSA_DIGITS))
            .map(|value| value as f64)
            .ok_or_else(|| {
                EncodeError::InvalidConfig(format!(
                    "zoom_factor {} raised to {} is too large",
                    self.zoom_factor, exp
                ))
            })
    }
}
