//! Zoom level lookup
//!
//! Maps the importance distance of a retained point to the coarsest zoom
//! level at which the point still has to be drawn.

use crate::{Config, Result, codec};
use smallvec::SmallVec;

/// Descending table of distance breaks, one per zoom level
///
/// `breaks[i] = threshold * zoom_factor^(num_levels - 1 - i)`, so the last
/// break is the threshold itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomLevels {
    threshold: f64,
    breaks: SmallVec<[f64; 8]>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl ZoomLevels {
    /// Build the break table for a configuration
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let breaks = (0..config.num_levels)
            .map(|i| {
                config
                    .zoom_factor_pow(config.num_levels - 1 - i)
                    .map(|scale| config.threshold * scale)
            })
            .collect::<Result<SmallVec<[f64; 8]>>>()?;
        Ok(Self {
            threshold: config.threshold,
            breaks,
        })
    }

    /// The distance breaks, coarsest first
    #[inline]
    pub fn breaks(&self) -> &[f64] {
        &self.breaks
    }

    #[inline]
    pub fn num_levels(&self) -> u32 {
        self.breaks.len() as u32
    }

    /// Zero-based level for an importance distance
    ///
    /// Distances below the threshold map to level 0.
    pub fn level_for_distance(&self, distance: f64) -> u32 {
        if distance < self.threshold {
            return 0;
        }
        let mut level = 0;
        while level + 1 < self.breaks.len() && distance < self.breaks[level] {
            level += 1;
        }
        level as u32
    }

    /// Level code written to the output; finer points get smaller codes
    #[inline]
    pub fn encoded_level(&self, distance: f64) -> u32 {
        self.num_levels() - self.level_for_distance(distance) - 1
    }

    /// Append the encoded level of `distance` to `out`
    #[inline]
    pub fn write_level(&self, distance: f64, out: &mut String) {
        codec::write_unsigned(u128::from(self.encoded_level(distance)), out);
    }
}
