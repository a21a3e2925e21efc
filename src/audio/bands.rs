//! Logarithmic grouping of transform bins into visual bands
//!
//! Pitch perception is roughly logarithmic, so band edges grow
//! geometrically: min, min*g, min*g^2, ... The renderer gives each band
//! `screen_width / count` pixels instead of drawing every raw bin.

use crate::config::validate_band_layout;
use crate::error::Result;

/// Count the geometric band edges below `total_bins`
///
/// Starts at `min_frequency` and multiplies by `growth_factor` while the
/// value stays below `total_bins`. Valid parameters always give at least one
/// band, even when the first edge is already past `total_bins`. Returns 0 only
/// when the parameters cannot produce a finite sequence (non-positive start,
/// growth <= 1).
pub fn visual_band_count(total_bins: usize, min_frequency: f32, growth_factor: f32) -> usize {
    if validate_band_layout(min_frequency, growth_factor).is_err() {
        return 0;
    }

    let limit = total_bins as f32;
    let mut edge = min_frequency;
    let mut count = 0;
    while edge < limit {
        count += 1;
        edge *= growth_factor;
    }
    count.max(1)
}

/// Band layout for one spectrum size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualBands {
    count: usize,
    min_frequency: f32,
    growth_factor: f32,
}

impl VisualBands {
    pub fn new(total_bins: usize, min_frequency: f32, growth_factor: f32) -> Result<Self> {
        validate_band_layout(min_frequency, growth_factor)?;

        let count = visual_band_count(total_bins, min_frequency, growth_factor);
        Ok(Self {
            count,
            min_frequency,
            growth_factor,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Horizontal space per band
    pub fn cell_width(&self, screen_width: f32) -> f32 {
        screen_width / self.count as f32
    }

    /// Lower edge of band `index`
    pub fn band_frequency(&self, index: usize) -> f32 {
        self.min_frequency * libm::powf(self.growth_factor, index as f32)
    }
}
