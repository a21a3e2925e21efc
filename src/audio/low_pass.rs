//! Brick-wall low-pass applied to the transform output
//!
//! Zeroes every bin from the cutoff bin up to the end of the spectrum,
//! mirrored negative-frequency bins included.

use crate::audio::constants;
use realfft::num_complex::Complex32;

/// Index of the first bin at or above `cutoff_hz`
///
/// `floor(cutoff / (sample_rate / size))`. Negative or NaN cutoffs map to
/// bin 0, huge ones saturate.
pub fn cutoff_bin(size: usize, sample_rate: f32, cutoff_hz: f32) -> usize {
    let bin = libm::floorf(cutoff_hz / constants::bin_width(sample_rate, size));
    if bin.is_nan() || bin <= 0.0 {
        0
    } else if bin >= usize::MAX as f32 {
        usize::MAX
    } else {
        bin as usize
    }
}

/// Zero every bin whose index is at or above the cutoff bin
///
/// Idempotent. A cutoff bin past the end leaves the spectrum untouched,
/// cutoff bin 0 silences it completely.
pub fn apply_low_pass(spectrum: &mut [Complex32], sample_rate: f32, cutoff_hz: f32) {
    let start = cutoff_bin(spectrum.len(), sample_rate, cutoff_hz);
    if let Some(rejected) = spectrum.get_mut(start..) {
        rejected.fill(Complex32::new(0.0, 0.0));
    }
}
