//! Per-bin amplitude estimates and display normalization
//!
//! Bar heights only need a monotone estimate of each bin's modulus, so the
//! larger of |re| and |im| stands in for sqrt(re^2 + im^2). It never
//! overestimates the modulus and is off by at most a factor of sqrt(2).

use crate::audio::constants::VISIBILITY_THRESHOLD;
use realfft::num_complex::Complex32;

/// Which bins feed the running maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanRange {
    /// The first `count` bins, `count` being the length of the block that
    /// triggered the analysis
    #[default]
    Block,
    /// Every bin of the spectrum
    Full,
}

impl ScanRange {
    /// Number of bins to scan for a block of `block_len` samples
    pub fn scan_len(self, block_len: usize, spectrum_len: usize) -> usize {
        match self {
            Self::Block => block_len.min(spectrum_len),
            Self::Full => spectrum_len,
        }
    }
}

/// Chebyshev estimate of a bin's magnitude: max(|re|, |im|)
#[inline]
pub fn magnitude(bin: Complex32) -> f32 {
    bin.re.abs().max(bin.im.abs())
}

/// Write the magnitude of every bin into `magnitudes` and return the largest
/// magnitude among the first `scan_len` bins
///
/// The maximum starts at zero on every call, so a silent spectrum yields 0.
pub fn extract_amplitudes(spectrum: &[Complex32], scan_len: usize, magnitudes: &mut [f32]) -> f32 {
    debug_assert_eq!(spectrum.len(), magnitudes.len());

    let scan_len = scan_len.min(spectrum.len());
    let mut max_amplitude = 0.0f32;
    for (i, (&bin, out)) in spectrum.iter().zip(magnitudes.iter_mut()).enumerate() {
        *out = magnitude(bin);
        if i < scan_len && *out > max_amplitude {
            max_amplitude = *out;
        }
    }
    max_amplitude
}

/// Scale magnitudes into 0..=1 (roughly; unscanned bins may exceed 1)
///
/// A zero, negative or non-finite maximum means silence: every output is
/// zero rather than NaN or infinity.
pub fn normalize(magnitudes: &[f32], max_amplitude: f32, normalized: &mut [f32]) {
    debug_assert_eq!(magnitudes.len(), normalized.len());

    if !(max_amplitude.is_finite() && max_amplitude > 0.0) {
        normalized.fill(0.0);
        return;
    }
    for (out, &value) in normalized.iter_mut().zip(magnitudes) {
        *out = value / max_amplitude;
    }
}

/// Whether a normalized amplitude is tall enough to be drawn
pub fn is_visible(normalized: f32) -> bool {
    normalized > VISIBILITY_THRESHOLD
}
