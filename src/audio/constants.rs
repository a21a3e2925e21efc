/// Audio analysis constants and helper functions
/// Kept apart from any display constants so the window size can change freely

/// Default analysis window (2^13 samples, ~5.4 Hz per bin at 44.1 kHz)
pub const DEFAULT_WINDOW_SIZE: usize = 1 << 13;

/// Sample rate assumed until the audio side reports the real one
pub const DEFAULT_SAMPLE_RATE: f32 = 44_100.0;

/// Low-pass cutoff used when none is configured. Sits above any real
/// Nyquist frequency, so the filter stays open.
pub const DEFAULT_CUTOFF_FREQUENCY: f32 = 99_999.0;

/// Logarithmic band layout: first band edge and ratio between edges
pub const MIN_BAND_FREQUENCY: f32 = 20.0;
pub const BAND_GROWTH_FACTOR: f32 = 1.06;

/// Stereo frames retained for waveform-style display modes
pub const DEFAULT_HISTORY_CAPACITY: usize = 4800;

/// Normalized amplitudes at or below this are not worth drawing
pub const VISIBILITY_THRESHOLD: f32 = 0.01;

/// Analyses between two trace log lines (~10 seconds of 1024-sample blocks)
pub const LOG_INTERVAL: u64 = 430;

// === HELPER FUNCTIONS ===

/// Frequency in Hz of bin `bin` for a `window_size`-point transform
pub fn bin_to_frequency(bin: usize, sample_rate: f32, window_size: usize) -> f32 {
    bin as f32 * sample_rate / window_size as f32
}

/// Width of one transform bin in Hz
pub fn bin_width(sample_rate: f32, window_size: usize) -> f32 {
    sample_rate / window_size as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bin_frequencies_follow_rate_over_size() {
        assert_eq!(bin_width(48_000.0, 4096), 48_000.0 / 4096.0);
        assert_eq!(bin_to_frequency(0, 48_000.0, 4096), 0.0);
        assert_eq!(bin_to_frequency(2048, 48_000.0, 4096), 24_000.0);
    }

    #[test]
    fn default_cutoff_is_above_nyquist() {
        assert!(DEFAULT_CUTOFF_FREQUENCY > 192_000.0 / 2.0);
    }
}
