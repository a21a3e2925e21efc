//! Configuration parameters for the spectrum pipeline

use crate::audio::amplitude::ScanRange;
use crate::audio::constants;
use crate::error::{AnalysisError, Result};

/// Pipeline configuration, fixed once the pipeline is built
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Analysis window length in samples, must be a power of two (default: 8192)
    pub window_size: usize,

    /// Sample rate of the incoming audio in Hz (default: 44100.0)
    /// The audio side may report a different rate later via
    /// `SpectrumProducer::set_sample_rate`
    pub sample_rate: f32,

    /// Bins at or above this frequency are zeroed (default: 99999.0, open)
    pub cutoff_frequency: f32,

    /// Lower edge of the first visual band in Hz (default: 20.0)
    pub min_band_frequency: f32,

    /// Ratio between neighbouring visual band edges (default: 1.06)
    pub band_growth_factor: f32,

    /// Which bins contribute to the running maximum (default: Block)
    pub scan_range: ScanRange,

    /// Stereo frames kept for waveform modes, 0 disables (default: 4800)
    pub history_capacity: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            window_size: constants::DEFAULT_WINDOW_SIZE,
            sample_rate: constants::DEFAULT_SAMPLE_RATE,
            cutoff_frequency: constants::DEFAULT_CUTOFF_FREQUENCY,
            min_band_frequency: constants::MIN_BAND_FREQUENCY,
            band_growth_factor: constants::BAND_GROWTH_FACTOR,
            scan_range: ScanRange::Block,
            history_capacity: constants::DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl AnalyzerConfig {
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: f32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_cutoff_frequency(mut self, cutoff_frequency: f32) -> Self {
        self.cutoff_frequency = cutoff_frequency;
        self
    }

    pub fn with_band_layout(mut self, min_frequency: f32, growth_factor: f32) -> Self {
        self.min_band_frequency = min_frequency;
        self.band_growth_factor = growth_factor;
        self
    }

    pub fn with_scan_range(mut self, scan_range: ScanRange) -> Self {
        self.scan_range = scan_range;
        self
    }

    pub fn with_history_capacity(mut self, history_capacity: usize) -> Self {
        self.history_capacity = history_capacity;
        self
    }

    /// Check every value against the pipeline's preconditions
    pub fn validate(&self) -> Result<()> {
        if !self.window_size.is_power_of_two() {
            return Err(AnalysisError::InvalidWindowSize(self.window_size));
        }
        validate_sample_rate(self.sample_rate)?;
        if self.cutoff_frequency.is_nan() || self.cutoff_frequency < 0.0 {
            return Err(AnalysisError::InvalidCutoff(self.cutoff_frequency));
        }
        validate_band_layout(self.min_band_frequency, self.band_growth_factor)
    }
}

pub(crate) fn validate_sample_rate(sample_rate: f32) -> Result<()> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidSampleRate(sample_rate))
    }
}

pub(crate) fn validate_band_layout(min_frequency: f32, growth_factor: f32) -> Result<()> {
    let valid = min_frequency.is_finite()
        && min_frequency > 0.0
        && growth_factor.is_finite()
        && growth_factor > 1.0;
    if valid {
        Ok(())
    } else {
        Err(AnalysisError::InvalidBandLayout {
            min_frequency,
            growth_factor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(AnalyzerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_power_of_two_window() {
        let config = AnalyzerConfig::default().with_window_size(1000);
        assert_eq!(config.validate(), Err(AnalysisError::InvalidWindowSize(1000)));

        let config = AnalyzerConfig::default().with_window_size(0);
        assert_eq!(config.validate(), Err(AnalysisError::InvalidWindowSize(0)));
    }

    #[test]
    fn rejects_bad_rate_cutoff_and_bands() {
        let config = AnalyzerConfig::default().with_sample_rate(0.0);
        assert!(matches!(config.validate(), Err(AnalysisError::InvalidSampleRate(_))));

        let config = AnalyzerConfig::default().with_sample_rate(f32::INFINITY);
        assert!(matches!(config.validate(), Err(AnalysisError::InvalidSampleRate(_))));

        let config = AnalyzerConfig::default().with_cutoff_frequency(-1.0);
        assert_eq!(config.validate(), Err(AnalysisError::InvalidCutoff(-1.0)));

        let config = AnalyzerConfig::default().with_band_layout(20.0, 1.0);
        assert!(matches!(config.validate(), Err(AnalysisError::InvalidBandLayout { .. })));

        let config = AnalyzerConfig::default().with_band_layout(0.0, 1.06);
        assert!(matches!(config.validate(), Err(AnalysisError::InvalidBandLayout { .. })));
    }

    #[test]
    fn zero_cutoff_is_allowed() {
        let config = AnalyzerConfig::default().with_cutoff_frequency(0.0);
        assert_eq!(config.validate(), Ok(()));
    }
}
