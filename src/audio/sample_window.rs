use crate::error::{AnalysisError, Result};

/// Fixed-length window over the most recent mono samples
///
/// Decouples whatever block size the audio side delivers from the
/// transform's fixed power-of-two input. The newest sample always sits at
/// the highest index.
pub struct SampleWindow {
    samples: Vec<f32>,
}

impl SampleWindow {
    /// Create a silent window of `size` samples (power of two)
    pub fn new(size: usize) -> Result<Self> {
        if !size.is_power_of_two() {
            return Err(AnalysisError::InvalidWindowSize(size));
        }
        Ok(Self {
            samples: vec![0.0; size],
        })
    }

    // Called from audio thread - NO ALLOCATIONS!
    pub fn ingest(&mut self, block: &[f32]) {
        let size = self.samples.len();
        let count = block.len();

        if count >= size {
            // Only the newest `size` samples of the block survive
            self.samples.copy_from_slice(&block[count - size..]);
        } else if count > 0 {
            // Shift left by `count`, dropping the oldest, then append
            self.samples.copy_within(count.., 0);
            self.samples[size - count..].copy_from_slice(block);
        }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Reset to silence, e.g. after the audio source changes
    pub fn clear(&mut self) {
        self.samples.fill(0.0);
    }
}
