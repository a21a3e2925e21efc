/// Frame-to-frame smoothing of normalized amplitudes (render side)
///
/// Each call averages the incoming values with the previous smoothed values,
/// halving the distance to the new height on every frame.
pub struct BandSmoother {
    smoothed: Vec<f32>,
}

impl BandSmoother {
    pub fn new() -> Self {
        Self {
            smoothed: Vec::new(),
        }
    }

    /// Blend `current` into the smoothed state and return it
    pub fn smooth(&mut self, current: &[f32]) -> &[f32] {
        // Initialize smoothed values if the spectrum size changed
        if self.smoothed.len() != current.len() {
            self.smoothed = vec![0.0; current.len()];
        }

        for (previous, &value) in self.smoothed.iter_mut().zip(current) {
            *previous = (*previous + value) * 0.5;
        }
        &self.smoothed
    }

    pub fn values(&self) -> &[f32] {
        &self.smoothed
    }

    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
    }
}

impl Default for BandSmoother {
    fn default() -> Self {
        Self::new()
    }
}
