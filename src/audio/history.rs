use dasp::ring_buffer;

/// One interleaved stereo frame (left, right)
pub type StereoFrame = [f32; 2];

/// Raw stereo frames most recently delivered by the audio side
///
/// Fixed capacity, overwrites the oldest frame once full. Starts out full of
/// silence. Capacity 0 disables it: pushes are dropped, snapshots are empty.
pub struct FrameHistory {
    frames: Option<ring_buffer::Fixed<Vec<StereoFrame>>>,
}

impl FrameHistory {
    pub fn new(capacity: usize) -> Self {
        let frames = (capacity > 0).then(|| ring_buffer::Fixed::from(vec![[0.0; 2]; capacity]));
        Self { frames }
    }

    pub fn capacity(&self) -> usize {
        self.frames.as_ref().map_or(0, |frames| frames.len())
    }

    pub fn is_enabled(&self) -> bool {
        self.frames.is_some()
    }

    pub fn push(&mut self, frame: StereoFrame) {
        if let Some(frames) = self.frames.as_mut() {
            frames.push(frame);
        }
    }

    pub fn extend(&mut self, frames: &[StereoFrame]) {
        for &frame in frames {
            self.push(frame);
        }
    }

    /// Copy the frames, oldest first, into `out` (cleared first)
    pub fn snapshot(&self, out: &mut Vec<StereoFrame>) {
        out.clear();
        if let Some(frames) = self.frames.as_ref() {
            out.extend(frames.iter().copied());
        }
    }
}
