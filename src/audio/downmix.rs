//! Multi-channel to mono conversion for the analysis window
//!
//! The analysis runs on a single channel: each frame contributes the mean of
//! its channels.

use dasp::Frame;

/// Average each frame's channels into `mono` (cleared first)
pub fn downmix_frames<F>(frames: &[F], mono: &mut Vec<f32>)
where
    F: Frame<Sample = f32>,
{
    mono.clear();
    mono.extend(frames.iter().map(|&frame| {
        let (sum, channels) = frame
            .channels()
            .fold((0.0f32, 0usize), |(sum, n), sample| (sum + sample, n + 1));
        if channels == 0 {
            0.0
        } else {
            sum / channels as f32
        }
    }));
}

/// Same as [`downmix_frames`] for a flat interleaved buffer
///
/// A trailing partial frame is dropped; zero channels yields nothing.
pub fn downmix_interleaved(samples: &[f32], channels: usize, mono: &mut Vec<f32>) {
    mono.clear();
    if channels == 0 {
        return;
    }
    let scale = channels as f32;
    mono.extend(
        samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / scale),
    );
}
