//! Audio analysis: sliding window, transform, filter, amplitudes and bands

pub mod amplitude;
pub mod bands;
pub mod constants;
pub mod downmix;
pub mod fft_engine;
pub mod history;
pub mod low_pass;
pub mod sample_window;
pub mod smoothing;
pub mod spectrum;
