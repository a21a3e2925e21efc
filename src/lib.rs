//! Real-time spectrum analysis for bar visualizers
//!
//! Audio blocks of any size go into a [`SpectrumProducer`] on the audio
//! thread. Each block updates a fixed power-of-two sample window, which is
//! run through a recursive radix-2 transform, low-pass filtered and reduced
//! to one magnitude per bin plus a running maximum. The result is handed to
//! the render thread through a lock-free triple buffer and read with a
//! [`SpectrumConsumer`].
//!
//! ```
//! use bar_spectrum::{AnalyzerConfig, SpectrumProducer};
//!
//! let config = AnalyzerConfig::default().with_window_size(1024);
//! let (mut producer, consumer) = SpectrumProducer::new(config)?;
//!
//! // audio thread
//! producer.ingest_frames(&[[0.25f32, -0.25]; 512]);
//!
//! // render thread
//! let frame = consumer.read();
//! let heights = frame.normalized();
//! let cell_width = consumer.bands().cell_width(1280.0);
//! # assert_eq!(heights.len(), 1024);
//! # assert!(cell_width > 0.0);
//! # Ok::<(), bar_spectrum::AnalysisError>(())
//! ```

pub mod audio;
pub mod config;
pub mod error;

pub use audio::amplitude::{extract_amplitudes, is_visible, magnitude, normalize, ScanRange};
pub use audio::bands::{visual_band_count, VisualBands};
pub use audio::fft_engine::{dft, fft, FftEngine, StridedView};
pub use audio::history::{FrameHistory, StereoFrame};
pub use audio::low_pass::{apply_low_pass, cutoff_bin};
pub use audio::sample_window::SampleWindow;
pub use audio::smoothing::BandSmoother;
pub use audio::spectrum::{SpectrumConsumer, SpectrumFrame, SpectrumProducer};
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use realfft::num_complex::Complex32;
