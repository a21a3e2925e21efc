use atomic_float::AtomicF32;
use dasp::Frame;
use realfft::num_complex::Complex32;
use std::sync::{atomic::Ordering, Arc, Mutex, MutexGuard, PoisonError};
use triple_buffer::TripleBuffer;

use super::amplitude;
use super::bands::VisualBands;
use super::constants::{self, LOG_INTERVAL};
use super::downmix;
use super::fft_engine::FftEngine;
use super::history::{FrameHistory, StereoFrame};
use super::low_pass;
use super::sample_window::SampleWindow;
use crate::config::{validate_sample_rate, AnalyzerConfig};
use crate::error::Result;

/// One analysis result as seen by the render thread
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumFrame {
    /// Per-bin magnitude estimate, one entry per transform bin
    pub magnitudes: Vec<f32>,
    /// Largest magnitude in the scanned bins, 0 for silence
    pub max_amplitude: f32,
    /// Sample rate the window was analysed at
    pub sample_rate: f32,
    /// Analyses run so far, this one included (0 = nothing analysed yet)
    pub sequence: u64,
    /// Recent raw stereo frames, oldest first (empty when history is off)
    pub history: Vec<StereoFrame>,
}

impl SpectrumFrame {
    /// Frame shown before any audio has arrived
    pub fn silent(bins: usize, sample_rate: f32) -> Self {
        Self {
            magnitudes: vec![0.0; bins],
            max_amplitude: 0.0,
            sample_rate,
            sequence: 0,
            history: Vec::new(),
        }
    }

    /// Magnitudes divided by `max_amplitude`, all zero for silence
    pub fn normalized(&self) -> Vec<f32> {
        let mut normalized = vec![0.0; self.magnitudes.len()];
        amplitude::normalize(&self.magnitudes, self.max_amplitude, &mut normalized);
        normalized
    }

    /// Centre frequency of `bin` in Hz
    pub fn bin_frequency(&self, bin: usize) -> f32 {
        constants::bin_to_frequency(bin, self.sample_rate, self.magnitudes.len())
    }
}

/// Cloneable read side of the pipeline (render thread)
/// Uses Arc<Mutex<>> around the triple buffer output so clones can share it.
/// Only render-side clones contend for the mutex, the producer never takes it.
#[derive(Clone)]
pub struct SpectrumConsumer {
    output: Arc<Mutex<triple_buffer::Output<SpectrumFrame>>>,
    max_amplitude: Arc<AtomicF32>,
    bands: VisualBands,
}

impl SpectrumConsumer {
    /// Latest published frame
    ///
    /// Waits for a clone that is mid-read instead of returning a placeholder,
    /// so the sequence number seen by any clone never goes backwards.
    pub fn read(&self) -> SpectrumFrame {
        self.lock_output().read().clone()
    }

    /// Whether a frame was published since the last `read`
    pub fn has_update(&self) -> bool {
        self.lock_output().updated()
    }

    /// Maximum amplitude of the most recent analysis, without touching the
    /// triple buffer
    pub fn max_amplitude(&self) -> f32 {
        self.max_amplitude.load(Ordering::Relaxed)
    }

    /// Latest magnitudes normalized for display
    pub fn normalized(&self) -> Vec<f32> {
        self.read().normalized()
    }

    pub fn bands(&self) -> VisualBands {
        self.bands
    }

    fn lock_output(&self) -> MutexGuard<'_, triple_buffer::Output<SpectrumFrame>> {
        // A reader that panicked mid-clone leaves the triple buffer intact
        self.output.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Audio-thread side of the pipeline: window, transform, filter, amplitudes
///
/// Every buffer is allocated in [`SpectrumProducer::new`], including the three
/// frames inside the triple buffer. Ingesting never allocates: results are
/// written into the back buffer in place and published.
pub struct SpectrumProducer {
    config: AnalyzerConfig,
    /// Rate reported by the audio side, used for the low-pass cutoff bin
    sample_rate: f32,
    /// Most recent mono samples
    window: SampleWindow,
    /// Recursive radix-2 transform for `window_size`
    fft_engine: FftEngine,
    /// Complex transform output of the last analysis
    spectrum: Vec<Complex32>,
    /// Per-bin magnitudes of the last analysis
    magnitudes: Vec<f32>,
    max_amplitude: f32,
    /// Mono conversion of multi-channel blocks, never longer than the window
    mono_scratch: Vec<f32>,
    history: FrameHistory,
    /// Triple buffer producer for lock-free communication to UI
    frame_producer: triple_buffer::Input<SpectrumFrame>,
    /// Mirror of `max_amplitude` for cheap reads on the render side
    shared_max_amplitude: Arc<AtomicF32>,
    analyses: u64,
}

impl SpectrumProducer {
    /// Create the pipeline and its reader
    /// Returns (producer for audio thread, consumer for render thread)
    pub fn new(config: AnalyzerConfig) -> Result<(Self, SpectrumConsumer)> {
        config.validate()?;

        let size = config.window_size;
        let window = SampleWindow::new(size)?;
        let fft_engine = FftEngine::new(size)?;
        let bands = VisualBands::new(size, config.min_band_frequency, config.band_growth_factor)?;

        // Every back buffer gets full-size magnitudes and history up front
        let history = FrameHistory::new(config.history_capacity);
        let mut initial = SpectrumFrame::silent(size, config.sample_rate);
        history.snapshot(&mut initial.history);
        let (frame_producer, frame_consumer) = TripleBuffer::new(&initial).split();
        let shared_max_amplitude = Arc::new(AtomicF32::new(0.0));

        log::debug!(
            "spectrum pipeline: {} point window, {} Hz, cutoff {} Hz, {} visual bands",
            size,
            config.sample_rate,
            config.cutoff_frequency,
            bands.count()
        );

        let consumer = SpectrumConsumer {
            output: Arc::new(Mutex::new(frame_consumer)),
            max_amplitude: shared_max_amplitude.clone(),
            bands,
        };

        let producer = Self {
            sample_rate: config.sample_rate,
            window,
            fft_engine,
            spectrum: vec![Complex32::new(0.0, 0.0); size],
            magnitudes: vec![0.0; size],
            max_amplitude: 0.0,
            mono_scratch: Vec::with_capacity(size),
            history,
            frame_producer,
            shared_max_amplitude,
            analyses: 0,
            config,
        };

        Ok((producer, consumer))
    }

    /// Analyse a block of mono samples
    /// Called from audio thread. Empty blocks change nothing.
    pub fn ingest(&mut self, samples: &[f32]) {
        if samples.is_empty() {
            return;
        }

        if self.history.is_enabled() {
            for &sample in samples {
                self.history.push([sample, sample]);
            }
        }
        self.window.ingest(samples);
        self.analyze(samples.len());
    }

    /// Analyse a block of interleaved samples with `channels` channels
    pub fn ingest_interleaved(&mut self, samples: &[f32], channels: usize) {
        if channels == 0 || samples.len() < channels {
            return;
        }

        if self.history.is_enabled() {
            for frame in samples.chunks_exact(channels) {
                let left = frame[0];
                let right = frame.get(1).copied().unwrap_or(left);
                self.history.push([left, right]);
            }
        }
        // Only the newest window-length frames can reach the window
        let whole_frames = samples.len() / channels;
        let start = whole_frames.saturating_sub(self.window.len()) * channels;
        downmix::downmix_interleaved(&samples[start..], channels, &mut self.mono_scratch);
        self.window.ingest(&self.mono_scratch);
        self.analyze(whole_frames);
    }

    /// Analyse a block of `dasp` frames (mono, stereo, ...)
    pub fn ingest_frames<F>(&mut self, frames: &[F])
    where
        F: Frame<Sample = f32>,
    {
        if frames.is_empty() {
            return;
        }

        if self.history.is_enabled() {
            for &frame in frames {
                let mut channels = frame.channels();
                let left = channels.next().unwrap_or(0.0);
                let right = channels.next().unwrap_or(left);
                self.history.push([left, right]);
            }
        }
        let start = frames.len().saturating_sub(self.window.len());
        downmix::downmix_frames(&frames[start..], &mut self.mono_scratch);
        self.window.ingest(&self.mono_scratch);
        self.analyze(frames.len());
    }

    /// Switch to the rate of a newly loaded stream
    pub fn set_sample_rate(&mut self, sample_rate: f32) -> Result<()> {
        if let Err(err) = validate_sample_rate(sample_rate) {
            log::warn!("ignoring sample rate update: {}", err);
            return Err(err);
        }
        if sample_rate != self.sample_rate {
            log::debug!("sample rate {} Hz -> {} Hz", self.sample_rate, sample_rate);
            self.sample_rate = sample_rate;
        }
        Ok(())
    }

    /// Forget buffered audio, e.g. when the stream is replaced
    pub fn reset(&mut self) {
        self.window.clear();
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    pub fn window(&self) -> &[f32] {
        self.window.as_slice()
    }

    /// Complex spectrum of the last analysis (after the low-pass)
    pub fn spectrum(&self) -> &[Complex32] {
        &self.spectrum
    }

    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    pub fn max_amplitude(&self) -> f32 {
        self.max_amplitude
    }

    fn analyze(&mut self, block_len: usize) {
        self.fft_engine
            .process(self.window.as_slice(), &mut self.spectrum);

        low_pass::apply_low_pass(
            &mut self.spectrum,
            self.sample_rate,
            self.config.cutoff_frequency,
        );

        let scan_len = self
            .config
            .scan_range
            .scan_len(block_len, self.spectrum.len());
        self.max_amplitude =
            amplitude::extract_amplitudes(&self.spectrum, scan_len, &mut self.magnitudes);
        self.shared_max_amplitude
            .store(self.max_amplitude, Ordering::Relaxed);

        self.analyses += 1;
        self.publish();

        if self.analyses % LOG_INTERVAL == 0 {
            log::trace!(
                "analysis #{}: block of {} samples, max amplitude {}",
                self.analyses,
                block_len,
                self.max_amplitude
            );
        }
    }

    /// Send the latest result to the render thread (lock-free)
    /// Fills the back buffer in place, so nothing is allocated or freed.
    fn publish(&mut self) {
        let frame = self.frame_producer.input_buffer_mut();
        frame.magnitudes.copy_from_slice(&self.magnitudes);
        frame.max_amplitude = self.max_amplitude;
        frame.sample_rate = self.sample_rate;
        frame.sequence = self.analyses;
        self.history.snapshot(&mut frame.history);

        self.frame_producer.publish();
    }
}
