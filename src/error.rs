//! Error types for the spectrum pipeline
//!
//! Every error here is a configuration problem caught at construction time.
//! Silence and odd-sized audio blocks are handled by policy, not errors.

use thiserror::Error;

/// Errors raised while building or reconfiguring the analysis pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("window size {0} is not a power of two")]
    InvalidWindowSize(usize),

    #[error("sample rate {0} Hz must be finite and positive")]
    InvalidSampleRate(f32),

    #[error("cutoff frequency {0} Hz must not be negative or NaN")]
    InvalidCutoff(f32),

    #[error(
        "band layout needs min frequency > 0 and growth factor > 1 \
         (got {min_frequency}, {growth_factor})"
    )]
    InvalidBandLayout {
        min_frequency: f32,
        growth_factor: f32,
    },
}

/// Result type alias for the spectrum pipeline
pub type Result<T> = std::result::Result<T, AnalysisError>;
