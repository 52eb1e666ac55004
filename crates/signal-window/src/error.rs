//! Shape Error Types

use thiserror::Error;

/// Errors raised while validating a signal matrix or window parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// Window size must be positive
    #[error("window size must be greater than zero")]
    ZeroWindowSize,

    /// Window increment must be positive
    #[error("window increment must be greater than zero")]
    ZeroWindowIncrement,

    /// Fewer samples than a single window needs
    #[error("signal has {samples} samples, fewer than the window size {winsize}")]
    TooFewSamples { samples: usize, winsize: usize },

    /// No samples or no channels
    #[error("signal matrix is empty ({samples} samples x {channels} channels)")]
    Empty { samples: usize, channels: usize },

    /// Row-wise input with inconsistent channel counts
    #[error("row {row} has {actual} channels, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Channel-wise input with inconsistent sample counts
    #[error("channel {channel} has {actual} samples, expected {expected}")]
    RaggedChannels {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    /// Custom taper does not match the window size
    #[error("taper has {actual} coefficients, expected {expected}")]
    TaperLength { expected: usize, actual: usize },
}
