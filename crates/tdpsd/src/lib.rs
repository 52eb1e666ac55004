//! TD-PSD Feature Extraction
//!
//! Time-domain power spectral descriptors for multichannel EMG, as used for
//! myoelectric control of multifunctional prostheses. Each analysis window
//! yields 6 features per channel (three log-scaled root moments, sparsity,
//! irregularity factor, waveform-length ratio) followed by 4 cross features
//! per unordered channel pair.
//!
//! ```no_run
//! use ndarray::Array2;
//!
//! let emg = Array2::<f64>::zeros((1000, 8));
//! let features = tdpsd::extract(emg.view(), 150, 50)?;
//! assert_eq!(features.shape(), (18, 6 * 8 + 4 * 28));
//! # Ok::<(), tdpsd::FeatureError>(())
//! ```

mod config;
mod cross;
mod error;
mod features;
mod layout;
mod moments;

pub use config::{ExtractorConfig, FeatureMode};
pub use cross::{PairFeatures, FEATURES_PER_PAIR};
pub use error::FeatureError;
pub use features::{FeatureExtractor, FeatureMatrix};
pub use layout::FeatureLayout;
pub use moments::{ChannelFeatures, ChannelSignal, RootMoments, FEATURES_PER_CHANNEL};
pub use signal_window::{ShapeError, SignalMatrix, Taper, WindowSpec};

use ndarray::ArrayView2;

/// Extract TD-PSD features from a samples × channels matrix
///
/// Rectangular windows of `winsize` samples every `wininc` samples,
/// per-channel and pairwise features.
pub fn extract(
    x: ArrayView2<'_, f64>,
    winsize: usize,
    wininc: usize,
) -> Result<FeatureMatrix, FeatureError> {
    let extractor = FeatureExtractor::with_window(winsize, wininc)?;
    let signal = SignalMatrix::new(x)?;
    extractor.extract(&signal)
}
