//! Extractor configuration

use serde::{Deserialize, Serialize};
use signal_window::{Taper, WindowSpec};

/// How the descriptor values are combined into output features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeatureMode {
    /// Log-scaled descriptors of the raw window
    #[default]
    Direct,
    /// Orientation between the descriptors of the raw window (`a`) and of
    /// its log-energy transform `ln(x² + ε)` (`b`), as the bounded ratio
    /// `-2ab / (a² + b²)` in [-1, 1] rather than the unbounded difference
    /// `-2ab - (a² + b²)`
    Orientation,
}

/// Feature extractor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Window length and stride in samples
    pub window: WindowSpec,

    /// Data window applied before differencing
    pub taper: Taper,

    /// Output feature combination
    pub mode: FeatureMode,

    /// Emit cross-channel features for every channel pair
    pub include_pairwise: bool,
}

impl Default for ExtractorConfig {
    /// 150-sample windows every 50 samples (150 ms / 50 ms at 1 kHz)
    fn default() -> Self {
        Self {
            window: WindowSpec {
                winsize: 150,
                wininc: 50,
            },
            taper: Taper::Rectangular,
            mode: FeatureMode::Direct,
            include_pairwise: true,
        }
    }
}

impl ExtractorConfig {
    /// Rectangular, direct-mode config with the given window parameters
    ///
    /// Parameters are validated when the extractor is built.
    pub fn new(winsize: usize, wininc: usize) -> Self {
        Self {
            window: WindowSpec { winsize, wininc },
            ..Default::default()
        }
    }

    /// Config for streaming prosthesis control: short windows, dense stride
    pub fn realtime() -> Self {
        Self {
            window: WindowSpec {
                winsize: 128,
                wininc: 32,
            },
            ..Default::default()
        }
    }

    pub fn with_taper(mut self, taper: Taper) -> Self {
        self.taper = taper;
        self
    }

    pub fn with_mode(mut self, mode: FeatureMode) -> Self {
        self.mode = mode;
        self
    }

    /// Drop the pairwise block, keeping 6 features per channel
    pub fn without_pairwise(mut self) -> Self {
        self.include_pairwise = false;
        self
    }
}
