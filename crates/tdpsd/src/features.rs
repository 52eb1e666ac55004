//! Feature Matrix Assembly

use crate::config::{ExtractorConfig, FeatureMode};
use crate::cross::PairFeatures;
use crate::error::FeatureError;
use crate::layout::FeatureLayout;
use crate::moments::{guarded_div, ChannelFeatures, ChannelSignal};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use signal_window::{SignalMatrix, Taper};
use tracing::{debug, trace};

/// Windows × features output, rows in time order
///
/// The value matrix always has exactly `layout.column_count()` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFeatureMatrix")]
pub struct FeatureMatrix {
    /// Feature values, one row per window
    values: Array2<f64>,
    /// Column schema
    layout: FeatureLayout,
}

/// Unchecked serialized form of a feature matrix
#[derive(Deserialize)]
struct RawFeatureMatrix {
    values: Array2<f64>,
    layout: FeatureLayout,
}

impl TryFrom<RawFeatureMatrix> for FeatureMatrix {
    type Error = FeatureError;

    fn try_from(raw: RawFeatureMatrix) -> Result<Self, Self::Error> {
        Self::new(raw.values, raw.layout)
    }
}

impl FeatureMatrix {
    /// Pair a value matrix with its column schema
    pub fn new(values: Array2<f64>, layout: FeatureLayout) -> Result<Self, FeatureError> {
        if values.ncols() != layout.column_count() {
            return Err(FeatureError::ColumnMismatch {
                expected: layout.column_count(),
                actual: values.ncols(),
            });
        }
        Ok(Self { values, layout })
    }

    /// Feature values, one row per window
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Column schema
    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    /// Number of windows (rows)
    pub fn num_windows(&self) -> usize {
        self.values.nrows()
    }

    /// Number of features (columns)
    pub fn num_features(&self) -> usize {
        self.values.ncols()
    }

    /// `(num_windows, num_features)`
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }

    /// Feature vector of window `index`
    pub fn row(&self, index: usize) -> Option<ArrayView1<'_, f64>> {
        (index < self.num_windows()).then(|| self.values.row(index))
    }

    /// Time series of a named feature, e.g. `"ch0_sparsity"`
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.layout
            .column_index(name)
            .filter(|&index| index < self.num_features())
            .map(|index| self.values.column(index))
    }

    pub fn into_values(self) -> Array2<f64> {
        self.values
    }
}

/// TD-PSD feature extractor
///
/// Stateless once built: the same input always yields the same output.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    config: ExtractorConfig,
    /// Taper coefficients for one window, `None` when rectangular
    taper: Option<Array1<f64>>,
}

impl FeatureExtractor {
    /// Create an extractor, validating the window parameters and taper
    pub fn new(config: ExtractorConfig) -> Result<Self, FeatureError> {
        config.window.validate()?;
        let taper = config.taper.coefficients(config.window.winsize)?;
        Ok(Self { config, taper })
    }

    /// Shorthand for a rectangular, direct-mode extractor
    pub fn with_window(winsize: usize, wininc: usize) -> Result<Self, FeatureError> {
        Self::new(ExtractorConfig::new(winsize, wininc))
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Column schema for a signal with `num_channels` channels
    pub fn layout(&self, num_channels: usize) -> FeatureLayout {
        if self.config.include_pairwise {
            FeatureLayout::new(num_channels)
        } else {
            FeatureLayout::per_channel(num_channels)
        }
    }

    /// Extract features from every window of a signal
    ///
    /// Validation happens before any window is processed; on error no
    /// partial output is produced.
    pub fn extract(&self, signal: &SignalMatrix<'_>) -> Result<FeatureMatrix, FeatureError> {
        let windows = signal.windows(self.config.window)?;
        let layout = self.layout(signal.num_channels());
        let num_windows = windows.len();

        debug!(
            "Extracting TD-PSD features: samples={}, channels={}, windows={}, columns={}",
            signal.num_samples(),
            signal.num_channels(),
            num_windows,
            layout.column_count()
        );

        let mut values = Array2::<f64>::zeros((num_windows, layout.column_count()));

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let windows: Vec<_> = windows.collect();
            let rows: Vec<Array1<f64>> = windows
                .par_iter()
                .enumerate()
                .map(|(index, window)| {
                    trace!(window = index, "Computing window features");
                    self.window_row(window.view(), &layout)
                })
                .collect();
            for (mut out, row) in values.axis_iter_mut(Axis(0)).zip(rows) {
                out.assign(&row);
            }
        }

        #[cfg(not(feature = "parallel"))]
        for (index, (mut out, window)) in values.axis_iter_mut(Axis(0)).zip(windows).enumerate() {
            trace!(window = index, "Computing window features");
            out.assign(&self.window_row(window, &layout));
        }

        Ok(FeatureMatrix { values, layout })
    }

    /// Extract the feature vector of a single `winsize`-row window
    pub fn extract_window(&self, window: ArrayView2<'_, f64>) -> Result<Array1<f64>, FeatureError> {
        let expected = self.config.window.winsize;
        if window.nrows() != expected {
            return Err(FeatureError::WindowLength {
                expected,
                actual: window.nrows(),
            });
        }
        // Reuses the matrix checks for empty channel sets
        let signal = SignalMatrix::new(window)?;
        Ok(self.window_row(signal.view(), &self.layout(signal.num_channels())))
    }

    fn window_row(&self, window: ArrayView2<'_, f64>, layout: &FeatureLayout) -> Array1<f64> {
        let tapered = self
            .taper
            .as_ref()
            .map(|coefficients| Taper::apply(window, coefficients));
        let window = match &tapered {
            Some(t) => t.view(),
            None => window.reborrow(),
        };

        let raw = descriptor_row(window, layout);
        match self.config.mode {
            FeatureMode::Direct => raw,
            FeatureMode::Orientation => {
                let transformed = window.mapv(|x| (x * x + f64::EPSILON).ln());
                let nonlinear = descriptor_row(transformed.view(), layout);
                Array1::from_shape_fn(raw.len(), |k| orientation(raw[k], nonlinear[k]))
            }
        }
    }
}

/// Per-channel blocks followed by pairwise blocks for one window
fn descriptor_row(window: ArrayView2<'_, f64>, layout: &FeatureLayout) -> Array1<f64> {
    let channels: Vec<ChannelSignal> = window
        .axis_iter(Axis(1))
        .map(|column| ChannelSignal::new(column.to_vec()))
        .collect();

    let mut row = Vec::with_capacity(layout.column_count());
    for signal in &channels {
        row.extend(ChannelFeatures::compute(signal).to_array());
    }
    for (i, j) in layout.pairs() {
        row.extend(PairFeatures::compute(&channels[i], &channels[j]).to_array());
    }

    let silent = channels.iter().filter(|c| c.energy() == 0.0).count();
    if silent > 0 {
        trace!(silent, "Zero-energy channels mapped to zero features");
    }

    Array1::from_vec(row)
}

/// `-2ab / (a² + b²)`: cosine-style agreement between two descriptor values
fn orientation(raw: f64, nonlinear: f64) -> f64 {
    guarded_div(-2.0 * raw * nonlinear, raw * raw + nonlinear * nonlinear).clamp(-1.0, 1.0)
}
