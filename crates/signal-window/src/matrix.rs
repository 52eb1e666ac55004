//! Validated Signal Matrix

use crate::error::ShapeError;
use crate::window::{SlidingWindows, WindowSpec};
use ndarray::{Array2, ArrayView2, CowArray, Ix2};
use tracing::debug;

/// Samples × channels matrix of real-valued recordings
///
/// Rows are time samples, columns are channels. Construction guarantees at
/// least one sample and one channel.
#[derive(Debug, Clone)]
pub struct SignalMatrix<'a> {
    data: CowArray<'a, f64, Ix2>,
}

impl<'a> SignalMatrix<'a> {
    /// Wrap a borrowed samples × channels view
    pub fn new(data: ArrayView2<'a, f64>) -> Result<Self, ShapeError> {
        check_not_empty(data.nrows(), data.ncols())?;
        Ok(Self { data: data.into() })
    }

    /// Build from one vector per time sample
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<SignalMatrix<'static>, ShapeError> {
        let channels = rows.first().map(Vec::len).unwrap_or(0);
        check_not_empty(rows.len(), channels)?;

        for (row, samples) in rows.iter().enumerate() {
            if samples.len() != channels {
                return Err(ShapeError::RaggedRows {
                    row,
                    expected: channels,
                    actual: samples.len(),
                });
            }
        }

        let data = Array2::from_shape_fn((rows.len(), channels), |(r, c)| rows[r][c]);
        debug!(samples = rows.len(), channels, "Built signal matrix from rows");
        Ok(SignalMatrix { data: data.into() })
    }

    /// Build from one vector per channel
    pub fn from_channels(channels: &[Vec<f64>]) -> Result<SignalMatrix<'static>, ShapeError> {
        let samples = channels.first().map(Vec::len).unwrap_or(0);
        check_not_empty(samples, channels.len())?;

        for (channel, data) in channels.iter().enumerate() {
            if data.len() != samples {
                return Err(ShapeError::RaggedChannels {
                    channel,
                    expected: samples,
                    actual: data.len(),
                });
            }
        }

        let data = Array2::from_shape_fn((samples, channels.len()), |(r, c)| channels[c][r]);
        Ok(SignalMatrix { data: data.into() })
    }

    /// Number of time samples
    pub fn num_samples(&self) -> usize {
        self.data.nrows()
    }

    /// Number of channels
    pub fn num_channels(&self) -> usize {
        self.data.ncols()
    }

    /// Borrow the underlying samples
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }

    /// Iterate over windows in time order
    ///
    /// Fails before yielding anything if the window parameters are invalid or the signal
    /// is shorter than one window.
    pub fn windows(&self, spec: WindowSpec) -> Result<SlidingWindows<'_>, ShapeError> {
        SlidingWindows::new(self.data.view(), spec)
    }
}

fn check_not_empty(samples: usize, channels: usize) -> Result<(), ShapeError> {
    if samples == 0 || channels == 0 {
        return Err(ShapeError::Empty { samples, channels });
    }
    Ok(())
}
