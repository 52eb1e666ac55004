//! Sliding Windows

use crate::error::ShapeError;
use ndarray::{s, ArrayView2};
use serde::{Deserialize, Serialize};

/// Window length and stride, both in samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Samples per analysis window
    pub winsize: usize,
    /// Stride between consecutive window starts
    pub wininc: usize,
}

impl WindowSpec {
    /// Create a window spec, rejecting zero size or stride
    pub fn new(winsize: usize, wininc: usize) -> Result<Self, ShapeError> {
        let spec = Self { winsize, wininc };
        spec.validate()?;
        Ok(spec)
    }

    /// Check the size and stride are positive
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.winsize == 0 {
            return Err(ShapeError::ZeroWindowSize);
        }
        if self.wininc == 0 {
            return Err(ShapeError::ZeroWindowIncrement);
        }
        Ok(())
    }

    /// Number of whole windows that fit in `num_samples`
    pub fn num_windows(&self, num_samples: usize) -> Result<usize, ShapeError> {
        self.validate()?;
        if num_samples < self.winsize {
            return Err(ShapeError::TooFewSamples {
                samples: num_samples,
                winsize: self.winsize,
            });
        }
        Ok((num_samples - self.winsize) / self.wininc + 1)
    }

    /// Start offset of window `index`
    pub fn offset(&self, index: usize) -> usize {
        index * self.wininc
    }
}

/// Iterator over the windows of a signal matrix, in time order
pub struct SlidingWindows<'a> {
    data: ArrayView2<'a, f64>,
    spec: WindowSpec,
    next: usize,
    count: usize,
}

impl<'a> SlidingWindows<'a> {
    pub(crate) fn new(data: ArrayView2<'a, f64>, spec: WindowSpec) -> Result<Self, ShapeError> {
        let count = spec.num_windows(data.nrows())?;
        Ok(Self {
            data,
            spec,
            next: 0,
            count,
        })
    }
}

impl<'a> Iterator for SlidingWindows<'a> {
    type Item = ArrayView2<'a, f64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let start = self.spec.offset(self.next);
        self.next += 1;
        Some(self.data.slice_move(s![start..start + self.spec.winsize, ..]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlidingWindows<'_> {}
