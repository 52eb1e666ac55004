//! Tapering Windows
//!
//! Data windows multiplied into each analysis window before feature
//! computation. Rectangular leaves the samples untouched.

use crate::error::ShapeError;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Data window applied sample-wise to every channel of a window
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Taper {
    /// No weighting
    #[default]
    Rectangular,
    /// Hamming window (0.54 - 0.46 cos)
    Hamming,
    /// Hann window (0.5 - 0.5 cos)
    Hann,
    /// Caller-supplied coefficients, one per window sample
    Custom(Vec<f64>),
}

impl Taper {
    /// Coefficients for a window of `len` samples, `None` for rectangular
    pub fn coefficients(&self, len: usize) -> Result<Option<Array1<f64>>, ShapeError> {
        match self {
            Taper::Rectangular => Ok(None),
            Taper::Hamming => Ok(Some(cosine_window(len, 0.54, 0.46))),
            Taper::Hann => Ok(Some(cosine_window(len, 0.5, 0.5))),
            Taper::Custom(coefficients) => {
                if coefficients.len() != len {
                    return Err(ShapeError::TaperLength {
                        expected: len,
                        actual: coefficients.len(),
                    });
                }
                Ok(Some(Array1::from_vec(coefficients.clone())))
            }
        }
    }

    /// Apply precomputed coefficients to a window, one weight per row
    pub fn apply(window: ArrayView2<'_, f64>, coefficients: &Array1<f64>) -> Array2<f64> {
        let weights = coefficients.view().insert_axis(Axis(1));
        &window * &weights
    }
}

/// Symmetric generalized cosine window `a - b cos(2πi / (n - 1))`
fn cosine_window(len: usize, a: f64, b: f64) -> Array1<f64> {
    if len == 1 {
        return Array1::ones(1);
    }
    let denom = (len - 1) as f64;
    Array1::from_shape_fn(len, |i| a - b * (2.0 * PI * i as f64 / denom).cos())
}
