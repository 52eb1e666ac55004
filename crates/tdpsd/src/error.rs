//! Feature Extraction Error Types

use signal_window::ShapeError;
use thiserror::Error;

/// Errors during feature extraction
///
/// All of these are raised before any window is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeatureError {
    /// Invalid signal shape or window parameters
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Single-window extraction on a slice of the wrong length
    #[error("window has {actual} samples, expected {expected}")]
    WindowLength { expected: usize, actual: usize },

    /// Feature values whose width disagrees with their column layout
    #[error("feature matrix has {actual} columns, expected {expected}")]
    ColumnMismatch { expected: usize, actual: usize },
}
