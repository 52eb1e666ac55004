//! Signal Windowing
//!
//! Validated samples × channels matrices, sliding analysis windows, and
//! tapering windows for multichannel EMG recordings.

mod error;
mod matrix;
mod taper;
mod window;

pub use error::ShapeError;
pub use matrix::SignalMatrix;
pub use taper::Taper;
pub use window::{SlidingWindows, WindowSpec};
