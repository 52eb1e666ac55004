//! Cross-Channel Features
//!
//! Pairwise analogue of the per-channel moments: same-channel dot products
//! are replaced by cross products between the two channels (and their
//! derivatives), plus the waveform-length ratio of the difference signal.

use crate::moments::{dot, guarded_div, guarded_ln, ChannelSignal, RootMoments};

/// Number of features computed per channel pair
pub const FEATURES_PER_PAIR: usize = 4;

fn abs_diff_sum(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// The four cross features of an unordered channel pair, log-scaled
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PairFeatures {
    /// ln(c0) with c0 from |Σ x_i x_j|
    pub m0: f64,
    /// ln(c0 - c2) with c2 from |Σ d1_i d1_j|
    pub m2: f64,
    /// ln(c0 - c4) with c4 from |Σ d2_i d2_j|
    pub m4: f64,
    /// ln(Σ|d1_i - d1_j| / Σ|d2_i - d2_j|)
    pub waveform_length_ratio: f64,
}

impl PairFeatures {
    /// Compute the cross features of two channels from the same window
    pub fn compute(a: &ChannelSignal, b: &ChannelSignal) -> Self {
        let moments = RootMoments::from_energies(
            dot(a.samples(), b.samples()).abs(),
            dot(a.first_difference(), b.first_difference()).abs(),
            dot(a.second_difference(), b.second_difference()).abs(),
            a.len(),
        );
        let [m0, m2, m4] = moments.log_moments();

        let waveform_length_ratio = guarded_div(
            abs_diff_sum(a.first_difference(), b.first_difference()),
            abs_diff_sum(a.second_difference(), b.second_difference()),
        );

        Self {
            m0,
            m2,
            m4,
            waveform_length_ratio: guarded_ln(waveform_length_ratio),
        }
    }

    /// Features in column order
    pub fn to_array(&self) -> [f64; FEATURES_PER_PAIR] {
        [self.m0, self.m2, self.m4, self.waveform_length_ratio]
    }
}
