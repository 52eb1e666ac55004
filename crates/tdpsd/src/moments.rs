//! Time-Domain Spectral Moments
//!
//! Root-squared moments estimated from a channel and its first two discrete
//! derivatives, standing in for the 0th, 2nd and 4th frequency-domain
//! moments (Parseval). Every division and logarithm is guarded so that a
//! silent channel maps to zeros rather than NaN or infinity.

/// Number of features computed per channel
pub const FEATURES_PER_CHANNEL: usize = 6;

/// Exponent of the power normalization applied to every root moment
const POWER: f64 = 0.1;

/// `v^0.1 / 0.1`, compressing the dynamic range of a root moment
pub(crate) fn power_normalize(value: f64) -> f64 {
    value.powf(POWER) / POWER
}

/// `ln|value|`, or 0 when the value is zero or not finite
pub(crate) fn guarded_ln(value: f64) -> f64 {
    if value == 0.0 || !value.is_finite() {
        0.0
    } else {
        value.abs().ln()
    }
}

/// `num / den`, or 0 when the denominator is zero or not finite
pub(crate) fn guarded_div(num: f64, den: f64) -> f64 {
    if den == 0.0 || !den.is_finite() {
        0.0
    } else {
        num / den
    }
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn abs_sum(values: &[f64]) -> f64 {
    values.iter().map(|v| v.abs()).sum()
}

fn diff(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// One channel of one window, with its first and second differences
#[derive(Debug, Clone)]
pub struct ChannelSignal {
    samples: Vec<f64>,
    d1: Vec<f64>,
    d2: Vec<f64>,
}

impl ChannelSignal {
    /// Precompute the derivatives of a window's samples
    pub fn new(samples: Vec<f64>) -> Self {
        let d1 = diff(&samples);
        let d2 = diff(&d1);
        Self { samples, d1, d2 }
    }

    /// Window length in samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Raw samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// First discrete difference
    pub fn first_difference(&self) -> &[f64] {
        &self.d1
    }

    /// Second discrete difference
    pub fn second_difference(&self) -> &[f64] {
        &self.d2
    }

    /// Sum of squares of the raw samples
    pub fn energy(&self) -> f64 {
        dot(&self.samples, &self.samples)
    }

    /// Summed absolute first difference (waveform length)
    pub fn waveform_length(&self) -> f64 {
        abs_sum(&self.d1)
    }

    /// Summed absolute second difference
    pub fn derivative_waveform_length(&self) -> f64 {
        abs_sum(&self.d2)
    }
}

/// Power-normalized root moments of orders 0, 2 and 4
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RootMoments {
    pub m0: f64,
    pub m2: f64,
    pub m4: f64,
}

impl RootMoments {
    /// Build from the three energies of a window of `len` samples
    ///
    /// The derivative energies are averaged over `len - 1`; a single-sample
    /// window has no derivatives and yields `m2 = m4 = 0`.
    pub fn from_energies(e0: f64, e2: f64, e4: f64, len: usize) -> Self {
        let norm = len.saturating_sub(1) as f64;
        Self {
            m0: power_normalize(e0.sqrt()),
            m2: power_normalize(guarded_div(e2, norm).sqrt()),
            m4: power_normalize(guarded_div(e4, norm).sqrt()),
        }
    }

    /// Log-scaled `[m0, m0 - m2, m0 - m4]`
    pub fn log_moments(&self) -> [f64; 3] {
        [
            guarded_ln(self.m0),
            guarded_ln(self.m0 - self.m2),
            guarded_ln(self.m0 - self.m4),
        ]
    }
}

/// The six TD-PSD features of one channel, already log-scaled
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelFeatures {
    /// ln(m0)
    pub m0: f64,
    /// ln(m0 - m2)
    pub m2: f64,
    /// ln(m0 - m4)
    pub m4: f64,
    /// ln(m0 / sqrt((m0 - m2)(m0 - m4)))
    pub sparsity: f64,
    /// ln(m2 / sqrt(m0 m4))
    pub irregularity: f64,
    /// ln(waveform length of d1 / waveform length of d2)
    pub waveform_length_ratio: f64,
}

impl ChannelFeatures {
    /// Compute the features of a single channel
    pub fn compute(signal: &ChannelSignal) -> Self {
        let moments = RootMoments::from_energies(
            signal.energy(),
            dot(&signal.d1, &signal.d1),
            dot(&signal.d2, &signal.d2),
            signal.len(),
        );
        let RootMoments { m0, m2, m4 } = moments;
        let [log_m0, log_m2, log_m4] = moments.log_moments();

        let sparsity = guarded_div(m0, ((m0 - m2) * (m0 - m4)).abs().sqrt());
        let irregularity = guarded_div(m2, (m0 * m4).sqrt());
        let waveform_length_ratio =
            guarded_div(signal.waveform_length(), signal.derivative_waveform_length());

        Self {
            m0: log_m0,
            m2: log_m2,
            m4: log_m4,
            sparsity: guarded_ln(sparsity),
            irregularity: guarded_ln(irregularity),
            waveform_length_ratio: guarded_ln(waveform_length_ratio),
        }
    }

    /// Features in column order
    pub fn to_array(&self) -> [f64; FEATURES_PER_CHANNEL] {
        [
            self.m0,
            self.m2,
            self.m4,
            self.sparsity,
            self.irregularity,
            self.waveform_length_ratio,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(len: usize, cycles: f64, amplitude: f64) -> Vec<f64> {
        (0..len)
            .map(|i| amplitude * (2.0 * std::f64::consts::PI * cycles * i as f64 / len as f64).sin())
            .collect()
    }

    #[test]
    fn test_guards() {
        assert_eq!(guarded_ln(0.0), 0.0);
        assert_eq!(guarded_ln(f64::NAN), 0.0);
        assert_eq!(guarded_ln(f64::INFINITY), 0.0);
        assert!((guarded_ln(-std::f64::consts::E) - 1.0).abs() < 1e-12);
        assert_eq!(guarded_div(1.0, 0.0), 0.0);
        assert_eq!(guarded_div(6.0, 3.0), 2.0);
    }

    #[test]
    fn test_power_normalize() {
        assert_eq!(power_normalize(0.0), 0.0);
        assert!((power_normalize(1.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_derivatives() {
        let signal = ChannelSignal::new(vec![1.0, 4.0, 9.0, 16.0]);
        assert_eq!(signal.first_difference(), &[3.0, 5.0, 7.0]);
        assert_eq!(signal.second_difference(), &[2.0, 2.0]);
        assert_eq!(signal.energy(), 1.0 + 16.0 + 81.0 + 256.0);
        assert_eq!(signal.waveform_length(), 15.0);
        assert_eq!(signal.derivative_waveform_length(), 4.0);
    }

    #[test]
    fn test_silent_channel_is_all_zero() {
        let features = ChannelFeatures::compute(&ChannelSignal::new(vec![0.0; 64]));
        assert_eq!(features.to_array(), [0.0; FEATURES_PER_CHANNEL]);
    }

    #[test]
    fn test_constant_channel_is_finite() {
        let features = ChannelFeatures::compute(&ChannelSignal::new(vec![2.5; 32]));
        assert!(features.to_array().iter().all(|v| v.is_finite()));
        // No derivative energy: irregularity and waveform ratio collapse to 0
        assert_eq!(features.irregularity, 0.0);
        assert_eq!(features.waveform_length_ratio, 0.0);
    }

    #[test]
    fn test_single_sample_window() {
        let features = ChannelFeatures::compute(&ChannelSignal::new(vec![3.0]));
        let expected = power_normalize(3.0).ln();
        assert!((features.m0 - expected).abs() < 1e-12);
        assert!((features.m2 - expected).abs() < 1e-12);
        assert!(features.to_array().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_moment_values() {
        let signal = ChannelSignal::new(vec![1.0, -1.0, 1.0, -1.0, 1.0]);
        let moments = RootMoments::from_energies(
            signal.energy(),
            dot(signal.first_difference(), signal.first_difference()),
            dot(signal.second_difference(), signal.second_difference()),
            signal.len(),
        );
        // e0 = 5, e2 = 4 * 4 = 16, e4 = 3 * 16 = 48, normalized by 4
        assert!((moments.m0 - power_normalize(5f64.sqrt())).abs() < 1e-12);
        assert!((moments.m2 - power_normalize(2.0)).abs() < 1e-12);
        assert!((moments.m4 - power_normalize(12f64.sqrt())).abs() < 1e-12);
    }

    #[test]
    fn test_faster_signal_has_lower_waveform_ratio() {
        // d2/d1 grows with frequency, so the waveform-length ratio falls
        let slow = ChannelFeatures::compute(&ChannelSignal::new(sine(256, 4.0, 1.0)));
        let fast = ChannelFeatures::compute(&ChannelSignal::new(sine(256, 32.0, 1.0)));
        assert!(slow.waveform_length_ratio > fast.waveform_length_ratio);
    }

    #[test]
    fn test_ratio_features_ignore_amplitude() {
        let base = ChannelFeatures::compute(&ChannelSignal::new(sine(200, 7.0, 1.0)));
        let loud = ChannelFeatures::compute(&ChannelSignal::new(sine(200, 7.0, 250.0)));
        let shift = 0.1 * 250f64.ln();

        assert!((loud.m0 - base.m0 - shift).abs() < 1e-9);
        assert!((loud.m2 - base.m2 - shift).abs() < 1e-9);
        assert!((loud.m4 - base.m4 - shift).abs() < 1e-9);
        assert!((loud.sparsity - base.sparsity).abs() < 1e-9);
        assert!((loud.irregularity - base.irregularity).abs() < 1e-9);
        assert!((loud.waveform_length_ratio - base.waveform_length_ratio).abs() < 1e-9);
    }
}
