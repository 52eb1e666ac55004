//! Feature Column Layout
//!
//! Per-channel blocks come first, ordered by channel index, followed by
//! pairwise blocks ordered lexicographically over `(i, j)` with `i < j`.

use crate::cross::FEATURES_PER_PAIR;
use crate::moments::FEATURES_PER_CHANNEL;
use serde::{Deserialize, Serialize};

const CHANNEL_FEATURE_NAMES: [&str; FEATURES_PER_CHANNEL] =
    ["m0", "m2", "m4", "sparsity", "irregularity", "wlr"];

const PAIR_FEATURE_NAMES: [&str; FEATURES_PER_PAIR] = ["m0", "m2", "m4", "wlr"];

/// Column schema of a feature matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureLayout {
    num_channels: usize,
    include_pairwise: bool,
}

impl FeatureLayout {
    /// Layout with per-channel and pairwise blocks
    pub fn new(num_channels: usize) -> Self {
        Self {
            num_channels,
            include_pairwise: true,
        }
    }

    /// Layout with per-channel blocks only
    pub fn per_channel(num_channels: usize) -> Self {
        Self {
            num_channels,
            include_pairwise: false,
        }
    }

    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    pub fn includes_pairwise(&self) -> bool {
        self.include_pairwise
    }

    /// C(num_channels, 2), or 0 when pairwise features are off
    pub fn num_pairs(&self) -> usize {
        if self.include_pairwise && self.num_channels >= 2 {
            self.num_channels * (self.num_channels - 1) / 2
        } else {
            0
        }
    }

    /// Width of the per-channel block
    pub fn channel_columns(&self) -> usize {
        FEATURES_PER_CHANNEL * self.num_channels
    }

    /// Total number of feature columns
    pub fn column_count(&self) -> usize {
        self.channel_columns() + FEATURES_PER_PAIR * self.num_pairs()
    }

    /// Channel pairs in column order
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = if self.num_pairs() > 0 { self.num_channels } else { 0 };
        (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
    }

    /// First column of channel `channel`'s block
    pub fn channel_offset(&self, channel: usize) -> usize {
        channel * FEATURES_PER_CHANNEL
    }

    /// First column of the block of pair `(i, j)`, `i < j`
    pub fn pair_offset(&self, i: usize, j: usize) -> Option<usize> {
        if !self.include_pairwise || i >= j || j >= self.num_channels {
            return None;
        }
        let n = self.num_channels;
        // Pairs before row i: (n-1) + (n-2) + ... + (n-i)
        let index = i * (2 * n - i - 1) / 2 + (j - i - 1);
        Some(self.channel_columns() + index * FEATURES_PER_PAIR)
    }

    /// Human-readable name of every column, in order
    pub fn column_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.column_count());
        for channel in 0..self.num_channels {
            for feature in CHANNEL_FEATURE_NAMES {
                names.push(format!("ch{channel}_{feature}"));
            }
        }
        for (i, j) in self.pairs() {
            for feature in PAIR_FEATURE_NAMES {
                names.push(format!("ch{i}_ch{j}_{feature}"));
            }
        }
        names
    }

    /// Column index of a named feature
    ///
    /// Parses the name directly; no name list is built.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let (first, rest) = split_channel(name)?;
        if let Some((second, feature)) = split_channel(rest) {
            let k = PAIR_FEATURE_NAMES.iter().position(|&f| f == feature)?;
            return self.pair_offset(first, second).map(|offset| offset + k);
        }
        if first >= self.num_channels {
            return None;
        }
        let k = CHANNEL_FEATURE_NAMES.iter().position(|&f| f == rest)?;
        Some(self.channel_offset(first) + k)
    }
}

/// Split `ch{index}_{rest}` into the channel index and the remainder
fn split_channel(name: &str) -> Option<(usize, &str)> {
    let (digits, rest) = name.strip_prefix("ch")?.split_once('_')?;
    // Digits only, no sign or leading zeros
    if digits.is_empty()
        || !digits.bytes().all(|b| b.is_ascii_digit())
        || (digits.len() > 1 && digits.starts_with('0'))
    {
        return None;
    }
    Some((digits.parse().ok()?, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_two_channel_layout() {
        let layout = FeatureLayout::new(2);
        assert_eq!(layout.num_pairs(), 1);
        assert_eq!(layout.column_count(), 16);
        assert_eq!(layout.pairs().collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(layout.pair_offset(0, 1), Some(12));
    }

    #[test]
    fn test_single_channel_has_no_pairs() {
        let layout = FeatureLayout::new(1);
        assert_eq!(layout.num_pairs(), 0);
        assert_eq!(layout.column_count(), 6);
        assert_eq!(layout.pairs().count(), 0);
        assert_eq!(layout.pair_offset(0, 0), None);
    }

    #[test]
    fn test_per_channel_only() {
        let layout = FeatureLayout::per_channel(4);
        assert_eq!(layout.column_count(), 24);
        assert_eq!(layout.pairs().count(), 0);
        assert_eq!(layout.pair_offset(0, 1), None);
    }

    #[test]
    fn test_pair_order_is_lexicographic() {
        let layout = FeatureLayout::new(4);
        let pairs: Vec<_> = layout.pairs().collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn test_column_names() {
        let names = FeatureLayout::new(3).column_names();
        assert_eq!(names.len(), 18 + 12);
        assert_eq!(names[0], "ch0_m0");
        assert_eq!(names[5], "ch0_wlr");
        assert_eq!(names[6], "ch1_m0");
        assert_eq!(names[18], "ch0_ch1_m0");
        assert_eq!(names[29], "ch1_ch2_wlr");
        assert_eq!(FeatureLayout::new(3).column_index("ch0_ch2_m4"), Some(24));
        assert_eq!(FeatureLayout::new(3).column_index("ch3_m0"), None);
    }

    #[test]
    fn test_column_index_rejects_malformed_names() {
        let layout = FeatureLayout::new(3);
        for name in [
            "", "ch", "ch_m0", "chx_m0", "ch+1_m0", "ch01_m0", "ch0", "ch0_", "ch0_wl",
            "ch0_m0_", "ch1_ch0_m0", "ch0_ch0_m0", "ch0_ch3_m0", "ch0_ch1_sparsity",
            "ch0_ch1_ch2_m0", "ch99999999999999999999999_m0",
        ] {
            assert_eq!(layout.column_index(name), None, "{name}");
        }
        assert_eq!(FeatureLayout::per_channel(3).column_index("ch0_ch1_m0"), None);
        assert_eq!(FeatureLayout::per_channel(3).column_index("ch2_wlr"), Some(17));
    }

    proptest! {
        #[test]
        fn pair_offsets_follow_enumeration(channels in 1usize..12) {
            let layout = FeatureLayout::new(channels);
            prop_assert_eq!(
                layout.column_count(),
                6 * channels + 4 * channels * (channels - 1) / 2
            );
            for (k, (i, j)) in layout.pairs().enumerate() {
                prop_assert_eq!(
                    layout.pair_offset(i, j),
                    Some(layout.channel_columns() + k * FEATURES_PER_PAIR)
                );
            }
            prop_assert_eq!(layout.column_names().len(), layout.column_count());
        }

        #[test]
        fn column_index_inverts_column_names(channels in 1usize..12, pairwise: bool) {
            let layout = if pairwise {
                FeatureLayout::new(channels)
            } else {
                FeatureLayout::per_channel(channels)
            };
            for (index, name) in layout.column_names().iter().enumerate() {
                prop_assert_eq!(layout.column_index(name), Some(index));
            }
        }
    }
}
