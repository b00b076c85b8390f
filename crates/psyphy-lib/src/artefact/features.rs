//! Per-epoch feature extraction: derivative statistics of the raw and
//! low-passed signal plus summaries of two Haar detail streams.

use crate::dsp::wavelet::haar_wavedec;
use crate::signal::EPOCH_SAMPLES;
use serde::{Deserialize, Serialize};

/// Rows of the one-second wavelet stream per epoch.
const ONE_SECOND_ROWS: usize = 5;
/// Rows of the half-second wavelet stream per epoch.
const HALF_SECOND_ROWS: usize = 10;

pub const N_EPOCH_FEATURES: usize = 43;

/// Canonical feature order; index positions are what the classifier was trained on.
pub const FEATURE_NAMES: [&str; N_EPOCH_FEATURES] = [
    "raw_amp",
    "raw_maxd",
    "raw_mind",
    "raw_maxabsd",
    "raw_avgabsd",
    "raw_max2d",
    "raw_min2d",
    "raw_maxabs2d",
    "raw_avgabs2d",
    "filt_amp",
    "filt_maxd",
    "filt_mind",
    "filt_maxabsd",
    "filt_avgabsd",
    "filt_max2d",
    "filt_min2d",
    "filt_maxabs2d",
    "filt_avgabs2d",
    "max_1s_1",
    "max_1s_2",
    "max_1s_3",
    "mean_1s_1",
    "mean_1s_2",
    "mean_1s_3",
    "std_1s_1",
    "std_1s_2",
    "std_1s_3",
    "median_1s_1",
    "median_1s_2",
    "median_1s_3",
    "aboveZero_1s_1",
    "aboveZero_1s_2",
    "aboveZero_1s_3",
    "max_Hs_1",
    "max_Hs_2",
    "mean_Hs_1",
    "mean_Hs_2",
    "std_Hs_1",
    "std_Hs_2",
    "median_Hs_1",
    "median_Hs_2",
    "aboveZero_Hs_1",
    "aboveZero_Hs_2",
];

/// Positions in [`FEATURE_NAMES`] fed to the binary classifier, in model order.
pub const BINARY_FEATURES: [usize; 13] = [0, 3, 5, 8, 9, 15, 16, 18, 21, 24, 25, 26, 29];

/// Aggregated Haar detail coefficients at 1 Hz and 2 Hz resolution.
#[derive(Debug, Clone, Default)]
pub struct WaveletStreams {
    /// `[max|d1|, max|d2|, |d3|]` per second.
    pub one_second: Vec<[f64; 3]>,
    /// `[max|d1|, |d2|]` per half second.
    pub half_second: Vec<[f64; 2]>,
}

impl WaveletStreams {
    /// Build both streams from an 8 Hz signal. Trailing partial windows are dropped.
    pub fn from_signal(data: &[f64]) -> Self {
        let dec = haar_wavedec(data, 3);
        let (d1, d2, d3) = (&dec.details[0], &dec.details[1], &dec.details[2]);

        let one_second = (0..data.len() / 8)
            .map(|i| {
                [
                    max_abs(&d1[4 * i..4 * i + 4]),
                    max_abs(&d2[2 * i..2 * i + 2]),
                    d3[i].abs(),
                ]
            })
            .collect();
        let half_second = (0..data.len() / 4)
            .map(|i| [max_abs(&d1[2 * i..2 * i + 2]), d2[i].abs()])
            .collect();

        Self {
            one_second,
            half_second,
        }
    }
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |m, v| m.max(v.abs()))
}

/// Central first and second differences over the interior points of `window`.
pub fn derivatives(window: &[f64]) -> (Vec<f64>, Vec<f64>) {
    window
        .windows(3)
        .map(|w| ((w[2] - w[0]) / 2.0, w[2] - 2.0 * w[1] + w[0]))
        .unzip()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivativeStats {
    pub max: f64,
    pub min: f64,
    pub max_abs: f64,
    pub mean_abs: f64,
}

impl DerivativeStats {
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max_abs = max_abs(values);
        let mean_abs = values.iter().map(|v| v.abs()).sum::<f64>() / values.len() as f64;
        Self {
            max,
            min,
            max_abs,
            mean_abs,
        }
    }
}

/// Mean level plus first/second derivative statistics of one epoch window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalStats {
    pub amp: f64,
    pub first: DerivativeStats,
    pub second: DerivativeStats,
}

impl SignalStats {
    pub fn from_window(window: &[f64]) -> Self {
        if window.is_empty() {
            return Self::default();
        }
        let amp = window.iter().sum::<f64>() / window.len() as f64;
        let (d1, d2) = derivatives(window);
        Self {
            amp,
            first: DerivativeStats::from_values(&d1),
            second: DerivativeStats::from_values(&d2),
        }
    }

    fn write_into(&self, out: &mut Vec<f64>) {
        out.extend_from_slice(&[
            self.amp,
            self.first.max,
            self.first.min,
            self.first.max_abs,
            self.first.mean_abs,
            self.second.max,
            self.second.min,
            self.second.max_abs,
            self.second.mean_abs,
        ]);
    }
}

/// Summary of one wavelet column over an epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation (n - 1).
    pub std: f64,
    pub median: f64,
    pub above_zero: f64,
}

impl ColumnStats {
    pub fn from_values(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self::default();
        }
        let mean = values.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };
        Self {
            max: sorted[n - 1],
            mean,
            std,
            median,
            above_zero: values.iter().filter(|v| **v > 0.0).count() as f64,
        }
    }
}

fn column_stats<const K: usize>(rows: &[[f64; K]]) -> [ColumnStats; K] {
    std::array::from_fn(|c| {
        let column: Vec<f64> = rows.iter().map(|r| r[c]).collect();
        ColumnStats::from_values(&column)
    })
}

/// Stat-major layout: all maxima, then all means, and so on.
fn write_columns(columns: &[ColumnStats], out: &mut Vec<f64>) {
    let getters: [fn(&ColumnStats) -> f64; 5] = [
        |c| c.max,
        |c| c.mean,
        |c| c.std,
        |c| c.median,
        |c| c.above_zero,
    ];
    for get in getters {
        out.extend(columns.iter().map(get));
    }
}

/// Assembled features of one epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub raw: SignalStats,
    pub filtered: SignalStats,
    pub one_second: [ColumnStats; 3],
    pub half_second: [ColumnStats; 2],
}

impl FeatureVector {
    pub fn to_array(&self) -> [f64; N_EPOCH_FEATURES] {
        let mut out = Vec::with_capacity(N_EPOCH_FEATURES);
        self.raw.write_into(&mut out);
        self.filtered.write_into(&mut out);
        write_columns(&self.one_second, &mut out);
        write_columns(&self.half_second, &mut out);
        let mut arr = [0.0; N_EPOCH_FEATURES];
        arr.copy_from_slice(&out);
        arr
    }

    /// The classifier's input subset, see [`BINARY_FEATURES`].
    pub fn binary_inputs(&self) -> [f64; BINARY_FEATURES.len()] {
        let all = self.to_array();
        BINARY_FEATURES.map(|i| all[i])
    }
}

/// One feature vector per 5 s epoch of an 8 Hz signal.
///
/// Each epoch reads the closed window `[start, start + 5 s]`, clipped to the
/// data. Windows too short to summarise yield an all-zero vector.
pub fn extract_features(raw: &[f64], filtered: &[f64]) -> Vec<FeatureVector> {
    let n = raw.len().min(filtered.len());
    let streams = WaveletStreams::from_signal(&raw[..n]);

    (0..n.div_ceil(EPOCH_SAMPLES))
        .map(|i| {
            let start = i * EPOCH_SAMPLES;
            let end = (start + EPOCH_SAMPLES + 1).min(n);
            let one = clip(&streams.one_second, i * ONE_SECOND_ROWS, ONE_SECOND_ROWS + 1);
            let half = clip(&streams.half_second, i * HALF_SECOND_ROWS, HALF_SECOND_ROWS + 1);
            if end - start < 3 || one.len() < 2 || half.len() < 2 {
                return FeatureVector::default();
            }
            FeatureVector {
                raw: SignalStats::from_window(&raw[start..end]),
                filtered: SignalStats::from_window(&filtered[start..end]),
                one_second: column_stats(one),
                half_second: column_stats(half),
            }
        })
        .collect()
}

fn clip<T>(rows: &[T], start: usize, len: usize) -> &[T] {
    let start = start.min(rows.len());
    &rows[start..(start + len).min(rows.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_subset_names() {
        let names: Vec<&str> = BINARY_FEATURES.iter().map(|&i| FEATURE_NAMES[i]).collect();
        assert_eq!(
            names,
            vec![
                "raw_amp",
                "raw_maxabsd",
                "raw_max2d",
                "raw_avgabs2d",
                "filt_amp",
                "filt_min2d",
                "filt_maxabs2d",
                "max_1s_1",
                "mean_1s_1",
                "std_1s_1",
                "std_1s_2",
                "std_1s_3",
                "median_1s_3",
            ]
        );
    }

    #[test]
    fn derivative_stencils() {
        let (d1, d2) = derivatives(&[0.0, 1.0, 4.0, 9.0]);
        assert_eq!(d1, vec![2.0, 4.0]);
        assert_eq!(d2, vec![2.0, 2.0]);
        let s = DerivativeStats::from_values(&[-3.0, 1.0, 2.0]);
        assert_eq!(s.max, 2.0);
        assert_eq!(s.min, -3.0);
        assert_eq!(s.max_abs, 3.0);
        assert!((s.mean_abs - 2.0).abs() < 1e-12);
    }

    #[test]
    fn column_stats_match_pandas_describe() {
        let c = ColumnStats::from_values(&[0.0, 1.0, 3.0, 4.0]);
        assert_eq!(c.max, 4.0);
        assert_eq!(c.mean, 2.0);
        assert!((c.std - (10.0_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(c.median, 2.0);
        assert_eq!(c.above_zero, 3.0);
        assert_eq!(ColumnStats::from_values(&[5.0]).std, 0.0);
    }

    #[test]
    fn stream_lengths_follow_signal_length() {
        let streams = WaveletStreams::from_signal(&vec![1.0; 403]);
        assert_eq!(streams.one_second.len(), 50);
        assert_eq!(streams.half_second.len(), 100);
    }

    #[test]
    fn zero_signal_has_zero_wavelet_features() {
        let zeros = vec![0.0; 400];
        let features = extract_features(&zeros, &zeros);
        assert_eq!(features.len(), 10);
        for f in &features {
            let arr = f.to_array();
            assert!(arr[18..].iter().all(|v| *v == 0.0));
        }
    }

    #[test]
    fn short_tail_epoch_is_zeroed() {
        let data: Vec<f64> = (0..402).map(|i| (i as f64 * 0.3).sin() + 2.0).collect();
        let features = extract_features(&data, &data);
        assert_eq!(features.len(), 11);
        assert_eq!(features[10], FeatureVector::default());
        assert!(features[9].raw.amp > 1.0);
    }

    #[test]
    fn array_layout_is_stat_major() {
        let mut f = FeatureVector::default();
        f.one_second[2].mean = 7.0;
        f.half_second[1].above_zero = 9.0;
        f.filtered.second.min = -1.0;
        let arr = f.to_array();
        assert_eq!(arr[23], 7.0);
        assert_eq!(arr[42], 9.0);
        assert_eq!(arr[15], -1.0);
        assert_eq!(FEATURE_NAMES[23], "mean_1s_3");
        assert_eq!(f.binary_inputs()[5], -1.0);
    }
}
