use serde::{Deserialize, Serialize};

/// Canonical analysis rate of the artefact pipeline (Hz).
pub const CANONICAL_FS: f64 = 8.0;
/// Epoch length in seconds.
pub const EPOCH_SECONDS: f64 = 5.0;
/// Samples per epoch on the canonical grid.
pub const EPOCH_SAMPLES: usize = 40;

/// Rescale a unix timestamp stored in ms/us/ns to seconds, judged by its
/// number of integer digits.
pub fn unix_seconds(value: f64) -> f64 {
    let digits = format!("{}", value.round().abs() as u64).len() as i32;
    value / 10f64.powi(digits - 10)
}

/// Uniformly sampled time series.
///
/// Missing samples are stored as `NaN`; see [`crate::dsp::interpolate`] for
/// the routines that fill them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Uniform sampling frequency in Hz
    pub fs: f64,
    /// Timestamp of the first sample (seconds)
    #[serde(default)]
    pub start: f64,
    /// Samples
    pub data: Vec<f64>,
}

/// One `(timestamp, value)` pair of a [`TimeSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub t: f64,
    pub value: f64,
}

impl TimeSeries {
    pub fn new(fs: f64, start: f64, data: Vec<f64>) -> Self {
        Self { fs, start, data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn duration(&self) -> f64 {
        self.data.len() as f64 / self.fs
    }

    /// Timestamp of sample `index`.
    pub fn time_at(&self, index: usize) -> f64 {
        self.start + index as f64 / self.fs
    }

    pub fn samples(&self) -> impl Iterator<Item = Sample> + '_ {
        self.data.iter().enumerate().map(|(i, &value)| Sample {
            t: self.time_at(i),
            value,
        })
    }

    pub fn missing_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_nan()).count()
    }

    /// Same samples, timeline shifted so the first sample sits at `t = 0`.
    pub fn rebased(&self) -> Self {
        Self {
            fs: self.fs,
            start: 0.0,
            data: self.data.clone(),
        }
    }
}

/// A 5-second slice of the canonical 8 Hz signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Epoch {
    pub index: usize,
    /// Start timestamp (seconds)
    pub start: f64,
    /// Index of the first sample in the 8 Hz signal
    pub first_sample: usize,
    /// Number of samples owned by the epoch (40 except possibly the last)
    pub len: usize,
}

impl Epoch {
    pub fn end(&self) -> f64 {
        self.start + EPOCH_SECONDS
    }

    pub fn is_complete(&self) -> bool {
        self.len == EPOCH_SAMPLES
    }
}

/// Partition an 8 Hz signal into consecutive epochs; a trailing partial
/// epoch is kept.
pub fn epochs(ts: &TimeSeries) -> Vec<Epoch> {
    let n = ts.len();
    (0..n.div_ceil(EPOCH_SAMPLES))
        .map(|index| {
            let first_sample = index * EPOCH_SAMPLES;
            Epoch {
                index,
                start: ts.start + index as f64 * EPOCH_SECONDS,
                first_sample,
                len: EPOCH_SAMPLES.min(n - first_sample),
            }
        })
        .collect()
}
