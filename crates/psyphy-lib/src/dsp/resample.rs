//! Rate normalisation onto a uniform grid.
//!
//! Slower recordings are binned into the target slots and linearly filled;
//! faster ones are decimated by an integer stride without anti-aliasing.

use super::interpolate::fill_linear;
use crate::error::{PipelineError, Result};
use crate::signal::{TimeSeries, CANONICAL_FS};

const SLOT_EPS: f64 = 1e-9;

/// Bring `ts` onto the canonical 8 Hz grid.
pub fn resample_to_8hz(ts: &TimeSeries) -> Result<TimeSeries> {
    resample_to(ts, CANONICAL_FS)
}

/// Bring `ts` onto a `target_fs` grid starting at `ts.start`.
///
/// Any gap left after resampling (missing input samples, empty slots) is
/// filled linearly, so the result contains no `NaN`.
pub fn resample_to(ts: &TimeSeries, target_fs: f64) -> Result<TimeSeries> {
    if !(ts.fs.is_finite() && ts.fs > 0.0) {
        return Err(PipelineError::InvalidSampleRate(ts.fs));
    }
    if !(target_fs.is_finite() && target_fs > 0.0) {
        return Err(PipelineError::InvalidSampleRate(target_fs));
    }
    if ts.is_empty() {
        return Err(PipelineError::EmptySignal);
    }

    let mut data = if ts.fs < target_fs {
        upsample(&ts.data, ts.fs, target_fs)
    } else if ts.fs > target_fs {
        decimate(&ts.data, ts.fs, target_fs)
    } else {
        ts.data.clone()
    };
    fill_linear(&mut data)?;
    Ok(TimeSeries::new(target_fs, ts.start, data))
}

/// Stride used when decimating from `fs` to `target_fs`.
pub fn decimation_stride(fs: f64, target_fs: f64) -> usize {
    ((fs.floor() / target_fs).floor() as usize).max(1)
}

fn decimate(data: &[f64], fs: f64, target_fs: f64) -> Vec<f64> {
    let stride = decimation_stride(fs, target_fs);
    (0..data.len() / stride).map(|i| data[i * stride]).collect()
}

/// Each input sample lands in the slot containing its timestamp; a slot
/// takes the mean of its samples and stays `NaN` when empty.
fn upsample(data: &[f64], fs: f64, target_fs: f64) -> Vec<f64> {
    let span = (data.len() - 1) as f64 / fs;
    let slots = (span * target_fs + SLOT_EPS).floor() as usize + 1;
    let mut sums = vec![0.0; slots];
    let mut counts = vec![0usize; slots];
    for (i, &v) in data.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        let slot = ((i as f64 * target_fs / fs + SLOT_EPS).floor() as usize).min(slots - 1);
        sums[slot] += v;
        counts[slot] += 1;
    }
    sums.iter()
        .zip(&counts)
        .map(|(&s, &c)| if c == 0 { f64::NAN } else { s / c as f64 })
        .collect()
}
