use crate::dsp::interpolate::{fill_cubic_spline, fill_linear};
use crate::error::Result;
use crate::signal::{TimeSeries, EPOCH_SECONDS};
use serde::{Deserialize, Serialize};

/// Epoch label as written to the artefact CSV (`Binary` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Label {
    Artefact,
    Questionable,
    Clean,
}

impl Label {
    /// Sign of a classifier decision value; exactly zero is `Questionable`.
    pub fn from_decision(decision: f64) -> Self {
        if decision > 0.0 {
            Self::Clean
        } else if decision < 0.0 {
            Self::Artefact
        } else {
            Self::Questionable
        }
    }

    pub fn value(self) -> i8 {
        match self {
            Self::Artefact => -1,
            Self::Questionable => 0,
            Self::Clean => 1,
        }
    }

    pub fn is_clean(self) -> bool {
        self == Self::Clean
    }
}

impl From<Label> for i8 {
    fn from(label: Label) -> Self {
        label.value()
    }
}

impl TryFrom<i8> for Label {
    type Error = String;

    fn try_from(v: i8) -> std::result::Result<Self, Self::Error> {
        match v {
            -1 => Ok(Self::Artefact),
            0 => Ok(Self::Questionable),
            1 => Ok(Self::Clean),
            other => Err(format!("invalid label value {other}")),
        }
    }
}

/// Label of one 5 s epoch with its time span (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochLabel {
    pub epoch: usize,
    pub start: f64,
    pub end: f64,
    pub label: Label,
}

/// Forward-fill epoch labels over the samples of a series recorded at `fs`
/// whose first sample coincides with the first epoch. Samples past the last
/// epoch keep the last label.
pub fn expand_labels(labels: &[Label], fs: f64, n_samples: usize) -> Vec<Label> {
    let Some(&last) = labels.last() else {
        return Vec::new();
    };
    let samples_per_epoch = fs * EPOCH_SECONDS;
    (0..n_samples)
        .map(|i| {
            let epoch = (i as f64 / samples_per_epoch + 1e-9).floor() as usize;
            labels.get(epoch).copied().unwrap_or(last)
        })
        .collect()
}

/// Share of epochs labelled artefact, in percent.
pub fn artefact_percent(labels: &[Label]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let artefacts = labels.iter().filter(|l| **l == Label::Artefact).count();
    artefacts as f64 * 100.0 / labels.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolicyDecision {
    Proceed { percent: f64 },
    Stop { percent: f64 },
}

impl PolicyDecision {
    pub fn percent(&self) -> f64 {
        match self {
            Self::Proceed { percent } | Self::Stop { percent } => *percent,
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Self::Stop { .. })
    }
}

/// Stop rule applied to a block once its epochs are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArtefactPolicy {
    pub max_artefact_percent: f64,
}

impl Default for ArtefactPolicy {
    fn default() -> Self {
        Self {
            max_artefact_percent: 100.0 / 3.0,
        }
    }
}

impl ArtefactPolicy {
    pub fn new(max_artefact_percent: f64) -> Self {
        Self {
            max_artefact_percent,
        }
    }

    /// Stop when the artefact share exceeds the threshold; a block exactly at
    /// the threshold proceeds.
    pub fn evaluate(&self, labels: &[Label]) -> PolicyDecision {
        let percent = artefact_percent(labels);
        if percent > self.max_artefact_percent {
            PolicyDecision::Stop { percent }
        } else {
            PolicyDecision::Proceed { percent }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    Linear,
    CubicSpline,
}

/// A channel after masking and re-interpolation.
#[derive(Debug, Clone)]
pub struct CorrectedSeries {
    pub series: TimeSeries,
    /// Values before correction (`NaN` where the recording had gaps).
    pub raw: Vec<f64>,
    /// Whether each sample was replaced.
    pub interpolated: Vec<bool>,
}

impl CorrectedSeries {
    pub fn interpolated_count(&self) -> usize {
        self.interpolated.iter().filter(|f| **f).count()
    }

    /// Wrap a channel that needs no correction.
    pub fn untouched(ts: &TimeSeries) -> Self {
        Self {
            series: ts.clone(),
            raw: ts.data.clone(),
            interpolated: vec![false; ts.len()],
        }
    }

    /// Apply a further correction pass on top of this one, keeping the
    /// original raw values and accumulating the replaced samples.
    pub fn correct_again(&self, sample_labels: &[Label], method: Interpolation) -> Result<Self> {
        let next = correct_series(&self.series, sample_labels, method)?;
        let interpolated = self
            .interpolated
            .iter()
            .zip(&next.interpolated)
            .map(|(a, b)| *a || *b)
            .collect();
        Ok(Self {
            series: next.series,
            raw: self.raw.clone(),
            interpolated,
        })
    }
}

/// Replace every sample whose expanded label is not clean (and every gap
/// already present) by interpolation over the remaining samples.
pub fn correct_series(
    ts: &TimeSeries,
    sample_labels: &[Label],
    method: Interpolation,
) -> Result<CorrectedSeries> {
    let raw = ts.data.clone();
    let mut data = raw.clone();
    let mut interpolated = vec![false; data.len()];
    for (i, v) in data.iter_mut().enumerate() {
        let masked = sample_labels.get(i).is_some_and(|l| !l.is_clean());
        if masked || v.is_nan() {
            *v = f64::NAN;
            interpolated[i] = true;
        }
    }
    match method {
        Interpolation::Linear => fill_linear(&mut data)?,
        Interpolation::CubicSpline => fill_cubic_spline(&mut data)?,
    };
    Ok(CorrectedSeries {
        series: TimeSeries::new(ts.fs, ts.start, data),
        raw,
        interpolated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    #[test]
    fn decision_sign_maps_to_label() {
        assert_eq!(Label::from_decision(2.2), Label::Clean);
        assert_eq!(Label::from_decision(-0.1), Label::Artefact);
        assert_eq!(Label::from_decision(0.0), Label::Questionable);
        assert_eq!(Label::try_from(-1i8).unwrap(), Label::Artefact);
        assert!(Label::try_from(3i8).is_err());
    }

    #[test]
    fn labels_serialize_as_integers() {
        assert_eq!(serde_json::to_string(&Label::Artefact).unwrap(), "-1");
        let back: Vec<Label> = serde_json::from_str("[1, 0]").unwrap();
        assert_eq!(back, vec![Label::Clean, Label::Questionable]);
        assert!(serde_json::from_str::<Label>("2").is_err());
    }

    #[test]
    fn ten_epochs_tile_the_signal() {
        let mut labels = vec![Label::Clean; 10];
        labels[3] = Label::Artefact;
        let expanded = expand_labels(&labels, 8.0, 400);
        assert_eq!(expanded.len(), 400);
        assert!(expanded[120..160].iter().all(|l| *l == Label::Artefact));
        assert_eq!(expanded[119], Label::Clean);
        assert_eq!(expanded[160], Label::Clean);

        let slow = expand_labels(&labels, 1.6, 80);
        assert_eq!(slow.len(), 80);
        assert!(slow[24..32].iter().all(|l| *l == Label::Artefact));
    }

    #[test]
    fn samples_past_last_epoch_keep_last_label() {
        let expanded = expand_labels(&[Label::Clean, Label::Artefact], 4.0, 50);
        assert_eq!(expanded[49], Label::Artefact);
        assert!(expand_labels(&[], 4.0, 10).is_empty());
    }

    #[test]
    fn policy_stops_strictly_above_threshold() {
        let labels = [Label::Artefact, Label::Clean, Label::Clean];
        assert!((artefact_percent(&labels) - 100.0 / 3.0).abs() < 1e-12);
        assert!(!ArtefactPolicy::default().evaluate(&labels).is_stop());
        let strict = ArtefactPolicy::new(10.0).evaluate(&labels);
        assert!(strict.is_stop());
        assert!((strict.percent() - 33.333).abs() < 1e-3);
        assert_eq!(artefact_percent(&[]), 0.0);
    }

    #[test]
    fn correction_masks_non_clean_samples() {
        let ts = TimeSeries::new(1.0, 0.0, (0..15).map(|i| i as f64).collect());
        let mut labels = vec![Label::Clean; 15];
        labels[5..10].fill(Label::Questionable);
        let mut spiky = ts.clone();
        spiky.data[5..10].fill(100.0);
        let out = correct_series(&spiky, &labels, Interpolation::CubicSpline).unwrap();
        assert_eq!(out.interpolated_count(), 5);
        assert_eq!(out.raw[7], 100.0);
        for (i, v) in out.series.data.iter().enumerate() {
            assert!((v - i as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn repeated_corrections_accumulate_flags() {
        let ts = TimeSeries::new(1.0, 0.0, vec![0.0, f64::NAN, 2.0, 30.0, 4.0, 5.0]);
        let first = correct_series(&ts, &[], Interpolation::Linear).unwrap();
        assert_eq!(first.interpolated, vec![false, true, false, false, false, false]);
        let mut labels = vec![Label::Clean; 6];
        labels[3] = Label::Artefact;
        let second = first.correct_again(&labels, Interpolation::Linear).unwrap();
        assert_eq!(second.interpolated_count(), 2);
        assert!(second.raw[1].is_nan());
        assert_eq!(second.series.data, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(CorrectedSeries::untouched(&ts).interpolated_count(), 0);
    }

    #[test]
    fn fully_masked_series_cannot_be_corrected() {
        let ts = TimeSeries::new(1.0, 0.0, vec![1.0; 4]);
        let labels = vec![Label::Artefact; 4];
        assert!(matches!(
            correct_series(&ts, &labels, Interpolation::Linear),
            Err(PipelineError::NoValidSamples)
        ));
    }
}
