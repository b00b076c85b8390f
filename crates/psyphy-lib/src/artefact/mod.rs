//! EDA artefact detection: 8 Hz resampling, Butterworth low-pass, epoch
//! features and the bundled SVM, plus the label/correction helpers used
//! once a block has been classified.

pub mod classifier;
pub mod features;
pub mod labels;
pub mod model;

pub use classifier::{BinaryClassifier, Classification};
pub use features::{extract_features, FeatureVector, WaveletStreams, FEATURE_NAMES};
pub use labels::{
    artefact_percent, correct_series, expand_labels, ArtefactPolicy, CorrectedSeries, EpochLabel,
    Interpolation, Label, PolicyDecision,
};

use crate::dsp::{filter::ButterworthLowpass, resample::resample_to_8hz};
use crate::error::Result;
use crate::signal::{epochs, TimeSeries, CANONICAL_FS};
use serde::{Deserialize, Serialize};

/// Low-pass settings applied before feature extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub cutoff_hz: f64,
    pub filter_order: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            cutoff_hz: 1.0,
            filter_order: 6,
        }
    }
}

/// The 8 Hz signal the classifier saw, with its low-passed twin.
#[derive(Debug, Clone)]
pub struct ProcessedEda {
    pub eda: TimeSeries,
    pub filtered: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct ArtefactDetection {
    pub processed: ProcessedEda,
    pub features: Vec<FeatureVector>,
    pub classifications: Vec<Classification>,
    pub labels: Vec<EpochLabel>,
}

/// Counts reported per detection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtefactSummary {
    pub input_fs: f64,
    pub input_samples: usize,
    pub samples_8hz: usize,
    pub epochs: usize,
    pub artefact_epochs: usize,
    pub questionable_epochs: usize,
    pub clean_epochs: usize,
    pub artefact_percent: f64,
    pub labels: Vec<i8>,
}

impl ArtefactDetection {
    pub fn label_values(&self) -> Vec<Label> {
        self.labels.iter().map(|l| l.label).collect()
    }

    pub fn summary(&self, input: &TimeSeries) -> ArtefactSummary {
        let labels = self.label_values();
        let count = |want: Label| labels.iter().filter(|l| **l == want).count();
        ArtefactSummary {
            input_fs: input.fs,
            input_samples: input.len(),
            samples_8hz: self.processed.eda.len(),
            epochs: labels.len(),
            artefact_epochs: count(Label::Artefact),
            questionable_epochs: count(Label::Questionable),
            clean_epochs: count(Label::Clean),
            artefact_percent: artefact_percent(&labels),
            labels: labels.iter().map(|l| l.value()).collect(),
        }
    }
}

/// Resample to 8 Hz and low-pass an EDA recording.
pub fn preprocess(eda: &TimeSeries, cfg: &DetectorConfig) -> Result<ProcessedEda> {
    let lowpass = ButterworthLowpass::design(cfg.filter_order, cfg.cutoff_hz, CANONICAL_FS)?;
    let eda = resample_to_8hz(eda)?;
    let filtered = lowpass.filter(&eda.data);
    Ok(ProcessedEda { eda, filtered })
}

/// Label every 5 s epoch of `eda` with the bundled classifier.
pub fn detect_artefacts(eda: &TimeSeries, cfg: &DetectorConfig) -> Result<ArtefactDetection> {
    let processed = preprocess(eda, cfg)?;
    let features = extract_features(&processed.eda.data, &processed.filtered);
    let classifications = BinaryClassifier::bundled().classify(&features)?;
    let labels = epochs(&processed.eda)
        .iter()
        .zip(&classifications)
        .map(|(epoch, c)| EpochLabel {
            epoch: epoch.index,
            start: epoch.start,
            end: epoch.end(),
            label: c.label,
        })
        .collect();
    log::debug!(
        "classified {} epochs from {} samples at {} Hz",
        classifications.len(),
        eda.len(),
        eda.fs
    );
    Ok(ArtefactDetection {
        processed,
        features,
        classifications,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;

    #[test]
    fn flat_signal_is_mostly_clean() {
        let ts = TimeSeries::new(8.0, 0.0, vec![2.0; 400]);
        let det = detect_artefacts(&ts, &DetectorConfig::default()).unwrap();
        let labels = det.label_values();
        assert_eq!(labels.len(), 10);
        // filter start-up transient
        assert_eq!(labels[0], Label::Artefact);
        assert!(labels[1..].iter().all(|l| *l == Label::Clean));
        let d = &det.classifications;
        assert!((d[0].decision - -1.436).abs() < 1e-2);
        assert!((d[1].decision - 2.241).abs() < 1e-2);

        let summary = det.summary(&ts);
        assert_eq!(summary.artefact_epochs, 1);
        assert_eq!(summary.clean_epochs, 9);
        assert!((summary.artefact_percent - 10.0).abs() < 1e-12);
        assert!((det.labels[9].start - 45.0).abs() < 1e-12);
    }

    #[test]
    fn final_epoch_is_classified_from_its_own_window() {
        let ts = TimeSeries::new(8.0, 0.0, vec![2.0; 400]);
        let det = detect_artefacts(&ts, &DetectorConfig::default()).unwrap();
        assert_ne!(det.features[9], FeatureVector::default());
        assert_eq!(det.label_values()[9], Label::Clean);
        // an all-zero row would have been labelled artefact
        let zero = FeatureVector::default().binary_inputs();
        assert_eq!(BinaryClassifier::bundled().predict(&zero), Label::Artefact);
    }

    #[test]
    fn zero_signal_is_all_artefact() {
        let ts = TimeSeries::new(8.0, 0.0, vec![0.0; 400]);
        let det = detect_artefacts(&ts, &DetectorConfig::default()).unwrap();
        assert!(det.label_values().iter().all(|l| *l == Label::Artefact));
    }

    #[test]
    fn four_hz_input_is_upsampled() {
        let ts = TimeSeries::new(4.0, 0.0, vec![2.0; 240]);
        let det = detect_artefacts(&ts, &DetectorConfig::default()).unwrap();
        assert_eq!(det.processed.eda.len(), 479);
        let labels = det.label_values();
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], Label::Artefact);
        assert!(labels[1..].iter().all(|l| *l == Label::Clean));
    }

    #[test]
    fn bad_cutoff_is_a_configuration_error() {
        let ts = TimeSeries::new(8.0, 0.0, vec![2.0; 80]);
        let cfg = DetectorConfig {
            cutoff_hz: 5.0,
            filter_order: 6,
        };
        let err = detect_artefacts(&ts, &cfg).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidCutoff { .. }));
        assert!(err.is_configuration());
    }
}
