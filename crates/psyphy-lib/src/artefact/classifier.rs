use super::features::{FeatureVector, BINARY_FEATURES, FEATURE_NAMES};
use super::labels::Label;
use super::model;
use crate::error::{PipelineError, Result};

/// RBF-kernel support-vector classifier with fixed parameters.
#[derive(Debug, Clone, Copy)]
pub struct BinaryClassifier {
    pub gamma: f64,
    pub intercept: f64,
    support_vectors: &'static [[f64; model::N_FEATURES]],
    dual_coef: &'static [f64],
}

/// Decision value and label of one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub decision: f64,
    pub label: Label,
}

impl BinaryClassifier {
    /// The artefact model shipped with the crate.
    pub fn bundled() -> Self {
        Self {
            gamma: model::GAMMA,
            intercept: model::INTERCEPT,
            support_vectors: &model::SUPPORT_VECTORS,
            dual_coef: &model::DUAL_COEF,
        }
    }

    pub fn support_vectors(&self) -> &'static [[f64; model::N_FEATURES]] {
        self.support_vectors
    }

    pub fn dual_coef(&self) -> &'static [f64] {
        self.dual_coef
    }

    /// `sum_i dual_i * exp(-gamma * |sv_i - x|^2) + intercept`
    pub fn decision(&self, x: &[f64; model::N_FEATURES]) -> f64 {
        self.support_vectors
            .iter()
            .zip(self.dual_coef)
            .map(|(sv, coef)| {
                let dist2: f64 = sv.iter().zip(x).map(|(a, b)| (a - b).powi(2)).sum();
                coef * (-self.gamma * dist2).exp()
            })
            .sum::<f64>()
            + self.intercept
    }

    pub fn predict(&self, x: &[f64; model::N_FEATURES]) -> Label {
        Label::from_decision(self.decision(x))
    }

    /// Classify one feature vector per epoch.
    ///
    /// Fails on the first non-finite classifier input instead of letting it
    /// reach the sign rule.
    pub fn classify(&self, features: &[FeatureVector]) -> Result<Vec<Classification>> {
        features
            .iter()
            .enumerate()
            .map(|(epoch, f)| {
                let x = f.binary_inputs();
                if let Some((k, value)) = x.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                    return Err(PipelineError::NonFiniteFeature {
                        epoch,
                        feature: FEATURE_NAMES[BINARY_FEATURES[k]],
                        value: *value,
                    });
                }
                let decision = self.decision(&x);
                Ok(Classification {
                    decision,
                    label: Label::from_decision(decision),
                })
            })
            .collect()
    }
}
