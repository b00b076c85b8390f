use thiserror::Error;

/// Errors raised by the signal pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("sampling rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),
    #[error("low-pass cutoff {cutoff_hz} Hz must lie strictly between 0 and the Nyquist rate {nyquist_hz} Hz")]
    InvalidCutoff { cutoff_hz: f64, nyquist_hz: f64 },
    #[error("filter order must be at least 1")]
    InvalidFilterOrder,
    #[error("signal is empty")]
    EmptySignal,
    #[error("signal contains no valid samples")]
    NoValidSamples,
    #[error("non-finite value {value} for feature `{feature}` in epoch {epoch}")]
    NonFiniteFeature {
        epoch: usize,
        feature: &'static str,
        value: f64,
    },
}

impl PipelineError {
    /// Configuration errors are fatal for the block they occur in.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidSampleRate(_) | Self::InvalidCutoff { .. } | Self::InvalidFilterOrder
        )
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
