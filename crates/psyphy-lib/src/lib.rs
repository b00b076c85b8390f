pub mod artefact;
pub mod dsp;
pub mod error;
pub mod io;
pub mod metrics;
pub mod plot;
pub mod signal;

pub use artefact::{detect_artefacts, DetectorConfig, Label};
pub use error::PipelineError;
pub use signal::*;
