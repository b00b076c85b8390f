pub mod quality;

pub use quality::{InterpolationReport, Severity};
