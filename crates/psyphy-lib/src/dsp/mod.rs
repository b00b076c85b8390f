//! Signal-processing primitives shared by the artefact pipeline and the batch runner.

pub mod filter;
pub mod interpolate;
pub mod resample;
pub mod smooth;
pub mod wavelet;

pub use filter::ButterworthLowpass;
pub use interpolate::{fill_cubic_spline, fill_linear};
pub use resample::{resample_to, resample_to_8hz};
pub use smooth::gauss_smooth;
pub use wavelet::{haar_wavedec, HaarDecomposition};
