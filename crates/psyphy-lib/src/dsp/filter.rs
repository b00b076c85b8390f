use crate::error::{PipelineError, Result};
use std::f64::consts::PI;

/// One biquad in direct form II transposed. `a0` is normalised to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

/// Digital Butterworth low-pass as a cascade of second-order sections,
/// designed through the bilinear transform with frequency pre-warping.
#[derive(Debug, Clone, PartialEq)]
pub struct ButterworthLowpass {
    pub order: usize,
    pub cutoff_hz: f64,
    pub fs: f64,
    sections: Vec<Biquad>,
}

impl ButterworthLowpass {
    pub fn design(order: usize, cutoff_hz: f64, fs: f64) -> Result<Self> {
        if !(fs.is_finite() && fs > 0.0) {
            return Err(PipelineError::InvalidSampleRate(fs));
        }
        if order == 0 {
            return Err(PipelineError::InvalidFilterOrder);
        }
        let nyquist_hz = fs / 2.0;
        if !(cutoff_hz.is_finite() && cutoff_hz > 0.0 && cutoff_hz < nyquist_hz) {
            return Err(PipelineError::InvalidCutoff {
                cutoff_hz,
                nyquist_hz,
            });
        }

        let wn = (PI * cutoff_hz / fs).tan();
        let wn2 = wn * wn;
        let mut sections = Vec::with_capacity(order.div_ceil(2));
        for k in 0..order / 2 {
            let theta = PI * (2 * k + 1) as f64 / (2 * order) as f64;
            let c = 2.0 * theta.sin();
            let d = 1.0 + c * wn + wn2;
            sections.push(Biquad {
                b0: wn2 / d,
                b1: 2.0 * wn2 / d,
                b2: wn2 / d,
                a1: 2.0 * (wn2 - 1.0) / d,
                a2: (1.0 - c * wn + wn2) / d,
            });
        }
        if order % 2 == 1 {
            let g = wn / (1.0 + wn);
            sections.push(Biquad {
                b0: g,
                b1: g,
                b2: 0.0,
                a1: (wn - 1.0) / (wn + 1.0),
                a2: 0.0,
            });
        }

        Ok(Self {
            order,
            cutoff_hz,
            fs,
            sections,
        })
    }

    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Causal filtering from a zero initial state. Output length equals input length.
    pub fn filter(&self, data: &[f64]) -> Vec<f64> {
        let mut out = data.to_vec();
        for s in &self.sections {
            let (mut z1, mut z2) = (0.0, 0.0);
            for v in out.iter_mut() {
                let x = *v;
                let y = s.b0 * x + z1;
                z1 = s.b1 * x - s.a1 * y + z2;
                z2 = s.b2 * x - s.a2 * y;
                *v = y;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_cutoff_at_nyquist() {
        let err = ButterworthLowpass::design(6, 4.0, 8.0).unwrap_err();
        assert!(err.is_configuration());
        assert!(ButterworthLowpass::design(6, 0.0, 8.0).is_err());
        assert!(ButterworthLowpass::design(0, 1.0, 8.0).is_err());
        assert!(ButterworthLowpass::design(6, 1.0, f64::NAN).is_err());
    }

    #[test]
    fn sixth_order_has_three_sections() {
        let f = ButterworthLowpass::design(6, 1.0, 8.0).unwrap();
        assert_eq!(f.sections().len(), 3);
        let odd = ButterworthLowpass::design(5, 1.0, 8.0).unwrap();
        assert_eq!(odd.sections().len(), 3);
    }

    #[test]
    fn dc_input_converges_to_input_level() {
        let f = ButterworthLowpass::design(6, 1.0, 8.0).unwrap();
        let out = f.filter(&vec![3.5; 200]);
        assert_eq!(out.len(), 200);
        // impulse-response first tap of butter(6, 0.25)
        assert!((out[0] / 3.5 - 0.001_051_6).abs() < 1e-6);
        assert!((out[199] - 3.5).abs() < 1e-6);
    }

    #[test]
    fn odd_order_dc_gain_is_unity() {
        let f = ButterworthLowpass::design(3, 0.5, 8.0).unwrap();
        let out = f.filter(&vec![1.0; 300]);
        assert!((out[299] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn attenuates_above_cutoff() {
        let f = ButterworthLowpass::design(6, 1.0, 8.0).unwrap();
        let tone: Vec<f64> = (0..800)
            .map(|i| (2.0 * PI * 3.0 * i as f64 / 8.0).sin())
            .collect();
        let out = f.filter(&tone);
        let peak = out[400..].iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        assert!(peak < 0.01, "peak {}", peak);
    }
}
