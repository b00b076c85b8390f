//! Gap filling for series that mark missing samples with `NaN`.
//!
//! Interior gaps are interpolated over the sample index; leading gaps take
//! the first valid value and trailing gaps the last one, so a filled series
//! never contains `NaN`.

use crate::error::{PipelineError, Result};

/// Fill `NaN` gaps by linear interpolation. Returns the number of filled samples.
pub fn fill_linear(data: &mut [f64]) -> Result<usize> {
    let valid = valid_indices(data)?;
    let Some(valid) = valid else {
        return Ok(0);
    };
    let mut filled = fill_edges(data, &valid);
    for pair in valid.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b - a < 2 {
            continue;
        }
        let (ya, yb) = (data[a], data[b]);
        let span = (b - a) as f64;
        for k in a + 1..b {
            data[k] = ya + (yb - ya) * (k - a) as f64 / span;
            filled += 1;
        }
    }
    Ok(filled)
}

/// Fill `NaN` gaps with an interpolating natural cubic spline.
///
/// Falls back to [`fill_linear`] when fewer than four valid samples exist.
pub fn fill_cubic_spline(data: &mut [f64]) -> Result<usize> {
    let valid = valid_indices(data)?;
    let Some(valid) = valid else {
        return Ok(0);
    };
    if valid.len() < 4 {
        return fill_linear(data);
    }
    let xs: Vec<f64> = valid.iter().map(|&i| i as f64).collect();
    let ys: Vec<f64> = valid.iter().map(|&i| data[i]).collect();
    let spline = NaturalSpline::fit(xs, ys);

    let mut filled = fill_edges(data, &valid);
    let mut segment = 0;
    for pair in valid.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        for k in a + 1..b {
            data[k] = spline.eval_in(segment, k as f64);
            filled += 1;
        }
        segment += 1;
    }
    Ok(filled)
}

/// `Ok(None)` when there is nothing to fill.
fn valid_indices(data: &[f64]) -> Result<Option<Vec<usize>>> {
    if data.is_empty() {
        return Ok(None);
    }
    let valid: Vec<usize> = (0..data.len()).filter(|&i| !data[i].is_nan()).collect();
    if valid.is_empty() {
        return Err(PipelineError::NoValidSamples);
    }
    if valid.len() == data.len() {
        return Ok(None);
    }
    Ok(Some(valid))
}

fn fill_edges(data: &mut [f64], valid: &[usize]) -> usize {
    let first = valid[0];
    let last = valid[valid.len() - 1];
    let (head, tail) = (data[first], data[last]);
    data[..first].iter_mut().for_each(|v| *v = head);
    data[last + 1..].iter_mut().for_each(|v| *v = tail);
    first + (data.len() - 1 - last)
}

/// Natural cubic spline (zero second derivative at both knots ends).
struct NaturalSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    m: Vec<f64>,
}

impl NaturalSpline {
    fn fit(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        let n = xs.len();
        let mut m = vec![0.0; n];
        if n > 2 {
            let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
            // Thomas algorithm over the interior knots.
            let size = n - 2;
            let mut diag = vec![0.0; size];
            let mut upper = vec![0.0; size];
            let mut rhs = vec![0.0; size];
            for i in 0..size {
                let k = i + 1;
                diag[i] = 2.0 * (h[k - 1] + h[k]);
                upper[i] = h[k];
                rhs[i] = 6.0 * ((ys[k + 1] - ys[k]) / h[k] - (ys[k] - ys[k - 1]) / h[k - 1]);
            }
            for i in 1..size {
                let lower = h[i];
                let w = lower / diag[i - 1];
                diag[i] -= w * upper[i - 1];
                rhs[i] -= w * rhs[i - 1];
            }
            m[size] = rhs[size - 1] / diag[size - 1];
            for i in (0..size - 1).rev() {
                m[i + 1] = (rhs[i] - upper[i] * m[i + 2]) / diag[i];
            }
        }
        Self { xs, ys, m }
    }

    fn eval_in(&self, j: usize, x: f64) -> f64 {
        let (x0, x1) = (self.xs[j], self.xs[j + 1]);
        let (y0, y1) = (self.ys[j], self.ys[j + 1]);
        let (m0, m1) = (self.m[j], self.m[j + 1]);
        let h = x1 - x0;
        let a = x1 - x;
        let b = x - x0;
        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (y0 / h - m0 * h / 6.0) * a
            + (y1 / h - m1 * h / 6.0) * b
    }
}
