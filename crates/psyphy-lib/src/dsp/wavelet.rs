use std::f64::consts::FRAC_1_SQRT_2;

/// Single-level Haar analysis. Odd-length input is extended by repeating
/// its last sample. Returns `(approximation, detail)`.
pub fn haar_dwt(data: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let half = data.len().div_ceil(2);
    let mut approx = Vec::with_capacity(half);
    let mut detail = Vec::with_capacity(half);
    for i in 0..half {
        let a = data[2 * i];
        let b = data.get(2 * i + 1).copied().unwrap_or(a);
        approx.push((a + b) * FRAC_1_SQRT_2);
        detail.push((a - b) * FRAC_1_SQRT_2);
    }
    (approx, detail)
}

/// Multi-level Haar decomposition.
#[derive(Debug, Clone)]
pub struct HaarDecomposition {
    /// Final approximation coefficients.
    pub approx: Vec<f64>,
    /// Detail coefficients, finest level first.
    pub details: Vec<Vec<f64>>,
}

/// Decompose `data` over `levels` Haar levels.
pub fn haar_wavedec(data: &[f64], levels: usize) -> HaarDecomposition {
    let mut approx = data.to_vec();
    let mut details = Vec::with_capacity(levels);
    for _ in 0..levels {
        if approx.is_empty() {
            details.push(Vec::new());
            continue;
        }
        let (a, d) = haar_dwt(&approx);
        details.push(d);
        approx = a;
    }
    HaarDecomposition { approx, details }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_level_pairs() {
        let (a, d) = haar_dwt(&[1.0, 3.0, 2.0]);
        assert_eq!(a.len(), 2);
        assert!((a[0] - 4.0 * FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((d[0] + 2.0 * FRAC_1_SQRT_2).abs() < 1e-12);
        // padded pair has no detail
        assert_eq!(d[1], 0.0);
    }

    #[test]
    fn three_levels_shrink_by_half() {
        let data: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let dec = haar_wavedec(&data, 3);
        let lens: Vec<usize> = dec.details.iter().map(Vec::len).collect();
        assert_eq!(lens, vec![20, 10, 5]);
        assert_eq!(dec.approx.len(), 5);
    }

    #[test]
    fn constant_signal_has_no_detail() {
        let dec = haar_wavedec(&[2.5; 24], 3);
        assert!(dec.details.iter().flatten().all(|d| d.abs() < 1e-12));
    }

    #[test]
    fn energy_is_preserved() {
        let data: Vec<f64> = (0..16).map(|i| ((i * 7) % 5) as f64 - 2.0).collect();
        let dec = haar_wavedec(&data, 3);
        let e_in: f64 = data.iter().map(|v| v * v).sum();
        let e_out: f64 = dec.approx.iter().chain(dec.details.iter().flatten()).map(|v| v * v).sum();
        assert!((e_in - e_out).abs() < 1e-9);
    }
}
