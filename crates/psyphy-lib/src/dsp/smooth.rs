use std::f64::consts::PI;

/// Normalised Gaussian window of `width + 1` taps, sigma = width / 8.
pub fn gauss_window(width: usize) -> Vec<f64> {
    let mu = width as f64 / 2.0 + 1.0;
    let sigma = width as f64 / 8.0;
    let raw: Vec<f64> = (1..=width + 1)
        .map(|x| {
            let z = (x as f64 - mu) / sigma;
            (-0.5 * z * z).exp() / ((2.0 * PI).sqrt() * sigma)
        })
        .collect();
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|v| v / total).collect()
}

/// Gaussian smoothing with edge padding; output has the input's length.
///
/// `width` is rounded down to an even number of samples. Widths below two
/// leave the data unchanged.
pub fn gauss_smooth(data: &[f64], width: usize) -> Vec<f64> {
    let w = width / 2 * 2;
    if w < 2 || data.is_empty() {
        return data.to_vec();
    }
    let n = data.len();
    let (first, last) = (data[0], data[n - 1]);
    let pad = w / 2 + 1;
    let mut ext = Vec::with_capacity(n + 2 * pad);
    ext.extend(std::iter::repeat(first).take(pad));
    ext.extend_from_slice(data);
    ext.extend(std::iter::repeat(last).take(pad));

    let window = gauss_window(w);
    // Slice of the full convolution starting at index 1 + w.
    (0..n)
        .map(|i| {
            let k = i + 1 + w;
            window
                .iter()
                .enumerate()
                .map(|(j, wj)| wj * ext[k - j])
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_normalised_and_symmetric() {
        let w = gauss_window(8);
        assert_eq!(w.len(), 9);
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!((w[0] - w[8]).abs() < 1e-15);
        assert!(w[4] > w[3]);
    }

    #[test]
    fn constant_signal_is_preserved() {
        let out = gauss_smooth(&[5.0; 30], 8);
        assert_eq!(out.len(), 30);
        assert!(out.iter().all(|v| (v - 5.0).abs() < 1e-12));
    }

    #[test]
    fn smoothing_stays_centred() {
        let mut data = vec![0.0; 21];
        data[10] = 1.0;
        let out = gauss_smooth(&data, 8);
        let peak = out
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |acc, (i, &v)| if v > acc.1 { (i, v) } else { acc });
        assert_eq!(peak.0, 10);
        assert!(peak.1 < 1.0);
        assert!((out[9] - out[11]).abs() < 1e-12);
    }

    #[test]
    fn odd_width_rounds_down() {
        let data: Vec<f64> = (0..16).map(|i| (i % 2) as f64).collect();
        assert_eq!(gauss_smooth(&data, 9), gauss_smooth(&data, 8));
        assert_eq!(gauss_smooth(&data, 1), data);
    }
}
