use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

use crate::signal::TimeSeries;

/// Load a `timestamp,<column>` CSV into a [`TimeSeries`].
///
/// The first timestamp becomes the series start and the sampling rate is
/// taken from the first timestamp step. Empty cells are kept as `NaN`.
pub fn read_signal_csv(path: &Path, column: &str) -> Result<TimeSeries> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let timestamp_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("timestamp"))
        .context("missing timestamp column")?;
    let column_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(column))
        .with_context(|| format!("missing signal column '{}'", column))?;

    let mut values = Vec::new();
    let mut first_ts = None;
    let mut fs = 0.0;
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading record {}", row + 1))?;
        let timestamp_str = record.get(timestamp_idx).unwrap_or_default();
        let ts: f64 = timestamp_str
            .parse()
            .with_context(|| format!("parsing timestamp {}", timestamp_str))?;
        let value_str = record.get(column_idx).unwrap_or_default();
        let value = if value_str.is_empty() {
            f64::NAN
        } else {
            value_str
                .parse::<f64>()
                .with_context(|| format!("parsing signal value {}", value_str))?
        };
        match first_ts {
            None => first_ts = Some(ts),
            Some(t0) if fs == 0.0 => {
                anyhow::ensure!(ts > t0, "timestamps must be strictly increasing");
                fs = 1.0 / (ts - t0);
            }
            Some(_) => {}
        }
        values.push(value);
    }
    anyhow::ensure!(
        values.len() >= 2,
        "{} needs at least two samples to infer a sampling rate",
        path.display()
    );
    Ok(TimeSeries::new(fs, first_ts.unwrap_or_default(), values))
}

/// Write equally long columns side by side. Shorter columns leave empty cells;
/// `NaN` values are written as empty cells.
pub fn write_columns(path: &Path, columns: &[(&str, &[f64])]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(columns.iter().map(|(name, _)| *name))?;
    let rows = columns.iter().map(|(_, c)| c.len()).max().unwrap_or(0);
    for i in 0..rows {
        writer.write_record(columns.iter().map(|(_, c)| match c.get(i) {
            Some(v) if !v.is_nan() => v.to_string(),
            _ => String::new(),
        }))?;
    }
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Write a series as `time,<name>` with timestamps from `ts.start`.
pub fn write_signal_csv(path: &Path, name: &str, ts: &TimeSeries) -> Result<()> {
    let times: Vec<f64> = (0..ts.len()).map(|i| ts.time_at(i)).collect();
    write_columns(path, &[("time", times.as_slice()), (name, ts.data.as_slice())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parses_flat_fixture() {
        let path = sample_path("test_data/flat_eda_8hz.csv");
        let ts = read_signal_csv(&path, "EDA").expect("read sample");
        assert_eq!(ts.len(), 400);
        assert!((ts.fs - 8.0).abs() < 1e-9);
        assert_eq!(ts.start, 0.0);
        assert!((ts.data[17] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_cells_become_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gappy.csv");
        std::fs::write(&path, "timestamp,eda\n10.0,1.5\n10.25,\n10.5,2.5\n").unwrap();
        let ts = read_signal_csv(&path, "eda").unwrap();
        assert_eq!(ts.fs, 4.0);
        assert_eq!(ts.start, 10.0);
        assert!(ts.data[1].is_nan());
        assert_eq!(ts.missing_count(), 1);
    }

    #[test]
    fn missing_column_is_reported() {
        let path = sample_path("test_data/flat_eda_8hz.csv");
        let err = read_signal_csv(&path, "bvp").unwrap_err();
        assert!(err.to_string().contains("bvp"));
    }

    #[test]
    fn writes_ragged_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let (a, b) = ([1.0, 2.0], [f64::NAN]);
        write_columns(&path, &[("a", &a[..]), ("b", &b[..])]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "a,b\n1,\n2,\n");
    }

    fn sample_path(relative: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .and_then(|p| p.parent())
            .expect("workspace root")
            .join(relative)
    }
}
