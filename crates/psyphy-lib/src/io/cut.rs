//! Pre-cut exports with one `YYYY-mm-dd HH:MM:SS.ffffff;value` row per sample.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use csv::ReaderBuilder;
use std::path::Path;

use crate::signal::TimeSeries;

pub const CUT_EDA_FS: f64 = 4.0;
pub const CUT_BVP_FS: f64 = 64.0;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parse a cut-format timestamp into unix seconds (UTC).
pub fn parse_cut_time(text: &str) -> Result<f64> {
    let dt = NaiveDateTime::parse_from_str(text.trim(), TIME_FORMAT)
        .with_context(|| format!("parsing timestamp {}", text))?;
    Ok(dt.and_utc().timestamp_micros() as f64 / 1e6)
}

/// Read a cut-format channel recorded at the fixed rate `fs`.
pub fn read_cut_channel(path: &Path, fs: f64) -> Result<TimeSeries> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b';')
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut start = None;
    let mut values = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading line {}", idx + 1))?;
        let (Some(time), Some(value)) = (record.get(0), record.get(1)) else {
            anyhow::bail!("line {} of {} is not `time;value`", idx + 1, path.display());
        };
        if start.is_none() {
            start = Some(parse_cut_time(time)?);
        }
        let value = value.trim();
        values.push(if value.is_empty() {
            f64::NAN
        } else {
            value
                .parse()
                .with_context(|| format!("line {} is not numeric: {}", idx + 1, value))?
        });
    }
    let start = start.with_context(|| format!("{} has no samples", path.display()))?;
    Ok(TimeSeries::new(fs, start, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fractional_timestamps() {
        let t = parse_cut_time("2020-09-13 12:26:40.250000").unwrap();
        assert!((t - 1_600_000_000.25).abs() < 1e-6);
        assert!(parse_cut_time("13.09.2020").is_err());
    }

    #[test]
    fn reads_semicolon_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("EDA_P07.csv");
        std::fs::write(
            &path,
            "2020-09-13 12:26:40.000000;0.51\n2020-09-13 12:26:40.250000;0.52\n2020-09-13 12:26:40.500000;\n",
        )
        .unwrap();
        let ts = read_cut_channel(&path, CUT_EDA_FS).unwrap();
        assert_eq!(ts.len(), 3);
        assert_eq!(ts.start, 1_600_000_000.0);
        assert_eq!(ts.data[1], 0.52);
        assert!(ts.data[2].is_nan());
    }
}
