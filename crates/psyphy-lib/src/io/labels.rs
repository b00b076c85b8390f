use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

use crate::artefact::labels::{EpochLabel, Label};

const HEADER: [&str; 4] = ["EpochNum", "StartTime", "EndTime", "Binary"];

/// Write epoch labels as `EpochNum,StartTime,EndTime,Binary` (times in seconds).
pub fn write_artefact_labels(path: &Path, labels: &[EpochLabel]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(HEADER)?;
    for l in labels {
        writer.write_record([
            l.epoch.to_string(),
            l.start.to_string(),
            l.end.to_string(),
            l.label.value().to_string(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Read an artefact label file written by [`write_artefact_labels`].
///
/// Times may also be timedelta strings such as `0 days 00:00:05`.
pub fn read_artefact_labels(path: &Path) -> Result<Vec<EpochLabel>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .with_context(|| format!("missing column '{}' in {}", name, path.display()))
    };
    let (start_idx, end_idx, label_idx) = (find("StartTime")?, find("EndTime")?, find("Binary")?);
    let epoch_idx = find("EpochNum").ok();

    let mut labels = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading record {}", row + 1))?;
        let field = |i: usize| record.get(i).unwrap_or_default();
        let epoch = match epoch_idx {
            Some(i) => field(i)
                .parse()
                .with_context(|| format!("parsing epoch number {}", field(i)))?,
            None => row,
        };
        let value: f64 = field(label_idx)
            .parse()
            .with_context(|| format!("parsing label {}", field(label_idx)))?;
        anyhow::ensure!(
            value.is_finite() && value.fract() == 0.0 && value.abs() <= 1.0,
            "invalid label value {} in record {}",
            field(label_idx),
            row + 1
        );
        let label = Label::try_from(value as i8).map_err(anyhow::Error::msg)?;
        labels.push(EpochLabel {
            epoch,
            start: parse_duration(field(start_idx))?,
            end: parse_duration(field(end_idx))?,
            label,
        });
    }
    Ok(labels)
}

/// Seconds from a plain number or a `[N days ]HH:MM:SS[.f]` timedelta.
pub fn parse_duration(text: &str) -> Result<f64> {
    let text = text.trim();
    if let Ok(v) = text.parse::<f64>() {
        return Ok(v);
    }
    let (days, clock) = match text.split_once(" days ").or_else(|| text.split_once(" day ")) {
        Some((d, rest)) => (
            d.trim()
                .parse::<f64>()
                .with_context(|| format!("parsing days in {}", text))?,
            rest,
        ),
        None => (0.0, text),
    };
    let parts: Vec<&str> = clock.split(':').collect();
    anyhow::ensure!(parts.len() == 3, "unrecognised duration {}", text);
    let mut secs = 0.0;
    for part in parts {
        let v: f64 = part
            .parse()
            .with_context(|| format!("parsing duration {}", text))?;
        secs = secs * 60.0 + v;
    }
    Ok(days * 86_400.0 + secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_in_both_notations() {
        assert_eq!(parse_duration("12.5").unwrap(), 12.5);
        assert_eq!(parse_duration("0 days 00:00:05").unwrap(), 5.0);
        assert_eq!(parse_duration("1 day 01:00:00.5").unwrap(), 90_000.5);
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn labels_survive_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("P01_all_artefacts.csv");
        let labels = vec![
            EpochLabel {
                epoch: 0,
                start: 0.0,
                end: 5.0,
                label: Label::Artefact,
            },
            EpochLabel {
                epoch: 1,
                start: 5.0,
                end: 10.0,
                label: Label::Clean,
            },
        ];
        write_artefact_labels(&path, &labels).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("EpochNum,StartTime,EndTime,Binary\n0,0,5,-1\n"));
        assert_eq!(read_artefact_labels(&path).unwrap(), labels);
    }

    #[test]
    fn reads_timedelta_label_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old.csv");
        std::fs::write(
            &path,
            "EpochNum,StartTime,EndTime,Binary\n0,0 days 00:00:00,0 days 00:00:05,1\n1,0 days 00:00:05,0 days 00:00:10,-1.0\n",
        )
        .unwrap();
        let labels = read_artefact_labels(&path).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1].label, Label::Artefact);
        assert_eq!(labels[1].end, 10.0);
    }

    #[test]
    fn rejects_fractional_and_nan_labels() {
        let dir = tempfile::tempdir().unwrap();
        for bad in ["1.5", "NaN", "inf", "2"] {
            let path = dir.path().join("bad.csv");
            std::fs::write(
                &path,
                format!("EpochNum,StartTime,EndTime,Binary\n0,0,5,{bad}\n"),
            )
            .unwrap();
            let err = read_artefact_labels(&path).unwrap_err();
            assert!(err.to_string().contains("invalid label value"), "{bad}: {err}");
        }
    }
}
