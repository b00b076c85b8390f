//! Empatica Embrace Plus raw-data sessions (`*.avro`).
//!
//! A participant's recording is split over several Avro container files, one
//! per upload. Each file carries one record whose `rawData` holds the
//! channels with a microsecond start timestamp and a sampling frequency.
//! Sessions are joined in start order with `NaN` samples covering the time
//! between them.

use anyhow::{Context, Result};
use apache_avro::{from_value, Reader};
use log::debug;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::io::e4::AccSeries;
use crate::signal::{unix_seconds, TimeSeries};

/// Raw accelerometer counts per g (±2 g range).
pub const EPLUS_ACC_COUNTS_PER_G: f64 = 2048.0;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvroSession {
    raw_data: RawData,
}

#[derive(Debug, Deserialize)]
struct RawData {
    accelerometer: AvroAxes,
    eda: AvroChannel,
    temperature: AvroChannel,
    bvp: AvroChannel,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvroChannel {
    timestamp_start: i64,
    sampling_frequency: f32,
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AvroAxes {
    timestamp_start: i64,
    sampling_frequency: f32,
    x: Vec<i32>,
    y: Vec<i32>,
    z: Vec<i32>,
}

/// A channel that was not recorded has a zero rate and no values.
fn channel(timestamp_start: i64, fs: f32, data: Vec<f64>) -> Option<TimeSeries> {
    if fs <= 0.0 || data.is_empty() {
        return None;
    }
    Some(TimeSeries::new(
        fs as f64,
        unix_seconds(timestamp_start as f64),
        data,
    ))
}

impl AvroChannel {
    fn series(&self) -> Option<TimeSeries> {
        let data = self.values.iter().map(|&v| v as f64).collect();
        channel(self.timestamp_start, self.sampling_frequency, data)
    }
}

impl AvroAxes {
    fn series(&self) -> Option<AccSeries> {
        let axis = |counts: &[i32]| {
            let data = counts.iter().map(|&c| c as f64 / EPLUS_ACC_COUNTS_PER_G).collect();
            channel(self.timestamp_start, self.sampling_frequency, data)
        };
        Some(AccSeries {
            x: axis(&self.x)?,
            y: axis(&self.y)?,
            z: axis(&self.z)?,
        })
    }
}

/// Channels of one or more joined sessions. A channel absent from every
/// session is `None`.
#[derive(Debug, Clone, Default)]
pub struct EPlusRecording {
    pub eda: Option<TimeSeries>,
    pub bvp: Option<TimeSeries>,
    pub temp: Option<TimeSeries>,
    pub acc: Option<AccSeries>,
}

/// Read the last record of a single session file.
pub fn read_eplus_session(path: &Path) -> Result<EPlusRecording> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let reader = Reader::new(BufReader::new(file))
        .with_context(|| format!("reading Avro header of {}", path.display()))?;
    let mut last = None;
    for value in reader {
        last = Some(value.with_context(|| format!("decoding record in {}", path.display()))?);
    }
    let value = last.with_context(|| format!("{} holds no records", path.display()))?;
    let session: AvroSession = from_value(&value)
        .with_context(|| format!("{} is not an Embrace Plus raw-data record", path.display()))?;
    let raw = session.raw_data;
    Ok(EPlusRecording {
        eda: raw.eda.series(),
        bvp: raw.bvp.series(),
        temp: raw.temperature.series(),
        acc: raw.accelerometer.series(),
    })
}

/// Sort key of a session file: the trailing (up to nine) digits of its stem,
/// which are the low digits of the upload's unix start time.
pub fn session_order_key(path: &Path) -> u64 {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let digits: String = stem
        .chars()
        .rev()
        .take(9)
        .take_while(char::is_ascii_digit)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().unwrap_or(0)
}

/// Append `next` to `prev`, padding the time between the last sample of
/// `prev` and the first of `next` with `NaN` on `prev`'s grid. Overlapping
/// sessions are appended without padding.
pub fn join_with_gap(mut prev: TimeSeries, next: TimeSeries) -> TimeSeries {
    if prev.is_empty() {
        return next;
    }
    let last = prev.time_at(prev.len() - 1);
    let slots = ((next.start - last) * prev.fs + 1e-6).floor() as i64 - 1;
    let missing = slots.max(0) as usize;
    if missing > 0 {
        debug!("padding {} missing samples between sessions", missing);
    }
    prev.data.extend(std::iter::repeat(f64::NAN).take(missing));
    prev.data.extend(next.data);
    prev
}

fn join(prev: Option<TimeSeries>, next: Option<TimeSeries>) -> Option<TimeSeries> {
    match (prev, next) {
        (Some(p), Some(n)) => Some(join_with_gap(p, n)),
        (p, n) => p.or(n),
    }
}

/// Read and join all session files of one participant, in start order.
pub fn read_eplus_sessions(paths: &[PathBuf]) -> Result<EPlusRecording> {
    let mut ordered: Vec<&PathBuf> = paths.iter().collect();
    ordered.sort_by_key(|p| session_order_key(p));

    let mut joined = EPlusRecording::default();
    for path in ordered {
        let session = read_eplus_session(path)?;
        joined.eda = join(joined.eda, session.eda);
        joined.bvp = join(joined.bvp, session.bvp);
        joined.temp = join(joined.temp, session.temp);
        joined.acc = match (joined.acc, session.acc) {
            (Some(p), Some(n)) => Some(AccSeries {
                x: join_with_gap(p.x, n.x),
                y: join_with_gap(p.y, n.y),
                z: join_with_gap(p.z, n.z),
            }),
            (p, n) => p.or(n),
        };
    }
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use apache_avro::{Schema, Writer};
    use serde::Serialize;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Session {
        raw_data: Raw,
    }

    #[derive(Serialize)]
    struct Raw {
        accelerometer: Axes,
        eda: Channel,
        temperature: Channel,
        bvp: Channel,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Channel {
        timestamp_start: i64,
        sampling_frequency: f32,
        values: Vec<f32>,
    }

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Axes {
        timestamp_start: i64,
        sampling_frequency: f32,
        x: Vec<i32>,
        y: Vec<i32>,
        z: Vec<i32>,
    }

    fn schema() -> Schema {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .and_then(|p| p.parent())
            .expect("workspace root")
            .join("test_data/eplus_schema.avsc");
        Schema::parse_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    fn write_session(path: &Path, start_s: i64, seconds: usize, level: f32) {
        let us = start_s * 1_000_000;
        let ch = |fs: usize| Channel {
            timestamp_start: us,
            sampling_frequency: fs as f32,
            values: vec![level; fs * seconds],
        };
        let session = Session {
            raw_data: Raw {
                accelerometer: Axes {
                    timestamp_start: us,
                    sampling_frequency: 32.0,
                    x: vec![2048; 32 * seconds],
                    y: vec![-1024; 32 * seconds],
                    z: vec![0; 32 * seconds],
                },
                eda: ch(4),
                temperature: ch(1),
                bvp: ch(64),
            },
        };
        let schema = schema();
        let mut writer = Writer::new(&schema, Vec::new());
        writer.append_ser(session).unwrap();
        std::fs::write(path, writer.into_inner().unwrap()).unwrap();
    }

    #[test]
    fn reads_one_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("1-1-P01_1700000000.avro");
        write_session(&path, 1_700_000_000, 10, 1.5);
        let rec = read_eplus_session(&path).unwrap();
        let eda = rec.eda.unwrap();
        assert_eq!(eda.fs, 4.0);
        assert_eq!(eda.start, 1_700_000_000.0);
        assert_eq!(eda.len(), 40);
        assert_eq!(eda.data[0], 1.5);
        assert_eq!(rec.bvp.unwrap().len(), 640);
        let acc = rec.acc.unwrap();
        assert_eq!(acc.x.data[0], 1.0);
        assert_eq!(acc.y.data[0], -0.5);
    }

    #[test]
    fn joins_sessions_in_start_order_with_gap() {
        let dir = tempfile::tempdir().unwrap();
        let later = dir.path().join("a_1700000015.avro");
        let earlier = dir.path().join("b_1700000000.avro");
        write_session(&later, 1_700_000_015, 10, 2.0);
        write_session(&earlier, 1_700_000_000, 10, 1.0);

        let rec = read_eplus_sessions(&[later, earlier]).unwrap();
        let eda = rec.eda.unwrap();
        assert_eq!(eda.start, 1_700_000_000.0);
        // 40 + 20 missing (10.0 s ..= 14.75 s) + 40
        assert_eq!(eda.len(), 100);
        assert_eq!(eda.missing_count(), 20);
        assert_eq!(eda.data[39], 1.0);
        assert!(eda.data[40].is_nan());
        assert_eq!(eda.data[60], 2.0);
        assert_eq!(rec.temp.unwrap().missing_count(), 5);
        assert_eq!(rec.acc.unwrap().z.missing_count(), 5 * 32);
    }

    #[test]
    fn overlapping_session_is_appended() {
        let prev = TimeSeries::new(4.0, 0.0, vec![1.0; 8]);
        let next = TimeSeries::new(4.0, 1.0, vec![2.0; 4]);
        let joined = join_with_gap(prev, next);
        assert_eq!(joined.len(), 12);
        assert_eq!(joined.missing_count(), 0);
    }

    #[test]
    fn order_key_uses_trailing_digits() {
        assert_eq!(session_order_key(Path::new("x/1-1-P01_1700000123.avro")), 700_000_123);
        assert_eq!(session_order_key(Path::new("x/session.avro")), 0);
    }

    #[test]
    fn rejects_non_avro_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.avro");
        std::fs::write(&path, "not avro").unwrap();
        assert!(read_eplus_session(&path).is_err());
    }
}
