use anyhow::{Context, Result};
use psyphy_lib::io::{
    read_cut_channel, read_e4_acc, read_e4_channel, read_eplus_sessions, AccSeries, CUT_BVP_FS,
    CUT_EDA_FS,
};
use psyphy_lib::signal::TimeSeries;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Device;

/// Directory levels below the data directory searched for a participant's
/// Embrace Plus folder.
const EPLUS_SEARCH_DEPTH: usize = 6;

/// All channels of one participant, timestamps in unix seconds.
#[derive(Debug, Clone)]
pub struct Recording {
    pub eda: TimeSeries,
    pub bvp: TimeSeries,
    pub temp: Option<TimeSeries>,
    pub acc: Option<AccSeries>,
}

/// Files a device layout needs for `part`. Embrace Plus sessions are
/// discovered on disk, see [`eplus_session_files`].
pub fn required_files(device: Device, data_dir: &Path, part: &str) -> Result<Vec<PathBuf>> {
    Ok(match device {
        Device::E4 => ["EDA.csv", "BVP.csv", "TEMP.csv", "ACC.csv"]
            .iter()
            .map(|f| data_dir.join(part).join(f))
            .collect(),
        Device::Cut => vec![
            data_dir.join(format!("EDA_{}.csv", part)),
            data_dir.join(format!("BVP_{}.csv", part)),
        ],
        Device::EPlus => eplus_session_files(data_dir, part)?,
    })
}

fn subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn avro_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|e| e == "avro") {
            files.push(path);
        }
    }
    Ok(files)
}

/// `<part>/raw_data/v*/*.avro` at the shallowest level below `data_dir` that
/// has any.
pub fn eplus_session_files(data_dir: &Path, part: &str) -> Result<Vec<PathBuf>> {
    let mut level = vec![data_dir.to_path_buf()];
    for _ in 0..EPLUS_SEARCH_DEPTH {
        let mut found = Vec::new();
        for dir in &level {
            for version in subdirs(&dir.join(part).join("raw_data"))? {
                let is_version = version
                    .file_name()
                    .is_some_and(|n| n.to_string_lossy().starts_with('v'));
                if is_version {
                    found.extend(avro_files(&version)?);
                }
            }
        }
        if !found.is_empty() {
            found.sort();
            return Ok(found);
        }
        let mut next = Vec::new();
        for dir in &level {
            next.extend(subdirs(dir)?);
        }
        level = next;
    }
    Ok(Vec::new())
}

fn load_eplus(files: &[PathBuf]) -> Result<Option<Recording>> {
    let joined = read_eplus_sessions(files)?;
    let (Some(eda), Some(bvp)) = (joined.eda, joined.bvp) else {
        return Ok(None);
    };
    Ok(Some(Recording {
        eda,
        bvp,
        temp: joined.temp,
        acc: joined.acc,
    }))
}

/// Load a participant. `Ok(None)` when any required file is absent, or when
/// no Embrace Plus session holds EDA and BVP.
pub fn load_recording(device: Device, data_dir: &Path, part: &str) -> Result<Option<Recording>> {
    let files = required_files(device, data_dir, part)?;
    if files.is_empty() || files.iter().any(|f| !f.is_file()) {
        return Ok(None);
    }
    let recording = match device {
        Device::E4 => Recording {
            eda: read_e4_channel(&files[0])?,
            bvp: read_e4_channel(&files[1])?,
            temp: Some(read_e4_channel(&files[2])?),
            acc: Some(read_e4_acc(&files[3])?),
        },
        Device::Cut => Recording {
            eda: read_cut_channel(&files[0], CUT_EDA_FS)?,
            bvp: read_cut_channel(&files[1], CUT_BVP_FS)?,
            temp: None,
            acc: None,
        },
        Device::EPlus => return load_eplus(&files),
    };
    Ok(Some(recording))
}

/// Writes Embrace Plus sessions for tests.
#[cfg(test)]
pub(crate) mod eplus_fixture {
    use apache_avro::types::Value;
    use apache_avro::{Schema, Writer};
    use std::path::{Path, PathBuf};

    fn schema() -> Schema {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .and_then(|p| p.parent())
            .expect("workspace root")
            .join("test_data/eplus_schema.avsc");
        Schema::parse_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    fn channel(us: i64, fs: f32, fields: Vec<(&str, Value)>) -> Value {
        let mut record = vec![
            ("timestampStart".to_string(), Value::Long(us)),
            ("samplingFrequency".to_string(), Value::Float(fs)),
        ];
        record.extend(fields.into_iter().map(|(k, v)| (k.to_string(), v)));
        Value::Record(record)
    }

    fn floats(n: usize, v: f32) -> Value {
        Value::Array(vec![Value::Float(v); n])
    }

    fn ints(n: usize, v: i32) -> Value {
        Value::Array(vec![Value::Int(v); n])
    }

    /// One session of `seconds` length: EDA 4 Hz at `level`, BVP 64 Hz,
    /// TEMP 1 Hz and ACC 32 Hz.
    pub fn write_session(dir: &Path, part: &str, start_s: i64, seconds: usize, level: f32) {
        let us = start_s * 1_000_000;
        let raw = Value::Record(vec![
            (
                "accelerometer".into(),
                channel(
                    us,
                    32.0,
                    vec![
                        ("x", ints(32 * seconds, 0)),
                        ("y", ints(32 * seconds, 0)),
                        ("z", ints(32 * seconds, 2048)),
                    ],
                ),
            ),
            ("eda".into(), channel(us, 4.0, vec![("values", floats(4 * seconds, level))])),
            ("temperature".into(), channel(us, 1.0, vec![("values", floats(seconds, 33.0))])),
            ("bvp".into(), channel(us, 64.0, vec![("values", floats(64 * seconds, 0.0))])),
        ]);
        let schema = schema();
        let mut writer = Writer::new(&schema, Vec::new());
        writer
            .append(Value::Record(vec![("rawData".into(), raw)]))
            .unwrap();
        std::fs::create_dir_all(dir).unwrap();
        let path = dir.join(format!("1-1-{}_{}.avro", part, start_s));
        std::fs::write(path, writer.into_inner().unwrap()).unwrap();
    }
}
