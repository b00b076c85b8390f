//! Tag files: one row per participant block, naming where the block starts
//! and ends in the recording.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use psyphy_lib::signal::TimeSeries;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct TagRow {
    #[serde(skip)]
    pub index: usize,
    pub part: String,
    pub tag: String,
    #[serde(default)]
    pub start_unit: String,
    #[serde(default)]
    pub start: Option<f64>,
    #[serde(default)]
    pub end_unit: Option<String>,
    #[serde(default)]
    pub end: Option<f64>,
    #[serde(default)]
    pub start_buffer: Option<f64>,
    #[serde(default)]
    pub end_buffer: Option<f64>,
}

/// Portion of a recording covered by a block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockWindow {
    Whole,
    /// Absolute start (unix seconds) and duration (seconds).
    Range { start: f64, duration: f64 },
}

pub use psyphy_lib::signal::unix_seconds;

impl TagRow {
    /// Resolve the block window against the BVP channel, or explain why the
    /// block has to be skipped.
    pub fn window(&self, bvp: &TimeSeries) -> std::result::Result<BlockWindow, String> {
        if self.start_unit.eq_ignore_ascii_case("all") {
            return Ok(BlockWindow::Whole);
        }
        let (Some(start_value), Some(end_value)) = (self.start, self.end) else {
            return Err("Either start or end value is missing.".into());
        };

        let mut start = match self.start_unit.as_str() {
            "unix" => unix_seconds(start_value),
            "seconds" => bvp.start + start_value,
            _ => return Err("Start of each tag has to be either seconds or unix.".into()),
        };
        if let Some(buffer) = self.start_buffer.filter(|b| *b > 0.0) {
            start += buffer;
        }

        let first_bvp = bvp
            .samples()
            .map(|s| s.t)
            .find(|t| *t >= start)
            .ok_or_else(|| "Block starts after the end of the recording.".to_string())?;
        let end = match self.end_unit.as_deref() {
            Some("unix") => unix_seconds(end_value) - first_bvp,
            Some("duration") => end_value,
            Some("seconds") => end_value - (first_bvp - bvp.start),
            _ => return Err("End of each tag has to be duration, seconds or unix.".into()),
        };
        let duration = end - self.end_buffer.unwrap_or(0.0);
        if duration <= 0.0 {
            return Err("Duration is 0 seconds or less.".into());
        }
        Ok(BlockWindow::Range { start, duration })
    }
}

/// Samples of `ts` inside `window`, re-based to `t = 0`.
///
/// A channel keeps samples at or after the window start and before its own
/// first kept sample plus the duration.
pub fn cut_channel(ts: &TimeSeries, window: BlockWindow) -> TimeSeries {
    let BlockWindow::Range { start, duration } = window else {
        return ts.rebased();
    };
    let first = (0..ts.len()).find(|&i| ts.time_at(i) >= start);
    let data = match first {
        Some(first) => {
            let stop = ts.time_at(first) + duration;
            (first..ts.len())
                .take_while(|&i| ts.time_at(i) < stop)
                .map(|i| ts.data[i])
                .collect()
        }
        None => Vec::new(),
    };
    TimeSeries::new(ts.fs, 0.0, data)
}

/// A tag file with its original columns kept for the summary.
#[derive(Debug, Clone)]
pub struct TagFile {
    pub headers: StringRecord,
    pub records: Vec<StringRecord>,
    pub rows: Vec<TagRow>,
}

pub fn read_tag_file(path: &Path) -> Result<TagFile> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_path(path)
        .with_context(|| format!("opening tag file {}", path.display()))?;
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("reading tag row {}", idx + 1))?;
        let mut row: TagRow = record
            .deserialize(Some(&headers))
            .with_context(|| format!("parsing tag row {}", idx + 1))?;
        row.index = idx;
        records.push(record);
        rows.push(row);
    }
    Ok(TagFile {
        headers,
        records,
        rows,
    })
}

impl TagFile {
    /// Distinct participant ids, sorted.
    pub fn participants(&self) -> Vec<String> {
        let mut parts: Vec<String> = self.rows.iter().map(|r| r.part.clone()).collect();
        parts.sort();
        parts.dedup();
        parts
    }

    pub fn rows_for<'a>(&'a self, part: &'a str) -> impl Iterator<Item = &'a TagRow> + 'a {
        self.rows.iter().filter(move |r| r.part == part)
    }

    /// Write the tag table back with `artefact_percent` and `status` columns.
    pub fn write_summary(&self, path: &Path, results: &[(Option<f64>, String)]) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        let mut header = self.headers.clone();
        header.push_field("artefact_percent");
        header.push_field("status");
        writer.write_record(&header)?;
        for (record, (percent, status)) in self.records.iter().zip(results) {
            let mut out = record.clone();
            out.push_field(&percent.map(|p| format!("{:.2}", p)).unwrap_or_default());
            out.push_field(status);
            writer.write_record(&out)?;
        }
        writer
            .flush()
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
